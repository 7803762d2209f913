use crate::domain::types::{CityChoice, ItemId, PointId, RegionChoice, TypeConstraintError};
use crate::dto::points::{PointDetailDto, PointDto};
use crate::forms::points::CreatePointPayload;
use crate::repository::{ItemReader, PointListQuery, PointReader, PointWriter};

use super::{ServiceError, ServiceResult};

/// Query parameters accepted by `GET /points`.
///
/// `items` accepts both `items=1,3` and `items=1&items=3`.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct PointsQueryParams {
    pub region: Option<String>,
    pub city: Option<String>,
    /// Raw `items` values in arrival order, each possibly comma separated.
    pub items: Vec<String>,
}

impl PointsQueryParams {
    /// Collect parameters from decoded query-string pairs. Unknown keys are
    /// ignored; a repeated `region` or `city` keeps the last value.
    pub fn from_pairs<I>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (String, String)>,
    {
        let mut params = Self::default();
        for (key, value) in pairs {
            match key.as_str() {
                "region" => params.region = Some(value),
                "city" => params.city = Some(value),
                "items" => params.items.push(value),
                _ => {}
            }
        }
        params
    }
}

fn parse_item_id(raw: &str) -> Result<ItemId, TypeConstraintError> {
    raw.parse::<i32>()
        .map_err(|_| TypeConstraintError::InvalidValue(format!("item id `{raw}`")))
        .and_then(ItemId::new)
}

impl TryFrom<PointsQueryParams> for PointListQuery {
    type Error = TypeConstraintError;

    fn try_from(params: PointsQueryParams) -> Result<Self, Self::Error> {
        let mut query = PointListQuery::default();

        if let RegionChoice::Code(region) = params
            .region
            .as_deref()
            .unwrap_or_default()
            .parse::<RegionChoice>()?
        {
            query = query.region(region);
        }

        if let CityChoice::Name(city) = params
            .city
            .as_deref()
            .unwrap_or_default()
            .parse::<CityChoice>()?
        {
            query = query.city(city);
        }

        let mut ids = params
            .items
            .iter()
            .flat_map(|value| value.split(','))
            .map(str::trim)
            .filter(|raw| !raw.is_empty())
            .map(parse_item_id)
            .collect::<Result<Vec<_>, _>>()?;
        ids.sort();
        ids.dedup();
        if !ids.is_empty() {
            query = query.items(ids);
        }

        Ok(query)
    }
}

/// Search points by region, city and accepted items.
pub fn list_points<R>(
    params: PointsQueryParams,
    repo: &R,
    public_url: &str,
) -> ServiceResult<Vec<PointDto>>
where
    R: PointReader,
{
    let query = PointListQuery::try_from(params)?;

    match repo.list_points(query) {
        Ok(points) => Ok(points
            .into_iter()
            .map(|point| PointDto::from_summary(point, public_url))
            .collect()),
        Err(e) => {
            log::error!("Failed to list points: {e}");
            Err(ServiceError::Internal)
        }
    }
}

/// Show a single point including its contact data.
pub fn show_point<R>(point_id: i32, repo: &R, public_url: &str) -> ServiceResult<PointDetailDto>
where
    R: PointReader,
{
    let point_id = PointId::new(point_id).map_err(|_| ServiceError::NotFound)?;

    match repo.get_point_by_id(point_id) {
        Ok(Some(point)) => Ok(PointDetailDto::from_point(point, public_url)),
        Ok(None) => Err(ServiceError::NotFound),
        Err(e) => {
            log::error!("Failed to get point {point_id}: {e}");
            Err(ServiceError::Internal)
        }
    }
}

/// Register a new point. Every referenced item must exist.
pub fn create_point<R>(
    payload: CreatePointPayload,
    repo: &R,
    public_url: &str,
) -> ServiceResult<PointDetailDto>
where
    R: ItemReader + PointWriter,
{
    let known = match repo.get_items_by_ids(&payload.items) {
        Ok(items) => items,
        Err(e) => {
            log::error!("Failed to look up items: {e}");
            return Err(ServiceError::Internal);
        }
    };

    let unknown: Vec<String> = payload
        .items
        .iter()
        .filter(|id| !known.iter().any(|item| item.id == **id))
        .map(ToString::to_string)
        .collect();
    if !unknown.is_empty() {
        return Err(ServiceError::Form(format!(
            "Unknown item ids: {}",
            unknown.join(", ")
        )));
    }

    let new_point = payload.into_new_point();
    match repo.create_point(&new_point) {
        Ok(point) => {
            log::info!("Registered point {} in {}/{}", point.id, point.region, point.city);
            Ok(PointDetailDto::from_point(point, public_url))
        }
        Err(e) => {
            log::error!("Failed to create point: {e}");
            Err(ServiceError::Internal)
        }
    }
}
