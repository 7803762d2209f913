use serde::{Deserialize, Serialize};

use crate::domain::coordinate::Coordinate;
use crate::domain::item::Item;
use crate::domain::point::{NewPoint, Point, PointSummary};
use crate::domain::types::{ImageRef, PointId, PointName, TypeConstraintError};
use crate::dto::items::{ItemDto, image_url};

/// Point projection returned by `GET /points`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PointDto {
    pub id: i32,
    pub name: String,
    pub image_url: String,
    pub latitude: f64,
    pub longitude: f64,
    pub items: Vec<ItemDto>,
}

impl PointDto {
    pub fn from_summary(point: PointSummary, public_url: &str) -> Self {
        Self {
            id: point.id.get(),
            name: point.name.into_inner(),
            image_url: image_url(public_url, &point.image),
            latitude: point.location.latitude,
            longitude: point.location.longitude,
            items: point
                .items
                .into_iter()
                .map(|item| ItemDto::from_item(item, public_url))
                .collect(),
        }
    }
}

impl TryFrom<PointDto> for PointSummary {
    type Error = TypeConstraintError;

    fn try_from(dto: PointDto) -> Result<Self, Self::Error> {
        Ok(Self {
            id: PointId::new(dto.id)?,
            name: PointName::new(dto.name)?,
            image: ImageRef::new(dto.image_url)?,
            location: Coordinate::new(dto.latitude, dto.longitude)?,
            items: dto
                .items
                .into_iter()
                .map(Item::try_from)
                .collect::<Result<Vec<_>, _>>()?,
        })
    }
}

/// Full point record returned by `GET /points/{id}` and `POST /points`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PointDetailDto {
    #[serde(flatten)]
    pub point: PointDto,
    pub email: String,
    pub whatsapp: String,
    pub region: String,
    pub city: String,
}

impl PointDetailDto {
    pub fn from_point(point: Point, public_url: &str) -> Self {
        let email = point.email.to_string();
        let whatsapp = point.whatsapp.to_string();
        let region = point.region.to_string();
        let city = point.city.to_string();
        Self {
            point: PointDto::from_summary(point.into(), public_url),
            email,
            whatsapp,
            region,
            city,
        }
    }
}

/// JSON body accepted by `POST /points`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CreatePointDto {
    pub name: String,
    pub email: String,
    pub whatsapp: String,
    pub region: String,
    pub city: String,
    pub latitude: f64,
    pub longitude: f64,
    pub items: Vec<i32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
}

impl From<&NewPoint> for CreatePointDto {
    fn from(point: &NewPoint) -> Self {
        Self {
            name: point.name.to_string(),
            email: point.email.to_string(),
            whatsapp: point.whatsapp.to_string(),
            region: point.region.to_string(),
            city: point.city.to_string(),
            latitude: point.location.latitude,
            longitude: point.location.longitude,
            items: point.items.iter().map(|id| id.get()).collect(),
            image: Some(point.image.to_string()),
        }
    }
}
