use reqwest::Client;

use crate::client::{ClientConfig, ClientError, fetch_json, join_url};
use crate::discovery::criteria::PointsQuery;
use crate::discovery::ports::{ItemCatalog, PointsSource, RemoteError};
use crate::domain::item::Item;
use crate::domain::point::{NewPoint, PointSummary};
use crate::domain::types::PointId;
use crate::dto::items::ItemDto;
use crate::dto::points::{CreatePointDto, PointDetailDto, PointDto};

/// Client of the points registry backend.
#[derive(Debug, Clone)]
pub struct RegistryClient {
    client: Client,
    base_url: String,
}

impl RegistryClient {
    pub fn new(config: &ClientConfig) -> Result<Self, ClientError> {
        Ok(Self::with_client(
            config.http_client()?,
            config.registry_url.clone(),
        ))
    }

    pub fn with_client(client: Client, base_url: String) -> Self {
        Self { client, base_url }
    }

    fn url(&self, path: &str) -> String {
        join_url(&self.base_url, path)
    }

    /// `GET /items`
    pub async fn items(&self) -> Result<Vec<Item>, ClientError> {
        let items: Vec<ItemDto> = fetch_json(self.client.get(self.url("items"))).await?;
        Ok(items
            .into_iter()
            .map(Item::try_from)
            .collect::<Result<Vec<_>, _>>()?)
    }

    /// `GET /points?region=..&city=..&items=..`
    pub async fn points(&self, query: &PointsQuery) -> Result<Vec<PointSummary>, ClientError> {
        let request = self
            .client
            .get(self.url("points"))
            .query(&query.to_query_pairs());
        let points: Vec<PointDto> = fetch_json(request).await?;
        Ok(points
            .into_iter()
            .map(PointSummary::try_from)
            .collect::<Result<Vec<_>, _>>()?)
    }

    /// `GET /points/{id}`
    pub async fn point(&self, id: PointId) -> Result<PointDetailDto, ClientError> {
        fetch_json(self.client.get(self.url(&format!("points/{id}")))).await
    }

    /// `POST /points`: registers a new collection point.
    pub async fn register_point(&self, point: &NewPoint) -> Result<PointDetailDto, ClientError> {
        let body = CreatePointDto::from(point);
        fetch_json(self.client.post(self.url("points")).json(&body)).await
    }
}

impl ItemCatalog for RegistryClient {
    async fn list_items(&self) -> Result<Vec<Item>, RemoteError> {
        self.items().await.map_err(|e| {
            log::error!("Failed to list items: {e}");
            e.into()
        })
    }
}

impl PointsSource for RegistryClient {
    async fn fetch_points(&self, query: &PointsQuery) -> Result<Vec<PointSummary>, RemoteError> {
        self.points(query).await.map_err(|e| {
            log::error!("Failed to fetch points for {}/{}: {e}", query.region, query.city);
            e.into()
        })
    }
}
