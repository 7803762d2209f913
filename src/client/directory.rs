use reqwest::Client;
use serde::Deserialize;

use crate::client::{ClientConfig, ClientError, fetch_json, join_url};
use crate::discovery::ports::{RegionDirectory, RemoteError};
use crate::domain::types::{CityName, RegionCode};

/// URL layout and field names of the directory service.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DirectoryFlavor {
    /// IBGE localidades API: `/estados`, `/estados/{uf}/municipios`.
    #[default]
    Ibge,
    /// Plain layout: `/regions`, `/regions/{code}/cities`.
    Generic,
}

impl DirectoryFlavor {
    fn regions_path(self) -> String {
        match self {
            Self::Ibge => "estados".to_string(),
            Self::Generic => "regions".to_string(),
        }
    }

    fn cities_path(self, region: &RegionCode) -> String {
        match self {
            Self::Ibge => format!("estados/{region}/municipios"),
            Self::Generic => format!("regions/{region}/cities"),
        }
    }
}

#[derive(Deserialize)]
struct RegionRecord {
    #[serde(alias = "sigla")]
    code: String,
}

#[derive(Deserialize)]
struct CityRecord {
    #[serde(alias = "nome")]
    name: String,
}

/// Read-only region directory reached over HTTP.
#[derive(Debug, Clone)]
pub struct HttpDirectory {
    client: Client,
    base_url: String,
    flavor: DirectoryFlavor,
}

impl HttpDirectory {
    pub fn new(config: &ClientConfig) -> Result<Self, ClientError> {
        Ok(Self::with_client(
            config.http_client()?,
            config.directory_url.clone(),
            config.directory_flavor,
        ))
    }

    pub fn with_client(client: Client, base_url: String, flavor: DirectoryFlavor) -> Self {
        Self {
            client,
            base_url,
            flavor,
        }
    }

    fn regions_url(&self) -> String {
        join_url(&self.base_url, &self.flavor.regions_path())
    }

    fn cities_url(&self, region: &RegionCode) -> String {
        join_url(&self.base_url, &self.flavor.cities_path(region))
    }

    /// State codes sorted alphabetically.
    pub async fn regions(&self) -> Result<Vec<RegionCode>, ClientError> {
        let records: Vec<RegionRecord> = fetch_json(self.client.get(self.regions_url())).await?;
        parse_regions(records)
    }

    /// City names of `region` sorted alphabetically.
    pub async fn cities(&self, region: &RegionCode) -> Result<Vec<CityName>, ClientError> {
        let records: Vec<CityRecord> = fetch_json(self.client.get(self.cities_url(region))).await?;
        parse_cities(records)
    }
}

fn parse_regions(records: Vec<RegionRecord>) -> Result<Vec<RegionCode>, ClientError> {
    let mut regions = records
        .into_iter()
        .map(|record| RegionCode::new(record.code))
        .collect::<Result<Vec<_>, _>>()?;
    regions.sort();
    Ok(regions)
}

fn parse_cities(records: Vec<CityRecord>) -> Result<Vec<CityName>, ClientError> {
    let mut cities = records
        .into_iter()
        .map(|record| CityName::new(record.name))
        .collect::<Result<Vec<_>, _>>()?;
    cities.sort();
    Ok(cities)
}

impl RegionDirectory for HttpDirectory {
    async fn list_regions(&self) -> Result<Vec<RegionCode>, RemoteError> {
        self.regions().await.map_err(|e| {
            log::error!("Failed to list regions: {e}");
            e.into()
        })
    }

    async fn list_cities(&self, region: &RegionCode) -> Result<Vec<CityName>, RemoteError> {
        self.cities(region).await.map_err(|e| {
            log::error!("Failed to list cities of {region}: {e}");
            e.into()
        })
    }
}
