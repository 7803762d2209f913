//! HTTP adapters implementing the discovery ports with `reqwest`.

use std::time::Duration;

use reqwest::RequestBuilder;
use serde::Deserialize;
use serde::de::DeserializeOwned;
use thiserror::Error;

use crate::discovery::ports::RemoteError;
use crate::domain::coordinate::Coordinate;
use crate::domain::types::TypeConstraintError;

pub mod directory;
pub mod location;
pub mod registry;

pub use directory::{DirectoryFlavor, HttpDirectory};
pub use location::ConfiguredLocation;
pub use registry::RegistryClient;

const IBGE_DIRECTORY_URL: &str = "https://servicodados.ibge.gov.br/api/v1/localidades";

#[derive(Debug, Error)]
pub enum ClientError {
    #[error("http error: {0}")]
    Http(#[from] reqwest::Error),
    #[error("unexpected status {0}")]
    Status(u16),
    #[error("invalid payload: {0}")]
    Payload(#[from] TypeConstraintError),
}

impl From<ClientError> for RemoteError {
    fn from(value: ClientError) -> Self {
        match value {
            ClientError::Http(e) if e.is_decode() => RemoteError::Decode(e.to_string()),
            ClientError::Http(e) => match e.status() {
                Some(status) => RemoteError::Status(status.as_u16()),
                None => RemoteError::Transport(e.to_string()),
            },
            ClientError::Status(status) => RemoteError::Status(status),
            ClientError::Payload(e) => RemoteError::Decode(e.to_string()),
        }
    }
}

/// Addresses and transport options of the remote services.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ClientConfig {
    /// Base URL of the points registry, e.g. `http://localhost:3333`.
    pub registry_url: String,
    #[serde(default = "default_directory_url")]
    pub directory_url: String,
    #[serde(default)]
    pub directory_flavor: DirectoryFlavor,
    /// Per-request timeout. Unset means requests may wait indefinitely.
    #[serde(default)]
    pub request_timeout_secs: Option<u64>,
    /// Position reported on devices without a location provider.
    #[serde(default)]
    pub fixed_position: Option<Coordinate>,
}

fn default_directory_url() -> String {
    IBGE_DIRECTORY_URL.to_string()
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            registry_url: "http://localhost:3333".to_string(),
            directory_url: default_directory_url(),
            directory_flavor: DirectoryFlavor::default(),
            request_timeout_secs: None,
            fixed_position: None,
        }
    }
}

impl ClientConfig {
    pub fn http_client(&self) -> Result<reqwest::Client, ClientError> {
        let mut builder = reqwest::Client::builder();
        if let Some(secs) = self.request_timeout_secs {
            builder = builder.timeout(Duration::from_secs(secs));
        }
        Ok(builder.build()?)
    }
}

pub(crate) fn join_url(base: &str, path: &str) -> String {
    format!(
        "{}/{}",
        base.trim_end_matches('/'),
        path.trim_start_matches('/')
    )
}

/// Sends the request and decodes a JSON body from a 2xx response.
pub(crate) async fn fetch_json<T: DeserializeOwned>(
    request: RequestBuilder,
) -> Result<T, ClientError> {
    let response = request.send().await?;
    let status = response.status();
    if !status.is_success() {
        log::warn!("Request to {} failed with {status}", response.url());
        return Err(ClientError::Status(status.as_u16()));
    }
    Ok(response.json::<T>().await?)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn joins_urls_without_duplicate_slashes() {
        assert_eq!(
            join_url("http://localhost:3333/", "/points"),
            "http://localhost:3333/points"
        );
        assert_eq!(join_url("http://h", "items"), "http://h/items");
    }

    #[test]
    fn config_defaults_to_the_ibge_directory_without_timeout() {
        let config: ClientConfig =
            serde_json::from_value(serde_json::json!({ "registry_url": "http://h" })).unwrap();

        assert_eq!(config.directory_url, IBGE_DIRECTORY_URL);
        assert_eq!(config.directory_flavor, DirectoryFlavor::Ibge);
        assert!(config.request_timeout_secs.is_none());
        assert!(config.fixed_position.is_none());
    }

    #[test]
    fn fixed_position_outside_the_globe_is_rejected() {
        let parsed: Result<ClientConfig, _> = serde_json::from_value(serde_json::json!({
            "registry_url": "http://h",
            "fixed_position": { "latitude": -95.0, "longitude": -49.0 }
        }));
        assert!(parsed.is_err());

        let config: ClientConfig = serde_json::from_value(serde_json::json!({
            "registry_url": "http://h",
            "fixed_position": { "latitude": -26.9, "longitude": -49.0 }
        }))
        .unwrap();
        assert!(config.fixed_position.unwrap().is_resolved());
    }

    #[test]
    fn payload_errors_map_to_decode_failures() {
        let remote: RemoteError =
            ClientError::Payload(TypeConstraintError::EmptyString("city")).into();
        assert!(matches!(remote, RemoteError::Decode(_)));
        assert_eq!(
            RemoteError::from(ClientError::Status(502)),
            RemoteError::Status(502)
        );
    }
}
