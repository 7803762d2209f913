//! Collaborators the discovery pipeline depends on.
//!
//! Implementations live outside the core: `crate::client` provides HTTP
//! adapters, tests provide scripted fakes. Every call is single shot; the core
//! never retries on its own.

use std::future::Future;

use thiserror::Error;

use crate::discovery::criteria::PointsQuery;
use crate::discovery::location::{LocationFailure, Permission};
use crate::domain::coordinate::Coordinate;
use crate::domain::item::Item;
use crate::domain::point::PointSummary;
use crate::domain::types::{CityName, RegionCode};

/// Transport-neutral failure of a remote lookup.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum RemoteError {
    #[error("transport error: {0}")]
    Transport(String),
    #[error("unexpected status {0}")]
    Status(u16),
    #[error("malformed response: {0}")]
    Decode(String),
}

/// Read-only directory of states and their cities.
pub trait RegionDirectory {
    fn list_regions(&self) -> impl Future<Output = Result<Vec<RegionCode>, RemoteError>>;

    fn list_cities(
        &self,
        region: &RegionCode,
    ) -> impl Future<Output = Result<Vec<CityName>, RemoteError>>;
}

/// Source of the collectible item categories.
pub trait ItemCatalog {
    fn list_items(&self) -> impl Future<Output = Result<Vec<Item>, RemoteError>>;
}

/// Registry search for collection points.
pub trait PointsSource {
    fn fetch_points(
        &self,
        query: &PointsQuery,
    ) -> impl Future<Output = Result<Vec<PointSummary>, RemoteError>>;
}

/// Device position provider guarded by a permission prompt.
pub trait LocationProvider {
    fn request_permission(&self) -> impl Future<Output = Permission>;

    fn current_position(&self) -> impl Future<Output = Result<Coordinate, LocationFailure>>;
}
