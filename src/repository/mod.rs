use crate::db::{DbConnection, DbPool};
use crate::domain::item::Item;
use crate::domain::point::{NewPoint, Point, PointSummary};
use crate::domain::types::{CityName, ItemId, PointId, RegionCode};

pub mod errors;
pub mod item;
pub mod point;
#[cfg(test)]
pub mod test;

pub use errors::{RepositoryError, RepositoryResult};

/// Repository implementation backed by Diesel and SQLite.
#[derive(Clone)]
pub struct DieselRepository {
    pool: DbPool, // r2d2::Pool is cheap to clone
}

impl DieselRepository {
    /// Create a new repository from an established database pool.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }

    /// Get a pooled database connection.
    fn conn(&self) -> RepositoryResult<DbConnection> {
        Ok(self.pool.get()?)
    }
}

/// Query parameters used when searching collection points.
///
/// Every filter is optional. `items` matches points accepting at least one
/// of the listed categories.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PointListQuery {
    pub region: Option<RegionCode>,
    pub city: Option<CityName>,
    pub items: Vec<ItemId>,
}

impl PointListQuery {
    pub fn region(mut self, region: RegionCode) -> Self {
        self.region = Some(region);
        self
    }
    pub fn city(mut self, city: CityName) -> Self {
        self.city = Some(city);
        self
    }
    pub fn items(mut self, items: impl IntoIterator<Item = ItemId>) -> Self {
        self.items = items.into_iter().collect();
        self
    }
}

/// Read-only operations for item categories.
pub trait ItemReader {
    /// List all item categories ordered by id.
    fn list_items(&self) -> RepositoryResult<Vec<Item>>;
    /// Fetch the categories among `ids` that exist.
    fn get_items_by_ids(&self, ids: &[ItemId]) -> RepositoryResult<Vec<Item>>;
}

/// Read-only operations for collection points.
pub trait PointReader {
    /// List points matching the query, ordered by name.
    fn list_points(&self, query: PointListQuery) -> RepositoryResult<Vec<PointSummary>>;
    /// Retrieve a point with its contact data.
    fn get_point_by_id(&self, id: PointId) -> RepositoryResult<Option<Point>>;
}

/// Write operations for collection points.
pub trait PointWriter {
    /// Persist a point and its accepted items, returning the stored record.
    fn create_point(&self, point: &NewPoint) -> RepositoryResult<Point>;
}
