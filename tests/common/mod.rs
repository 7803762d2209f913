//! Helpers for integration tests.

use chrono::Utc;
use diesel_migrations::{EmbeddedMigrations, MigrationHarness, embed_migrations};
use ecoleta::db::{DbPool, establish_connection_pool};
use ecoleta::domain::coordinate::Coordinate;
use ecoleta::domain::point::NewPoint;
use ecoleta::domain::types::{
    CityName, Email, ImageRef, ItemId, PhoneNumber, PointName, RegionCode,
};
use tempfile::NamedTempFile;

/// Schema and item seed from `migrations/`.
pub const MIGRATIONS: EmbeddedMigrations = embed_migrations!();

/// Migrated SQLite file that is deleted when dropped.
pub struct TestDb {
    _tempfile: NamedTempFile,
    pool: DbPool,
}

impl TestDb {
    pub fn new() -> Self {
        let tempfile = NamedTempFile::new().expect("temp database file");
        let path = tempfile.path().to_str().expect("utf-8 temp path");
        let pool = establish_connection_pool(path).expect("registry pool");
        let mut conn = pool.get().expect("registry connection");
        conn.run_pending_migrations(MIGRATIONS)
            .expect("schema and item seed should apply");
        drop(conn);
        Self {
            _tempfile: tempfile,
            pool,
        }
    }

    pub fn pool(&self) -> DbPool {
        self.pool.clone()
    }
}

/// A valid registration in `region`/`city` accepting `items`.
#[allow(dead_code)]
pub fn new_point(name: &str, region: &str, city: &str, items: &[i32]) -> NewPoint {
    NewPoint {
        name: PointName::new(name).expect("valid name"),
        image: ImageRef::new("point.jpg").expect("valid image"),
        email: Email::new("contato@ponto.com.br").expect("valid email"),
        whatsapp: PhoneNumber::new("47999990000").expect("valid phone"),
        region: RegionCode::new(region).expect("valid region"),
        city: CityName::new(city).expect("valid city"),
        location: Coordinate::new(-26.9194, -49.0661).expect("valid coordinate"),
        items: items
            .iter()
            .map(|id| ItemId::new(*id).expect("valid item id"))
            .collect(),
        created_at: Utc::now().naive_utc(),
    }
}
