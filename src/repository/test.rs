use std::sync::Mutex;

use crate::domain::item::Item;
use crate::domain::point::{NewPoint, Point, PointSummary};
use crate::domain::types::{ItemId, PointId};
use crate::repository::{
    ItemReader, PointListQuery, PointReader, PointWriter, RepositoryError, RepositoryResult,
};

/// Simple in-memory repository used for unit tests.
#[derive(Default)]
pub struct TestRepository {
    items: Vec<Item>,
    points: Mutex<Vec<Point>>,
    fail: bool,
}

impl TestRepository {
    pub fn new(items: Vec<Item>, points: Vec<Point>) -> Self {
        Self {
            items,
            points: Mutex::new(points),
            fail: false,
        }
    }

    /// A repository whose every call fails like an unreachable database.
    pub fn failing() -> Self {
        Self {
            fail: true,
            ..Self::default()
        }
    }

    fn check(&self) -> RepositoryResult<()> {
        if self.fail {
            Err(RepositoryError::Database(diesel::result::Error::BrokenTransactionManager))
        } else {
            Ok(())
        }
    }

    pub fn stored_points(&self) -> Vec<Point> {
        self.points.lock().unwrap().clone()
    }
}

impl ItemReader for TestRepository {
    fn list_items(&self) -> RepositoryResult<Vec<Item>> {
        self.check()?;
        Ok(self.items.clone())
    }

    fn get_items_by_ids(&self, ids: &[ItemId]) -> RepositoryResult<Vec<Item>> {
        self.check()?;
        Ok(self
            .items
            .iter()
            .filter(|item| ids.contains(&item.id))
            .cloned()
            .collect())
    }
}

impl PointReader for TestRepository {
    fn list_points(&self, query: PointListQuery) -> RepositoryResult<Vec<PointSummary>> {
        self.check()?;
        let mut points: Vec<Point> = self.points.lock().unwrap().clone();
        if let Some(region) = &query.region {
            points.retain(|p| &p.region == region);
        }
        if let Some(city) = &query.city {
            points.retain(|p| &p.city == city);
        }
        if !query.items.is_empty() {
            points.retain(|p| p.items.iter().any(|item| query.items.contains(&item.id)));
        }
        points.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(points.into_iter().map(PointSummary::from).collect())
    }

    fn get_point_by_id(&self, id: PointId) -> RepositoryResult<Option<Point>> {
        self.check()?;
        Ok(self
            .points
            .lock()
            .unwrap()
            .iter()
            .find(|p| p.id == id)
            .cloned())
    }
}

impl PointWriter for TestRepository {
    fn create_point(&self, point: &NewPoint) -> RepositoryResult<Point> {
        self.check()?;
        let mut points = self.points.lock().unwrap();
        let id = PointId::new(points.len() as i32 + 1)?;
        let stored = Point {
            id,
            name: point.name.clone(),
            image: point.image.clone(),
            email: point.email.clone(),
            whatsapp: point.whatsapp.clone(),
            region: point.region.clone(),
            city: point.city.clone(),
            location: point.location,
            items: self
                .items
                .iter()
                .filter(|item| point.items.contains(&item.id))
                .cloned()
                .collect(),
            created_at: point.created_at,
        };
        points.push(stored.clone());
        Ok(stored)
    }
}
