use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::domain::coordinate::Coordinate;
use crate::domain::item::Item;
use crate::domain::types::{
    CityName, Email, ImageRef, ItemId, PhoneNumber, PointId, PointName, RegionCode,
};

/// A registered collection point with its contact data.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Point {
    pub id: PointId,
    pub name: PointName,
    pub image: ImageRef,
    pub email: Email,
    pub whatsapp: PhoneNumber,
    pub region: RegionCode,
    pub city: CityName,
    pub location: Coordinate,
    pub items: Vec<Item>,
    pub created_at: NaiveDateTime,
}

/// Read-only projection of a [`Point`] returned by point searches.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PointSummary {
    pub id: PointId,
    pub name: PointName,
    pub image: ImageRef,
    pub location: Coordinate,
    pub items: Vec<Item>,
}

impl PointSummary {
    pub fn accepts(&self, item_id: ItemId) -> bool {
        self.items.iter().any(|item| item.id == item_id)
    }
}

impl From<Point> for PointSummary {
    fn from(point: Point) -> Self {
        Self {
            id: point.id,
            name: point.name,
            image: point.image,
            location: point.location,
            items: point.items,
        }
    }
}

/// Information required to register a new [`Point`].
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct NewPoint {
    pub name: PointName,
    pub image: ImageRef,
    pub email: Email,
    pub whatsapp: PhoneNumber,
    pub region: RegionCode,
    pub city: CityName,
    pub location: Coordinate,
    pub items: Vec<ItemId>,
    pub created_at: NaiveDateTime,
}
