use chrono::NaiveDateTime;
use diesel::prelude::*;

use crate::domain::coordinate::Coordinate;
use crate::domain::item::Item as DomainItem;
use crate::domain::point::{
    NewPoint as DomainNewPoint, Point as DomainPoint, PointSummary as DomainPointSummary,
};
use crate::domain::types::{
    CityName, Email, ImageRef, PhoneNumber, PointName, RegionCode, TypeConstraintError,
};

/// Diesel model representing the `points` table.
#[derive(Debug, Clone, Identifiable, Queryable)]
#[diesel(table_name = crate::schema::points)]
pub struct Point {
    pub id: i32,
    pub name: String,
    pub image: String,
    pub email: String,
    pub whatsapp: String,
    pub region: String,
    pub city: String,
    pub latitude: f64,
    pub longitude: f64,
    pub created_at: NaiveDateTime,
}

/// Insertable form of [`Point`].
#[derive(Debug, Insertable)]
#[diesel(table_name = crate::schema::points)]
pub struct NewPoint<'a> {
    pub name: &'a str,
    pub image: &'a str,
    pub email: &'a str,
    pub whatsapp: &'a str,
    pub region: &'a str,
    pub city: &'a str,
    pub latitude: f64,
    pub longitude: f64,
    pub created_at: NaiveDateTime,
}

/// Row of the `point_items` association table.
#[derive(Debug, Clone, Copy, Insertable, Queryable)]
#[diesel(table_name = crate::schema::point_items)]
pub struct PointItem {
    pub point_id: i32,
    pub item_id: i32,
}

impl Point {
    fn location(&self) -> Result<Coordinate, TypeConstraintError> {
        Coordinate::new(self.latitude, self.longitude)
    }

    /// Combine the row with its accepted items into a full domain record.
    pub fn into_domain(self, items: Vec<DomainItem>) -> Result<DomainPoint, TypeConstraintError> {
        let location = self.location()?;
        Ok(DomainPoint {
            id: self.id.try_into()?,
            name: PointName::new(self.name)?,
            image: ImageRef::new(self.image)?,
            email: Email::new(self.email)?,
            whatsapp: PhoneNumber::new(self.whatsapp)?,
            region: RegionCode::new(self.region)?,
            city: CityName::new(self.city)?,
            location,
            items,
            created_at: self.created_at,
        })
    }

    /// Project the row into the summary returned by point searches.
    pub fn into_summary(
        self,
        items: Vec<DomainItem>,
    ) -> Result<DomainPointSummary, TypeConstraintError> {
        let location = self.location()?;
        Ok(DomainPointSummary {
            id: self.id.try_into()?,
            name: PointName::new(self.name)?,
            image: ImageRef::new(self.image)?,
            location,
            items,
        })
    }
}

impl<'a> From<&'a DomainNewPoint> for NewPoint<'a> {
    fn from(point: &'a DomainNewPoint) -> Self {
        Self {
            name: point.name.as_str(),
            image: point.image.as_str(),
            email: point.email.as_str(),
            whatsapp: point.whatsapp.as_str(),
            region: point.region.as_str(),
            city: point.city.as_str(),
            latitude: point.location.latitude,
            longitude: point.location.longitude,
            created_at: point.created_at,
        }
    }
}
