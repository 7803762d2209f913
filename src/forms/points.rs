use std::collections::BTreeSet;

use chrono::Utc;
use serde::Deserialize;
use thiserror::Error;
use validator::{Validate, ValidationErrors};

use crate::domain::coordinate::Coordinate;
use crate::domain::point::NewPoint;
use crate::domain::types::{
    CityName, Email, ImageRef, ItemId, PhoneNumber, PointName, RegionCode, TypeConstraintError,
};

/// Image stored for points registered without a photo.
pub const DEFAULT_POINT_IMAGE: &str = "point-placeholder.jpg";

/// JSON body of `POST /points`.
#[derive(Debug, Deserialize, Validate)]
pub struct CreatePointForm {
    #[validate(length(min = 1))]
    pub name: String,
    #[validate(email)]
    pub email: String,
    #[validate(length(min = 1))]
    pub whatsapp: String,
    #[validate(length(equal = 2))]
    pub region: String,
    #[validate(length(min = 1))]
    pub city: String,
    pub latitude: f64,
    pub longitude: f64,
    #[validate(length(min = 1))]
    pub items: Vec<i32>,
    #[serde(default)]
    pub image: Option<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct CreatePointPayload {
    pub name: PointName,
    pub image: ImageRef,
    pub email: Email,
    pub whatsapp: PhoneNumber,
    pub region: RegionCode,
    pub city: CityName,
    pub location: Coordinate,
    /// Distinct, ascending.
    pub items: Vec<ItemId>,
}

impl CreatePointPayload {
    pub fn into_new_point(self) -> NewPoint {
        NewPoint {
            name: self.name,
            image: self.image,
            email: self.email,
            whatsapp: self.whatsapp,
            region: self.region,
            city: self.city,
            location: self.location,
            items: self.items,
            created_at: Utc::now().naive_utc(),
        }
    }
}

#[derive(Debug, Error)]
pub enum CreatePointFormError {
    #[error("Create point form validation failed: {0}")]
    Validation(String),
    #[error("Create point form contains invalid data: {0}")]
    TypeConstraint(String),
}

impl From<ValidationErrors> for CreatePointFormError {
    fn from(value: ValidationErrors) -> Self {
        Self::Validation(value.to_string())
    }
}

impl From<TypeConstraintError> for CreatePointFormError {
    fn from(value: TypeConstraintError) -> Self {
        Self::TypeConstraint(value.to_string())
    }
}

impl TryFrom<CreatePointForm> for CreatePointPayload {
    type Error = CreatePointFormError;

    fn try_from(value: CreatePointForm) -> Result<Self, Self::Error> {
        value.validate()?;

        let items = value
            .items
            .into_iter()
            .map(ItemId::new)
            .collect::<Result<BTreeSet<_>, _>>()?;

        let image = match value.image {
            Some(image) if !image.trim().is_empty() => ImageRef::new(image)?,
            _ => ImageRef::new(DEFAULT_POINT_IMAGE)?,
        };

        Ok(Self {
            name: PointName::new(value.name)?,
            image,
            email: Email::new(value.email)?,
            whatsapp: PhoneNumber::new(value.whatsapp)?,
            region: RegionCode::new(value.region)?,
            city: CityName::new(value.city)?,
            location: Coordinate::new(value.latitude, value.longitude)?,
            items: items.into_iter().collect(),
        })
    }
}
