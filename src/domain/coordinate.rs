use serde::{Deserialize, Serialize};

use crate::domain::types::TypeConstraintError;

const EARTH_RADIUS_KM: f64 = 6371.0;

/// Geographic position in decimal degrees.
///
/// `(0, 0)` is reserved as [`Coordinate::UNRESOLVED`]: it marks a position that
/// has not been obtained yet and must never be used to center a map or to rank
/// points by distance.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq)]
#[serde(try_from = "RawCoordinate")]
pub struct Coordinate {
    pub latitude: f64,
    pub longitude: f64,
}

/// Unchecked wire form of [`Coordinate`].
#[derive(Deserialize)]
struct RawCoordinate {
    latitude: f64,
    longitude: f64,
}

impl TryFrom<RawCoordinate> for Coordinate {
    type Error = TypeConstraintError;

    fn try_from(raw: RawCoordinate) -> Result<Self, Self::Error> {
        Self::new(raw.latitude, raw.longitude)
    }
}

impl Coordinate {
    pub const UNRESOLVED: Coordinate = Coordinate {
        latitude: 0.0,
        longitude: 0.0,
    };

    /// Validates ranges: latitude within ±90, longitude within ±180.
    pub fn new(latitude: f64, longitude: f64) -> Result<Self, TypeConstraintError> {
        if !latitude.is_finite() || latitude.abs() > 90.0 {
            return Err(TypeConstraintError::OutOfRange("latitude"));
        }
        if !longitude.is_finite() || longitude.abs() > 180.0 {
            return Err(TypeConstraintError::OutOfRange("longitude"));
        }
        Ok(Self {
            latitude,
            longitude,
        })
    }

    pub fn is_resolved(&self) -> bool {
        *self != Self::UNRESOLVED
    }

    /// Great-circle distance in kilometres (haversine).
    pub fn distance_km(&self, other: &Coordinate) -> f64 {
        let (lat1, lat2) = (self.latitude.to_radians(), other.latitude.to_radians());
        let d_lat = lat2 - lat1;
        let d_lon = (other.longitude - self.longitude).to_radians();

        let a = (d_lat / 2.0).sin().powi(2) + lat1.cos() * lat2.cos() * (d_lon / 2.0).sin().powi(2);
        2.0 * EARTH_RADIUS_KM * a.sqrt().asin()
    }
}

impl Default for Coordinate {
    fn default() -> Self {
        Self::UNRESOLVED
    }
}
