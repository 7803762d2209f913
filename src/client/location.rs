use crate::client::ClientConfig;
use crate::discovery::location::{LocationFailure, Permission};
use crate::discovery::ports::LocationProvider;
use crate::domain::coordinate::Coordinate;

/// Location provider for hosts without positioning hardware.
///
/// Grants permission only when a position was configured and then reports
/// that position; otherwise the request is denied.
#[derive(Debug, Clone, Default)]
pub struct ConfiguredLocation {
    position: Option<Coordinate>,
}

impl ConfiguredLocation {
    pub fn new(position: Option<Coordinate>) -> Self {
        Self { position }
    }

    pub fn from_config(config: &ClientConfig) -> Self {
        Self::new(config.fixed_position)
    }
}

impl LocationProvider for ConfiguredLocation {
    async fn request_permission(&self) -> Permission {
        match self.position {
            Some(_) => Permission::Granted,
            None => Permission::Denied,
        }
    }

    async fn current_position(&self) -> Result<Coordinate, LocationFailure> {
        self.position.ok_or(LocationFailure::Unavailable)
    }
}
