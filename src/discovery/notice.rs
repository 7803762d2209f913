use thiserror::Error;

use crate::discovery::location::LocationFailure;
use crate::discovery::ports::RemoteError;

/// Recoverable failures surfaced to the user.
///
/// None of them stops the discovery flow: each one degrades a single piece of
/// state (a list, the position or the result set) and leaves the rest usable.
/// Stale responses are not errors and never appear here.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum DiscoveryError {
    #[error("region directory unavailable: {0}")]
    DirectoryUnavailable(RemoteError),
    #[error("item catalog unavailable: {0}")]
    CatalogUnavailable(RemoteError),
    #[error("location permission denied")]
    LocationDenied,
    #[error("current location could not be resolved: {0}")]
    LocationUnresolved(LocationFailure),
    #[error("points query failed: {0}")]
    PointsQueryFailed(RemoteError),
}

/// Non-blocking message queued for the presentation layer.
#[derive(Debug, Clone, PartialEq)]
pub struct Notice {
    pub error: DiscoveryError,
}

impl Notice {
    pub fn message(&self) -> String {
        self.error.to_string()
    }
}

impl From<DiscoveryError> for Notice {
    fn from(error: DiscoveryError) -> Self {
        Self { error }
    }
}
