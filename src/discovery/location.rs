//! Permission-gated acquisition of the device position.
//!
//! ```text
//! Unrequested -> Requesting -> Denied
//!                           -> Resolving -> Resolved(coordinate)
//!                                        -> Failed(reason)
//! ```
//!
//! Each transition happens at most once per session. `Denied`, `Resolved` and
//! `Failed` are terminal; nothing re-requests automatically.

use std::fmt::{Display, Formatter};

use crate::domain::coordinate::Coordinate;

/// Answer of the permission prompt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Permission {
    Granted,
    Denied,
}

/// Why a position could not be produced.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LocationFailure {
    Denied,
    Unavailable,
    Timeout,
}

impl Display for LocationFailure {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Denied => write!(f, "denied"),
            Self::Unavailable => write!(f, "position unavailable"),
            Self::Timeout => write!(f, "timed out"),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum LocationState {
    Unrequested,
    Requesting,
    Denied,
    Resolving,
    Resolved(Coordinate),
    Failed(LocationFailure),
}

/// Three-way summary of the flow once it has ended.
#[derive(Debug, Clone, PartialEq)]
pub enum LocationOutcome {
    Granted(Coordinate),
    Denied,
    Failed(LocationFailure),
}

/// Next step the locator asks its driver to perform.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LocationRequest {
    Permission,
    Position,
}

#[derive(Debug, Clone, PartialEq)]
pub struct GeoLocator {
    state: LocationState,
}

impl Default for GeoLocator {
    fn default() -> Self {
        Self {
            state: LocationState::Unrequested,
        }
    }
}

impl GeoLocator {
    pub fn state(&self) -> &LocationState {
        &self.state
    }

    /// Resolved position, or [`Coordinate::UNRESOLVED`] in every other state.
    pub fn coordinate(&self) -> Coordinate {
        match self.state {
            LocationState::Resolved(coordinate) => coordinate,
            _ => Coordinate::UNRESOLVED,
        }
    }

    pub fn outcome(&self) -> Option<LocationOutcome> {
        match &self.state {
            LocationState::Resolved(coordinate) => Some(LocationOutcome::Granted(*coordinate)),
            LocationState::Denied => Some(LocationOutcome::Denied),
            LocationState::Failed(reason) => Some(LocationOutcome::Failed(reason.clone())),
            _ => None,
        }
    }

    /// Starts the flow. Only the first call issues a request.
    pub fn begin(&mut self) -> Option<LocationRequest> {
        if self.state != LocationState::Unrequested {
            return None;
        }
        self.state = LocationState::Requesting;
        Some(LocationRequest::Permission)
    }

    /// Consumes the prompt answer; a grant asks for exactly one position fetch.
    pub fn on_permission(&mut self, permission: Permission) -> Option<LocationRequest> {
        if self.state != LocationState::Requesting {
            log::debug!("Ignoring permission answer in state {:?}", self.state);
            return None;
        }
        match permission {
            Permission::Granted => {
                self.state = LocationState::Resolving;
                Some(LocationRequest::Position)
            }
            Permission::Denied => {
                self.state = LocationState::Denied;
                None
            }
        }
    }

    /// Consumes the position fetch. Returns `false` when no fetch was pending.
    pub fn on_position(&mut self, result: Result<Coordinate, LocationFailure>) -> bool {
        if self.state != LocationState::Resolving {
            log::debug!("Ignoring position result in state {:?}", self.state);
            return false;
        }
        self.state = match result {
            Ok(coordinate) if coordinate.is_resolved() => LocationState::Resolved(coordinate),
            // A provider reporting the sentinel has not really resolved anything.
            Ok(_) => LocationState::Failed(LocationFailure::Unavailable),
            Err(reason) => LocationState::Failed(reason),
        };
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn granted_flow_resolves_a_coordinate() {
        let mut locator = GeoLocator::default();
        assert_eq!(locator.begin(), Some(LocationRequest::Permission));
        assert_eq!(
            locator.on_permission(Permission::Granted),
            Some(LocationRequest::Position)
        );

        let here = Coordinate::new(-26.9, -49.07).unwrap();
        assert!(locator.on_position(Ok(here)));
        assert_eq!(locator.coordinate(), here);
        assert_eq!(locator.outcome(), Some(LocationOutcome::Granted(here)));
    }

    #[test]
    fn denial_is_terminal_and_keeps_the_sentinel() {
        let mut locator = GeoLocator::default();
        locator.begin();
        assert_eq!(locator.on_permission(Permission::Denied), None);

        assert_eq!(locator.begin(), None);
        assert!(!locator.on_position(Ok(Coordinate::new(1.0, 1.0).unwrap())));
        assert_eq!(locator.coordinate(), Coordinate::UNRESOLVED);
        assert_eq!(locator.outcome(), Some(LocationOutcome::Denied));
    }

    #[test]
    fn failed_fetch_keeps_the_sentinel() {
        let mut locator = GeoLocator::default();
        locator.begin();
        locator.on_permission(Permission::Granted);
        locator.on_position(Err(LocationFailure::Timeout));

        assert_eq!(locator.coordinate(), Coordinate::UNRESOLVED);
        assert_eq!(
            locator.outcome(),
            Some(LocationOutcome::Failed(LocationFailure::Timeout))
        );
    }

    #[test]
    fn sentinel_position_counts_as_failure() {
        let mut locator = GeoLocator::default();
        locator.begin();
        locator.on_permission(Permission::Granted);
        locator.on_position(Ok(Coordinate::UNRESOLVED));

        assert_eq!(
            locator.state(),
            &LocationState::Failed(LocationFailure::Unavailable)
        );
    }

    #[test]
    fn begin_only_requests_once() {
        let mut locator = GeoLocator::default();
        assert!(locator.begin().is_some());
        assert!(locator.begin().is_none());
        assert_eq!(locator.state(), &LocationState::Requesting);
    }
}
