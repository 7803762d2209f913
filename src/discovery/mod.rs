//! Collection-point discovery pipeline.
//!
//! Region and city come from a directory service, item categories from the
//! registry, the position from the device. [`filter::FilterState`] combines the
//! three into a single points query and [`presenter::MapPresenter`] turns the
//! result into map markers and category tiles. [`session::DiscoverySession`]
//! runs the lookups.

pub mod criteria;
pub mod filter;
pub mod generation;
pub mod location;
pub mod notice;
pub mod ports;
pub mod presenter;
pub mod selection;
pub mod session;

pub use filter::{Effect, Event, FilterError, FilterState};
pub use session::{Collaborators, DiscoverySession};
