//! Map-facing projection of the discovery state.

use serde::{Deserialize, Serialize};

use crate::discovery::filter::{Effect, FilterError, FilterState};
use crate::domain::coordinate::Coordinate;
use crate::domain::point::PointSummary;
use crate::domain::types::{ItemId, PointId};

/// Initial viewport used while the device position is unknown.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MapSettings {
    pub default_center: Coordinate,
    pub zoom: u8,
}

impl Default for MapSettings {
    fn default() -> Self {
        Self {
            default_center: Coordinate {
                latitude: -27.2092052,
                longitude: -49.6401092,
            },
            zoom: 15,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Viewport {
    /// Centered on the resolved device position.
    Located { center: Coordinate, zoom: u8 },
    /// Location unresolved; centered on the configured default.
    Placeholder { center: Coordinate, zoom: u8 },
}

impl Viewport {
    pub fn center(&self) -> Coordinate {
        match self {
            Self::Located { center, .. } | Self::Placeholder { center, .. } => *center,
        }
    }

    pub fn is_located(&self) -> bool {
        matches!(self, Self::Located { .. })
    }
}

/// Marker descriptor handed to the map surface.
#[derive(Debug, Clone, PartialEq)]
pub struct Marker {
    pub id: PointId,
    pub latitude: f64,
    pub longitude: f64,
    pub label: String,
    pub thumbnail: String,
}

/// Selectable item category in the tray under the map.
#[derive(Debug, Clone, PartialEq)]
pub struct ItemTile {
    pub id: ItemId,
    pub title: String,
    pub icon: String,
    pub selected: bool,
}

#[derive(Debug, Clone, PartialEq)]
pub struct MapView {
    pub viewport: Viewport,
    pub markers: Vec<Marker>,
    pub tiles: Vec<ItemTile>,
}

/// Tap reported by the map surface.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MapEvent {
    MarkerTapped(PointId),
    TileTapped(ItemId),
}

/// What a tap resolved to.
#[derive(Debug, Clone, PartialEq)]
pub enum Interaction {
    /// Navigate to the detail view of the point.
    ShowDetail(PointId),
    /// The item selection changed; effects must be dispatched.
    Toggled { id: ItemId, effects: Vec<Effect> },
}

#[derive(Debug, Clone, Default)]
pub struct MapPresenter {
    settings: MapSettings,
}

impl MapPresenter {
    pub fn new(settings: MapSettings) -> Self {
        Self { settings }
    }

    pub fn settings(&self) -> &MapSettings {
        &self.settings
    }

    pub fn viewport(&self, coordinate: Coordinate) -> Viewport {
        let zoom = self.settings.zoom;
        if coordinate.is_resolved() {
            Viewport::Located {
                center: coordinate,
                zoom,
            }
        } else {
            Viewport::Placeholder {
                center: self.settings.default_center,
                zoom,
            }
        }
    }

    pub fn render(&self, state: &FilterState) -> MapView {
        let markers = state
            .points()
            .iter()
            .map(|point| Marker {
                id: point.id,
                latitude: point.location.latitude,
                longitude: point.location.longitude,
                label: point.name.to_string(),
                thumbnail: point.image.to_string(),
            })
            .collect();

        let tiles = state
            .catalog()
            .iter()
            .map(|item| ItemTile {
                id: item.id,
                title: item.title.to_string(),
                icon: item.image.to_string(),
                selected: state.selection().contains(item.id),
            })
            .collect();

        MapView {
            viewport: self.viewport(state.coordinate()),
            markers,
            tiles,
        }
    }

    /// Routes a tap: tiles toggle the selection, markers open the detail view.
    pub fn handle(
        &self,
        state: &mut FilterState,
        event: MapEvent,
    ) -> Result<Interaction, FilterError> {
        match event {
            MapEvent::TileTapped(id) => {
                let effects = state.toggle_item(id)?;
                Ok(Interaction::Toggled { id, effects })
            }
            MapEvent::MarkerTapped(id) => match state.point(id) {
                Some(_) => Ok(Interaction::ShowDetail(id)),
                None => Err(FilterError::UnknownPoint(id)),
            },
        }
    }
}

/// Closest point to the device, or `None` while the position is unresolved.
pub fn nearest_point(state: &FilterState) -> Option<&PointSummary> {
    let here = state.coordinate();
    if !here.is_resolved() {
        return None;
    }
    state.points().iter().min_by(|a, b| {
        here.distance_km(&a.location)
            .total_cmp(&here.distance_km(&b.location))
    })
}
