//! The discovery coordinator.
//!
//! [`FilterState`] is the single writer of the filter inputs (region, city,
//! item selection) and of everything derived from them (city universe, point
//! results, device position). It never performs I/O: user operations and
//! completed lookups go in, [`Effect`]s describing the lookups to start come
//! out. Every lookup whose result depends on a changing input carries a
//! [`Generation`] so a superseded response can be recognised on arrival.

use thiserror::Error;

use crate::discovery::criteria::{FilterCriteria, PointsQuery};
use crate::discovery::generation::{Arrival, Generation, Tracked};
use crate::discovery::location::{
    GeoLocator, LocationFailure, LocationRequest, LocationState, Permission,
};
use crate::discovery::notice::{DiscoveryError, Notice};
use crate::discovery::ports::RemoteError;
use crate::discovery::selection::SelectionSet;
use crate::domain::coordinate::Coordinate;
use crate::domain::item::Item;
use crate::domain::point::PointSummary;
use crate::domain::types::{CityChoice, CityName, ItemId, PointId, RegionChoice, RegionCode};

/// Lookup the coordinator wants its driver to start.
#[derive(Debug, Clone, PartialEq)]
pub enum Effect {
    LoadRegions,
    LoadItems,
    LoadCities {
        generation: Generation,
        region: RegionCode,
    },
    QueryPoints {
        generation: Generation,
        query: PointsQuery,
    },
    RequestPermission,
    ResolvePosition,
}

/// Completed lookup fed back into the coordinator.
#[derive(Debug, Clone, PartialEq)]
pub enum Event {
    RegionsLoaded(Result<Vec<RegionCode>, RemoteError>),
    ItemsLoaded(Result<Vec<Item>, RemoteError>),
    CitiesLoaded {
        generation: Generation,
        region: RegionCode,
        result: Result<Vec<CityName>, RemoteError>,
    },
    PointsLoaded {
        generation: Generation,
        result: Result<Vec<PointSummary>, RemoteError>,
    },
    PermissionAnswered(Permission),
    PositionResolved(Result<Coordinate, LocationFailure>),
}

/// Result of applying an [`Event`].
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Step {
    /// `false` when the event was a superseded response and was dropped.
    pub fresh: bool,
    pub effects: Vec<Effect>,
}

impl Step {
    fn fresh(effects: Vec<Effect>) -> Self {
        Self {
            fresh: true,
            effects,
        }
    }

    fn stale() -> Self {
        Self::default()
    }
}

/// User input rejected by the coordinator. State is left untouched.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum FilterError {
    #[error("region {0} is not listed by the directory")]
    UnknownRegion(RegionCode),
    #[error("select a region first")]
    NoRegion,
    #[error("cities for the selected region are still loading")]
    CitiesPending,
    #[error("city `{0}` is not listed for the selected region")]
    UnknownCity(CityName),
    #[error("item {0} is not in the catalog")]
    UnknownItem(ItemId),
    #[error("point {0} is not in the current results")]
    UnknownPoint(PointId),
}

#[derive(Debug, Default)]
pub struct FilterState {
    mounted: bool,
    regions: Vec<RegionCode>,
    region: RegionChoice,
    cities: Tracked<Vec<CityName>>,
    city: Option<CityName>,
    catalog: Vec<Item>,
    selection: SelectionSet,
    points: Tracked<Vec<PointSummary>>,
    locator: GeoLocator,
    notices: Vec<Notice>,
}

impl FilterState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Session start: load the region universe and the item catalog, and ask
    /// for location permission. Later calls do nothing.
    pub fn mount(&mut self) -> Vec<Effect> {
        if self.mounted {
            return Vec::new();
        }
        self.mounted = true;

        let mut effects = vec![Effect::LoadRegions, Effect::LoadItems];
        effects.extend(self.locator.begin().map(location_effect));
        effects
    }

    /// Selects a region (or clears it with [`RegionChoice::Unset`]).
    ///
    /// The city is reset and the city universe is emptied right away, so the
    /// list of a previous region is never visible. A concrete region starts a
    /// new city lookup; the unset choice does not touch the network.
    pub fn select_region(&mut self, choice: RegionChoice) -> Result<Vec<Effect>, FilterError> {
        if choice == self.region {
            return Ok(Vec::new());
        }
        if let RegionChoice::Code(code) = &choice {
            // An empty universe means the directory failed; accept any code then.
            if !self.regions.is_empty() && !self.regions.contains(code) {
                return Err(FilterError::UnknownRegion(code.clone()));
            }
        }

        self.region = choice;
        self.city = None;
        self.cities.reset(Vec::new());
        self.invalidate_points();

        let mut effects = Vec::new();
        if let RegionChoice::Code(code) = &self.region {
            let generation = self.cities.begin();
            log::debug!("Loading cities of {code} ({generation})");
            effects.push(Effect::LoadCities {
                generation,
                region: code.clone(),
            });
        }
        Ok(effects)
    }

    /// Selects a city from the universe loaded for the current region, or
    /// clears it with [`CityChoice::Unset`].
    ///
    /// Clearing the city drops the displayed points and supersedes any points
    /// query in flight without issuing a new one.
    pub fn select_city(
        &mut self,
        choice: impl Into<CityChoice>,
    ) -> Result<Vec<Effect>, FilterError> {
        let name = match choice.into() {
            CityChoice::Unset => {
                if self.city.take().is_some() {
                    log::debug!("City cleared");
                    self.invalidate_points();
                }
                return Ok(Vec::new());
            }
            CityChoice::Name(name) => name,
        };
        if !self.region.is_set() {
            return Err(FilterError::NoRegion);
        }
        if self.cities.is_pending() {
            return Err(FilterError::CitiesPending);
        }
        if !self.cities.value().contains(&name) {
            return Err(FilterError::UnknownCity(name));
        }
        if self.city.as_ref() == Some(&name) {
            return Ok(Vec::new());
        }

        self.city = Some(name);
        Ok(self.requery())
    }

    /// Adds the item to the selection when absent, removes it when present.
    pub fn toggle_item(&mut self, id: ItemId) -> Result<Vec<Effect>, FilterError> {
        if !self.catalog.iter().any(|item| item.id == id) {
            return Err(FilterError::UnknownItem(id));
        }
        self.selection.toggle(id);
        Ok(self.requery())
    }

    pub fn is_submittable(&self) -> bool {
        self.region.is_set() && self.city.is_some()
    }

    pub fn criteria(&self) -> FilterCriteria {
        FilterCriteria {
            region: self.region.clone(),
            city: self.city.clone(),
            items: self.selection.clone(),
        }
    }

    /// Feeds a completed lookup back into the state.
    pub fn apply(&mut self, event: Event) -> Step {
        match event {
            Event::RegionsLoaded(Ok(mut regions)) => {
                regions.sort();
                regions.dedup();
                self.regions = regions;
                Step::fresh(Vec::new())
            }
            Event::RegionsLoaded(Err(e)) => {
                log::warn!("Failed to load regions: {e}");
                self.notify(DiscoveryError::DirectoryUnavailable(e));
                Step::fresh(Vec::new())
            }
            Event::ItemsLoaded(Ok(items)) => {
                self.catalog = items;
                let catalog = &self.catalog;
                self.selection
                    .retain_known(|id| catalog.iter().any(|item| item.id == id));
                Step::fresh(Vec::new())
            }
            Event::ItemsLoaded(Err(e)) => {
                log::warn!("Failed to load item catalog: {e}");
                self.notify(DiscoveryError::CatalogUnavailable(e));
                Step::fresh(Vec::new())
            }
            Event::CitiesLoaded {
                generation,
                region,
                result,
            } => {
                if self.region.code() != Some(&region) {
                    log::debug!("Discarding cities of {region} ({generation}): region changed");
                    return Step::stale();
                }
                match self.cities.settle(generation, result) {
                    Arrival::Stale => {
                        log::debug!("Discarding stale cities of {region} ({generation})");
                        Step::stale()
                    }
                    Arrival::Current(Ok(())) => Step::fresh(Vec::new()),
                    Arrival::Current(Err(e)) => {
                        log::warn!("Failed to load cities of {region}: {e}");
                        self.notify(DiscoveryError::DirectoryUnavailable(e));
                        Step::fresh(Vec::new())
                    }
                }
            }
            Event::PointsLoaded { generation, result } => {
                match self.points.settle(generation, result) {
                    Arrival::Stale => {
                        log::debug!("Discarding stale points response ({generation})");
                        Step::stale()
                    }
                    Arrival::Current(Ok(())) => {
                        log::info!(
                            "Loaded {} points ({generation})",
                            self.points.value().len()
                        );
                        Step::fresh(Vec::new())
                    }
                    Arrival::Current(Err(e)) => {
                        log::warn!("Points query failed: {e}");
                        self.notify(DiscoveryError::PointsQueryFailed(e));
                        Step::fresh(Vec::new())
                    }
                }
            }
            Event::PermissionAnswered(permission) => {
                let was_requesting = *self.locator.state() == LocationState::Requesting;
                let next = self.locator.on_permission(permission);
                if !was_requesting {
                    return Step::stale();
                }
                if permission == Permission::Denied {
                    log::warn!("Location permission denied");
                    self.notify(DiscoveryError::LocationDenied);
                }
                Step::fresh(next.map(location_effect).into_iter().collect())
            }
            Event::PositionResolved(result) => {
                if !self.locator.on_position(result) {
                    return Step::stale();
                }
                if let LocationState::Failed(reason) = self.locator.state() {
                    log::warn!("Failed to resolve location: {reason}");
                    let reason = reason.clone();
                    self.notify(DiscoveryError::LocationUnresolved(reason));
                }
                Step::fresh(Vec::new())
            }
        }
    }

    pub fn regions(&self) -> &[RegionCode] {
        &self.regions
    }

    pub fn region(&self) -> &RegionChoice {
        &self.region
    }

    pub fn cities(&self) -> &[CityName] {
        self.cities.value()
    }

    pub fn cities_pending(&self) -> bool {
        self.cities.is_pending()
    }

    pub fn city(&self) -> Option<&CityName> {
        self.city.as_ref()
    }

    pub fn catalog(&self) -> &[Item] {
        &self.catalog
    }

    pub fn selection(&self) -> &SelectionSet {
        &self.selection
    }

    pub fn points(&self) -> &[PointSummary] {
        self.points.value()
    }

    pub fn point(&self, id: PointId) -> Option<&PointSummary> {
        self.points.value().iter().find(|point| point.id == id)
    }

    pub fn points_pending(&self) -> bool {
        self.points.is_pending()
    }

    pub fn points_generation(&self) -> Generation {
        self.points.generation()
    }

    pub fn location(&self) -> &LocationState {
        self.locator.state()
    }

    /// Device position, or the unresolved sentinel.
    pub fn coordinate(&self) -> Coordinate {
        self.locator.coordinate()
    }

    /// Drains queued notices.
    pub fn take_notices(&mut self) -> Vec<Notice> {
        std::mem::take(&mut self.notices)
    }

    fn notify(&mut self, error: DiscoveryError) {
        self.notices.push(error.into());
    }

    /// Issues one query for the current criteria, superseding any in flight.
    fn requery(&mut self) -> Vec<Effect> {
        match self.criteria().to_query() {
            Some(query) => {
                let generation = self.points.begin();
                log::info!(
                    "Querying points for {}/{} with {} item filter(s) ({generation})",
                    query.region,
                    query.city,
                    query.items.len()
                );
                vec![Effect::QueryPoints { generation, query }]
            }
            None => Vec::new(),
        }
    }

    /// Results no longer match any submittable criteria.
    fn invalidate_points(&mut self) {
        if self.points.is_pending() || !self.points.value().is_empty() {
            self.points.reset(Vec::new());
        }
    }
}

fn location_effect(request: LocationRequest) -> Effect {
    match request {
        LocationRequest::Permission => Effect::RequestPermission,
        LocationRequest::Position => Effect::ResolvePosition,
    }
}
