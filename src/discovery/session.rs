use std::rc::Rc;

use futures::future::{FutureExt, LocalBoxFuture};
use futures::stream::{FuturesUnordered, StreamExt};

use crate::discovery::filter::{Effect, Event, FilterError, FilterState, Step};
use crate::discovery::notice::Notice;
use crate::discovery::ports::{ItemCatalog, LocationProvider, PointsSource, RegionDirectory};
use crate::discovery::presenter::{Interaction, MapEvent, MapPresenter, MapSettings, MapView};
use crate::domain::types::{CityChoice, ItemId, PointId, RegionChoice};

/// External services a session talks to, handed over once at construction.
pub struct Collaborators<D, C, P, L> {
    pub directory: D,
    pub catalog: C,
    pub points: P,
    pub locator: L,
}

/// Drives a [`FilterState`] against its collaborators on the current thread.
///
/// Lookups run concurrently inside a [`FuturesUnordered`]; nothing is ever
/// aborted. A response that lost its race is still awaited and then dropped
/// by the state when it arrives.
pub struct DiscoverySession<D, C, P, L> {
    state: FilterState,
    presenter: MapPresenter,
    directory: Rc<D>,
    catalog: Rc<C>,
    points: Rc<P>,
    locator: Rc<L>,
    in_flight: FuturesUnordered<LocalBoxFuture<'static, Event>>,
}

impl<D, C, P, L> DiscoverySession<D, C, P, L>
where
    D: RegionDirectory + 'static,
    C: ItemCatalog + 'static,
    P: PointsSource + 'static,
    L: LocationProvider + 'static,
{
    pub fn new(collaborators: Collaborators<D, C, P, L>, settings: MapSettings) -> Self {
        Self {
            state: FilterState::new(),
            presenter: MapPresenter::new(settings),
            directory: Rc::new(collaborators.directory),
            catalog: Rc::new(collaborators.catalog),
            points: Rc::new(collaborators.points),
            locator: Rc::new(collaborators.locator),
            in_flight: FuturesUnordered::new(),
        }
    }

    /// Starts the region, catalog and location lookups.
    pub fn mount(&mut self) {
        let effects = self.state.mount();
        self.dispatch(effects);
    }

    pub fn select_region(&mut self, choice: RegionChoice) -> Result<(), FilterError> {
        let effects = self.state.select_region(choice)?;
        self.dispatch(effects);
        Ok(())
    }

    pub fn select_city(&mut self, choice: impl Into<CityChoice>) -> Result<(), FilterError> {
        let effects = self.state.select_city(choice)?;
        self.dispatch(effects);
        Ok(())
    }

    pub fn toggle_item(&mut self, id: ItemId) -> Result<(), FilterError> {
        let effects = self.state.toggle_item(id)?;
        self.dispatch(effects);
        Ok(())
    }

    /// Handles a map tap. Returns the point to open when a marker was tapped.
    pub fn tap(&mut self, event: MapEvent) -> Result<Option<PointId>, FilterError> {
        match self.presenter.handle(&mut self.state, event)? {
            Interaction::ShowDetail(id) => Ok(Some(id)),
            Interaction::Toggled { effects, .. } => {
                self.dispatch(effects);
                Ok(None)
            }
        }
    }

    /// Waits for the next lookup to finish and applies it.
    ///
    /// Returns `None` once nothing is in flight.
    pub async fn next(&mut self) -> Option<Step> {
        let event = self.in_flight.next().await?;
        let step = self.state.apply(event);
        self.dispatch(step.effects.clone());
        Some(step)
    }

    /// Applies every outstanding lookup, including those they trigger.
    pub async fn settle(&mut self) {
        while self.next().await.is_some() {}
    }

    pub fn in_flight(&self) -> usize {
        self.in_flight.len()
    }

    pub fn state(&self) -> &FilterState {
        &self.state
    }

    pub fn view(&self) -> MapView {
        self.presenter.render(&self.state)
    }

    pub fn take_notices(&mut self) -> Vec<Notice> {
        self.state.take_notices()
    }

    fn dispatch(&mut self, effects: Vec<Effect>) {
        for effect in effects {
            let task = match effect {
                Effect::LoadRegions => {
                    let directory = Rc::clone(&self.directory);
                    async move { Event::RegionsLoaded(directory.list_regions().await) }
                        .boxed_local()
                }
                Effect::LoadItems => {
                    let catalog = Rc::clone(&self.catalog);
                    async move { Event::ItemsLoaded(catalog.list_items().await) }.boxed_local()
                }
                Effect::LoadCities { generation, region } => {
                    let directory = Rc::clone(&self.directory);
                    async move {
                        let result = directory.list_cities(&region).await;
                        Event::CitiesLoaded {
                            generation,
                            region,
                            result,
                        }
                    }
                    .boxed_local()
                }
                Effect::QueryPoints { generation, query } => {
                    let points = Rc::clone(&self.points);
                    async move {
                        let result = points.fetch_points(&query).await;
                        Event::PointsLoaded { generation, result }
                    }
                    .boxed_local()
                }
                Effect::RequestPermission => {
                    let locator = Rc::clone(&self.locator);
                    async move { Event::PermissionAnswered(locator.request_permission().await) }
                        .boxed_local()
                }
                Effect::ResolvePosition => {
                    let locator = Rc::clone(&self.locator);
                    async move { Event::PositionResolved(locator.current_position().await) }
                        .boxed_local()
                }
            };
            self.in_flight.push(task);
        }
    }
}
