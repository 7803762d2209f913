//! Generation tags for asynchronous dependencies.
//!
//! Every request issued for a dependency is stamped with the generation that
//! was current when it left. A response is applied only while its generation
//! is still the latest one; anything older is reported as stale and dropped.

use std::fmt::{Display, Formatter};

/// Monotonically increasing version of one asynchronous dependency.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Generation(u64);

impl Generation {
    pub const fn get(self) -> u64 {
        self.0
    }

    fn next(self) -> Self {
        Self(self.0 + 1)
    }
}

impl Display for Generation {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Classification of a response when it reaches the owner of the value.
#[derive(Debug, PartialEq)]
pub enum Arrival<T> {
    /// The response belongs to the latest generation and carries its result.
    Current(T),
    /// A newer generation superseded the request; the result was dropped.
    Stale,
}

/// Last accepted value of a dependency plus the bookkeeping needed to reject
/// superseded responses.
#[derive(Debug, Clone)]
pub struct Tracked<T> {
    value: T,
    generation: Generation,
    pending: bool,
}

impl<T: Default> Default for Tracked<T> {
    fn default() -> Self {
        Self::new(T::default())
    }
}

impl<T> Tracked<T> {
    pub fn new(value: T) -> Self {
        Self {
            value,
            generation: Generation::default(),
            pending: false,
        }
    }

    pub fn value(&self) -> &T {
        &self.value
    }

    pub fn generation(&self) -> Generation {
        self.generation
    }

    pub fn is_pending(&self) -> bool {
        self.pending
    }

    /// Opens a new generation for a request about to be issued.
    pub fn begin(&mut self) -> Generation {
        self.generation = self.generation.next();
        self.pending = true;
        self.generation
    }

    /// Supersedes any request in flight and replaces the value locally.
    pub fn reset(&mut self, value: T) {
        self.generation = self.generation.next();
        self.pending = false;
        self.value = value;
    }

    /// Settles a response for `generation`.
    ///
    /// Current successes replace the value wholesale. Current failures keep the
    /// previous value and hand the error back. Stale arrivals change nothing.
    pub fn settle<E>(
        &mut self,
        generation: Generation,
        result: Result<T, E>,
    ) -> Arrival<Result<(), E>> {
        if generation != self.generation || !self.pending {
            return Arrival::Stale;
        }
        self.pending = false;
        match result {
            Ok(value) => {
                self.value = value;
                Arrival::Current(Ok(()))
            }
            Err(e) => Arrival::Current(Err(e)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn newer_generation_wins_regardless_of_arrival_order() {
        let mut cities: Tracked<Vec<&str>> = Tracked::default();
        let first = cities.begin();
        let second = cities.begin();

        let applied = cities.settle::<()>(second, Ok(vec!["Blumenau"]));
        assert_eq!(applied, Arrival::Current(Ok(())));

        let late = cities.settle::<()>(first, Ok(vec!["Campinas"]));
        assert_eq!(late, Arrival::Stale);
        assert_eq!(cities.value(), &vec!["Blumenau"]);
        assert!(!cities.is_pending());
    }

    #[test]
    fn failures_keep_the_previous_value() {
        let mut points = Tracked::new(vec![1, 2]);
        let generation = points.begin();

        let outcome = points.settle(generation, Err("offline"));
        assert_eq!(outcome, Arrival::Current(Err("offline")));
        assert_eq!(points.value(), &vec![1, 2]);
    }

    #[test]
    fn reset_discards_requests_in_flight() {
        let mut cities = Tracked::new(vec!["Blumenau"]);
        let generation = cities.begin();
        cities.reset(Vec::new());

        assert_eq!(cities.settle::<()>(generation, Ok(vec!["Joinville"])), Arrival::Stale);
        assert!(cities.value().is_empty());
    }

    #[test]
    fn duplicate_responses_are_stale() {
        let mut points = Tracked::new(0);
        let generation = points.begin();
        assert_eq!(points.settle::<()>(generation, Ok(1)), Arrival::Current(Ok(())));
        assert_eq!(points.settle::<()>(generation, Ok(2)), Arrival::Stale);
        assert_eq!(*points.value(), 1);
    }
}
