use formats::{Coordinate, NamedGeometry};
use parking_lot::RwLock;

/// In-memory flood event store, in insertion order.
#[derive(Debug, Default)]
pub struct EventStore {
    events: RwLock<Vec<Coordinate>>,
}

impl EventStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_events(events: Vec<Coordinate>) -> Self {
        Self {
            events: RwLock::new(events),
        }
    }

    pub fn list(&self) -> Vec<Coordinate> {
        self.events.read().clone()
    }

    /// Events whose location falls inside `region`.
    pub fn in_region(&self, region: &NamedGeometry) -> Vec<Coordinate> {
        self.events
            .read()
            .iter()
            .filter(|c| region.geometry.contains(c.lon_lat()))
            .copied()
            .collect()
    }

    /// Stores `coordinate` and returns the stored copy.
    pub fn insert(&self, coordinate: Coordinate) -> Coordinate {
        self.events.write().push(coordinate);
        coordinate
    }

    pub fn len(&self) -> usize {
        self.events.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.read().is_empty()
    }
}
