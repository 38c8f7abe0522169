use crate::EventBus;

/// A region-selection change as relayed from the selection widget to the map.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Selection {
    /// A region was picked, by exact name.
    Region(String),
    /// Nothing is selected.
    Cleared,
}

impl Selection {
    /// Maps an exact-match lookup result onto a selection; no match deselects.
    pub fn from_match(exact_match: Option<String>) -> Self {
        match exact_match {
            Some(name) => Selection::Region(name),
            None => Selection::Cleared,
        }
    }

    pub fn region(&self) -> Option<&str> {
        match self {
            Selection::Region(name) => Some(name),
            Selection::Cleared => None,
        }
    }
}

pub type SelectionBus = EventBus<Selection>;
