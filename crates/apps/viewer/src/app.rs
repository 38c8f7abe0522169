use client::{ApiError, FloodClient};
use runtime::{Selection, SelectionBus};
use tracing::{info, warn};

use crate::autocomplete::{Autocomplete, AutocompleteUpdate};

/// Region names offered before the country geometry has loaded.
pub const PLACEHOLDER_REGIONS: [&str; 4] = ["A Region", "S Region", "D Region", "F Region"];

/// Region picker wired to the selection bus.
#[derive(Debug)]
pub struct App {
    client: FloodClient,
    autocomplete: Autocomplete,
    bus: SelectionBus,
}

impl App {
    pub fn new(client: FloodClient, bus: SelectionBus) -> Self {
        Self {
            client,
            autocomplete: Autocomplete::new(
                PLACEHOLDER_REGIONS.iter().map(|name| name.to_string()).collect(),
            ),
            bus,
        }
    }

    /// Offers the backend's region names. On failure the current options are
    /// kept and the error is returned.
    pub async fn load_options(&mut self) -> Result<usize, ApiError> {
        match self.client.country_geometry().await {
            Ok(geometry) => {
                let names = geometry.region_names();
                info!(regions = names.len(), "region options loaded");
                let count = names.len();
                self.autocomplete.set_options(names);
                Ok(count)
            }
            Err(e) => {
                warn!("keeping placeholder regions: {e}");
                Err(e)
            }
        }
    }

    /// Runs the picker on the current input and publishes the resulting
    /// selection, a region on exact match and `Cleared` otherwise.
    pub fn type_text(&self, text: &str) -> AutocompleteUpdate {
        let update = self.autocomplete.input(text);
        let selection = Selection::from_match(update.exact_match.clone());
        self.bus.publish(selection);
        update
    }

    pub fn autocomplete(&self) -> &Autocomplete {
        &self.autocomplete
    }

    pub fn bus(&self) -> &SelectionBus {
        &self.bus
    }
}
