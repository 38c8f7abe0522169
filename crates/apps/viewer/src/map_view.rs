use std::future::Future;
use std::sync::Arc;

use client::{ApiError, FloodClient};
use formats::{Coordinate, CountryGeometry};
use layers::{Feature, LayerId, LayerStyle, Map, MapLayer, TileLayer, VectorLayer, View};
use runtime::{Selection, Subscription};
use tokio::sync::mpsc;
use tracing::{debug, error, info, warn};

use crate::config::ViewerConfig;
use crate::status::{ViewError, ViewStatus};

const COUNTRY_OUTLINE_Z: i32 = 0;
const REGION_OUTLINE_Z: i32 = 1;

/// Pointer input on the map, in viewport pixels.
#[derive(Debug, Copy, Clone, PartialEq)]
pub enum MapInput {
    Click { pixel: [f64; 2] },
    PointerMove { pixel: [f64; 2] },
}

/// Drawable counts of one vector overlay.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct OverlaySummary {
    pub layer: LayerId,
    pub points: usize,
    pub lines: usize,
    pub triangles: usize,
}

/// Stamp carried by a marker request so late answers can be recognised.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
struct MarkerTicket {
    generation: u64,
    seq: u64,
}

/// Responses reported back from spawned requests.
#[derive(Debug)]
enum ViewMessage {
    Country(Result<Arc<CountryGeometry>, ApiError>),
    Region {
        generation: u64,
        name: String,
        result: Result<Arc<CountryGeometry>, ApiError>,
    },
    Markers {
        ticket: MarkerTicket,
        result: Result<Vec<Coordinate>, ApiError>,
    },
    Submitted(Result<Coordinate, ApiError>),
}

/// Keeps the map's overlay layers in step with the selected region.
///
/// All state lives on one task. Requests run on spawned tasks and report back
/// through an internal channel; [`MapView::pump`] applies one response at a
/// time in arrival order. Every selection bumps a generation counter, and
/// responses stamped with an older generation are dropped, as are marker
/// lists older than the one already shown.
#[derive(Debug)]
pub struct MapView {
    client: FloodClient,
    map: Map,
    fit_padding: [f64; 4],
    basemap_layer: Option<LayerId>,
    country_layer: Option<LayerId>,
    region_layer: Option<LayerId>,
    icon_layer: Option<LayerId>,
    selected_region: Option<String>,
    markers: Vec<Coordinate>,
    hovered: Option<Coordinate>,
    generation: u64,
    next_marker_seq: u64,
    applied_marker_seq: u64,
    in_flight: usize,
    status: ViewStatus,
    tx: mpsc::UnboundedSender<ViewMessage>,
    rx: mpsc::UnboundedReceiver<ViewMessage>,
}

impl MapView {
    pub fn new(client: FloodClient, config: &ViewerConfig) -> Self {
        let view = View::new(config.initial_center, config.initial_zoom, config.map_size);
        let mut map = Map::new(view);
        let basemap_id = map.next_layer_id();
        let basemap_layer = attach(&mut map, TileLayer::new(basemap_id, config.basemap_url.clone()));
        let (tx, rx) = mpsc::unbounded_channel();

        Self {
            client,
            map,
            fit_padding: config.fit_padding(),
            basemap_layer,
            country_layer: None,
            region_layer: None,
            icon_layer: None,
            selected_region: None,
            markers: Vec::new(),
            hovered: None,
            generation: 0,
            next_marker_seq: 0,
            applied_marker_seq: 0,
            in_flight: 0,
            status: ViewStatus::Ready,
            tx,
            rx,
        }
    }

    /// Requests the country outline and the initial, unfiltered markers.
    pub fn start(&mut self) {
        info!("loading country geometry");
        let client = self.client.clone();
        self.spawn(async move { ViewMessage::Country(client.country_geometry().await) });
        self.refresh_markers();
    }

    pub fn handle_selection(&mut self, selection: Selection) {
        self.generation += 1;
        self.status = ViewStatus::Ready;

        match selection {
            Selection::Region(name) => {
                info!(region = %name, generation = self.generation, "region selected");
                self.selected_region = Some(name.clone());
                let client = self.client.clone();
                let generation = self.generation;
                self.spawn(async move {
                    let result = client.country_geometry().await;
                    ViewMessage::Region {
                        generation,
                        name,
                        result,
                    }
                });
            }
            Selection::Cleared => {
                info!(generation = self.generation, "selection cleared");
                self.selected_region = None;
                self.replace_region_outline(None);
                self.refresh_markers();
            }
        }
    }

    /// Re-queries markers for the current selection.
    pub fn refresh_markers(&mut self) {
        self.next_marker_seq += 1;
        let ticket = MarkerTicket {
            generation: self.generation,
            seq: self.next_marker_seq,
        };
        let region = self.selected_region.clone();
        debug!(region = ?region, seq = ticket.seq, "requesting markers");

        let client = self.client.clone();
        self.spawn(async move {
            let result = client.markers(region.as_deref()).await;
            ViewMessage::Markers { ticket, result }
        });
    }

    pub fn handle_input(&mut self, input: MapInput) {
        match input {
            MapInput::Click { pixel } => {
                self.status = ViewStatus::Ready;
                let coordinate = Coordinate::from(self.map.view().pixel_to_lon_lat(pixel));
                info!(lat = coordinate.lat, lng = coordinate.lng, "clicked on coordinate");
                let client = self.client.clone();
                self.spawn(async move {
                    ViewMessage::Submitted(client.submit_marker(coordinate).await)
                });
            }
            MapInput::PointerMove { pixel } => {
                self.hovered = Some(Coordinate::from(self.map.view().pixel_to_lon_lat(pixel)));
            }
        }
    }

    /// Applies the next response. Returns `false` straight away when nothing
    /// is in flight.
    pub async fn pump(&mut self) -> bool {
        if self.in_flight == 0 {
            return false;
        }
        match self.rx.recv().await {
            Some(message) => {
                self.apply(message);
                true
            }
            None => false,
        }
    }

    /// Applies responses until every request, including follow-ups, has landed.
    pub async fn settle(&mut self) {
        while self.pump().await {}
    }

    /// Event loop: follows the selection bus and map input until either closes,
    /// then drops the subscription and hands the view back.
    pub async fn run(
        mut self,
        mut selections: Subscription<Selection>,
        mut inputs: mpsc::Receiver<MapInput>,
    ) -> Self {
        info!("map view attached");
        loop {
            tokio::select! {
                biased;
                selection = selections.recv() => match selection {
                    Some(selection) => self.handle_selection(selection),
                    None => break,
                },
                Some(message) = self.rx.recv() => self.apply(message),
                input = inputs.recv() => match input {
                    Some(input) => self.handle_input(input),
                    None => break,
                },
            }
        }
        selections.unsubscribe();
        info!(in_flight = self.in_flight, "map view detached");
        self
    }

    pub fn map(&self) -> &Map {
        &self.map
    }

    pub fn selected_region(&self) -> Option<&str> {
        self.selected_region.as_deref()
    }

    pub fn markers(&self) -> &[Coordinate] {
        &self.markers
    }

    pub fn hovered_coordinate(&self) -> Option<Coordinate> {
        self.hovered
    }

    pub fn status(&self) -> &ViewStatus {
        &self.status
    }

    pub fn in_flight(&self) -> usize {
        self.in_flight
    }

    /// What each vector overlay would draw, in draw order.
    pub fn overlay_summary(&self) -> Vec<OverlaySummary> {
        self.map
            .vector_snapshots()
            .into_iter()
            .map(|(layer, snapshot)| OverlaySummary {
                layer,
                points: snapshot.points.len(),
                lines: snapshot.lines.len(),
                triangles: snapshot.triangle_count(),
            })
            .collect()
    }

    pub fn basemap_layer(&self) -> Option<&MapLayer> {
        self.basemap_layer.and_then(|id| self.map.layer(id))
    }

    pub fn country_layer(&self) -> Option<&VectorLayer> {
        self.country_layer.and_then(|id| self.map.vector_layer(id))
    }

    pub fn region_layer(&self) -> Option<&VectorLayer> {
        self.region_layer.and_then(|id| self.map.vector_layer(id))
    }

    pub fn icon_layer(&self) -> Option<&VectorLayer> {
        self.icon_layer.and_then(|id| self.map.vector_layer(id))
    }

    fn spawn<F>(&mut self, request: F)
    where
        F: Future<Output = ViewMessage> + Send + 'static,
    {
        self.in_flight += 1;
        let tx = self.tx.clone();
        tokio::spawn(async move {
            // The view may have been dropped while the request ran.
            let _ = tx.send(request.await);
        });
    }

    fn apply(&mut self, message: ViewMessage) {
        self.in_flight = self.in_flight.saturating_sub(1);

        match message {
            ViewMessage::Country(Ok(geometry)) => self.show_country(&geometry),
            ViewMessage::Country(Err(e)) => self.fail("country geometry", e),
            ViewMessage::Region {
                generation,
                name,
                result,
            } => {
                if generation != self.generation {
                    debug!(region = %name, generation, current = self.generation, "discarding stale region geometry");
                    return;
                }
                match result {
                    Ok(geometry) => self.show_region(&geometry, name),
                    Err(e) => {
                        self.fail("region geometry", e);
                        self.selected_region = None;
                        self.replace_region_outline(None);
                        self.refresh_markers();
                    }
                }
            }
            ViewMessage::Markers { ticket, result } => {
                if ticket.generation != self.generation || ticket.seq <= self.applied_marker_seq {
                    debug!(
                        generation = ticket.generation,
                        seq = ticket.seq,
                        current = self.generation,
                        applied = self.applied_marker_seq,
                        "discarding stale markers"
                    );
                    return;
                }
                self.applied_marker_seq = ticket.seq;
                match result {
                    Ok(markers) => {
                        self.markers = markers;
                        self.rebuild_icon_layer();
                    }
                    Err(e) => self.fail("markers", e),
                }
            }
            ViewMessage::Submitted(Ok(coordinate)) => {
                info!(lat = coordinate.lat, lng = coordinate.lng, "marker stored");
                self.refresh_markers();
            }
            ViewMessage::Submitted(Err(e)) => self.fail("submit marker", e),
        }
    }

    fn show_country(&mut self, geometry: &CountryGeometry) {
        if let Some(id) = self.country_layer.take() {
            self.map.remove_layer(id);
        }
        let Some(feature) = Feature::from_geometry(&geometry.country.geometry) else {
            warn!(country = %geometry.country.name, "country outline has nothing to draw");
            return;
        };
        let feature = feature.with_name(geometry.country.name.clone());
        let extent = feature.extent();

        let id = self.map.next_layer_id();
        let layer = VectorLayer::new(id, LayerStyle::outline(COUNTRY_OUTLINE_Z), vec![feature]);
        self.country_layer = attach(&mut self.map, layer);

        if !self.map.view_mut().fit(&extent, self.fit_padding) {
            warn!("couldn't fit view to the country outline");
        }
        info!(
            country = %geometry.country.name,
            regions = geometry.regions.len(),
            "country outline loaded"
        );
    }

    fn show_region(&mut self, geometry: &CountryGeometry, name: String) {
        match geometry.region(&name) {
            Some(region) => {
                let feature = Feature::from_geometry(&region.geometry).map(|f| f.with_name(name));
                self.replace_region_outline(feature);
            }
            None => {
                warn!(region = %name, "selected region not found, clearing selection");
                self.selected_region = None;
                self.replace_region_outline(None);
                self.status = ViewStatus::Error(ViewError::RegionNotFound(name));
            }
        }
        self.refresh_markers();
    }

    fn replace_region_outline(&mut self, feature: Option<Feature>) {
        if let Some(id) = self.region_layer.take() {
            self.map.remove_layer(id);
        }
        if let Some(feature) = feature {
            let id = self.map.next_layer_id();
            let layer = VectorLayer::new(id, LayerStyle::outline(REGION_OUTLINE_Z), vec![feature]);
            self.region_layer = attach(&mut self.map, layer);
        }
    }

    fn rebuild_icon_layer(&mut self) {
        if let Some(id) = self.icon_layer.take() {
            self.map.remove_layer(id);
        }
        let features = self.markers.iter().copied().map(Feature::point).collect();
        let id = self.map.next_layer_id();
        self.icon_layer = attach(
            &mut self.map,
            VectorLayer::new(id, LayerStyle::flood_icons(), features),
        );
        debug!(markers = self.markers.len(), "event icons rebuilt");
    }

    fn fail(&mut self, what: &str, e: ApiError) {
        error!(kind = ?e.kind(), "{what} request failed: {e}");
        self.status = ViewStatus::Error(ViewError::Api(e));
    }
}

fn attach(map: &mut Map, layer: impl Into<MapLayer>) -> Option<LayerId> {
    match map.add_layer(layer) {
        Ok(id) => Some(id),
        Err(e) => {
            error!("couldn't attach layer: {e}");
            None
        }
    }
}
