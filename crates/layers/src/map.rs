use crate::layer::{Layer, LayerId};
use crate::raster::TileLayer;
use crate::vector::{VectorLayer, VectorLayerSnapshot};
use crate::view::View;

#[derive(Debug, Clone, PartialEq)]
pub enum MapLayer {
    Tile(TileLayer),
    Vector(VectorLayer),
}

impl MapLayer {
    pub fn as_vector(&self) -> Option<&VectorLayer> {
        match self {
            MapLayer::Vector(layer) => Some(layer),
            MapLayer::Tile(_) => None,
        }
    }
}

impl Layer for MapLayer {
    fn id(&self) -> LayerId {
        match self {
            MapLayer::Tile(layer) => layer.id(),
            MapLayer::Vector(layer) => layer.id(),
        }
    }

    fn z_index(&self) -> i32 {
        match self {
            MapLayer::Tile(layer) => layer.z_index(),
            MapLayer::Vector(layer) => layer.z_index(),
        }
    }
}

impl From<TileLayer> for MapLayer {
    fn from(layer: TileLayer) -> Self {
        MapLayer::Tile(layer)
    }
}

impl From<VectorLayer> for MapLayer {
    fn from(layer: VectorLayer) -> Self {
        MapLayer::Vector(layer)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LayerError {
    Duplicate(LayerId),
}

impl std::fmt::Display for LayerError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            LayerError::Duplicate(id) => write!(f, "{id} is already attached to the map"),
        }
    }
}

impl std::error::Error for LayerError {}

/// Headless map surface: a view plus the stack of attached layers.
///
/// Draw order is by z-index, ties broken by attach order.
#[derive(Debug, Clone)]
pub struct Map {
    view: View,
    layers: Vec<MapLayer>,
    next_id: u64,
}

impl Map {
    pub fn new(view: View) -> Self {
        Self {
            view,
            layers: Vec::new(),
            next_id: 1,
        }
    }

    pub fn view(&self) -> &View {
        &self.view
    }

    pub fn view_mut(&mut self) -> &mut View {
        &mut self.view
    }

    /// Allocates an id that no layer on this map has used before.
    pub fn next_layer_id(&mut self) -> LayerId {
        let id = LayerId(self.next_id);
        self.next_id += 1;
        id
    }

    pub fn add_layer(&mut self, layer: impl Into<MapLayer>) -> Result<LayerId, LayerError> {
        let layer = layer.into();
        let id = layer.id();
        if self.contains(id) {
            return Err(LayerError::Duplicate(id));
        }
        self.layers.push(layer);
        Ok(id)
    }

    pub fn remove_layer(&mut self, id: LayerId) -> Option<MapLayer> {
        let index = self.layers.iter().position(|layer| layer.id() == id)?;
        Some(self.layers.remove(index))
    }

    pub fn contains(&self, id: LayerId) -> bool {
        self.layers.iter().any(|layer| layer.id() == id)
    }

    pub fn layer(&self, id: LayerId) -> Option<&MapLayer> {
        self.layers.iter().find(|layer| layer.id() == id)
    }

    pub fn vector_layer(&self, id: LayerId) -> Option<&VectorLayer> {
        self.layer(id).and_then(MapLayer::as_vector)
    }

    /// Attached layers in draw order.
    pub fn layers(&self) -> Vec<&MapLayer> {
        let mut out: Vec<&MapLayer> = self.layers.iter().collect();
        out.sort_by_key(|layer| layer.z_index());
        out
    }

    /// Drawables of every vector layer, in draw order.
    pub fn vector_snapshots(&self) -> Vec<(LayerId, VectorLayerSnapshot)> {
        self.layers()
            .into_iter()
            .filter_map(MapLayer::as_vector)
            .map(|layer| (layer.id(), layer.snapshot()))
            .collect()
    }

    pub fn len(&self) -> usize {
        self.layers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.layers.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::{LayerError, Map};
    use formats::Coordinate;
    use pretty_assertions::assert_eq;
    use crate::feature::{Feature, FeatureGeometry};
    use crate::layer::Layer;
    use crate::raster::{OSM_TILE_URL, TileLayer};
    use crate::symbology::LayerStyle;
    use crate::vector::VectorLayer;
    use crate::view::View;

    fn map() -> Map {
        Map::new(View::new([0.0, 0.0], 2.0, [800.0, 600.0]))
    }

    #[test]
    fn layers_draw_by_z_then_attach_order() {
        let mut map = map();
        let icons_id = map.next_layer_id();
        let base_id = map.next_layer_id();
        let outline_id = map.next_layer_id();
        let country_id = map.next_layer_id();

        map.add_layer(VectorLayer::new(icons_id, LayerStyle::flood_icons(), vec![]))
            .unwrap();
        map.add_layer(TileLayer::new(base_id, OSM_TILE_URL)).unwrap();
        map.add_layer(VectorLayer::new(outline_id, LayerStyle::outline(1), vec![]))
            .unwrap();
        map.add_layer(VectorLayer::new(country_id, LayerStyle::outline(0), vec![]))
            .unwrap();

        let order: Vec<_> = map.layers().iter().map(|l| l.id()).collect();
        assert_eq!(order, vec![base_id, country_id, outline_id, icons_id]);
    }

    #[test]
    fn duplicate_ids_are_rejected() {
        let mut map = map();
        let id = map.next_layer_id();
        map.add_layer(TileLayer::new(id, OSM_TILE_URL)).unwrap();
        assert_eq!(
            map.add_layer(TileLayer::new(id, OSM_TILE_URL)),
            Err(LayerError::Duplicate(id))
        );
        assert_eq!(map.len(), 1);
    }

    #[test]
    fn remove_detaches_and_returns_layer() {
        let mut map = map();
        let id = map.next_layer_id();
        map.add_layer(VectorLayer::new(id, LayerStyle::outline(1), vec![]))
            .unwrap();
        let removed = map.remove_layer(id).expect("removed");
        assert!(removed.as_vector().is_some());
        assert!(!map.contains(id));
        assert!(map.remove_layer(id).is_none());
        assert!(map.is_empty());
    }

    #[test]
    fn layer_ids_are_never_reused() {
        let mut map = map();
        let a = map.next_layer_id();
        let b = map.next_layer_id();
        assert_ne!(a, b);
    }

    #[test]
    fn vector_snapshots_skip_tiles_and_follow_draw_order() {
        let mut map = map();
        let icons = map.next_layer_id();
        let base = map.next_layer_id();
        let outline = map.next_layer_id();
        let square = vec![vec![[0.0, 0.0], [1.0, 0.0], [1.0, 1.0], [0.0, 1.0], [0.0, 0.0]]];

        map.add_layer(VectorLayer::new(
            icons,
            LayerStyle::flood_icons(),
            vec![Feature::point(Coordinate::new(5.6, -0.2))],
        ))
        .unwrap();
        map.add_layer(TileLayer::new(base, OSM_TILE_URL)).unwrap();
        map.add_layer(VectorLayer::new(
            outline,
            LayerStyle::outline(1),
            vec![Feature {
                name: None,
                geometry: FeatureGeometry::Area(square),
            }],
        ))
        .unwrap();

        let snapshots = map.vector_snapshots();
        let ids: Vec<_> = snapshots.iter().map(|(id, _)| *id).collect();
        assert_eq!(ids, vec![outline, icons]);
        assert_eq!(snapshots[0].1.triangle_count(), 2);
        assert_eq!(snapshots[1].1.points.len(), 1);
    }
}
