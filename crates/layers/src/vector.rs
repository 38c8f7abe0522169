use earcutr::earcut;
use foundation::Extent;
use tracing::warn;

use crate::feature::{Feature, FeatureGeometry};
use crate::layer::{Layer, LayerId};
use crate::symbology::LayerStyle;

/// A layer of vector features drawn with one style.
///
/// Layers are rebuilt rather than edited: callers construct a new layer with
/// the full feature list and swap it in on the [`Map`](crate::Map).
#[derive(Debug, Clone, PartialEq)]
pub struct VectorLayer {
    id: LayerId,
    pub style: LayerStyle,
    features: Vec<Feature>,
}

/// What a layer draws, flattened into projected coordinates.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct VectorLayerSnapshot {
    pub points: Vec<[f64; 2]>,
    pub lines: Vec<Vec<[f64; 2]>>,
    /// Fill triangles, three vertices each.
    pub area_triangles: Vec<[f64; 2]>,
    /// Area rings, stroked as outlines.
    pub area_outlines: Vec<Vec<[f64; 2]>>,
}

impl VectorLayerSnapshot {
    pub fn triangle_count(&self) -> usize {
        self.area_triangles.len() / 3
    }

    fn push_area(&mut self, rings: &[Vec<[f64; 2]>]) {
        self.area_triangles.extend(fill_triangles(rings));
        self.area_outlines.extend_from_slice(rings);
    }
}

impl VectorLayer {
    pub fn new(id: LayerId, style: LayerStyle, features: Vec<Feature>) -> Self {
        Self {
            id,
            style,
            features,
        }
    }

    pub fn features(&self) -> &[Feature] {
        &self.features
    }

    pub fn len(&self) -> usize {
        self.features.len()
    }

    pub fn is_empty(&self) -> bool {
        self.features.is_empty()
    }

    pub fn extent(&self) -> Extent {
        self.features
            .iter()
            .fold(Extent::empty(), |acc, f| acc.union(&f.extent()))
    }

    pub fn snapshot(&self) -> VectorLayerSnapshot {
        let mut out = VectorLayerSnapshot::default();
        for feature in &self.features {
            match &feature.geometry {
                FeatureGeometry::Point(p) => out.points.push(*p),
                FeatureGeometry::MultiPoint(ps) => out.points.extend_from_slice(ps),
                FeatureGeometry::Line(line) => out.lines.push(line.clone()),
                FeatureGeometry::MultiLine(lines) => out.lines.extend_from_slice(lines),
                FeatureGeometry::Area(rings) => out.push_area(rings),
                FeatureGeometry::MultiArea(polys) => {
                    polys.iter().for_each(|rings| out.push_area(rings))
                }
            }
        }
        out
    }
}

/// Ring vertices without the repeated closing vertex.
fn open_ring(ring: &[[f64; 2]]) -> &[[f64; 2]] {
    match ring {
        [first, .., last] if first == last => &ring[..ring.len() - 1],
        _ => ring,
    }
}

/// Earcut fill of one polygon: outer ring first, then holes. Holes with fewer
/// than three vertices are skipped; a degenerate outer ring fills nothing.
fn fill_triangles(rings: &[Vec<[f64; 2]>]) -> Vec<[f64; 2]> {
    let mut vertices: Vec<[f64; 2]> = Vec::new();
    let mut hole_starts: Vec<usize> = Vec::new();

    for (i, ring) in rings.iter().map(|r| open_ring(r)).enumerate() {
        if ring.len() < 3 {
            if i == 0 {
                return Vec::new();
            }
            continue;
        }
        if i > 0 {
            hole_starts.push(vertices.len());
        }
        vertices.extend_from_slice(ring);
    }
    if vertices.is_empty() {
        return Vec::new();
    }

    let flat: Vec<f64> = vertices.iter().flatten().copied().collect();
    match earcut(&flat, &hole_starts, 2) {
        Ok(indices) => indices
            .into_iter()
            .filter_map(|i| vertices.get(i).copied())
            .collect(),
        Err(_) => {
            warn!(vertices = vertices.len(), "couldn't triangulate area");
            Vec::new()
        }
    }
}

impl Layer for VectorLayer {
    fn id(&self) -> LayerId {
        self.id
    }

    fn z_index(&self) -> i32 {
        self.style.z_index
    }
}
