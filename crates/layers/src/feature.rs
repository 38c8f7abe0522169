use foundation::{Extent, LonLat, lon_lat_to_web_mercator};
use formats::{Coordinate, VectorGeometry};
use tracing::warn;

/// Geometry in projected (EPSG:3857) metres, ready to draw.
#[derive(Debug, Clone, PartialEq)]
pub enum FeatureGeometry {
    Point([f64; 2]),
    MultiPoint(Vec<[f64; 2]>),
    Line(Vec<[f64; 2]>),
    MultiLine(Vec<Vec<[f64; 2]>>),
    /// Outer ring first, then holes.
    Area(Vec<Vec<[f64; 2]>>),
    MultiArea(Vec<Vec<Vec<[f64; 2]>>>),
}

#[derive(Debug, Clone, PartialEq)]
pub struct Feature {
    pub name: Option<String>,
    pub geometry: FeatureGeometry,
}

impl Feature {
    /// Reprojects a wire geometry into a drawable feature.
    ///
    /// Returns `None` when the geometry has no vertices to draw.
    pub fn from_geometry(geometry: &VectorGeometry) -> Option<Feature> {
        if geometry.vertex_count() == 0 {
            warn!(kind = geometry.kind(), "couldn't convert geometry without vertices");
            return None;
        }

        let geometry = match geometry {
            VectorGeometry::Point(p) => FeatureGeometry::Point(project(*p)),
            VectorGeometry::MultiPoint(ps) => FeatureGeometry::MultiPoint(project_all(ps)),
            VectorGeometry::LineString(ps) => FeatureGeometry::Line(project_all(ps)),
            VectorGeometry::MultiLineString(lines) => {
                FeatureGeometry::MultiLine(lines.iter().map(|l| project_all(l)).collect())
            }
            VectorGeometry::Polygon(rings) => FeatureGeometry::Area(project_rings(rings)),
            VectorGeometry::MultiPolygon(polys) => {
                FeatureGeometry::MultiArea(polys.iter().map(|p| project_rings(p)).collect())
            }
        };

        Some(Feature {
            name: None,
            geometry,
        })
    }

    pub fn point(coordinate: Coordinate) -> Feature {
        Feature {
            name: None,
            geometry: FeatureGeometry::Point(project(coordinate.lon_lat())),
        }
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn extent(&self) -> Extent {
        let mut e = Extent::empty();
        match &self.geometry {
            FeatureGeometry::Point(p) => e.extend(*p),
            FeatureGeometry::MultiPoint(ps) | FeatureGeometry::Line(ps) => {
                ps.iter().for_each(|p| e.extend(*p))
            }
            FeatureGeometry::MultiLine(parts) | FeatureGeometry::Area(parts) => {
                parts.iter().flatten().for_each(|p| e.extend(*p))
            }
            FeatureGeometry::MultiArea(polys) => {
                polys.iter().flatten().flatten().for_each(|p| e.extend(*p))
            }
        }
        e
    }
}

fn project(p: LonLat) -> [f64; 2] {
    lon_lat_to_web_mercator(p)
}

fn project_all(ps: &[LonLat]) -> Vec<[f64; 2]> {
    ps.iter().copied().map(project).collect()
}

fn project_rings(rings: &[Vec<LonLat>]) -> Vec<Vec<[f64; 2]>> {
    rings.iter().map(|ring| project_all(ring)).collect()
}
