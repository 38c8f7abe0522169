use serde::{Deserialize, Serialize};

use crate::geometry::VectorGeometry;

/// A named boundary: the whole country or one of its regions.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NamedGeometry {
    pub name: String,
    pub geometry: VectorGeometry,
}

/// Country outline plus per-region outlines, in the order the backend lists them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CountryGeometry {
    pub country: NamedGeometry,
    pub regions: Vec<NamedGeometry>,
}

#[derive(Debug)]
pub enum GeometryError {
    Parse(serde_json::Error),
}

impl std::fmt::Display for GeometryError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            GeometryError::Parse(e) => write!(f, "invalid country geometry: {e}"),
        }
    }
}

impl std::error::Error for GeometryError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            GeometryError::Parse(e) => Some(e),
        }
    }
}

impl CountryGeometry {
    pub fn from_json_str(payload: &str) -> Result<Self, GeometryError> {
        serde_json::from_str(payload).map_err(GeometryError::Parse)
    }

    /// Exact, case-sensitive lookup by region name.
    pub fn region(&self, name: &str) -> Option<&NamedGeometry> {
        self.regions.iter().find(|region| region.name == name)
    }

    pub fn region_names(&self) -> Vec<String> {
        self.regions.iter().map(|region| region.name.clone()).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::CountryGeometry;
    use foundation::LonLat;
    use pretty_assertions::assert_eq;

    const SAMPLE: &str = r#"{
        "country": {"name": "Ghana", "geometry": {"type": "Polygon", "coordinates": [[[0,0],[10,0],[10,10],[0,10],[0,0]]]}},
        "regions": [
            {"name": "A Region", "geometry": {"type": "Polygon", "coordinates": [[[0,0],[5,0],[5,10],[0,10],[0,0]]]}},
            {"name": "S Region", "geometry": {"type": "MultiPolygon", "coordinates": [[[[5,0],[10,0],[10,10],[5,10],[5,0]]]]}}
        ]
    }"#;

    #[test]
    fn looks_up_regions_by_exact_name() {
        let geom = CountryGeometry::from_json_str(SAMPLE).expect("parse");
        assert_eq!(geom.country.name, "Ghana");
        assert_eq!(geom.region_names(), vec!["A Region", "S Region"]);
        assert!(geom.region("S Region").is_some());
        assert!(geom.region("s region").is_none());
        assert!(geom.region("D Region").is_none());
    }

    #[test]
    fn multipolygon_region_contains_its_interior() {
        let geom = CountryGeometry::from_json_str(SAMPLE).expect("parse");
        let s_region = geom.region("S Region").expect("S Region");
        assert!(s_region.geometry.contains(LonLat::new(7.0, 3.0)));
        assert!(!s_region.geometry.contains(LonLat::new(2.0, 3.0)));
        assert!(!s_region.geometry.contains(LonLat::new(20.0, 3.0)));
    }

    #[test]
    fn rejects_malformed_geometry() {
        let err = CountryGeometry::from_json_str(
            r#"{"country": {"name": "Ghana", "geometry": {"type": "Blob", "coordinates": []}}, "regions": []}"#,
        )
        .unwrap_err();
        assert!(err.to_string().contains("unsupported geometry type: Blob"));
    }

    #[test]
    fn parses_bundled_server_geometry() {
        let payload = include_str!("../../apps/server/assets/ghana_geometry.json");
        let geom = CountryGeometry::from_json_str(payload).expect("parse bundled geometry");
        assert!(!geom.regions.is_empty());
        let accra = LonLat::new(-0.2, 5.6);
        assert!(geom.country.geometry.contains(accra));
        let holding: Vec<&str> = geom
            .regions
            .iter()
            .filter(|r| r.geometry.contains(accra))
            .map(|r| r.name.as_str())
            .collect();
        assert_eq!(holding, vec!["Greater Accra"]);
    }
}
