use foundation::{Extent, LonLat};
use geo::{Contains, Coord, LineString, MultiPolygon as GeoMultiPolygon, Point, Polygon as GeoPolygon};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::{Map, Value};

/// A GeoJSON geometry in EPSG:4326 degrees.
#[derive(Debug, Clone, PartialEq)]
pub enum VectorGeometry {
    Point(LonLat),
    MultiPoint(Vec<LonLat>),
    LineString(Vec<LonLat>),
    MultiLineString(Vec<Vec<LonLat>>),
    Polygon(Vec<Vec<LonLat>>),
    MultiPolygon(Vec<Vec<Vec<LonLat>>>),
}

impl VectorGeometry {
    pub fn from_geojson_value(value: &Value) -> Result<Self, String> {
        parse_geometry(value)
    }

    pub fn to_geojson_value(&self) -> Value {
        geometry_to_geojson_value(self)
    }

    pub fn kind(&self) -> &'static str {
        match self {
            VectorGeometry::Point(_) => "Point",
            VectorGeometry::MultiPoint(_) => "MultiPoint",
            VectorGeometry::LineString(_) => "LineString",
            VectorGeometry::MultiLineString(_) => "MultiLineString",
            VectorGeometry::Polygon(_) => "Polygon",
            VectorGeometry::MultiPolygon(_) => "MultiPolygon",
        }
    }

    /// Visits every vertex in document order.
    pub fn for_each_vertex(&self, mut f: impl FnMut(LonLat)) {
        match self {
            VectorGeometry::Point(p) => f(*p),
            VectorGeometry::MultiPoint(ps) | VectorGeometry::LineString(ps) => {
                ps.iter().copied().for_each(f)
            }
            VectorGeometry::MultiLineString(parts) | VectorGeometry::Polygon(parts) => {
                parts.iter().flatten().copied().for_each(f)
            }
            VectorGeometry::MultiPolygon(polys) => {
                polys.iter().flatten().flatten().copied().for_each(f)
            }
        }
    }

    pub fn vertex_count(&self) -> usize {
        let mut n = 0;
        self.for_each_vertex(|_| n += 1);
        n
    }

    /// Lon/lat bounds of all vertices; empty for a geometry with no vertices.
    pub fn extent(&self) -> Extent {
        let mut e = Extent::empty();
        self.for_each_vertex(|p| e.extend(p.as_array()));
        e
    }

    /// Area containment in lon/lat space: inside an outer ring and outside its
    /// holes. Points on a boundary are not contained. Only polygonal
    /// geometries contain anything.
    pub fn contains(&self, point: LonLat) -> bool {
        let point = Point::new(point.lon_deg, point.lat_deg);
        match self {
            VectorGeometry::Polygon(rings) => {
                to_geo_polygon(rings).is_some_and(|polygon| polygon.contains(&point))
            }
            VectorGeometry::MultiPolygon(polys) => {
                GeoMultiPolygon::new(polys.iter().filter_map(|rings| to_geo_polygon(rings)).collect())
                    .contains(&point)
            }
            _ => false,
        }
    }
}

fn to_geo_polygon(rings: &[Vec<LonLat>]) -> Option<GeoPolygon<f64>> {
    let (outer, holes) = rings.split_first()?;
    if outer.len() < 3 {
        return None;
    }
    Some(GeoPolygon::new(
        to_line_string(outer),
        holes.iter().map(|hole| to_line_string(hole)).collect(),
    ))
}

fn to_line_string(ring: &[LonLat]) -> LineString<f64> {
    ring.iter()
        .map(|p| Coord {
            x: p.lon_deg,
            y: p.lat_deg,
        })
        .collect()
}

impl Serialize for VectorGeometry {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.to_geojson_value().serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for VectorGeometry {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let value = Value::deserialize(deserializer)?;
        parse_geometry(&value).map_err(serde::de::Error::custom)
    }
}

fn geometry_to_geojson_value(geom: &VectorGeometry) -> Value {
    let coords = match geom {
        VectorGeometry::Point(p) => point_coords(p),
        VectorGeometry::MultiPoint(ps) | VectorGeometry::LineString(ps) => points_coords(ps),
        VectorGeometry::MultiLineString(parts) | VectorGeometry::Polygon(parts) => {
            Value::Array(parts.iter().map(|ring| points_coords(ring)).collect())
        }
        VectorGeometry::MultiPolygon(polys) => Value::Array(
            polys
                .iter()
                .map(|poly| Value::Array(poly.iter().map(|ring| points_coords(ring)).collect()))
                .collect(),
        ),
    };

    let mut obj = Map::new();
    obj.insert("type".to_string(), Value::String(geom.kind().to_string()));
    obj.insert("coordinates".to_string(), coords);
    Value::Object(obj)
}

fn point_coords(p: &LonLat) -> Value {
    Value::Array(vec![Value::from(p.lon_deg), Value::from(p.lat_deg)])
}

fn points_coords(ps: &[LonLat]) -> Value {
    Value::Array(ps.iter().map(point_coords).collect())
}

fn parse_geometry(value: &Value) -> Result<VectorGeometry, String> {
    let obj = value
        .as_object()
        .ok_or("geometry must be an object".to_string())?;
    let ty = obj
        .get("type")
        .and_then(|v| v.as_str())
        .ok_or("geometry missing type".to_string())?;

    let coords = obj
        .get("coordinates")
        .ok_or("geometry missing coordinates".to_string())?;

    match ty {
        "Point" => Ok(VectorGeometry::Point(parse_point(coords)?)),
        "MultiPoint" => Ok(VectorGeometry::MultiPoint(parse_points(coords)?)),
        "LineString" => Ok(VectorGeometry::LineString(parse_points(coords)?)),
        "MultiLineString" => Ok(VectorGeometry::MultiLineString(parse_lines(coords)?)),
        "Polygon" => Ok(VectorGeometry::Polygon(parse_polygon(coords)?)),
        "MultiPolygon" => Ok(VectorGeometry::MultiPolygon(parse_multi_polygon(coords)?)),
        other => Err(format!("unsupported geometry type: {other}")),
    }
}

fn parse_point(coords: &Value) -> Result<LonLat, String> {
    let arr = coords
        .as_array()
        .ok_or("Point coordinates must be an array".to_string())?;
    if arr.len() < 2 {
        return Err("Point coordinates must have [lon, lat]".to_string());
    }
    let lon = arr[0]
        .as_f64()
        .ok_or("Point lon must be a number".to_string())?;
    let lat = arr[1]
        .as_f64()
        .ok_or("Point lat must be a number".to_string())?;
    Ok(LonLat::new(lon, lat))
}

fn parse_points(coords: &Value) -> Result<Vec<LonLat>, String> {
    let arr = coords
        .as_array()
        .ok_or("coordinates must be an array".to_string())?;
    let mut out = Vec::with_capacity(arr.len());
    for item in arr {
        out.push(parse_point(item)?);
    }
    Ok(out)
}

fn parse_lines(coords: &Value) -> Result<Vec<Vec<LonLat>>, String> {
    let arr = coords
        .as_array()
        .ok_or("MultiLineString coordinates must be an array".to_string())?;
    let mut out = Vec::with_capacity(arr.len());
    for line in arr {
        out.push(parse_points(line)?);
    }
    Ok(out)
}

fn parse_polygon(coords: &Value) -> Result<Vec<Vec<LonLat>>, String> {
    let rings = coords
        .as_array()
        .ok_or("Polygon coordinates must be an array of rings".to_string())?;
    let mut out = Vec::with_capacity(rings.len());
    for ring in rings {
        out.push(parse_points(ring)?);
    }
    Ok(out)
}

fn parse_multi_polygon(coords: &Value) -> Result<Vec<Vec<Vec<LonLat>>>, String> {
    let polys = coords
        .as_array()
        .ok_or("MultiPolygon coordinates must be an array of polygons".to_string())?;
    let mut out = Vec::with_capacity(polys.len());
    for poly in polys {
        out.push(parse_polygon(poly)?);
    }
    Ok(out)
}
