use foundation::LonLat;
use serde::{Deserialize, Serialize};

/// A flood-event location as exchanged with the backend: `{"lat": .., "lng": ..}`.
#[derive(Debug, Copy, Clone, PartialEq, Serialize, Deserialize)]
pub struct Coordinate {
    /// Latitude in degrees.
    pub lat: f64,
    /// Longitude in degrees.
    pub lng: f64,
}

#[derive(Debug, Copy, Clone, PartialEq)]
pub enum CoordinateError {
    NotFinite,
    LatitudeOutOfRange(f64),
    LongitudeOutOfRange(f64),
}

impl std::fmt::Display for CoordinateError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CoordinateError::NotFinite => write!(f, "coordinate must be finite"),
            CoordinateError::LatitudeOutOfRange(lat) => {
                write!(f, "latitude {lat} outside [-90, 90]")
            }
            CoordinateError::LongitudeOutOfRange(lng) => {
                write!(f, "longitude {lng} outside [-180, 180]")
            }
        }
    }
}

impl std::error::Error for CoordinateError {}

impl Coordinate {
    pub fn new(lat: f64, lng: f64) -> Self {
        Self { lat, lng }
    }

    pub fn lon_lat(&self) -> LonLat {
        LonLat::new(self.lng, self.lat)
    }

    pub fn validate(&self) -> Result<(), CoordinateError> {
        if !self.lat.is_finite() || !self.lng.is_finite() {
            return Err(CoordinateError::NotFinite);
        }
        if !(-90.0..=90.0).contains(&self.lat) {
            return Err(CoordinateError::LatitudeOutOfRange(self.lat));
        }
        if !(-180.0..=180.0).contains(&self.lng) {
            return Err(CoordinateError::LongitudeOutOfRange(self.lng));
        }
        Ok(())
    }
}

impl From<LonLat> for Coordinate {
    fn from(p: LonLat) -> Self {
        Self::new(p.lat_deg, p.lon_deg)
    }
}

#[cfg(test)]
mod tests {
    use super::{Coordinate, CoordinateError};
    use foundation::LonLat;
    use serde_json::json;

    #[test]
    fn wire_shape_is_lat_lng() {
        let c = Coordinate::new(5.6, -0.2);
        assert_eq!(serde_json::to_value(c).unwrap(), json!({"lat": 5.6, "lng": -0.2}));
        let back: Coordinate = serde_json::from_value(json!({"lat": 5.6, "lng": -0.2})).unwrap();
        assert_eq!(back, c);
    }

    #[test]
    fn lon_lat_swaps_axis_order() {
        let c = Coordinate::from(LonLat::new(-0.2, 5.6));
        assert_eq!(c, Coordinate::new(5.6, -0.2));
        assert_eq!(c.lon_lat(), LonLat::new(-0.2, 5.6));
    }

    #[test]
    fn validate_rejects_out_of_range() {
        assert_eq!(Coordinate::new(5.6, -0.2).validate(), Ok(()));
        assert_eq!(
            Coordinate::new(95.0, 0.0).validate(),
            Err(CoordinateError::LatitudeOutOfRange(95.0))
        );
        assert_eq!(
            Coordinate::new(0.0, -181.0).validate(),
            Err(CoordinateError::LongitudeOutOfRange(-181.0))
        );
        assert_eq!(
            Coordinate::new(f64::INFINITY, 0.0).validate(),
            Err(CoordinateError::NotFinite)
        );
    }
}
