//! Spherical Web Mercator (EPSG:3857).
//!
//! Geometry travels on the wire in EPSG:4326 degrees; the map works in
//! projected metres. Only the display side ever sees projected values.

use super::{LonLat, WGS84_A};

/// Latitude limit of the square Web Mercator world.
pub const WEB_MERCATOR_MAX_LAT: f64 = 85.051_128_779_806_59;

/// Half the world width in projected metres.
pub const WEB_MERCATOR_HALF_EXTENT: f64 = std::f64::consts::PI * WGS84_A;

pub fn lon_lat_to_web_mercator(p: LonLat) -> [f64; 2] {
    let lat = p.lat_deg.clamp(-WEB_MERCATOR_MAX_LAT, WEB_MERCATOR_MAX_LAT);
    let x = WGS84_A * p.lon_deg.to_radians();
    let y = WGS84_A * (std::f64::consts::FRAC_PI_4 + lat.to_radians() / 2.0).tan().ln();
    [x, y]
}

/// Inverse projection. Longitude is wrapped into `[-180, 180)`, so points on a
/// repeated copy of the world map back onto the real one.
pub fn web_mercator_to_lon_lat(p: [f64; 2]) -> LonLat {
    let lon = wrap_lon((p[0] / WGS84_A).to_degrees());
    let lat = (2.0 * (p[1] / WGS84_A).exp().atan() - std::f64::consts::FRAC_PI_2).to_degrees();
    LonLat::new(lon, lat)
}

pub fn wrap_lon(lon_deg: f64) -> f64 {
    if (-180.0..180.0).contains(&lon_deg) {
        return lon_deg;
    }
    (lon_deg + 180.0).rem_euclid(360.0) - 180.0
}

#[cfg(test)]
mod tests {
    use super::{
        WEB_MERCATOR_HALF_EXTENT, WEB_MERCATOR_MAX_LAT, lon_lat_to_web_mercator,
        web_mercator_to_lon_lat, wrap_lon,
    };
    use crate::LonLat;

    fn assert_close(a: f64, b: f64, eps: f64) {
        let diff = (a - b).abs();
        assert!(diff <= eps, "expected {a} ~= {b} (diff {diff})");
    }

    #[test]
    fn origin_maps_to_origin() {
        let p = lon_lat_to_web_mercator(LonLat::new(0.0, 0.0));
        assert_close(p[0], 0.0, 1e-9);
        assert_close(p[1], 0.0, 1e-9);
    }

    #[test]
    fn antimeridian_and_max_lat_hit_world_edges() {
        let p = lon_lat_to_web_mercator(LonLat::new(180.0, WEB_MERCATOR_MAX_LAT));
        assert_close(p[0], WEB_MERCATOR_HALF_EXTENT, 1e-6);
        assert_close(p[1], WEB_MERCATOR_HALF_EXTENT, 1e-3);
    }

    #[test]
    fn latitude_is_clamped_near_poles() {
        let pole = lon_lat_to_web_mercator(LonLat::new(0.0, 90.0));
        let edge = lon_lat_to_web_mercator(LonLat::new(0.0, WEB_MERCATOR_MAX_LAT));
        assert_close(pole[1], edge[1], 1e-9);
    }

    #[test]
    fn accra_round_trip() {
        let accra = LonLat::new(-0.2, 5.6);
        let p = lon_lat_to_web_mercator(accra);
        // Known EPSG:3857 values for (−0.2, 5.6).
        assert_close(p[0], -22_263.898, 1e-3);
        assert_close(p[1], 624_384.044, 1e-2);
        let back = web_mercator_to_lon_lat(p);
        assert_close(back.lon_deg, accra.lon_deg, 1e-9);
        assert_close(back.lat_deg, accra.lat_deg, 1e-9);
    }

    #[test]
    fn inverse_wraps_longitude_onto_the_real_world() {
        let accra = lon_lat_to_web_mercator(LonLat::new(-0.2, 5.6));
        let one_world_east = [accra[0] + 2.0 * WEB_MERCATOR_HALF_EXTENT, accra[1]];
        let back = web_mercator_to_lon_lat(one_world_east);
        assert_close(back.lon_deg, -0.2, 1e-9);
        assert_close(back.lat_deg, 5.6, 1e-9);

        let two_worlds_west = [accra[0] - 4.0 * WEB_MERCATOR_HALF_EXTENT, accra[1]];
        assert_close(web_mercator_to_lon_lat(two_worlds_west).lon_deg, -0.2, 1e-9);
    }

    #[test]
    fn wrap_lon_keeps_valid_values() {
        assert_eq!(wrap_lon(-0.2), -0.2);
        assert_eq!(wrap_lon(-180.0), -180.0);
        assert_eq!(wrap_lon(180.0), -180.0);
        assert_close(wrap_lon(246.09375), -113.90625, 1e-9);
        assert_close(wrap_lon(-190.0), 170.0, 1e-9);
    }
}
