use crate::models::GeoPoint;

/// Earth's radius in kilometers
const EARTH_RADIUS_KM: f64 = 6371.0;

/// Calculate the Haversine distance between two points in kilometers
///
/// # Arguments
/// * `lat1` - Latitude of first point in degrees
/// * `lon1` - Longitude of first point in degrees
/// * `lat2` - Latitude of second point in degrees
/// * `lon2` - Longitude of second point in degrees
///
/// # Returns
/// Distance in kilometers
#[inline]
pub fn haversine_distance(lat1: f64, lon1: f64, lat2: f64, lon2: f64) -> f64 {
    let lat1_rad = lat1.to_radians();
    let lat2_rad = lat2.to_radians();
    let delta_lat = (lat2 - lat1).to_radians();
    let delta_lon = (lon2 - lon1).to_radians();

    let a = (delta_lat / 2.0).sin().powi(2)
        + lat1_rad.cos() * lat2_rad.cos() * (delta_lon / 2.0).sin().powi(2);
    let c = 2.0 * a.sqrt().atan2((1.0 - a).sqrt());

    EARTH_RADIUS_KM * c
}

/// Haversine distance between two [`GeoPoint`]s
#[inline]
pub fn distance_between(a: GeoPoint, b: GeoPoint) -> f64 {
    haversine_distance(a.latitude, a.longitude, b.latitude, b.longitude)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_haversine_distance_zero() {
        let distance = haversine_distance(35.6762, 139.6503, 35.6762, 139.6503);
        assert!(distance < 0.01);
    }

    #[test]
    fn test_haversine_one_degree_longitude_at_equator() {
        // One degree of longitude at the equator is ~111.2 km
        let distance = haversine_distance(0.0, 0.0, 0.0, 1.0);
        assert!(
            (distance - 111.2).abs() < 1.0,
            "Distance should be ~111.2km, got {}",
            distance
        );
    }

    #[test]
    fn test_haversine_london_to_paris() {
        // Distance from London to Paris (approximately 344 km)
        let distance = haversine_distance(51.5074, -0.1278, 48.8566, 2.3522);
        assert!(
            (distance - 344.0).abs() < 10.0,
            "Distance should be ~344km, got {}",
            distance
        );
    }

    #[test]
    fn test_distance_between_points() {
        let a = GeoPoint {
            latitude: 35.6896,
            longitude: 139.7006,
        };
        let b = GeoPoint {
            latitude: 35.6812,
            longitude: 139.7671,
        };

        // Shinjuku to Tokyo Station is roughly 6 km
        let distance = distance_between(a, b);
        assert!(distance > 4.0 && distance < 9.0);
    }
}
