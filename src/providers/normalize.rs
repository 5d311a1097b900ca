use crate::models::GeoPoint;
use serde_json::Value;

/// Pull the record list out of whatever top-level shape a provider uses:
/// a bare array, an array under `results`/`data`/`hotels`, an
/// object-of-objects under one of those keys, or a bare object-of-objects.
pub fn extract_records(payload: &Value) -> Vec<Value> {
    if let Some(records) = payload.as_array() {
        return records.clone();
    }

    let object = match payload.as_object() {
        Some(o) => o,
        None => return Vec::new(),
    };

    for key in ["results", "data", "hotels"] {
        match object.get(key) {
            Some(Value::Array(records)) => return records.clone(),
            Some(Value::Object(map)) if map.values().all(Value::is_object) => {
                return map.values().cloned().collect()
            }
            _ => {}
        }
    }

    if !object.is_empty() && object.values().all(Value::is_object) {
        return object.values().cloned().collect();
    }

    Vec::new()
}

/// Resolve a dotted path like `coordinates.latitude` inside a record
fn lookup<'a>(record: &'a Value, path: &str) -> Option<&'a Value> {
    path.split('.').try_fold(record, |value, segment| value.get(segment))
}

/// First present string value among the given field aliases
pub fn string_field(record: &Value, keys: &[&str]) -> Option<String> {
    keys.iter().find_map(|key| {
        let value = lookup(record, key)?;
        match value {
            Value::String(s) if !s.trim().is_empty() => Some(s.trim().to_string()),
            Value::Number(n) => Some(n.to_string()),
            _ => None,
        }
    })
}

/// First present numeric value among the given field aliases; numeric
/// strings are accepted since providers disagree on typing
pub fn f64_field(record: &Value, keys: &[&str]) -> Option<f64> {
    keys.iter().find_map(|key| value_as_f64(lookup(record, key)?))
}

/// First present boolean value among the given field aliases
pub fn bool_field(record: &Value, keys: &[&str]) -> Option<bool> {
    keys.iter().find_map(|key| lookup(record, key)?.as_bool())
}

/// First present string array among the given field aliases; non-string
/// entries are skipped
pub fn string_list(record: &Value, keys: &[&str]) -> Vec<String> {
    keys.iter()
        .find_map(|key| lookup(record, key)?.as_array().cloned())
        .map(|values| {
            values
                .iter()
                .filter_map(|v| v.as_str())
                .map(str::to_string)
                .collect()
        })
        .unwrap_or_default()
}

/// Star rating clamped to 0-5; 0 means unrated
pub fn star_field(record: &Value, keys: &[&str]) -> u8 {
    f64_field(record, keys)
        .map(|stars| stars.round().clamp(0.0, 5.0) as u8)
        .unwrap_or(0)
}

/// Coordinates under any of the common layouts: flat `lat`/`lng`, flat
/// `latitude`/`longitude`, a nested `coordinates` object, or a
/// `position` array of `[lat, lon]`
pub fn geo_point(record: &Value) -> Option<GeoPoint> {
    const PAIRS: [(&str, &str); 3] = [
        ("lat", "lng"),
        ("latitude", "longitude"),
        ("coordinates.latitude", "coordinates.longitude"),
    ];

    for (lat_key, lon_key) in PAIRS {
        if let (Some(latitude), Some(longitude)) =
            (f64_field(record, &[lat_key]), f64_field(record, &[lon_key]))
        {
            return valid_point(latitude, longitude);
        }
    }

    if let Some(position) = record.get("position").and_then(Value::as_array) {
        if position.len() == 2 {
            if let (Some(latitude), Some(longitude)) =
                (value_as_f64(&position[0]), value_as_f64(&position[1]))
            {
                return valid_point(latitude, longitude);
            }
        }
    }

    None
}

fn valid_point(latitude: f64, longitude: f64) -> Option<GeoPoint> {
    if latitude.is_finite()
        && longitude.is_finite()
        && latitude.abs() <= 90.0
        && longitude.abs() <= 180.0
    {
        Some(GeoPoint {
            latitude,
            longitude,
        })
    } else {
        None
    }
}

fn value_as_f64(value: &Value) -> Option<f64> {
    match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_extract_from_bare_array() {
        let payload = json!([{"name": "A"}, {"name": "B"}]);
        assert_eq!(extract_records(&payload).len(), 2);
    }

    #[test]
    fn test_extract_from_results_key() {
        let payload = json!({"total": 2, "results": [{"name": "A"}, {"name": "B"}]});
        assert_eq!(extract_records(&payload).len(), 2);
    }

    #[test]
    fn test_extract_from_data_and_hotels_keys() {
        assert_eq!(extract_records(&json!({"data": [{"a": 1}]})).len(), 1);
        assert_eq!(extract_records(&json!({"hotels": [{"a": 1}]})).len(), 1);
    }

    #[test]
    fn test_extract_from_object_of_objects() {
        let payload = json!({
            "h1": {"name": "A"},
            "h2": {"name": "B"},
            "h3": {"name": "C"}
        });
        assert_eq!(extract_records(&payload).len(), 3);
    }

    #[test]
    fn test_extract_from_keyed_object_of_objects() {
        let payload = json!({"hotels": {"h1": {"name": "A"}, "h2": {"name": "B"}}});
        assert_eq!(extract_records(&payload).len(), 2);
    }

    #[test]
    fn test_extract_unknown_shape_is_empty() {
        assert!(extract_records(&json!("nope")).is_empty());
        assert!(extract_records(&json!({"count": 3})).is_empty());
    }

    #[test]
    fn test_string_field_aliases_and_numbers() {
        let record = json!({"hotelName": "Grand", "id": 42});
        assert_eq!(
            string_field(&record, &["name", "hotelName"]),
            Some("Grand".to_string())
        );
        assert_eq!(string_field(&record, &["id"]), Some("42".to_string()));
        assert_eq!(string_field(&record, &["missing"]), None);
    }

    #[test]
    fn test_f64_field_accepts_numeric_strings() {
        let record = json!({"price": "12500.5", "basePrice": 9000});
        assert_eq!(f64_field(&record, &["price"]), Some(12500.5));
        assert_eq!(f64_field(&record, &["basePrice"]), Some(9000.0));
    }

    #[test]
    fn test_f64_field_dotted_path() {
        let record = json!({"pricing": {"amount": 8000}});
        assert_eq!(f64_field(&record, &["pricing.amount"]), Some(8000.0));
    }

    #[test]
    fn test_geo_point_layouts() {
        let flat = json!({"lat": 35.6, "lng": 139.7});
        let named = json!({"latitude": 35.6, "longitude": 139.7});
        let nested = json!({"coordinates": {"latitude": 35.6, "longitude": 139.7}});
        let positional = json!({"position": [35.6, 139.7]});

        for record in [flat, named, nested, positional] {
            let point = geo_point(&record).unwrap();
            assert!((point.latitude - 35.6).abs() < 1e-9);
            assert!((point.longitude - 139.7).abs() < 1e-9);
        }
    }

    #[test]
    fn test_geo_point_rejects_out_of_range() {
        assert!(geo_point(&json!({"lat": 135.6, "lng": 139.7})).is_none());
        assert!(geo_point(&json!({"name": "no coords"})).is_none());
    }

    #[test]
    fn test_star_field_rounds_and_clamps() {
        assert_eq!(star_field(&json!({"stars": 4.6}), &["stars"]), 5);
        assert_eq!(star_field(&json!({"stars": 9}), &["stars"]), 5);
        assert_eq!(star_field(&json!({}), &["stars"]), 0);
    }

    #[test]
    fn test_string_list_skips_non_strings() {
        let record = json!({"amenities": ["WiFi", 3, "Pool"]});
        assert_eq!(
            string_list(&record, &["amenities"]),
            vec!["WiFi".to_string(), "Pool".to_string()]
        );
    }
}
