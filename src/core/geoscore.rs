use crate::core::distance::distance_between;
use crate::models::{ConferenceProximity, HotelRecord, LocationMatch, SearchPreferences};

/// Neutral score for hotels whose location cannot be assessed
const UNKNOWN_LOCATION_SCORE: f64 = 50.0;

/// Estimated distances for the textual area-matching heuristic. Target areas
/// are free-text and not geocoded here; a geocoding collaborator can replace
/// this module's heuristic without changing the contract.
const EXACT_MATCH_KM: f64 = 0.0;
const PARTIAL_MATCH_KM: f64 = 5.0;
const NO_MATCH_KM: f64 = 20.0;

/// Maximum linear penalty applied within the conference radius
const WITHIN_RADIUS_PENALTY: f64 = 30.0;

/// Score how well a hotel's location fits the requested target areas
///
/// Hotels without coordinates score a neutral 50. Otherwise the hotel city is
/// matched textually against each target area: exact or substring match wins,
/// then shared-token overlap, then no overlap.
pub fn score_location(hotel: &HotelRecord, preferences: &SearchPreferences) -> LocationMatch {
    if hotel.coordinates.is_none() {
        return LocationMatch {
            score: UNKNOWN_LOCATION_SCORE,
            distance_km: None,
        };
    }

    let city = match hotel.city.as_deref() {
        Some(c) if !c.trim().is_empty() => c.trim().to_lowercase(),
        // Coordinates without a city name: nothing to match areas against
        _ => {
            return LocationMatch {
                score: UNKNOWN_LOCATION_SCORE,
                distance_km: None,
            }
        }
    };

    let mut best = LocationMatch {
        score: 40.0,
        distance_km: Some(NO_MATCH_KM),
    };

    for area in &preferences.target_areas {
        let area = area.trim().to_lowercase();
        if area.is_empty() {
            continue;
        }

        if city == area || city.contains(&area) || area.contains(&city) {
            return LocationMatch {
                score: 100.0,
                distance_km: Some(EXACT_MATCH_KM),
            };
        }

        if shares_token(&city, &area) && best.score < 70.0 {
            best = LocationMatch {
                score: 70.0,
                distance_km: Some(PARTIAL_MATCH_KM),
            };
        }
    }

    best
}

/// Score a hotel's proximity to the conference venue
///
/// Without a venue (or venue coordinates) proximity is irrelevant and every
/// hotel scores 100. A hotel without coordinates cannot be placed and scores
/// 0. Otherwise the score falls linearly by up to 30 points inside the
/// radius, and beyond it by the excess-over-radius ratio down to 0.
pub fn score_conference_proximity(
    hotel: &HotelRecord,
    preferences: &SearchPreferences,
) -> ConferenceProximity {
    let venue_coords = preferences
        .conference_venue
        .as_ref()
        .and_then(|v| v.coordinates);

    let venue = match venue_coords {
        Some(v) => v,
        None => {
            return ConferenceProximity {
                score: 100.0,
                distance_km: None,
                within_radius: true,
            }
        }
    };

    let hotel_coords = match hotel.coordinates {
        Some(c) => c,
        None => {
            return ConferenceProximity {
                score: 0.0,
                distance_km: None,
                within_radius: false,
            }
        }
    };

    let max_km = preferences.max_conference_distance_km.max(f64::EPSILON);
    let distance = distance_between(hotel_coords, venue);
    let within_radius = distance <= max_km;

    let score = if within_radius {
        100.0 - WITHIN_RADIUS_PENALTY * (distance / max_km)
    } else {
        // Continuous with the within-radius curve at the boundary (70),
        // reaching 0 at twice the radius
        let excess_ratio = (distance - max_km) / max_km;
        ((100.0 - WITHIN_RADIUS_PENALTY) * (1.0 - excess_ratio)).max(0.0)
    };

    ConferenceProximity {
        score,
        distance_km: Some(distance),
        within_radius,
    }
}

/// Whether two lowercased strings share at least one whitespace token
fn shares_token(a: &str, b: &str) -> bool {
    a.split_whitespace()
        .any(|token| b.split_whitespace().any(|other| token == other))
}
