use crate::core::geoscore::{score_conference_proximity, score_location};
use crate::models::{HotelRecord, ScoreBreakdown, ScoringWeights, SearchPreferences};

/// Neutral score for candidates with no usable price
const UNKNOWN_PRICE_SCORE: f64 = 50.0;

/// Floor score for any price inside the budget band
const WITHIN_BUDGET_FLOOR: f64 = 80.0;

/// Weight location fit carries when no conference venue was supplied and
/// the conference weight is dropped from the composite
const NO_CONFERENCE_LOCATION_WEIGHT: f64 = 0.25;

/// Score how well a nightly price fits the client's budget
///
/// Unknown or zero prices are neutral. Within the budget band the score
/// starts at 80 and rises toward 100 the closer the price sits to the band
/// midpoint. Below-minimum prices cap at 70; above a finite maximum the
/// score drops toward 0 with the percentage overrun.
pub fn calculate_price_match(price: Option<f64>, preferences: &SearchPreferences) -> f64 {
    let price = match price {
        Some(p) if p > 0.0 => p,
        _ => return UNKNOWN_PRICE_SCORE,
    };

    let min = preferences.budget_min;

    if let Some(max) = preferences.budget_max {
        if price > max {
            if max <= 0.0 {
                return 0.0;
            }
            let percent_over = (price - max) / max * 100.0;
            return (50.0 - 0.5 * percent_over).max(0.0);
        }
    }

    if price < min {
        // min > price >= 0, so min is positive here
        let percent_below = (min - price) / min * 100.0;
        return (50.0 + 0.2 * percent_below).min(70.0);
    }

    match preferences.budget_max {
        Some(max) => {
            let half_band = (max - min) / 2.0;
            if half_band <= 0.0 {
                return 100.0;
            }
            let midpoint = (min + max) / 2.0;
            let closeness = 1.0 - ((price - midpoint).abs() / half_band).min(1.0);
            WITHIN_BUDGET_FLOOR + 20.0 * closeness
        }
        // No midpoint without an upper bound; any affordable price gets the floor
        None => WITHIN_BUDGET_FLOOR,
    }
}

/// Fraction of required amenities the hotel covers, as a 0-100 score
pub fn calculate_amenities_match(hotel_amenities: &[String], required: &[String]) -> f64 {
    let required: Vec<String> = required
        .iter()
        .map(|a| a.trim().to_lowercase())
        .filter(|a| !a.is_empty())
        .collect();

    if required.is_empty() {
        return 100.0;
    }

    let available: Vec<String> = hotel_amenities
        .iter()
        .map(|a| a.trim().to_lowercase())
        .collect();

    let matched = required
        .iter()
        .filter(|req| available.iter().any(|have| have == *req || have.contains(req.as_str())))
        .count();

    matched as f64 / required.len() as f64 * 100.0
}

/// Whether the hotel's star rating is within one star of the preference
#[inline]
pub fn star_rating_matches(hotel_stars: u8, preferred_stars: u8) -> bool {
    (hotel_stars as i16 - preferred_stars as i16).abs() <= 1
}

/// Score one candidate against the client preferences
///
/// Scoring is total: any record with an identifier and a name scores, with
/// missing data mapped to the documented neutral values. When no conference
/// venue was supplied the conference weight contributes nothing and location
/// fit is weighted at 0.25 instead.
pub fn score_hotel(
    hotel: &HotelRecord,
    preferences: &SearchPreferences,
    weights: &ScoringWeights,
) -> ScoreBreakdown {
    let price_match = calculate_price_match(hotel.best_price(), preferences);
    let amenities_match =
        calculate_amenities_match(&hotel.amenities, &preferences.required_amenities);
    let star_rating_match =
        star_rating_matches(hotel.star_rating, preferences.preferred_star_rating);
    let location_match = score_location(hotel, preferences);
    let conference_proximity = score_conference_proximity(hotel, preferences);

    let (location_weight, conference_weight) = if preferences.conference_venue.is_some() {
        (weights.location, weights.conference)
    } else {
        (NO_CONFERENCE_LOCATION_WEIGHT, 0.0)
    };

    let star_component = if star_rating_match { 100.0 } else { 50.0 };

    let composite = price_match * weights.price
        + amenities_match * weights.amenities
        + star_component * weights.star_rating
        + location_match.score * location_weight
        + conference_proximity.score * conference_weight;

    ScoreBreakdown {
        price_match,
        amenities_match,
        star_rating_match,
        location_match,
        conference_proximity,
        relevance_score: round_two_decimals(composite.clamp(0.0, 100.0)),
    }
}

#[inline]
fn round_two_decimals(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}
