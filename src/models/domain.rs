use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use thiserror::Error;

/// Price anchor used when the client supplied no usable budget at all
/// (min of zero and no max), so fallback pricing and price scoring stay total
pub const FALLBACK_BUDGET_ANCHOR: f64 = 15000.0;

/// Errors raised by [`SearchPreferences::validate`] before the pipeline runs
#[derive(Debug, Error)]
pub enum PreferencesError {
    #[error("at least one target area is required")]
    NoTargetAreas,

    #[error("check-out date must be strictly after check-in date")]
    InvalidDateRange,

    #[error("invalid budget range: {0}")]
    InvalidBudget(String),

    #[error("preferred star rating must be between 1 and 5, got {0}")]
    InvalidStarRating(u8),
}

/// A point on the globe in decimal degrees
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GeoPoint {
    pub latitude: f64,
    pub longitude: f64,
}

/// Optional conference venue the client wants to stay close to
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConferenceVenue {
    pub name: String,
    #[serde(default)]
    pub coordinates: Option<GeoPoint>,
}

/// Client stay preferences driving one recommendation run
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchPreferences {
    #[serde(rename = "targetAreas")]
    pub target_areas: Vec<String>,
    pub country: String,
    #[serde(rename = "checkIn")]
    pub check_in: NaiveDate,
    #[serde(rename = "checkOut")]
    pub check_out: NaiveDate,
    #[serde(rename = "guestCount", default = "default_guest_count")]
    pub guest_count: u8,
    #[serde(rename = "budgetMin", default)]
    pub budget_min: f64,
    #[serde(rename = "budgetMax", default)]
    pub budget_max: Option<f64>,
    #[serde(rename = "preferredStarRating", default = "default_star_rating")]
    pub preferred_star_rating: u8,
    #[serde(rename = "requiredAmenities", default)]
    pub required_amenities: Vec<String>,
    #[serde(rename = "conferenceVenue", default)]
    pub conference_venue: Option<ConferenceVenue>,
    #[serde(
        rename = "maxConferenceDistanceKm",
        default = "default_conference_distance_km"
    )]
    pub max_conference_distance_km: f64,
}

fn default_guest_count() -> u8 {
    1
}

fn default_star_rating() -> u8 {
    3
}

fn default_conference_distance_km() -> f64 {
    10.0
}

impl SearchPreferences {
    /// Check request-level invariants; the pipeline must not run on failure
    pub fn validate(&self) -> Result<(), PreferencesError> {
        if self.target_areas.iter().all(|a| a.trim().is_empty()) {
            return Err(PreferencesError::NoTargetAreas);
        }

        if self.check_out <= self.check_in {
            return Err(PreferencesError::InvalidDateRange);
        }

        if self.budget_min < 0.0 {
            return Err(PreferencesError::InvalidBudget(format!(
                "minimum must be non-negative, got {}",
                self.budget_min
            )));
        }

        if let Some(max) = self.budget_max {
            if max < self.budget_min {
                return Err(PreferencesError::InvalidBudget(format!(
                    "maximum {} is below minimum {}",
                    max, self.budget_min
                )));
            }
        }

        if self.preferred_star_rating < 1 || self.preferred_star_rating > 5 {
            return Err(PreferencesError::InvalidStarRating(
                self.preferred_star_rating,
            ));
        }

        Ok(())
    }

    /// Midpoint of the budget band, used for within-budget price scoring and
    /// fallback pricing. An unbounded max anchors at twice the minimum.
    pub fn budget_midpoint(&self) -> f64 {
        match self.budget_max {
            Some(max) => (self.budget_min + max) / 2.0,
            None if self.budget_min > 0.0 => self.budget_min * 2.0,
            None => FALLBACK_BUDGET_ANCHOR,
        }
    }

    /// Primary target area (validation guarantees one non-blank entry)
    pub fn primary_area(&self) -> &str {
        self.target_areas
            .iter()
            .find(|a| !a.trim().is_empty())
            .map(String::as_str)
            .unwrap_or("")
    }
}

/// One provider's price and booking link for a hotel
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProviderOffer {
    pub provider: String,
    #[serde(rename = "bookingUrl")]
    pub booking_url: String,
    pub price: f64,
    pub currency: String,
    #[serde(rename = "instantBooking", default)]
    pub instant_booking: bool,
}

/// The canonical, provider-agnostic hotel record
///
/// Created by a provider adapter from raw source data, possibly merged with
/// other providers' views of the same hotel by the deduplicator, and never
/// mutated once scoring begins. Offers are keyed by provider identifier, so
/// each provider contributes at most one offer per hotel.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HotelRecord {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub address: Option<String>,
    #[serde(default)]
    pub city: Option<String>,
    #[serde(default)]
    pub country: Option<String>,
    #[serde(default)]
    pub coordinates: Option<GeoPoint>,
    #[serde(rename = "starRating", default)]
    pub star_rating: u8,
    #[serde(rename = "ratingScore", default)]
    pub rating_score: f64,
    #[serde(rename = "reviewCount", default)]
    pub review_count: u32,
    #[serde(default)]
    pub amenities: Vec<String>,
    #[serde(default)]
    pub images: Vec<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub offers: BTreeMap<String, ProviderOffer>,
}

impl HotelRecord {
    /// Cheapest priced offer across all providers
    pub fn best_offer(&self) -> Option<&ProviderOffer> {
        self.offers.values().filter(|o| o.price > 0.0).min_by(|a, b| {
            a.price
                .partial_cmp(&b.price)
                .unwrap_or(std::cmp::Ordering::Equal)
        })
    }

    pub fn best_price(&self) -> Option<f64> {
        self.best_offer().map(|o| o.price)
    }

    pub fn best_platform(&self) -> Option<&str> {
        self.best_offer().map(|o| o.provider.as_str())
    }
}

/// Parameters one adapter needs for a single search call
#[derive(Debug, Clone)]
pub struct ProviderQuery {
    pub area: String,
    pub country: String,
    pub check_in: NaiveDate,
    pub check_out: NaiveDate,
    pub guest_count: u8,
    pub budget_min: f64,
    pub budget_max: Option<f64>,
}

impl ProviderQuery {
    pub fn from_preferences(preferences: &SearchPreferences, area: &str) -> Self {
        Self {
            area: area.to_string(),
            country: preferences.country.clone(),
            check_in: preferences.check_in,
            check_out: preferences.check_out,
            guest_count: preferences.guest_count,
            budget_min: preferences.budget_min,
            budget_max: preferences.budget_max,
        }
    }
}

/// Location fit of one hotel against the requested target areas
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LocationMatch {
    pub score: f64,
    #[serde(rename = "distanceKm")]
    pub distance_km: Option<f64>,
}

/// Proximity of one hotel to the conference venue, if any
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConferenceProximity {
    pub score: f64,
    #[serde(rename = "distanceKm")]
    pub distance_km: Option<f64>,
    #[serde(rename = "withinRadius")]
    pub within_radius: bool,
}

/// Per-candidate score components plus the derived composite
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoreBreakdown {
    #[serde(rename = "priceMatch")]
    pub price_match: f64,
    #[serde(rename = "amenitiesMatch")]
    pub amenities_match: f64,
    #[serde(rename = "starRatingMatch")]
    pub star_rating_match: bool,
    #[serde(rename = "locationMatch")]
    pub location_match: LocationMatch,
    #[serde(rename = "conferenceProximity")]
    pub conference_proximity: ConferenceProximity,
    #[serde(rename = "relevanceScore")]
    pub relevance_score: f64,
}

/// One ranked hotel ready for presentation
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Recommendation {
    pub hotel: HotelRecord,
    pub breakdown: ScoreBreakdown,
    #[serde(rename = "bestPrice")]
    pub best_price: Option<f64>,
    #[serde(rename = "bestPlatform")]
    pub best_platform: Option<String>,
}

/// Ordered recommendation list plus run metadata
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RecommendationResult {
    pub recommendations: Vec<Recommendation>,
    #[serde(rename = "totalCandidates")]
    pub total_candidates: usize,
    #[serde(rename = "filteredCount")]
    pub filtered_count: usize,
    #[serde(rename = "generatedAt")]
    pub generated_at: DateTime<Utc>,
}

/// Composite score weights
#[derive(Debug, Clone, Copy)]
pub struct ScoringWeights {
    pub price: f64,
    pub amenities: f64,
    pub star_rating: f64,
    pub location: f64,
    pub conference: f64,
}

impl Default for ScoringWeights {
    fn default() -> Self {
        Self {
            price: 0.25,
            amenities: 0.25,
            star_rating: 0.15,
            location: 0.15,
            conference: 0.20,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn base_preferences() -> SearchPreferences {
        SearchPreferences {
            target_areas: vec!["Shinjuku".to_string()],
            country: "Japan".to_string(),
            check_in: NaiveDate::from_ymd_opt(2026, 9, 1).unwrap(),
            check_out: NaiveDate::from_ymd_opt(2026, 9, 4).unwrap(),
            guest_count: 1,
            budget_min: 20000.0,
            budget_max: Some(30000.0),
            preferred_star_rating: 3,
            required_amenities: vec![],
            conference_venue: None,
            max_conference_distance_km: 10.0,
        }
    }

    fn offer(provider: &str, price: f64) -> ProviderOffer {
        ProviderOffer {
            provider: provider.to_string(),
            booking_url: format!("https://{}.example/book", provider),
            price,
            currency: "JPY".to_string(),
            instant_booking: false,
        }
    }

    #[test]
    fn test_valid_preferences_pass() {
        assert!(base_preferences().validate().is_ok());
    }

    #[test]
    fn test_rejects_reversed_dates() {
        let mut prefs = base_preferences();
        prefs.check_out = prefs.check_in;
        assert!(matches!(
            prefs.validate(),
            Err(PreferencesError::InvalidDateRange)
        ));
    }

    #[test]
    fn test_rejects_empty_target_areas() {
        let mut prefs = base_preferences();
        prefs.target_areas = vec!["  ".to_string()];
        assert!(matches!(
            prefs.validate(),
            Err(PreferencesError::NoTargetAreas)
        ));
    }

    #[test]
    fn test_rejects_inverted_budget() {
        let mut prefs = base_preferences();
        prefs.budget_max = Some(10000.0);
        assert!(matches!(
            prefs.validate(),
            Err(PreferencesError::InvalidBudget(_))
        ));
    }

    #[test]
    fn test_rejects_out_of_range_star_rating() {
        let mut prefs = base_preferences();
        prefs.preferred_star_rating = 6;
        assert!(matches!(
            prefs.validate(),
            Err(PreferencesError::InvalidStarRating(6))
        ));
    }

    #[test]
    fn test_budget_midpoint_bounded() {
        assert_eq!(base_preferences().budget_midpoint(), 25000.0);
    }

    #[test]
    fn test_budget_midpoint_unbounded() {
        let mut prefs = base_preferences();
        prefs.budget_max = None;
        assert_eq!(prefs.budget_midpoint(), 40000.0);

        prefs.budget_min = 0.0;
        assert_eq!(prefs.budget_midpoint(), FALLBACK_BUDGET_ANCHOR);
    }

    #[test]
    fn test_best_offer_picks_cheapest_priced() {
        let mut hotel = HotelRecord {
            id: "h1".to_string(),
            name: "Test Hotel".to_string(),
            address: None,
            city: None,
            country: None,
            coordinates: None,
            star_rating: 3,
            rating_score: 0.0,
            review_count: 0,
            amenities: vec![],
            images: vec![],
            description: None,
            offers: BTreeMap::new(),
        };
        hotel
            .offers
            .insert("stayhub".to_string(), offer("stayhub", 24000.0));
        hotel
            .offers
            .insert("roomatlas".to_string(), offer("roomatlas", 21000.0));
        hotel
            .offers
            .insert("nestpoint".to_string(), offer("nestpoint", 0.0));

        assert_eq!(hotel.best_price(), Some(21000.0));
        assert_eq!(hotel.best_platform(), Some("roomatlas"));
    }
}
