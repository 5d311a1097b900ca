use crate::models::domain::{ConferenceVenue, SearchPreferences};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use validator::Validate;

/// Request to generate hotel recommendations
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct GenerateRecommendationsRequest {
    #[validate(length(min = 1))]
    #[serde(alias = "target_areas", rename = "targetAreas")]
    pub target_areas: Vec<String>,
    #[validate(length(min = 1))]
    pub country: String,
    #[serde(alias = "check_in", rename = "checkIn")]
    pub check_in: NaiveDate,
    #[serde(alias = "check_out", rename = "checkOut")]
    pub check_out: NaiveDate,
    #[serde(default = "default_guest_count")]
    #[serde(alias = "guest_count", rename = "guestCount")]
    pub guest_count: u8,
    #[serde(default)]
    #[serde(alias = "budget_min", rename = "budgetMin")]
    pub budget_min: f64,
    #[serde(default)]
    #[serde(alias = "budget_max", rename = "budgetMax")]
    pub budget_max: Option<f64>,
    #[serde(default = "default_star_rating")]
    #[serde(alias = "preferred_star_rating", rename = "preferredStarRating")]
    pub preferred_star_rating: u8,
    #[serde(default)]
    #[serde(alias = "required_amenities", rename = "requiredAmenities")]
    pub required_amenities: Vec<String>,
    #[serde(default)]
    #[serde(alias = "conference_venue", rename = "conferenceVenue")]
    pub conference_venue: Option<ConferenceVenue>,
    #[serde(default = "default_conference_distance_km")]
    #[serde(alias = "max_conference_distance_km", rename = "maxConferenceDistanceKm")]
    pub max_conference_distance_km: f64,
    #[serde(default = "default_limit")]
    pub limit: u16,
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

fn default_limit() -> u16 {
    20
}

impl GenerateRecommendationsRequest {
    pub fn into_preferences(self) -> SearchPreferences {
        SearchPreferences {
            target_areas: self.target_areas,
            country: self.country,
            check_in: self.check_in,
            check_out: self.check_out,
            guest_count: self.guest_count,
            budget_min: self.budget_min,
            budget_max: self.budget_max,
            preferred_star_rating: self.preferred_star_rating,
            required_amenities: self.required_amenities,
            conference_venue: self.conference_venue,
            max_conference_distance_km: self.max_conference_distance_km,
        }
    }
}
