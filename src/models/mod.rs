// Model exports
pub mod domain;
pub mod requests;
pub mod responses;

pub use domain::{
    ConferenceProximity, ConferenceVenue, GeoPoint, HotelRecord, LocationMatch, PreferencesError,
    ProviderOffer, ProviderQuery, Recommendation, RecommendationResult, ScoreBreakdown,
    ScoringWeights, SearchPreferences,
};
pub use requests::GenerateRecommendationsRequest;
pub use responses::{ErrorResponse, HealthResponse, RecommendationsResponse};
