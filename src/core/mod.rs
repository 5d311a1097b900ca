// Core pipeline exports
pub mod aggregator;
pub mod dedupe;
pub mod distance;
pub mod engine;
pub mod fallback;
pub mod geoscore;
pub mod ranker;
pub mod scoring;

pub use aggregator::Aggregator;
pub use dedupe::dedupe_hotels;
pub use distance::{distance_between, haversine_distance};
pub use engine::RecommendationEngine;
pub use fallback::synthesize_fallback_hotels;
pub use geoscore::{score_conference_proximity, score_location};
pub use ranker::{Ranker, DEFAULT_RESULT_LIMIT};
pub use scoring::{calculate_amenities_match, calculate_price_match, score_hotel, star_rating_matches};
