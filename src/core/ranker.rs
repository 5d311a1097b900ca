use crate::core::fallback::synthesize_fallback_hotels;
use crate::core::scoring::score_hotel;
use crate::models::{
    HotelRecord, Recommendation, RecommendationResult, ScoringWeights, SearchPreferences,
};

/// Default cap on the returned recommendation list
pub const DEFAULT_RESULT_LIMIT: usize = 20;

/// Minimum composite score a candidate must reach to be returned.
/// Accept-all today; the threshold is an extension point.
const MIN_RELEVANCE_SCORE: f64 = 0.0;

/// Threshold for the retry pass when the first pass leaves nothing
const RELAXED_RELEVANCE_SCORE: f64 = 0.0;

/// Scores, filters, orders and truncates candidates into the final result
///
/// # Pipeline stages
/// 1. Score every candidate
/// 2. Accept those at or above the relevance threshold
/// 3. Retry with the relaxed threshold if nothing survived
/// 4. Synthesize fallback hotels if the list is still empty
/// 5. Stable sort descending by relevance, truncate to the limit
#[derive(Debug, Clone)]
pub struct Ranker {
    weights: ScoringWeights,
}

impl Ranker {
    pub fn new(weights: ScoringWeights) -> Self {
        Self { weights }
    }

    pub fn with_default_weights() -> Self {
        Self {
            weights: ScoringWeights::default(),
        }
    }

    /// Rank candidates for the given preferences
    ///
    /// Never returns an empty list for valid preferences: an empty or fully
    /// filtered candidate set is replaced by scored fallback hotels.
    pub fn rank(
        &self,
        candidates: Vec<HotelRecord>,
        preferences: &SearchPreferences,
        limit: usize,
    ) -> RecommendationResult {
        let total_candidates = candidates.len();

        let mut accepted = self.score_and_filter(&candidates, preferences, MIN_RELEVANCE_SCORE);

        if accepted.is_empty() && !candidates.is_empty() {
            tracing::debug!(
                "No candidates reached relevance {}, retrying relaxed",
                MIN_RELEVANCE_SCORE
            );
            accepted = self.score_and_filter(&candidates, preferences, RELAXED_RELEVANCE_SCORE);
        }

        if accepted.is_empty() {
            // Aggregation already guarantees a non-empty candidate set, so
            // this only fires if filtering removed everything
            let synthetic = synthesize_fallback_hotels(preferences);
            accepted = self.score_and_filter(&synthetic, preferences, RELAXED_RELEVANCE_SCORE);
        }

        let filtered_count = accepted.len();

        // Vec::sort_by is stable, so equal scores keep dedup order
        accepted.sort_by(|a, b| {
            b.breakdown
                .relevance_score
                .partial_cmp(&a.breakdown.relevance_score)
                .unwrap_or(std::cmp::Ordering::Equal)
        });

        accepted.truncate(limit);

        RecommendationResult {
            recommendations: accepted,
            total_candidates,
            filtered_count,
            generated_at: chrono::Utc::now(),
        }
    }

    fn score_and_filter(
        &self,
        candidates: &[HotelRecord],
        preferences: &SearchPreferences,
        threshold: f64,
    ) -> Vec<Recommendation> {
        candidates
            .iter()
            .filter_map(|hotel| {
                let breakdown = score_hotel(hotel, preferences, &self.weights);
                if breakdown.relevance_score >= threshold {
                    Some(Recommendation {
                        best_price: hotel.best_price(),
                        best_platform: hotel.best_platform().map(str::to_string),
                        hotel: hotel.clone(),
                        breakdown,
                    })
                } else {
                    None
                }
            })
            .collect()
    }
}

impl Default for Ranker {
    fn default() -> Self {
        Self::with_default_weights()
    }
}
