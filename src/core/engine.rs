use crate::core::aggregator::Aggregator;
use crate::core::dedupe::dedupe_hotels;
use crate::core::ranker::Ranker;
use crate::models::{
    PreferencesError, RecommendationResult, ScoringWeights, SearchPreferences,
};
use crate::providers::HotelProvider;
use std::sync::Arc;

/// The full recommendation pipeline behind one call
///
/// # Pipeline stages
/// 1. Preference validation (the only caller-facing failure)
/// 2. Concurrent provider aggregation
/// 3. Deduplication with offer union
/// 4. Scoring, ranking and truncation
pub struct RecommendationEngine {
    aggregator: Aggregator,
    ranker: Ranker,
}

impl RecommendationEngine {
    pub fn new(providers: Vec<Arc<dyn HotelProvider>>, weights: ScoringWeights) -> Self {
        Self {
            aggregator: Aggregator::new(providers),
            ranker: Ranker::new(weights),
        }
    }

    /// Generate a ranked recommendation list for validated preferences
    ///
    /// Either rejects the preferences up front or returns a complete,
    /// non-empty result; provider failures never surface here.
    pub async fn generate(
        &self,
        preferences: &SearchPreferences,
        limit: usize,
    ) -> Result<RecommendationResult, PreferencesError> {
        preferences.validate()?;

        let candidates = self.aggregator.aggregate(preferences).await;
        let found = candidates.len();

        let unique = dedupe_hotels(candidates);
        tracing::debug!(
            "{} candidates collapsed to {} unique hotels",
            found,
            unique.len()
        );

        let mut result = self.ranker.rank(unique, preferences, limit);
        // Report everything aggregation found, not the post-dedup count
        result.total_candidates = found;
        Ok(result)
    }
}
