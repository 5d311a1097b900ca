use crate::core::fallback::synthesize_fallback_hotels;
use crate::models::{HotelRecord, ProviderQuery, SearchPreferences};
use crate::providers::HotelProvider;
use futures::future::join_all;
use std::sync::Arc;

/// Fans out one search to every configured provider
///
/// All provider calls for a run are issued concurrently: every adapter for
/// the primary target area and, when more areas were requested, for each
/// secondary area as well. The join waits for every call to settle; a slow
/// or failing adapter costs only its own slot, never its siblings'.
pub struct Aggregator {
    providers: Vec<Arc<dyn HotelProvider>>,
}

impl Aggregator {
    pub fn new(providers: Vec<Arc<dyn HotelProvider>>) -> Self {
        Self { providers }
    }

    /// Collect candidates from every provider for every target area
    ///
    /// Never returns an empty list: if every provider came back empty (or
    /// none is configured), fallback hotels are synthesized so downstream
    /// stages always have candidates to score.
    pub async fn aggregate(&self, preferences: &SearchPreferences) -> Vec<HotelRecord> {
        let areas: Vec<&str> = preferences
            .target_areas
            .iter()
            .map(|a| a.trim())
            .filter(|a| !a.is_empty())
            .collect();

        let mut calls = Vec::with_capacity(areas.len() * self.providers.len());
        for area in &areas {
            let query = ProviderQuery::from_preferences(preferences, area);
            for provider in &self.providers {
                let provider = Arc::clone(provider);
                let query = query.clone();
                calls.push(async move { provider.search(&query).await });
            }
        }

        let candidates: Vec<HotelRecord> = join_all(calls).await.into_iter().flatten().collect();

        tracing::info!(
            "Aggregated {} candidates from {} providers across {} areas",
            candidates.len(),
            self.providers.len(),
            areas.len()
        );

        if candidates.is_empty() {
            tracing::warn!("No provider returned inventory, using fallback synthesis");
            return synthesize_fallback_hotels(preferences);
        }

        candidates
    }
}
