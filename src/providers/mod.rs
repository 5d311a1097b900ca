// Provider adapter exports
pub mod gate;
pub mod nestpoint;
pub mod normalize;
pub mod roomatlas;
pub mod stayhub;

pub use gate::RateGate;
pub use nestpoint::NestPointProvider;
pub use roomatlas::RoomAtlasProvider;
pub use stayhub::StayHubProvider;

use crate::config::ProvidersSettings;
use crate::models::{HotelRecord, ProviderQuery};
use async_trait::async_trait;
use std::sync::Arc;
use thiserror::Error;

/// Errors internal to one provider adapter; never propagated past `search`
#[derive(Debug, Error)]
pub enum ProviderError {
    #[error("HTTP request failed: {0}")]
    Request(#[from] reqwest::Error),

    #[error("API returned error status: {0}")]
    Api(reqwest::StatusCode),

    #[error("invalid response format: {0}")]
    InvalidResponse(String),
}

/// One external hotel inventory source
///
/// `search` is infallible from the caller's view: transport, parsing and
/// provider-side errors are absorbed into an empty result (with a logged
/// diagnostic), so one broken source never degrades an aggregation.
#[async_trait]
pub trait HotelProvider: Send + Sync {
    /// Stable provider identifier, also the key of this provider's offers
    fn name(&self) -> &'static str;

    async fn search(&self, query: &ProviderQuery) -> Vec<HotelRecord>;
}

/// Build the configured provider set. One adapter instance (and one rate
/// gate) per provider for the process lifetime, not per request.
pub fn build_providers(settings: &ProvidersSettings) -> Vec<Arc<dyn HotelProvider>> {
    let mut providers: Vec<Arc<dyn HotelProvider>> = Vec::new();

    if settings.stayhub.enabled {
        providers.push(Arc::new(StayHubProvider::new(
            settings.stayhub.endpoint.clone(),
            settings.stayhub.api_key.clone(),
            settings.stayhub.timeout_secs,
            settings.stayhub.min_interval_ms,
        )));
    }

    if settings.roomatlas.enabled {
        providers.push(Arc::new(RoomAtlasProvider::new(
            settings.roomatlas.endpoint.clone(),
            settings.roomatlas.api_key.clone(),
            settings.roomatlas.timeout_secs,
            settings.roomatlas.min_interval_ms,
        )));
    }

    if settings.nestpoint.enabled {
        providers.push(Arc::new(NestPointProvider::new(
            settings.nestpoint.endpoint.clone(),
            settings.nestpoint.api_key.clone(),
            settings.nestpoint.timeout_secs,
            settings.nestpoint.min_interval_ms,
        )));
    }

    providers
}
