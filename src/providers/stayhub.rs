use crate::models::{HotelRecord, ProviderOffer, ProviderQuery};
use crate::providers::normalize::{
    bool_field, extract_records, f64_field, geo_point, star_field, string_field, string_list,
};
use crate::providers::{HotelProvider, ProviderError, RateGate};
use async_trait::async_trait;
use reqwest::Client;
use serde_json::Value;
use std::collections::BTreeMap;
use std::time::Duration;

const PROVIDER_NAME: &str = "stayhub";

/// StayHub inventory adapter
///
/// StayHub answers `GET /v1/search` with `{"results": [...]}` and flat
/// records (`lat`/`lng`, nightly `price`, `images`).
pub struct StayHubProvider {
    base_url: String,
    api_key: String,
    client: Client,
    gate: RateGate,
}

impl StayHubProvider {
    pub fn new(base_url: String, api_key: String, timeout_secs: u64, min_interval_ms: u64) -> Self {
        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .build()
            .expect("Failed to create HTTP client");

        Self {
            base_url,
            api_key,
            client,
            gate: RateGate::new(Duration::from_millis(min_interval_ms)),
        }
    }

    async fn fetch(&self, query: &ProviderQuery) -> Result<Vec<HotelRecord>, ProviderError> {
        self.gate.wait().await;

        let url = format!(
            "{}/v1/search?city={}&country={}&check_in={}&check_out={}&guests={}",
            self.base_url.trim_end_matches('/'),
            urlencoding::encode(&query.area),
            urlencoding::encode(&query.country),
            query.check_in,
            query.check_out,
            query.guest_count,
        );

        tracing::debug!("StayHub search: {}", url);

        let response = self
            .client
            .get(&url)
            .header("X-Api-Key", &self.api_key)
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(ProviderError::Api(response.status()));
        }

        let json: Value = response.json().await?;
        let records = extract_records(&json);

        Ok(records
            .iter()
            .filter_map(|record| self.parse_record(record))
            .collect())
    }

    fn parse_record(&self, record: &Value) -> Option<HotelRecord> {
        let name = string_field(record, &["name", "hotelName", "title"])?;
        let id = string_field(record, &["id", "hotelId"])
            .map(|id| format!("{}-{}", PROVIDER_NAME, id))
            .unwrap_or_else(|| format!("{}-{}", PROVIDER_NAME, uuid::Uuid::new_v4()));

        let mut offers = BTreeMap::new();
        if let Some(price) = f64_field(record, &["price", "nightlyPrice", "basePrice"]) {
            offers.insert(
                PROVIDER_NAME.to_string(),
                ProviderOffer {
                    provider: PROVIDER_NAME.to_string(),
                    booking_url: string_field(record, &["url", "bookingUrl"])
                        .unwrap_or_else(|| format!("{}/hotels/{}", self.base_url, id)),
                    price,
                    currency: string_field(record, &["currency"])
                        .unwrap_or_else(|| "USD".to_string()),
                    instant_booking: bool_field(record, &["instantBook", "instantBooking"])
                        .unwrap_or(false),
                },
            );
        }

        Some(HotelRecord {
            id,
            name,
            address: string_field(record, &["address"]),
            city: string_field(record, &["city"]),
            country: string_field(record, &["country"]),
            coordinates: geo_point(record),
            star_rating: star_field(record, &["stars", "starRating"]),
            rating_score: f64_field(record, &["rating", "ratingScore"]).unwrap_or(0.0),
            review_count: f64_field(record, &["reviewCount", "reviews"]).unwrap_or(0.0) as u32,
            amenities: string_list(record, &["amenities", "facilities"]),
            images: string_list(record, &["images", "photos"]),
            description: string_field(record, &["description", "summary"]),
            offers,
        })
    }
}

#[async_trait]
impl HotelProvider for StayHubProvider {
    fn name(&self) -> &'static str {
        PROVIDER_NAME
    }

    async fn search(&self, query: &ProviderQuery) -> Vec<HotelRecord> {
        match self.fetch(query).await {
            Ok(hotels) => {
                tracing::debug!("StayHub returned {} hotels for '{}'", hotels.len(), query.area);
                hotels
            }
            Err(e) => {
                tracing::warn!("StayHub search failed for '{}': {}", query.area, e);
                Vec::new()
            }
        }
    }
}
