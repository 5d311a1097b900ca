use crate::models::{HotelRecord, ProviderOffer, ProviderQuery};
use crate::providers::normalize::{
    bool_field, extract_records, f64_field, geo_point, star_field, string_field, string_list,
};
use crate::providers::{HotelProvider, ProviderError, RateGate};
use async_trait::async_trait;
use reqwest::Client;
use serde_json::{json, Value};
use std::collections::BTreeMap;
use std::time::Duration;

const PROVIDER_NAME: &str = "roomatlas";

/// RoomAtlas inventory adapter
///
/// RoomAtlas takes a JSON search request on `POST /api/availability` and
/// answers `{"data": [...]}` with nested `location`, `coordinates`,
/// `pricing` and `review` objects.
pub struct RoomAtlasProvider {
    base_url: String,
    api_key: String,
    client: Client,
    gate: RateGate,
}

impl RoomAtlasProvider {
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
            "{}/api/availability",
            self.base_url.trim_end_matches('/')
        );

        let body = json!({
            "destination": {
                "city": query.area,
                "country": query.country,
            },
            "stay": {
                "from": query.check_in.to_string(),
                "to": query.check_out.to_string(),
                "guests": query.guest_count,
            },
            "priceBand": {
                "min": query.budget_min,
                "max": query.budget_max,
            },
        });

        tracing::debug!("RoomAtlas search: {} for '{}'", url, query.area);

        let response = self
            .client
            .post(&url)
            .bearer_auth(&self.api_key)
            .json(&body)
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
        let name = string_field(record, &["hotelName", "name"])?;
        let id = string_field(record, &["hotelId", "id"])
            .map(|id| format!("{}-{}", PROVIDER_NAME, id))
            .unwrap_or_else(|| format!("{}-{}", PROVIDER_NAME, uuid::Uuid::new_v4()));

        let mut offers = BTreeMap::new();
        if let Some(price) = f64_field(record, &["pricing.basePrice", "basePrice", "price"]) {
            offers.insert(
                PROVIDER_NAME.to_string(),
                ProviderOffer {
                    provider: PROVIDER_NAME.to_string(),
                    booking_url: string_field(record, &["deepLink", "bookingUrl"])
                        .unwrap_or_else(|| format!("{}/book/{}", self.base_url, id)),
                    price,
                    currency: string_field(record, &["pricing.currency", "currency"])
                        .unwrap_or_else(|| "USD".to_string()),
                    instant_booking: bool_field(record, &["instantBooking"]).unwrap_or(false),
                },
            );
        }

        Some(HotelRecord {
            id,
            name,
            address: string_field(record, &["location.address", "address"]),
            city: string_field(record, &["location.city", "city"]),
            country: string_field(record, &["location.country", "country"]),
            coordinates: geo_point(record),
            star_rating: star_field(record, &["starRating", "stars"]),
            rating_score: f64_field(record, &["review.score", "rating"]).unwrap_or(0.0),
            review_count: f64_field(record, &["review.count", "reviewCount"]).unwrap_or(0.0)
                as u32,
            amenities: string_list(record, &["amenities", "features"]),
            images: string_list(record, &["photos", "images"]),
            description: string_field(record, &["description"]),
            offers,
        })
    }
}

#[async_trait]
impl HotelProvider for RoomAtlasProvider {
    fn name(&self) -> &'static str {
        PROVIDER_NAME
    }

    async fn search(&self, query: &ProviderQuery) -> Vec<HotelRecord> {
        match self.fetch(query).await {
            Ok(hotels) => {
                tracing::debug!(
                    "RoomAtlas returned {} hotels for '{}'",
                    hotels.len(),
                    query.area
                );
                hotels
            }
            Err(e) => {
                tracing::warn!("RoomAtlas search failed for '{}': {}", query.area, e);
                Vec::new()
            }
        }
    }
}
