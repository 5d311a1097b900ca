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

const PROVIDER_NAME: &str = "nestpoint";

/// NestPoint inventory adapter
///
/// NestPoint is the oldest of the integrated sources: `GET /listings` with
/// the key in the query string, records keyed by id in an object-of-objects
/// under `hotels` (an array on newer deployments), `title` instead of a
/// name field, positional `[lat, lon]` coordinates and an `offer` object.
pub struct NestPointProvider {
    base_url: String,
    api_key: String,
    client: Client,
    gate: RateGate,
}

impl NestPointProvider {
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
            "{}/listings?key={}&city={}&country={}&arrival={}&departure={}&pax={}",
            self.base_url.trim_end_matches('/'),
            urlencoding::encode(&self.api_key),
            urlencoding::encode(&query.area),
            urlencoding::encode(&query.country),
            query.check_in,
            query.check_out,
            query.guest_count,
        );

        tracing::debug!("NestPoint search for '{}'", query.area);

        let response = self.client.get(&url).send().await?;

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
        let name = string_field(record, &["title", "name"])?;
        let id = string_field(record, &["hotel_id", "id"])
            .map(|id| format!("{}-{}", PROVIDER_NAME, id))
            .unwrap_or_else(|| format!("{}-{}", PROVIDER_NAME, uuid::Uuid::new_v4()));

        let mut offers = BTreeMap::new();
        if let Some(price) = f64_field(record, &["offer.amount", "amount", "price"]) {
            offers.insert(
                PROVIDER_NAME.to_string(),
                ProviderOffer {
                    provider: PROVIDER_NAME.to_string(),
                    booking_url: string_field(record, &["offer.link", "link"])
                        .unwrap_or_else(|| format!("{}/listings/{}", self.base_url, id)),
                    price,
                    currency: string_field(record, &["offer.currency", "currency"])
                        .unwrap_or_else(|| "USD".to_string()),
                    instant_booking: bool_field(record, &["offer.instant", "instant"])
                        .unwrap_or(false),
                },
            );
        }

        Some(HotelRecord {
            id,
            name,
            address: string_field(record, &["street", "address"]),
            city: string_field(record, &["city"]),
            country: string_field(record, &["country"]),
            coordinates: geo_point(record),
            star_rating: star_field(record, &["class", "stars"]),
            rating_score: f64_field(record, &["guest_score", "rating"]).unwrap_or(0.0),
            review_count: f64_field(record, &["reviews_count", "reviewCount"]).unwrap_or(0.0)
                as u32,
            amenities: string_list(record, &["features", "amenities"]),
            images: string_list(record, &["photos", "images"]),
            description: string_field(record, &["summary", "description"]),
            offers,
        })
    }
}

#[async_trait]
impl HotelProvider for NestPointProvider {
    fn name(&self) -> &'static str {
        PROVIDER_NAME
    }

    async fn search(&self, query: &ProviderQuery) -> Vec<HotelRecord> {
        match self.fetch(query).await {
            Ok(hotels) => {
                tracing::debug!(
                    "NestPoint returned {} hotels for '{}'",
                    hotels.len(),
                    query.area
                );
                hotels
            }
            Err(e) => {
                tracing::warn!("NestPoint search failed for '{}': {}", query.area, e);
                Vec::new()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn query() -> ProviderQuery {
        ProviderQuery {
            area: "Osaka".to_string(),
            country: "Japan".to_string(),
            check_in: NaiveDate::from_ymd_opt(2026, 9, 1).unwrap(),
            check_out: NaiveDate::from_ymd_opt(2026, 9, 4).unwrap(),
            guest_count: 2,
            budget_min: 10000.0,
            budget_max: None,
        }
    }

    fn provider(base_url: &str) -> NestPointProvider {
        NestPointProvider::new(base_url.to_string(), "nest_key".to_string(), 5, 0)
    }

    #[tokio::test]
    async fn test_parses_object_of_objects_payload() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("GET", mockito::Matcher::Regex(r"^/listings".to_string()))
            .with_status(200)
            .with_body(
                r#"{
                    "hotels": {
                        "np-1": {
                            "hotel_id": "np-1",
                            "title": "Namba Riverside",
                            "city": "Osaka",
                            "country": "Japan",
                            "position": [34.6687, 135.5013],
                            "class": 4,
                            "guest_score": 4.1,
                            "reviews_count": 95,
                            "features": ["WiFi", "Gym"],
                            "photos": ["https://img.nestpoint.example/np-1.jpg"],
                            "offer": {
                                "amount": 13500,
                                "currency": "JPY",
                                "link": "https://nestpoint.example/listings/np-1",
                                "instant": true
                            }
                        },
                        "np-2": {
                            "title": "Umeda Sky Stay",
                            "city": "Osaka",
                            "offer": {"amount": "9800", "currency": "JPY"}
                        }
                    }
                }"#,
            )
            .create_async()
            .await;

        let mut hotels = provider(&server.url()).search(&query()).await;
        mock.assert_async().await;

        hotels.sort_by(|a, b| a.name.cmp(&b.name));
        assert_eq!(hotels.len(), 2);

        let riverside = &hotels[0];
        assert_eq!(riverside.name, "Namba Riverside");
        assert_eq!(riverside.star_rating, 4);
        assert_eq!(riverside.best_price(), Some(13500.0));
        assert!(riverside.offers["nestpoint"].instant_booking);
        let coords = riverside.coordinates.unwrap();
        assert!((coords.latitude - 34.6687).abs() < 1e-6);

        // Numeric-string price still parses
        assert_eq!(hotels[1].best_price(), Some(9800.0));
    }

    #[tokio::test]
    async fn test_parses_array_payload() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("GET", mockito::Matcher::Regex(r"^/listings".to_string()))
            .with_status(200)
            .with_body(r#"{"hotels": [{"title": "Array Hotel", "offer": {"amount": 8000}}]}"#)
            .create_async()
            .await;

        let hotels = provider(&server.url()).search(&query()).await;
        assert_eq!(hotels.len(), 1);
        assert_eq!(hotels[0].name, "Array Hotel");
    }

    #[tokio::test]
    async fn test_rate_limited_yields_empty() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("GET", mockito::Matcher::Regex(r"^/listings".to_string()))
            .with_status(429)
            .create_async()
            .await;

        assert!(provider(&server.url()).search(&query()).await.is_empty());
    }
}
