use crate::models::HotelRecord;
use std::collections::HashMap;

/// Collapse candidate records that describe the same physical hotel
///
/// The first record seen under a key stays canonical; later records under
/// the same key union their provider offers into it without overwriting an
/// offer from a provider already present. First-appearance order is kept;
/// ranking happens downstream.
pub fn dedupe_hotels(candidates: Vec<HotelRecord>) -> Vec<HotelRecord> {
    let mut kept: Vec<HotelRecord> = Vec::with_capacity(candidates.len());
    let mut index_by_key: HashMap<String, usize> = HashMap::new();

    for candidate in candidates {
        let key = dedupe_key(&candidate.name);
        match index_by_key.get(&key) {
            Some(&idx) => {
                let canonical = &mut kept[idx];
                for (provider, offer) in candidate.offers {
                    canonical.offers.entry(provider).or_insert(offer);
                }
            }
            None => {
                index_by_key.insert(key, kept.len());
                kept.push(candidate);
            }
        }
    }

    kept
}

/// Merge key: lowercased name with all internal whitespace stripped.
/// Deliberately carries no city/country component, so two distinct hotels
/// sharing a name in different cities will merge. Product has not clarified
/// whether that is intended; keep the behavior until it does.
fn dedupe_key(name: &str) -> String {
    name.chars()
        .filter(|c| !c.is_whitespace())
        .collect::<String>()
        .to_lowercase()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::ProviderOffer;
    use std::collections::BTreeMap;

    fn hotel_with_offer(name: &str, provider: &str, price: f64) -> HotelRecord {
        let mut offers = BTreeMap::new();
        offers.insert(
            provider.to_string(),
            ProviderOffer {
                provider: provider.to_string(),
                booking_url: format!("https://{}.example/{}", provider, name),
                price,
                currency: "JPY".to_string(),
                instant_booking: false,
            },
        );

        HotelRecord {
            id: format!("{}-{}", provider, name),
            name: name.to_string(),
            address: None,
            city: Some("Tokyo".to_string()),
            country: Some("Japan".to_string()),
            coordinates: None,
            star_rating: 3,
            rating_score: 4.0,
            review_count: 50,
            amenities: vec![],
            images: vec![],
            description: None,
            offers,
        }
    }

    #[test]
    fn test_dedupe_ignores_case_and_whitespace() {
        let merged = dedupe_hotels(vec![
            hotel_with_offer("Grand Hotel", "stayhub", 24000.0),
            hotel_with_offer("  grand   hotel ", "roomatlas", 22000.0),
        ]);

        assert_eq!(merged.len(), 1);
        assert_eq!(merged[0].offers.len(), 2);
        assert!(merged[0].offers.contains_key("stayhub"));
        assert!(merged[0].offers.contains_key("roomatlas"));
    }

    #[test]
    fn test_first_seen_record_stays_canonical() {
        let merged = dedupe_hotels(vec![
            hotel_with_offer("Grand Hotel", "stayhub", 24000.0),
            hotel_with_offer("grand hotel", "roomatlas", 22000.0),
        ]);

        assert_eq!(merged[0].name, "Grand Hotel");
        assert_eq!(merged[0].id, "stayhub-Grand Hotel");
    }

    #[test]
    fn test_existing_provider_offer_not_overwritten() {
        let merged = dedupe_hotels(vec![
            hotel_with_offer("Grand Hotel", "stayhub", 24000.0),
            hotel_with_offer("grand hotel", "stayhub", 19000.0),
        ]);

        assert_eq!(merged.len(), 1);
        assert_eq!(merged[0].offers["stayhub"].price, 24000.0);
    }

    #[test]
    fn test_distinct_hotels_stay_separate_in_order() {
        let merged = dedupe_hotels(vec![
            hotel_with_offer("Hotel Alpha", "stayhub", 20000.0),
            hotel_with_offer("Hotel Beta", "stayhub", 21000.0),
            hotel_with_offer("hotel alpha", "roomatlas", 19000.0),
            hotel_with_offer("Hotel Gamma", "nestpoint", 25000.0),
        ]);

        let names: Vec<&str> = merged.iter().map(|h| h.name.as_str()).collect();
        assert_eq!(names, vec!["Hotel Alpha", "Hotel Beta", "Hotel Gamma"]);
        assert_eq!(merged[0].offers.len(), 2);
    }
}
