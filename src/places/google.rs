//! Google Maps provider implementation

use super::{Coordinate, Place, PlaceSource, PlacesError, PlacesErrorKind};
use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use std::time::Duration;

const NEARBY_SEARCH_URL: &str = "https://maps.googleapis.com/maps/api/place/nearbysearch/json";
const GEOCODE_URL: &str = "https://maps.googleapis.com/maps/api/geocode/json";

/// Place source backed by the Google Places and Geocoding web services
pub struct GoogleMapsService {
    client: Client,
    api_key: String,
}

impl GoogleMapsService {
    pub fn new(api_key: String, timeout: Duration) -> Result<Self, PlacesError> {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| PlacesError::unknown(format!("Failed to create HTTP client: {e}")))?;

        Ok(Self { client, api_key })
    }

    fn classify(status: &str) -> Option<PlacesError> {
        match status {
            "OK" | "ZERO_RESULTS" => None,
            "OVER_QUERY_LIMIT" => Some(PlacesError::rate_limit("Google quota exceeded")),
            "REQUEST_DENIED" => Some(PlacesError::auth("Google API key rejected")),
            "INVALID_REQUEST" => Some(PlacesError::invalid_request("Invalid Google request")),
            other => Some(PlacesError::unknown(format!("Google status: {other}"))),
        }
    }

    async fn get_json<T: serde::de::DeserializeOwned>(
        &self,
        url: &str,
        query: &[(&str, String)],
    ) -> Result<T, PlacesError> {
        let response = self
            .client
            .get(url)
            .query(query)
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() || e.is_connect() {
                    PlacesError::network(format!("Google request failed: {e}"))
                } else {
                    PlacesError::unknown(format!("Google request failed: {e}"))
                }
            })?;

        let status = response.status();
        if status.is_server_error() {
            return Err(PlacesError::server_error(format!("Google returned {status}")));
        }
        if status == reqwest::StatusCode::UNAUTHORIZED || status == reqwest::StatusCode::FORBIDDEN {
            return Err(PlacesError::auth(format!("Google returned {status}")));
        }
        if !status.is_success() {
            return Err(PlacesError::new(
                PlacesErrorKind::InvalidRequest,
                format!("Google returned {status}"),
            ));
        }

        response
            .json()
            .await
            .map_err(|e| PlacesError::unknown(format!("Failed to decode Google response: {e}")))
    }
}

#[async_trait]
impl PlaceSource for GoogleMapsService {
    async fn nearby_search(
        &self,
        origin: Coordinate,
        radius_m: u32,
        category: &str,
    ) -> Result<Vec<Place>, PlacesError> {
        let query = [
            ("location", format!("{},{}", origin.lat, origin.lng)),
            ("radius", radius_m.to_string()),
            ("type", category.to_string()),
            ("language", "zh-TW".to_string()),
            ("key", self.api_key.clone()),
        ];

        let body: NearbySearchResponse = self.get_json(NEARBY_SEARCH_URL, &query).await?;
        if let Some(err) = Self::classify(&body.status) {
            return Err(err);
        }

        let places: Vec<Place> = body
            .results
            .into_iter()
            .filter_map(GooglePlace::into_place)
            .collect();

        tracing::debug!(
            lat = origin.lat,
            lng = origin.lng,
            radius_m,
            count = places.len(),
            "nearby search completed"
        );

        Ok(places)
    }

    async fn geocode(&self, query: &str) -> Result<Option<Coordinate>, PlacesError> {
        let params = [
            ("address", query.to_string()),
            ("language", "zh-TW".to_string()),
            ("key", self.api_key.clone()),
        ];

        let body: GeocodeResponse = self.get_json(GEOCODE_URL, &params).await?;
        if let Some(err) = Self::classify(&body.status) {
            return Err(err);
        }

        // First hit wins; ambiguous addresses are not distinguished.
        Ok(body
            .results
            .into_iter()
            .next()
            .and_then(|r| Coordinate::new(r.geometry.location.lat, r.geometry.location.lng)))
    }
}

// ============================================================
// Wire types
// ============================================================

#[derive(Debug, Deserialize)]
struct NearbySearchResponse {
    status: String,
    #[serde(default)]
    results: Vec<GooglePlace>,
}

#[derive(Debug, Deserialize)]
struct GooglePlace {
    place_id: String,
    name: String,
    geometry: Geometry,
    rating: Option<f32>,
    opening_hours: Option<OpeningHours>,
    #[serde(default)]
    types: Vec<String>,
    #[serde(default)]
    vicinity: String,
    #[serde(default)]
    photos: Vec<Photo>,
}

impl GooglePlace {
    /// Drops candidates with malformed coordinates rather than failing the batch.
    fn into_place(self) -> Option<Place> {
        let coordinate = Coordinate::new(self.geometry.location.lat, self.geometry.location.lng)?;
        Some(Place {
            id: self.place_id,
            name: self.name,
            coordinate,
            rating: self.rating,
            open_now: self.opening_hours.and_then(|h| h.open_now),
            tags: self.types,
            vicinity: self.vicinity,
            photo_ref: self.photos.into_iter().next().map(|p| p.photo_reference),
        })
    }
}

#[derive(Debug, Deserialize)]
struct OpeningHours {
    open_now: Option<bool>,
}

#[derive(Debug, Deserialize)]
struct Photo {
    photo_reference: String,
}

#[derive(Debug, Deserialize)]
struct Geometry {
    location: Location,
}

#[derive(Debug, Deserialize)]
struct Location {
    lat: f64,
    lng: f64,
}

#[derive(Debug, Deserialize)]
struct GeocodeResponse {
    status: String,
    #[serde(default)]
    results: Vec<GeocodeResult>,
}

#[derive(Debug, Deserialize)]
struct GeocodeResult {
    geometry: Geometry,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn nearby_response_decodes_and_drops_bad_coordinates() {
        let raw = serde_json::json!({
            "status": "OK",
            "results": [
                {
                    "place_id": "a",
                    "name": "好吃拉麵",
                    "geometry": { "location": { "lat": 25.04, "lng": 121.56 } },
                    "rating": 4.3,
                    "opening_hours": { "open_now": true },
                    "types": ["restaurant", "food"],
                    "vicinity": "台北市信義區",
                    "photos": [{ "photo_reference": "ref-1" }]
                },
                {
                    "place_id": "b",
                    "name": "壞座標",
                    "geometry": { "location": { "lat": 999.0, "lng": 0.0 } }
                }
            ]
        });

        let body: NearbySearchResponse = serde_json::from_value(raw).unwrap();
        assert_eq!(body.status, "OK");
        let places: Vec<Place> = body.results.into_iter().filter_map(GooglePlace::into_place).collect();
        assert_eq!(places.len(), 1);
        assert_eq!(places[0].id, "a");
        assert_eq!(places[0].open_now, Some(true));
        assert_eq!(places[0].photo_ref.as_deref(), Some("ref-1"));
    }

    #[test]
    fn status_classification() {
        assert!(GoogleMapsService::classify("OK").is_none());
        assert!(GoogleMapsService::classify("ZERO_RESULTS").is_none());
        let err = GoogleMapsService::classify("OVER_QUERY_LIMIT").unwrap();
        assert_eq!(err.kind, PlacesErrorKind::RateLimit);
        assert!(err.kind.is_retryable());
        let err = GoogleMapsService::classify("REQUEST_DENIED").unwrap();
        assert!(!err.kind.is_retryable());
    }
}
