use std::time::Duration;

use reqwest::{Client, header};
use serde::Deserialize;
use url::Url;

use crate::domain::repository::Geocoder;
use crate::domain::types::Place;
use crate::error::EatRealError;

/// Nominatim-compatible `/search` client.
#[derive(Clone)]
pub struct HttpGeocoder {
    client: Client,
    base_url: Url,
    user_agent: String,
}

impl HttpGeocoder {
    pub fn new(base_url: Url, user_agent: String, timeout: Duration) -> Result<Self, reqwest::Error> {
        let client = Client::builder().timeout(timeout).build()?;
        Ok(Self {
            client,
            base_url,
            user_agent,
        })
    }

    fn search_url(&self, query: &str, limit: usize) -> Url {
        let mut url = self.base_url.clone();
        let path = format!("{}/search", url.path().trim_end_matches('/'));
        url.set_path(&path);
        url.query_pairs_mut()
            .clear()
            .append_pair("format", "json")
            .append_pair("q", query)
            .append_pair("limit", &limit.to_string());
        url
    }
}

#[derive(Debug, Deserialize)]
struct NominatimPlace {
    display_name: String,
    lat: String,
    lon: String,
    #[serde(default)]
    name: Option<String>,
}

fn place_from_result(result: NominatimPlace) -> Option<Place> {
    let latitude = result.lat.parse().ok()?;
    let longitude = result.lon.parse().ok()?;
    let name = result
        .name
        .filter(|n| !n.trim().is_empty())
        .or_else(|| {
            result
                .display_name
                .split(',')
                .next()
                .map(|s| s.trim().to_owned())
        })
        .unwrap_or_default();
    Some(Place {
        name,
        address: result.display_name,
        latitude,
        longitude,
    })
}

fn parse_places(body: &[u8]) -> Result<Vec<Place>, serde_json::Error> {
    let results: Vec<NominatimPlace> = serde_json::from_slice(body)?;
    Ok(results.into_iter().filter_map(place_from_result).collect())
}

impl Geocoder for HttpGeocoder {
    async fn search(&self, query: &str, limit: usize) -> Result<Vec<Place>, EatRealError> {
        let response = self
            .client
            .get(self.search_url(query, limit))
            .header(header::USER_AGENT, self.user_agent.as_str())
            .header(header::ACCEPT, "application/json")
            .send()
            .await
            .map_err(|e| {
                tracing::warn!(error = %e, "geocoder unreachable");
                EatRealError::GeocodingUnavailable
            })?;

        let status = response.status();
        let body = response.bytes().await.map_err(|e| {
            tracing::warn!(error = %e, "geocoder response unreadable");
            EatRealError::GeocodingUnavailable
        })?;
        if !status.is_success() {
            tracing::warn!(status = status.as_u16(), "geocoder returned an error");
            return Err(EatRealError::GeocodingUnavailable);
        }
        parse_places(&body).map_err(|e| {
            tracing::warn!(error = %e, "geocoder returned malformed JSON");
            EatRealError::GeocodingUnavailable
        })
    }
}
