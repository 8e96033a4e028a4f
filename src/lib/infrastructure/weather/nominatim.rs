use async_trait::async_trait;
use serde::Deserialize;
use std::time::Duration;
use tracing::debug;

use crate::application::weather::{Geocoder, Place, WeatherSourceError};
use crate::config::WeatherConfig;
use crate::infrastructure::http::{HttpClientBase, HttpError};

const SERVICE_ID: &str = "nominatim";

/// OpenStreetMap Nominatim search. The service rejects requests that do not
/// identify themselves, so the client always sends the configured agent.
pub struct NominatimGeocoder {
    base: HttpClientBase,
}

impl NominatimGeocoder {
    pub fn from_config(config: &WeatherConfig, timeout: Duration) -> Result<Self, HttpError> {
        Ok(Self {
            base: HttpClientBase::with_user_agent(
                SERVICE_ID,
                config.geocoding_endpoint.clone(),
                None,
                timeout,
                Some(&config.user_agent),
            )?,
        })
    }
}

#[async_trait]
impl Geocoder for NominatimGeocoder {
    async fn geocode(&self, city: &str) -> Result<Option<Place>, WeatherSourceError> {
        let url = self.base.build_url("/search");
        debug!(city, "Geocoding city");
        let hits: Vec<SearchHit> = self
            .base
            .get_json(&url, &[("q", city), ("format", "json"), ("limit", "1")])
            .await?;
        Ok(hits.into_iter().next().map(|hit| Place {
            display_name: hit.display_name,
            latitude: hit.lat,
            longitude: hit.lon,
        }))
    }
}

#[derive(Deserialize)]
struct SearchHit {
    lat: String,
    lon: String,
    display_name: String,
}
