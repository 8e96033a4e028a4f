//! Live weather lookup: geocode a city, then read its current conditions.
//!
//! [`WeatherLookup::get_weather`] never fails. Every failure becomes a
//! sentence the agent can read back as an observation.

pub mod codes;

use async_trait::async_trait;
use std::sync::Arc;
use thiserror::Error;
use tracing::{debug, warn};

use crate::infrastructure::http::HttpError;

/// A geocoded location. Coordinates keep the text the geocoder returned.
#[derive(Debug, Clone, PartialEq)]
pub struct Place {
    pub display_name: String,
    pub latitude: String,
    pub longitude: String,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CurrentConditions {
    /// Degrees Celsius
    pub temperature: f64,
    /// Metres per second
    pub windspeed: f64,
    pub weathercode: u16,
}

#[derive(Debug, Error)]
pub enum WeatherSourceError {
    #[error(transparent)]
    Http(#[from] HttpError),
    #[error("{0}")]
    Malformed(String),
}

#[async_trait]
pub trait Geocoder: Send + Sync {
    /// Best match for `city`, or `None` when nothing matches.
    async fn geocode(&self, city: &str) -> Result<Option<Place>, WeatherSourceError>;
}

#[async_trait]
pub trait ForecastSource: Send + Sync {
    /// Current conditions at `place`, or `None` when the service has none.
    async fn current(&self, place: &Place)
    -> Result<Option<CurrentConditions>, WeatherSourceError>;
}

#[derive(Clone)]
pub struct WeatherLookup {
    geocoder: Arc<dyn Geocoder>,
    forecast: Arc<dyn ForecastSource>,
}

impl WeatherLookup {
    pub fn new(geocoder: Arc<dyn Geocoder>, forecast: Arc<dyn ForecastSource>) -> Self {
        Self { geocoder, forecast }
    }

    pub async fn get_weather(&self, city: &str) -> String {
        let city = city.trim();
        if city.is_empty() {
            return not_found(city);
        }

        let place = match self.geocoder.geocode(city).await {
            Ok(Some(place)) => place,
            Ok(None) => {
                debug!(city, "Geocoder returned no match");
                return not_found(city);
            }
            Err(err) => {
                warn!(city, error = %err, "Geocoding failed");
                return format!("Error during geocoding for {city}: {err}");
            }
        };

        match self.forecast.current(&place).await {
            Ok(Some(current)) => format_report(&place, &current),
            Ok(None) => format!(
                "No current weather data available for {}.",
                place.display_name
            ),
            Err(err) => {
                warn!(place = place.display_name.as_str(), error = %err, "Forecast failed");
                format!("Error fetching weather for {}: {err}", place.display_name)
            }
        }
    }
}

fn not_found(city: &str) -> String {
    format!("Could not find coordinates for city '{city}'. Please ensure it's a valid city name.")
}

fn format_report(place: &Place, current: &CurrentConditions) -> String {
    format!(
        "Current weather in {} (Lat: {}, Lon: {}):\nTemperature: {}°C\nDescription: {}\nWind Speed: {} m/s",
        place.display_name,
        place.latitude,
        place.longitude,
        current.temperature,
        codes::describe(current.weathercode),
        current.windspeed,
    )
}
