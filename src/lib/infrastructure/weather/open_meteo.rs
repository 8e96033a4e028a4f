use async_trait::async_trait;
use serde::Deserialize;
use std::time::Duration;
use tracing::debug;

use crate::application::weather::{CurrentConditions, ForecastSource, Place, WeatherSourceError};
use crate::config::WeatherConfig;
use crate::infrastructure::http::{HttpClientBase, HttpError};

const SERVICE_ID: &str = "open-meteo";

/// Open-Meteo current weather, Celsius and metres per second.
pub struct OpenMeteoForecast {
    base: HttpClientBase,
}

impl OpenMeteoForecast {
    pub fn from_config(config: &WeatherConfig, timeout: Duration) -> Result<Self, HttpError> {
        Ok(Self {
            base: HttpClientBase::with_user_agent(
                SERVICE_ID,
                config.forecast_endpoint.clone(),
                None,
                timeout,
                Some(&config.user_agent),
            )?,
        })
    }
}

#[async_trait]
impl ForecastSource for OpenMeteoForecast {
    async fn current(
        &self,
        place: &Place,
    ) -> Result<Option<CurrentConditions>, WeatherSourceError> {
        let url = self.base.build_url("/v1/forecast");
        debug!(
            lat = place.latitude.as_str(),
            lon = place.longitude.as_str(),
            "Fetching current weather"
        );
        let response: ForecastResponse = self
            .base
            .get_json(
                &url,
                &[
                    ("latitude", place.latitude.as_str()),
                    ("longitude", place.longitude.as_str()),
                    ("current_weather", "true"),
                    ("temperature_unit", "celsius"),
                    ("windspeed_unit", "ms"),
                ],
            )
            .await?;
        Ok(response.current_weather.map(|current| CurrentConditions {
            temperature: current.temperature,
            windspeed: current.windspeed,
            weathercode: current.weathercode,
        }))
    }
}

#[derive(Deserialize)]
struct ForecastResponse {
    current_weather: Option<CurrentWeather>,
}

#[derive(Deserialize)]
struct CurrentWeather {
    temperature: f64,
    windspeed: f64,
    weathercode: u16,
}
