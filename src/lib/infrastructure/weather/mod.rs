//! HTTP backends for the weather lookup: Nominatim geocoding and the
//! Open-Meteo forecast API.

mod nominatim;
mod open_meteo;

pub use nominatim::NominatimGeocoder;
pub use open_meteo::OpenMeteoForecast;
