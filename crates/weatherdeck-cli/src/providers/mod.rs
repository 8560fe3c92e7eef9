use std::time::Duration;

use reqwest::blocking::Client;
use thiserror::Error;

use crate::config::PROVIDER_TIMEOUT_SECS;
use crate::geocoding::ResolvedLocation;

pub mod open_meteo;

#[derive(Debug, Clone, PartialEq)]
pub struct ProviderDailyPoint {
    pub date: String,
    pub weather_code: i32,
    pub temp_min_c: f64,
    pub temp_max_c: f64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ProviderDailyForecast {
    pub timezone: String,
    pub days: Vec<ProviderDailyPoint>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ProviderHourlyPoint {
    pub datetime: String,
    pub weather_code: i32,
    pub temp_c: f64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ProviderHourlyForecast {
    pub timezone: String,
    pub hours: Vec<ProviderHourlyPoint>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ProviderCurrentConditions {
    pub timezone: String,
    pub temperature_c: f64,
    pub windspeed_kmh: f64,
    pub wind_direction_deg: f64,
    pub weather_code: i32,
    pub is_day: bool,
    pub observed_at: String,
    pub humidity_pct: Option<f64>,
    pub sunrise: Option<String>,
    pub sunset: Option<String>,
}

/// One-shot payload backing a location-board card: current conditions plus
/// today's high/low and sun times, fetched in a single request.
#[derive(Debug, Clone, PartialEq)]
pub struct ProviderLocationSnapshot {
    pub timezone: String,
    pub temperature_c: f64,
    pub windspeed_kmh: f64,
    pub weather_code: i32,
    pub humidity_pct: Option<f64>,
    pub high_c: f64,
    pub low_c: f64,
    pub sunrise: String,
    pub sunset: String,
}

pub trait ProviderApi {
    fn geocode_city(&self, city: &str) -> Result<ResolvedLocation, ProviderError>;
    fn suggest_cities(
        &self,
        query: &str,
        limit: u8,
    ) -> Result<Vec<ResolvedLocation>, ProviderError>;
    fn fetch_daily_forecast(
        &self,
        lat: f64,
        lon: f64,
        forecast_days: usize,
    ) -> Result<ProviderDailyForecast, ProviderError>;
    fn fetch_hourly_forecast(
        &self,
        lat: f64,
        lon: f64,
    ) -> Result<ProviderHourlyForecast, ProviderError>;
    fn fetch_current_conditions(
        &self,
        lat: f64,
        lon: f64,
    ) -> Result<ProviderCurrentConditions, ProviderError>;
    fn fetch_location_snapshot(
        &self,
        lat: f64,
        lon: f64,
    ) -> Result<ProviderLocationSnapshot, ProviderError>;
}

#[derive(Debug, Clone)]
pub struct HttpProviders {
    client: Client,
}

impl HttpProviders {
    pub fn new() -> Result<Self, ProviderError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(PROVIDER_TIMEOUT_SECS))
            .build()
            .map_err(|error| ProviderError::Transport(error.to_string()))?;

        Ok(Self { client })
    }
}

impl ProviderApi for HttpProviders {
    fn geocode_city(&self, city: &str) -> Result<ResolvedLocation, ProviderError> {
        open_meteo::fetch_geocode(&self.client, city)
    }

    fn suggest_cities(
        &self,
        query: &str,
        limit: u8,
    ) -> Result<Vec<ResolvedLocation>, ProviderError> {
        open_meteo::fetch_suggestions(&self.client, query, limit)
    }

    fn fetch_daily_forecast(
        &self,
        lat: f64,
        lon: f64,
        forecast_days: usize,
    ) -> Result<ProviderDailyForecast, ProviderError> {
        open_meteo::fetch_daily_forecast(&self.client, lat, lon, forecast_days)
    }

    fn fetch_hourly_forecast(
        &self,
        lat: f64,
        lon: f64,
    ) -> Result<ProviderHourlyForecast, ProviderError> {
        open_meteo::fetch_hourly_forecast(&self.client, lat, lon)
    }

    fn fetch_current_conditions(
        &self,
        lat: f64,
        lon: f64,
    ) -> Result<ProviderCurrentConditions, ProviderError> {
        open_meteo::fetch_current_conditions(&self.client, lat, lon)
    }

    fn fetch_location_snapshot(
        &self,
        lat: f64,
        lon: f64,
    ) -> Result<ProviderLocationSnapshot, ProviderError> {
        open_meteo::fetch_location_snapshot(&self.client, lat, lon)
    }
}

#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ProviderError {
    #[error("transport error: {0}")]
    Transport(String),
    #[error("http error ({status}): {message}")]
    Http { status: u16, message: String },
    #[error("invalid provider response: {0}")]
    InvalidResponse(String),
    #[error("location not found: {0}")]
    NotFound(String),
}
