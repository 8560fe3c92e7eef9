use serde::{Deserialize, Serialize};
use thiserror::Error;

pub const MIN_FORECAST_DAYS: usize = 1;
pub const MAX_FORECAST_DAYS: usize = 15;
pub const DAILY_FORECAST_DAYS: usize = 7;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UnitPreference {
    #[default]
    Celsius,
    Fahrenheit,
}

impl UnitPreference {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Celsius => "celsius",
            Self::Fahrenheit => "fahrenheit",
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ThemePreference {
    #[default]
    Light,
    Dark,
}

#[derive(Debug, Clone, PartialEq)]
pub enum LocationQuery {
    City(String),
    Coordinates { lat: f64, lon: f64 },
}

impl LocationQuery {
    pub fn from_args(
        city: Option<&str>,
        lat: Option<f64>,
        lon: Option<f64>,
    ) -> Result<Self, ValidationError> {
        match Self::from_optional_args(city, lat, lon)? {
            Some(query) => Ok(query),
            None => Err(ValidationError::MissingLocationInput),
        }
    }

    /// Like `from_args`, but a fully absent location is not an error; the
    /// caller decides the fallback (stored city, configured default).
    pub fn from_optional_args(
        city: Option<&str>,
        lat: Option<f64>,
        lon: Option<f64>,
    ) -> Result<Option<Self>, ValidationError> {
        let has_city = city.is_some();
        let has_coords = lat.is_some() || lon.is_some();

        if has_city && has_coords {
            return Err(ValidationError::ConflictingLocationInput);
        }

        match (city, lat, lon) {
            (Some(raw_city), None, None) => {
                let city = normalize_city(raw_city)?;
                Ok(Some(LocationQuery::City(city)))
            }
            (None, Some(lat), Some(lon)) => {
                validate_coordinates(lat, lon)?;
                Ok(Some(LocationQuery::Coordinates { lat, lon }))
            }
            (None, None, None) => Ok(None),
            _ => Err(ValidationError::PartialCoordinates),
        }
    }
}

pub fn normalize_city(raw: &str) -> Result<String, ValidationError> {
    let value = raw.trim();
    if value.is_empty() {
        return Err(ValidationError::EmptyCity);
    }
    Ok(value.to_string())
}

pub fn validate_coordinates(lat: f64, lon: f64) -> Result<(), ValidationError> {
    if !((-90.0)..=90.0).contains(&lat) {
        return Err(ValidationError::InvalidLatitude(lat));
    }
    if !((-180.0)..=180.0).contains(&lon) {
        return Err(ValidationError::InvalidLongitude(lon));
    }
    Ok(())
}

/// Day-count handling for the weekly view: non-numeric input falls back to
/// the minimum, everything else is clamped to [1, 15].
pub fn clamp_forecast_days(raw: &str) -> usize {
    let parsed = raw
        .trim()
        .parse::<i64>()
        .unwrap_or(MIN_FORECAST_DAYS as i64);
    parsed.clamp(MIN_FORECAST_DAYS as i64, MAX_FORECAST_DAYS as i64) as usize
}

#[derive(Debug, Error, PartialEq)]
pub enum ValidationError {
    #[error("missing location input: use --city or --lat/--lon")]
    MissingLocationInput,
    #[error("partial coordinates: provide both --lat and --lon")]
    PartialCoordinates,
    #[error("conflicting location input: use either --city or --lat/--lon")]
    ConflictingLocationInput,
    #[error("city must not be empty")]
    EmptyCity,
    #[error("invalid latitude: {0}")]
    InvalidLatitude(f64),
    #[error("invalid longitude: {0}")]
    InvalidLongitude(f64),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DashboardLocation {
    pub name: String,
    pub country: String,
    pub latitude: f64,
    pub longitude: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DailyPoint {
    pub date: String,
    pub weather_code: i32,
    pub temp_min_c: f64,
    pub temp_max_c: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DailyForecastOutput {
    pub location: DashboardLocation,
    pub timezone: String,
    pub requested_days: usize,
    pub days: Vec<DailyPoint>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HourlyPoint {
    pub datetime: String,
    pub weather_code: i32,
    pub temp_c: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HourlyForecastOutput {
    pub location: DashboardLocation,
    pub timezone: String,
    pub hours: Vec<HourlyPoint>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CurrentConditions {
    pub temperature_c: f64,
    pub windspeed_kmh: f64,
    pub wind_direction_deg: f64,
    pub weather_code: i32,
    pub is_day: bool,
    pub observed_at: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub humidity_pct: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sunrise: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sunset: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CurrentConditionsOutput {
    pub location: DashboardLocation,
    pub timezone: String,
    pub current: CurrentConditions,
}
