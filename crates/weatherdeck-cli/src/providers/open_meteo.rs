use reqwest::blocking::{Client, RequestBuilder};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::geocoding::ResolvedLocation;

use super::{
    ProviderCurrentConditions, ProviderDailyForecast, ProviderDailyPoint, ProviderError,
    ProviderHourlyForecast, ProviderHourlyPoint, ProviderLocationSnapshot,
};

const GEOCODE_ENDPOINT: &str = "https://geocoding-api.open-meteo.com/v1/search";
const FORECAST_ENDPOINT: &str = "https://api.open-meteo.com/v1/forecast";

const DAILY_FIELDS: &str = "temperature_2m_max,temperature_2m_min,weather_code";
const HOURLY_FIELDS: &str = "temperature_2m,weather_code";
const HUMIDITY_FIELD: &str = "relative_humidity_2m";
const SUN_FIELDS: &str = "sunrise,sunset";
const SNAPSHOT_DAILY_FIELDS: &str = "temperature_2m_max,temperature_2m_min,sunrise,sunset";

#[derive(Debug, Serialize)]
struct GeocodeQuery<'a> {
    name: &'a str,
    count: u8,
    language: &'a str,
    format: &'a str,
}

#[derive(Debug, Deserialize)]
struct GeocodeResponse {
    #[serde(default)]
    results: Vec<GeocodeResult>,
}

#[derive(Debug, Deserialize)]
struct GeocodeResult {
    name: String,
    #[serde(default)]
    country: Option<String>,
    latitude: f64,
    longitude: f64,
}

#[derive(Debug, Serialize)]
struct DailyQuery<'a> {
    latitude: f64,
    longitude: f64,
    timezone: &'a str,
    forecast_days: usize,
    daily: &'a str,
}

#[derive(Debug, Serialize)]
struct HourlyQuery<'a> {
    latitude: f64,
    longitude: f64,
    timezone: &'a str,
    hourly: &'a str,
}

#[derive(Debug, Serialize)]
struct CurrentQuery<'a> {
    latitude: f64,
    longitude: f64,
    timezone: &'a str,
    current_weather: bool,
    hourly: &'a str,
    daily: &'a str,
}

#[derive(Debug, Deserialize)]
struct DailyResponse {
    timezone: Option<String>,
    daily: Option<DailyBlock>,
}

#[derive(Debug, Deserialize)]
struct DailyBlock {
    #[serde(default)]
    time: Vec<String>,
    #[serde(default)]
    weather_code: Vec<i32>,
    #[serde(default)]
    temperature_2m_max: Vec<f64>,
    #[serde(default)]
    temperature_2m_min: Vec<f64>,
}

#[derive(Debug, Deserialize)]
struct HourlyResponse {
    timezone: Option<String>,
    hourly: Option<HourlyBlock>,
}

#[derive(Debug, Deserialize)]
struct HourlyBlock {
    #[serde(default)]
    time: Vec<String>,
    #[serde(default)]
    weather_code: Vec<i32>,
    #[serde(default)]
    temperature_2m: Vec<f64>,
}

#[derive(Debug, Deserialize)]
struct CurrentResponse {
    timezone: Option<String>,
    current_weather: Option<CurrentWeatherBlock>,
    hourly: Option<HumidityBlock>,
    daily: Option<SunBlock>,
}

#[derive(Debug, Deserialize)]
struct CurrentWeatherBlock {
    temperature: f64,
    windspeed: f64,
    #[serde(default)]
    winddirection: Option<f64>,
    weathercode: i32,
    #[serde(default)]
    is_day: Option<i32>,
    time: String,
}

#[derive(Debug, Deserialize)]
struct HumidityBlock {
    #[serde(default)]
    relative_humidity_2m: Vec<Option<f64>>,
}

#[derive(Debug, Deserialize)]
struct SunBlock {
    #[serde(default)]
    sunrise: Vec<String>,
    #[serde(default)]
    sunset: Vec<String>,
}

#[derive(Debug, Deserialize)]
struct SnapshotResponse {
    timezone: Option<String>,
    current_weather: Option<CurrentWeatherBlock>,
    hourly: Option<HumidityBlock>,
    daily: Option<SnapshotDailyBlock>,
}

#[derive(Debug, Deserialize)]
struct SnapshotDailyBlock {
    #[serde(default)]
    temperature_2m_max: Vec<f64>,
    #[serde(default)]
    temperature_2m_min: Vec<f64>,
    #[serde(default)]
    sunrise: Vec<String>,
    #[serde(default)]
    sunset: Vec<String>,
}

pub fn fetch_geocode(client: &Client, city: &str) -> Result<ResolvedLocation, ProviderError> {
    let query = GeocodeQuery {
        name: city,
        count: 1,
        language: "en",
        format: "json",
    };

    let body = execute_request(client.get(GEOCODE_ENDPOINT).query(&query))?;
    parse_geocode_response(&body, city)
}

pub fn fetch_suggestions(
    client: &Client,
    query: &str,
    limit: u8,
) -> Result<Vec<ResolvedLocation>, ProviderError> {
    let query = GeocodeQuery {
        name: query,
        count: limit,
        language: "en",
        format: "json",
    };

    let body = execute_request(client.get(GEOCODE_ENDPOINT).query(&query))?;
    parse_suggestions_response(&body)
}

pub fn fetch_daily_forecast(
    client: &Client,
    lat: f64,
    lon: f64,
    forecast_days: usize,
) -> Result<ProviderDailyForecast, ProviderError> {
    let query = DailyQuery {
        latitude: lat,
        longitude: lon,
        timezone: "auto",
        forecast_days,
        daily: DAILY_FIELDS,
    };

    let body = execute_request(client.get(FORECAST_ENDPOINT).query(&query))?;
    parse_daily_response(&body)
}

pub fn fetch_hourly_forecast(
    client: &Client,
    lat: f64,
    lon: f64,
) -> Result<ProviderHourlyForecast, ProviderError> {
    let query = HourlyQuery {
        latitude: lat,
        longitude: lon,
        timezone: "auto",
        hourly: HOURLY_FIELDS,
    };

    let body = execute_request(client.get(FORECAST_ENDPOINT).query(&query))?;
    parse_hourly_response(&body)
}

pub fn fetch_current_conditions(
    client: &Client,
    lat: f64,
    lon: f64,
) -> Result<ProviderCurrentConditions, ProviderError> {
    let query = CurrentQuery {
        latitude: lat,
        longitude: lon,
        timezone: "auto",
        current_weather: true,
        hourly: HUMIDITY_FIELD,
        daily: SUN_FIELDS,
    };

    let body = execute_request(client.get(FORECAST_ENDPOINT).query(&query))?;
    parse_current_response(&body)
}

pub fn fetch_location_snapshot(
    client: &Client,
    lat: f64,
    lon: f64,
) -> Result<ProviderLocationSnapshot, ProviderError> {
    let query = CurrentQuery {
        latitude: lat,
        longitude: lon,
        timezone: "auto",
        current_weather: true,
        hourly: HUMIDITY_FIELD,
        daily: SNAPSHOT_DAILY_FIELDS,
    };

    let body = execute_request(client.get(FORECAST_ENDPOINT).query(&query))?;
    parse_snapshot_response(&body)
}

fn execute_request(request: RequestBuilder) -> Result<String, ProviderError> {
    let response = request
        .send()
        .map_err(|error| ProviderError::Transport(error.to_string()))?;
    let status = response.status();
    let body = response
        .text()
        .map_err(|error| ProviderError::Transport(error.to_string()))?;

    if status.is_success() {
        return Ok(body);
    }

    let message = extract_error_message(&body).unwrap_or_else(|| {
        status
            .canonical_reason()
            .unwrap_or("request failed")
            .to_string()
    });

    Err(ProviderError::Http {
        status: status.as_u16(),
        message,
    })
}

fn parse_geocode_response(body: &str, city: &str) -> Result<ResolvedLocation, ProviderError> {
    let payload: GeocodeResponse = serde_json::from_str(body)
        .map_err(|error| ProviderError::InvalidResponse(format!("geocode payload: {error}")))?;

    let Some(result) = payload.results.into_iter().next() else {
        return Err(ProviderError::NotFound(city.to_string()));
    };

    resolved_from_result(result)
}

fn parse_suggestions_response(body: &str) -> Result<Vec<ResolvedLocation>, ProviderError> {
    let payload: GeocodeResponse = serde_json::from_str(body)
        .map_err(|error| ProviderError::InvalidResponse(format!("geocode payload: {error}")))?;

    payload
        .results
        .into_iter()
        .map(resolved_from_result)
        .collect()
}

fn resolved_from_result(result: GeocodeResult) -> Result<ResolvedLocation, ProviderError> {
    if result.name.trim().is_empty() {
        return Err(ProviderError::InvalidResponse(
            "geocode payload: empty location name".to_string(),
        ));
    }

    Ok(ResolvedLocation {
        name: result.name,
        country: result.country.unwrap_or_default(),
        latitude: result.latitude,
        longitude: result.longitude,
    })
}

fn parse_daily_response(body: &str) -> Result<ProviderDailyForecast, ProviderError> {
    let payload: DailyResponse = serde_json::from_str(body)
        .map_err(|error| ProviderError::InvalidResponse(format!("forecast payload: {error}")))?;

    let daily = payload
        .daily
        .ok_or_else(|| ProviderError::InvalidResponse("forecast payload: missing daily".into()))?;

    let length = daily.time.len();
    if daily.weather_code.len() != length
        || daily.temperature_2m_max.len() != length
        || daily.temperature_2m_min.len() != length
    {
        return Err(ProviderError::InvalidResponse(
            "forecast payload: daily arrays length mismatch".to_string(),
        ));
    }

    let mut days = Vec::with_capacity(length);
    for index in 0..length {
        let date = daily.time[index].trim().to_string();
        if date.is_empty() {
            return Err(ProviderError::InvalidResponse(
                "forecast payload: empty date in daily.time".to_string(),
            ));
        }

        days.push(ProviderDailyPoint {
            date,
            weather_code: daily.weather_code[index],
            temp_max_c: daily.temperature_2m_max[index],
            temp_min_c: daily.temperature_2m_min[index],
        });
    }

    Ok(ProviderDailyForecast {
        timezone: normalize_timezone(payload.timezone),
        days,
    })
}

fn parse_hourly_response(body: &str) -> Result<ProviderHourlyForecast, ProviderError> {
    let payload: HourlyResponse = serde_json::from_str(body)
        .map_err(|error| ProviderError::InvalidResponse(format!("forecast payload: {error}")))?;

    let hourly = payload
        .hourly
        .ok_or_else(|| ProviderError::InvalidResponse("forecast payload: missing hourly".into()))?;

    let length = hourly.time.len();
    if hourly.weather_code.len() != length || hourly.temperature_2m.len() != length {
        return Err(ProviderError::InvalidResponse(
            "forecast payload: hourly arrays length mismatch".to_string(),
        ));
    }

    let hours = (0..length)
        .map(|index| ProviderHourlyPoint {
            datetime: hourly.time[index].clone(),
            weather_code: hourly.weather_code[index],
            temp_c: hourly.temperature_2m[index],
        })
        .collect();

    Ok(ProviderHourlyForecast {
        timezone: normalize_timezone(payload.timezone),
        hours,
    })
}

fn parse_current_response(body: &str) -> Result<ProviderCurrentConditions, ProviderError> {
    let payload: CurrentResponse = serde_json::from_str(body)
        .map_err(|error| ProviderError::InvalidResponse(format!("forecast payload: {error}")))?;

    let current = payload.current_weather.ok_or_else(|| {
        ProviderError::InvalidResponse("forecast payload: missing current_weather".into())
    })?;

    let humidity_pct = payload
        .hourly
        .and_then(|block| block.relative_humidity_2m.into_iter().next())
        .flatten();
    let (sunrise, sunset) = payload
        .daily
        .map(|block| {
            (
                block.sunrise.into_iter().next(),
                block.sunset.into_iter().next(),
            )
        })
        .unwrap_or((None, None));

    Ok(ProviderCurrentConditions {
        timezone: normalize_timezone(payload.timezone),
        temperature_c: current.temperature,
        windspeed_kmh: current.windspeed,
        wind_direction_deg: current.winddirection.unwrap_or(0.0),
        weather_code: current.weathercode,
        is_day: current.is_day.unwrap_or(1) == 1,
        observed_at: current.time,
        humidity_pct,
        sunrise,
        sunset,
    })
}

fn parse_snapshot_response(body: &str) -> Result<ProviderLocationSnapshot, ProviderError> {
    let payload: SnapshotResponse = serde_json::from_str(body)
        .map_err(|error| ProviderError::InvalidResponse(format!("forecast payload: {error}")))?;

    let current = payload.current_weather.ok_or_else(|| {
        ProviderError::InvalidResponse("forecast payload: missing current_weather".into())
    })?;
    let daily = payload
        .daily
        .ok_or_else(|| ProviderError::InvalidResponse("forecast payload: missing daily".into()))?;

    let high_c = *daily.temperature_2m_max.first().ok_or_else(|| {
        ProviderError::InvalidResponse("forecast payload: empty daily temperature arrays".into())
    })?;
    let low_c = *daily.temperature_2m_min.first().ok_or_else(|| {
        ProviderError::InvalidResponse("forecast payload: empty daily temperature arrays".into())
    })?;
    let sunrise = daily.sunrise.into_iter().next().ok_or_else(|| {
        ProviderError::InvalidResponse("forecast payload: missing sunrise/sunset".into())
    })?;
    let sunset = daily.sunset.into_iter().next().ok_or_else(|| {
        ProviderError::InvalidResponse("forecast payload: missing sunrise/sunset".into())
    })?;

    let humidity_pct = payload
        .hourly
        .and_then(|block| block.relative_humidity_2m.into_iter().next())
        .flatten();

    Ok(ProviderLocationSnapshot {
        timezone: normalize_timezone(payload.timezone),
        temperature_c: current.temperature,
        windspeed_kmh: current.windspeed,
        weather_code: current.weathercode,
        humidity_pct,
        high_c,
        low_c,
        sunrise,
        sunset,
    })
}

fn normalize_timezone(raw: Option<String>) -> String {
    raw.map(|value| value.trim().to_string())
        .filter(|value| !value.is_empty())
        .unwrap_or_else(|| "UTC".to_string())
}

fn extract_error_message(body: &str) -> Option<String> {
    let trimmed = body.trim();
    if trimmed.is_empty() {
        return None;
    }

    let from_json = serde_json::from_str::<Value>(trimmed)
        .ok()
        .and_then(|json| {
            for key in ["reason", "message", "error", "detail", "description"] {
                if let Some(value) = json.get(key).and_then(Value::as_str) {
                    let message = value.trim();
                    if !message.is_empty() {
                        return Some(message.to_string());
                    }
                }
            }
            None
        });

    from_json.or_else(|| Some(trimmed.to_string()))
}
