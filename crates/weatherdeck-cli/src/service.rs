use std::time::Duration;

use chrono::{DateTime, SecondsFormat, Utc};

use crate::config::{HOURLY_CARD_COUNT, MIN_SUGGESTION_QUERY_LEN, RuntimeConfig, SUGGESTION_COUNT};
use crate::error::AppError;
use crate::geocoding::{ResolvedLocation, coordinate_label};
use crate::model::{
    CurrentConditions, CurrentConditionsOutput, DAILY_FORECAST_DAYS, DailyForecastOutput,
    DailyPoint, HourlyForecastOutput, HourlyPoint, LocationQuery, clamp_forecast_days,
};
use crate::providers::{
    ProviderApi, ProviderCurrentConditions, ProviderDailyForecast, ProviderError,
    ProviderHourlyForecast, ProviderLocationSnapshot,
};
use crate::store::{self, LocationCard, SelectedCity};

const COORDINATE_CARD_NAME: &str = "Your Location";

pub fn run_daily<P: ProviderApi>(
    providers: &P,
    query: &LocationQuery,
) -> Result<DailyForecastOutput, AppError> {
    let location = resolve_location(providers, query)?;
    let forecast = providers
        .fetch_daily_forecast(location.latitude, location.longitude, DAILY_FORECAST_DAYS)
        .map_err(map_forecast_error)?;
    Ok(build_daily_output(&location, forecast, DAILY_FORECAST_DAYS))
}

pub fn run_weekly<P: ProviderApi>(
    providers: &P,
    query: &LocationQuery,
    raw_days: &str,
) -> Result<DailyForecastOutput, AppError> {
    let days = clamp_forecast_days(raw_days);
    let location = resolve_location(providers, query)?;
    let forecast = providers
        .fetch_daily_forecast(location.latitude, location.longitude, days)
        .map_err(map_forecast_error)?;
    Ok(build_daily_output(&location, forecast, days))
}

pub fn run_hourly<P: ProviderApi>(
    providers: &P,
    query: &LocationQuery,
) -> Result<HourlyForecastOutput, AppError> {
    let location = resolve_location(providers, query)?;
    let forecast = providers
        .fetch_hourly_forecast(location.latitude, location.longitude)
        .map_err(map_forecast_error)?;

    let ProviderHourlyForecast { timezone, hours } = forecast;
    Ok(HourlyForecastOutput {
        location: location.to_output_location(),
        timezone,
        hours: hours
            .into_iter()
            .take(HOURLY_CARD_COUNT)
            .map(|hour| HourlyPoint {
                datetime: hour.datetime,
                weather_code: hour.weather_code,
                temp_c: round1(hour.temp_c),
            })
            .collect(),
    })
}

pub fn run_current<P: ProviderApi>(
    config: &RuntimeConfig,
    providers: &P,
    query: Option<&LocationQuery>,
) -> Result<CurrentConditionsOutput, AppError> {
    let location = resolve_current_target(config, providers, query)?;
    fetch_current_output(providers, &location)
}

/// Periodic refresh of the current-conditions view: resolve once, then
/// fetch and emit on every tick using the resolved coordinates. A failing
/// tick is reported through `on_tick` and the loop keeps going.
pub fn run_watch<P, S, F>(
    config: &RuntimeConfig,
    providers: &P,
    query: Option<&LocationQuery>,
    max_ticks: Option<usize>,
    mut sleep_fn: S,
    mut on_tick: F,
) -> Result<(), AppError>
where
    P: ProviderApi,
    S: FnMut(Duration),
    F: FnMut(Result<CurrentConditionsOutput, AppError>),
{
    let location = resolve_current_target(config, providers, query)?;

    let mut tick = 0usize;
    loop {
        on_tick(fetch_current_output(providers, &location));

        tick += 1;
        if let Some(max) = max_ticks
            && tick >= max
        {
            return Ok(());
        }
        sleep_fn(Duration::from_secs(config.refresh_secs));
    }
}

pub fn add_location<P, N>(
    config: &RuntimeConfig,
    providers: &P,
    now_fn: N,
    query: &LocationQuery,
) -> Result<(Vec<LocationCard>, LocationCard), AppError>
where
    P: ProviderApi,
    N: Fn() -> DateTime<Utc>,
{
    let (location, current_location) = match query {
        LocationQuery::City(city) => {
            let location = providers.geocode_city(city).map_err(map_geocode_error)?;
            persist_selected_city(config, &location)?;
            (location, false)
        }
        LocationQuery::Coordinates { lat, lon } => (
            ResolvedLocation {
                name: COORDINATE_CARD_NAME.to_string(),
                country: String::new(),
                latitude: *lat,
                longitude: *lon,
            },
            true,
        ),
    };

    let snapshot = providers
        .fetch_location_snapshot(location.latitude, location.longitude)
        .map_err(map_forecast_error)?;
    let card = build_location_card(
        &location,
        snapshot,
        current_location,
        now_fn().to_rfc3339_opts(SecondsFormat::Secs, true),
    );

    let path = store::locations_path(&config.store_dir);
    let board = store::load_board(&path).map_err(runtime_io)?;
    let board = store::place_card(board, card.clone());
    store::save_board(&path, &board).map_err(runtime_io)?;

    Ok((board, card))
}

pub fn remove_location(
    config: &RuntimeConfig,
    position: usize,
) -> Result<Vec<LocationCard>, AppError> {
    let path = store::locations_path(&config.store_dir);
    let board = store::load_board(&path).map_err(runtime_io)?;
    let board =
        store::remove_position(board, position).map_err(|error| AppError::user(error.to_string()))?;
    store::save_board(&path, &board).map_err(runtime_io)?;
    Ok(board)
}

pub fn show_board(config: &RuntimeConfig) -> Result<Vec<LocationCard>, AppError> {
    store::load_board(&store::locations_path(&config.store_dir)).map_err(runtime_io)
}

pub fn suggest_cities<P: ProviderApi>(
    providers: &P,
    query: &str,
) -> Result<Vec<ResolvedLocation>, AppError> {
    let trimmed = query.trim();
    if trimmed.chars().count() < MIN_SUGGESTION_QUERY_LEN {
        return Ok(Vec::new());
    }

    providers
        .suggest_cities(trimmed, SUGGESTION_COUNT)
        .map_err(|error| match error {
            ProviderError::NotFound(_) => AppError::user(error.to_string()),
            other => AppError::runtime(format!("unable to load city suggestions: {other}")),
        })
}

fn resolve_location<P: ProviderApi>(
    providers: &P,
    query: &LocationQuery,
) -> Result<ResolvedLocation, AppError> {
    match query {
        LocationQuery::City(city) => providers.geocode_city(city).map_err(map_geocode_error),
        LocationQuery::Coordinates { lat, lon } => Ok(coordinate_location(*lat, *lon)),
    }
}

/// Current view target: explicit input wins, then the stored selected
/// city, then the configured default city. Only an explicit city search
/// overwrites the stored selection.
fn resolve_current_target<P: ProviderApi>(
    config: &RuntimeConfig,
    providers: &P,
    query: Option<&LocationQuery>,
) -> Result<ResolvedLocation, AppError> {
    match query {
        Some(LocationQuery::City(city)) => {
            let location = providers.geocode_city(city).map_err(map_geocode_error)?;
            persist_selected_city(config, &location)?;
            Ok(location)
        }
        Some(LocationQuery::Coordinates { lat, lon }) => Ok(coordinate_location(*lat, *lon)),
        None => {
            let stored =
                store::load_selected_city(&store::selected_city_path(&config.store_dir))
                    .map_err(runtime_io)?;
            match stored {
                Some(city) => Ok(city.to_resolved()),
                None => providers
                    .geocode_city(&config.default_city)
                    .map_err(map_geocode_error),
            }
        }
    }
}

fn coordinate_location(lat: f64, lon: f64) -> ResolvedLocation {
    ResolvedLocation {
        name: coordinate_label(lat, lon),
        country: String::new(),
        latitude: lat,
        longitude: lon,
    }
}

fn persist_selected_city(
    config: &RuntimeConfig,
    location: &ResolvedLocation,
) -> Result<(), AppError> {
    let path = store::selected_city_path(&config.store_dir);
    store::save_selected_city(&path, &SelectedCity::from(location)).map_err(runtime_io)
}

fn fetch_current_output<P: ProviderApi>(
    providers: &P,
    location: &ResolvedLocation,
) -> Result<CurrentConditionsOutput, AppError> {
    let conditions = providers
        .fetch_current_conditions(location.latitude, location.longitude)
        .map_err(map_forecast_error)?;

    let ProviderCurrentConditions {
        timezone,
        temperature_c,
        windspeed_kmh,
        wind_direction_deg,
        weather_code,
        is_day,
        observed_at,
        humidity_pct,
        sunrise,
        sunset,
    } = conditions;

    Ok(CurrentConditionsOutput {
        location: location.to_output_location(),
        timezone,
        current: CurrentConditions {
            temperature_c: round1(temperature_c),
            windspeed_kmh: round1(windspeed_kmh),
            wind_direction_deg,
            weather_code,
            is_day,
            observed_at,
            humidity_pct,
            sunrise,
            sunset,
        },
    })
}

fn build_daily_output(
    location: &ResolvedLocation,
    forecast: ProviderDailyForecast,
    requested_days: usize,
) -> DailyForecastOutput {
    let ProviderDailyForecast { timezone, days } = forecast;

    DailyForecastOutput {
        location: location.to_output_location(),
        timezone,
        requested_days,
        days: days
            .into_iter()
            .map(|day| DailyPoint {
                date: day.date,
                weather_code: day.weather_code,
                temp_min_c: round1(day.temp_min_c),
                temp_max_c: round1(day.temp_max_c),
            })
            .collect(),
    }
}

fn build_location_card(
    location: &ResolvedLocation,
    snapshot: ProviderLocationSnapshot,
    current_location: bool,
    updated_at: String,
) -> LocationCard {
    LocationCard {
        name: location.name.clone(),
        country: location.country.clone(),
        latitude: location.latitude,
        longitude: location.longitude,
        temperature_c: round1(snapshot.temperature_c),
        feels_like_c: round1(snapshot.temperature_c),
        high_c: round1(snapshot.high_c),
        low_c: round1(snapshot.low_c),
        wind_kmh: round1(snapshot.windspeed_kmh),
        humidity_pct: snapshot.humidity_pct,
        weather_code: snapshot.weather_code,
        sunrise: snapshot.sunrise,
        sunset: snapshot.sunset,
        updated_at,
        current_location,
    }
}

fn map_geocode_error(error: ProviderError) -> AppError {
    match error {
        ProviderError::NotFound(city) => AppError::user(format!("city not found: {city}")),
        other => AppError::runtime(format!("unable to resolve city: {other}")),
    }
}

fn map_forecast_error(error: ProviderError) -> AppError {
    match error {
        ProviderError::InvalidResponse(message) => {
            AppError::runtime(format!("invalid forecast data: {message}"))
        }
        other => AppError::runtime(format!("failed to fetch forecast: {other}")),
    }
}

fn runtime_io(error: std::io::Error) -> AppError {
    AppError::runtime(error.to_string())
}

fn round1(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}
