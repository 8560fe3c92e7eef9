use chrono::{DateTime, Utc};
use clap::{Args, Parser, Subcommand, ValueEnum};
use serde_json::json;

use weatherdeck_cli::{
    config::RuntimeConfig,
    display::{self, DisplayOptions},
    error::AppError,
    model::{
        CurrentConditionsOutput, DailyForecastOutput, HourlyForecastOutput, LocationQuery,
        ThemePreference, UnitPreference,
    },
    providers::{HttpProviders, ProviderApi},
    render, service,
    store::LocationCard,
};

#[derive(Debug, Parser)]
#[command(author, version, about = "Weather dashboard CLI (free no-token APIs)")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Current conditions for a city, coordinates, or the saved city.
    Current {
        #[command(flatten)]
        location: LocationArgs,
        #[command(flatten)]
        display: DisplayArgs,
        /// Keep re-fetching on a fixed interval using the resolved
        /// coordinates.
        #[arg(long)]
        watch: bool,
    },
    /// 7-day forecast cards.
    Daily {
        #[command(flatten)]
        location: LocationArgs,
        #[command(flatten)]
        display: DisplayArgs,
    },
    /// Hourly cards for the next 24 hours.
    Hourly {
        #[command(flatten)]
        location: LocationArgs,
        #[command(flatten)]
        display: DisplayArgs,
    },
    /// Daily cards for a configurable day count (clamped to 1..=15).
    Weekly {
        #[command(flatten)]
        location: LocationArgs,
        #[command(flatten)]
        display: DisplayArgs,
        /// Number of forecast days.
        #[arg(long, default_value = "7")]
        days: String,
    },
    /// Manage the saved location board.
    Locations {
        #[command(subcommand)]
        command: LocationsCommands,
    },
}

#[derive(Debug, Subcommand)]
enum LocationsCommands {
    /// Resolve a location and add its card to the board.
    Add {
        #[command(flatten)]
        location: LocationArgs,
        #[command(flatten)]
        display: DisplayArgs,
    },
    /// Remove the board card at a 1-based position.
    Remove {
        position: usize,
        #[arg(long)]
        json: bool,
    },
    /// Re-render the saved cards without refetching.
    Show {
        #[command(flatten)]
        display: DisplayArgs,
    },
    /// Suggest up to six matching cities.
    Suggest {
        query: String,
        #[arg(long)]
        json: bool,
    },
}

#[derive(Debug, Args)]
struct LocationArgs {
    /// City name, resolved via geocoding.
    #[arg(long)]
    city: Option<String>,
    /// Latitude, paired with --lon.
    #[arg(long)]
    lat: Option<f64>,
    /// Longitude, paired with --lat.
    #[arg(long)]
    lon: Option<f64>,
}

#[derive(Debug, Args)]
struct DisplayArgs {
    /// Temperature unit for rendered cards.
    #[arg(long, value_enum, default_value = "celsius")]
    unit: UnitArg,
    /// Card frame theme.
    #[arg(long, value_enum, default_value = "light")]
    theme: ThemeArg,
    /// Emit a machine-readable JSON envelope instead of cards.
    #[arg(long)]
    json: bool,
}

impl DisplayArgs {
    fn options(&self) -> DisplayOptions {
        DisplayOptions {
            unit: self.unit.into(),
            theme: self.theme.into(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum UnitArg {
    #[value(alias = "c")]
    Celsius,
    #[value(alias = "f")]
    Fahrenheit,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum ThemeArg {
    Light,
    Dark,
}

impl From<UnitArg> for UnitPreference {
    fn from(value: UnitArg) -> Self {
        match value {
            UnitArg::Celsius => UnitPreference::Celsius,
            UnitArg::Fahrenheit => UnitPreference::Fahrenheit,
        }
    }
}

impl From<ThemeArg> for ThemePreference {
    fn from(value: ThemeArg) -> Self {
        match value {
            ThemeArg::Light => ThemePreference::Light,
            ThemeArg::Dark => ThemePreference::Dark,
        }
    }
}

const ENVELOPE_SCHEMA_VERSION: &str = "v1";
const ERROR_CODE_USER_INVALID_INPUT: &str = "user.invalid_input";
const ERROR_CODE_RUNTIME_PROVIDER_INIT: &str = "runtime.provider_init_failed";
const ERROR_CODE_RUNTIME_PROVIDER_FAILED: &str = "runtime.provider_failed";
const ERROR_CODE_RUNTIME_SERIALIZE: &str = "runtime.serialize_failed";

#[derive(Debug, Clone, PartialEq, Eq)]
struct CliError {
    kind: weatherdeck_cli::error::ErrorKind,
    code: &'static str,
    message: String,
}

impl CliError {
    fn user(code: &'static str, message: impl Into<String>) -> Self {
        Self {
            kind: weatherdeck_cli::error::ErrorKind::User,
            code,
            message: message.into(),
        }
    }

    fn runtime(code: &'static str, message: impl Into<String>) -> Self {
        Self {
            kind: weatherdeck_cli::error::ErrorKind::Runtime,
            code,
            message: message.into(),
        }
    }

    fn exit_code(&self) -> i32 {
        match self.kind {
            weatherdeck_cli::error::ErrorKind::User => 2,
            weatherdeck_cli::error::ErrorKind::Runtime => 1,
        }
    }
}

impl Cli {
    fn command_name(&self) -> &'static str {
        match &self.command {
            Commands::Current { .. } => "weather.current",
            Commands::Daily { .. } => "weather.daily",
            Commands::Hourly { .. } => "weather.hourly",
            Commands::Weekly { .. } => "weather.weekly",
            Commands::Locations { command } => match command {
                LocationsCommands::Add { .. } => "locations.add",
                LocationsCommands::Remove { .. } => "locations.remove",
                LocationsCommands::Show { .. } => "locations.show",
                LocationsCommands::Suggest { .. } => "locations.suggest",
            },
        }
    }

    fn json_hint(&self) -> bool {
        match &self.command {
            Commands::Current { display, .. }
            | Commands::Daily { display, .. }
            | Commands::Hourly { display, .. }
            | Commands::Weekly { display, .. } => display.json,
            Commands::Locations { command } => match command {
                LocationsCommands::Add { display, .. } | LocationsCommands::Show { display } => {
                    display.json
                }
                LocationsCommands::Remove { json, .. } | LocationsCommands::Suggest { json, .. } => {
                    *json
                }
            },
        }
    }
}

fn main() {
    let cli = Cli::parse();
    let command = cli.command_name();
    let json = cli.json_hint();
    match run(cli) {
        Ok(Some(output)) => println!("{output}"),
        Ok(None) => {}
        Err(error) => {
            emit_error(command, json, &error);
            std::process::exit(error.exit_code());
        }
    }
}

fn run(cli: Cli) -> Result<Option<String>, CliError> {
    let config = RuntimeConfig::from_env();
    let providers = HttpProviders::new()
        .map_err(|error| runtime_error(ERROR_CODE_RUNTIME_PROVIDER_INIT, error.to_string()))?;

    match cli.command {
        Commands::Current {
            location,
            display,
            watch: true,
        } => {
            run_watch_command(&config, &providers, &location, &display)?;
            Ok(None)
        }
        command => run_with(Cli { command }, &config, &providers, Utc::now).map(Some),
    }
}

fn run_with<P, N>(
    cli: Cli,
    config: &RuntimeConfig,
    providers: &P,
    now_fn: N,
) -> Result<String, CliError>
where
    P: ProviderApi,
    N: Fn() -> DateTime<Utc> + Copy,
{
    match cli.command {
        Commands::Current {
            location, display, ..
        } => {
            let query = optional_query(&location)?;
            let output = service::run_current(config, providers, query.as_ref())
                .map_err(map_app_error)?;
            if display.json {
                render_json_envelope("weather.current", &output)
            } else {
                Ok(render_current_human(&output, display.options()))
            }
        }
        Commands::Daily { location, display } => {
            let query = required_query(&location)?;
            let output = service::run_daily(providers, &query).map_err(map_app_error)?;
            if display.json {
                render_json_envelope("weather.daily", &output)
            } else {
                Ok(render_daily_human(&output, display.options()))
            }
        }
        Commands::Hourly { location, display } => {
            let query = required_query(&location)?;
            let output = service::run_hourly(providers, &query).map_err(map_app_error)?;
            if display.json {
                render_json_envelope("weather.hourly", &output)
            } else {
                Ok(render_hourly_human(&output, display.options()))
            }
        }
        Commands::Weekly {
            location,
            display,
            days,
        } => {
            let query = required_query(&location)?;
            let output =
                service::run_weekly(providers, &query, &days).map_err(map_app_error)?;
            if display.json {
                render_json_envelope("weather.weekly", &output)
            } else {
                Ok(render_daily_human(&output, display.options()))
            }
        }
        Commands::Locations { command } => match command {
            LocationsCommands::Add { location, display } => {
                let query = required_query(&location)?;
                let (board, card) = service::add_location(config, providers, now_fn, &query)
                    .map_err(map_app_error)?;
                if display.json {
                    render_json_envelope(
                        "locations.add",
                        &json!({ "added": card, "locations": board }),
                    )
                } else {
                    Ok(format!(
                        "Added {}.\n\n{}",
                        card_label(&card),
                        render_board_human(&board, display.options())
                    ))
                }
            }
            LocationsCommands::Remove { position, json } => {
                let board = service::remove_location(config, position).map_err(map_app_error)?;
                if json {
                    render_json_envelope(
                        "locations.remove",
                        &json!({ "removed_position": position, "locations": board }),
                    )
                } else {
                    Ok(format!(
                        "Removed the card at position {position}.\n\n{}",
                        render_board_human(&board, DisplayOptions::default())
                    ))
                }
            }
            LocationsCommands::Show { display } => {
                let board = service::show_board(config).map_err(map_app_error)?;
                if display.json {
                    render_json_envelope("locations.show", &json!({ "locations": board }))
                } else {
                    Ok(render_board_human(&board, display.options()))
                }
            }
            LocationsCommands::Suggest { query, json } => {
                let suggestions =
                    service::suggest_cities(providers, &query).map_err(map_app_error)?;
                if json {
                    let locations: Vec<_> = suggestions
                        .iter()
                        .map(|suggestion| suggestion.to_output_location())
                        .collect();
                    render_json_envelope(
                        "locations.suggest",
                        &json!({ "query": query, "suggestions": locations }),
                    )
                } else {
                    Ok(render::render_suggestions(&query, &suggestions))
                }
            }
        },
    }
}

fn run_watch_command(
    config: &RuntimeConfig,
    providers: &HttpProviders,
    location: &LocationArgs,
    display: &DisplayArgs,
) -> Result<(), CliError> {
    let query = optional_query(location)?;
    let options = display.options();
    let json = display.json;

    eprintln!(
        "Refreshing every {} seconds; press Ctrl-C to stop.",
        config.refresh_secs
    );

    service::run_watch(
        config,
        providers,
        query.as_ref(),
        None,
        std::thread::sleep,
        |result| match result {
            Ok(output) => {
                if json {
                    match render_json_envelope("weather.current", &output) {
                        Ok(line) => println!("{line}"),
                        Err(error) => emit_error("weather.current", true, &error),
                    }
                } else {
                    println!("{}", render_current_human(&output, options));
                }
            }
            Err(error) => eprintln!("warning: {}", error.message),
        },
    )
    .map_err(map_app_error)
}

fn optional_query(location: &LocationArgs) -> Result<Option<LocationQuery>, CliError> {
    LocationQuery::from_optional_args(location.city.as_deref(), location.lat, location.lon)
        .map_err(user_invalid_input)
}

fn required_query(location: &LocationArgs) -> Result<LocationQuery, CliError> {
    LocationQuery::from_args(location.city.as_deref(), location.lat, location.lon)
        .map_err(user_invalid_input)
}

fn render_current_human(output: &CurrentConditionsOutput, options: DisplayOptions) -> String {
    let label = render::location_label(&output.location);
    let card = display::current_card(&label, &output.current, options);
    render::render_view("Current conditions", &[card], options.theme)
}

fn render_daily_human(output: &DailyForecastOutput, options: DisplayOptions) -> String {
    let heading = format!(
        "{}-day forecast for {}",
        output.requested_days,
        render::location_label(&output.location)
    );
    render::render_view(
        &heading,
        &display::daily_cards(&output.days, options),
        options.theme,
    )
}

fn render_hourly_human(output: &HourlyForecastOutput, options: DisplayOptions) -> String {
    let heading = format!(
        "24-hour forecast for {}",
        render::location_label(&output.location)
    );
    render::render_view(
        &heading,
        &display::hourly_cards(&output.hours, options),
        options.theme,
    )
}

fn render_board_human(board: &[LocationCard], options: DisplayOptions) -> String {
    render::render_board(
        "Locations",
        &display::location_cards(board, options),
        options.theme,
    )
}

fn card_label(card: &LocationCard) -> String {
    if card.country.trim().is_empty() {
        card.name.clone()
    } else {
        format!("{}, {}", card.name, card.country)
    }
}

fn render_json_envelope<T: serde::Serialize>(
    command: &str,
    result: &T,
) -> Result<String, CliError> {
    let result = serde_json::to_value(result).map_err(|error| {
        runtime_error(
            ERROR_CODE_RUNTIME_SERIALIZE,
            format!("failed to serialize output: {error}"),
        )
    })?;
    serde_json::to_string(&json!({
        "schema_version": ENVELOPE_SCHEMA_VERSION,
        "command": command,
        "ok": true,
        "result": result,
    }))
    .map_err(|error| {
        runtime_error(
            ERROR_CODE_RUNTIME_SERIALIZE,
            format!("failed to serialize output envelope: {error}"),
        )
    })
}

fn emit_error(command: &str, json: bool, error: &CliError) {
    if json {
        let payload = json!({
            "schema_version": ENVELOPE_SCHEMA_VERSION,
            "command": command,
            "ok": false,
            "error": {
                "code": error.code,
                "message": error.message,
                "details": {
                    "kind": error_kind_label(error.kind),
                    "exit_code": error.exit_code(),
                }
            }
        });
        let rendered = serde_json::to_string(&payload).unwrap_or_else(|serialize_error| {
            format!(
                "{{\"schema_version\":\"{}\",\"command\":\"{}\",\"ok\":false,\"error\":{{\"code\":\"{}\",\"message\":\"{}\"}}}}",
                ENVELOPE_SCHEMA_VERSION,
                command,
                ERROR_CODE_RUNTIME_SERIALIZE,
                escape_json_string(&format!(
                    "failed to serialize error envelope: {serialize_error}"
                )),
            )
        });
        println!("{rendered}");
    } else {
        eprintln!("error[{}]: {}", error.code, error.message);
    }
}

fn user_invalid_input(error: weatherdeck_cli::model::ValidationError) -> CliError {
    CliError::user(ERROR_CODE_USER_INVALID_INPUT, error.to_string())
}

fn runtime_error(code: &'static str, message: impl Into<String>) -> CliError {
    CliError::runtime(code, message)
}

fn map_app_error(error: AppError) -> CliError {
    match error.kind {
        weatherdeck_cli::error::ErrorKind::User => {
            CliError::user(ERROR_CODE_USER_INVALID_INPUT, error.message)
        }
        weatherdeck_cli::error::ErrorKind::Runtime => {
            CliError::runtime(ERROR_CODE_RUNTIME_PROVIDER_FAILED, error.message)
        }
    }
}

fn error_kind_label(kind: weatherdeck_cli::error::ErrorKind) -> &'static str {
    match kind {
        weatherdeck_cli::error::ErrorKind::User => "user",
        weatherdeck_cli::error::ErrorKind::Runtime => "runtime",
    }
}

fn escape_json_string(raw: &str) -> String {
    let mut escaped = String::with_capacity(raw.len());
    for ch in raw.chars() {
        match ch {
            '"' => escaped.push_str("\\\""),
            '\\' => escaped.push_str("\\\\"),
            '\n' => escaped.push_str("\\n"),
            '\r' => escaped.push_str("\\r"),
            '\t' => escaped.push_str("\\t"),
            c if c < '\u{20}' => escaped.push_str(&format!("\\u{:04x}", c as u32)),
            c => escaped.push(c),
        }
    }
    escaped
}

#[cfg(test)]
mod tests {
    use chrono::TimeZone;
    use serde_json::Value;
    use std::cell::Cell;

    use super::*;
    use weatherdeck_cli::geocoding::ResolvedLocation;
    use weatherdeck_cli::providers::{
        ProviderCurrentConditions, ProviderDailyForecast, ProviderDailyPoint, ProviderError,
        ProviderHourlyForecast, ProviderHourlyPoint, ProviderLocationSnapshot,
    };

    struct FakeProviders {
        geocode_result: Result<ResolvedLocation, ProviderError>,
        daily_result: Result<(), ProviderError>,
        geocode_calls: Cell<usize>,
    }

    impl FakeProviders {
        fn ok() -> Self {
            Self {
                geocode_result: Ok(ResolvedLocation {
                    name: "Pristina".to_string(),
                    country: "Kosovo".to_string(),
                    latitude: 42.6629,
                    longitude: 21.1655,
                }),
                daily_result: Ok(()),
                geocode_calls: Cell::new(0),
            }
        }
    }

    impl ProviderApi for FakeProviders {
        fn geocode_city(&self, _city: &str) -> Result<ResolvedLocation, ProviderError> {
            self.geocode_calls.set(self.geocode_calls.get() + 1);
            self.geocode_result.clone()
        }

        fn suggest_cities(
            &self,
            _query: &str,
            _limit: u8,
        ) -> Result<Vec<ResolvedLocation>, ProviderError> {
            Ok(vec![
                ResolvedLocation {
                    name: "Paris".to_string(),
                    country: "France".to_string(),
                    latitude: 48.85,
                    longitude: 2.35,
                },
                ResolvedLocation {
                    name: "Paris".to_string(),
                    country: "United States".to_string(),
                    latitude: 33.66,
                    longitude: -95.55,
                },
            ])
        }

        fn fetch_daily_forecast(
            &self,
            _lat: f64,
            _lon: f64,
            forecast_days: usize,
        ) -> Result<ProviderDailyForecast, ProviderError> {
            self.daily_result.clone()?;
            Ok(ProviderDailyForecast {
                timezone: "Europe/Belgrade".to_string(),
                days: (0..forecast_days)
                    .map(|index| ProviderDailyPoint {
                        date: format!("2026-08-{:02}", index + 7),
                        weather_code: 2,
                        temp_min_c: 14.0 + index as f64,
                        temp_max_c: 20.0 + index as f64,
                    })
                    .collect(),
            })
        }

        fn fetch_hourly_forecast(
            &self,
            _lat: f64,
            _lon: f64,
        ) -> Result<ProviderHourlyForecast, ProviderError> {
            Ok(ProviderHourlyForecast {
                timezone: "Europe/Belgrade".to_string(),
                hours: (0..30)
                    .map(|hour| ProviderHourlyPoint {
                        datetime: format!("2026-08-07T{hour:02}:00"),
                        weather_code: 0,
                        temp_c: 17.0,
                    })
                    .collect(),
            })
        }

        fn fetch_current_conditions(
            &self,
            _lat: f64,
            _lon: f64,
        ) -> Result<ProviderCurrentConditions, ProviderError> {
            Ok(ProviderCurrentConditions {
                timezone: "Europe/Belgrade".to_string(),
                temperature_c: 24.6,
                windspeed_kmh: 11.2,
                wind_direction_deg: 93.0,
                weather_code: 1,
                is_day: true,
                observed_at: "2026-08-07T14:30".to_string(),
                humidity_pct: Some(55.0),
                sunrise: Some("2026-08-07T05:31".to_string()),
                sunset: Some("2026-08-07T19:58".to_string()),
            })
        }

        fn fetch_location_snapshot(
            &self,
            _lat: f64,
            _lon: f64,
        ) -> Result<ProviderLocationSnapshot, ProviderError> {
            Ok(ProviderLocationSnapshot {
                timezone: "Europe/Belgrade".to_string(),
                temperature_c: 24.6,
                windspeed_kmh: 11.2,
                weather_code: 3,
                humidity_pct: Some(62.0),
                high_c: 28.0,
                low_c: 16.4,
                sunrise: "2026-08-07T05:31".to_string(),
                sunset: "2026-08-07T19:58".to_string(),
            })
        }
    }

    fn config_in_tempdir() -> (tempfile::TempDir, RuntimeConfig) {
        let dir = tempfile::tempdir().expect("tempdir");
        let config = RuntimeConfig {
            store_dir: dir.path().to_path_buf(),
            refresh_secs: 600,
            default_city: "Pristina".to_string(),
        };
        (dir, config)
    }

    fn fixed_now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 8, 7, 14, 30, 0)
            .single()
            .expect("time")
    }

    #[test]
    fn main_outputs_current_json_contract() {
        let (_dir, config) = config_in_tempdir();
        let cli = Cli::parse_from([
            "weatherdeck-cli",
            "current",
            "--city",
            "Pristina",
            "--json",
        ]);

        let output =
            run_with(cli, &config, &FakeProviders::ok(), fixed_now).expect("current should pass");
        let json: Value = serde_json::from_str(&output).expect("json");

        assert_eq!(
            json.get("schema_version").and_then(Value::as_str),
            Some("v1")
        );
        assert_eq!(
            json.get("command").and_then(Value::as_str),
            Some("weather.current")
        );
        assert_eq!(json.get("ok").and_then(Value::as_bool), Some(true));
        assert_eq!(
            json.get("result")
                .and_then(|result| result.get("location"))
                .and_then(|location| location.get("name"))
                .and_then(Value::as_str),
            Some("Pristina")
        );
        assert_eq!(
            json.get("result")
                .and_then(|result| result.get("current"))
                .and_then(|current| current.get("temperature_c"))
                .and_then(Value::as_f64),
            Some(24.6)
        );
    }

    #[test]
    fn main_weekly_clamps_day_count_through_cli() {
        let (_dir, config) = config_in_tempdir();
        let cli = Cli::parse_from([
            "weatherdeck-cli",
            "weekly",
            "--city",
            "Pristina",
            "--days",
            "20",
            "--json",
        ]);

        let output =
            run_with(cli, &config, &FakeProviders::ok(), fixed_now).expect("weekly should pass");
        let json: Value = serde_json::from_str(&output).expect("json");

        assert_eq!(
            json.get("result")
                .and_then(|result| result.get("requested_days"))
                .and_then(Value::as_u64),
            Some(15)
        );
        assert_eq!(
            json.get("result")
                .and_then(|result| result.get("days"))
                .and_then(Value::as_array)
                .map(Vec::len),
            Some(15)
        );
    }

    #[test]
    fn main_maps_missing_location_to_user_error() {
        let (_dir, config) = config_in_tempdir();
        let cli = Cli::parse_from(["weatherdeck-cli", "daily"]);

        let err =
            run_with(cli, &config, &FakeProviders::ok(), fixed_now).expect_err("must fail");

        assert_eq!(err.kind, weatherdeck_cli::error::ErrorKind::User);
        assert_eq!(err.code, ERROR_CODE_USER_INVALID_INPUT);
        assert_eq!(err.exit_code(), 2);
    }

    #[test]
    fn main_maps_runtime_provider_failure() {
        let (_dir, config) = config_in_tempdir();
        let providers = FakeProviders {
            daily_result: Err(ProviderError::Transport("timeout".to_string())),
            ..FakeProviders::ok()
        };
        let cli = Cli::parse_from(["weatherdeck-cli", "daily", "--city", "Pristina"]);

        let err = run_with(cli, &config, &providers, fixed_now).expect_err("must fail");

        assert_eq!(err.kind, weatherdeck_cli::error::ErrorKind::Runtime);
        assert_eq!(err.code, ERROR_CODE_RUNTIME_PROVIDER_FAILED);
        assert_eq!(err.exit_code(), 1);
    }

    #[test]
    fn main_renders_current_card_in_text_mode() {
        let (_dir, config) = config_in_tempdir();
        let cli = Cli::parse_from(["weatherdeck-cli", "current", "--city", "Pristina"]);

        let output =
            run_with(cli, &config, &FakeProviders::ok(), fixed_now).expect("text mode");

        assert!(output.contains("Current conditions"));
        assert!(output.contains("Pristina, Kosovo"));
        assert!(output.contains("Mainly clear"));
        assert!(output.contains("25°C"));
        assert!(output.contains("Wind 11 km/h E"));
        assert!(output.contains("Sunrise 05:31 · Sunset 19:58"));
    }

    #[test]
    fn main_renders_fahrenheit_when_requested() {
        let (_dir, config) = config_in_tempdir();
        let cli = Cli::parse_from([
            "weatherdeck-cli",
            "current",
            "--city",
            "Pristina",
            "--unit",
            "fahrenheit",
        ]);

        let output =
            run_with(cli, &config, &FakeProviders::ok(), fixed_now).expect("text mode");

        assert!(output.contains("76.3°F"));
        assert!(!output.contains("°C"));
    }

    #[test]
    fn main_renders_twenty_four_hourly_cards() {
        let (_dir, config) = config_in_tempdir();
        let cli = Cli::parse_from(["weatherdeck-cli", "hourly", "--city", "Pristina"]);

        let output =
            run_with(cli, &config, &FakeProviders::ok(), fixed_now).expect("text mode");

        assert!(output.contains("24-hour forecast for Pristina, Kosovo"));
        assert!(output.contains("00:00"));
        assert!(output.contains("23:00"));
        assert!(!output.contains("24:00"));
    }

    #[test]
    fn main_locations_flow_add_show_remove() {
        let (_dir, config) = config_in_tempdir();
        let providers = FakeProviders::ok();

        let cli = Cli::parse_from([
            "weatherdeck-cli",
            "locations",
            "add",
            "--city",
            "Pristina",
        ]);
        let output = run_with(cli, &config, &providers, fixed_now).expect("add");
        assert!(output.contains("Added Pristina, Kosovo."));
        assert!(output.contains("1. Pristina, Kosovo"));
        assert!(output.contains("High 28°C · Low 16°C"));

        let cli = Cli::parse_from(["weatherdeck-cli", "locations", "show"]);
        let output = run_with(cli, &config, &providers, fixed_now).expect("show");
        assert!(output.contains("1. Pristina, Kosovo"));

        let cli = Cli::parse_from(["weatherdeck-cli", "locations", "show", "--unit", "f"]);
        let output = run_with(cli, &config, &providers, fixed_now).expect("show f");
        assert!(output.contains("High 82.4°F · Low 61.5°F"));

        let cli = Cli::parse_from(["weatherdeck-cli", "locations", "remove", "1"]);
        let output = run_with(cli, &config, &providers, fixed_now).expect("remove");
        assert!(output.contains(render::EMPTY_BOARD_MESSAGE));
    }

    #[test]
    fn main_locations_remove_out_of_range_is_user_error() {
        let (_dir, config) = config_in_tempdir();
        let cli = Cli::parse_from(["weatherdeck-cli", "locations", "remove", "3"]);

        let err =
            run_with(cli, &config, &FakeProviders::ok(), fixed_now).expect_err("must fail");

        assert_eq!(err.kind, weatherdeck_cli::error::ErrorKind::User);
    }

    #[test]
    fn main_locations_suggest_lists_matches() {
        let (_dir, config) = config_in_tempdir();
        let cli = Cli::parse_from(["weatherdeck-cli", "locations", "suggest", "par"]);

        let output =
            run_with(cli, &config, &FakeProviders::ok(), fixed_now).expect("suggest");

        assert!(output.contains("1. Paris, France"));
        assert!(output.contains("2. Paris, United States"));
    }

    #[test]
    fn main_help_flag_is_supported() {
        let help = Cli::try_parse_from(["weatherdeck-cli", "--help"]).expect_err("help");
        assert_eq!(help.kind(), clap::error::ErrorKind::DisplayHelp);
    }
}
