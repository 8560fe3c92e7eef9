use std::collections::HashMap;
use std::path::PathBuf;

pub const STORE_DIR_ENV: &str = "WEATHERDECK_STORE_DIR";
pub const REFRESH_SECS_ENV: &str = "WEATHERDECK_REFRESH_SECS";
pub const DEFAULT_CITY_ENV: &str = "WEATHERDECK_DEFAULT_CITY";
const HOME_ENV: &str = "HOME";

pub const PROVIDER_TIMEOUT_SECS: u64 = 3;
pub const DEFAULT_REFRESH_SECS: u64 = 600;
pub const DEFAULT_CITY: &str = "Pristina";
pub const HOURLY_CARD_COUNT: usize = 24;
pub const SUGGESTION_COUNT: u8 = 6;
pub const MIN_SUGGESTION_QUERY_LEN: usize = 2;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RuntimeConfig {
    pub store_dir: PathBuf,
    pub refresh_secs: u64,
    pub default_city: String,
}

impl RuntimeConfig {
    pub fn from_env() -> Self {
        Self::from_pairs(std::env::vars())
    }

    pub fn from_pairs<I, K, V>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        let map: HashMap<String, String> = pairs
            .into_iter()
            .map(|(k, v)| (k.into(), v.into()))
            .collect();
        Self {
            store_dir: resolve_store_dir(&map),
            refresh_secs: resolve_refresh_secs(&map),
            default_city: resolve_default_city(&map),
        }
    }
}

fn resolve_store_dir(env_map: &HashMap<String, String>) -> PathBuf {
    let home = env_map.get(HOME_ENV).map(String::as_str);
    env_map
        .get(STORE_DIR_ENV)
        .map(String::as_str)
        .map(str::trim)
        .filter(|value| !value.is_empty())
        .map(|value| expand_home_path(value, home))
        .map(PathBuf::from)
        .unwrap_or_else(|| std::env::temp_dir().join("weatherdeck-cli"))
}

fn expand_home_path(raw: &str, home: Option<&str>) -> String {
    let trimmed = raw.trim();
    let Some(home) = home.map(str::trim).filter(|value| !value.is_empty()) else {
        return trimmed.to_string();
    };

    let home = home.trim_end_matches('/');
    let mut expanded = trimmed.replace("$HOME", home);

    if expanded == "~" {
        expanded = home.to_string();
    } else if let Some(rest) = expanded.strip_prefix("~/") {
        expanded = format!("{home}/{rest}");
    }

    expanded
}

fn resolve_refresh_secs(env_map: &HashMap<String, String>) -> u64 {
    env_map
        .get(REFRESH_SECS_ENV)
        .map(String::as_str)
        .map(str::trim)
        .filter(|value| !value.is_empty())
        .and_then(|value| value.parse::<u64>().ok())
        .filter(|value| *value > 0)
        .unwrap_or(DEFAULT_REFRESH_SECS)
}

fn resolve_default_city(env_map: &HashMap<String, String>) -> String {
    env_map
        .get(DEFAULT_CITY_ENV)
        .map(String::as_str)
        .map(str::trim)
        .filter(|value| !value.is_empty())
        .map(ToOwned::to_owned)
        .unwrap_or_else(|| DEFAULT_CITY.to_string())
}
