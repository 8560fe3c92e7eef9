use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::geocoding::ResolvedLocation;

const SELECTED_CITY_FILE: &str = "selected-city.json";
const LOCATIONS_FILE: &str = "locations.json";

/// The single persisted "selected city" key, overwritten on each
/// successful manual search.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SelectedCity {
    pub name: String,
    pub country: String,
    pub latitude: f64,
    pub longitude: f64,
}

impl From<&ResolvedLocation> for SelectedCity {
    fn from(value: &ResolvedLocation) -> Self {
        Self {
            name: value.name.clone(),
            country: value.country.clone(),
            latitude: value.latitude,
            longitude: value.longitude,
        }
    }
}

impl SelectedCity {
    pub fn to_resolved(&self) -> ResolvedLocation {
        ResolvedLocation {
            name: self.name.clone(),
            country: self.country.clone(),
            latitude: self.latitude,
            longitude: self.longitude,
        }
    }
}

/// Retained backing data for one board entry. Temperatures stay in
/// Celsius; unit conversion happens at render time only.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LocationCard {
    pub name: String,
    pub country: String,
    pub latitude: f64,
    pub longitude: f64,
    pub temperature_c: f64,
    pub feels_like_c: f64,
    pub high_c: f64,
    pub low_c: f64,
    pub wind_kmh: f64,
    #[serde(default)]
    pub humidity_pct: Option<f64>,
    pub weather_code: i32,
    pub sunrise: String,
    pub sunset: String,
    pub updated_at: String,
    #[serde(default)]
    pub current_location: bool,
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum BoardError {
    #[error("no location at position {0}")]
    OutOfRange(usize),
    #[error("the current-location card cannot be removed")]
    CurrentLocation,
}

pub fn selected_city_path(store_dir: &Path) -> PathBuf {
    store_dir.join(SELECTED_CITY_FILE)
}

pub fn locations_path(store_dir: &Path) -> PathBuf {
    store_dir.join(LOCATIONS_FILE)
}

pub fn load_selected_city(path: &Path) -> io::Result<Option<SelectedCity>> {
    if !path.exists() {
        return Ok(None);
    }

    let payload = fs::read_to_string(path)?;
    let parsed = serde_json::from_str::<SelectedCity>(&payload).ok();
    Ok(parsed)
}

pub fn save_selected_city(path: &Path, city: &SelectedCity) -> io::Result<()> {
    let payload = serde_json::to_vec(city)
        .map_err(|error| io::Error::new(io::ErrorKind::InvalidData, error.to_string()))?;
    write_atomic(path, &payload)
}

pub fn load_board(path: &Path) -> io::Result<Vec<LocationCard>> {
    if !path.exists() {
        return Ok(Vec::new());
    }

    let payload = fs::read_to_string(path)?;
    let parsed = serde_json::from_str::<Vec<LocationCard>>(&payload).unwrap_or_default();
    Ok(parsed)
}

pub fn save_board(path: &Path, cards: &[LocationCard]) -> io::Result<()> {
    let payload = serde_json::to_vec(cards)
        .map_err(|error| io::Error::new(io::ErrorKind::InvalidData, error.to_string()))?;
    write_atomic(path, &payload)
}

/// City cards append without de-duplication. A current-location card
/// replaces the existing one in place instead of accumulating.
pub fn place_card(mut cards: Vec<LocationCard>, card: LocationCard) -> Vec<LocationCard> {
    if card.current_location
        && let Some(existing) = cards.iter_mut().find(|entry| entry.current_location)
    {
        *existing = card;
        return cards;
    }

    cards.push(card);
    cards
}

/// Removes the card at a 1-based position; the current-location card is
/// non-removable and every other card keeps its data and order.
pub fn remove_position(
    mut cards: Vec<LocationCard>,
    position: usize,
) -> Result<Vec<LocationCard>, BoardError> {
    if position == 0 || position > cards.len() {
        return Err(BoardError::OutOfRange(position));
    }

    if cards[position - 1].current_location {
        return Err(BoardError::CurrentLocation);
    }

    cards.remove(position - 1);
    Ok(cards)
}

fn write_atomic(path: &Path, bytes: &[u8]) -> io::Result<()> {
    let parent = path.parent().ok_or_else(|| {
        io::Error::new(
            io::ErrorKind::InvalidInput,
            "store path must have a parent directory",
        )
    })?;
    fs::create_dir_all(parent)?;

    let tmp_path = path.with_extension(format!("{}.tmp", std::process::id()));
    fs::write(&tmp_path, bytes)?;
    fs::rename(&tmp_path, path)?;
    Ok(())
}
