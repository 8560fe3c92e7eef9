use crate::config::HOURLY_CARD_COUNT;
use crate::model::{CurrentConditions, DailyPoint, HourlyPoint, ThemePreference, UnitPreference};
use crate::store::LocationCard;

pub const MISSING_VALUE: &str = "--";
pub const MISSING_TIME: &str = "--:--";

/// Explicit presentation configuration, passed into every mapper call so
/// formatting is deterministic.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DisplayOptions {
    pub unit: UnitPreference,
    pub theme: ThemePreference,
}

/// Display-ready record handed to the render sink: a title plus the card
/// body lines, already formatted in the active unit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DisplayCard {
    pub title: String,
    pub lines: Vec<String>,
}

/// Ranged glyph table used by the daily/hourly/weekly views; evaluated in
/// ascending order with a final catch-all.
pub fn glyph_for_code(code: i32) -> &'static str {
    if code == 0 {
        return "☀️";
    }
    if code <= 3 {
        return "⛅";
    }
    if code <= 48 {
        return "🌫️";
    }
    if code <= 67 {
        return "🌧️";
    }
    if code <= 86 {
        return "❄️";
    }
    "🌩️"
}

/// Exact glyph table used by the board and current-conditions views.
pub fn board_glyph_for_code(code: i32) -> &'static str {
    match code {
        0 => "☀️",
        1 => "🌤️",
        2 => "⛅",
        3 => "☁️",
        45 | 48 => "🌫️",
        51 => "🌦️",
        61 => "🌧️",
        71 => "❄️",
        80 => "🌧️",
        95 => "⛈️",
        _ => "🌡️",
    }
}

pub fn description_for_code(code: i32) -> &'static str {
    match code {
        0 => "Clear sky",
        1 => "Mainly clear",
        2 => "Partly cloudy",
        3 => "Overcast",
        45 => "Fog",
        48 => "Rime fog",
        51 => "Light drizzle",
        61 => "Rain",
        71 => "Snow",
        80 => "Rain showers",
        95 => "Thunderstorm",
        _ => "Unknown",
    }
}

pub fn conditions_glyph(code: i32, is_day: bool) -> &'static str {
    if code == 0 && !is_day {
        return "🌙";
    }
    board_glyph_for_code(code)
}

pub fn conditions_label(code: i32, is_day: bool) -> &'static str {
    if code == 0 && !is_day {
        return "Clear night";
    }
    description_for_code(code)
}

/// Celsius renders as a rounded integer; Fahrenheit converts via
/// F = C x 9/5 + 32 and keeps one decimal. The stored value is always
/// Celsius, so toggling back never compounds a conversion.
pub fn format_temperature(celsius: f64, unit: UnitPreference) -> String {
    match unit {
        UnitPreference::Celsius => format!("{}°C", celsius.round() as i64),
        UnitPreference::Fahrenheit => {
            let fahrenheit = celsius * 9.0 / 5.0 + 32.0;
            format!("{fahrenheit:.1}°F")
        }
    }
}

pub fn format_optional_temperature(celsius: Option<f64>, unit: UnitPreference) -> String {
    match celsius {
        Some(value) => format_temperature(value, unit),
        None => MISSING_VALUE.to_string(),
    }
}

pub fn format_humidity(humidity_pct: Option<f64>) -> String {
    match humidity_pct {
        Some(value) => format!("{}%", value.round() as i64),
        None => MISSING_VALUE.to_string(),
    }
}

/// The HH:MM portion after the literal "T" separator; a placeholder when
/// the separator is absent.
pub fn time_of_day(timestamp: &str) -> String {
    match timestamp.split_once('T') {
        Some((_, time)) => time.chars().take(5).collect(),
        None => MISSING_TIME.to_string(),
    }
}

/// "HH:00" label for an hourly slot timestamp.
pub fn hour_label(timestamp: &str) -> String {
    match timestamp.split_once('T') {
        Some((_, time)) if time.len() >= 2 => format!("{}:00", &time[..2]),
        _ => MISSING_TIME.to_string(),
    }
}

pub fn local_time_label(timestamp: &str) -> String {
    timestamp.replace('T', " ")
}

/// Degrees to an 8-point compass label.
pub fn wind_direction(degrees: f64) -> &'static str {
    const DIRECTIONS: [&str; 8] = ["N", "NE", "E", "SE", "S", "SW", "W", "NW"];
    let normalized = degrees.rem_euclid(360.0);
    DIRECTIONS[((normalized / 45.0).round() as usize) % 8]
}

pub fn temperature_band(celsius: f64) -> &'static str {
    if celsius >= 30.0 {
        "hot"
    } else if celsius >= 20.0 {
        "warm"
    } else if celsius >= 10.0 {
        "cool"
    } else {
        "cold"
    }
}

pub fn daily_cards(days: &[DailyPoint], options: DisplayOptions) -> Vec<DisplayCard> {
    days.iter()
        .map(|day| DisplayCard {
            title: day.date.clone(),
            lines: vec![format!(
                "{}  Max {} · Min {}",
                glyph_for_code(day.weather_code),
                format_temperature(day.temp_max_c, options.unit),
                format_temperature(day.temp_min_c, options.unit),
            )],
        })
        .collect()
}

/// One card per hour for exactly the first 24 entries, labeled
/// "00:00".."23:00"; shorter series render what they have.
pub fn hourly_cards(hours: &[HourlyPoint], options: DisplayOptions) -> Vec<DisplayCard> {
    hours
        .iter()
        .take(HOURLY_CARD_COUNT)
        .map(|hour| DisplayCard {
            title: hour_label(&hour.datetime),
            lines: vec![format!(
                "{}  {}",
                glyph_for_code(hour.weather_code),
                format_temperature(hour.temp_c, options.unit),
            )],
        })
        .collect()
}

pub fn current_card(
    location_label: &str,
    current: &CurrentConditions,
    options: DisplayOptions,
) -> DisplayCard {
    let temperature = format_temperature(current.temperature_c, options.unit);
    let mut lines = vec![
        format!(
            "{}  {}",
            conditions_glyph(current.weather_code, current.is_day),
            conditions_label(current.weather_code, current.is_day),
        ),
        format!(
            "Temperature {temperature} ({}) · Feels like {temperature}",
            temperature_band(current.temperature_c),
        ),
        format!(
            "Wind {} km/h {} · Humidity {}",
            current.windspeed_kmh.round() as i64,
            wind_direction(current.wind_direction_deg),
            format_humidity(current.humidity_pct),
        ),
    ];

    lines.push(format!(
        "Sunrise {} · Sunset {}",
        current
            .sunrise
            .as_deref()
            .map(time_of_day)
            .unwrap_or_else(|| MISSING_TIME.to_string()),
        current
            .sunset
            .as_deref()
            .map(time_of_day)
            .unwrap_or_else(|| MISSING_TIME.to_string()),
    ));
    lines.push(format!(
        "Local time {} · {}",
        local_time_label(&current.observed_at),
        if current.is_day { "Daytime" } else { "Nighttime" },
    ));

    DisplayCard {
        title: location_label.to_string(),
        lines,
    }
}

pub fn location_cards(cards: &[LocationCard], options: DisplayOptions) -> Vec<DisplayCard> {
    cards
        .iter()
        .map(|card| {
            let mut title = if card.country.trim().is_empty() {
                card.name.clone()
            } else {
                format!("{}, {}", card.name, card.country)
            };
            if card.current_location {
                title.push_str(" · CURRENT LOCATION");
            }

            DisplayCard {
                title,
                lines: vec![
                    format!(
                        "{}  {} {}",
                        board_glyph_for_code(card.weather_code),
                        format_temperature(card.temperature_c, options.unit),
                        description_for_code(card.weather_code),
                    ),
                    format!(
                        "High {} · Low {}",
                        format_temperature(card.high_c, options.unit),
                        format_temperature(card.low_c, options.unit),
                    ),
                    format!(
                        "Feels like {} · Wind {} km/h · Humidity {}",
                        format_temperature(card.feels_like_c, options.unit),
                        card.wind_kmh.round() as i64,
                        format_humidity(card.humidity_pct),
                    ),
                    format!(
                        "Sunrise {} · Sunset {}",
                        time_of_day(&card.sunrise),
                        time_of_day(&card.sunset),
                    ),
                    format!("Updated at {}", time_of_day(&card.updated_at)),
                ],
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_every_code_maps_to_a_glyph_in_both_tables() {
        for code in 0..=99 {
            assert!(!glyph_for_code(code).is_empty(), "ranged glyph for {code}");
            assert!(
                !board_glyph_for_code(code).is_empty(),
                "exact glyph for {code}"
            );
            assert!(
                !description_for_code(code).is_empty(),
                "description for {code}"
            );
        }
    }

    #[test]
    fn display_ranged_glyphs_follow_ascending_code_families() {
        assert_eq!(glyph_for_code(0), "☀️");
        assert_eq!(glyph_for_code(2), "⛅");
        assert_eq!(glyph_for_code(45), "🌫️");
        assert_eq!(glyph_for_code(61), "🌧️");
        assert_eq!(glyph_for_code(85), "❄️");
        assert_eq!(glyph_for_code(95), "🌩️");
    }

    #[test]
    fn display_exact_table_falls_back_for_unmapped_codes() {
        assert_eq!(board_glyph_for_code(53), "🌡️");
        assert_eq!(description_for_code(53), "Unknown");
    }

    #[test]
    fn display_clear_sky_varies_by_day_flag() {
        assert_eq!(conditions_glyph(0, true), "☀️");
        assert_eq!(conditions_glyph(0, false), "🌙");
        assert_eq!(conditions_label(0, false), "Clear night");
        assert_eq!(conditions_label(3, false), "Overcast");
    }

    #[test]
    fn display_celsius_rounds_to_integer() {
        assert_eq!(
            format_temperature(20.4, UnitPreference::Celsius),
            "20°C"
        );
        assert_eq!(
            format_temperature(-0.2, UnitPreference::Celsius),
            "0°C"
        );
        assert_eq!(
            format_optional_temperature(None, UnitPreference::Celsius),
            "--"
        );
    }

    #[test]
    fn display_fahrenheit_converts_with_one_decimal() {
        assert_eq!(
            format_temperature(0.0, UnitPreference::Fahrenheit),
            "32.0°F"
        );
        assert_eq!(
            format_temperature(20.0, UnitPreference::Fahrenheit),
            "68.0°F"
        );
    }

    #[test]
    fn display_unit_toggle_round_trip_restores_celsius_display() {
        let celsius_before = format_temperature(20.0, UnitPreference::Celsius);
        let _fahrenheit = format_temperature(20.0, UnitPreference::Fahrenheit);
        let celsius_after = format_temperature(20.0, UnitPreference::Celsius);

        assert_eq!(celsius_before, "20°C");
        assert_eq!(celsius_before, celsius_after);
    }

    #[test]
    fn display_time_of_day_extracts_after_separator() {
        assert_eq!(time_of_day("2026-08-07T05:31"), "05:31");
        assert_eq!(time_of_day("2026-08-07T05:31:22"), "05:31");
        assert_eq!(time_of_day("no-separator"), "--:--");
    }

    #[test]
    fn display_hour_label_builds_full_hours() {
        assert_eq!(hour_label("2026-08-07T09:00"), "09:00");
        assert_eq!(hour_label("2026-08-07T23:45"), "23:00");
        assert_eq!(hour_label("broken"), "--:--");
    }

    #[test]
    fn display_wind_direction_uses_eight_points() {
        assert_eq!(wind_direction(0.0), "N");
        assert_eq!(wind_direction(93.0), "E");
        assert_eq!(wind_direction(225.0), "SW");
        assert_eq!(wind_direction(359.0), "N");
        assert_eq!(wind_direction(-45.0), "NW");
    }

    #[test]
    fn display_temperature_band_covers_all_ranges() {
        assert_eq!(temperature_band(31.0), "hot");
        assert_eq!(temperature_band(22.0), "warm");
        assert_eq!(temperature_band(12.0), "cool");
        assert_eq!(temperature_band(-5.0), "cold");
    }

    #[test]
    fn display_hourly_cards_cap_at_twenty_four_labeled_hours() {
        let hours: Vec<HourlyPoint> = (0..30)
            .map(|hour| HourlyPoint {
                datetime: format!("2026-08-07T{hour:02}:00"),
                weather_code: 1,
                temp_c: 15.0 + hour as f64 * 0.1,
            })
            .collect();

        let cards = hourly_cards(&hours, DisplayOptions::default());

        assert_eq!(cards.len(), 24);
        assert_eq!(cards[0].title, "00:00");
        assert_eq!(cards[23].title, "23:00");
    }

    #[test]
    fn display_daily_cards_format_in_requested_unit() {
        let days = vec![DailyPoint {
            date: "2026-08-07".to_string(),
            weather_code: 61,
            temp_min_c: 14.4,
            temp_max_c: 20.0,
        }];

        let options = DisplayOptions {
            unit: UnitPreference::Fahrenheit,
            ..DisplayOptions::default()
        };
        let cards = daily_cards(&days, options);

        assert_eq!(cards[0].title, "2026-08-07");
        assert_eq!(cards[0].lines[0], "🌧️  Max 68.0°F · Min 57.9°F");
    }

    #[test]
    fn display_location_cards_mark_current_location() {
        let card = LocationCard {
            name: "Your Location".to_string(),
            country: String::new(),
            latitude: 42.66,
            longitude: 21.17,
            temperature_c: 21.0,
            feels_like_c: 21.0,
            high_c: 25.0,
            low_c: 13.0,
            wind_kmh: 8.6,
            humidity_pct: None,
            weather_code: 2,
            sunrise: "2026-08-07T05:31".to_string(),
            sunset: "2026-08-07T19:58".to_string(),
            updated_at: "2026-08-07T14:30:00Z".to_string(),
            current_location: true,
        };

        let cards = location_cards(&[card], DisplayOptions::default());

        assert_eq!(cards[0].title, "Your Location · CURRENT LOCATION");
        assert!(cards[0].lines[2].contains("Humidity --"));
        assert!(cards[0].lines[4].contains("14:30"));
    }
}
