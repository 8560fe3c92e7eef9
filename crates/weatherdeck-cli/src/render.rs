use crate::display::DisplayCard;
use crate::geocoding::ResolvedLocation;
use crate::model::{DashboardLocation, ThemePreference};

pub const EMPTY_BOARD_MESSAGE: &str = "No locations yet. Search for a city to add one.";
pub const NO_SUGGESTIONS_MESSAGE: &str = "No matching cities.";

const CARD_WIDTH: usize = 46;

pub fn location_label(location: &DashboardLocation) -> String {
    if location.country.trim().is_empty() {
        location.name.clone()
    } else {
        format!("{}, {}", location.name, location.country)
    }
}

/// Builds the whole view output fresh: a heading followed by every card.
pub fn render_view(heading: &str, cards: &[DisplayCard], theme: ThemePreference) -> String {
    let mut lines = vec![heading.to_string()];

    for card in cards {
        lines.push(String::new());
        lines.push(title_rule(&card.title, theme));
        for body in &card.lines {
            lines.push(format!("  {body}"));
        }
    }

    lines.join("\n")
}

/// Board rendering numbers each card (the handle for `locations remove`)
/// and shows the empty-state message when nothing is on the board.
pub fn render_board(heading: &str, cards: &[DisplayCard], theme: ThemePreference) -> String {
    if cards.is_empty() {
        return format!("{heading}\n\n{EMPTY_BOARD_MESSAGE}");
    }

    let numbered: Vec<DisplayCard> = cards
        .iter()
        .enumerate()
        .map(|(index, card)| DisplayCard {
            title: format!("{}. {}", index + 1, card.title),
            lines: card.lines.clone(),
        })
        .collect();

    render_view(heading, &numbered, theme)
}

pub fn render_suggestions(query: &str, suggestions: &[ResolvedLocation]) -> String {
    if suggestions.is_empty() {
        return format!("Matches for \"{query}\"\n\n{NO_SUGGESTIONS_MESSAGE}");
    }

    let mut lines = vec![format!("Matches for \"{query}\""), String::new()];
    for (index, suggestion) in suggestions.iter().enumerate() {
        lines.push(format!("{}. {}", index + 1, suggestion.display_label()));
    }

    lines.join("\n")
}

fn title_rule(title: &str, theme: ThemePreference) -> String {
    let rule = match theme {
        ThemePreference::Light => '─',
        ThemePreference::Dark => '━',
    };

    let mut line = format!("{rule}{rule} {title} ");
    while line.chars().count() < CARD_WIDTH {
        line.push(rule);
    }
    line
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_card(title: &str) -> DisplayCard {
        DisplayCard {
            title: title.to_string(),
            lines: vec!["⛅  Max 20°C · Min 14°C".to_string()],
        }
    }

    #[test]
    fn render_view_stacks_heading_and_cards() {
        let output = render_view(
            "7-day forecast for Pristina, Kosovo",
            &[sample_card("2026-08-07"), sample_card("2026-08-08")],
            ThemePreference::Light,
        );

        assert!(output.starts_with("7-day forecast for Pristina, Kosovo"));
        assert!(output.contains("── 2026-08-07 ──"));
        assert!(output.contains("── 2026-08-08 ──"));
        assert!(output.contains("  ⛅  Max 20°C · Min 14°C"));
    }

    #[test]
    fn render_theme_selects_frame_charset() {
        let light = render_view("x", &[sample_card("a")], ThemePreference::Light);
        let dark = render_view("x", &[sample_card("a")], ThemePreference::Dark);

        assert!(light.contains('─'));
        assert!(!light.contains('━'));
        assert!(dark.contains('━'));
        assert!(!dark.contains('─'));
    }

    #[test]
    fn render_board_numbers_cards_in_order() {
        let output = render_board(
            "Locations",
            &[sample_card("Pristina, Kosovo"), sample_card("Tirana, Albania")],
            ThemePreference::Light,
        );

        assert!(output.contains("1. Pristina, Kosovo"));
        assert!(output.contains("2. Tirana, Albania"));
    }

    #[test]
    fn render_board_shows_empty_state_message() {
        let output = render_board("Locations", &[], ThemePreference::Light);
        assert!(output.contains(EMPTY_BOARD_MESSAGE));
    }

    #[test]
    fn render_suggestions_lists_labels_or_fallback() {
        let suggestions = vec![ResolvedLocation {
            name: "Paris".to_string(),
            country: "France".to_string(),
            latitude: 48.85,
            longitude: 2.35,
        }];

        let output = render_suggestions("par", &suggestions);
        assert!(output.contains("1. Paris, France"));

        let empty = render_suggestions("zzz", &[]);
        assert!(empty.contains(NO_SUGGESTIONS_MESSAGE));
    }

    #[test]
    fn render_location_label_handles_missing_country() {
        let with_country = DashboardLocation {
            name: "Pristina".to_string(),
            country: "Kosovo".to_string(),
            latitude: 42.66,
            longitude: 21.17,
        };
        let without_country = DashboardLocation {
            country: String::new(),
            ..with_country.clone()
        };

        assert_eq!(location_label(&with_country), "Pristina, Kosovo");
        assert_eq!(location_label(&without_country), "Pristina");
    }
}
