//! Values the practice view derives from [`SessionState`] on every draw.

use ratatui::style::Color;

use crate::session::SessionState;
use crate::style;
use crate::types::{PromptCategory, TimeRange, TimerMode};

/// Where the elapsed time sits relative to the target range.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RangeBand {
    BelowMin,
    /// First half of the range.
    Early,
    /// 50% to 80% of the range.
    Middle,
    /// Last 20% before the maximum.
    Late,
    Overtime,
}

impl RangeBand {
    pub fn color(self) -> Color {
        match self {
            RangeBand::BelowMin => style::PURPLE,
            RangeBand::Early => style::EMERALD,
            RangeBand::Middle => style::AMBER,
            RangeBand::Late => style::ORANGE,
            RangeBand::Overtime => style::RED,
        }
    }
}

fn elapsed_minutes(elapsed_seconds: u64) -> f64 {
    elapsed_seconds as f64 / 60.0
}

pub fn range_band(elapsed_seconds: u64, range: TimeRange) -> RangeBand {
    let minutes = elapsed_minutes(elapsed_seconds);
    let (min, max) = (f64::from(range.min()), f64::from(range.max()));
    if minutes < min {
        return RangeBand::BelowMin;
    }
    if minutes >= max {
        return RangeBand::Overtime;
    }
    let progress = (minutes - min) / (max - min);
    if progress < 0.5 {
        RangeBand::Early
    } else if progress < 0.8 {
        RangeBand::Middle
    } else {
        RangeBand::Late
    }
}

fn active_range(state: &SessionState) -> Option<TimeRange> {
    match state.timer_mode {
        TimerMode::Stopwatch => None,
        TimerMode::TimeRange => state.active_range,
    }
}

pub fn timer_color(state: &SessionState) -> Color {
    active_range(state)
        .map(|range| range_band(state.elapsed_seconds, range).color())
        .unwrap_or(style::PURPLE)
}

/// One decimal place with ties rounded away from zero ("0.25" shows as "0.3").
fn one_decimal(minutes: f64) -> String {
    format!("{:.1}", (minutes * 10.0).round() / 10.0)
}

pub fn range_status_text(state: &SessionState) -> Option<String> {
    let range = active_range(state)?;
    let minutes = elapsed_minutes(state.elapsed_seconds);
    let (min, max) = (f64::from(range.min()), f64::from(range.max()));
    let text = match range_band(state.elapsed_seconds, range) {
        RangeBand::BelowMin => format!("{} min to minimum", one_decimal(min - minutes)),
        RangeBand::Overtime => format!("+{} min overtime", one_decimal(minutes - max)),
        RangeBand::Early | RangeBand::Middle | RangeBand::Late => {
            format!("{} min remaining", one_decimal(max - minutes))
        }
    };
    Some(text)
}

/// `MM:SS`; minutes keep counting past an hour.
pub fn format_elapsed(seconds: u64) -> String {
    format!("{:02}:{:02}", seconds / 60, seconds % 60)
}

pub fn encouragement(elapsed_seconds: u64) -> &'static str {
    match elapsed_seconds {
        0..=59 => "You're doing great! Keep going!",
        60..=119 => "Amazing! You're on fire! 🔥",
        120..=179 => "Wow! Over 2 minutes! Fantastic!",
        _ => "Incredible! You're a speaking superstar! ⭐",
    }
}

pub fn completion_message(elapsed_seconds: u64) -> String {
    format!(
        "You spoke for {}! That's amazing progress!",
        format_elapsed(elapsed_seconds)
    )
}

pub fn range_label(range: TimeRange) -> String {
    format!("{}-{} min", range.min(), range.max())
}

/// Prompt body and, for quotes written as `"text" - author`, the attribution.
pub fn parse_prompt(category: PromptCategory, text: &str) -> (String, Option<String>) {
    if category != PromptCategory::Quote {
        return (text.to_string(), None);
    }
    let parts: Vec<&str> = text.split(" - ").collect();
    match parts.as_slice() {
        [body, author] => {
            let body = body.strip_prefix('"').unwrap_or(body);
            let body = body.strip_suffix('"').unwrap_or(body);
            (body.to_string(), Some(author.to_string()))
        }
        _ => (text.to_string(), None),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ranged(min: u32, max: u32, elapsed_seconds: u64) -> SessionState {
        SessionState {
            timer_mode: TimerMode::TimeRange,
            active_range: TimeRange::new(min, max),
            current_prompt: "Why?".to_string(),
            elapsed_seconds,
            in_settings_view: false,
            ..SessionState::default()
        }
    }

    #[test]
    fn elapsed_format() {
        assert_eq!(format_elapsed(0), "00:00");
        assert_eq!(format_elapsed(125), "02:05");
        assert_eq!(format_elapsed(3661), "61:01");
    }

    #[test]
    fn color_band_breakpoints() {
        assert_eq!(timer_color(&ranged(1, 2, 59)), style::PURPLE);
        assert_eq!(timer_color(&ranged(1, 2, 60)), style::EMERALD);
        assert_eq!(timer_color(&ranged(1, 2, 89)), style::EMERALD);
        assert_eq!(timer_color(&ranged(1, 2, 90)), style::AMBER);
        assert_eq!(timer_color(&ranged(1, 2, 107)), style::AMBER);
        assert_eq!(timer_color(&ranged(1, 2, 108)), style::ORANGE);
        assert_eq!(timer_color(&ranged(1, 2, 120)), style::RED);
        assert_eq!(timer_color(&ranged(1, 2, 5000)), style::RED);
    }

    #[test]
    fn stopwatch_is_always_base_color() {
        let mut state = ranged(1, 2, 600);
        state.timer_mode = TimerMode::Stopwatch;
        assert_eq!(timer_color(&state), style::PURPLE);
        assert_eq!(range_status_text(&state), None);
    }

    #[test]
    fn missing_range_falls_back() {
        let mut state = ranged(1, 2, 90);
        state.active_range = None;
        assert_eq!(timer_color(&state), style::PURPLE);
        assert_eq!(range_status_text(&state), None);
    }

    #[test]
    fn status_text_per_band() {
        assert_eq!(range_status_text(&ranged(2, 3, 30)).unwrap(), "1.5 min to minimum");
        assert_eq!(range_status_text(&ranged(2, 3, 150)).unwrap(), "0.5 min remaining");
        assert_eq!(range_status_text(&ranged(2, 3, 180)).unwrap(), "+0.0 min overtime");
        assert_eq!(range_status_text(&ranged(2, 3, 210)).unwrap(), "+0.5 min overtime");
    }

    #[test]
    fn quarter_minutes_round_up() {
        assert_eq!(range_status_text(&ranged(1, 2, 45)).unwrap(), "0.3 min to minimum");
        assert_eq!(range_status_text(&ranged(1, 2, 105)).unwrap(), "0.3 min remaining");
        assert_eq!(range_status_text(&ranged(1, 2, 135)).unwrap(), "+0.3 min overtime");
    }

    #[test]
    fn encouragement_tiers() {
        assert_eq!(encouragement(0), "You're doing great! Keep going!");
        assert_eq!(encouragement(60), "Amazing! You're on fire! 🔥");
        assert_eq!(encouragement(179), "Wow! Over 2 minutes! Fantastic!");
        assert_eq!(encouragement(180), "Incredible! You're a speaking superstar! ⭐");
    }

    #[test]
    fn quote_parsing() {
        assert_eq!(
            parse_prompt(PromptCategory::Quote, "\"Do it.\" - Someone"),
            ("Do it.".to_string(), Some("Someone".to_string()))
        );
        assert_eq!(
            parse_prompt(PromptCategory::Quote, "No dash here"),
            ("No dash here".to_string(), None)
        );
        // More than one separator is not treated as an attribution.
        assert_eq!(
            parse_prompt(PromptCategory::Quote, "a - b - c"),
            ("a - b - c".to_string(), None)
        );
        assert_eq!(
            parse_prompt(PromptCategory::Question, "\"Why?\" - Me"),
            ("\"Why?\" - Me".to_string(), None)
        );
    }

    #[test]
    fn labels() {
        assert_eq!(range_label(TimeRange::new(4, 6).unwrap()), "4-6 min");
        assert_eq!(completion_message(65), "You spoke for 01:05! That's amazing progress!");
    }
}
