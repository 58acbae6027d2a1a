use serde::{Deserialize, Serialize};
use tui_textarea::TextArea;

use crate::key_event::{AppKeyCode, AppKeyEvent};

// ── Single-line TextArea helpers ────────────────────────────────────────

pub fn single_line_textarea_value(textarea: &TextArea<'_>) -> String {
    textarea.lines().join("")
}

/// Feed a key to a numeric single-line input.
/// Returns true if the key was consumed.
pub fn handle_number_textarea_key(textarea: &mut TextArea<'static>, key: &AppKeyEvent) -> bool {
    use tui_textarea::{Input, Key};

    let mapped = match key.code {
        // Non-digits are accepted too so validation can report them.
        AppKeyCode::Char(c) if !key.ctrl && !c.is_whitespace() => Key::Char(c),
        AppKeyCode::Backspace => Key::Backspace,
        AppKeyCode::Delete => Key::Delete,
        AppKeyCode::Home => Key::Home,
        AppKeyCode::End => Key::End,
        _ => return false,
    };
    textarea.input(Input {
        key: mapped,
        ctrl: false,
        alt: false,
        shift: key.shift,
    });
    true
}

// ── Screens ──────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Screen {
    #[default]
    Landing,
    Practice,
}

/// Focusable rows of the settings panel, in Tab order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SettingsField {
    Category,
    TimerMode,
    #[default]
    TimeRange,
    CustomMin,
    CustomMax,
}

impl SettingsField {
    pub fn next(self, custom: bool) -> Self {
        match self {
            SettingsField::Category => SettingsField::TimerMode,
            SettingsField::TimerMode => SettingsField::TimeRange,
            SettingsField::TimeRange if custom => SettingsField::CustomMin,
            SettingsField::TimeRange => SettingsField::Category,
            SettingsField::CustomMin => SettingsField::CustomMax,
            SettingsField::CustomMax => SettingsField::Category,
        }
    }

    pub fn prev(self, custom: bool) -> Self {
        match self {
            SettingsField::Category if custom => SettingsField::CustomMax,
            SettingsField::Category => SettingsField::TimeRange,
            SettingsField::TimerMode => SettingsField::Category,
            SettingsField::TimeRange => SettingsField::TimerMode,
            SettingsField::CustomMin => SettingsField::TimeRange,
            SettingsField::CustomMax => SettingsField::CustomMin,
        }
    }
}

// ── Session settings ─────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PromptCategory {
    Quote,
    Statement,
    #[default]
    Question,
}

impl PromptCategory {
    pub const ALL: [PromptCategory; 3] = [
        PromptCategory::Quote,
        PromptCategory::Statement,
        PromptCategory::Question,
    ];

    pub fn label(self) -> &'static str {
        match self {
            PromptCategory::Quote => "Quote",
            PromptCategory::Statement => "Statement",
            PromptCategory::Question => "Question",
        }
    }

    pub fn cycle(self, delta: i32) -> Self {
        cycle_in(&Self::ALL, self, delta)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum TimerMode {
    Stopwatch,
    #[default]
    TimeRange,
}

impl TimerMode {
    pub fn label(self) -> &'static str {
        match self {
            TimerMode::Stopwatch => "Stopwatch",
            TimerMode::TimeRange => "Time Range",
        }
    }

    pub fn toggled(self) -> Self {
        match self {
            TimerMode::Stopwatch => TimerMode::TimeRange,
            TimerMode::TimeRange => TimerMode::Stopwatch,
        }
    }
}

/// Target speaking window in whole minutes. Always `0 < min < max`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimeRange {
    min: u32,
    max: u32,
}

impl TimeRange {
    pub fn new(min: u32, max: u32) -> Option<Self> {
        (min > 0 && min < max).then_some(Self { min, max })
    }

    pub fn min(&self) -> u32 {
        self.min
    }

    pub fn max(&self) -> u32 {
        self.max
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimePreset {
    pub label: &'static str,
    pub min: u32,
    pub max: u32,
}

impl TimePreset {
    pub fn range(&self) -> TimeRange {
        TimeRange {
            min: self.min,
            max: self.max,
        }
    }
}

pub static TIME_PRESETS: [TimePreset; 8] = [
    TimePreset { label: "1-2 min", min: 1, max: 2 },
    TimePreset { label: "2-3 min", min: 2, max: 3 },
    TimePreset { label: "4-6 min", min: 4, max: 6 },
    TimePreset { label: "5-7 min", min: 5, max: 7 },
    TimePreset { label: "10-12 min", min: 10, max: 12 },
    TimePreset { label: "15-20 min", min: 15, max: 20 },
    TimePreset { label: "18-22 min", min: 18, max: 22 },
    TimePreset { label: "20-35 min", min: 20, max: 35 },
];

pub const DEFAULT_PRESET: &str = "1-2 min";

pub fn find_preset(label: &str) -> Option<&'static TimePreset> {
    TIME_PRESETS.iter().find(|p| p.label == label)
}

/// Which time range the user picked on the settings panel.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RangeSelection {
    Preset(&'static TimePreset),
    /// Raw text of the two custom inputs, validated on generate.
    Custom { min: String, max: String },
}

impl Default for RangeSelection {
    fn default() -> Self {
        RangeSelection::Preset(&TIME_PRESETS[0])
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CelebrationVariant {
    Default,
    Heart,
}

fn cycle_in<T: Copy + PartialEq>(all: &[T], current: T, delta: i32) -> T {
    let len = all.len() as i32;
    let idx = all.iter().position(|c| *c == current).unwrap_or(0) as i32;
    all[(idx + delta).rem_euclid(len) as usize]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn time_range_rejects_bad_bounds() {
        assert!(TimeRange::new(0, 2).is_none());
        assert!(TimeRange::new(3, 3).is_none());
        assert!(TimeRange::new(4, 2).is_none());
        let range = TimeRange::new(1, 2).unwrap();
        assert_eq!((range.min(), range.max()), (1, 2));
    }

    #[test]
    fn presets_are_valid_ranges() {
        for preset in TIME_PRESETS.iter() {
            assert!(TimeRange::new(preset.min, preset.max).is_some(), "{}", preset.label);
        }
        assert_eq!(find_preset(DEFAULT_PRESET).map(|p| p.max), Some(2));
        assert!(find_preset("3-4 min").is_none());
    }

    #[test]
    fn category_cycles_both_ways() {
        assert_eq!(PromptCategory::Quote.cycle(-1), PromptCategory::Question);
        assert_eq!(PromptCategory::Question.cycle(1), PromptCategory::Quote);
        assert_eq!(PromptCategory::Quote.cycle(1), PromptCategory::Statement);
    }

    #[test]
    fn settings_focus_skips_custom_rows_for_presets() {
        assert_eq!(SettingsField::TimeRange.next(false), SettingsField::Category);
        assert_eq!(SettingsField::TimeRange.next(true), SettingsField::CustomMin);
        assert_eq!(SettingsField::Category.prev(true), SettingsField::CustomMax);
    }
}
