use chrono::{DateTime, Utc};
use tui_textarea::TextArea;

use crate::celebration::Confetti;
use crate::error::RangeError;
use crate::handlers::*;
use crate::key_event::AppKeyEvent;
use crate::prompts::PromptLibrary;
use crate::session::SessionController;
use crate::timer::{tick_session, TickClock};
use crate::types::*;

/// Settings the practice view opens with.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PracticeDefaults {
    pub category: PromptCategory,
    pub mode: TimerMode,
    pub preset: &'static TimePreset,
    pub themed: bool,
}

impl Default for PracticeDefaults {
    fn default() -> Self {
        Self {
            category: PromptCategory::default(),
            mode: TimerMode::default(),
            preset: &TIME_PRESETS[0],
            themed: false,
        }
    }
}

/// Editable state of the "Setup Your Practice" panel.
#[derive(Debug)]
pub struct SettingsForm {
    pub focused: SettingsField,
    pub category: PromptCategory,
    pub mode: TimerMode,
    /// Index into `TIME_PRESETS`; one past the end means custom input.
    pub range_index: usize,
    pub custom_min: TextArea<'static>,
    pub custom_max: TextArea<'static>,
}

impl SettingsForm {
    pub fn new(defaults: &PracticeDefaults) -> Self {
        let range_index = TIME_PRESETS
            .iter()
            .position(|p| p == defaults.preset)
            .unwrap_or(0);
        Self {
            focused: SettingsField::default(),
            category: defaults.category,
            mode: defaults.mode,
            range_index,
            custom_min: TextArea::default(),
            custom_max: TextArea::default(),
        }
    }

    pub fn is_custom(&self) -> bool {
        self.range_index >= TIME_PRESETS.len()
    }

    /// Whether the custom min/max rows take part in focus traversal.
    pub fn custom_rows_visible(&self) -> bool {
        self.mode == TimerMode::TimeRange && self.is_custom()
    }

    pub fn cycle_range(&mut self, delta: i32) {
        let len = TIME_PRESETS.len() as i32 + 1;
        self.range_index = (self.range_index as i32 + delta).rem_euclid(len) as usize;
    }

    pub fn selection(&self) -> RangeSelection {
        match TIME_PRESETS.get(self.range_index) {
            Some(preset) => RangeSelection::Preset(preset),
            None => RangeSelection::Custom {
                min: single_line_textarea_value(&self.custom_min),
                max: single_line_textarea_value(&self.custom_max),
            },
        }
    }
}

/// Central application state shared by the terminal and web front ends.
pub struct AppState {
    pub screen: Screen,
    pub library: PromptLibrary,
    pub defaults: PracticeDefaults,
    pub session: SessionController,
    pub settings: SettingsForm,
    pub clock: TickClock,
    pub confetti: Confetti,
    /// Last rejected time range, shown until the next key press.
    pub notice: Option<RangeError>,
}

impl AppState {
    pub fn new(library: PromptLibrary, defaults: PracticeDefaults) -> Self {
        let mut session = SessionController::new(library.clone());
        session.set_themed(defaults.themed);
        Self {
            screen: Screen::Landing,
            settings: SettingsForm::new(&defaults),
            library,
            defaults,
            session,
            clock: TickClock::default(),
            confetti: Confetti::default(),
            notice: None,
        }
    }

    /// Open the practice view with a fresh session.
    pub fn enter_practice(&mut self) {
        let themed = self.session.is_themed();
        self.session = SessionController::new(self.library.clone());
        self.session.set_themed(themed);
        self.settings = SettingsForm::new(&self.defaults);
        self.clock.disarm();
        self.confetti.clear();
        self.notice = None;
        self.screen = Screen::Practice;
        tracing::debug!("practice view entered");
    }

    /// Back to the landing page; the session is discarded.
    pub fn leave_practice(&mut self) {
        self.clock.disarm();
        self.confetti.clear();
        self.notice = None;
        self.screen = Screen::Landing;
        tracing::debug!("practice view left");
    }

    /// Dispatch a key event to the handler of the current screen.
    /// Returns true if the app should quit (only for CLI).
    pub fn handle_key(&mut self, key: AppKeyEvent) -> bool {
        if key.is_ctrl_c() {
            return true;
        }
        match self.screen {
            Screen::Landing => return handle_landing_key(self, &key),
            Screen::Practice if self.session.state().in_settings_view => {
                handle_settings_key(self, &key)
            }
            Screen::Practice => handle_session_key(self, &key),
        }
        false
    }

    /// Advance the timer (call on every frame / poll cycle).
    pub fn tick(&mut self) {
        self.tick_at(Utc::now());
    }

    pub fn tick_at(&mut self, now: DateTime<Utc>) {
        if self.screen == Screen::Practice {
            tick_session(&mut self.session, &mut self.clock, now);
        } else {
            self.clock.disarm();
        }
        self.confetti.expire(now);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::key_event::AppKeyCode;
    use chrono::Duration;

    fn press(state: &mut AppState, code: AppKeyCode) -> bool {
        state.handle_key(AppKeyEvent::plain(code))
    }

    #[test]
    fn landing_starts_practice_and_quits() {
        let mut state = AppState::new(PromptLibrary::default(), PracticeDefaults::default());
        assert!(!press(&mut state, AppKeyCode::Enter));
        assert_eq!(state.screen, Screen::Practice);
        assert!(state.session.state().in_settings_view);

        press(&mut state, AppKeyCode::Esc);
        assert_eq!(state.screen, Screen::Landing);
        assert!(press(&mut state, AppKeyCode::Char('q')));
    }

    #[test]
    fn ctrl_c_quits_anywhere() {
        let mut state = AppState::new(PromptLibrary::default(), PracticeDefaults::default());
        state.enter_practice();
        let key = AppKeyEvent {
            code: AppKeyCode::Char('c'),
            ctrl: true,
            alt: false,
            shift: false,
        };
        assert!(state.handle_key(key));
    }

    #[test]
    fn leaving_practice_stops_ticks_and_resets_session() {
        let mut state = AppState::new(PromptLibrary::default(), PracticeDefaults::default());
        state.enter_practice();
        press(&mut state, AppKeyCode::Enter);
        press(&mut state, AppKeyCode::Char(' '));
        let now = Utc::now();
        state.tick_at(now);
        state.tick_at(now + Duration::seconds(3));
        assert_eq!(state.session.state().elapsed_seconds, 3);

        press(&mut state, AppKeyCode::Esc);
        state.tick_at(now + Duration::seconds(10));
        assert!(!state.clock.is_armed());

        state.enter_practice();
        assert!(state.session.state().in_settings_view);
        assert_eq!(state.session.state().elapsed_seconds, 0);
    }

    #[test]
    fn defaults_seed_the_settings_form() {
        let defaults = PracticeDefaults {
            category: PromptCategory::Quote,
            mode: TimerMode::Stopwatch,
            preset: find_preset("10-12 min").unwrap(),
            themed: true,
        };
        let state = AppState::new(PromptLibrary::default(), defaults);
        assert_eq!(state.settings.range_index, 4);
        assert_eq!(state.settings.category, PromptCategory::Quote);
        assert!(state.session.is_themed());
    }

    #[test]
    fn range_cycles_through_custom() {
        let mut form = SettingsForm::new(&PracticeDefaults::default());
        form.cycle_range(-1);
        assert!(form.is_custom());
        assert!(matches!(form.selection(), RangeSelection::Custom { .. }));
        form.cycle_range(1);
        assert_eq!(form.selection(), RangeSelection::Preset(&TIME_PRESETS[0]));
    }
}
