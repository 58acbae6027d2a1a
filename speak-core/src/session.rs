use rand::Rng;

use crate::celebration::Celebrate;
use crate::error::RangeError;
use crate::prompts::PromptLibrary;
use crate::types::*;

/// Everything the practice view renders from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionState {
    pub prompt_category: PromptCategory,
    pub timer_mode: TimerMode,
    /// Only set in time-range mode, resolved when the prompt is generated.
    pub active_range: Option<TimeRange>,
    pub current_prompt: String,
    pub elapsed_seconds: u64,
    pub is_running: bool,
    pub is_completed: bool,
    pub in_settings_view: bool,
}

impl Default for SessionState {
    fn default() -> Self {
        Self {
            prompt_category: PromptCategory::default(),
            timer_mode: TimerMode::default(),
            active_range: None,
            current_prompt: String::new(),
            elapsed_seconds: 0,
            is_running: false,
            is_completed: false,
            in_settings_view: true,
        }
    }
}

/// Owns one practice session: pending settings, the prompt source and the
/// state machine Settings → Running ⇄ Paused → Completed.
#[derive(Debug, Clone)]
pub struct SessionController {
    library: PromptLibrary,
    themed: bool,
    category: PromptCategory,
    mode: TimerMode,
    selection: RangeSelection,
    state: SessionState,
}

impl SessionController {
    pub fn new(library: PromptLibrary) -> Self {
        Self {
            library,
            themed: false,
            category: PromptCategory::default(),
            mode: TimerMode::default(),
            selection: RangeSelection::default(),
            state: SessionState::default(),
        }
    }

    pub fn state(&self) -> &SessionState {
        &self.state
    }

    pub fn library(&self) -> &PromptLibrary {
        &self.library
    }

    pub fn is_themed(&self) -> bool {
        self.themed
    }

    pub fn set_themed(&mut self, themed: bool) {
        self.themed = themed;
    }

    pub fn toggle_themed(&mut self) {
        self.themed = !self.themed;
    }

    /// Store the settings used by the next `generate`. Not validated here.
    pub fn configure(&mut self, category: PromptCategory, mode: TimerMode, selection: RangeSelection) {
        self.category = category;
        self.mode = mode;
        self.selection = selection;
    }

    pub fn generate(&mut self) -> Result<(), RangeError> {
        self.generate_with_rng(&mut rand::thread_rng())
    }

    /// Pick a prompt and start a fresh (paused, zeroed) session.
    /// On a rejected custom range nothing changes.
    pub fn generate_with_rng<R: Rng + ?Sized>(&mut self, rng: &mut R) -> Result<(), RangeError> {
        let active_range = match self.mode {
            TimerMode::Stopwatch => None,
            TimerMode::TimeRange => Some(resolve_range(&self.selection).inspect_err(|err| {
                tracing::info!(%err, "custom time range rejected");
            })?),
        };

        let prompt = self
            .library
            .pools(self.themed)
            .choose(self.category, rng)
            .to_string();

        tracing::debug!(
            category = self.category.label(),
            mode = self.mode.label(),
            ?active_range,
            themed = self.themed,
            "prompt generated"
        );

        self.state = SessionState {
            prompt_category: self.category,
            timer_mode: self.mode,
            active_range,
            current_prompt: prompt,
            elapsed_seconds: 0,
            is_running: false,
            is_completed: false,
            in_settings_view: false,
        };
        Ok(())
    }

    /// One elapsed second. Ignored unless running.
    pub fn tick(&mut self) {
        if self.state.is_running {
            self.state.elapsed_seconds += 1;
        }
    }

    pub fn toggle_play_pause(&mut self) {
        if self.state.is_completed || self.state.in_settings_view {
            return;
        }
        self.state.is_running = !self.state.is_running;
    }

    /// Back to zero with the same prompt.
    pub fn restart(&mut self) {
        self.state.elapsed_seconds = 0;
        self.state.is_running = false;
        self.state.is_completed = false;
        tracing::debug!("session restarted");
    }

    /// Finish the speech and fire the celebration once.
    /// Returns false (and does nothing) before the first second or when already done.
    pub fn mark_complete<C: Celebrate + ?Sized>(&mut self, celebrate: &mut C) -> bool {
        if self.state.elapsed_seconds == 0 || self.state.is_completed {
            return false;
        }
        self.state.is_running = false;
        self.state.is_completed = true;
        tracing::debug!(elapsed = self.state.elapsed_seconds, "session completed");

        celebrate.fire(if self.themed {
            CelebrationVariant::Heart
        } else {
            CelebrationVariant::Default
        });
        true
    }

    /// Drop the prompt and go back to the settings view.
    pub fn new_prompt(&mut self) {
        self.state.current_prompt.clear();
        self.state.elapsed_seconds = 0;
        self.state.is_running = false;
        self.state.is_completed = false;
        self.state.in_settings_view = true;
        tracing::debug!("back to settings");
    }
}

fn resolve_range(selection: &RangeSelection) -> Result<TimeRange, RangeError> {
    let (min, max) = match selection {
        RangeSelection::Preset(preset) => return Ok(preset.range()),
        RangeSelection::Custom { min, max } => (min, max),
    };
    if min.is_empty() || max.is_empty() {
        return Err(RangeError::MissingValue);
    }
    let (Some(min), Some(max)) = (parse_leading_int(min), parse_leading_int(max)) else {
        return Err(RangeError::NotANumber);
    };
    if min <= 0 || max <= 0 {
        return Err(RangeError::NonPositive);
    }
    if min >= max {
        return Err(RangeError::RangeInverted);
    }
    // Bounds past u32::MAX minutes saturate, min staying below max.
    let max = u32::try_from(max).unwrap_or(u32::MAX);
    let min = u32::try_from(min).unwrap_or(u32::MAX).min(max - 1);
    TimeRange::new(min, max).ok_or(RangeError::RangeInverted)
}

/// Integer prefix of `input`: leading whitespace and an optional sign, then
/// decimal digits. Anything after the digits is ignored ("2.5" is 2).
pub fn parse_leading_int(input: &str) -> Option<i64> {
    let trimmed = input.trim_start();
    let (negative, rest) = match trimmed.as_bytes().first() {
        Some(b'-') => (true, &trimmed[1..]),
        Some(b'+') => (false, &trimmed[1..]),
        _ => (false, trimmed),
    };
    let digits: &str = &rest[..rest.bytes().take_while(u8::is_ascii_digit).count()];
    if digits.is_empty() {
        return None;
    }
    let magnitude = digits
        .bytes()
        .fold(0i64, |acc, d| acc.saturating_mul(10).saturating_add(i64::from(d - b'0')));
    Some(if negative { -magnitude } else { magnitude })
}
