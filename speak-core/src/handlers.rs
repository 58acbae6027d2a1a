use chrono::Utc;

use crate::app::AppState;
use crate::key_event::{AppKeyCode, AppKeyEvent};
use crate::timer::complete_session;
use crate::types::*;

/// Returns true if the app should quit.
pub fn handle_landing_key(state: &mut AppState, key: &AppKeyEvent) -> bool {
    match key.code {
        AppKeyCode::Enter => state.enter_practice(),
        AppKeyCode::Esc => return true,
        _ if key.is_char('s') => state.enter_practice(),
        _ if key.is_char('q') => return true,
        _ => {}
    }
    false
}

pub fn handle_settings_key(state: &mut AppState, key: &AppKeyEvent) {
    // The validation notice swallows one key so it cannot be missed.
    if state.notice.take().is_some() {
        return;
    }

    let form = &mut state.settings;
    let custom = form.custom_rows_visible();

    let input = match form.focused {
        SettingsField::CustomMin if custom => Some(&mut form.custom_min),
        SettingsField::CustomMax if custom => Some(&mut form.custom_max),
        _ => None,
    };
    if let Some(textarea) = input {
        if handle_number_textarea_key(textarea, key) {
            return;
        }
    }

    match key.code {
        AppKeyCode::Esc => state.leave_practice(),
        AppKeyCode::Tab | AppKeyCode::Down => form.focused = form.focused.next(custom),
        AppKeyCode::BackTab | AppKeyCode::Up => form.focused = form.focused.prev(custom),
        AppKeyCode::Left => change_focused_choice(state, -1),
        AppKeyCode::Right => change_focused_choice(state, 1),
        AppKeyCode::Enter => generate(state),
        _ if key.is_char('v') => state.session.toggle_themed(),
        _ => {}
    }
}

fn change_focused_choice(state: &mut AppState, delta: i32) {
    let form = &mut state.settings;
    match form.focused {
        SettingsField::Category => form.category = form.category.cycle(delta),
        SettingsField::TimerMode => form.mode = form.mode.toggled(),
        SettingsField::TimeRange => {
            if form.mode == TimerMode::TimeRange {
                form.cycle_range(delta);
            }
        }
        SettingsField::CustomMin | SettingsField::CustomMax => {}
    }
    // Focus may sit on a custom row that just disappeared.
    if !form.custom_rows_visible()
        && matches!(form.focused, SettingsField::CustomMin | SettingsField::CustomMax)
    {
        form.focused = SettingsField::TimeRange;
    }
}

fn generate(state: &mut AppState) {
    let form = &state.settings;
    state
        .session
        .configure(form.category, form.mode, form.selection());
    match state.session.generate() {
        Ok(()) => {
            state.clock.disarm();
            state.notice = None;
        }
        Err(err) => state.notice = Some(err),
    }
}

pub fn handle_session_key(state: &mut AppState, key: &AppKeyEvent) {
    match key.code {
        AppKeyCode::Esc => state.leave_practice(),
        AppKeyCode::Enter | AppKeyCode::Char(' ') => {
            state.session.toggle_play_pause();
            if state.session.state().is_running {
                state.clock.arm(Utc::now());
            } else {
                state.clock.disarm();
            }
        }
        _ if key.is_char('r') => {
            state.session.restart();
            state.clock.disarm();
            state.confetti.clear();
        }
        _ if key.is_char('d') => {
            complete_session(&mut state.session, &mut state.clock, &mut state.confetti);
        }
        _ if key.is_char('n') => {
            state.session.new_prompt();
            state.clock.disarm();
            state.confetti.clear();
        }
        _ => {}
    }
}
