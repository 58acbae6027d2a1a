use std::{cell::RefCell, rc::Rc};

use ratzilla::{
    backend::webgl2::FontAtlasConfig,
    backend::webgl2::WebGl2BackendOptions,
    event::{KeyCode, KeyEvent},
    WebGl2Backend, WebRenderer,
};
use speak_core::app::{AppState, PracticeDefaults};
use speak_core::key_event::{AppKeyCode, AppKeyEvent};
use speak_core::prompts::PromptLibrary;
use speak_core::ui;

// ── Key event conversion ─────────────────────────────────────────────────

fn convert_key(key: &KeyEvent) -> AppKeyEvent {
    let code = match key.code {
        KeyCode::Char(c) => AppKeyCode::Char(c),
        KeyCode::Backspace => AppKeyCode::Backspace,
        KeyCode::Enter => AppKeyCode::Enter,
        KeyCode::Left => AppKeyCode::Left,
        KeyCode::Right => AppKeyCode::Right,
        KeyCode::Up => AppKeyCode::Up,
        KeyCode::Down => AppKeyCode::Down,
        KeyCode::Tab if key.shift => AppKeyCode::BackTab,
        KeyCode::Tab => AppKeyCode::Tab,
        KeyCode::Delete => AppKeyCode::Delete,
        KeyCode::Home => AppKeyCode::Home,
        KeyCode::End => AppKeyCode::End,
        KeyCode::Esc => AppKeyCode::Esc,
        _ => AppKeyCode::Other,
    };
    AppKeyEvent {
        code,
        ctrl: key.ctrl,
        alt: key.alt,
        shift: key.shift,
    }
}

// ── Main entry point ─────────────────────────────────────────────────────

fn main() {
    console_error_panic_hook::set_once();

    let app_state = AppState::new(PromptLibrary::default(), PracticeDefaults::default());
    let state = Rc::new(RefCell::new(app_state));

    let backend = WebGl2Backend::new_with_options(
        WebGl2BackendOptions::new()
            .font_atlas_config(FontAtlasConfig::dynamic(&["JetBrains Mono"], 16.0)),
    )
    .expect("Failed to create WebGl2Backend");
    let terminal = ratzilla::ratatui::Terminal::new(backend).expect("Failed to create terminal");

    // There is no process to quit in the browser, so the quit signal is ignored.
    let state_key = Rc::clone(&state);
    terminal.on_key_event(move |key| {
        let mut s = state_key.borrow_mut();
        let app_key = convert_key(&key);
        s.handle_key(app_key);
    });

    let state_draw = Rc::clone(&state);
    terminal.draw_web(move |f| {
        let mut s = state_draw.borrow_mut();
        s.tick();
        ui::ui(f, &s, ui::APP_TITLE);
    });
}
