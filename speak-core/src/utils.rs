use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::style::Style;

use crate::app::AppState;
use crate::style;

pub fn is_dialog_open(state: &AppState) -> bool {
    state.notice.is_some()
}

pub fn get_dimmed_style(state: &AppState) -> Style {
    if is_dialog_open(state) {
        Style::default().fg(style::GRAY_DIM)
    } else {
        Style::default()
    }
}

pub fn centered_rect_fixed_height(percent_x: u16, height: u16, r: Rect) -> Rect {
    let vertical_pad = r.height.saturating_sub(height) / 2;

    let popup_layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(vertical_pad),
            Constraint::Length(height),
            Constraint::Length(vertical_pad),
        ])
        .split(r);

    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(popup_layout[1])[1]
}

/// Greedy word wrap; words longer than `width` are split across lines.
pub fn wrap_text(text: &str, width: usize) -> Vec<String> {
    if width == 0 {
        return vec![text.to_string()];
    }
    let mut lines = Vec::new();
    let mut current = String::new();
    for word in text.split_whitespace() {
        let word_len = word.chars().count();
        if !current.is_empty() && current.chars().count() + 1 + word_len <= width {
            current.push(' ');
            current.push_str(word);
            continue;
        }
        if !current.is_empty() {
            lines.push(std::mem::take(&mut current));
        }
        if word_len <= width {
            current = word.to_string();
            continue;
        }
        let chars: Vec<char> = word.chars().collect();
        lines.extend(chars.chunks(width).map(|chunk| chunk.iter().collect::<String>()));
    }
    if !current.is_empty() || lines.is_empty() {
        lines.push(current);
    }
    lines
}
