use chrono::{DateTime, Utc};
use ratatui::layout::{Alignment, Constraint, Direction, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Clear, Paragraph, Wrap};
use tui_textarea::TextArea;

use crate::app::AppState;
use crate::style;
use crate::types::*;
use crate::utils::*;
use crate::view::*;

pub const APP_TITLE: &str = "SpeakOnSpot - Impromptu Speaking Practice";

const FEATURES: [(&str, &str, Color); 4] = [
    (
        "Instant Topics",
        "Get random speaking topics in seconds. No preparation needed, just like real impromptu speaking scenarios.",
        style::PURPLE,
    ),
    (
        "Timed Practice",
        "Track your speaking time with an easy-to-use timer. Build stamina and learn to structure your thoughts quickly.",
        style::EMERALD,
    ),
    (
        "Build Confidence",
        "Practice regularly to overcome fear of public speaking. Every session makes you more comfortable and articulate.",
        style::AMBER,
    ),
    (
        "Think On Your Feet",
        "Develop the crucial skill of organizing thoughts instantly. Perfect for interviews, presentations, and daily conversations.",
        style::ORANGE,
    ),
];

const PREP_STEPS: [(&str, &str); 4] = [
    ("Point", "State your main idea"),
    ("Reason", "Explain why"),
    ("Example", "Give evidence"),
    ("Point", "Restate your idea"),
];

const TIPS: [&str; 4] = [
    "Take a deep breath before you start",
    "Structure: Introduction → Main Points → Conclusion",
    "Don't worry about perfection, focus on clarity",
    "Use personal examples to make your speech relatable",
];

// ── Main UI ──────────────────────────────────────────────────────────────

/// Render the entire UI.
///
/// `header_text` is the text shown in the header bar.
pub fn ui(f: &mut ratatui::Frame, state: &AppState, header_text: &str) {
    ui_at(f, state, header_text, Utc::now());
}

/// Same as [`ui`] with an explicit clock for the confetti animation.
pub fn ui_at(f: &mut ratatui::Frame, state: &AppState, header_text: &str, now: DateTime<Utc>) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Header
            Constraint::Min(5),    // Body
        ])
        .split(f.area());

    let dimmed = get_dimmed_style(state);
    let header = Paragraph::new(Line::from(header_text.to_string()))
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title("SpeakOnSpot")
                .style(dimmed),
        )
        .style(dimmed);
    f.render_widget(header, chunks[0]);

    match state.screen {
        Screen::Landing => render_landing(f, chunks[1]),
        Screen::Practice if state.session.state().in_settings_view => {
            render_settings(f, state, chunks[1])
        }
        Screen::Practice => render_session(f, state, chunks[1]),
    }

    render_notice_dialog(f, state);
    render_confetti(f, state, now);
}

// ── Landing ──────────────────────────────────────────────────────────────

fn render_landing(f: &mut ratatui::Frame, area: Rect) {
    let layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Min(9),     // Hero
            Constraint::Length(12), // Features
            Constraint::Length(1),  // Help
        ])
        .split(area);

    let hero = vec![
        Line::from(Span::styled(
            "Practice Makes Perfect",
            Style::default().fg(style::AMBER),
        )),
        Line::from(""),
        Line::from(vec![
            Span::styled("Speak ", Style::default().add_modifier(Modifier::BOLD)),
            Span::styled(
                "On",
                Style::default()
                    .fg(style::PURPLE)
                    .add_modifier(Modifier::BOLD),
            ),
            Span::styled(" Spot", Style::default().add_modifier(Modifier::BOLD)),
        ]),
        Line::from(""),
        Line::from("Master the art of impromptu speaking. Generate random topics,"),
        Line::from("practice with a timer, and build your confidence one speech at a time."),
        Line::from(""),
        Line::from(Span::styled(
            "[ Enter ] Start Practice",
            Style::default()
                .fg(style::PURPLE)
                .add_modifier(Modifier::BOLD),
        )),
    ];
    f.render_widget(
        Paragraph::new(hero)
            .alignment(Alignment::Center)
            .block(Block::default().borders(Borders::ALL)),
        layout[0],
    );

    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
        .split(layout[1]);
    for (row_idx, row) in rows.iter().enumerate() {
        let cells = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
            .split(*row);
        for (col_idx, cell) in cells.iter().enumerate() {
            let (title, description, color) = FEATURES[row_idx * 2 + col_idx];
            let card = Paragraph::new(description)
                .wrap(Wrap { trim: true })
                .block(
                    Block::default()
                        .borders(Borders::ALL)
                        .title(Span::styled(
                            title,
                            Style::default().fg(color).add_modifier(Modifier::BOLD),
                        ))
                        .border_style(Style::default().fg(color)),
                );
            f.render_widget(card, *cell);
        }
    }

    #[cfg(feature = "web")]
    let help_text = "Enter/s: start practice";
    #[cfg(not(feature = "web"))]
    let help_text = "Enter/s: start practice • q: quit";
    f.render_widget(
        Paragraph::new(help_text).style(Style::default().fg(style::GRAY_DIM)),
        layout[2],
    );
}

// ── Settings ─────────────────────────────────────────────────────────────

fn choice_spans<'a>(options: impl IntoIterator<Item = (&'a str, bool)>) -> Vec<Span<'a>> {
    options
        .into_iter()
        .flat_map(|(label, selected)| {
            let span = if selected {
                Span::styled(
                    format!("[{label}]"),
                    Style::default()
                        .fg(style::PURPLE)
                        .add_modifier(Modifier::BOLD),
                )
            } else {
                Span::raw(format!(" {label} "))
            };
            [span, Span::raw(" ")]
        })
        .collect()
}

fn field_prefix(label: &str, focused: bool) -> Span<'static> {
    let marker = if focused { "▸ " } else { "  " };
    let label_style = if focused {
        Style::default()
            .fg(style::PURPLE)
            .add_modifier(Modifier::BOLD)
    } else {
        Style::default()
    };
    Span::styled(format!("{marker}{label:<12}"), label_style)
}

fn render_labeled_number_field(
    f: &mut ratatui::Frame,
    area: Rect,
    prefix: Span<'static>,
    textarea: &TextArea<'_>,
    is_active: bool,
) {
    let width = prefix.width() as u16;
    let chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Length(width), Constraint::Length(8), Constraint::Min(1)])
        .split(area);
    f.render_widget(Paragraph::new(Line::from(prefix)), chunks[0]);
    if is_active {
        f.render_widget(textarea, chunks[1]);
    } else {
        let value = single_line_textarea_value(textarea);
        let shown = if value.is_empty() { "_".to_string() } else { value };
        f.render_widget(Paragraph::new(shown), chunks[1]);
    }
    f.render_widget(
        Paragraph::new("minutes").style(Style::default().fg(style::GRAY_DIM)),
        chunks[2],
    );
}

fn render_settings(f: &mut ratatui::Frame, state: &AppState, area: Rect) {
    let form = &state.settings;
    let dimmed = get_dimmed_style(state);
    let themed = state.session.is_themed();

    let block = Block::default()
        .borders(Borders::ALL)
        .title("Setup Your Practice")
        .style(dimmed)
        .border_style(Style::default().fg(if themed { style::PINK } else { style::PURPLE }));
    let inner = block.inner(area);
    f.render_widget(block, area);

    let layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1), // Valentine's Edition
            Constraint::Length(1), // Spacer
            Constraint::Length(1), // Category
            Constraint::Length(1), // Timer mode
            Constraint::Length(2), // Time range
            Constraint::Length(1), // Custom min
            Constraint::Length(1), // Custom max
            Constraint::Min(1),    // Filler
            Constraint::Length(1), // Help
        ])
        .split(inner);

    let heart_style = if themed {
        Style::default().fg(style::PINK).add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(style::GRAY_DIM)
    };
    let heart = if themed { "♥ Valentine's Edition: on" } else { "♡ Valentine's Edition: off" };
    f.render_widget(
        Paragraph::new(Span::styled(heart, heart_style)).alignment(Alignment::Right),
        layout[0],
    );

    let mut category = vec![field_prefix("Topic", form.focused == SettingsField::Category)];
    category.extend(choice_spans(
        PromptCategory::ALL
            .iter()
            .map(|c| (c.label(), *c == form.category)),
    ));
    f.render_widget(Paragraph::new(Line::from(category)).style(dimmed), layout[2]);

    let mut mode = vec![field_prefix("Timer", form.focused == SettingsField::TimerMode)];
    mode.extend(choice_spans(
        [TimerMode::TimeRange, TimerMode::Stopwatch]
            .iter()
            .map(|m| (m.label(), *m == form.mode)),
    ));
    f.render_widget(Paragraph::new(Line::from(mode)).style(dimmed), layout[3]);

    let mut range = vec![field_prefix("Time range", form.focused == SettingsField::TimeRange)];
    if form.mode == TimerMode::TimeRange {
        range.extend(choice_spans(
            TIME_PRESETS
                .iter()
                .enumerate()
                .map(|(idx, p)| (p.label, idx == form.range_index))
                .chain(std::iter::once(("Custom", form.is_custom()))),
        ));
    } else {
        range.push(Span::styled(
            "not used by the stopwatch",
            Style::default().fg(style::GRAY_DIM),
        ));
    }
    f.render_widget(
        Paragraph::new(Line::from(range))
            .wrap(Wrap { trim: false })
            .style(dimmed),
        layout[4],
    );

    if form.custom_rows_visible() {
        let min_focused = form.focused == SettingsField::CustomMin;
        let max_focused = form.focused == SettingsField::CustomMax;
        render_labeled_number_field(
            f,
            layout[5],
            field_prefix("Min", min_focused),
            &form.custom_min,
            min_focused && !is_dialog_open(state),
        );
        render_labeled_number_field(
            f,
            layout[6],
            field_prefix("Max", max_focused),
            &form.custom_max,
            max_focused && !is_dialog_open(state),
        );
    }

    f.render_widget(
        Paragraph::new("Tab/↑↓: move • ←→: change • v: Valentine's Edition • Enter: generate topic • Esc: back")
            .style(Style::default().fg(style::GRAY_DIM)),
        layout[8],
    );
}

// ── Running session ──────────────────────────────────────────────────────

fn play_label(elapsed_seconds: u64, is_running: bool) -> &'static str {
    if is_running {
        "Pause"
    } else if elapsed_seconds > 0 {
        "Resume"
    } else {
        "Start"
    }
}

fn control_spans(state: &AppState) -> Vec<Span<'static>> {
    let session = state.session.state();
    let key_style = Style::default()
        .fg(style::PURPLE)
        .add_modifier(Modifier::BOLD);
    let muted = Style::default().fg(style::GRAY_DIM);

    let mut spans = Vec::new();
    let mut push = |key: &'static str, label: &'static str, enabled: bool| {
        spans.push(Span::styled(key, if enabled { key_style } else { muted }));
        spans.push(Span::styled(
            format!(" {label}   "),
            if enabled { Style::default() } else { muted },
        ));
    };
    push(
        "Space",
        play_label(session.elapsed_seconds, session.is_running),
        !session.is_completed,
    );
    if !session.is_completed && session.elapsed_seconds > 0 {
        push("d", "Done", true);
    }
    push("r", "Restart", true);
    push("n", "New Topic", true);
    push("Esc", "Home", true);
    spans
}

fn render_session(f: &mut ratatui::Frame, state: &AppState, area: Rect) {
    let session = state.session.state();
    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(68), Constraint::Percentage(32)])
        .split(area);

    let main = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1), // Badges
            Constraint::Min(5),    // Prompt
            Constraint::Length(5), // Timer
            Constraint::Length(1), // Range status
            Constraint::Length(2), // Encouragement / completion
            Constraint::Length(1), // Controls
        ])
        .split(columns[0]);

    let mut badges = vec![Span::styled(
        format!(" {} ", session.prompt_category.label()),
        Style::default()
            .fg(Color::White)
            .bg(style::PURPLE)
            .add_modifier(Modifier::BOLD),
    )];
    if let Some(range) = session.active_range {
        badges.push(Span::raw(" "));
        badges.push(Span::styled(
            format!(" {} ", range_label(range)),
            Style::default().fg(Color::Black).bg(style::AMBER),
        ));
    }
    if state.session.is_themed() {
        badges.push(Span::styled(" ♥", Style::default().fg(style::PINK)));
    }
    f.render_widget(Paragraph::new(Line::from(badges)), main[0]);

    let (body, author) = parse_prompt(session.prompt_category, &session.current_prompt);
    let prompt_block = Block::default().borders(Borders::ALL).title("Your topic");
    let text_width = prompt_block.inner(main[1]).width as usize;
    let body_style = if session.prompt_category == PromptCategory::Quote {
        Style::default().add_modifier(Modifier::ITALIC | Modifier::BOLD)
    } else {
        Style::default().add_modifier(Modifier::BOLD)
    };
    let mut lines: Vec<Line> = wrap_text(&body, text_width)
        .into_iter()
        .map(|line| Line::from(Span::styled(line, body_style)))
        .collect();
    if let Some(author) = author {
        lines.push(Line::from(""));
        lines.push(Line::from(Span::styled(
            format!("— {author}"),
            Style::default().fg(style::GRAY_DIM),
        )));
    }
    f.render_widget(
        Paragraph::new(lines)
            .alignment(Alignment::Center)
            .block(prompt_block),
        main[1],
    );

    let color = timer_color(session);
    let timer_status = if session.is_completed {
        "Completed"
    } else if session.is_running {
        "Speaking"
    } else {
        "Paused"
    };
    let timer = Paragraph::new(vec![
        Line::from(""),
        Line::from(Span::styled(
            format_elapsed(session.elapsed_seconds),
            Style::default().add_modifier(Modifier::BOLD),
        )),
        Line::from(timer_status),
    ])
    .alignment(Alignment::Center)
    .style(Style::default().fg(Color::White).bg(color))
    .block(Block::default().borders(Borders::ALL));
    f.render_widget(timer, main[2]);

    if let Some(status) = range_status_text(session) {
        f.render_widget(
            Paragraph::new(Span::styled(status, Style::default().fg(color)))
                .alignment(Alignment::Center),
            main[3],
        );
    }

    let message = if session.is_completed {
        vec![
            Line::from(Span::styled(
                "Fantastic Job!",
                Style::default()
                    .fg(style::EMERALD)
                    .add_modifier(Modifier::BOLD),
            )),
            Line::from(completion_message(session.elapsed_seconds)),
        ]
    } else if session.is_running {
        vec![Line::from(encouragement(session.elapsed_seconds))]
    } else {
        vec![]
    };
    f.render_widget(
        Paragraph::new(message).alignment(Alignment::Center),
        main[4],
    );

    f.render_widget(Paragraph::new(Line::from(control_spans(state))), main[5]);

    render_tips(f, columns[1]);
}

fn render_tips(f: &mut ratatui::Frame, area: Rect) {
    let mut lines = vec![
        Line::from(Span::styled(
            "PREP Framework",
            Style::default().add_modifier(Modifier::BOLD),
        )),
    ];
    for (word, hint) in PREP_STEPS {
        lines.push(Line::from(vec![
            Span::styled(
                format!("{} ", &word[..1]),
                Style::default()
                    .fg(style::PURPLE)
                    .add_modifier(Modifier::BOLD),
            ),
            Span::styled(word, Style::default().add_modifier(Modifier::BOLD)),
            Span::raw(format!(" - {hint}")),
        ]));
    }
    lines.push(Line::from(""));
    lines.extend(TIPS.iter().map(|tip| Line::from(format!("• {tip}"))));

    f.render_widget(
        Paragraph::new(lines)
            .wrap(Wrap { trim: true })
            .block(Block::default().borders(Borders::ALL).title("Quick Tips")),
        area,
    );
}

// ── Overlays ─────────────────────────────────────────────────────────────

fn render_notice_dialog(f: &mut ratatui::Frame, state: &AppState) {
    let Some(err) = &state.notice else {
        return;
    };

    let area = centered_rect_fixed_height(60, 5, f.area());
    f.render_widget(Clear, area);

    let block = Block::default()
        .borders(Borders::ALL)
        .title("Invalid time range")
        .border_style(Style::default().fg(style::RED));
    let inner = block.inner(area);
    f.render_widget(block, area);

    let layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Min(1),    // Message
            Constraint::Length(1), // Help
        ])
        .split(inner);
    f.render_widget(
        Paragraph::new(err.to_string()).wrap(Wrap { trim: true }),
        layout[0],
    );
    f.render_widget(
        Paragraph::new("Press any key to continue").style(Style::default().fg(style::GRAY_DIM)),
        layout[1],
    );
}

fn render_confetti(f: &mut ratatui::Frame, state: &AppState, now: DateTime<Utc>) {
    let Some(burst) = state.confetti.active() else {
        return;
    };
    let area = f.area();
    if area.width == 0 || area.height == 0 {
        return;
    }
    let age = burst.age_secs(now);
    let buf = f.buffer_mut();
    for particle in &burst.particles {
        let x = area.x + (particle.x * f64::from(area.width - 1)).round() as u16;
        let fallen = age * particle.speed * f64::from(area.height);
        if fallen >= f64::from(area.height) {
            continue;
        }
        let y = area.y + fallen as u16;
        if let Some(cell) = buf.cell_mut((x, y)) {
            cell.set_char(particle.glyph).set_fg(particle.color);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::PracticeDefaults;
    use crate::key_event::{AppKeyCode, AppKeyEvent};
    use crate::prompts::{PromptLibrary, PromptPools};
    use rand::rngs::StdRng;
    use rand::SeedableRng;
    use ratatui::backend::TestBackend;
    use ratatui::Terminal;

    fn render(state: &AppState) -> String {
        let backend = TestBackend::new(120, 36);
        let mut terminal = Terminal::new(backend).unwrap();
        terminal
            .draw(|f| ui_at(f, state, APP_TITLE, Utc::now()))
            .unwrap();
        terminal
            .backend()
            .buffer()
            .content()
            .iter()
            .map(|cell| cell.symbol())
            .collect()
    }

    fn quote_only_library() -> PromptLibrary {
        let pools = PromptPools::new(
            vec!["\"Do it.\" - Someone".to_string()],
            vec!["Tea beats coffee.".to_string()],
            vec!["Why?".to_string()],
        )
        .unwrap();
        PromptLibrary::with_standard(pools)
    }

    fn press(state: &mut AppState, code: AppKeyCode) {
        state.handle_key(AppKeyEvent::plain(code));
    }

    #[test]
    fn landing_shows_hero_and_features() {
        let state = AppState::new(PromptLibrary::default(), PracticeDefaults::default());
        let screen = render(&state);
        assert!(screen.contains("Practice Makes Perfect"));
        assert!(screen.contains("Start Practice"));
        assert!(screen.contains("Think On Your Feet"));
    }

    #[test]
    fn settings_panel_lists_presets() {
        let mut state = AppState::new(PromptLibrary::default(), PracticeDefaults::default());
        state.enter_practice();
        let screen = render(&state);
        assert!(screen.contains("Setup Your Practice"));
        assert!(screen.contains("[1-2 min]"));
        assert!(screen.contains("[Question]"));
    }

    #[test]
    fn notice_dialog_shows_validation_message() {
        let mut state = AppState::new(PromptLibrary::default(), PracticeDefaults::default());
        state.enter_practice();
        press(&mut state, AppKeyCode::Left);
        press(&mut state, AppKeyCode::Enter);
        let screen = render(&state);
        assert!(screen.contains("Invalid time range"));
        assert!(screen.contains("Please enter both minimum and maximum time values."));
    }

    #[test]
    fn running_view_splits_quote_and_attribution() {
        let defaults = PracticeDefaults {
            category: PromptCategory::Quote,
            ..PracticeDefaults::default()
        };
        let mut state = AppState::new(quote_only_library(), defaults);
        state.enter_practice();
        press(&mut state, AppKeyCode::Enter);

        let screen = render(&state);
        assert!(screen.contains("Do it."));
        assert!(!screen.contains("\"Do it.\""));
        assert!(screen.contains("Someone"));
        assert!(screen.contains("00:00"));
        assert!(screen.contains("1.0 min to minimum"));
        assert!(screen.contains("Start"));
        assert!(!screen.contains("Done"));
    }

    #[test]
    fn completed_view_congratulates() {
        let mut state = AppState::new(quote_only_library(), PracticeDefaults::default());
        state.enter_practice();
        press(&mut state, AppKeyCode::Enter);
        press(&mut state, AppKeyCode::Char(' '));
        for _ in 0..65 {
            state.session.tick();
        }
        press(&mut state, AppKeyCode::Char('d'));
        state.confetti.clear();

        let screen = render(&state);
        assert!(screen.contains("Fantastic Job!"));
        assert!(screen.contains("You spoke for 01:05!"));
        assert!(screen.contains("0.9 min remaining"));
    }

    #[test]
    fn confetti_overlay_draws_particles() {
        let mut state = AppState::new(PromptLibrary::default(), PracticeDefaults::default());
        state.session.set_themed(true);
        let now = Utc::now();
        state.confetti.launch(
            CelebrationVariant::Heart,
            now,
            &mut StdRng::seed_from_u64(5),
        );

        let backend = TestBackend::new(80, 24);
        let mut terminal = Terminal::new(backend).unwrap();
        terminal.draw(|f| ui_at(f, &state, APP_TITLE, now)).unwrap();
        let hearts = terminal
            .backend()
            .buffer()
            .content()
            .iter()
            .filter(|cell| cell.symbol() == "♥" || cell.symbol() == "❤")
            .count();
        assert!(hearts > 0);
    }
}
