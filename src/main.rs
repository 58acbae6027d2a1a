use std::fs::{self, File};
use std::io;
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use std::time::Duration;

use anyhow::{bail, Context, Result};
use clap::{Parser, ValueEnum};
use crossterm::event::{self, Event, KeyCode, KeyEventKind, KeyModifiers};
use crossterm::execute;
use crossterm::terminal::{self, disable_raw_mode, enable_raw_mode, SetTitle};
use ratatui::backend::CrosstermBackend;
use ratatui::Terminal;
use serde::Deserialize;
use tracing_subscriber::EnvFilter;

use speak_core::app::{AppState, PracticeDefaults};
use speak_core::key_event::{AppKeyCode, AppKeyEvent};
use speak_core::prompts::{PromptLibrary, PromptPools};
use speak_core::types::{find_preset, PromptCategory, TimerMode, TIME_PRESETS};
use speak_core::ui;

const IDLE_POLL: Duration = Duration::from_millis(200);
const ANIMATION_POLL: Duration = Duration::from_millis(50);

// ── Key event conversion ─────────────────────────────────────────────────

fn convert_key(key: crossterm::event::KeyEvent) -> AppKeyEvent {
    let code = match key.code {
        KeyCode::Char(c) => AppKeyCode::Char(c),
        KeyCode::Backspace => AppKeyCode::Backspace,
        KeyCode::Enter => AppKeyCode::Enter,
        KeyCode::Left => AppKeyCode::Left,
        KeyCode::Right => AppKeyCode::Right,
        KeyCode::Up => AppKeyCode::Up,
        KeyCode::Down => AppKeyCode::Down,
        KeyCode::Tab => AppKeyCode::Tab,
        KeyCode::BackTab => AppKeyCode::BackTab,
        KeyCode::Delete => AppKeyCode::Delete,
        KeyCode::Home => AppKeyCode::Home,
        KeyCode::End => AppKeyCode::End,
        KeyCode::Esc => AppKeyCode::Esc,
        _ => AppKeyCode::Other,
    };
    AppKeyEvent {
        code,
        ctrl: key.modifiers.contains(KeyModifiers::CONTROL),
        alt: key.modifiers.contains(KeyModifiers::ALT),
        shift: key.modifiers.contains(KeyModifiers::SHIFT),
    }
}

// ── Config ───────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
struct CliConfig {
    prompts: Option<PathBuf>,
    category: Option<PromptCategory>,
    mode: Option<TimerMode>,
    preset: Option<String>,
    themed: Option<bool>,
}

fn config_path() -> Result<PathBuf> {
    let home = std::env::var("HOME").context("HOME not set; please set HOME")?;
    Ok(Path::new(&home).join(".config/speak-cli/config.json"))
}

/// A missing file is an empty config; an unreadable or malformed one is an error.
fn load_config(path: &Path) -> Result<CliConfig> {
    if !path.exists() {
        return Ok(CliConfig::default());
    }
    let content = fs::read_to_string(path)
        .with_context(|| format!("Failed to read config {}", path.display()))?;
    serde_json::from_str(&content).with_context(|| format!("Invalid config {}", path.display()))
}

fn load_prompts(path: &Path) -> Result<PromptPools> {
    let content = fs::read_to_string(path)
        .with_context(|| format!("Failed to read prompt file {}", path.display()))?;
    let is_yaml = matches!(
        path.extension().and_then(|e| e.to_str()),
        Some("yaml" | "yml")
    );
    let pools = if is_yaml {
        PromptPools::from_yaml_str(&content)
    } else {
        PromptPools::from_json_str(&content)
    };
    pools.with_context(|| format!("Failed to load prompts from {}", path.display()))
}

// ── Logging ──────────────────────────────────────────────────────────────

/// Logs go to a file only; the terminal belongs to the UI.
fn init_logging(log_file: Option<&Path>) -> Result<()> {
    let Some(path) = log_file else {
        return Ok(());
    };
    let file = File::create(path)
        .with_context(|| format!("Failed to create log file {}", path.display()))?;
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .init();
    Ok(())
}

// ── Main ─────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, ValueEnum)]
enum CategoryArg {
    Quote,
    Statement,
    Question,
}

impl From<CategoryArg> for PromptCategory {
    fn from(arg: CategoryArg) -> Self {
        match arg {
            CategoryArg::Quote => PromptCategory::Quote,
            CategoryArg::Statement => PromptCategory::Statement,
            CategoryArg::Question => PromptCategory::Question,
        }
    }
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum ModeArg {
    Stopwatch,
    TimeRange,
}

impl From<ModeArg> for TimerMode {
    fn from(arg: ModeArg) -> Self {
        match arg {
            ModeArg::Stopwatch => TimerMode::Stopwatch,
            ModeArg::TimeRange => TimerMode::TimeRange,
        }
    }
}

#[derive(Parser, Debug)]
#[command(name = "speak-cli")]
#[command(about = "Practice impromptu speaking against the clock", long_about = None)]
struct Args {
    /// Prompt file (JSON, or YAML with a .yaml/.yml extension) replacing the built-in topics
    #[arg(short, long)]
    prompts: Option<PathBuf>,
    /// Topic type selected when the practice view opens
    #[arg(long, value_enum)]
    category: Option<CategoryArg>,
    /// Timer mode selected when the practice view opens
    #[arg(long, value_enum)]
    mode: Option<ModeArg>,
    /// Time range preset selected when the practice view opens, e.g. "4-6 min"
    #[arg(long)]
    preset: Option<String>,
    /// Start in Valentine's Edition
    #[arg(long)]
    themed: bool,
    /// Write logs to this file (filter with RUST_LOG)
    #[arg(long)]
    log_file: Option<PathBuf>,
    /// Config file path (defaults to ~/.config/speak-cli/config.json)
    #[arg(long)]
    config: Option<PathBuf>,
}

/// Command-line flags win over the config file.
fn resolve_defaults(args: &Args, cfg: &CliConfig) -> Result<PracticeDefaults> {
    let mut defaults = PracticeDefaults::default();
    if let Some(category) = args.category.map(PromptCategory::from).or(cfg.category) {
        defaults.category = category;
    }
    if let Some(mode) = args.mode.map(TimerMode::from).or(cfg.mode) {
        defaults.mode = mode;
    }
    if let Some(label) = args.preset.as_deref().or(cfg.preset.as_deref()) {
        let Some(preset) = find_preset(label) else {
            let known: Vec<&str> = TIME_PRESETS.iter().map(|p| p.label).collect();
            bail!("Unknown preset '{label}'. Available: {}", known.join(", "));
        };
        defaults.preset = preset;
    }
    defaults.themed = args.themed || cfg.themed.unwrap_or(false);
    Ok(defaults)
}

fn build_app(args: &Args) -> Result<AppState> {
    let cfg_path = match &args.config {
        Some(path) => path.clone(),
        None => config_path()?,
    };
    let cfg = load_config(&cfg_path)?;
    let defaults = resolve_defaults(args, &cfg)?;

    let library = match args.prompts.as_ref().or(cfg.prompts.as_ref()) {
        Some(path) => PromptLibrary::with_standard(load_prompts(path)?),
        None => PromptLibrary::default(),
    };
    tracing::info!(?defaults, "starting");
    Ok(AppState::new(library, defaults))
}

fn main() -> Result<()> {
    let args = Args::parse();
    init_logging(args.log_file.as_deref())?;
    let mut app = build_app(&args)?;

    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, terminal::EnterAlternateScreen, SetTitle(ui::APP_TITLE))?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let res = run_app(&mut terminal, &mut app);

    disable_raw_mode()?;
    execute!(terminal.backend_mut(), terminal::LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    loop_outcome(res)
}

/// Logs a loop failure and hands it back so the process exits non-zero.
fn loop_outcome(res: Result<()>) -> Result<()> {
    if let Err(err) = &res {
        tracing::error!(%err, "terminal loop failed");
    }
    res
}

fn run_app(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    app: &mut AppState,
) -> Result<()> {
    loop {
        app.tick();
        terminal.draw(|f| ui::ui(f, app, ui::APP_TITLE))?;

        let timeout = if app.confetti.active().is_some() {
            ANIMATION_POLL
        } else {
            IDLE_POLL
        };
        if event::poll(timeout)? {
            if let Event::Key(key) = event::read()? {
                if key.kind == KeyEventKind::Press && app.handle_key(convert_key(key)) {
                    break;
                }
            }
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn args(extra: &[&str]) -> Args {
        Args::parse_from(std::iter::once("speak-cli").chain(extra.iter().copied()))
    }

    #[test]
    fn converts_crossterm_keys() {
        let key = crossterm::event::KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL);
        assert!(convert_key(key).is_ctrl_c());
        let key = crossterm::event::KeyEvent::new(KeyCode::BackTab, KeyModifiers::SHIFT);
        let converted = convert_key(key);
        assert_eq!(converted.code, AppKeyCode::BackTab);
        assert!(converted.shift);
    }

    #[test]
    fn loop_failure_is_returned() {
        assert!(loop_outcome(Ok(())).is_ok());
        let err = loop_outcome(Err(anyhow::anyhow!("draw failed"))).unwrap_err();
        assert_eq!(err.to_string(), "draw failed");
    }

    #[test]
    fn missing_config_is_empty() {
        let dir = tempfile::tempdir().unwrap();
        let cfg = load_config(&dir.path().join("nope.json")).unwrap();
        assert_eq!(cfg, CliConfig::default());
    }

    #[test]
    fn malformed_config_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");
        fs::write(&path, "{ not json").unwrap();
        assert!(load_config(&path).is_err());
    }

    #[test]
    fn flags_override_config() {
        let cfg: CliConfig = serde_json::from_str(
            r#"{"category": "quote", "mode": "stopwatch", "preset": "4-6 min", "themed": true}"#,
        )
        .unwrap();

        let defaults = resolve_defaults(&args(&[]), &cfg).unwrap();
        assert_eq!(defaults.category, PromptCategory::Quote);
        assert_eq!(defaults.mode, TimerMode::Stopwatch);
        assert_eq!(defaults.preset.label, "4-6 min");
        assert!(defaults.themed);

        let defaults = resolve_defaults(
            &args(&["--category", "statement", "--mode", "time-range", "--preset", "10-12 min"]),
            &cfg,
        )
        .unwrap();
        assert_eq!(defaults.category, PromptCategory::Statement);
        assert_eq!(defaults.mode, TimerMode::TimeRange);
        assert_eq!(defaults.preset.label, "10-12 min");
    }

    #[test]
    fn unknown_preset_is_rejected() {
        let err = resolve_defaults(&args(&["--preset", "3-4 min"]), &CliConfig::default()).unwrap_err();
        assert!(err.to_string().contains("Unknown preset '3-4 min'"));
    }

    #[test]
    fn prompt_file_format_follows_extension() {
        let dir = tempfile::tempdir().unwrap();

        let yaml = dir.path().join("topics.yaml");
        let mut file = File::create(&yaml).unwrap();
        writeln!(file, "quotes: ['\"Hi.\" - Me']\nstatements: [Tea.]\nquestions: [Why?]").unwrap();
        let pools = load_prompts(&yaml).unwrap();
        assert_eq!(pools.pool(PromptCategory::Question), ["Why?".to_string()]);

        let json = dir.path().join("topics.json");
        fs::write(&json, r#"{"quotes": ["a"], "statements": [], "questions": ["b"]}"#).unwrap();
        let err = load_prompts(&json).unwrap_err();
        assert!(format!("{err:#}").contains("statements"));
    }

    #[test]
    fn builds_app_from_config_file() {
        let dir = tempfile::tempdir().unwrap();
        let prompts = dir.path().join("topics.json");
        fs::write(
            &prompts,
            r#"{"quotes": ["\"Go.\" - Coach"], "statements": ["Sleep more."], "questions": ["When?"]}"#,
        )
        .unwrap();
        let config = dir.path().join("config.json");
        fs::write(
            &config,
            format!(r#"{{"prompts": {:?}, "category": "statement"}}"#, prompts),
        )
        .unwrap();

        let app = build_app(&args(&["--config", config.to_str().unwrap()])).unwrap();
        assert_eq!(app.defaults.category, PromptCategory::Statement);
        assert_eq!(
            app.library.standard.pool(PromptCategory::Statement),
            ["Sleep more.".to_string()]
        );
    }
}
