/// Key event that both crossterm and ratzilla events convert to.
#[derive(Debug, Clone)]
pub struct AppKeyEvent {
    pub code: AppKeyCode,
    pub ctrl: bool,
    pub alt: bool,
    pub shift: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AppKeyCode {
    Char(char),
    Backspace,
    Enter,
    Left,
    Right,
    Up,
    Down,
    Tab,
    BackTab,
    Delete,
    Home,
    End,
    Esc,
    Other,
}

impl AppKeyEvent {
    /// A key press without modifiers.
    pub fn plain(code: AppKeyCode) -> Self {
        Self {
            code,
            ctrl: false,
            alt: false,
            shift: false,
        }
    }

    pub fn is_ctrl_c(&self) -> bool {
        self.ctrl && self.code == AppKeyCode::Char('c')
    }

    /// Case-insensitive match on an unmodified character key.
    pub fn is_char(&self, expected: char) -> bool {
        match self.code {
            AppKeyCode::Char(c) => !self.ctrl && !self.alt && c.eq_ignore_ascii_case(&expected),
            _ => false,
        }
    }
}
