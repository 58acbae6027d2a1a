use ratatui::style::Color;

pub const PURPLE: Color = Color::Rgb(0x8B, 0x5C, 0xF6);
pub const EMERALD: Color = Color::Rgb(0x34, 0xD3, 0x99);
pub const AMBER: Color = Color::Rgb(0xFB, 0xBF, 0x24);
pub const ORANGE: Color = Color::Rgb(0xFB, 0x92, 0x3C);
pub const RED: Color = Color::Rgb(0xEF, 0x44, 0x44);
pub const PINK: Color = Color::Rgb(0xFF, 0x14, 0x61);
pub const GRAY_DIM: Color = Color::DarkGray;

pub const CONFETTI: &[Color] = &[PURPLE, EMERALD, AMBER, ORANGE, RED, Color::Rgb(0x60, 0xA5, 0xFA)];
pub const HEARTS: &[Color] = &[PINK, Color::Rgb(0xFF, 0x69, 0xB4), Color::Rgb(0xFF, 0xB6, 0xC1)];
