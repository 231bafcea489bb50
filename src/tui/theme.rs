use ratatui::style::Color;

use crate::models::{Difficulty, Theme};

/// Colors used by every widget for one theme.
#[derive(Debug, Clone, Copy)]
pub struct Palette {
    pub bg: Color,
    pub fg: Color,
    pub muted: Color,
    pub accent: Color,
    pub highlight: Color,
    pub border: Color,
    pub bar_bg: Color,
    pub code: Color,
}

impl Palette {
    pub fn for_theme(theme: Theme) -> Self {
        match theme {
            Theme::Dark => Self {
                bg: Color::Reset,
                fg: Color::White,
                muted: Color::Gray,
                accent: Color::Cyan,
                highlight: Color::Yellow,
                border: Color::DarkGray,
                bar_bg: Color::DarkGray,
                code: Color::LightGreen,
            },
            Theme::Light => Self {
                bg: Color::White,
                fg: Color::Black,
                muted: Color::DarkGray,
                accent: Color::Blue,
                highlight: Color::Magenta,
                border: Color::Gray,
                bar_bg: Color::Gray,
                code: Color::Green,
            },
        }
    }

    pub fn difficulty(&self, difficulty: Difficulty) -> Color {
        match difficulty {
            Difficulty::Easy => Color::Green,
            Difficulty::Medium => Color::Yellow,
            Difficulty::Hard => Color::Red,
        }
    }
}
