use ratatui::style::{Color, Style, Stylize};

use crate::render::presentation::DEFAULT_COLOR;
use crate::surface::NoticeKind;
use crate::widget::settings::Theme;

pub fn dim_unless_focused(is_focused: bool, style: Style) -> Style {
    if is_focused { style.bold() } else { style.dim().italic() }
}

/// Parse "#rrggbb" into a terminal color.
pub fn hex_color(hex: &str) -> Option<Color> {
    let digits = hex.strip_prefix('#')?;
    if digits.len() != 6 {
        return None;
    }
    let value = u32::from_str_radix(digits, 16).ok()?;
    Some(Color::Rgb((value >> 16) as u8, (value >> 8) as u8, value as u8))
}

pub fn badge_color(hex: &str) -> Color {
    hex_color(hex)
        .or_else(|| hex_color(DEFAULT_COLOR))
        .unwrap_or(Color::Gray)
}

#[derive(Debug, Clone, Copy)]
pub struct Palette {
    pub background: Color,
    pub text: Color,
    pub muted: Color,
    pub own: Color,
    pub agent: Color,
    pub border: Color,
}

pub fn palette(theme: Theme) -> Palette {
    match theme {
        Theme::Light => Palette {
            background: Color::Rgb(255, 255, 255),
            text: Color::Rgb(17, 24, 39),
            muted: Color::Rgb(107, 114, 128),
            own: Color::Rgb(37, 99, 235),
            agent: Color::Rgb(5, 150, 105),
            border: Color::Rgb(209, 213, 219),
        },
        Theme::Dark => Palette {
            background: Color::Rgb(30, 30, 30),
            text: Color::Rgb(243, 244, 246),
            muted: Color::Rgb(156, 163, 175),
            own: Color::Cyan,
            agent: Color::Green,
            border: Color::Rgb(75, 85, 99),
        },
    }
}

pub fn notice_color(kind: NoticeKind) -> Color {
    match kind {
        NoticeKind::Info => Color::Blue,
        NoticeKind::Success => Color::Green,
        NoticeKind::Warning => Color::Yellow,
    }
}
