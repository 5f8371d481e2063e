// Type badge colors: static lookup, unknown types fall back to gray

use crate::display::capitalize_first;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::Span;

pub const DEFAULT_BADGE_COLOR: Color = Color::Rgb(107, 114, 128);

const BADGE_COLORS: &[(&str, Color)] = &[
    ("fire", Color::Rgb(239, 68, 68)),
    ("water", Color::Rgb(59, 130, 246)),
    ("grass", Color::Rgb(34, 197, 94)),
    ("steel", Color::Rgb(156, 163, 175)),
    ("flying", Color::Rgb(147, 197, 253)),
    ("electric", Color::Rgb(250, 204, 21)),
    ("poison", Color::Rgb(168, 85, 247)),
    ("psychic", Color::Rgb(236, 72, 153)),
    ("dark", Color::Rgb(55, 65, 81)),
    ("fighting", Color::Rgb(185, 28, 28)),
    ("dragon", Color::Rgb(79, 70, 229)),
    ("ice", Color::Rgb(103, 232, 249)),
    ("fairy", Color::Rgb(249, 168, 212)),
    ("normal", Color::Rgb(156, 163, 175)),
    ("ground", Color::Rgb(202, 138, 4)),
    ("rock", Color::Rgb(133, 77, 14)),
    ("bug", Color::Rgb(132, 204, 22)),
    ("ghost", Color::Rgb(126, 34, 206)),
];

/// Badge background for a type name (case-insensitive)
pub fn type_color(type_name: &str) -> Color {
    BADGE_COLORS
        .iter()
        .find(|(name, _)| name.eq_ignore_ascii_case(type_name))
        .map(|(_, color)| *color)
        .unwrap_or(DEFAULT_BADGE_COLOR)
}

/// " Fire " on the type's color
pub fn type_badge(type_name: &str) -> Span<'static> {
    Span::styled(
        format!(" {} ", capitalize_first(type_name)),
        Style::default()
            .fg(Color::White)
            .bg(type_color(type_name))
            .add_modifier(Modifier::BOLD),
    )
}
