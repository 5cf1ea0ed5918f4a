use crate::app::TextInput;
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::Span,
};
use stint_client::domain::Project;

use crate::app::grid;

/// Display colors assigned to projects by list position. Same 16 colors the
/// web dashboard uses.
pub const PALETTE: [Color; 16] = [
    Color::Rgb(0x00, 0x7b, 0xff),
    Color::Rgb(0x28, 0xa7, 0x45),
    Color::Rgb(0xff, 0xc1, 0x07),
    Color::Rgb(0x17, 0xa2, 0xb8),
    Color::Rgb(0x66, 0x10, 0xf2),
    Color::Rgb(0xfd, 0x7e, 0x14),
    Color::Rgb(0x6f, 0x42, 0xc1),
    Color::Rgb(0xe8, 0x3e, 0x8c),
    Color::Rgb(0x20, 0xc9, 0x97),
    Color::Rgb(0x34, 0x3a, 0x40),
    Color::Rgb(0xff, 0x38, 0x60),
    Color::Rgb(0x00, 0xd1, 0xb2),
    Color::Rgb(0xff, 0xdd, 0x57),
    Color::Rgb(0x23, 0xd1, 0x60),
    Color::Rgb(0x32, 0x73, 0xdc),
    Color::Rgb(0xff, 0x6f, 0x61),
];

/// Color for a project's calendar blocks. Entries whose project no longer
/// exists fall back to gray.
pub fn project_color(projects: &[Project], project_id: i64) -> Color {
    grid::project_color_index(projects, project_id)
        .map(|idx| PALETTE[idx])
        .unwrap_or(Color::DarkGray)
}

/// Input value with a block cursor when focused.
pub fn input_display(input: &TextInput, focused: bool) -> String {
    if !focused {
        return input.value.clone();
    }
    let byte = input
        .value
        .char_indices()
        .nth(input.cursor)
        .map(|(i, _)| i)
        .unwrap_or(input.value.len());
    format!("{}█{}", &input.value[..byte], &input.value[byte..])
}

pub fn field_label(label: &str, focused: bool) -> Span<'static> {
    if focused {
        Span::styled(
            format!("{}: ", label),
            Style::default()
                .fg(Color::Yellow)
                .add_modifier(Modifier::BOLD),
        )
    } else {
        Span::styled(format!("{}: ", label), Style::default().fg(Color::DarkGray))
    }
}

pub fn fmt_duration(minutes: i64) -> String {
    format!("{}h {:02}m", minutes / 60, minutes.rem_euclid(60))
}

pub fn centered_rect(width: u16, height: u16, r: Rect) -> Rect {
    let popup_layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length((r.height.saturating_sub(height)) / 2),
            Constraint::Length(height),
            Constraint::Length((r.height.saturating_sub(height)) / 2),
        ])
        .split(r);

    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Length((r.width.saturating_sub(width)) / 2),
            Constraint::Length(width),
            Constraint::Length((r.width.saturating_sub(width)) / 2),
        ])
        .split(popup_layout[1])[1]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cursor_renders_mid_string() {
        let mut input = TextInput::from_str("abc");
        input.move_left();
        assert_eq!(input_display(&input, true), "ab█c");
        assert_eq!(input_display(&input, false), "abc");
    }

    #[test]
    fn durations_format_as_hours_and_minutes() {
        assert_eq!(fmt_duration(45), "0h 45m");
        assert_eq!(fmt_duration(90), "1h 30m");
        assert_eq!(fmt_duration(600), "10h 00m");
    }

    #[test]
    fn orphaned_project_reference_is_gray() {
        assert_eq!(project_color(&[], 42), Color::DarkGray);
    }
}
