use crate::app::{App, View};
use ratatui::{
    layout::{Constraint, Direction, Layout},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

mod calendar_view;
mod entries_view;
mod projects_view;
pub(super) mod widgets;

pub fn render(frame: &mut Frame, app: &mut App) {
    let root = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1), // tab bar
            Constraint::Min(0),    // body
            Constraint::Length(1), // status line
        ])
        .split(frame.area());

    render_tab_bar(frame, root[0], app);

    match app.current_view {
        View::Projects => projects_view::render_projects_view(frame, app, root[1]),
        View::Entries => entries_view::render_entries_view(frame, app, root[1]),
        View::Calendar => calendar_view::render_calendar_view(frame, app, root[1]),
    }

    render_status_line(frame, root[2], app);

    if app.modal.is_some() {
        calendar_view::render_entry_modal(frame, app);
    }
}

fn render_tab_bar(frame: &mut Frame, area: ratatui::layout::Rect, app: &mut App) {
    let tab = |label: &str, view: View| {
        if app.current_view == view {
            Span::styled(
                format!(" {} ", label),
                Style::default()
                    .fg(Color::Black)
                    .bg(Color::Yellow)
                    .add_modifier(Modifier::BOLD),
            )
        } else {
            Span::styled(format!(" {} ", label), Style::default().fg(Color::Gray))
        }
    };

    let spans = vec![
        Span::styled(" stint ", Style::default().fg(Color::Cyan)),
        tab("1 Projects", View::Projects),
        tab("2 Entries", View::Entries),
        tab("3 Calendar", View::Calendar),
    ];

    if app.is_loading {
        let throbber = throbber_widgets_tui::Throbber::default()
            .style(Style::default().fg(Color::Yellow))
            .throbber_set(throbber_widgets_tui::BRAILLE_SIX);
        frame.render_stateful_widget(
            throbber,
            ratatui::layout::Rect {
                x: area.right().saturating_sub(2),
                y: area.y,
                width: 1,
                height: 1,
            },
            &mut app.throbber_state,
        );
    }

    frame.render_widget(Paragraph::new(Line::from(spans)), area);
}

fn render_status_line(frame: &mut Frame, area: ratatui::layout::Rect, app: &App) {
    let line = match &app.status_message {
        Some(message) => Line::from(Span::styled(
            message.clone(),
            Style::default().fg(Color::Yellow),
        )),
        None => Line::from(Span::styled(
            "Ctrl+C: quit",
            Style::default().fg(Color::DarkGray),
        )),
    };
    frame.render_widget(Paragraph::new(line), area);
}
