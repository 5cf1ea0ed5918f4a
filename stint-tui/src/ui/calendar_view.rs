use crate::app::{grid, App, ModalMode};
use crate::time_utils::format_table_datetime;
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Padding, Paragraph},
    Frame,
};

use super::entries_view::entry_draft_row;
use super::widgets::{centered_rect, fmt_duration, project_color};

const CELL_WIDTH: usize = 9;

pub fn render_calendar_view(frame: &mut Frame, app: &App, body: Rect) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // day headers + totals
            Constraint::Min(0),    // hour grid
            Constraint::Length(3), // controls
        ])
        .split(body);

    render_header(frame, app, chunks[0]);
    render_grid(frame, app, chunks[1]);
    render_controls(frame, app, chunks[2]);
}

fn render_header(frame: &mut Frame, app: &App, area: Rect) {
    let days = grid::week_days(app.week_start);

    let mut header_spans = vec![Span::raw("     ")];
    let mut total_spans = vec![Span::styled("Total", Style::default().fg(Color::DarkGray))];
    for (idx, day) in days.iter().enumerate() {
        let label = format!(
            "{} {:02}/{:02}",
            &day.weekday().to_string()[..3],
            day.month() as u8,
            day.day()
        );
        let style = if idx == app.calendar_day {
            Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(Color::White)
        };
        header_spans.push(Span::styled(format!("{:<width$}", label, width = CELL_WIDTH), style));

        let total = grid::day_total(&app.entries, *day);
        let total_label = if total == 0 {
            String::new()
        } else {
            fmt_duration(total)
        };
        total_spans.push(Span::styled(
            format!("{:<width$}", total_label, width = CELL_WIDTH),
            Style::default().fg(Color::Magenta),
        ));
    }

    let title = format!(" Week of {} ", days[0]);
    frame.render_widget(
        Paragraph::new(vec![Line::from(header_spans), Line::from(total_spans)]).block(
            Block::default()
                .borders(Borders::TOP)
                .border_style(Style::default().fg(Color::DarkGray))
                .title(title),
        ),
        area,
    );
}

fn render_grid(frame: &mut Frame, app: &App, area: Rect) {
    let days = grid::week_days(app.week_start);
    let visible_rows = area.height as usize;

    // Scroll the 24-hour column so the cursor row stays visible.
    let start_hour = if visible_rows >= 24 {
        0
    } else {
        let cursor = app.calendar_hour as usize;
        cursor
            .saturating_sub(visible_rows.saturating_sub(1))
            .min(24 - visible_rows)
    };

    let mut lines = Vec::new();
    for hour in (start_hour as u8)..24 {
        if lines.len() >= visible_rows {
            break;
        }
        let mut spans = vec![Span::styled(
            format!("{:02}   ", hour),
            Style::default().fg(Color::DarkGray),
        )];
        for (day_idx, day) in days.iter().enumerate() {
            let cell_entries = grid::entries_for_cell(&app.entries, *day, hour);
            let is_cursor = day_idx == app.calendar_day && hour == app.calendar_hour;

            let (text, mut style) = match cell_entries.first() {
                Some(entry) => {
                    let label = if cell_entries.len() > 1 {
                        format!("██ ×{}", cell_entries.len())
                    } else {
                        "██".to_string()
                    };
                    (
                        label,
                        Style::default().fg(project_color(&app.projects, entry.project_id)),
                    )
                }
                None => ("·".to_string(), Style::default().fg(Color::DarkGray)),
            };
            if is_cursor {
                style = style.add_modifier(Modifier::REVERSED);
            }
            spans.push(Span::styled(
                format!("{:<width$}", text, width = CELL_WIDTH),
                style,
            ));
        }
        lines.push(Line::from(spans));
    }

    frame.render_widget(Paragraph::new(lines), area);
}

fn render_controls(frame: &mut Frame, app: &App, area: Rect) {
    let hint = if app.modal.is_some() {
        match app.modal.as_ref().map(|m| &m.mode) {
            Some(ModalMode::Editing(_)) => "Tab: field  Enter: save  Esc: back",
            _ => "e/Enter: edit  d: delete  Esc: close",
        }
    } else {
        "h/l: day  j/k: hour  [/]: week  t: today  Enter: open  r: refresh  1/2/3: view  q: quit"
    };
    frame.render_widget(
        Paragraph::new(Span::styled(hint, Style::default().fg(Color::DarkGray))).block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::DarkGray))
                .title(" Controls "),
        ),
        area,
    );
}

pub fn render_entry_modal(frame: &mut Frame, app: &App) {
    let Some(modal) = &app.modal else { return };

    let area = centered_rect(72, 10, frame.area());
    frame.render_widget(Clear, area);

    let mut lines = vec![Line::from("")];
    match (&modal.mode, app.modal_entry()) {
        (ModalMode::Editing(draft), _) => {
            lines.push(entry_draft_row(app, draft));
        }
        (ModalMode::Details, Some(entry)) => {
            lines.push(Line::from(vec![
                Span::styled(
                    "■ ",
                    Style::default().fg(project_color(&app.projects, entry.project_id)),
                ),
                Span::styled(
                    entry.display_project_name(&app.projects).to_string(),
                    Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD),
                ),
            ]));
            lines.push(Line::from(Span::styled(
                entry.description.clone(),
                Style::default().fg(Color::Gray),
            )));
            lines.push(Line::from(Span::styled(
                format!(
                    "{} - {}  [{}]",
                    format_table_datetime(entry.start_time),
                    format_table_datetime(entry.end_time),
                    fmt_duration(entry.duration)
                ),
                Style::default().fg(Color::Yellow),
            )));
        }
        // The entry vanished from a refresh while the modal was open.
        (ModalMode::Details, None) => {
            lines.push(Line::from(Span::styled(
                "Entry no longer exists",
                Style::default().fg(Color::Red),
            )));
        }
    }

    if modal.in_flight {
        lines.push(Line::from(""));
        lines.push(Line::from(Span::styled(
            "Working…",
            Style::default().fg(Color::Yellow),
        )));
    }

    frame.render_widget(
        Paragraph::new(lines).block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::Yellow))
                .title(Span::styled(
                    " Time entry ",
                    Style::default().fg(Color::Yellow),
                ))
                .padding(Padding::horizontal(2)),
        ),
        area,
    );
}
