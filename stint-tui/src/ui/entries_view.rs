use crate::app::{App, EntryDraft, EntryField, FilterField, PaneFocus, RowState};
use crate::time_utils::format_table_datetime;
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Padding, Paragraph},
    Frame,
};
use stint_client::domain::TimeEntry;

use super::widgets::{field_label, fmt_duration, input_display, project_color};

pub fn render_entries_view(frame: &mut Frame, app: &App, body: Rect) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(4), // create form
            Constraint::Length(4), // filters
            Constraint::Min(0),    // table
            Constraint::Length(3), // controls
        ])
        .split(body);

    render_form(frame, app, chunks[0]);
    render_filters(frame, app, chunks[1]);
    render_table(frame, app, chunks[2]);
    render_controls(frame, app, chunks[3]);
}

fn project_picker_display(app: &App, draft: &EntryDraft) -> String {
    match draft.project_idx.and_then(|i| app.projects.get(i)) {
        Some(project) => format!("< {} >", project.name),
        None => "< select >".to_string(),
    }
}

fn render_form(frame: &mut Frame, app: &App, area: Rect) {
    let form_focused = app.entries_focus == PaneFocus::Form && app.entry_rows.is_viewing();
    let focused = |field: EntryField| form_focused && app.entry_form.focused == field;

    let lines = vec![
        Line::from(vec![
            field_label("Project", focused(EntryField::Project)),
            Span::raw(project_picker_display(app, &app.entry_form)),
            Span::raw("   "),
            field_label("Description", focused(EntryField::Description)),
            Span::raw(input_display(
                &app.entry_form.description,
                focused(EntryField::Description),
            )),
        ]),
        Line::from(vec![
            field_label("Start", focused(EntryField::Start)),
            Span::raw(input_display(
                &app.entry_form.start_input,
                focused(EntryField::Start),
            )),
            Span::raw("   "),
            field_label("End", focused(EntryField::End)),
            Span::raw(input_display(
                &app.entry_form.end_input,
                focused(EntryField::End),
            )),
            Span::styled(
                "   (YYYY-MM-DDTHH:MM)",
                Style::default().fg(Color::DarkGray),
            ),
        ]),
    ];

    let border = if form_focused {
        Style::default().fg(Color::Yellow)
    } else {
        Style::default().fg(Color::DarkGray)
    };
    frame.render_widget(
        Paragraph::new(lines).block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(border)
                .title(" New entry ")
                .padding(Padding::horizontal(1)),
        ),
        area,
    );
}

fn render_filters(frame: &mut Frame, app: &App, area: Rect) {
    let filter_focused = app.entries_focus == PaneFocus::Filter && app.entry_rows.is_viewing();
    let focused = |field: FilterField| filter_focused && app.filter.focused == field;

    let lines = vec![
        Line::from(vec![
            field_label("Project id", focused(FilterField::Project)),
            Span::raw(input_display(
                &app.filter.project_id,
                focused(FilterField::Project),
            )),
            Span::raw("  "),
            field_label("Description", focused(FilterField::Description)),
            Span::raw(input_display(
                &app.filter.description,
                focused(FilterField::Description),
            )),
            Span::raw("  "),
            field_label("Min", focused(FilterField::MinDuration)),
            Span::raw(input_display(
                &app.filter.min_duration,
                focused(FilterField::MinDuration),
            )),
            Span::raw("  "),
            field_label("Max", focused(FilterField::MaxDuration)),
            Span::raw(input_display(
                &app.filter.max_duration,
                focused(FilterField::MaxDuration),
            )),
        ]),
        Line::from(vec![
            field_label("From", focused(FilterField::StartDate)),
            Span::raw(input_display(
                &app.filter.start_date,
                focused(FilterField::StartDate),
            )),
            Span::raw("  "),
            field_label("To", focused(FilterField::EndDate)),
            Span::raw(input_display(
                &app.filter.end_date,
                focused(FilterField::EndDate),
            )),
        ]),
    ];

    let border = if filter_focused {
        Style::default().fg(Color::Yellow)
    } else {
        Style::default().fg(Color::DarkGray)
    };
    frame.render_widget(
        Paragraph::new(lines).block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(border)
                .title(" Filters ")
                .padding(Padding::horizontal(1)),
        ),
        area,
    );
}

fn render_table(frame: &mut Frame, app: &App, area: Rect) {
    let table_focused = app.entries_focus == PaneFocus::Table;
    let visible = app.filtered_entries();
    let border = if table_focused {
        Style::default().fg(Color::Yellow)
    } else {
        Style::default().fg(Color::DarkGray)
    };
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(border)
        .title(format!(
            " Entries ({} of {}) ",
            visible.len(),
            app.entries.len()
        ))
        .padding(Padding::horizontal(1));

    if visible.is_empty() {
        frame.render_widget(
            Paragraph::new("No entries match")
                .alignment(Alignment::Center)
                .block(block),
            area,
        );
        return;
    }

    let mut lines = Vec::with_capacity(visible.len());
    for (idx, entry) in visible.iter().enumerate() {
        if app.entry_rows.editing_id() == Some(entry.id) {
            lines.push(edit_row(app));
            continue;
        }
        let focused = table_focused && idx == app.selected_entry_row;
        lines.push(display_row(app, entry, focused));
    }

    frame.render_widget(Paragraph::new(lines).block(block), area);
}

fn display_row(app: &App, entry: &TimeEntry, focused: bool) -> Line<'static> {
    let marker = match &app.entry_rows {
        RowState::Saving { id } if *id == entry.id => " saving…",
        RowState::Deleting { id } if *id == entry.id => " deleting…",
        _ => "",
    };

    let spans = vec![
        Span::styled("■ ", Style::default().fg(project_color(&app.projects, entry.project_id))),
        Span::styled(
            format!(
                "{} - {} ",
                format_table_datetime(entry.start_time),
                format_table_datetime(entry.end_time)
            ),
            Style::default().fg(Color::Yellow),
        ),
        Span::styled(
            format!("[{}]", fmt_duration(entry.duration)),
            Style::default().fg(Color::Magenta),
        ),
        Span::styled(" | ", Style::default().fg(Color::DarkGray)),
        Span::styled(
            entry.display_project_name(&app.projects).to_string(),
            Style::default().fg(Color::Cyan),
        ),
        Span::styled(" | ", Style::default().fg(Color::DarkGray)),
        Span::styled(entry.description.clone(), Style::default().fg(Color::Gray)),
        Span::styled(marker.to_string(), Style::default().fg(Color::Yellow)),
    ];

    if focused {
        let text: String = spans.iter().map(|s| s.content.as_ref()).collect();
        return Line::from(Span::styled(
            text,
            Style::default()
                .fg(Color::Black)
                .bg(Color::White)
                .add_modifier(Modifier::BOLD),
        ));
    }
    Line::from(spans)
}

fn edit_row(app: &App) -> Line<'static> {
    let RowState::Editing { draft, .. } = &app.entry_rows else {
        return Line::from("");
    };
    entry_draft_row(app, draft)
}

/// Inline edit fields, reused by the table row and the calendar modal.
pub(super) fn entry_draft_row(app: &App, draft: &EntryDraft) -> Line<'static> {
    let focused = |field: EntryField| draft.focused == field;
    Line::from(vec![
        field_label("Project", focused(EntryField::Project)),
        Span::raw(project_picker_display(app, draft)),
        Span::raw(" "),
        field_label("Description", focused(EntryField::Description)),
        Span::raw(format!(
            "[{}]",
            input_display(&draft.description, focused(EntryField::Description))
        )),
        Span::raw(" "),
        field_label("Start", focused(EntryField::Start)),
        Span::raw(format!(
            "[{}]",
            input_display(&draft.start_input, focused(EntryField::Start))
        )),
        Span::raw(" "),
        field_label("End", focused(EntryField::End)),
        Span::raw(format!(
            "[{}]",
            input_display(&draft.end_input, focused(EntryField::End))
        )),
    ])
}

fn render_controls(frame: &mut Frame, app: &App, area: Rect) {
    let hint = if matches!(app.entry_rows, RowState::Editing { .. }) {
        "Tab: field  ←/→: project or cursor  Enter: save  Esc: cancel"
    } else {
        match app.entries_focus {
            PaneFocus::Form => "Tab: next field  ←/→: pick project  Enter: create",
            PaneFocus::Filter => "Tab: next field  Ctrl+X: clear filters  (filters apply as you type)",
            PaneFocus::Table => {
                "j/k: row  e/Enter: edit  d: delete  r: refresh  Tab: form  1/2/3: view  q: quit"
            }
        }
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
