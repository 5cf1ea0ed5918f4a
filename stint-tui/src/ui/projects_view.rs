use crate::app::{App, PaneFocus, ProjectField, RowState};
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Padding, Paragraph},
    Frame,
};

use super::widgets::{field_label, input_display, project_color};

pub fn render_projects_view(frame: &mut Frame, app: &App, body: Rect) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(4), // create form
            Constraint::Min(0),    // table
            Constraint::Length(3), // controls
        ])
        .split(body);

    render_form(frame, app, chunks[0]);
    render_table(frame, app, chunks[1]);
    render_controls(frame, app, chunks[2]);
}

fn render_form(frame: &mut Frame, app: &App, area: Rect) {
    let form_focused = app.projects_focus == PaneFocus::Form && app.project_rows.is_viewing();
    let name_focused = form_focused && app.project_form.focused == ProjectField::Name;
    let desc_focused = form_focused && app.project_form.focused == ProjectField::Description;

    let lines = vec![
        Line::from(vec![
            field_label("Name", name_focused),
            Span::raw(input_display(&app.project_form.name, name_focused)),
        ]),
        Line::from(vec![
            field_label("Description", desc_focused),
            Span::raw(input_display(&app.project_form.description, desc_focused)),
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
                .title(" New project ")
                .padding(Padding::horizontal(1)),
        ),
        area,
    );
}

fn render_table(frame: &mut Frame, app: &App, area: Rect) {
    let table_focused = app.projects_focus == PaneFocus::Table;
    let border = if table_focused {
        Style::default().fg(Color::Yellow)
    } else {
        Style::default().fg(Color::DarkGray)
    };
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(border)
        .title(format!(" Projects ({}) ", app.projects.len()))
        .padding(Padding::horizontal(1));

    if app.projects.is_empty() {
        frame.render_widget(
            Paragraph::new("No projects yet")
                .alignment(Alignment::Center)
                .block(block),
            area,
        );
        return;
    }

    let mut lines = Vec::with_capacity(app.projects.len());
    for (idx, project) in app.projects.iter().enumerate() {
        if app.project_rows.editing_id() == Some(project.id) {
            lines.push(edit_row(app));
            continue;
        }

        let marker = match &app.project_rows {
            RowState::Saving { id } if *id == project.id => " saving…",
            RowState::Deleting { id } if *id == project.id => " deleting…",
            _ => "",
        };

        let swatch = Span::styled("■ ", Style::default().fg(project_color(&app.projects, project.id)));
        let focused = table_focused && idx == app.selected_project_row;
        let row = Line::from(vec![
            swatch,
            Span::styled(
                format!("#{:<4}", project.id),
                Style::default().fg(Color::DarkGray),
            ),
            Span::styled(project.name.clone(), Style::default().fg(Color::White)),
            Span::styled(
                if project.description_or_empty().is_empty() {
                    String::new()
                } else {
                    format!("  {}", project.description_or_empty())
                },
                Style::default().fg(Color::Gray),
            ),
            Span::styled(marker, Style::default().fg(Color::Yellow)),
        ]);

        if focused {
            let text: String = row.spans.iter().map(|s| s.content.as_ref()).collect();
            lines.push(Line::from(Span::styled(
                text,
                Style::default()
                    .fg(Color::Black)
                    .bg(Color::White)
                    .add_modifier(Modifier::BOLD),
            )));
        } else {
            lines.push(row);
        }
    }

    frame.render_widget(Paragraph::new(lines).block(block), area);
}

fn edit_row(app: &App) -> Line<'static> {
    let RowState::Editing { id, draft } = &app.project_rows else {
        return Line::from("");
    };
    let name_focused = draft.focused == ProjectField::Name;
    Line::from(vec![
        Span::styled(
            format!("#{:<4}", id),
            Style::default().fg(Color::DarkGray),
        ),
        field_label("Name", name_focused),
        Span::styled(
            format!("[{}]", input_display(&draft.name, name_focused)),
            Style::default().fg(Color::White),
        ),
        Span::raw(" "),
        field_label("Description", !name_focused),
        Span::styled(
            format!("[{}]", input_display(&draft.description, !name_focused)),
            Style::default().fg(Color::White),
        ),
    ])
}

fn render_controls(frame: &mut Frame, app: &App, area: Rect) {
    let hint = if matches!(app.project_rows, RowState::Editing { .. }) {
        "Tab: field  Enter: save  Esc: cancel"
    } else if app.projects_focus == PaneFocus::Table {
        "j/k: row  e/Enter: edit  d: delete  r: refresh  Tab: form  1/2/3: view  q: quit"
    } else {
        "Tab: next field  Enter: create  Ctrl+X: clear field"
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
