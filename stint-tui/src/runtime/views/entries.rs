use crate::app::{App, EntryField, PaneFocus, RowState};
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use super::super::action_queue::{Action, ActionTx};
use super::{enqueue_action, handle_view_switch};

pub(super) fn handle_entries_key(key: KeyEvent, app: &mut App, action_tx: &ActionTx) {
    if matches!(app.entry_rows, RowState::Editing { .. }) {
        handle_edit_key(key, app, action_tx);
        return;
    }

    match app.entries_focus {
        PaneFocus::Form => handle_form_key(key, app, action_tx),
        PaneFocus::Filter => handle_filter_key(key, app),
        PaneFocus::Table => handle_table_key(key, app, action_tx),
    }
}

fn handle_form_key(key: KeyEvent, app: &mut App, action_tx: &ActionTx) {
    match key.code {
        KeyCode::Tab => app.entries_focus_forward(),
        KeyCode::BackTab => app.entries_focus_backward(),
        KeyCode::Enter => match app.entry_create_payload() {
            Ok(payload) => {
                enqueue_action(action_tx, Action::CreateEntry { payload });
            }
            Err(msg) => app.set_status(msg),
        },
        // The project field is a picker, not a text input.
        KeyCode::Left if app.entry_form.focused == EntryField::Project => {
            let len = app.projects.len();
            App::cycle_draft_project(&mut app.entry_form, len, -1);
        }
        KeyCode::Right if app.entry_form.focused == EntryField::Project => {
            let len = app.projects.len();
            App::cycle_draft_project(&mut app.entry_form, len, 1);
        }
        KeyCode::Char(c) if !key.modifiers.contains(KeyModifiers::CONTROL) => {
            if let Some(input) = app.entry_form.focused_input_mut() {
                input.insert_char(c);
            }
        }
        KeyCode::Backspace => {
            if let Some(input) = app.entry_form.focused_input_mut() {
                input.backspace();
            }
        }
        KeyCode::Left => {
            if let Some(input) = app.entry_form.focused_input_mut() {
                input.move_left();
            }
        }
        KeyCode::Right => {
            if let Some(input) = app.entry_form.focused_input_mut() {
                input.move_right();
            }
        }
        KeyCode::Home => {
            if let Some(input) = app.entry_form.focused_input_mut() {
                input.home();
            }
        }
        KeyCode::End => {
            if let Some(input) = app.entry_form.focused_input_mut() {
                input.end();
            }
        }
        KeyCode::Char('x') if key.modifiers.contains(KeyModifiers::CONTROL) => {
            if let Some(input) = app.entry_form.focused_input_mut() {
                input.clear();
            }
        }
        _ => {}
    }
}

/// Filter fields apply live as they are typed; there is nothing to submit.
fn handle_filter_key(key: KeyEvent, app: &mut App) {
    match key.code {
        KeyCode::Tab => app.entries_focus_forward(),
        KeyCode::BackTab => app.entries_focus_backward(),
        KeyCode::Char('x') if key.modifiers.contains(KeyModifiers::CONTROL) => {
            app.filter.clear_all();
        }
        KeyCode::Char(c) if !key.modifiers.contains(KeyModifiers::CONTROL) => {
            app.filter.focused_input_mut().insert_char(c);
        }
        KeyCode::Backspace => app.filter.focused_input_mut().backspace(),
        KeyCode::Left => app.filter.focused_input_mut().move_left(),
        KeyCode::Right => app.filter.focused_input_mut().move_right(),
        KeyCode::Home => app.filter.focused_input_mut().home(),
        KeyCode::End => app.filter.focused_input_mut().end(),
        _ => {}
    }
    // Narrowing the filter can shrink the table below the selection.
    app.clamp_entry_selection();
}

fn handle_table_key(key: KeyEvent, app: &mut App, action_tx: &ActionTx) {
    if handle_view_switch(key, app) {
        return;
    }
    match key.code {
        KeyCode::Tab => app.entries_focus_forward(),
        KeyCode::BackTab => app.entries_focus_backward(),
        KeyCode::Down | KeyCode::Char('j') => app.entries_select_next(),
        KeyCode::Up | KeyCode::Char('k') => app.entries_select_previous(),
        KeyCode::Enter | KeyCode::Char('e') => app.begin_entry_edit(),
        KeyCode::Char('d') | KeyCode::Delete => {
            if app.entry_rows.is_viewing() {
                if let Some(id) = app.selected_entry().map(|e| e.id) {
                    app.entry_rows = RowState::Deleting { id };
                    enqueue_action(action_tx, Action::DeleteEntry { id });
                }
            }
        }
        KeyCode::Char('r') => enqueue_action(action_tx, Action::RefreshEntries),
        KeyCode::Char('q') => app.quit(),
        _ => {}
    }
}

fn handle_edit_key(key: KeyEvent, app: &mut App, action_tx: &ActionTx) {
    match key.code {
        KeyCode::Esc => app.cancel_entry_edit(),
        KeyCode::Tab | KeyCode::Down => {
            if let RowState::Editing { draft, .. } = &mut app.entry_rows {
                draft.focused = draft.focused.next();
            }
        }
        KeyCode::BackTab | KeyCode::Up => {
            if let RowState::Editing { draft, .. } = &mut app.entry_rows {
                draft.focused = draft.focused.prev();
            }
        }
        KeyCode::Enter => {
            let submit = match &app.entry_rows {
                RowState::Editing { id, draft } => {
                    Some((*id, App::entry_draft_payload(&app.projects, draft)))
                }
                _ => None,
            };
            if let Some((id, result)) = submit {
                match result {
                    Ok(payload) => {
                        app.entry_rows = RowState::Saving { id };
                        enqueue_action(action_tx, Action::SaveEntryEdit { id, payload });
                    }
                    Err(msg) => app.set_status(msg),
                }
            }
        }
        KeyCode::Left => {
            let projects_len = app.projects.len();
            if let RowState::Editing { draft, .. } = &mut app.entry_rows {
                if draft.focused == EntryField::Project {
                    App::cycle_draft_project(draft, projects_len, -1);
                } else if let Some(input) = draft.focused_input_mut() {
                    input.move_left();
                }
            }
        }
        KeyCode::Right => {
            let projects_len = app.projects.len();
            if let RowState::Editing { draft, .. } = &mut app.entry_rows {
                if draft.focused == EntryField::Project {
                    App::cycle_draft_project(draft, projects_len, 1);
                } else if let Some(input) = draft.focused_input_mut() {
                    input.move_right();
                }
            }
        }
        KeyCode::Char(c) if !key.modifiers.contains(KeyModifiers::CONTROL) => {
            if let RowState::Editing { draft, .. } = &mut app.entry_rows {
                if let Some(input) = draft.focused_input_mut() {
                    input.insert_char(c);
                }
            }
        }
        KeyCode::Backspace => {
            if let RowState::Editing { draft, .. } = &mut app.entry_rows {
                if let Some(input) = draft.focused_input_mut() {
                    input.backspace();
                }
            }
        }
        _ => {}
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::TextInput;
    use crossterm::event::KeyModifiers;
    use stint_client::domain::{Project, TimeEntry};
    use time::macros::datetime;

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn app_with_data() -> App {
        let mut app = App::new();
        app.set_projects(vec![Project {
            id: 1,
            name: "Alpha".to_string(),
            description: None,
            created_at: None,
        }]);
        app.set_entries(vec![TimeEntry {
            id: 10,
            project_id: 1,
            project_name: Some("Alpha".to_string()),
            description: "standup".to_string(),
            start_time: datetime!(2024-01-01 09:30),
            end_time: datetime!(2024-01-01 10:15),
            duration: 45,
            created_at: None,
        }]);
        app
    }

    #[test]
    fn delete_on_row_marks_deleting_and_enqueues() {
        let mut app = app_with_data();
        app.entries_focus = PaneFocus::Table;
        let (tx, mut rx) = super::super::super::action_queue::channel();

        handle_entries_key(key(KeyCode::Char('d')), &mut app, &tx);

        assert_eq!(app.entry_rows.busy_id(), Some(10));
        assert!(matches!(rx.try_recv(), Ok(Action::DeleteEntry { id: 10 })));
    }

    #[test]
    fn create_with_missing_project_sets_status() {
        let mut app = app_with_data();
        app.entry_form.start_input = TextInput::from_str("2024-01-01T09:00");
        app.entry_form.end_input = TextInput::from_str("2024-01-01T10:00");
        let (tx, mut rx) = super::super::super::action_queue::channel();

        handle_entries_key(key(KeyCode::Enter), &mut app, &tx);

        assert_eq!(app.status_message.as_deref(), Some("Select a project."));
        assert!(rx.try_recv().is_err());
    }

    #[test]
    fn filter_typing_narrows_table() {
        let mut app = app_with_data();
        app.entries_focus = PaneFocus::Filter;
        let (tx, _rx) = super::super::super::action_queue::channel();

        // Type a project id that matches nothing.
        handle_entries_key(key(KeyCode::Char('9')), &mut app, &tx);
        assert!(app.filtered_entries().is_empty());

        handle_entries_key(
            KeyEvent::new(KeyCode::Char('x'), KeyModifiers::CONTROL),
            &mut app,
            &tx,
        );
        assert_eq!(app.filtered_entries().len(), 1);
    }

    #[test]
    fn filter_narrowing_clamps_selection() {
        let mut app = app_with_data();
        app.entries.push(TimeEntry {
            id: 11,
            project_id: 1,
            project_name: Some("Alpha".to_string()),
            description: "retro".to_string(),
            start_time: datetime!(2024-01-01 11:00),
            end_time: datetime!(2024-01-01 11:30),
            duration: 30,
            created_at: None,
        });
        app.selected_entry_row = 1;
        app.entries_focus = PaneFocus::Filter;
        app.filter.focused = crate::app::FilterField::Description;
        let (tx, _rx) = super::super::super::action_queue::channel();

        // "s" matches only the standup entry; the selection must follow.
        handle_entries_key(key(KeyCode::Char('s')), &mut app, &tx);

        assert_eq!(app.filtered_entries().len(), 1);
        assert_eq!(app.selected_entry_row, 0);
        assert_eq!(app.selected_entry().map(|e| e.id), Some(10));
    }

    #[test]
    fn edit_submit_with_bad_time_stays_editing() {
        let mut app = app_with_data();
        app.entries_focus = PaneFocus::Table;
        app.begin_entry_edit();
        if let RowState::Editing { draft, .. } = &mut app.entry_rows {
            draft.end_input = TextInput::from_str("garbage");
        }
        let (tx, mut rx) = super::super::super::action_queue::channel();

        handle_entries_key(key(KeyCode::Enter), &mut app, &tx);

        assert!(rx.try_recv().is_err());
        assert_eq!(app.entry_rows.editing_id(), Some(10));
        assert_eq!(
            app.status_message.as_deref(),
            Some("Invalid end time (YYYY-MM-DDTHH:MM).")
        );
    }
}
