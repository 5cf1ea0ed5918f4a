use crate::app::{App, PaneFocus, RowState};
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use super::super::action_queue::{Action, ActionTx};
use super::{enqueue_action, handle_view_switch};

pub(super) fn handle_projects_key(key: KeyEvent, app: &mut App, action_tx: &ActionTx) {
    if matches!(app.project_rows, RowState::Editing { .. }) {
        handle_edit_key(key, app, action_tx);
        return;
    }

    match app.projects_focus {
        PaneFocus::Table => handle_table_key(key, app, action_tx),
        _ => handle_form_key(key, app, action_tx),
    }
}

fn handle_form_key(key: KeyEvent, app: &mut App, action_tx: &ActionTx) {
    match key.code {
        KeyCode::Tab => app.projects_focus_forward(),
        KeyCode::BackTab => app.projects_focus_backward(),
        KeyCode::Enter => match app.project_create_payload() {
            Ok(payload) => {
                enqueue_action(action_tx, Action::CreateProject { payload });
            }
            Err(msg) => app.set_status(msg),
        },
        KeyCode::Char(c) if !key.modifiers.contains(KeyModifiers::CONTROL) => {
            app.project_form.focused_input_mut().insert_char(c);
        }
        KeyCode::Backspace => app.project_form.focused_input_mut().backspace(),
        KeyCode::Left => app.project_form.focused_input_mut().move_left(),
        KeyCode::Right => app.project_form.focused_input_mut().move_right(),
        KeyCode::Home => app.project_form.focused_input_mut().home(),
        KeyCode::End => app.project_form.focused_input_mut().end(),
        KeyCode::Char('x') if key.modifiers.contains(KeyModifiers::CONTROL) => {
            app.project_form.focused_input_mut().clear();
        }
        _ => {}
    }
}

fn handle_table_key(key: KeyEvent, app: &mut App, action_tx: &ActionTx) {
    if handle_view_switch(key, app) {
        return;
    }
    match key.code {
        KeyCode::Tab => app.projects_focus_forward(),
        KeyCode::BackTab => app.projects_focus_backward(),
        KeyCode::Down | KeyCode::Char('j') => app.projects_select_next(),
        KeyCode::Up | KeyCode::Char('k') => app.projects_select_previous(),
        KeyCode::Enter | KeyCode::Char('e') => app.begin_project_edit(),
        KeyCode::Char('d') | KeyCode::Delete => {
            // Only one row may have a request in flight.
            if app.project_rows.is_viewing() {
                if let Some(id) = app.selected_project().map(|p| p.id) {
                    app.project_rows = RowState::Deleting { id };
                    enqueue_action(action_tx, Action::DeleteProject { id });
                }
            }
        }
        KeyCode::Char('r') => enqueue_action(action_tx, Action::RefreshAll),
        KeyCode::Char('q') => app.quit(),
        _ => {}
    }
}

fn handle_edit_key(key: KeyEvent, app: &mut App, action_tx: &ActionTx) {
    match key.code {
        KeyCode::Esc => app.cancel_project_edit(),
        KeyCode::Tab | KeyCode::Down => {
            if let RowState::Editing { draft, .. } = &mut app.project_rows {
                draft.focused = draft.focused.next();
            }
        }
        KeyCode::BackTab | KeyCode::Up => {
            if let RowState::Editing { draft, .. } = &mut app.project_rows {
                draft.focused = draft.focused.prev();
            }
        }
        KeyCode::Enter => {
            let submit = match &app.project_rows {
                RowState::Editing { id, draft } => {
                    if draft.name.value.trim().is_empty() {
                        None
                    } else {
                        Some((*id, App::project_edit_payload(draft)))
                    }
                }
                _ => return,
            };
            match submit {
                Some((id, payload)) => {
                    app.project_rows = RowState::Saving { id };
                    enqueue_action(action_tx, Action::SaveProjectEdit { id, payload });
                }
                None => app.set_status("Project name is required.".to_string()),
            }
        }
        KeyCode::Char(c) if !key.modifiers.contains(KeyModifiers::CONTROL) => {
            if let RowState::Editing { draft, .. } = &mut app.project_rows {
                draft.focused_input_mut().insert_char(c);
            }
        }
        KeyCode::Backspace => {
            if let RowState::Editing { draft, .. } = &mut app.project_rows {
                draft.focused_input_mut().backspace();
            }
        }
        KeyCode::Left => {
            if let RowState::Editing { draft, .. } = &mut app.project_rows {
                draft.focused_input_mut().move_left();
            }
        }
        KeyCode::Right => {
            if let RowState::Editing { draft, .. } = &mut app.project_rows {
                draft.focused_input_mut().move_right();
            }
        }
        _ => {}
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::{PaneFocus, TextInput};
    use crossterm::event::KeyModifiers;
    use stint_client::domain::Project;

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn app_with_project() -> App {
        let mut app = App::new();
        app.set_projects(vec![Project {
            id: 7,
            name: "Alpha".to_string(),
            description: None,
            created_at: None,
        }]);
        app.projects_focus = PaneFocus::Table;
        app
    }

    #[test]
    fn blank_create_sets_status_and_enqueues_nothing() {
        let mut app = App::new();
        let (tx, mut rx) = super::super::super::action_queue::channel();

        handle_projects_key(key(KeyCode::Enter), &mut app, &tx);

        assert_eq!(
            app.status_message.as_deref(),
            Some("Project name is required.")
        );
        assert!(rx.try_recv().is_err());
    }

    #[test]
    fn delete_marks_row_and_enqueues_action() {
        let mut app = app_with_project();
        let (tx, mut rx) = super::super::super::action_queue::channel();

        handle_projects_key(key(KeyCode::Char('d')), &mut app, &tx);

        assert_eq!(app.project_rows.busy_id(), Some(7));
        assert!(matches!(
            rx.try_recv(),
            Ok(Action::DeleteProject { id: 7 })
        ));

        // A second press while the delete is in flight does nothing.
        handle_projects_key(key(KeyCode::Char('d')), &mut app, &tx);
        assert!(rx.try_recv().is_err());
    }

    #[test]
    fn edit_submit_requires_name() {
        let mut app = app_with_project();
        let (tx, mut rx) = super::super::super::action_queue::channel();

        app.begin_project_edit();
        if let RowState::Editing { draft, .. } = &mut app.project_rows {
            draft.name = TextInput::default();
        }
        handle_projects_key(key(KeyCode::Enter), &mut app, &tx);

        assert!(rx.try_recv().is_err());
        assert_eq!(app.project_rows.editing_id(), Some(7));
    }
}
