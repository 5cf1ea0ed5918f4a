use crate::app::{App, EntryField, ModalMode, RowState};
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use super::super::action_queue::{Action, ActionTx};
use super::{enqueue_action, handle_view_switch};

pub(super) fn handle_calendar_key(key: KeyEvent, app: &mut App, action_tx: &ActionTx) {
    if app.modal.is_some() {
        handle_modal_key(key, app, action_tx);
        return;
    }

    if handle_view_switch(key, app) {
        return;
    }
    match key.code {
        KeyCode::Left | KeyCode::Char('h') => app.calendar_move_day(-1),
        KeyCode::Right | KeyCode::Char('l') => app.calendar_move_day(1),
        KeyCode::Up | KeyCode::Char('k') => app.calendar_move_hour(-1),
        KeyCode::Down | KeyCode::Char('j') => app.calendar_move_hour(1),
        KeyCode::Char('[') | KeyCode::Char('H') => app.week_previous(),
        KeyCode::Char(']') | KeyCode::Char('L') => app.week_next(),
        KeyCode::Char('t') => app.week_current(),
        KeyCode::Enter => app.open_modal_at_cursor(),
        KeyCode::Char('r') => enqueue_action(action_tx, Action::RefreshEntries),
        KeyCode::Char('q') => app.quit(),
        _ => {}
    }
}

fn handle_modal_key(key: KeyEvent, app: &mut App, action_tx: &ActionTx) {
    let editing = matches!(
        app.modal.as_ref().map(|m| &m.mode),
        Some(ModalMode::Editing(_))
    );
    if editing {
        handle_modal_edit_key(key, app, action_tx);
        return;
    }

    match key.code {
        KeyCode::Esc | KeyCode::Char('q') => app.close_modal(),
        KeyCode::Enter | KeyCode::Char('e') => app.modal_begin_edit(),
        KeyCode::Char('d') => {
            if let Some(modal) = app.modal.as_mut() {
                if !modal.in_flight {
                    modal.in_flight = true;
                    let id = modal.entry_id;
                    enqueue_action(action_tx, Action::DeleteModalEntry { id });
                }
            }
        }
        _ => {}
    }
}

fn handle_modal_edit_key(key: KeyEvent, app: &mut App, action_tx: &ActionTx) {
    match key.code {
        KeyCode::Esc => app.modal_cancel_edit(),
        KeyCode::Tab | KeyCode::Down => {
            if let Some(draft) = modal_draft(app) {
                draft.focused = draft.focused.next();
            }
        }
        KeyCode::BackTab | KeyCode::Up => {
            if let Some(draft) = modal_draft(app) {
                draft.focused = draft.focused.prev();
            }
        }
        KeyCode::Enter => {
            let submit = app.modal.as_ref().and_then(|modal| {
                if modal.in_flight {
                    return None;
                }
                match &modal.mode {
                    ModalMode::Editing(draft) => Some((
                        modal.entry_id,
                        App::entry_draft_payload(&app.projects, draft),
                    )),
                    ModalMode::Details => None,
                }
            });
            if let Some((id, result)) = submit {
                match result {
                    Ok(payload) => {
                        if let Some(modal) = app.modal.as_mut() {
                            modal.in_flight = true;
                        }
                        enqueue_action(action_tx, Action::SaveModalEdit { id, payload });
                    }
                    Err(msg) => app.set_status(msg),
                }
            }
        }
        KeyCode::Left => {
            let projects_len = app.projects.len();
            if let Some(draft) = modal_draft(app) {
                if draft.focused == EntryField::Project {
                    App::cycle_draft_project(draft, projects_len, -1);
                } else if let Some(input) = draft.focused_input_mut() {
                    input.move_left();
                }
            }
        }
        KeyCode::Right => {
            let projects_len = app.projects.len();
            if let Some(draft) = modal_draft(app) {
                if draft.focused == EntryField::Project {
                    App::cycle_draft_project(draft, projects_len, 1);
                } else if let Some(input) = draft.focused_input_mut() {
                    input.move_right();
                }
            }
        }
        KeyCode::Char(c) if !key.modifiers.contains(KeyModifiers::CONTROL) => {
            if let Some(draft) = modal_draft(app) {
                if let Some(input) = draft.focused_input_mut() {
                    input.insert_char(c);
                }
            }
        }
        KeyCode::Backspace => {
            if let Some(draft) = modal_draft(app) {
                if let Some(input) = draft.focused_input_mut() {
                    input.backspace();
                }
            }
        }
        _ => {}
    }
}

fn modal_draft(app: &mut App) -> Option<&mut crate::app::EntryDraft> {
    match app.modal.as_mut().map(|m| &mut m.mode) {
        Some(ModalMode::Editing(draft)) => Some(draft),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::KeyModifiers;
    use stint_client::domain::TimeEntry;
    use time::macros::{date, datetime};

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn app_with_entry() -> App {
        let mut app = App::new();
        app.week_start = date!(2024 - 01 - 01);
        app.calendar_day = 0;
        app.calendar_hour = 9;
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
    fn enter_on_occupied_cell_opens_modal() {
        let mut app = app_with_entry();
        let (tx, _rx) = super::super::super::action_queue::channel();

        handle_calendar_key(key(KeyCode::Enter), &mut app, &tx);
        assert_eq!(app.modal.as_ref().map(|m| m.entry_id), Some(10));
    }

    #[test]
    fn enter_on_empty_cell_does_nothing() {
        let mut app = app_with_entry();
        app.calendar_hour = 14;
        let (tx, _rx) = super::super::super::action_queue::channel();

        handle_calendar_key(key(KeyCode::Enter), &mut app, &tx);
        assert!(app.modal.is_none());
    }

    #[test]
    fn modal_delete_sets_in_flight_once() {
        let mut app = app_with_entry();
        let (tx, mut rx) = super::super::super::action_queue::channel();

        handle_calendar_key(key(KeyCode::Enter), &mut app, &tx);
        handle_calendar_key(key(KeyCode::Char('d')), &mut app, &tx);
        assert!(matches!(
            rx.try_recv(),
            Ok(Action::DeleteModalEntry { id: 10 })
        ));

        handle_calendar_key(key(KeyCode::Char('d')), &mut app, &tx);
        assert!(rx.try_recv().is_err());
    }

    #[test]
    fn week_keys_shift_by_seven_days() {
        let mut app = app_with_entry();
        let (tx, _rx) = super::super::super::action_queue::channel();

        handle_calendar_key(key(KeyCode::Char(']')), &mut app, &tx);
        assert_eq!(app.week_start, date!(2024 - 01 - 08));
        handle_calendar_key(key(KeyCode::Char('[')), &mut app, &tx);
        handle_calendar_key(key(KeyCode::Char('[')), &mut app, &tx);
        assert_eq!(app.week_start, date!(2023 - 12 - 25));
    }
}
