use crate::app::{App, View};
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use super::action_queue::{Action, ActionTx};

mod calendar;
mod entries;
mod projects;

fn enqueue_action(action_tx: &ActionTx, action: Action) {
    let _ = action_tx.send(action);
}

pub(super) fn handle_view_key(key: KeyEvent, app: &mut App, action_tx: &ActionTx) {
    // Ctrl+C quits from anywhere, regardless of focus.
    if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
        app.quit();
        return;
    }

    match app.current_view {
        View::Projects => projects::handle_projects_key(key, app, action_tx),
        View::Entries => entries::handle_entries_key(key, app, action_tx),
        View::Calendar => calendar::handle_calendar_key(key, app, action_tx),
    }
}

/// View-switch keys shared by every table pane and the calendar.
fn handle_view_switch(key: KeyEvent, app: &mut App) -> bool {
    match key.code {
        KeyCode::Char('1') => {
            app.navigate_to(View::Projects);
            true
        }
        KeyCode::Char('2') => {
            app.navigate_to(View::Entries);
            true
        }
        KeyCode::Char('3') => {
            app.navigate_to(View::Calendar);
            true
        }
        _ => false,
    }
}
