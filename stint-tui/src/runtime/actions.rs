use crate::api::Backend;
use crate::app::{App, EntryDraft, EntryField, ModalMode, ProjectDraft, ProjectField, RowState, TextInput};
use anyhow::Result;
use stint_client::domain::format_datetime;
use stint_client::dto::{ProjectPayload, TimeEntryPayload};

use super::action_queue::Action;

pub(super) async fn run_action(action: Action, app: &mut App, backend: &mut Backend) -> Result<()> {
    match action {
        Action::RefreshAll => {
            refresh_all(app, backend).await;
        }
        Action::RefreshEntries => {
            refresh_entries(app, backend).await;
        }
        Action::CreateProject { payload } => {
            handle_create_project(payload, app, backend).await;
        }
        Action::SaveProjectEdit { id, payload } => {
            handle_save_project_edit(id, payload, app, backend).await;
        }
        Action::DeleteProject { id } => {
            handle_delete_project(id, app, backend).await;
        }
        Action::CreateEntry { payload } => {
            handle_create_entry(payload, app, backend).await;
        }
        Action::SaveEntryEdit { id, payload } => {
            handle_save_entry_edit(id, payload, app, backend).await;
        }
        Action::DeleteEntry { id } => {
            handle_delete_entry(id, app, backend).await;
        }
        Action::SaveModalEdit { id, payload } => {
            handle_save_modal_edit(id, payload, app, backend).await;
        }
        Action::DeleteModalEntry { id } => {
            handle_delete_modal_entry(id, app, backend).await;
        }
    }
    Ok(())
}

pub(super) async fn refresh_all(app: &mut App, backend: &mut Backend) {
    app.is_loading = true;
    refresh_projects(app, backend).await;
    refresh_entries_inner(app, backend).await;
    app.is_loading = false;
}

async fn refresh_entries(app: &mut App, backend: &mut Backend) {
    app.is_loading = true;
    refresh_entries_inner(app, backend).await;
    app.is_loading = false;
}

async fn refresh_projects(app: &mut App, backend: &mut Backend) {
    match backend.projects().await {
        Ok(projects) => app.set_projects(projects),
        Err(e) => app.set_status(format!("Error loading projects: {}", e)),
    }
}

async fn refresh_entries_inner(app: &mut App, backend: &mut Backend) {
    match backend.time_entries().await {
        Ok(entries) => app.set_entries(entries),
        Err(e) => app.set_status(format!("Error loading entries: {}", e)),
    }
}

async fn handle_create_project(payload: ProjectPayload, app: &mut App, backend: &mut Backend) {
    match backend.create_project(&payload).await {
        Ok(message) => {
            app.clear_project_form();
            app.set_status(message);
            refresh_projects(app, backend).await;
        }
        Err(e) => {
            app.set_status(format!("Error creating project: {}", e));
        }
    }
}

async fn handle_save_project_edit(
    id: i64,
    payload: ProjectPayload,
    app: &mut App,
    backend: &mut Backend,
) {
    match backend.update_project(id, &payload).await {
        Ok(message) => {
            app.project_rows = RowState::Viewing;
            app.set_status(message);
            refresh_projects(app, backend).await;
        }
        Err(e) => {
            // Reopen the draft so the edit is not lost.
            app.project_rows = RowState::Editing {
                id,
                draft: project_draft_from_payload(&payload),
            };
            app.set_status(format!("Error updating project: {}", e));
        }
    }
}

async fn handle_delete_project(id: i64, app: &mut App, backend: &mut Backend) {
    match backend.delete_project(id).await {
        Ok(message) => {
            app.project_rows = RowState::Viewing;
            app.set_status(message);
            refresh_projects(app, backend).await;
        }
        Err(e) => {
            app.project_rows = RowState::Viewing;
            app.set_status(format!("Error deleting project: {}", e));
        }
    }
}

/// Create is the one mutation that does not re-fetch: the new entry is
/// appended locally from the submitted payload and the returned id.
async fn handle_create_entry(payload: TimeEntryPayload, app: &mut App, backend: &mut Backend) {
    match backend.create_time_entry(&payload).await {
        Ok(id) => {
            app.append_optimistic_entry(id, &payload);
            app.clear_entry_form();
            app.clear_status();
        }
        Err(e) => {
            app.set_status(format!("Error creating entry: {}", e));
        }
    }
}

async fn handle_save_entry_edit(
    id: i64,
    payload: TimeEntryPayload,
    app: &mut App,
    backend: &mut Backend,
) {
    match backend.update_time_entry(id, &payload).await {
        Ok(message) => {
            app.entry_rows = RowState::Viewing;
            app.set_status(message);
            refresh_entries_inner(app, backend).await;
        }
        Err(e) => {
            app.entry_rows = RowState::Editing {
                id,
                draft: entry_draft_from_payload(&app.projects, &payload),
            };
            app.set_status(format!("Error updating entry: {}", e));
        }
    }
}

async fn handle_delete_entry(id: i64, app: &mut App, backend: &mut Backend) {
    match backend.delete_time_entry(id).await {
        Ok(message) => {
            app.entry_rows = RowState::Viewing;
            app.set_status(message);
            refresh_entries_inner(app, backend).await;
        }
        Err(e) => {
            app.entry_rows = RowState::Viewing;
            app.set_status(format!("Error deleting entry: {}", e));
        }
    }
}

async fn handle_save_modal_edit(
    id: i64,
    payload: TimeEntryPayload,
    app: &mut App,
    backend: &mut Backend,
) {
    match backend.update_time_entry(id, &payload).await {
        Ok(message) => {
            if let Some(modal) = app.modal.as_mut() {
                modal.mode = ModalMode::Details;
                modal.in_flight = false;
            }
            app.set_status(message);
            refresh_entries_inner(app, backend).await;
        }
        Err(e) => {
            if let Some(modal) = app.modal.as_mut() {
                modal.in_flight = false;
            }
            app.set_status(format!("Error updating entry: {}", e));
        }
    }
}

async fn handle_delete_modal_entry(id: i64, app: &mut App, backend: &mut Backend) {
    match backend.delete_time_entry(id).await {
        Ok(message) => {
            app.close_modal();
            app.set_status(message);
            refresh_entries_inner(app, backend).await;
        }
        Err(e) => {
            if let Some(modal) = app.modal.as_mut() {
                modal.in_flight = false;
            }
            app.set_status(format!("Error deleting entry: {}", e));
        }
    }
}

fn project_draft_from_payload(payload: &ProjectPayload) -> ProjectDraft {
    ProjectDraft {
        name: TextInput::from_str(&payload.name),
        description: TextInput::from_str(&payload.description),
        focused: ProjectField::Name,
    }
}

fn entry_draft_from_payload(
    projects: &[stint_client::domain::Project],
    payload: &TimeEntryPayload,
) -> EntryDraft {
    EntryDraft {
        project_idx: projects.iter().position(|p| p.id == payload.project_id),
        description: TextInput::from_str(&payload.description),
        start_input: TextInput::from_str(&format_datetime(payload.start_time)),
        end_input: TextInput::from_str(&format_datetime(payload.end_time)),
        focused: EntryField::Project,
    }
}
