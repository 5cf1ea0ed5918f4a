use crate::api::Backend;
use crate::app::App;

/// Fetch projects and entries once before the first frame. Failures are
/// surfaced in the status line rather than aborting startup, so the UI
/// still opens when the server is briefly unreachable.
pub async fn initialize_app_state(app: &mut App, backend: &mut Backend) {
    app.is_loading = true;

    match backend.projects().await {
        Ok(projects) => app.set_projects(projects),
        Err(e) => app.set_status(format!("Error loading projects: {}", e)),
    }

    match backend.time_entries().await {
        Ok(entries) => app.set_entries(entries),
        Err(e) => app.set_status(format!("Error loading entries: {}", e)),
    }

    app.is_loading = false;
}
