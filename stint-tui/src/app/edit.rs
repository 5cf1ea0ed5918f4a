use stint_client::domain::{duration_minutes, format_datetime, parse_datetime, TimeEntry};
use stint_client::dto::{ProjectPayload, TimeEntryPayload};

use super::*;

impl App {
    // --- Projects screen ---

    /// Validate the create form. A blank name never reaches the server.
    pub fn project_create_payload(&self) -> Result<ProjectPayload, String> {
        if self.project_form.name.value.trim().is_empty() {
            return Err("Project name is required.".to_string());
        }
        Ok(ProjectPayload {
            name: self.project_form.name.value.clone(),
            description: self.project_form.description.value.clone(),
        })
    }

    pub fn clear_project_form(&mut self) {
        self.project_form = ProjectDraft::default();
    }

    /// Start editing the selected row. A no-op unless every row is Viewing,
    /// which is what keeps a single row editable at a time.
    pub fn begin_project_edit(&mut self) {
        if !self.project_rows.is_viewing() {
            return;
        }
        if let Some(project) = self.selected_project() {
            let draft = ProjectDraft {
                name: TextInput::from_str(&project.name),
                description: TextInput::from_str(project.description_or_empty()),
                focused: ProjectField::Name,
            };
            self.project_rows = RowState::Editing {
                id: project.id,
                draft,
            };
        }
    }

    pub fn cancel_project_edit(&mut self) {
        self.project_rows = RowState::Viewing;
    }

    pub fn project_edit_payload(draft: &ProjectDraft) -> ProjectPayload {
        ProjectPayload {
            name: draft.name.value.clone(),
            description: draft.description.value.clone(),
        }
    }

    // --- Entries screen ---

    pub fn entry_create_payload(&self) -> Result<TimeEntryPayload, String> {
        Self::entry_draft_payload(&self.projects, &self.entry_form)
    }

    pub fn entry_draft_payload(
        projects: &[stint_client::domain::Project],
        draft: &EntryDraft,
    ) -> Result<TimeEntryPayload, String> {
        let project = draft
            .project_idx
            .and_then(|i| projects.get(i))
            .ok_or_else(|| "Select a project.".to_string())?;
        let start_time = parse_datetime(draft.start_input.value.trim())
            .map_err(|_| "Invalid start time (YYYY-MM-DDTHH:MM).".to_string())?;
        let end_time = parse_datetime(draft.end_input.value.trim())
            .map_err(|_| "Invalid end time (YYYY-MM-DDTHH:MM).".to_string())?;
        Ok(TimeEntryPayload {
            project_id: project.id,
            description: draft.description.value.clone(),
            start_time,
            end_time,
        })
    }

    pub fn clear_entry_form(&mut self) {
        self.entry_form = EntryDraft::default();
    }

    pub fn begin_entry_edit(&mut self) {
        if !self.entry_rows.is_viewing() {
            return;
        }
        if let Some(entry) = self.selected_entry() {
            let id = entry.id;
            let draft = self.draft_from_entry(entry);
            self.entry_rows = RowState::Editing { id, draft };
        }
    }

    pub fn cancel_entry_edit(&mut self) {
        self.entry_rows = RowState::Viewing;
    }

    fn draft_from_entry(&self, entry: &TimeEntry) -> EntryDraft {
        EntryDraft {
            project_idx: self.projects.iter().position(|p| p.id == entry.project_id),
            description: TextInput::from_str(&entry.description),
            start_input: TextInput::from_str(&format_datetime(entry.start_time)),
            end_input: TextInput::from_str(&format_datetime(entry.end_time)),
            focused: EntryField::Project,
        }
    }

    /// Left/right on a project picker field.
    pub fn cycle_draft_project(draft: &mut EntryDraft, projects_len: usize, delta: i64) {
        if projects_len == 0 {
            draft.project_idx = None;
            return;
        }
        let next = match draft.project_idx {
            Some(idx) => (idx as i64 + delta).rem_euclid(projects_len as i64) as usize,
            None if delta >= 0 => 0,
            None => projects_len - 1,
        };
        draft.project_idx = Some(next);
    }

    /// Create appends a locally built record instead of re-fetching: the
    /// duration is computed here and the project name resolved from the
    /// already-fetched list, so the display can disagree with server truth
    /// until the next reload.
    pub fn append_optimistic_entry(&mut self, id: i64, payload: &TimeEntryPayload) {
        let project_name = self
            .projects
            .iter()
            .find(|p| p.id == payload.project_id)
            .map(|p| p.name.clone());
        self.entries.push(TimeEntry {
            id,
            project_id: payload.project_id,
            project_name,
            description: payload.description.clone(),
            start_time: payload.start_time,
            end_time: payload.end_time,
            duration: duration_minutes(payload.start_time, payload.end_time),
            created_at: None,
        });
    }

    // --- Calendar modal ---

    /// Open the detail modal for the first entry under the grid cursor.
    pub fn open_modal_at_cursor(&mut self) {
        let day = grid::week_days(self.week_start)[self.calendar_day];
        let entry_id = grid::entries_for_cell(&self.entries, day, self.calendar_hour)
            .first()
            .map(|e| e.id);
        if let Some(entry_id) = entry_id {
            self.modal = Some(EntryModal {
                entry_id,
                mode: ModalMode::Details,
                in_flight: false,
            });
        }
    }

    pub fn close_modal(&mut self) {
        self.modal = None;
    }

    pub fn modal_begin_edit(&mut self) {
        let draft = self.modal_entry().map(|e| self.draft_from_entry(e));
        if let (Some(modal), Some(draft)) = (self.modal.as_mut(), draft) {
            if !modal.in_flight {
                modal.mode = ModalMode::Editing(draft);
            }
        }
    }

    pub fn modal_cancel_edit(&mut self) {
        if let Some(modal) = self.modal.as_mut() {
            modal.mode = ModalMode::Details;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use stint_client::domain::Project;
    use time::macros::datetime;

    fn app_with_data() -> App {
        let mut app = App::new();
        app.set_projects(vec![
            Project {
                id: 1,
                name: "Alpha".to_string(),
                description: None,
                created_at: None,
            },
            Project {
                id: 2,
                name: "Beta".to_string(),
                description: Some("second".to_string()),
                created_at: None,
            },
        ]);
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
    fn blank_project_name_is_rejected_client_side() {
        let app = App::new();
        assert_eq!(
            app.project_create_payload().unwrap_err(),
            "Project name is required."
        );
    }

    #[test]
    fn entry_create_requires_project_and_parsable_times() {
        let mut app = app_with_data();
        assert!(app.entry_create_payload().is_err());

        app.entry_form.project_idx = Some(0);
        app.entry_form.start_input = TextInput::from_str("2024-01-01T09:30");
        app.entry_form.end_input = TextInput::from_str("not a time");
        assert!(app.entry_create_payload().is_err());

        app.entry_form.end_input = TextInput::from_str("2024-01-01T10:15");
        let payload = app.entry_create_payload().unwrap();
        assert_eq!(payload.project_id, 1);
        assert_eq!(payload.start_time, datetime!(2024-01-01 09:30));
    }

    #[test]
    fn only_one_row_editable_at_a_time() {
        let mut app = app_with_data();
        app.begin_project_edit();
        assert_eq!(app.project_rows.editing_id(), Some(1));

        // Moving the selection and trying again must not replace the draft.
        app.projects_select_next();
        app.begin_project_edit();
        assert_eq!(app.project_rows.editing_id(), Some(1));
    }

    #[test]
    fn optimistic_append_computes_duration_and_name() {
        let mut app = app_with_data();
        let payload = TimeEntryPayload {
            project_id: 2,
            description: "review".to_string(),
            start_time: datetime!(2024-01-02 13:00),
            end_time: datetime!(2024-01-02 14:30),
        };
        app.append_optimistic_entry(42, &payload);

        let appended = app.entries.last().unwrap();
        assert_eq!(appended.id, 42);
        assert_eq!(appended.duration, 90);
        assert_eq!(appended.project_name.as_deref(), Some("Beta"));
    }

    #[test]
    fn edit_draft_mirrors_entry_fields() {
        let mut app = app_with_data();
        app.entries_focus = PaneFocus::Table;
        app.begin_entry_edit();

        let RowState::Editing { id, draft } = &app.entry_rows else {
            panic!("expected editing state");
        };
        assert_eq!(*id, 10);
        assert_eq!(draft.project_idx, Some(0));
        assert_eq!(draft.start_input.value, "2024-01-01T09:30");
        assert_eq!(draft.end_input.value, "2024-01-01T10:15");
    }

    #[test]
    fn project_picker_wraps_both_ways() {
        let mut draft = EntryDraft::default();
        App::cycle_draft_project(&mut draft, 2, 1);
        assert_eq!(draft.project_idx, Some(0));
        App::cycle_draft_project(&mut draft, 2, 1);
        assert_eq!(draft.project_idx, Some(1));
        App::cycle_draft_project(&mut draft, 2, 1);
        assert_eq!(draft.project_idx, Some(0));
        App::cycle_draft_project(&mut draft, 2, -1);
        assert_eq!(draft.project_idx, Some(1));
    }
}
