use stint_client::domain::{Project, TimeEntry};
use time::Date;

mod edit;
pub mod filter;
pub mod grid;
mod navigation;
mod state;

pub use filter::{EntryFilter, FilterField};
pub use state::{
    EntryDraft, EntryField, EntryModal, ModalMode, PaneFocus, ProjectDraft, ProjectField,
    RowState, TextInput, View,
};

use crate::time_utils;

pub struct App {
    pub running: bool,
    pub current_view: View,
    pub status_message: Option<String>,
    pub is_loading: bool,
    pub throbber_state: throbber_widgets_tui::ThrobberState,

    // Server state, replaced wholesale on every fetch.
    pub projects: Vec<Project>,
    pub entries: Vec<TimeEntry>,

    // Projects screen
    pub project_form: ProjectDraft,
    pub project_rows: RowState<ProjectDraft>,
    pub selected_project_row: usize,
    pub projects_focus: PaneFocus,

    // Time-entries screen
    pub entry_form: EntryDraft,
    pub entry_rows: RowState<EntryDraft>,
    pub selected_entry_row: usize,
    pub entries_focus: PaneFocus,
    pub filter: EntryFilter,

    // Calendar screen
    pub week_start: Date,
    pub calendar_day: usize,
    pub calendar_hour: u8,
    pub modal: Option<EntryModal>,
}

impl App {
    pub fn new() -> Self {
        let today = time_utils::now_local();
        Self {
            running: true,
            current_view: View::Projects,
            status_message: None,
            is_loading: false,
            throbber_state: throbber_widgets_tui::ThrobberState::default(),
            projects: Vec::new(),
            entries: Vec::new(),
            project_form: ProjectDraft::default(),
            project_rows: RowState::Viewing,
            selected_project_row: 0,
            projects_focus: PaneFocus::Form,
            entry_form: EntryDraft::default(),
            entry_rows: RowState::Viewing,
            selected_entry_row: 0,
            entries_focus: PaneFocus::Form,
            filter: EntryFilter::default(),
            week_start: time_utils::week_start(today.date()),
            calendar_day: today.date().weekday().number_days_from_monday() as usize,
            calendar_hour: today.hour(),
            modal: None,
        }
    }

    pub fn quit(&mut self) {
        self.running = false;
    }

    pub fn set_status(&mut self, message: String) {
        self.status_message = Some(message);
    }

    pub fn clear_status(&mut self) {
        self.status_message = None;
    }

    /// Replace the project list with fresh server state.
    pub fn set_projects(&mut self, projects: Vec<Project>) {
        self.projects = projects;
        if self.selected_project_row >= self.projects.len() {
            self.selected_project_row = self.projects.len().saturating_sub(1);
        }
    }

    /// Replace the entry list with fresh server state.
    pub fn set_entries(&mut self, entries: Vec<TimeEntry>) {
        self.entries = entries;
        self.clamp_entry_selection();
    }

    /// Keep the table selection inside the filtered view. Called whenever
    /// the entry list or the filter changes.
    pub fn clamp_entry_selection(&mut self) {
        let visible = self.filtered_entries().len();
        if self.selected_entry_row >= visible {
            self.selected_entry_row = visible.saturating_sub(1);
        }
    }

    /// Entries passing the current filter, in fetch order.
    pub fn filtered_entries(&self) -> Vec<&TimeEntry> {
        self.entries
            .iter()
            .filter(|e| self.filter.matches(e))
            .collect()
    }

    pub fn selected_entry(&self) -> Option<&TimeEntry> {
        self.filtered_entries().get(self.selected_entry_row).copied()
    }

    pub fn selected_project(&self) -> Option<&Project> {
        self.projects.get(self.selected_project_row)
    }

    pub fn modal_entry(&self) -> Option<&TimeEntry> {
        let modal = self.modal.as_ref()?;
        self.entries.iter().find(|e| e.id == modal.entry_id)
    }
}
