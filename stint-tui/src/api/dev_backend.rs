use std::sync::{Arc, Mutex};

use stint_client::domain::{duration_minutes, Project, TimeEntry};
use stint_client::dto::{ProjectPayload, TimeEntryPayload};
use time::{Duration, PrimitiveDateTime, Time};

use crate::time_utils::{format_table_datetime, now_local, week_start};

/// In-memory stand-in for the API server. Mirrors the server's mutation
/// messages so the UI behaves identically in dev mode.
#[derive(Debug, Clone)]
pub struct DevBackend {
    projects: Arc<Mutex<Vec<Project>>>,
    entries: Arc<Mutex<Vec<TimeEntry>>>,
}

impl DevBackend {
    pub fn new() -> Self {
        let projects = seed_projects();
        let entries = seed_entries(&projects);
        Self {
            projects: Arc::new(Mutex::new(projects)),
            entries: Arc::new(Mutex::new(entries)),
        }
    }

    pub fn projects(&self) -> Vec<Project> {
        self.projects.lock().unwrap().clone()
    }

    pub fn create_project(&self, payload: &ProjectPayload) -> String {
        let mut projects = self.projects.lock().unwrap();
        let id = projects.iter().map(|p| p.id).max().unwrap_or(0) + 1;
        projects.push(Project {
            id,
            name: payload.name.clone(),
            description: Some(payload.description.clone()),
            created_at: Some(format_table_datetime(now_local())),
        });
        "Project created".to_string()
    }

    pub fn update_project(&self, id: i64, payload: &ProjectPayload) -> String {
        let mut projects = self.projects.lock().unwrap();
        if let Some(project) = projects.iter_mut().find(|p| p.id == id) {
            project.name = payload.name.clone();
            project.description = Some(payload.description.clone());
        }
        "Project updated".to_string()
    }

    pub fn delete_project(&self, id: i64) -> String {
        self.projects.lock().unwrap().retain(|p| p.id != id);
        "Project deleted".to_string()
    }

    pub fn time_entries(&self) -> Vec<TimeEntry> {
        self.entries.lock().unwrap().clone()
    }

    pub fn create_time_entry(&self, payload: &TimeEntryPayload) -> i64 {
        let project_name = self.project_name(payload.project_id);
        let mut entries = self.entries.lock().unwrap();
        let id = entries.iter().map(|e| e.id).max().unwrap_or(0) + 1;
        entries.push(TimeEntry {
            id,
            project_id: payload.project_id,
            project_name,
            description: payload.description.clone(),
            start_time: payload.start_time,
            end_time: payload.end_time,
            duration: duration_minutes(payload.start_time, payload.end_time),
            created_at: Some(format_table_datetime(now_local())),
        });
        id
    }

    pub fn update_time_entry(&self, id: i64, payload: &TimeEntryPayload) -> String {
        let project_name = self.project_name(payload.project_id);
        let mut entries = self.entries.lock().unwrap();
        if let Some(entry) = entries.iter_mut().find(|e| e.id == id) {
            entry.project_id = payload.project_id;
            entry.project_name = project_name;
            entry.description = payload.description.clone();
            entry.start_time = payload.start_time;
            entry.end_time = payload.end_time;
            entry.duration = duration_minutes(payload.start_time, payload.end_time);
        }
        "Time entry updated".to_string()
    }

    pub fn delete_time_entry(&self, id: i64) -> String {
        self.entries.lock().unwrap().retain(|e| e.id != id);
        "Time entry deleted".to_string()
    }

    fn project_name(&self, project_id: i64) -> Option<String> {
        self.projects
            .lock()
            .unwrap()
            .iter()
            .find(|p| p.id == project_id)
            .map(|p| p.name.clone())
    }
}

fn seed_projects() -> Vec<Project> {
    let created = format_table_datetime(now_local());
    let project = |id: i64, name: &str, description: &str| Project {
        id,
        name: name.to_string(),
        description: Some(description.to_string()),
        created_at: Some(created.clone()),
    };
    vec![
        project(1, "Website Redesign", "Marketing site refresh"),
        project(2, "Internal Tools", "Admin dashboard and scripts"),
        project(3, "Client Onboarding", "Setup calls and documentation"),
    ]
}

/// A handful of entries spread over the current week so the calendar grid
/// has something to show.
fn seed_entries(projects: &[Project]) -> Vec<TimeEntry> {
    let today = now_local().date();
    let monday = week_start(today);

    let entry = |id: i64,
                 day_offset: i64,
                 start: (u8, u8),
                 end: (u8, u8),
                 project: &Project,
                 description: &str| {
        let day = monday + Duration::days(day_offset);
        let start_time =
            PrimitiveDateTime::new(day, Time::from_hms(start.0, start.1, 0).unwrap());
        let end_time = PrimitiveDateTime::new(day, Time::from_hms(end.0, end.1, 0).unwrap());
        TimeEntry {
            id,
            project_id: project.id,
            project_name: Some(project.name.clone()),
            description: description.to_string(),
            start_time,
            end_time,
            duration: duration_minutes(start_time, end_time),
            created_at: None,
        }
    };

    vec![
        entry(1, 0, (9, 30), (10, 15), &projects[0], "Homepage wireframes"),
        entry(2, 0, (13, 0), (15, 0), &projects[1], "Deploy script cleanup"),
        entry(3, 1, (8, 0), (12, 0), &projects[0], "Design review"),
        entry(4, 2, (14, 30), (16, 45), &projects[2], "Kickoff call notes"),
        entry(5, 3, (10, 0), (10, 0), &projects[1], "Cancelled meeting"),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use time::macros::datetime;

    #[test]
    fn create_then_list_round_trips_entry_fields() {
        let dev = DevBackend::new();
        let payload = TimeEntryPayload {
            project_id: 1,
            description: "standup".to_string(),
            start_time: datetime!(2024-01-01 09:30),
            end_time: datetime!(2024-01-01 10:15),
        };

        let id = dev.create_time_entry(&payload);
        let entries = dev.time_entries();
        let created = entries.iter().find(|e| e.id == id).unwrap();

        assert_eq!(created.project_id, 1);
        assert_eq!(created.project_name.as_deref(), Some("Website Redesign"));
        assert_eq!(created.description, "standup");
        assert_eq!(created.start_time, datetime!(2024-01-01 09:30));
        assert_eq!(created.end_time, datetime!(2024-01-01 10:15));
        assert_eq!(created.duration, 45);
    }

    #[test]
    fn update_recomputes_duration_and_project_name() {
        let dev = DevBackend::new();
        let payload = TimeEntryPayload {
            project_id: 2,
            description: "moved".to_string(),
            start_time: datetime!(2024-01-02 09:00),
            end_time: datetime!(2024-01-02 09:30),
        };

        dev.update_time_entry(1, &payload);
        let entries = dev.time_entries();
        let updated = entries.iter().find(|e| e.id == 1).unwrap();

        assert_eq!(updated.duration, 30);
        assert_eq!(updated.project_name.as_deref(), Some("Internal Tools"));
    }

    #[test]
    fn delete_removes_entry() {
        let dev = DevBackend::new();
        let before = dev.time_entries().len();
        dev.delete_time_entry(1);
        assert_eq!(dev.time_entries().len(), before - 1);
    }
}
