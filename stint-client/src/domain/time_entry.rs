use serde::{Deserialize, Serialize};
use time::PrimitiveDateTime;

use super::datetime_minute;
use super::Project;

/// A logged time entry as returned by the API. `duration` is denormalized
/// by the server; [`duration_minutes`] reproduces it locally for
/// optimistically created records.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct TimeEntry {
    pub id: i64,
    pub project_id: i64,
    #[serde(default)]
    pub project_name: Option<String>,
    pub description: String,
    #[serde(with = "datetime_minute")]
    pub start_time: PrimitiveDateTime,
    #[serde(with = "datetime_minute")]
    pub end_time: PrimitiveDateTime,
    #[serde(default)]
    pub duration: i64,
    #[serde(default)]
    pub created_at: Option<String>,
}

impl TimeEntry {
    /// Resolve the project name for display: the fetched project list wins,
    /// then the denormalized name, then blank. An orphaned `project_id` is
    /// never an error.
    pub fn display_project_name<'a>(&'a self, projects: &'a [Project]) -> &'a str {
        projects
            .iter()
            .find(|p| p.id == self.project_id)
            .map(|p| p.name.as_str())
            .or(self.project_name.as_deref())
            .unwrap_or("")
    }
}

/// Whole minutes between `start` and `end`, floored.
pub fn duration_minutes(start: PrimitiveDateTime, end: PrimitiveDateTime) -> i64 {
    (end - start).whole_seconds().div_euclid(60)
}

#[cfg(test)]
mod tests {
    use super::*;
    use time::macros::datetime;

    fn entry(project_id: i64, project_name: Option<&str>) -> TimeEntry {
        TimeEntry {
            id: 1,
            project_id,
            project_name: project_name.map(str::to_string),
            description: "work".to_string(),
            start_time: datetime!(2024-01-01 09:30),
            end_time: datetime!(2024-01-01 10:15),
            duration: 45,
            created_at: None,
        }
    }

    #[test]
    fn duration_floors_partial_minutes() {
        assert_eq!(
            duration_minutes(datetime!(2024-01-01 09:00:00), datetime!(2024-01-01 09:01:59)),
            1
        );
    }

    #[test]
    fn duration_zero_when_start_equals_end() {
        assert_eq!(
            duration_minutes(datetime!(2024-01-01 09:00), datetime!(2024-01-01 09:00)),
            0
        );
    }

    #[test]
    fn duration_of_three_quarter_hour_entry_is_45() {
        assert_eq!(
            duration_minutes(datetime!(2024-01-01 09:30), datetime!(2024-01-01 10:15)),
            45
        );
    }

    #[test]
    fn project_name_prefers_fetched_list() {
        let projects = vec![Project {
            id: 1,
            name: "Alpha".to_string(),
            description: None,
            created_at: None,
        }];
        assert_eq!(entry(1, Some("Stale")).display_project_name(&projects), "Alpha");
    }

    #[test]
    fn project_name_falls_back_to_denormalized_then_blank() {
        assert_eq!(entry(9, Some("Orphan")).display_project_name(&[]), "Orphan");
        assert_eq!(entry(9, None).display_project_name(&[]), "");
    }

    #[test]
    fn deserializes_server_payload() {
        let raw = r#"{
            "id": 3,
            "project_id": 1,
            "project_name": "Alpha",
            "description": "standup",
            "start_time": "2024-01-01T09:30:00",
            "end_time": "2024-01-01T10:15:00",
            "duration": 45,
            "created_at": "2024-01-01T10:16:00"
        }"#;
        let entry: TimeEntry = serde_json::from_str(raw).unwrap();
        assert_eq!(entry.start_time, datetime!(2024-01-01 09:30));
        assert_eq!(entry.duration, 45);
    }
}
