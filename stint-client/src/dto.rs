use serde::{Deserialize, Serialize};
use time::PrimitiveDateTime;

use crate::domain::datetime_minute;

#[derive(Serialize)]
pub struct CredentialsRequest<'a> {
    pub username: &'a str,
    pub password: &'a str,
}

#[derive(Deserialize)]
pub struct MessageResponse {
    pub message: String,
}

#[derive(Deserialize)]
pub struct LoginResponse {
    pub message: String,
    #[serde(default)]
    pub token: Option<String>,
}

#[derive(Deserialize)]
pub struct CsrfResponse {
    pub csrf_token: String,
}

#[derive(Deserialize)]
pub struct CreatedResponse {
    pub id: i64,
}

#[derive(Debug, Clone, Serialize)]
pub struct ProjectPayload {
    pub name: String,
    pub description: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct TimeEntryPayload {
    pub project_id: i64,
    pub description: String,
    #[serde(with = "datetime_minute")]
    pub start_time: PrimitiveDateTime,
    #[serde(with = "datetime_minute")]
    pub end_time: PrimitiveDateTime,
}

#[cfg(test)]
mod tests {
    use super::*;
    use time::macros::datetime;

    #[test]
    fn entry_payload_uses_minute_precision() {
        let payload = TimeEntryPayload {
            project_id: 1,
            description: "standup".to_string(),
            start_time: datetime!(2024-01-01 09:30),
            end_time: datetime!(2024-01-01 10:15),
        };
        let json = serde_json::to_value(&payload).unwrap();
        assert_eq!(json["start_time"], "2024-01-01T09:30");
        assert_eq!(json["end_time"], "2024-01-01T10:15");
    }
}
