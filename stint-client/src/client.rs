use reqwest::{Client, RequestBuilder, Response, StatusCode, Url};
use serde::de::DeserializeOwned;
use tracing::debug;

use crate::domain::{Project, TimeEntry};
use crate::dto::{
    CreatedResponse, CredentialsRequest, CsrfResponse, LoginResponse, MessageResponse,
    ProjectPayload, TimeEntryPayload,
};
use crate::ApiError;

/// Canonical anti-forgery header. The server accepts a couple of spellings;
/// every mutating request built here uses this one.
pub const CSRF_HEADER: &str = "X-CSRF-Token";

#[derive(Debug, Clone)]
pub struct ApiClient {
    client: Client,
    base_url: Url,
    token: Option<String>,
    csrf_token: Option<String>,
}

impl ApiClient {
    pub fn new(base_url: &str) -> Result<Self, ApiError> {
        let base_url = Url::parse(base_url.trim_end_matches('/'))
            .map_err(|e| ApiError::Response(format!("Invalid API URL {base_url}: {e}")))?;
        let client = Client::builder()
            .build()
            .map_err(|e| ApiError::Response(format!("Failed to build HTTP client: {e}")))?;
        Ok(Self {
            client,
            base_url,
            token: None,
            csrf_token: None,
        })
    }

    pub fn with_token(base_url: &str, token: &str) -> Result<Self, ApiError> {
        let mut client = Self::new(base_url)?;
        client.token = Some(token.to_string());
        Ok(client)
    }

    pub fn token(&self) -> Option<&str> {
        self.token.as_deref()
    }

    pub fn clear_token(&mut self) {
        self.token = None;
        self.csrf_token = None;
    }

    fn endpoint(&self, path: &str) -> Result<Url, ApiError> {
        self.base_url
            .join(path)
            .map_err(|e| ApiError::Response(format!("Failed to build URL for {path}: {e}")))
    }

    fn authed(&self, req: RequestBuilder) -> RequestBuilder {
        match &self.token {
            Some(token) => req.bearer_auth(token),
            None => req,
        }
    }

    fn mutating(&self, req: RequestBuilder) -> RequestBuilder {
        let req = self.authed(req);
        match &self.csrf_token {
            Some(csrf) => req.header(CSRF_HEADER, csrf),
            None => req,
        }
    }

    async fn send(&self, request: RequestBuilder, call_name: &str) -> Result<Response, ApiError> {
        debug!(call = call_name, "sending request");
        let response = request
            .send()
            .await
            .map_err(|e| ApiError::Response(format!("Failed to call {call_name}: {e}")))?;

        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        // Error statuses still carry a JSON `message` body meant for the
        // user (e.g. "Invalid credentials"); surface it verbatim.
        let message = response
            .json::<MessageResponse>()
            .await
            .ok()
            .map(|m| m.message);
        match message {
            Some(message) => Err(ApiError::Rejected { message }),
            None if matches!(status, StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN) => {
                Err(ApiError::Unauthorized)
            }
            None => Err(ApiError::Response(format!(
                "{call_name} returned {status}"
            ))),
        }
    }

    async fn get_json<T: DeserializeOwned>(
        &self,
        request: RequestBuilder,
        call_name: &str,
    ) -> Result<T, ApiError> {
        let response = self.send(request, call_name).await?;
        response
            .json::<T>()
            .await
            .map_err(|e| ApiError::Parsing(format!("Failed to parse {call_name} response: {e}")))
    }

    /// GET /api/ping — health check, returns the server's message.
    pub async fn ping(&self) -> Result<String, ApiError> {
        let resp: MessageResponse = self
            .get_json(self.client.get(self.endpoint("/api/ping")?), "GET /api/ping")
            .await?;
        Ok(resp.message)
    }

    /// GET /api/csrf-token — fetch and store a fresh anti-forgery token.
    pub async fn fetch_csrf_token(&mut self) -> Result<(), ApiError> {
        let resp: CsrfResponse = self
            .get_json(
                self.client.get(self.endpoint("/api/csrf-token")?),
                "GET /api/csrf-token",
            )
            .await?;
        self.csrf_token = Some(resp.csrf_token);
        Ok(())
    }

    /// POST /api/register — returns the server message.
    pub async fn register(&self, username: &str, password: &str) -> Result<String, ApiError> {
        let body = CredentialsRequest { username, password };
        let resp: MessageResponse = self
            .get_json(
                self.mutating(self.client.post(self.endpoint("/api/register")?))
                    .json(&body),
                "POST /api/register",
            )
            .await?;
        Ok(resp.message)
    }

    /// POST /api/login — on success stores the bearer token and refreshes
    /// the anti-forgery token (a new session invalidates the old one).
    pub async fn login(&mut self, username: &str, password: &str) -> Result<LoginResponse, ApiError> {
        let body = CredentialsRequest { username, password };
        let resp: LoginResponse = self
            .get_json(
                self.mutating(self.client.post(self.endpoint("/api/login")?))
                    .json(&body),
                "POST /api/login",
            )
            .await?;
        if let Some(token) = &resp.token {
            self.token = Some(token.clone());
            self.fetch_csrf_token().await?;
        }
        Ok(resp)
    }

    /// GET /api/projects
    pub async fn projects(&self) -> Result<Vec<Project>, ApiError> {
        self.get_json(
            self.authed(self.client.get(self.endpoint("/api/projects")?)),
            "GET /api/projects",
        )
        .await
    }

    /// POST /api/projects — returns the server message.
    pub async fn create_project(&self, payload: &ProjectPayload) -> Result<String, ApiError> {
        let resp: MessageResponse = self
            .get_json(
                self.mutating(self.client.post(self.endpoint("/api/projects")?))
                    .json(payload),
                "POST /api/projects",
            )
            .await?;
        Ok(resp.message)
    }

    /// PUT /api/projects/{id}
    pub async fn update_project(
        &self,
        id: i64,
        payload: &ProjectPayload,
    ) -> Result<String, ApiError> {
        let url = self.endpoint(&format!("/api/projects/{id}"))?;
        let resp: MessageResponse = self
            .get_json(
                self.mutating(self.client.put(url)).json(payload),
                "PUT /api/projects/{id}",
            )
            .await?;
        Ok(resp.message)
    }

    /// DELETE /api/projects/{id}
    pub async fn delete_project(&self, id: i64) -> Result<String, ApiError> {
        let url = self.endpoint(&format!("/api/projects/{id}"))?;
        let resp: MessageResponse = self
            .get_json(self.mutating(self.client.delete(url)), "DELETE /api/projects/{id}")
            .await?;
        Ok(resp.message)
    }

    /// GET /api/time-entries
    pub async fn time_entries(&self) -> Result<Vec<TimeEntry>, ApiError> {
        self.get_json(
            self.authed(self.client.get(self.endpoint("/api/time-entries")?)),
            "GET /api/time-entries",
        )
        .await
    }

    /// POST /api/time-entries — returns the new entry's id.
    pub async fn create_time_entry(&self, payload: &TimeEntryPayload) -> Result<i64, ApiError> {
        let resp: CreatedResponse = self
            .get_json(
                self.mutating(self.client.post(self.endpoint("/api/time-entries")?))
                    .json(payload),
                "POST /api/time-entries",
            )
            .await?;
        Ok(resp.id)
    }

    /// PUT /api/time-entries/{id}
    pub async fn update_time_entry(
        &self,
        id: i64,
        payload: &TimeEntryPayload,
    ) -> Result<String, ApiError> {
        let url = self.endpoint(&format!("/api/time-entries/{id}"))?;
        let resp: MessageResponse = self
            .get_json(
                self.mutating(self.client.put(url)).json(payload),
                "PUT /api/time-entries/{id}",
            )
            .await?;
        Ok(resp.message)
    }

    /// DELETE /api/time-entries/{id}
    pub async fn delete_time_entry(&self, id: i64) -> Result<String, ApiError> {
        let url = self.endpoint(&format!("/api/time-entries/{id}"))?;
        let resp: MessageResponse = self
            .get_json(
                self.mutating(self.client.delete(url)),
                "DELETE /api/time-entries/{id}",
            )
            .await?;
        Ok(resp.message)
    }
}
