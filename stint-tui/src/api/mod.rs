mod dev_backend;

pub use dev_backend::DevBackend;

use anyhow::Result;
use stint_client::domain::{Project, TimeEntry};
use stint_client::dto::{ProjectPayload, TimeEntryPayload};
use stint_client::ApiClient;

/// Data source for the UI: the real API server or a seeded in-memory store
/// (`stint dev`), so the whole interface is usable offline.
pub enum Backend {
    Remote(ApiClient),
    Dev(DevBackend),
}

impl Backend {
    pub fn remote(client: ApiClient) -> Self {
        Self::Remote(client)
    }

    pub fn dev() -> Self {
        Self::Dev(DevBackend::new())
    }

    pub async fn projects(&mut self) -> Result<Vec<Project>> {
        match self {
            Self::Remote(client) => Ok(client.projects().await?),
            Self::Dev(dev) => Ok(dev.projects()),
        }
    }

    pub async fn create_project(&mut self, payload: &ProjectPayload) -> Result<String> {
        match self {
            Self::Remote(client) => Ok(client.create_project(payload).await?),
            Self::Dev(dev) => Ok(dev.create_project(payload)),
        }
    }

    pub async fn update_project(&mut self, id: i64, payload: &ProjectPayload) -> Result<String> {
        match self {
            Self::Remote(client) => Ok(client.update_project(id, payload).await?),
            Self::Dev(dev) => Ok(dev.update_project(id, payload)),
        }
    }

    pub async fn delete_project(&mut self, id: i64) -> Result<String> {
        match self {
            Self::Remote(client) => Ok(client.delete_project(id).await?),
            Self::Dev(dev) => Ok(dev.delete_project(id)),
        }
    }

    pub async fn time_entries(&mut self) -> Result<Vec<TimeEntry>> {
        match self {
            Self::Remote(client) => Ok(client.time_entries().await?),
            Self::Dev(dev) => Ok(dev.time_entries()),
        }
    }

    pub async fn create_time_entry(&mut self, payload: &TimeEntryPayload) -> Result<i64> {
        match self {
            Self::Remote(client) => Ok(client.create_time_entry(payload).await?),
            Self::Dev(dev) => Ok(dev.create_time_entry(payload)),
        }
    }

    pub async fn update_time_entry(&mut self, id: i64, payload: &TimeEntryPayload) -> Result<String> {
        match self {
            Self::Remote(client) => Ok(client.update_time_entry(id, payload).await?),
            Self::Dev(dev) => Ok(dev.update_time_entry(id, payload)),
        }
    }

    pub async fn delete_time_entry(&mut self, id: i64) -> Result<String> {
        match self {
            Self::Remote(client) => Ok(client.delete_time_entry(id).await?),
            Self::Dev(dev) => Ok(dev.delete_time_entry(id)),
        }
    }
}
