//! Typed calls for the dashboard server routes.

use crate::core::api::ApiClient;
use crate::domain::ports::Transport;
use crate::utils::error::Result;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::collections::BTreeMap;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DashboardStats {
    pub total_projects: u64,
    #[serde(default)]
    pub facility_types: BTreeMap<String, u64>,
    #[serde(default)]
    pub check_phases: BTreeMap<String, u64>,
    /// Projects created in the last seven days.
    pub recent_7days: u64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HealthStatus {
    pub status: String,
    pub version: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeleteOutcome {
    pub success: bool,
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub error: Option<String>,
}

/// A stored project. Only `id` is fixed; everything else is passed through.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Project {
    pub id: i64,
    #[serde(flatten)]
    pub fields: Map<String, Value>,
}

impl Project {
    pub fn field(&self, name: &str) -> Option<&Value> {
        self.fields.get(name)
    }
}

pub struct DashboardApi<T: Transport> {
    client: ApiClient<T>,
}

impl<T: Transport> DashboardApi<T> {
    pub fn new(client: ApiClient<T>) -> Self {
        Self { client }
    }

    pub fn client(&self) -> &ApiClient<T> {
        &self.client
    }

    pub async fn stats(&self) -> Result<DashboardStats> {
        self.client.get("/api/stats").await
    }

    pub async fn health(&self) -> Result<HealthStatus> {
        self.client.get("/health").await
    }

    pub async fn project(&self, id: i64) -> Result<Project> {
        self.client.get(&format!("/api/projects/{}", id)).await
    }

    pub async fn delete_project(&self, id: i64) -> Result<DeleteOutcome> {
        self.client.delete(&format!("/api/projects/{}", id)).await
    }
}
