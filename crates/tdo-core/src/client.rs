//! Todoist REST v2 client.
//!
//! API documentation: <https://developer.todoist.com/rest/v2/>

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, RequestBuilder, Response, StatusCode};
use serde::de::DeserializeOwned;
use tracing::{debug, info, warn};
use uuid::Uuid;

use crate::auth::ApiToken;
use crate::error::CoreError;
use crate::filter::TaskFilter;
use crate::gateway::TaskGateway;
use crate::models::{Label, NewTask, Project, Task};

/// Base URL for the Todoist REST API.
pub const API_BASE_URL: &str = "https://api.todoist.com/rest/v2";

/// Default timeout for API requests.
const DEFAULT_TIMEOUT_SECS: u64 = 30;

#[derive(Clone)]
pub struct TodoistClient {
    client: Client,
    token: ApiToken,
    base_url: String,
}

impl TodoistClient {
    /// Creates a client against the public API.
    pub fn new(token: ApiToken) -> Result<Self, CoreError> {
        Self::with_base_url(token, API_BASE_URL)
    }

    /// Creates a client against another base URL (a proxy or a test server).
    pub fn with_base_url(token: ApiToken, base_url: impl Into<String>) -> Result<Self, CoreError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(DEFAULT_TIMEOUT_SECS))
            .user_agent(concat!("tdo/", env!("CARGO_PKG_VERSION")))
            .build()?;

        Ok(Self {
            client,
            token,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        })
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    fn authorized(&self, request: RequestBuilder) -> RequestBuilder {
        request.bearer_auth(self.token.expose())
    }

    async fn get<T: DeserializeOwned>(
        &self,
        path: &str,
        query: &[(&str, &str)],
    ) -> Result<T, CoreError> {
        let url = self.url(path);
        debug!(url = %url, ?query, "GET request");

        let response = self
            .authorized(self.client.get(&url))
            .query(query)
            .send()
            .await?;

        Self::parse(Self::check(response, path).await?).await
    }

    async fn post_empty(&self, path: &str) -> Result<(), CoreError> {
        let url = self.url(path);
        debug!(url = %url, "POST request (empty response)");

        let response = self.authorized(self.client.post(&url)).send().await?;
        Self::check(response, path).await.map(|_| ())
    }

    async fn delete(&self, path: &str) -> Result<(), CoreError> {
        let url = self.url(path);
        debug!(url = %url, "DELETE request");

        let response = self.authorized(self.client.delete(&url)).send().await?;
        Self::check(response, path).await.map(|_| ())
    }

    /// Turns non-success statuses into errors, passing successes through.
    async fn check(response: Response, path: &str) -> Result<Response, CoreError> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        let text = response.text().await.unwrap_or_default();
        let message = if text.trim().is_empty() {
            status
                .canonical_reason()
                .unwrap_or("request failed")
                .to_string()
        } else {
            text.trim().to_string()
        };

        if status == StatusCode::NOT_FOUND {
            Err(CoreError::NotFound(format!("{path}: {message}")))
        } else {
            Err(CoreError::Remote {
                status: Some(status.as_u16()),
                message,
            })
        }
    }

    async fn parse<T: DeserializeOwned>(response: Response) -> Result<T, CoreError> {
        let text = response.text().await?;
        serde_json::from_str(&text).map_err(|e| {
            warn!(error = %e, body = %text, "Failed to parse response");
            CoreError::Remote {
                status: None,
                message: format!("unexpected response body: {e}"),
            }
        })
    }
}

#[async_trait]
impl TaskGateway for TodoistClient {
    async fn list_tasks(&self, filter: &TaskFilter) -> Result<Vec<Task>, CoreError> {
        let mut query = Vec::new();
        if let Some(project_id) = &filter.project_id {
            query.push(("project_id", project_id.as_str()));
        }
        if let Some(label) = &filter.label {
            query.push(("label", label.as_str()));
        }

        let tasks: Vec<Task> = self.get("/tasks", &query).await?;
        let fetched = tasks.len();
        let tasks = filter.apply(tasks);
        info!(fetched, kept = tasks.len(), "retrieved tasks");
        Ok(tasks)
    }

    async fn add_task(&self, task: &NewTask) -> Result<Task, CoreError> {
        let url = self.url("/tasks");
        debug!(url = %url, content = %task.content, "POST request");

        let response = self
            .authorized(self.client.post(&url))
            .header("X-Request-Id", Uuid::new_v4().to_string())
            .json(task)
            .send()
            .await?;

        let created: Task = Self::parse(Self::check(response, "/tasks").await?).await?;
        info!(id = %created.id, content = %created.content, "created task");
        Ok(created)
    }

    async fn complete_task(&self, id: &str) -> Result<(), CoreError> {
        self.post_empty(&format!("/tasks/{id}/close")).await?;
        info!(id, "completed task");
        Ok(())
    }

    async fn delete_task(&self, id: &str) -> Result<(), CoreError> {
        self.delete(&format!("/tasks/{id}")).await?;
        info!(id, "deleted task");
        Ok(())
    }

    async fn list_projects(&self) -> Result<Vec<Project>, CoreError> {
        let projects: Vec<Project> = self.get("/projects", &[]).await?;
        info!(count = projects.len(), "retrieved projects");
        Ok(projects)
    }

    async fn list_labels(&self) -> Result<Vec<Label>, CoreError> {
        let labels: Vec<Label> = self.get("/labels", &[]).await?;
        info!(count = labels.len(), "retrieved labels");
        Ok(labels)
    }
}
