//! Todoist REST task source.

use async_trait::async_trait;
use serde::Deserialize;

use super::http::HttpClient;
use super::{BackendError, SourceCollaborator, SourceTask, TaskSource};

/// Default REST endpoint
pub const TODOIST_BASE_URL: &str = "https://api.todoist.com/rest/v2";

#[derive(Debug, Clone, Deserialize)]
pub struct TodoistDue {
    #[serde(default)]
    pub date: Option<String>,
    #[serde(default)]
    pub datetime: Option<String>,
    #[serde(default)]
    pub string: Option<String>,
    #[serde(default)]
    pub timezone: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct TodoistDuration {
    pub amount: i32,
    pub unit: String,
}

/// Task as returned by `GET /tasks`.
#[derive(Debug, Clone, Deserialize)]
pub struct TodoistTask {
    pub id: String,
    pub content: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub labels: Vec<String>,
    #[serde(default)]
    pub url: Option<String>,
    #[serde(default)]
    pub project_id: Option<String>,
    #[serde(default)]
    pub section_id: Option<String>,
    #[serde(default)]
    pub parent_id: Option<String>,
    #[serde(default)]
    pub due: Option<TodoistDue>,
    #[serde(default)]
    pub duration: Option<TodoistDuration>,
    #[serde(default)]
    pub creator_id: Option<String>,
    #[serde(default)]
    pub created_at: Option<String>,
    #[serde(default)]
    pub assigner_id: Option<String>,
    #[serde(default)]
    pub assignee_id: Option<String>,
    #[serde(default)]
    pub comment_count: i32,
    #[serde(default)]
    pub is_completed: bool,
    #[serde(default = "default_priority")]
    pub priority: i32,
    #[serde(default)]
    pub order: i32,
}

fn default_priority() -> i32 {
    1
}

#[derive(Debug, Clone, Deserialize)]
pub struct TodoistCollaborator {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub email: Option<String>,
}

/// Task source backed by the Todoist REST API.
pub struct TodoistClient {
    http: HttpClient,
}

impl TodoistClient {
    /// Create a client with the provided API token against the public endpoint.
    pub fn new(api_token: String) -> Self {
        Self::with_base_url(TODOIST_BASE_URL, api_token)
    }

    pub fn with_base_url(base_url: &str, api_token: String) -> Self {
        Self {
            http: HttpClient::new(base_url, api_token),
        }
    }

    // Helper: Transform Todoist API task → source task
    fn task_to_source(api_task: TodoistTask) -> SourceTask {
        SourceTask {
            remote_id: api_task.id,
            content: api_task.content,
            description: Some(api_task.description),
            labels: api_task.labels,
            url: api_task.url,
            project_id: api_task.project_id,
            section_id: api_task.section_id,
            parent_id: api_task.parent_id,
            due_date: api_task.due.as_ref().and_then(|d| d.date.clone()),
            due_datetime: api_task.due.as_ref().and_then(|d| d.datetime.clone()),
            due_string: api_task.due.as_ref().and_then(|d| d.string.clone()),
            due_timezone: api_task.due.as_ref().and_then(|d| d.timezone.clone()),
            duration_amount: api_task.duration.as_ref().map(|d| d.amount),
            duration_unit: api_task.duration.map(|d| d.unit),
            creator_id: api_task.creator_id,
            created_at: api_task.created_at,
            assigner_id: api_task.assigner_id,
            assignee_id: api_task.assignee_id,
            comment_count: api_task.comment_count,
            is_completed: api_task.is_completed,
            priority: api_task.priority,
            order_index: api_task.order,
        }
    }

    fn collaborator_to_source(api_collaborator: TodoistCollaborator) -> SourceCollaborator {
        SourceCollaborator {
            remote_id: api_collaborator.id,
            name: api_collaborator.name,
            email: api_collaborator.email,
        }
    }
}

#[async_trait]
impl TaskSource for TodoistClient {
    fn source_type(&self) -> &str {
        "todoist"
    }

    async fn fetch_tasks(&self, project_id: &str) -> Result<Vec<SourceTask>, BackendError> {
        let tasks: Vec<TodoistTask> = self.http.get_json("tasks", &[("project_id", project_id)]).await?;
        Ok(tasks.into_iter().map(Self::task_to_source).collect())
    }

    async fn fetch_collaborators(&self, project_id: &str) -> Result<Vec<SourceCollaborator>, BackendError> {
        let collaborators: Vec<TodoistCollaborator> = self
            .http
            .get_json(&format!("projects/{project_id}/collaborators"), &[])
            .await?;
        Ok(collaborators.into_iter().map(Self::collaborator_to_source).collect())
    }

    async fn close_task(&self, task_id: &str) -> Result<(), BackendError> {
        self.http.post_empty(&format!("tasks/{task_id}/close"), &[]).await
    }
}
