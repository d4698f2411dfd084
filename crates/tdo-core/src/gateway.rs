use async_trait::async_trait;
use tracing::{info, warn};

use crate::error::CoreError;
use crate::filter::TaskFilter;
use crate::models::{CreationReport, Label, NewTask, Project, SubtaskOutcome, Task};

/// Operations the CLI needs from the remote task service.
#[async_trait]
pub trait TaskGateway: Send + Sync {
    async fn list_tasks(&self, filter: &TaskFilter) -> Result<Vec<Task>, CoreError>;
    async fn add_task(&self, task: &NewTask) -> Result<Task, CoreError>;
    async fn complete_task(&self, id: &str) -> Result<(), CoreError>;
    async fn delete_task(&self, id: &str) -> Result<(), CoreError>;
    async fn list_projects(&self) -> Result<Vec<Project>, CoreError>;
    async fn list_labels(&self) -> Result<Vec<Label>, CoreError>;

    /// Creates `task`, then each subtask under it in order.
    ///
    /// A failed parent aborts before any subtask is attempted. Subtask
    /// failures are recorded and the remaining subtasks still run; nothing
    /// already created is rolled back.
    async fn create_task(
        &self,
        task: &NewTask,
        subtasks: &[String],
    ) -> Result<CreationReport, CoreError> {
        let parent = self.add_task(task).await?;

        let mut outcomes = Vec::with_capacity(subtasks.len());
        for content in subtasks {
            let result = self
                .add_task(&NewTask::subtask_of(parent.id.clone(), content.clone()))
                .await;
            if let Err(e) = &result {
                warn!(parent = %parent.id, subtask = %content, error = %e, "subtask creation failed");
            }
            outcomes.push(SubtaskOutcome {
                content: content.clone(),
                result,
            });
        }

        info!(
            parent = %parent.id,
            created = outcomes.iter().filter(|o| o.result.is_ok()).count(),
            requested = subtasks.len(),
            "created task with subtasks"
        );

        Ok(CreationReport {
            parent,
            subtasks: outcomes,
        })
    }
}

/// Finds a project by name, ignoring case.
pub fn find_project<'a>(projects: &'a [Project], name: &str) -> Result<&'a Project, CoreError> {
    projects
        .iter()
        .find(|p| p.name.eq_ignore_ascii_case(name.trim()))
        .ok_or_else(|| CoreError::NotFound(format!("No project named '{}'", name)))
}

/// Fetches the project list and looks `name` up in it.
pub async fn find_project_by_name(
    gateway: &(impl TaskGateway + ?Sized),
    name: &str,
) -> Result<Project, CoreError> {
    let projects = gateway.list_projects().await?;
    find_project(&projects, name).cloned()
}
