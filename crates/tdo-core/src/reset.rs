use crate::error::CoreError;
use crate::gateway::TaskGateway;
use crate::models::{CreationReport, NewTask};

pub const RESET_TASK_CONTENT: &str = "⚡ Task Reset";

pub const RESET_SUBTASKS: [&str; 3] = [
    "Capture all tasks",
    "Prioritise captured tasks",
    "Take action on highest priority tasks",
];

/// Creates the Task Reset checklist. Every call creates a new copy.
pub async fn create_reset_task(
    gateway: &(impl TaskGateway + ?Sized),
) -> Result<CreationReport, CoreError> {
    let subtasks: Vec<String> = RESET_SUBTASKS.iter().map(|s| s.to_string()).collect();
    gateway
        .create_task(&NewTask::new(RESET_TASK_CONTENT), &subtasks)
        .await
}
