use anyhow::Result;
use tdo_core::gateway::{find_project_by_name, TaskGateway};
use tdo_core::models::NewTask;

use super::ensure_complete;
use crate::cli::AddCommand;
use crate::config::Config;
use crate::views::report::render_creation;
use crate::views::Theme;

pub async fn add_task(
    gateway: &impl TaskGateway,
    command: AddCommand,
    config: &Config,
    theme: Theme,
) -> Result<()> {
    let project_name = command.project.or_else(|| config.default_project.clone());
    let project_id = match project_name {
        Some(name) => Some(find_project_by_name(gateway, &name).await?.id),
        None => None,
    };

    let task = NewTask {
        content: command.content,
        description: command.description,
        project_id,
        parent_id: None,
        priority: Some(command.priority.unwrap_or(config.default_priority)),
        due_string: command.due,
        labels: Vec::new(),
    }
    .with_labels(command.labels);

    let report = gateway.create_task(&task, &command.subtasks).await?;
    println!("{}", render_creation(&report, theme));

    ensure_complete(&report)
}
