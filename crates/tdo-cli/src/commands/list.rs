use anyhow::Result;
use chrono::Local;
use tdo_core::filter::TaskFilter;
use tdo_core::gateway::{find_project, TaskGateway};
use tracing::warn;

use crate::cli::ListCommand;
use crate::views::table::render_tasks;
use crate::views::Theme;

pub async fn list_tasks(
    gateway: &impl TaskGateway,
    command: ListCommand,
    theme: Theme,
) -> Result<()> {
    let projects = match gateway.list_projects().await {
        Ok(projects) => projects,
        // Names are only cosmetic unless we have to resolve --project.
        Err(e) if command.project.is_none() => {
            warn!(error = %e, "could not load projects; showing project ids");
            Vec::new()
        }
        Err(e) => return Err(e.into()),
    };

    let project_id = command
        .project
        .as_deref()
        .map(|name| find_project(&projects, name).map(|p| p.id.clone()))
        .transpose()?;

    let filter = TaskFilter {
        project_id,
        label: command.label,
        priority: command.priority,
        due: command.due,
    };

    let tasks = gateway.list_tasks(&filter).await?;
    println!(
        "{}",
        render_tasks(&tasks, &projects, Local::now().date_naive(), theme.colors())
    );

    Ok(())
}
