use anyhow::Result;
use tdo_core::gateway::TaskGateway;

use crate::cli::CompleteCommand;
use crate::views::Theme;

pub async fn complete_task(
    gateway: &impl TaskGateway,
    command: CompleteCommand,
    theme: Theme,
) -> Result<()> {
    gateway.complete_task(&command.id).await?;
    println!(
        "{} Task {} marked as complete!",
        theme.success("✓"),
        theme.id(&command.id)
    );
    Ok(())
}
