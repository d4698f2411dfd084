use anyhow::Result;
use dialoguer::Confirm;
use tdo_core::gateway::TaskGateway;

use crate::cli::DeleteCommand;
use crate::views::Theme;

pub async fn delete_task(
    gateway: &impl TaskGateway,
    command: DeleteCommand,
    theme: Theme,
) -> Result<()> {
    if !command.force {
        let confirmation = Confirm::new()
            .with_prompt(format!(
                "Are you sure you want to delete task {}?",
                command.id
            ))
            .default(false)
            .interact()
            .unwrap_or(false);

        if !confirmation {
            println!("{}", theme.warning("Deletion cancelled."));
            return Ok(());
        }
    }

    gateway.delete_task(&command.id).await?;
    println!(
        "{} Task {} deleted!",
        theme.success("✓"),
        theme.id(&command.id)
    );
    Ok(())
}
