use anyhow::Result;
use tdo_core::gateway::TaskGateway;
use tdo_core::reset::create_reset_task;

use super::ensure_complete;
use crate::views::report::render_creation;
use crate::views::Theme;

pub async fn reset(gateway: &impl TaskGateway, theme: Theme) -> Result<()> {
    let report = create_reset_task(gateway).await?;
    println!("{}", render_creation(&report, theme));
    ensure_complete(&report)?;
    println!("{}", theme.success("Task Reset created successfully!"));
    Ok(())
}
