use anyhow::Result;
use tdo_core::gateway::TaskGateway;

use crate::views::table::render_projects;
use crate::views::Theme;

pub async fn list_projects(gateway: &impl TaskGateway, theme: Theme) -> Result<()> {
    let projects = gateway.list_projects().await?;
    println!("{}", render_projects(&projects, theme.colors()));
    Ok(())
}
