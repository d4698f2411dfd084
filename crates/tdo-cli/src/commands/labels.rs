use anyhow::Result;
use tdo_core::gateway::TaskGateway;

use crate::views::table::render_labels;
use crate::views::Theme;

pub async fn list_labels(gateway: &impl TaskGateway, theme: Theme) -> Result<()> {
    let labels = gateway.list_labels().await?;
    println!("{}", render_labels(&labels, theme.colors()));
    Ok(())
}
