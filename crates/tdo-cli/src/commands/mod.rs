pub mod add;
pub mod complete;
pub mod delete;
pub mod labels;
pub mod list;
pub mod projects;
pub mod reset;

use anyhow::Result;
use tdo_core::models::CreationReport;
use thiserror::Error;

/// The parent task exists but some of its subtasks do not.
#[derive(Error, Debug)]
#[error("{failed} of {requested} subtasks could not be created; the parent task was kept")]
pub struct PartialCreation {
    pub failed: usize,
    pub requested: usize,
}

pub(crate) fn ensure_complete(report: &CreationReport) -> Result<()> {
    let failed = report.failed().count();
    if failed > 0 {
        return Err(PartialCreation {
            failed,
            requested: report.subtasks.len(),
        }
        .into());
    }
    Ok(())
}
