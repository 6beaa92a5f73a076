//! Background job scheduling

use std::path::PathBuf;
use std::sync::Arc;

use tokio_cron_scheduler::{Job, JobScheduler};
use tracing::info;

use crate::services::RenamerService;

/// Initialize and start the job scheduler.
/// Runs the library maintenance pass (rename new arrivals, purge rows for
/// vanished files) on the configured cron schedule.
pub async fn start_scheduler(
    renamer: Arc<RenamerService>,
    media_path: PathBuf,
    cron: &str,
) -> anyhow::Result<JobScheduler> {
    let scheduler = JobScheduler::new().await?;

    let maintenance_job = Job::new_async(cron, move |_uuid, _l| {
        let renamer = renamer.clone();
        let media_path = media_path.clone();
        Box::pin(async move {
            info!("Running library maintenance");
            if let Err(e) = renamer.rename_tree(&media_path).await {
                tracing::error!("Library rename error: {}", e);
            }
            if let Err(e) = renamer.purge_missing().await {
                tracing::error!("Registry purge error: {}", e);
            }
        })
    })?;
    scheduler.add(maintenance_job).await?;

    scheduler.start().await?;

    info!("Job scheduler started");
    Ok(scheduler)
}
