use anyhow::{anyhow, Result};
use tokio_cron_scheduler::{Job, JobScheduler};
use tracing::{error, info};

use crate::services::TrainingHoursService;

// 03:10 on the first day of every month.
const MONTHLY_RECOMPUTE_CRON: &str = "0 10 3 1 * *";

/// Owns the cron scheduler that drives the monthly batch recompute. The
/// batch run is what heals month rollover: on the 1st every cached total
/// naturally resets to the new month's (usually empty) sum even when no
/// session was edited.
pub struct ReportScheduler {
    scheduler: JobScheduler,
    hours_service: TrainingHoursService,
}

impl ReportScheduler {
    pub async fn new(hours_service: TrainingHoursService) -> Result<Self> {
        let scheduler = JobScheduler::new()
            .await
            .map_err(|e| anyhow!("failed to create job scheduler: {}", e))?;

        Ok(Self {
            scheduler,
            hours_service,
        })
    }

    pub async fn start(&mut self) -> Result<()> {
        let hours_service = self.hours_service.clone();

        let job = Job::new_async(MONTHLY_RECOMPUTE_CRON, move |_id, _sched| {
            let hours_service = hours_service.clone();
            Box::pin(async move {
                match hours_service.recompute_all_users().await {
                    Ok(count) => info!(count, "monthly hours recompute finished"),
                    Err(e) => error!("monthly hours recompute failed: {}", e),
                }
            })
        })
        .map_err(|e| anyhow!("failed to create monthly recompute job: {}", e))?;

        self.scheduler
            .add(job)
            .await
            .map_err(|e| anyhow!("failed to schedule monthly recompute job: {}", e))?;

        self.scheduler
            .start()
            .await
            .map_err(|e| anyhow!("failed to start job scheduler: {}", e))?;

        info!("report scheduler started");
        Ok(())
    }

    pub async fn stop(&mut self) -> Result<()> {
        self.scheduler
            .shutdown()
            .await
            .map_err(|e| anyhow!("failed to stop job scheduler: {}", e))?;

        info!("report scheduler stopped");
        Ok(())
    }
}
