use tokio::net::TcpListener;
use tracing::info;

use training_hours_report::api::routes::create_routes;
use training_hours_report::config::{
    run_migrations, AppConfig, DatabaseConfig, DatabaseSeeder, RecomputePolicy,
};
use training_hours_report::services::{ReportScheduler, TrainingHoursService};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize tracing
    tracing_subscriber::fmt::init();

    let config = AppConfig::from_env()?;
    let db_config = DatabaseConfig::from_env()?;

    let db = db_config.create_pool().await?;
    run_migrations(&db).await?;
    DatabaseSeeder::new(db.clone()).seed_admin().await?;

    // The monthly batch job only runs under the on_save policy; on_render
    // keeps rows fresh at read time and needs no scheduler.
    let mut _scheduler = None;
    if config.recompute_policy == RecomputePolicy::OnSave {
        let mut scheduler = ReportScheduler::new(TrainingHoursService::new(db.clone())).await?;
        scheduler.start().await?;
        _scheduler = Some(scheduler);
    }

    let app = create_routes(db, &config);

    let listener = TcpListener::bind(config.server_address()).await?;
    info!(
        "training hours report service listening on http://{} (recompute policy: {})",
        config.server_address(),
        config.recompute_policy.as_str()
    );

    axum::serve(listener, app).await?;

    Ok(())
}
