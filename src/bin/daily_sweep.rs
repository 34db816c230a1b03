use pet_care_service::{app_state::AppState, config::APP_CONFIG, utils::tracing::init_standard_tracing};

/// One-shot sweep for schedulers that run a process instead of calling
/// the cron endpoint.
#[tokio::main]
async fn main() -> eyre::Result<()> {
    dotenvy::dotenv().ok();
    init_standard_tracing(env!("CARGO_CRATE_NAME"));

    let app_state = AppState::init(&APP_CONFIG).await?;
    let report = app_state.notifier.run_daily_sweep().await;

    tracing::info!(
        "Sweep report: users={} dogs={} created={} skipped={} failed={}",
        report.users,
        report.dogs,
        report.created,
        report.skipped,
        report.failed
    );

    if !report.success {
        eyre::bail!("daily sweep failed to enumerate users");
    }
    Ok(())
}
