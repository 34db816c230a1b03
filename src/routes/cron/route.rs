use std::sync::Arc;

use axum::Json;
use axum::extract::State;
use utoipa_axum::router::OpenApiRouter;
use utoipa_axum::routes;

use crate::app_state::AppState;
use crate::core::cron_auth::CronAuth;
use crate::core::notifier::Notifier;
use crate::errors::Error;
use crate::routes::cron::dto::CronResponseDto;

pub fn create_route() -> OpenApiRouter<AppState> {
    OpenApiRouter::new().routes(routes!(run_daily))
}

#[utoipa::path(
    summary = "Run the daily reminder sweep",
    description = "Evaluates every reminder rule for every user and dog. Meant for an external scheduler.",
    get,
    path = "/cron/daily",
    tag = "Cron APIs",
    responses(
        (status = 200, description = "Sweep finished", body = CronResponseDto),
        (status = 401, description = "Unauthorized"),
        (status = 500, description = "Sweep could not enumerate users"),
    ),
    security(
    ("bearer_auth" = [])
    )
)]
pub async fn run_daily(
    _auth: CronAuth,
    State(notifier): State<Arc<Notifier>>,
) -> Result<Json<CronResponseDto>, Error> {
    tracing::info!("Starting daily notification checks...");
    let report = notifier.run_daily_sweep().await;

    if !report.success {
        return Err(Error::internal_err("Daily sweep failed to enumerate users"));
    }

    Ok(Json(CronResponseDto {
        success: true,
        message: "Daily cron job executed successfully".to_string(),
        report,
    }))
}
