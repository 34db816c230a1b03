use serde::Serialize;
use utoipa::ToSchema;

use crate::core::notifier::sweep::SweepReport;

#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CronResponseDto {
    pub success: bool,
    pub message: String,
    pub report: SweepReport,
}
