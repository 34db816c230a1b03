use serde::Serialize;
use utoipa::ToSchema;

use super::Notifier;
use crate::enums::NotificationType;

/// Outcome of one pass over every user and dog.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SweepReport {
    pub success: bool,
    pub users: usize,
    pub dogs: usize,
    pub created: usize,
    pub skipped: usize,
    pub failed: usize,
}

impl Notifier {
    /// Evaluates every reminder rule for every (user, dog) pair.
    ///
    /// Rules for one pair run one after another, so the same
    /// (user, dog, type) is never evaluated twice at once within a sweep.
    /// A failing rule or dog lookup is logged and counted; the sweep moves
    /// on. Only failing to enumerate users marks the sweep unsuccessful.
    pub async fn run_daily_sweep(&self) -> SweepReport {
        let now = self.now();
        let mut report = SweepReport::default();

        let users = match self.directory.list_users().await {
            Ok(users) => users,
            Err(e) => {
                tracing::error!("Daily sweep aborted, failed to list users: {e}");
                return report;
            }
        };
        tracing::info!("Found {} users. Running daily checks...", users.len());
        report.users = users.len();

        for user in users {
            let user_id = user.id_hex();
            let dogs = match self.directory.dogs_for_user(&user_id).await {
                Ok(dogs) => dogs,
                Err(e) => {
                    tracing::error!("Failed to list dogs for user {user_id}: {e}");
                    report.failed += 1;
                    continue;
                }
            };
            tracing::debug!("User {} has {} dogs", user_id, dogs.len());
            report.dogs += dogs.len();

            for dog in dogs {
                let dog_id = dog.id_hex();
                for r#type in NotificationType::ALL {
                    match self.check_and_notify(r#type, &user_id, &dog_id, &now).await {
                        Ok(Some(_)) => report.created += 1,
                        Ok(None) => report.skipped += 1,
                        Err(e) if e.is_store_failure() => {
                            tracing::error!(
                                "{} rule hit a store failure for user {} dog {}: {e}",
                                r#type,
                                user_id,
                                dog_id
                            );
                            report.failed += 1;
                        }
                        Err(e) => {
                            tracing::warn!(
                                "{} rule failed for user {} dog {}: {e}",
                                r#type,
                                user_id,
                                dog_id
                            );
                            report.failed += 1;
                        }
                    }
                }
            }
        }

        report.success = true;
        tracing::info!(
            "Daily sweep finished: {} created, {} skipped, {} failed",
            report.created,
            report.skipped,
            report.failed
        );
        report
    }
}
