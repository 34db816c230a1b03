use std::sync::Arc;

use chrono::{DateTime, Utc};
use chrono_tz::Tz;

use crate::core::store::{EventStore, NotificationStore};
use crate::enums::NotificationType;
use crate::errors::Error;
use crate::utils::time::{days_between, is_same_calendar_day};

/// Diet reminders fire once the last meal log is strictly older than this.
pub const DIET_REMINDER_DAYS: i64 = 15;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Decision {
    Notify,
    Skip,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReminderThresholds {
    pub wellness_days: i64,
    pub behavior_days: i64,
}

impl Default for ReminderThresholds {
    fn default() -> Self {
        Self {
            wellness_days: 7,
            behavior_days: 14,
        }
    }
}

/// Whether the age of the last event calls for a reminder, before the
/// once-per-day suppression is applied. A dog with no event at all is
/// always due.
pub fn reminder_due(
    r#type: NotificationType,
    last_event_date: Option<DateTime<Utc>>,
    now: &DateTime<Tz>,
    thresholds: &ReminderThresholds,
) -> bool {
    let Some(last) = last_event_date else {
        return true;
    };
    let now_utc = now.with_timezone(&Utc);

    match r#type {
        NotificationType::Exercise => !is_same_calendar_day(last, now_utc, &now.timezone()),
        NotificationType::Diet => days_between(last, now_utc) > DIET_REMINDER_DAYS,
        NotificationType::Wellness => days_between(last, now_utc) > thresholds.wellness_days,
        NotificationType::Behavior => days_between(last, now_utc) > thresholds.behavior_days,
    }
}

pub struct RuleEvaluator {
    events: Arc<dyn EventStore>,
    notifications: Arc<dyn NotificationStore>,
    thresholds: ReminderThresholds,
}

impl RuleEvaluator {
    pub fn new(
        events: Arc<dyn EventStore>,
        notifications: Arc<dyn NotificationStore>,
        thresholds: ReminderThresholds,
    ) -> Self {
        Self {
            events,
            notifications,
            thresholds,
        }
    }

    /// Decides whether `user_id` should get a reminder of `type` about
    /// `dog_id` today. Store failures are returned to the caller untouched.
    pub async fn evaluate(
        &self,
        r#type: NotificationType,
        user_id: &str,
        dog_id: &str,
        now: &DateTime<Tz>,
    ) -> Result<Decision, Error> {
        let last_event = self
            .events
            .most_recent(dog_id, r#type.event_category())
            .await?;
        let last_event_date = last_event.map(|event| event.event_date.to_chrono());

        if !reminder_due(r#type, last_event_date, now, &self.thresholds) {
            tracing::debug!("No {} reminder due for dog {}", r#type, dog_id);
            return Ok(Decision::Skip);
        }

        let already_notified = self
            .notifications
            .exists_for_type_today(user_id, dog_id, r#type, now)
            .await?;
        if already_notified {
            tracing::debug!(
                "{} reminder already sent today for user {} dog {}",
                r#type,
                user_id,
                dog_id
            );
            return Ok(Decision::Skip);
        }

        Ok(Decision::Notify)
    }
}
