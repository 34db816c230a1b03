pub mod composer;
pub mod rules;
pub mod sweep;

use std::sync::Arc;

use chrono::{DateTime, Utc};
use chrono_tz::Tz;

use crate::core::store::{Directory, EventStore, NotificationStore};
use crate::core::text_generation::TextGenerator;
use crate::enums::NotificationType;
use crate::errors::Error;
use crate::models::notification::{NewNotification, Notification};

use self::composer::MessageComposer;
use self::rules::{Decision, ReminderThresholds, RuleEvaluator};

/// Ties rule evaluation, message composition and persistence together.
pub struct Notifier {
    evaluator: RuleEvaluator,
    composer: MessageComposer,
    notifications: Arc<dyn NotificationStore>,
    directory: Arc<dyn Directory>,
    timezone: Tz,
}

impl Notifier {
    pub fn new(
        events: Arc<dyn EventStore>,
        notifications: Arc<dyn NotificationStore>,
        directory: Arc<dyn Directory>,
        generator: Arc<dyn TextGenerator>,
        timezone: Tz,
        thresholds: ReminderThresholds,
    ) -> Self {
        Self {
            evaluator: RuleEvaluator::new(events.clone(), notifications.clone(), thresholds),
            composer: MessageComposer::new(directory.clone(), events, generator),
            notifications,
            directory,
            timezone,
        }
    }

    pub fn now(&self) -> DateTime<Tz> {
        Utc::now().with_timezone(&self.timezone)
    }

    /// Composes and persists one notification, whether or not a rule
    /// asked for it.
    pub async fn create_notification(
        &self,
        r#type: NotificationType,
        user_id: &str,
        dog_id: &str,
        title: Option<String>,
        message: Option<String>,
        now: &DateTime<Tz>,
    ) -> Result<Notification, Error> {
        let composed = self
            .composer
            .compose(r#type, user_id, dog_id, title, message, now)
            .await;

        let notification = self
            .notifications
            .create(NewNotification {
                user_id: user_id.to_string(),
                dog_id: dog_id.to_string(),
                r#type,
                title: composed.title,
                message: composed.message,
            })
            .await?;

        tracing::info!(
            "Created {} notification {} for user {} dog {}",
            r#type,
            notification.id_hex(),
            user_id,
            dog_id
        );
        Ok(notification)
    }

    /// Runs one rule and creates the reminder when it says so.
    pub async fn check_and_notify(
        &self,
        r#type: NotificationType,
        user_id: &str,
        dog_id: &str,
        now: &DateTime<Tz>,
    ) -> Result<Option<Notification>, Error> {
        match self.evaluator.evaluate(r#type, user_id, dog_id, now).await? {
            Decision::Skip => Ok(None),
            Decision::Notify => self
                .create_notification(r#type, user_id, dog_id, None, None, now)
                .await
                .map(Some),
        }
    }
}
