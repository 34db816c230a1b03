use std::sync::Arc;

use axum::extract::FromRef;
use chrono_tz::Tz;

use crate::config::Config;
use crate::core::notifier::Notifier;
use crate::core::notifier::rules::ReminderThresholds;
use crate::core::store::mongo::MongoStore;
use crate::core::store::{Directory, EventStore, NotificationStore};
use crate::core::text_generation::openai::OpenAiTextGenerator;
use crate::core::text_generation::{DisabledTextGenerator, TextGenerator};
use crate::database;

#[derive(Clone)]
pub struct AppState {
    pub events: Arc<dyn EventStore>,
    pub notifications: Arc<dyn NotificationStore>,
    pub directory: Arc<dyn Directory>,
    pub notifier: Arc<Notifier>,
    pub cron_secret: Option<String>,
}

impl AppState {
    /// Connects to the configured database and wires every collaborator.
    pub async fn init(config: &Config) -> eyre::Result<Self> {
        let database = database::connect(&config.database_uri, &config.database_name).await?;
        let store = Arc::new(MongoStore::new(database));

        let generator: Arc<dyn TextGenerator> = match &config.openai_api_key {
            Some(api_key) if !api_key.is_empty() => Arc::new(OpenAiTextGenerator::new(
                api_key.clone(),
                config.openai_model.clone(),
                config.openai_base_url.clone(),
            )),
            _ => {
                tracing::warn!("OPENAI_API_KEY not set, notifications use the fallback text");
                Arc::new(DisabledTextGenerator)
            }
        };

        let thresholds = ReminderThresholds {
            wellness_days: config.wellness_reminder_days,
            behavior_days: config.behavior_reminder_days,
        };

        Ok(Self::from_store(
            store,
            generator,
            config.timezone()?,
            thresholds,
            config.cron_secret.clone(),
        ))
    }

    /// Builds the state around one value that backs all three store seams.
    pub fn from_store<S>(
        store: Arc<S>,
        generator: Arc<dyn TextGenerator>,
        timezone: Tz,
        thresholds: ReminderThresholds,
        cron_secret: Option<String>,
    ) -> Self
    where
        S: EventStore + NotificationStore + Directory + 'static,
    {
        let events: Arc<dyn EventStore> = store.clone();
        let notifications: Arc<dyn NotificationStore> = store.clone();
        let directory: Arc<dyn Directory> = store;

        let notifier = Arc::new(Notifier::new(
            events.clone(),
            notifications.clone(),
            directory.clone(),
            generator,
            timezone,
            thresholds,
        ));

        Self {
            events,
            notifications,
            directory,
            notifier,
            cron_secret,
        }
    }
}

impl FromRef<AppState> for Arc<Notifier> {
    fn from_ref(app_state: &AppState) -> Arc<Notifier> {
        app_state.notifier.clone()
    }
}

impl FromRef<AppState> for Arc<dyn EventStore> {
    fn from_ref(app_state: &AppState) -> Arc<dyn EventStore> {
        app_state.events.clone()
    }
}

impl FromRef<AppState> for Arc<dyn NotificationStore> {
    fn from_ref(app_state: &AppState) -> Arc<dyn NotificationStore> {
        app_state.notifications.clone()
    }
}

impl FromRef<AppState> for Arc<dyn Directory> {
    fn from_ref(app_state: &AppState) -> Arc<dyn Directory> {
        app_state.directory.clone()
    }
}
