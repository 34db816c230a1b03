use std::sync::Arc;

use chrono::{DateTime, Utc};
use chrono_tz::Tz;

use crate::core::store::{Directory, EventStore};
use crate::core::text_generation::TextGenerator;
use crate::enums::NotificationType;
use crate::models::event::{Event, EventDetails};
use crate::utils::time::{days_between, relative_phrase};

/// Stored in place of the message whenever generation fails.
pub const GENERATION_FALLBACK: &str = "Error generating message";
pub const DEFAULT_TITLE: &str = "Notification";

#[derive(Debug, Clone, PartialEq)]
pub struct ComposedMessage {
    pub title: String,
    pub message: String,
}

/// What the prompt builders know about the owner, the dog and its last log.
#[derive(Debug, Clone)]
pub struct PromptContext {
    pub owner_name: String,
    pub dog_name: String,
    pub dog_breed: String,
    pub last_details: Option<EventDetails>,
    pub elapsed: &'static str,
}

impl PromptContext {
    fn breed_suffix(&self) -> String {
        if self.dog_breed.is_empty() {
            String::new()
        } else {
            format!(" ({})", self.dog_breed)
        }
    }
}

pub struct MessageComposer {
    directory: Arc<dyn Directory>,
    events: Arc<dyn EventStore>,
    generator: Arc<dyn TextGenerator>,
}

impl MessageComposer {
    pub fn new(
        directory: Arc<dyn Directory>,
        events: Arc<dyn EventStore>,
        generator: Arc<dyn TextGenerator>,
    ) -> Self {
        Self {
            directory,
            events,
            generator,
        }
    }

    /// Produces the title and text for a notification. An explicit
    /// `message` is used verbatim; otherwise the text is generated and any
    /// failure is replaced by [`GENERATION_FALLBACK`]. Never fails.
    pub async fn compose(
        &self,
        r#type: NotificationType,
        user_id: &str,
        dog_id: &str,
        title: Option<String>,
        message: Option<String>,
        now: &DateTime<Tz>,
    ) -> ComposedMessage {
        if let Some(message) = message.filter(|message| !message.is_empty()) {
            return ComposedMessage {
                title: title.unwrap_or_else(|| DEFAULT_TITLE.to_string()),
                message,
            };
        }

        let context = self.load_context(r#type, user_id, dog_id, now).await;
        let prompt = build_prompt(r#type, &context);
        tracing::debug!("{} prompt for dog {}: {}", r#type, dog_id, prompt);

        let message = match self.generator.generate(&prompt).await {
            Ok(text) if !text.trim().is_empty() => text,
            Ok(_) => {
                tracing::warn!("Empty {} message generated for dog {}", r#type, dog_id);
                GENERATION_FALLBACK.to_string()
            }
            Err(e) => {
                tracing::warn!(
                    "Failed to generate {} message for dog {}: {e}",
                    r#type,
                    dog_id
                );
                GENERATION_FALLBACK.to_string()
            }
        };

        ComposedMessage {
            title: title.unwrap_or_else(|| r#type.title().to_string()),
            message,
        }
    }

    // Lookups here are best effort: a missing or unreachable record only
    // degrades the prompt.
    async fn load_context(
        &self,
        r#type: NotificationType,
        user_id: &str,
        dog_id: &str,
        now: &DateTime<Tz>,
    ) -> PromptContext {
        let owner_name = match self.directory.find_user(user_id).await {
            Ok(Some(user)) if !user.full_name.is_empty() => user.full_name,
            Ok(_) => "there".to_string(),
            Err(e) => {
                tracing::warn!("Failed to load user {user_id} for prompt: {e}");
                "there".to_string()
            }
        };

        let (dog_name, dog_breed) = match self.directory.find_dog(dog_id).await {
            Ok(Some(dog)) => {
                let name = if dog.name.is_empty() {
                    "your dog".to_string()
                } else {
                    dog.name
                };
                (name, dog.breed)
            }
            Ok(None) => ("your dog".to_string(), String::new()),
            Err(e) => {
                tracing::warn!("Failed to load dog {dog_id} for prompt: {e}");
                ("your dog".to_string(), String::new())
            }
        };

        let last_event = match self
            .events
            .most_recent(dog_id, r#type.event_category())
            .await
        {
            Ok(event) => event,
            Err(e) => {
                tracing::warn!("Failed to load last {} event for dog {dog_id}: {e}", r#type);
                None
            }
        };

        let days = last_event
            .as_ref()
            .map(|event| days_between(event.event_date.to_chrono(), now.with_timezone(&Utc)));

        PromptContext {
            owner_name,
            dog_name,
            dog_breed,
            last_details: last_event.map(|Event { details, .. }| details),
            elapsed: relative_phrase(days),
        }
    }
}

pub fn build_prompt(r#type: NotificationType, context: &PromptContext) -> String {
    let dog = &context.dog_name;
    let owner = &context.owner_name;
    let breed = context.breed_suffix();
    let elapsed = context.elapsed;

    match (r#type, &context.last_details) {
        (NotificationType::Diet, details) => {
            let last_meal = match details {
                Some(EventDetails::Diet(diet)) => format!(
                    "{} of {} ({})",
                    diet.quantity, diet.brand_name, diet.food_type
                ),
                _ => "nothing recorded yet".to_string(),
            };
            format!(
                "Write a short, friendly, human-sounding reminder about {dog}'s diet.\n\
                 Background, not to be listed verbatim:\n\
                 - Dog: {dog}{breed}\n\
                 - Last known meal: {last_meal}\n\
                 - Last logged: {elapsed}\n\
                 - Owner: {owner}\n\
                 Address {owner} directly and keep the timing natural, like \"a few days ago\" \
                 rather than a date. Do not open with \"Of course!\" or \"Here's a reminder\". \
                 End with a gentle nudge to log or update {dog}'s diet."
            )
        }
        (NotificationType::Exercise, details) => {
            let last_activity = match details {
                Some(EventDetails::Exercise(exercise)) => format!(
                    "{}, {} mile(s) in {} minute(s)",
                    exercise.activity_type, exercise.distance, exercise.duration
                ),
                _ => "nothing recorded yet".to_string(),
            };
            format!(
                "Write a short, friendly reminder about {dog}'s exercise routine.\n\
                 Background, not to be listed verbatim:\n\
                 - Dog: {dog}{breed}\n\
                 - Last activity: {last_activity}\n\
                 - Last logged: {elapsed}\n\
                 - Owner: {owner}\n\
                 Address {owner} directly and encourage them to keep {dog} active. \
                 Do not open with \"Of course!\" or \"Here's a reminder\". \
                 End with a call to action to keep {dog}'s exercise log up to date."
            )
        }
        (NotificationType::Wellness, details) => {
            let (mental_state, severity) = match details {
                Some(EventDetails::Wellness(wellness)) => {
                    (wellness.mental_state.clone(), wellness.severity)
                }
                _ => ("unknown".to_string(), 0),
            };
            format!(
                "Write a concise, friendly wellness check-in about {dog}.\n\
                 - Dog: {dog}{breed}\n\
                 - Mental state: {mental_state}\n\
                 - Severity: {severity}\n\
                 - Last logged: {elapsed}\n\
                 Ask {owner} to check on how {dog} is doing, keep the tone supportive, \
                 and suggest tracking any changes."
            )
        }
        (NotificationType::Behavior, details) => {
            let (behavior_type, severity) = match details {
                Some(EventDetails::Behavior(behavior)) => {
                    (behavior.behavior_type.clone(), behavior.severity_level)
                }
                _ => ("unknown".to_string(), 0),
            };
            format!(
                "Write a concise, helpful reminder about {dog}'s behavior.\n\
                 - Dog: {dog}{breed}\n\
                 - Behavior: {behavior_type}\n\
                 - Severity: {severity}\n\
                 - Last logged: {elapsed}\n\
                 Suggest that {owner} keep an eye on {dog}'s behavior and log an update \
                 if anything changes."
            )
        }
    }
}
