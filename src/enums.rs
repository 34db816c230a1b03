use serde::{Deserialize, Serialize};
use strum_macros::{Display, EnumString, VariantNames};
use utoipa::ToSchema;

/// The five kinds of events an owner can log for a dog.
#[derive(
    Debug,
    Serialize,
    Deserialize,
    Clone,
    Copy,
    EnumString,
    VariantNames,
    Display,
    PartialEq,
    Eq,
    Hash,
    ToSchema,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum EventCategory {
    Diet,
    Exercise,
    Behavior,
    Health,
    Wellness,
}

impl EventCategory {
    /// Name of the id array on the dog document that back-references
    /// events of this category.
    pub fn back_ref_field(&self) -> &'static str {
        match self {
            EventCategory::Diet => "dietEventIds",
            EventCategory::Exercise => "exerciseEventIds",
            EventCategory::Behavior => "behaviorEventIds",
            EventCategory::Health => "healthEventIds",
            EventCategory::Wellness => "wellnessEventIds",
        }
    }
}

/// Reminder kinds produced by the daily rules.
#[derive(
    Debug,
    Serialize,
    Deserialize,
    Clone,
    Copy,
    EnumString,
    VariantNames,
    Display,
    PartialEq,
    Eq,
    Hash,
    ToSchema,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum NotificationType {
    Diet,
    Exercise,
    Wellness,
    Behavior,
}

impl NotificationType {
    pub const ALL: [NotificationType; 4] = [
        NotificationType::Diet,
        NotificationType::Exercise,
        NotificationType::Wellness,
        NotificationType::Behavior,
    ];

    pub fn title(&self) -> &'static str {
        match self {
            NotificationType::Diet => "Diet Update Reminder",
            NotificationType::Exercise => "Exercise Reminder",
            NotificationType::Wellness => "Wellness Check Reminder",
            NotificationType::Behavior => "Behavior Update Reminder",
        }
    }

    pub fn event_category(&self) -> EventCategory {
        match self {
            NotificationType::Diet => EventCategory::Diet,
            NotificationType::Exercise => EventCategory::Exercise,
            NotificationType::Wellness => EventCategory::Wellness,
            NotificationType::Behavior => EventCategory::Behavior,
        }
    }
}
