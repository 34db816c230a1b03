use serde::{Deserialize, Serialize};
use validator::Validate;
use wither::Model as WitherModel;
use wither::bson::DateTime;
use wither::bson::oid::ObjectId;

use crate::enums::EventCategory;
use crate::errors::Error;
use crate::utils::models::ModelExt;

pub const FOOD_TYPES: [&str; 5] = ["dry kibble", "homemade", "raw", "custom", "wet"];

pub const ACTIVITY_TYPES: [&str; 8] = [
    "Walking",
    "Running/Jogging",
    "Fetch",
    "Hiking",
    "Dog Park Playtime",
    "Indoor Play",
    "Outside Alone Time",
    "Swimming",
];

pub const MENTAL_STATES: [&str; 6] = [
    "depressed",
    "anxious",
    "lethargic",
    "happy",
    "loving",
    "nervous",
];

impl ModelExt for Event {}

/// A single logged event. All categories share one collection and are told
/// apart by `details.kind`.
#[derive(Debug, Clone, Serialize, Deserialize, WitherModel, Validate)]
#[model(collection_name = "events")]
#[serde(rename_all = "camelCase")]
pub struct Event {
    #[serde(rename = "_id", skip_serializing_if = "Option::is_none")]
    pub id: Option<ObjectId>,
    #[validate(length(min = 1))]
    pub user_id: String,
    #[validate(length(min = 1))]
    pub dog_id: String,
    pub event_date: DateTime,
    pub created_at: DateTime,
    pub updated_at: DateTime,
    pub details: EventDetails,
}

impl Event {
    pub fn new(user_id: String, dog_id: String, event_date: DateTime, details: EventDetails) -> Self {
        let now = DateTime::now();
        Self {
            id: None,
            user_id,
            dog_id,
            event_date,
            created_at: now,
            updated_at: now,
            details,
        }
    }

    pub fn category(&self) -> EventCategory {
        self.details.category()
    }

    pub fn id_hex(&self) -> String {
        self.id.map(|id| id.to_hex()).unwrap_or_default()
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum EventDetails {
    Diet(DietDetails),
    Exercise(ExerciseDetails),
    Behavior(BehaviorDetails),
    Health(HealthDetails),
    Wellness(WellnessDetails),
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase", default)]
pub struct DietDetails {
    pub food_type: String,
    pub brand_name: String,
    pub quantity: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase", default)]
pub struct ExerciseDetails {
    pub activity_type: String,
    pub source: String,
    pub distance: f64,
    pub duration: f64,
}

impl Default for ExerciseDetails {
    fn default() -> Self {
        Self {
            activity_type: String::new(),
            source: "Manual Add".to_string(),
            distance: 0.0,
            duration: 0.0,
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase", default)]
pub struct BehaviorDetails {
    pub behavior_type: String,
    pub severity_level: i32,
    pub notes: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase", default)]
pub struct HealthDetails {
    pub event_type: String,
    pub severity: i32,
    pub notes: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase", default)]
pub struct WellnessDetails {
    pub mental_state: String,
    pub severity: i32,
    pub notes: String,
}

impl EventDetails {
    pub fn category(&self) -> EventCategory {
        match self {
            EventDetails::Diet(_) => EventCategory::Diet,
            EventDetails::Exercise(_) => EventCategory::Exercise,
            EventDetails::Behavior(_) => EventCategory::Behavior,
            EventDetails::Health(_) => EventCategory::Health,
            EventDetails::Wellness(_) => EventCategory::Wellness,
        }
    }

    /// Builds the variant for `category` from a loose JSON object, filling
    /// absent fields with the variant defaults.
    pub fn from_json(category: EventCategory, value: serde_json::Value) -> Result<Self, Error> {
        let mut fields = match value {
            serde_json::Value::Object(fields) => fields,
            serde_json::Value::Null => serde_json::Map::new(),
            _ => return Err(Error::bad_request("details must be an object")),
        };
        fields.insert(
            "kind".to_string(),
            serde_json::Value::String(category.to_string()),
        );

        serde_json::from_value(serde_json::Value::Object(fields))
            .map_err(|e| Error::bad_request(&format!("Invalid {category} details: {e}")))
    }

    /// Field-level rules applied when an owner logs a new event.
    pub fn check(&self) -> Result<(), Error> {
        match self {
            EventDetails::Diet(diet) => {
                if diet.food_type.is_empty() {
                    return Err(Error::bad_request("foodType is required"));
                }
                if !FOOD_TYPES.contains(&diet.food_type.as_str()) {
                    return Err(Error::bad_request("Invalid food type"));
                }
                if diet.quantity <= 0.0 {
                    return Err(Error::bad_request("Quantity must be a positive number"));
                }
            }
            EventDetails::Exercise(exercise) => {
                if exercise.activity_type.is_empty() {
                    return Err(Error::bad_request("activityType is required"));
                }
                if !ACTIVITY_TYPES.contains(&exercise.activity_type.as_str()) {
                    return Err(Error::bad_request("Invalid activity type"));
                }
                if exercise.distance < 0.0 || exercise.duration < 0.0 {
                    return Err(Error::bad_request(
                        "Distance and duration must not be negative",
                    ));
                }
            }
            EventDetails::Behavior(behavior) => {
                if behavior.behavior_type.is_empty() {
                    return Err(Error::bad_request("behaviorType is required"));
                }
            }
            EventDetails::Health(health) => {
                if health.event_type.is_empty() {
                    return Err(Error::bad_request("eventType is required"));
                }
            }
            EventDetails::Wellness(wellness) => {
                if !MENTAL_STATES.contains(&wellness.mental_state.as_str()) {
                    return Err(Error::bad_request("Invalid mental state"));
                }
                if !(1..=10).contains(&wellness.severity) {
                    return Err(Error::bad_request(
                        "Severity must be a number between 1 and 10",
                    ));
                }
            }
        }

        Ok(())
    }
}
