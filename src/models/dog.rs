use chrono::Utc;
use serde::{Deserialize, Serialize};
use validator::Validate;
use wither::Model as WitherModel;
use wither::bson::oid::ObjectId;
use wither::bson::{DateTime, Document, doc};

use crate::enums::EventCategory;
use crate::utils::models::ModelExt;

impl ModelExt for Dog {}

#[derive(Debug, Clone, Default, Serialize, Deserialize, WitherModel, Validate)]
#[model(collection_name = "dogs")]
#[serde(rename_all = "camelCase", default)]
pub struct Dog {
    #[serde(rename = "_id", skip_serializing_if = "Option::is_none")]
    pub id: Option<ObjectId>,
    pub name: String,
    pub breed: String,
    pub age: f64,
    pub sex: String,
    pub weight: f64,
    pub birthday: Option<DateTime>,
    pub owner_ids: Vec<String>,
    pub diet_event_ids: Vec<String>,
    pub exercise_event_ids: Vec<String>,
    pub behavior_event_ids: Vec<String>,
    pub health_event_ids: Vec<String>,
    pub wellness_event_ids: Vec<String>,
    pub created_at: Option<DateTime>,
    pub updated_at: Option<DateTime>,
}

impl Dog {
    pub fn id_hex(&self) -> String {
        self.id.map(|id| id.to_hex()).unwrap_or_default()
    }

    pub fn event_ids_mut(&mut self, category: EventCategory) -> &mut Vec<String> {
        match category {
            EventCategory::Diet => &mut self.diet_event_ids,
            EventCategory::Exercise => &mut self.exercise_event_ids,
            EventCategory::Behavior => &mut self.behavior_event_ids,
            EventCategory::Health => &mut self.health_event_ids,
            EventCategory::Wellness => &mut self.wellness_event_ids,
        }
    }

    pub fn is_owned_by(&self, user_id: &str) -> bool {
        self.owner_ids.iter().any(|owner| owner == user_id)
    }
}

/// Partial update of a dog's profile. Ownership and event links are not
/// editable this way.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DogChanges {
    pub name: Option<String>,
    pub breed: Option<String>,
    pub age: Option<f64>,
    pub sex: Option<String>,
    pub weight: Option<f64>,
    pub birthday: Option<chrono::DateTime<Utc>>,
}

impl DogChanges {
    pub fn apply(self, dog: &mut Dog, now: DateTime) {
        if let Some(name) = self.name {
            dog.name = name;
        }
        if let Some(breed) = self.breed {
            dog.breed = breed;
        }
        if let Some(age) = self.age {
            dog.age = age;
        }
        if let Some(sex) = self.sex {
            dog.sex = sex;
        }
        if let Some(weight) = self.weight {
            dog.weight = weight;
        }
        if let Some(birthday) = self.birthday {
            dog.birthday = Some(DateTime::from_chrono(birthday));
        }
        dog.updated_at = Some(now);
    }

    /// The `$set` document equivalent of [`DogChanges::apply`].
    pub fn to_set_document(&self, now: DateTime) -> Document {
        let mut set = doc! { "updatedAt": now };
        if let Some(name) = &self.name {
            set.insert("name", name.as_str());
        }
        if let Some(breed) = &self.breed {
            set.insert("breed", breed.as_str());
        }
        if let Some(age) = self.age {
            set.insert("age", age);
        }
        if let Some(sex) = &self.sex {
            set.insert("sex", sex.as_str());
        }
        if let Some(weight) = self.weight {
            set.insert("weight", weight);
        }
        if let Some(birthday) = self.birthday {
            set.insert("birthday", DateTime::from_chrono(birthday));
        }
        set
    }
}
