#![allow(dead_code)]

use std::sync::Arc;

use async_trait::async_trait;
use chrono::{DateTime, Duration, Utc};
use pet_care_service::core::notifier::Notifier;
use pet_care_service::core::notifier::rules::ReminderThresholds;
use pet_care_service::core::store::memory::InMemoryStore;
use pet_care_service::core::store::{Directory, EventStore};
use pet_care_service::core::text_generation::TextGenerator;
use pet_care_service::enums::EventCategory;
use pet_care_service::errors::Error;
use pet_care_service::models::dog::{Dog, DogChanges};
use pet_care_service::models::event::{DietDetails, Event, EventDetails, ExerciseDetails};
use pet_care_service::models::user::User;
use wither::bson;

pub const GENERATED_TEXT: &str = "Time to log Rex's dinner!";

/// Always answers with the same text.
pub struct StaticTextGenerator(pub &'static str);

#[async_trait]
impl TextGenerator for StaticTextGenerator {
    async fn generate(&self, _prompt: &str) -> Result<String, Error> {
        Ok(self.0.to_string())
    }
}

pub struct FailingTextGenerator;

#[async_trait]
impl TextGenerator for FailingTextGenerator {
    async fn generate(&self, _prompt: &str) -> Result<String, Error> {
        Err(Error::generation("upstream returned 500"))
    }
}

/// Delegates to the in-memory store but fails every lookup of one category.
pub struct BrokenCategoryEvents {
    pub inner: Arc<InMemoryStore>,
    pub broken: EventCategory,
}

#[async_trait]
impl EventStore for BrokenCategoryEvents {
    async fn most_recent(
        &self,
        dog_id: &str,
        category: EventCategory,
    ) -> Result<Option<Event>, Error> {
        if category == self.broken {
            return Err(Error::store_unavailable("connection reset"));
        }
        self.inner.most_recent(dog_id, category).await
    }

    async fn append(&self, event: Event) -> Result<Event, Error> {
        self.inner.append(event).await
    }

    async fn list_for_dog(
        &self,
        dog_id: &str,
        category: EventCategory,
    ) -> Result<Vec<Event>, Error> {
        self.inner.list_for_dog(dog_id, category).await
    }

    async fn list_by_user(
        &self,
        user_id: &str,
        category: EventCategory,
    ) -> Result<Vec<Event>, Error> {
        self.inner.list_by_user(user_id, category).await
    }

    async fn find_by_id(&self, category: EventCategory, id: &str) -> Result<Option<Event>, Error> {
        EventStore::find_by_id(self.inner.as_ref(), category, id).await
    }

    async fn update(
        &self,
        category: EventCategory,
        id: &str,
        details: EventDetails,
        event_date: Option<DateTime<Utc>>,
    ) -> Result<Option<Event>, Error> {
        self.inner.update(category, id, details, event_date).await
    }

    async fn delete(&self, category: EventCategory, id: &str) -> Result<(), Error> {
        EventStore::delete(self.inner.as_ref(), category, id).await
    }
}

/// A directory whose user listing is down.
pub struct UnreachableDirectory;

#[async_trait]
impl Directory for UnreachableDirectory {
    async fn list_users(&self) -> Result<Vec<User>, Error> {
        Err(Error::store_unavailable("server selection timeout"))
    }

    async fn dogs_for_user(&self, _user_id: &str) -> Result<Vec<Dog>, Error> {
        Ok(vec![])
    }

    async fn find_user(&self, _id: &str) -> Result<Option<User>, Error> {
        Ok(None)
    }

    async fn find_dog(&self, _id: &str) -> Result<Option<Dog>, Error> {
        Ok(None)
    }

    async fn create_dog(&self, _dog: Dog) -> Result<Dog, Error> {
        Err(Error::store_unavailable("server selection timeout"))
    }

    async fn update_dog(&self, _id: &str, _changes: DogChanges) -> Result<Option<Dog>, Error> {
        Err(Error::store_unavailable("server selection timeout"))
    }

    async fn delete_dog(&self, _id: &str) -> Result<(), Error> {
        Err(Error::store_unavailable("server selection timeout"))
    }
}

pub fn notifier(store: Arc<InMemoryStore>, generator: Arc<dyn TextGenerator>) -> Notifier {
    Notifier::new(
        store.clone(),
        store.clone(),
        store,
        generator,
        chrono_tz::UTC,
        ReminderThresholds::default(),
    )
}

/// Seeds one owner with one dog and returns `(user_id, dog_id)`.
pub async fn owner_with_dog(store: &InMemoryStore, owner: &str, dog: &str) -> (String, String) {
    let user_id = store
        .insert_user(User {
            full_name: owner.to_string(),
            email: format!("{}@example.com", owner.to_lowercase()),
            ..Default::default()
        })
        .await;
    let dog_id = store
        .insert_dog(Dog {
            name: dog.to_string(),
            breed: "Beagle".to_string(),
            owner_ids: vec![user_id.clone()],
            ..Default::default()
        })
        .await;

    (user_id, dog_id)
}

pub fn days_ago(days: i64) -> DateTime<Utc> {
    Utc::now() - Duration::days(days)
}

pub async fn log_diet(store: &InMemoryStore, user_id: &str, dog_id: &str, at: DateTime<Utc>) {
    store
        .append(Event::new(
            user_id.to_string(),
            dog_id.to_string(),
            bson::DateTime::from_chrono(at),
            EventDetails::Diet(DietDetails {
                food_type: "dry kibble".to_string(),
                brand_name: "Acme".to_string(),
                quantity: 2.0,
            }),
        ))
        .await
        .unwrap();
}

pub async fn log_exercise(store: &InMemoryStore, user_id: &str, dog_id: &str, at: DateTime<Utc>) {
    store
        .append(Event::new(
            user_id.to_string(),
            dog_id.to_string(),
            bson::DateTime::from_chrono(at),
            EventDetails::Exercise(ExerciseDetails {
                activity_type: "Walking".to_string(),
                duration: 30.0,
                ..Default::default()
            }),
        ))
        .await
        .unwrap();
}
