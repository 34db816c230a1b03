//! In-process implementation of the store seams.
//!
//! Mirrors the semantics of the document-database implementation: ids are
//! hex object ids, events are ordered by `eventDate`, and deletes are
//! idempotent. Backs the test-suite.

use std::collections::HashMap;

use async_trait::async_trait;
use chrono::{DateTime as ChronoDateTime, Utc};
use tokio::sync::RwLock;
use validator::Validate;
use wither::bson::DateTime;
use wither::bson::oid::ObjectId;

use super::{Directory, EventStore, NotificationStore};
use crate::enums::{EventCategory, NotificationType};
use crate::errors::Error;
use crate::models::dog::{Dog, DogChanges};
use crate::models::event::{Event, EventDetails};
use crate::models::notification::{NewNotification, Notification};
use crate::models::user::User;

#[derive(Default)]
struct State {
    users: Vec<User>,
    dogs: HashMap<String, Dog>,
    events: HashMap<String, Event>,
    notifications: Vec<Notification>,
}

#[derive(Default)]
pub struct InMemoryStore {
    state: RwLock<State>,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a user and returns its assigned id.
    pub async fn insert_user(&self, mut user: User) -> String {
        let id = *user.id.get_or_insert_with(ObjectId::new);
        self.state.write().await.users.push(user);
        id.to_hex()
    }

    /// Registers a dog and returns its assigned id.
    pub async fn insert_dog(&self, mut dog: Dog) -> String {
        let id = dog.id.get_or_insert_with(ObjectId::new).to_hex();
        self.state.write().await.dogs.insert(id.clone(), dog);
        id
    }

    /// Stores a notification as-is, keeping its `created_at`.
    pub async fn insert_notification(&self, mut notification: Notification) -> String {
        let id = notification.id.get_or_insert_with(ObjectId::new).to_hex();
        self.state.write().await.notifications.push(notification);
        id
    }

    pub async fn notification_count(&self) -> usize {
        self.state.read().await.notifications.len()
    }
}

fn newest_first(events: &mut [Event]) {
    events.sort_by(|a, b| b.event_date.cmp(&a.event_date));
}

#[async_trait]
impl EventStore for InMemoryStore {
    async fn most_recent(
        &self,
        dog_id: &str,
        category: EventCategory,
    ) -> Result<Option<Event>, Error> {
        let state = self.state.read().await;
        let latest = state
            .events
            .values()
            .filter(|event| event.dog_id == dog_id && event.category() == category)
            .max_by_key(|event| event.event_date)
            .cloned();

        Ok(latest)
    }

    async fn append(&self, mut event: Event) -> Result<Event, Error> {
        event.validate()?;
        let id = *event.id.get_or_insert_with(ObjectId::new);
        let mut state = self.state.write().await;

        if let Some(dog) = state.dogs.get_mut(&event.dog_id) {
            let ids = dog.event_ids_mut(event.category());
            if !ids.contains(&id.to_hex()) {
                ids.push(id.to_hex());
            }
        } else {
            tracing::warn!("Dog {} not found while linking event {}", event.dog_id, id);
        }

        state.events.insert(id.to_hex(), event.clone());
        Ok(event)
    }

    async fn list_for_dog(
        &self,
        dog_id: &str,
        category: EventCategory,
    ) -> Result<Vec<Event>, Error> {
        let state = self.state.read().await;
        let mut events: Vec<Event> = state
            .events
            .values()
            .filter(|event| event.dog_id == dog_id && event.category() == category)
            .cloned()
            .collect();
        newest_first(&mut events);

        Ok(events)
    }

    async fn list_by_user(
        &self,
        user_id: &str,
        category: EventCategory,
    ) -> Result<Vec<Event>, Error> {
        let state = self.state.read().await;
        let mut events: Vec<Event> = state
            .events
            .values()
            .filter(|event| event.user_id == user_id && event.category() == category)
            .cloned()
            .collect();
        newest_first(&mut events);

        Ok(events)
    }

    async fn find_by_id(&self, category: EventCategory, id: &str) -> Result<Option<Event>, Error> {
        let state = self.state.read().await;
        Ok(state
            .events
            .get(id)
            .filter(|event| event.category() == category)
            .cloned())
    }

    async fn update(
        &self,
        category: EventCategory,
        id: &str,
        details: EventDetails,
        event_date: Option<ChronoDateTime<Utc>>,
    ) -> Result<Option<Event>, Error> {
        let mut state = self.state.write().await;
        let Some(event) = state
            .events
            .get_mut(id)
            .filter(|event| event.category() == category)
        else {
            return Ok(None);
        };

        event.details = details;
        if let Some(event_date) = event_date {
            event.event_date = DateTime::from_chrono(event_date);
        }
        event.updated_at = DateTime::now();

        Ok(Some(event.clone()))
    }

    async fn delete(&self, category: EventCategory, id: &str) -> Result<(), Error> {
        let mut state = self.state.write().await;
        let matches = state
            .events
            .get(id)
            .is_some_and(|event| event.category() == category);
        if !matches {
            return Ok(());
        }

        if let Some(event) = state.events.remove(id) {
            if let Some(dog) = state.dogs.get_mut(&event.dog_id) {
                dog.event_ids_mut(category).retain(|linked| linked != id);
            }
        }

        Ok(())
    }
}

#[async_trait]
impl NotificationStore for InMemoryStore {
    async fn create(&self, notification: NewNotification) -> Result<Notification, Error> {
        let mut record = notification.into_record(DateTime::now());
        record.validate()?;
        record.id = Some(ObjectId::new());

        self.state.write().await.notifications.push(record.clone());
        Ok(record)
    }

    async fn list_for_user(&self, user_id: &str) -> Result<Vec<Notification>, Error> {
        let state = self.state.read().await;
        Ok(state
            .notifications
            .iter()
            .filter(|notification| notification.user_id == user_id)
            .cloned()
            .collect())
    }

    async fn exists_since(
        &self,
        user_id: &str,
        dog_id: &str,
        r#type: NotificationType,
        since: ChronoDateTime<Utc>,
    ) -> Result<bool, Error> {
        let since = DateTime::from_chrono(since);
        let state = self.state.read().await;

        Ok(state.notifications.iter().any(|notification| {
            notification.user_id == user_id
                && notification.dog_id == dog_id
                && notification.r#type == r#type
                && notification.created_at >= since
        }))
    }

    async fn find_by_id(&self, id: &str) -> Result<Option<Notification>, Error> {
        let state = self.state.read().await;
        Ok(state
            .notifications
            .iter()
            .find(|notification| notification.id_hex() == id)
            .cloned())
    }

    async fn mark_read(&self, id: &str) -> Result<Option<Notification>, Error> {
        let mut state = self.state.write().await;
        let found = state
            .notifications
            .iter_mut()
            .find(|notification| notification.id_hex() == id)
            .map(|notification| {
                notification.read = true;
                notification.clone()
            });

        Ok(found)
    }

    async fn delete(&self, id: &str) -> Result<(), Error> {
        self.state
            .write()
            .await
            .notifications
            .retain(|notification| notification.id_hex() != id);

        Ok(())
    }
}

#[async_trait]
impl Directory for InMemoryStore {
    async fn list_users(&self) -> Result<Vec<User>, Error> {
        Ok(self.state.read().await.users.clone())
    }

    async fn dogs_for_user(&self, user_id: &str) -> Result<Vec<Dog>, Error> {
        let state = self.state.read().await;
        let mut dogs: Vec<Dog> = state
            .dogs
            .values()
            .filter(|dog| dog.is_owned_by(user_id))
            .cloned()
            .collect();
        dogs.sort_by(|a, b| a.name.cmp(&b.name));

        Ok(dogs)
    }

    async fn find_user(&self, id: &str) -> Result<Option<User>, Error> {
        let state = self.state.read().await;
        Ok(state.users.iter().find(|user| user.id_hex() == id).cloned())
    }

    async fn find_dog(&self, id: &str) -> Result<Option<Dog>, Error> {
        Ok(self.state.read().await.dogs.get(id).cloned())
    }

    async fn create_dog(&self, mut dog: Dog) -> Result<Dog, Error> {
        dog.validate()?;
        let now = DateTime::now();
        dog.created_at = Some(now);
        dog.updated_at = Some(now);
        let id = dog.id.get_or_insert_with(ObjectId::new).to_hex();

        self.state.write().await.dogs.insert(id, dog.clone());
        Ok(dog)
    }

    async fn update_dog(&self, id: &str, changes: DogChanges) -> Result<Option<Dog>, Error> {
        let mut state = self.state.write().await;
        let Some(dog) = state.dogs.get_mut(id) else {
            return Ok(None);
        };

        changes.apply(dog, DateTime::now());
        Ok(Some(dog.clone()))
    }

    async fn delete_dog(&self, id: &str) -> Result<(), Error> {
        self.state.write().await.dogs.remove(id);
        Ok(())
    }
}
