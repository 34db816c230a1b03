//! Storage seams. Every component receives these as `Arc<dyn ...>` at
//! construction time; `mongo` backs them with the document database and
//! `memory` keeps everything in process.

pub mod memory;
pub mod mongo;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use chrono_tz::Tz;

use crate::enums::{EventCategory, NotificationType};
use crate::errors::Error;
use crate::models::dog::{Dog, DogChanges};
use crate::models::event::{Event, EventDetails};
use crate::models::notification::{NewNotification, Notification};
use crate::models::user::User;
use crate::utils::time::start_of_day;

#[async_trait]
pub trait EventStore: Send + Sync {
    /// Latest event of `category` for the dog, ordered by `eventDate`.
    async fn most_recent(
        &self,
        dog_id: &str,
        category: EventCategory,
    ) -> Result<Option<Event>, Error>;

    /// Inserts the event, then links its id into the dog's back-references.
    async fn append(&self, event: Event) -> Result<Event, Error>;

    /// All events of `category` for the dog, newest `eventDate` first.
    async fn list_for_dog(&self, dog_id: &str, category: EventCategory)
    -> Result<Vec<Event>, Error>;

    /// Every event of `category` a user logged, across all of their dogs,
    /// newest `eventDate` first.
    async fn list_by_user(
        &self,
        user_id: &str,
        category: EventCategory,
    ) -> Result<Vec<Event>, Error>;

    async fn find_by_id(&self, category: EventCategory, id: &str) -> Result<Option<Event>, Error>;

    /// Replaces the details (and the event date when given) and bumps
    /// `updatedAt`. Returns `None` when no event of `category` has this id.
    async fn update(
        &self,
        category: EventCategory,
        id: &str,
        details: EventDetails,
        event_date: Option<DateTime<Utc>>,
    ) -> Result<Option<Event>, Error>;

    /// Removing an id that does not exist is not an error.
    async fn delete(&self, category: EventCategory, id: &str) -> Result<(), Error>;
}

#[async_trait]
pub trait NotificationStore: Send + Sync {
    async fn create(&self, notification: NewNotification) -> Result<Notification, Error>;

    async fn list_for_user(&self, user_id: &str) -> Result<Vec<Notification>, Error>;

    /// Whether a notification of this type exists with `createdAt >= since`.
    async fn exists_since(
        &self,
        user_id: &str,
        dog_id: &str,
        r#type: NotificationType,
        since: DateTime<Utc>,
    ) -> Result<bool, Error>;

    async fn find_by_id(&self, id: &str) -> Result<Option<Notification>, Error>;

    /// Flips `read` to true. Returns `None` when the id is unknown.
    async fn mark_read(&self, id: &str) -> Result<Option<Notification>, Error>;

    /// Removing an id that does not exist is not an error.
    async fn delete(&self, id: &str) -> Result<(), Error>;

    /// The suppression query: anything of this type since local midnight.
    async fn exists_for_type_today(
        &self,
        user_id: &str,
        dog_id: &str,
        r#type: NotificationType,
        now: &DateTime<Tz>,
    ) -> Result<bool, Error> {
        self.exists_since(user_id, dog_id, r#type, start_of_day(now))
            .await
    }
}

#[async_trait]
pub trait Directory: Send + Sync {
    async fn list_users(&self) -> Result<Vec<User>, Error>;

    /// Dogs whose ownership set contains `user_id`.
    async fn dogs_for_user(&self, user_id: &str) -> Result<Vec<Dog>, Error>;

    async fn find_user(&self, id: &str) -> Result<Option<User>, Error>;

    async fn find_dog(&self, id: &str) -> Result<Option<Dog>, Error>;

    /// Stores a new dog; id and timestamps are assigned here.
    async fn create_dog(&self, dog: Dog) -> Result<Dog, Error>;

    /// Applies the present fields. Returns `None` when the id is unknown.
    async fn update_dog(&self, id: &str, changes: DogChanges) -> Result<Option<Dog>, Error>;

    /// Removing an id that does not exist is not an error. Logged events
    /// are kept.
    async fn delete_dog(&self, id: &str) -> Result<(), Error>;
}
