use async_trait::async_trait;
use chrono::{DateTime as ChronoDateTime, Utc};
use wither::bson::{self, DateTime, doc};
use wither::mongodb::Database;
use wither::mongodb::options::{FindOneOptions, FindOptions};

use super::{Directory, EventStore, NotificationStore};
use crate::enums::{EventCategory, NotificationType};
use crate::errors::Error;
use crate::models::dog::{Dog, DogChanges};
use crate::models::event::{Event, EventDetails};
use crate::models::notification::{NewNotification, Notification};
use crate::models::user::User;
use crate::utils::models::{ModelExt, parse_object_id};

/// Document-database backed implementation of every store seam.
#[derive(Clone)]
pub struct MongoStore {
    db: Database,
}

impl MongoStore {
    pub fn new(db: Database) -> Self {
        Self { db }
    }

    async fn link_event_to_dog(&self, event: &Event, pull: bool) -> Result<(), Error> {
        let Ok(dog_id) = parse_object_id(&event.dog_id) else {
            tracing::warn!(
                "Event {} references malformed dog id {}, skipping back-reference",
                event.id_hex(),
                event.dog_id
            );
            return Ok(());
        };

        let field = event.category().back_ref_field();
        let update = if pull {
            doc! { "$pull": { field: event.id_hex() } }
        } else {
            doc! { "$addToSet": { field: event.id_hex() } }
        };

        let result = <Dog as ModelExt>::update_one(&self.db, doc! { "_id": dog_id }, update).await?;
        if result.matched_count == 0 {
            tracing::warn!(
                "Dog {} not found while updating {} for event {}",
                event.dog_id,
                field,
                event.id_hex()
            );
        }

        Ok(())
    }
}

#[async_trait]
impl EventStore for MongoStore {
    async fn most_recent(
        &self,
        dog_id: &str,
        category: EventCategory,
    ) -> Result<Option<Event>, Error> {
        let options = FindOneOptions::builder()
            .sort(doc! { "eventDate": -1 })
            .build();

        <Event as ModelExt>::find_one(
            &self.db,
            doc! { "dogId": dog_id, "details.kind": category.to_string() },
            options,
        )
        .await
    }

    async fn append(&self, event: Event) -> Result<Event, Error> {
        let event = <Event as ModelExt>::create(&self.db, event).await?;
        // Not atomic with the insert: if linking fails the event stays
        // queryable by dogId but is missing from the dog's id array until
        // it is deleted and logged again.
        self.link_event_to_dog(&event, false).await?;

        tracing::debug!(
            "Created {} event {} for dog {}",
            event.category(),
            event.id_hex(),
            event.dog_id
        );
        Ok(event)
    }

    async fn list_for_dog(
        &self,
        dog_id: &str,
        category: EventCategory,
    ) -> Result<Vec<Event>, Error> {
        let options = FindOptions::builder().sort(doc! { "eventDate": -1 }).build();

        <Event as ModelExt>::find(
            &self.db,
            doc! { "dogId": dog_id, "details.kind": category.to_string() },
            options,
        )
        .await
    }

    async fn list_by_user(
        &self,
        user_id: &str,
        category: EventCategory,
    ) -> Result<Vec<Event>, Error> {
        let options = FindOptions::builder().sort(doc! { "eventDate": -1 }).build();

        <Event as ModelExt>::find(
            &self.db,
            doc! { "userId": user_id, "details.kind": category.to_string() },
            options,
        )
        .await
    }

    async fn find_by_id(&self, category: EventCategory, id: &str) -> Result<Option<Event>, Error> {
        let Ok(id) = parse_object_id(id) else {
            return Ok(None);
        };

        <Event as ModelExt>::find_one(
            &self.db,
            doc! { "_id": id, "details.kind": category.to_string() },
            None,
        )
        .await
    }

    async fn update(
        &self,
        category: EventCategory,
        id: &str,
        details: EventDetails,
        event_date: Option<ChronoDateTime<Utc>>,
    ) -> Result<Option<Event>, Error> {
        let Ok(id) = parse_object_id(id) else {
            return Ok(None);
        };

        let details = bson::to_bson(&details)
            .map_err(|e| Error::internal_err(&format!("Failed to encode event details: {e}")))?;
        let mut set = doc! { "details": details, "updatedAt": DateTime::now() };
        if let Some(event_date) = event_date {
            set.insert("eventDate", DateTime::from_chrono(event_date));
        }

        <Event as ModelExt>::find_one_and_update(
            &self.db,
            doc! { "_id": id, "details.kind": category.to_string() },
            doc! { "$set": set },
            false,
        )
        .await
    }

    async fn delete(&self, category: EventCategory, id: &str) -> Result<(), Error> {
        let Some(event) = EventStore::find_by_id(self, category, id).await? else {
            return Ok(());
        };

        <Event as ModelExt>::delete_one(&self.db, doc! { "_id": event.id }).await?;
        self.link_event_to_dog(&event, true).await
    }
}

#[async_trait]
impl NotificationStore for MongoStore {
    async fn create(&self, notification: NewNotification) -> Result<Notification, Error> {
        let record = notification.into_record(DateTime::now());
        <Notification as ModelExt>::create(&self.db, record).await
    }

    async fn list_for_user(&self, user_id: &str) -> Result<Vec<Notification>, Error> {
        <Notification as ModelExt>::find(&self.db, doc! { "userId": user_id }, None).await
    }

    async fn exists_since(
        &self,
        user_id: &str,
        dog_id: &str,
        r#type: NotificationType,
        since: ChronoDateTime<Utc>,
    ) -> Result<bool, Error> {
        let query = doc! {
            "userId": user_id,
            "dogId": dog_id,
            "type": r#type.to_string(),
            "createdAt": { "$gte": DateTime::from_chrono(since) },
        };

        <Notification as ModelExt>::exists(&self.db, query).await
    }

    async fn find_by_id(&self, id: &str) -> Result<Option<Notification>, Error> {
        let Ok(id) = parse_object_id(id) else {
            return Ok(None);
        };

        <Notification as ModelExt>::find_by_id(&self.db, &id).await
    }

    async fn mark_read(&self, id: &str) -> Result<Option<Notification>, Error> {
        let Ok(id) = parse_object_id(id) else {
            return Ok(None);
        };

        <Notification as ModelExt>::find_one_and_update(
            &self.db,
            doc! { "_id": id },
            doc! { "$set": { "read": true } },
            false,
        )
        .await
    }

    async fn delete(&self, id: &str) -> Result<(), Error> {
        let Ok(id) = parse_object_id(id) else {
            return Ok(());
        };

        let result = <Notification as ModelExt>::delete_one(&self.db, doc! { "_id": id }).await?;
        if result.deleted_count == 0 {
            tracing::debug!("Notification {} already absent", id);
        }

        Ok(())
    }
}

#[async_trait]
impl Directory for MongoStore {
    async fn list_users(&self) -> Result<Vec<User>, Error> {
        <User as ModelExt>::find(&self.db, doc! {}, None).await
    }

    async fn dogs_for_user(&self, user_id: &str) -> Result<Vec<Dog>, Error> {
        <Dog as ModelExt>::find(&self.db, doc! { "ownerIds": user_id }, None).await
    }

    async fn find_user(&self, id: &str) -> Result<Option<User>, Error> {
        let Ok(id) = parse_object_id(id) else {
            return Ok(None);
        };

        <User as ModelExt>::find_by_id(&self.db, &id).await
    }

    async fn find_dog(&self, id: &str) -> Result<Option<Dog>, Error> {
        let Ok(id) = parse_object_id(id) else {
            return Ok(None);
        };

        <Dog as ModelExt>::find_by_id(&self.db, &id).await
    }

    async fn create_dog(&self, mut dog: Dog) -> Result<Dog, Error> {
        let now = DateTime::now();
        dog.created_at = Some(now);
        dog.updated_at = Some(now);

        <Dog as ModelExt>::create(&self.db, dog).await
    }

    async fn update_dog(&self, id: &str, changes: DogChanges) -> Result<Option<Dog>, Error> {
        let Ok(id) = parse_object_id(id) else {
            return Ok(None);
        };

        <Dog as ModelExt>::find_one_and_update(
            &self.db,
            doc! { "_id": id },
            doc! { "$set": changes.to_set_document(DateTime::now()) },
            false,
        )
        .await
    }

    async fn delete_dog(&self, id: &str) -> Result<(), Error> {
        let Ok(id) = parse_object_id(id) else {
            return Ok(());
        };

        <Dog as ModelExt>::delete_one(&self.db, doc! { "_id": id }).await?;
        Ok(())
    }
}
