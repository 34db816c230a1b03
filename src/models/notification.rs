use serde::{Deserialize, Serialize};
use validator::Validate;
use wither::Model as WitherModel;
use wither::bson::DateTime;
use wither::bson::oid::ObjectId;

use crate::enums::NotificationType;
use crate::utils::models::ModelExt;

impl ModelExt for Notification {}

#[derive(Debug, Clone, Serialize, Deserialize, WitherModel, Validate)]
#[model(collection_name = "notifications")]
#[serde(rename_all = "camelCase")]
pub struct Notification {
    #[serde(rename = "_id", skip_serializing_if = "Option::is_none")]
    pub id: Option<ObjectId>,
    #[validate(length(min = 1))]
    pub user_id: String,
    #[serde(default)]
    pub dog_id: String,
    pub r#type: NotificationType,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub message: String,
    #[serde(default)]
    pub read: bool,
    #[serde(default = "DateTime::now")]
    pub created_at: DateTime,
}

impl Notification {
    pub fn id_hex(&self) -> String {
        self.id.map(|id| id.to_hex()).unwrap_or_default()
    }
}

/// Everything a caller supplies when persisting a notification; identity,
/// creation time and the read flag are assigned by the store.
#[derive(Debug, Clone, PartialEq)]
pub struct NewNotification {
    pub user_id: String,
    pub dog_id: String,
    pub r#type: NotificationType,
    pub title: String,
    pub message: String,
}

impl NewNotification {
    pub fn into_record(self, created_at: DateTime) -> Notification {
        Notification {
            id: None,
            user_id: self.user_id,
            dog_id: self.dog_id,
            r#type: self.r#type,
            title: self.title,
            message: self.message,
            read: false,
            created_at,
        }
    }
}
