use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};
use validator::Validate;

use crate::enums::NotificationType;
use crate::models::notification::Notification;
use crate::routes::event::dto::to_rfc3339;

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct NotificationDto {
    pub id: String,
    pub user_id: String,
    pub dog_id: String,
    pub r#type: NotificationType,
    pub title: String,
    pub message: String,
    pub read: bool,
    pub created_at: String,
}

impl From<Notification> for NotificationDto {
    fn from(notification: Notification) -> Self {
        Self {
            id: notification.id_hex(),
            user_id: notification.user_id,
            dog_id: notification.dog_id,
            r#type: notification.r#type,
            title: notification.title,
            message: notification.message,
            read: notification.read,
            created_at: to_rfc3339(notification.created_at),
        }
    }
}

#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateNotificationRequestDto {
    #[serde(default)]
    #[validate(length(min = 1, message = "userId is required"))]
    pub user_id: String,
    #[serde(default)]
    #[validate(length(min = 1, message = "dogId is required"))]
    pub dog_id: String,
    /// One of `diet`, `exercise`, `wellness`, `behavior`.
    #[serde(default)]
    pub r#type: String,
    pub title: Option<String>,
    /// Stored verbatim when present; otherwise the text is generated.
    pub message: Option<String>,
}

#[derive(Debug, Clone, Deserialize, IntoParams)]
#[serde(rename_all = "camelCase")]
#[into_params(parameter_in = Query)]
pub struct ListNotificationsQuery {
    pub user_id: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct MarkNotificationAsReadResponseDto {
    pub notification_id: String,
    pub read: bool,
}
