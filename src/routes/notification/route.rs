use std::str::FromStr;
use std::sync::Arc;

use axum::Json;
use axum::extract::{Path, Query, State};
use http::StatusCode;
use strum::VariantNames;
use utoipa_axum::router::OpenApiRouter;
use utoipa_axum::routes;
use validator::Validate;

use crate::app_state::AppState;
use crate::core::notifier::Notifier;
use crate::core::store::NotificationStore;
use crate::enums::NotificationType;
use crate::errors::Error;
use crate::routes::notification::dto::{
    CreateNotificationRequestDto, ListNotificationsQuery, MarkNotificationAsReadResponseDto,
    NotificationDto,
};

pub fn create_route() -> OpenApiRouter<AppState> {
    OpenApiRouter::new()
        .routes(routes!(list_notifications, create_notification))
        .routes(routes!(get_notification, delete_notification))
        .routes(routes!(mark_notification_as_read))
}

#[utoipa::path(
    summary = "List a user's notifications",
    get,
    path = "/notifications",
    params(ListNotificationsQuery),
    tag = "Notification APIs",
    responses(
        (status = 200, description = "Notifications, newest first", body = Vec<NotificationDto>),
        (status = 400, description = "Bad Request"),
        (status = 503, description = "Store unavailable"),
    )
)]
pub async fn list_notifications(
    State(notifications): State<Arc<dyn NotificationStore>>,
    Query(query): Query<ListNotificationsQuery>,
) -> Result<Json<Vec<NotificationDto>>, Error> {
    let user_id = query
        .user_id
        .filter(|id| !id.is_empty())
        .ok_or_else(|| Error::bad_request("userId is required"))?;

    let mut found = notifications.list_for_user(&user_id).await?;
    found.sort_by(|a, b| b.created_at.cmp(&a.created_at));

    Ok(Json(found.into_iter().map(NotificationDto::from).collect()))
}

#[utoipa::path(
    summary = "Create a notification",
    description = "Persists a notification for a dog. Without a message the text is composed from the dog's history.",
    post,
    path = "/notifications",
    request_body(content = CreateNotificationRequestDto, content_type = "application/json"),
    tag = "Notification APIs",
    responses(
        (status = 201, description = "Notification created", body = NotificationDto),
        (status = 400, description = "Bad Request"),
        (status = 503, description = "Store unavailable"),
    )
)]
pub async fn create_notification(
    State(notifier): State<Arc<Notifier>>,
    Json(request): Json<CreateNotificationRequestDto>,
) -> Result<(StatusCode, Json<NotificationDto>), Error> {
    request.validate()?;
    let r#type = NotificationType::from_str(&request.r#type).map_err(|_| {
        Error::bad_request(&format!(
            "Unsupported notification type: {}, expected one of {}",
            request.r#type,
            NotificationType::VARIANTS.join(", ")
        ))
    })?;

    let now = notifier.now();
    let notification = notifier
        .create_notification(
            r#type,
            &request.user_id,
            &request.dog_id,
            request.title,
            request.message,
            &now,
        )
        .await?;

    Ok((StatusCode::CREATED, Json(notification.into())))
}

#[utoipa::path(
    summary = "Get a notification",
    get,
    path = "/notifications/{id}",
    params(("id" = String, Path, description = "Notification id")),
    tag = "Notification APIs",
    responses(
        (status = 200, description = "Notification found", body = NotificationDto),
        (status = 404, description = "Not Found"),
    )
)]
pub async fn get_notification(
    State(notifications): State<Arc<dyn NotificationStore>>,
    Path(id): Path<String>,
) -> Result<Json<NotificationDto>, Error> {
    let notification = notifications
        .find_by_id(&id)
        .await?
        .ok_or_else(|| Error::not_found(&format!("Notification {id} not found")))?;

    Ok(Json(notification.into()))
}

#[utoipa::path(
    summary = "Mark a notification as read",
    patch,
    path = "/notifications/{id}/read",
    params(("id" = String, Path, description = "Notification id")),
    tag = "Notification APIs",
    responses(
        (status = 200, description = "Notification marked as read", body = MarkNotificationAsReadResponseDto),
        (status = 404, description = "Not Found"),
    )
)]
pub async fn mark_notification_as_read(
    State(notifications): State<Arc<dyn NotificationStore>>,
    Path(id): Path<String>,
) -> Result<Json<MarkNotificationAsReadResponseDto>, Error> {
    let notification = notifications
        .mark_read(&id)
        .await?
        .ok_or_else(|| Error::not_found(&format!("Notification {id} not found")))?;

    Ok(Json(MarkNotificationAsReadResponseDto {
        notification_id: notification.id_hex(),
        read: notification.read,
    }))
}

#[utoipa::path(
    summary = "Delete a notification",
    delete,
    path = "/notifications/{id}",
    params(("id" = String, Path, description = "Notification id")),
    tag = "Notification APIs",
    responses(
        (status = 204, description = "Notification deleted or already absent"),
    )
)]
pub async fn delete_notification(
    State(notifications): State<Arc<dyn NotificationStore>>,
    Path(id): Path<String>,
) -> Result<StatusCode, Error> {
    notifications.delete(&id).await?;
    Ok(StatusCode::NO_CONTENT)
}
