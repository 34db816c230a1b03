use std::collections::HashMap;
use std::str::FromStr;
use std::sync::Arc;

use axum::Json;
use axum::extract::{Path, Query, State};
use http::StatusCode;
use strum::VariantNames;
use utoipa_axum::router::OpenApiRouter;
use utoipa_axum::routes;

use crate::app_state::AppState;
use crate::core::store::{Directory, EventStore};
use crate::enums::EventCategory;
use crate::errors::Error;
use crate::routes::event::dto::{
    CreateEventRequestDto, EventDto, ListEventsQuery, UpdateEventRequestDto, UserEventDto,
    UserEventsQuery,
};

pub fn create_route() -> OpenApiRouter<AppState> {
    OpenApiRouter::new()
        .routes(routes!(create_event, list_events))
        .routes(routes!(list_user_events))
        .routes(routes!(get_event, update_event, delete_event))
}

fn parse_category(raw: &str) -> Result<EventCategory, Error> {
    EventCategory::from_str(raw).map_err(|_| {
        Error::bad_request(&format!(
            "Unknown event category: {raw}, expected one of {}",
            EventCategory::VARIANTS.join(", ")
        ))
    })
}

#[utoipa::path(
    summary = "Log an event",
    description = "Creates an event for a dog and links it from the dog's record.",
    post,
    path = "/events/{category}",
    params(("category" = EventCategory, Path, description = "Event category")),
    request_body(content = CreateEventRequestDto, content_type = "application/json"),
    tag = "Event APIs",
    responses(
        (status = 201, description = "Event created", body = EventDto),
        (status = 400, description = "Bad Request"),
        (status = 503, description = "Store unavailable"),
    )
)]
pub async fn create_event(
    State(events): State<Arc<dyn EventStore>>,
    Path(category): Path<String>,
    Json(request): Json<CreateEventRequestDto>,
) -> Result<(StatusCode, Json<EventDto>), Error> {
    let category = parse_category(&category)?;
    let event = events.append(request.into_event(category)?).await?;

    Ok((StatusCode::CREATED, Json(EventDto::try_from(event)?)))
}

#[utoipa::path(
    summary = "List a dog's events",
    get,
    path = "/events/{category}",
    params(
        ("category" = EventCategory, Path, description = "Event category"),
        ListEventsQuery,
    ),
    tag = "Event APIs",
    responses(
        (status = 200, description = "Events, newest first", body = Vec<EventDto>),
        (status = 400, description = "Bad Request"),
    )
)]
pub async fn list_events(
    State(events): State<Arc<dyn EventStore>>,
    Path(category): Path<String>,
    Query(query): Query<ListEventsQuery>,
) -> Result<Json<Vec<EventDto>>, Error> {
    let category = parse_category(&category)?;
    let dog_id = query
        .dog_id
        .filter(|id| !id.is_empty())
        .ok_or_else(|| Error::bad_request("dogId is required"))?;

    let found = events.list_for_dog(&dog_id, category).await?;
    let dtos = found
        .into_iter()
        .map(EventDto::try_from)
        .collect::<Result<Vec<_>, _>>()?;

    Ok(Json(dtos))
}

#[utoipa::path(
    summary = "List a user's events across their dogs",
    get,
    path = "/events/{category}/by-user",
    params(
        ("category" = EventCategory, Path, description = "Event category"),
        UserEventsQuery,
    ),
    tag = "Event APIs",
    responses(
        (status = 200, description = "Events, newest first", body = Vec<UserEventDto>),
        (status = 400, description = "Bad Request"),
    )
)]
pub async fn list_user_events(
    State(events): State<Arc<dyn EventStore>>,
    State(directory): State<Arc<dyn Directory>>,
    Path(category): Path<String>,
    Query(query): Query<UserEventsQuery>,
) -> Result<Json<Vec<UserEventDto>>, Error> {
    let category = parse_category(&category)?;
    let user_id = query
        .user_id
        .filter(|id| !id.is_empty())
        .ok_or_else(|| Error::bad_request("userId is required"))?;

    let found = events.list_by_user(&user_id, category).await?;

    let mut dog_names: HashMap<String, String> = HashMap::new();
    let mut dtos = Vec::with_capacity(found.len());
    for event in found {
        if !dog_names.contains_key(&event.dog_id) {
            let name = match directory.find_dog(&event.dog_id).await {
                Ok(Some(dog)) if !dog.name.is_empty() => dog.name,
                Ok(_) => "Unknown".to_string(),
                Err(e) => {
                    tracing::warn!("Failed to load dog {} for event list: {e}", event.dog_id);
                    "Unknown".to_string()
                }
            };
            dog_names.insert(event.dog_id.clone(), name);
        }

        let dog_name = dog_names.get(&event.dog_id).cloned().unwrap_or_default();
        dtos.push(UserEventDto {
            dog_name,
            event: EventDto::try_from(event)?,
        });
    }

    Ok(Json(dtos))
}

#[utoipa::path(
    summary = "Get an event",
    get,
    path = "/events/{category}/{id}",
    params(
        ("category" = EventCategory, Path, description = "Event category"),
        ("id" = String, Path, description = "Event id"),
    ),
    tag = "Event APIs",
    responses(
        (status = 200, description = "Event found", body = EventDto),
        (status = 404, description = "Not Found"),
    )
)]
pub async fn get_event(
    State(events): State<Arc<dyn EventStore>>,
    Path((category, id)): Path<(String, String)>,
) -> Result<Json<EventDto>, Error> {
    let category = parse_category(&category)?;
    let event = events
        .find_by_id(category, &id)
        .await?
        .ok_or_else(|| Error::not_found(&format!("{category} event {id} not found")))?;

    Ok(Json(EventDto::try_from(event)?))
}

#[utoipa::path(
    summary = "Update an event",
    description = "Replaces the event's details and, when given, its date.",
    put,
    path = "/events/{category}/{id}",
    params(
        ("category" = EventCategory, Path, description = "Event category"),
        ("id" = String, Path, description = "Event id"),
    ),
    request_body(content = UpdateEventRequestDto, content_type = "application/json"),
    tag = "Event APIs",
    responses(
        (status = 200, description = "Event updated", body = EventDto),
        (status = 400, description = "Bad Request"),
        (status = 404, description = "Not Found"),
    )
)]
pub async fn update_event(
    State(events): State<Arc<dyn EventStore>>,
    Path((category, id)): Path<(String, String)>,
    Json(request): Json<UpdateEventRequestDto>,
) -> Result<Json<EventDto>, Error> {
    let category = parse_category(&category)?;
    let (details, event_date) = request.into_parts(category)?;

    let event = events
        .update(category, &id, details, event_date)
        .await?
        .ok_or_else(|| Error::not_found(&format!("{category} event {id} not found")))?;

    Ok(Json(EventDto::try_from(event)?))
}

#[utoipa::path(
    summary = "Delete an event",
    delete,
    path = "/events/{category}/{id}",
    params(
        ("category" = EventCategory, Path, description = "Event category"),
        ("id" = String, Path, description = "Event id"),
    ),
    tag = "Event APIs",
    responses(
        (status = 204, description = "Event deleted or already absent"),
        (status = 400, description = "Bad Request"),
    )
)]
pub async fn delete_event(
    State(events): State<Arc<dyn EventStore>>,
    Path((category, id)): Path<(String, String)>,
) -> Result<StatusCode, Error> {
    let category = parse_category(&category)?;
    events.delete(category, &id).await?;
    Ok(StatusCode::NO_CONTENT)
}
