use std::sync::Arc;

use axum::Json;
use axum::extract::{Path, Query, State};
use http::StatusCode;
use utoipa_axum::router::OpenApiRouter;
use utoipa_axum::routes;

use crate::app_state::AppState;
use crate::core::store::Directory;
use crate::errors::Error;
use crate::routes::dog::dto::{CreateDogRequestDto, DogDto, ListDogsQuery, UpdateDogRequestDto};

pub fn create_route() -> OpenApiRouter<AppState> {
    OpenApiRouter::new()
        .routes(routes!(list_dogs, create_dog))
        .routes(routes!(get_dog, update_dog, delete_dog))
}

#[utoipa::path(
    summary = "List a user's dogs",
    get,
    path = "/dogs",
    params(ListDogsQuery),
    tag = "Dog APIs",
    responses(
        (status = 200, description = "Dogs owned by the user", body = Vec<DogDto>),
        (status = 400, description = "Bad Request"),
    )
)]
pub async fn list_dogs(
    State(directory): State<Arc<dyn Directory>>,
    Query(query): Query<ListDogsQuery>,
) -> Result<Json<Vec<DogDto>>, Error> {
    let user_id = query
        .user_id
        .filter(|id| !id.is_empty())
        .ok_or_else(|| Error::bad_request("userId is required"))?;

    let dogs = directory.dogs_for_user(&user_id).await?;
    Ok(Json(dogs.into_iter().map(DogDto::from).collect()))
}

#[utoipa::path(
    summary = "Register a dog",
    post,
    path = "/dogs",
    request_body(content = CreateDogRequestDto, content_type = "application/json"),
    tag = "Dog APIs",
    responses(
        (status = 201, description = "Dog created", body = DogDto),
        (status = 400, description = "Bad Request"),
    )
)]
pub async fn create_dog(
    State(directory): State<Arc<dyn Directory>>,
    Json(request): Json<CreateDogRequestDto>,
) -> Result<(StatusCode, Json<DogDto>), Error> {
    let dog = directory.create_dog(request.into_dog()?).await?;
    tracing::info!("Created dog {} for user {:?}", dog.id_hex(), dog.owner_ids);

    Ok((StatusCode::CREATED, Json(dog.into())))
}

#[utoipa::path(
    summary = "Get a dog",
    get,
    path = "/dogs/{id}",
    params(("id" = String, Path, description = "Dog id")),
    tag = "Dog APIs",
    responses(
        (status = 200, description = "Dog found", body = DogDto),
        (status = 404, description = "Not Found"),
    )
)]
pub async fn get_dog(
    State(directory): State<Arc<dyn Directory>>,
    Path(id): Path<String>,
) -> Result<Json<DogDto>, Error> {
    let dog = directory
        .find_dog(&id)
        .await?
        .ok_or_else(|| Error::not_found(&format!("Dog {id} not found")))?;

    Ok(Json(dog.into()))
}

#[utoipa::path(
    summary = "Update a dog",
    put,
    path = "/dogs/{id}",
    params(("id" = String, Path, description = "Dog id")),
    request_body(content = UpdateDogRequestDto, content_type = "application/json"),
    tag = "Dog APIs",
    responses(
        (status = 200, description = "Dog updated", body = DogDto),
        (status = 400, description = "Bad Request"),
        (status = 404, description = "Not Found"),
    )
)]
pub async fn update_dog(
    State(directory): State<Arc<dyn Directory>>,
    Path(id): Path<String>,
    Json(request): Json<UpdateDogRequestDto>,
) -> Result<Json<DogDto>, Error> {
    let dog = directory
        .update_dog(&id, request.into_changes()?)
        .await?
        .ok_or_else(|| Error::not_found(&format!("Dog {id} not found")))?;

    Ok(Json(dog.into()))
}

#[utoipa::path(
    summary = "Delete a dog",
    delete,
    path = "/dogs/{id}",
    params(("id" = String, Path, description = "Dog id")),
    tag = "Dog APIs",
    responses(
        (status = 204, description = "Dog deleted or already absent"),
    )
)]
pub async fn delete_dog(
    State(directory): State<Arc<dyn Directory>>,
    Path(id): Path<String>,
) -> Result<StatusCode, Error> {
    directory.delete_dog(&id).await?;
    Ok(StatusCode::NO_CONTENT)
}
