use std::sync::Arc;

use axum::Json;
use axum::extract::{Query, State};
use utoipa_axum::router::OpenApiRouter;
use utoipa_axum::routes;

use crate::app_state::AppState;
use crate::core::dashboard::load_dashboard;
use crate::core::store::{Directory, EventStore};
use crate::errors::Error;
use crate::routes::dashboard::dto::{DashboardDto, DashboardQuery};

pub fn create_route() -> OpenApiRouter<AppState> {
    OpenApiRouter::new().routes(routes!(get_dashboard))
}

#[utoipa::path(
    summary = "Overview of one dog",
    description = "Health score (mean health-event severity) plus exercise, diet and wellness history.",
    get,
    path = "/dashboard",
    params(DashboardQuery),
    tag = "Dashboard APIs",
    responses(
        (status = 200, description = "Dashboard data", body = DashboardDto),
        (status = 400, description = "Bad Request"),
        (status = 404, description = "Dog not found for this user"),
    )
)]
pub async fn get_dashboard(
    State(events): State<Arc<dyn EventStore>>,
    State(directory): State<Arc<dyn Directory>>,
    Query(query): Query<DashboardQuery>,
) -> Result<Json<DashboardDto>, Error> {
    let (Some(user_id), Some(dog_id)) = (
        query.user_id.filter(|id| !id.is_empty()),
        query.dog_id.filter(|id| !id.is_empty()),
    ) else {
        return Err(Error::bad_request("userId and dogId are required"));
    };

    let owned = directory
        .find_dog(&dog_id)
        .await?
        .is_some_and(|dog| dog.is_owned_by(&user_id));
    if !owned {
        return Err(Error::not_found(&format!(
            "Dog {dog_id} not found for user {user_id}"
        )));
    }

    let dashboard = load_dashboard(events.as_ref(), &dog_id).await?;
    Ok(Json(DashboardDto::try_from(dashboard)?))
}
