use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

use crate::core::dashboard::DogDashboard;
use crate::errors::Error;
use crate::models::event::Event;
use crate::routes::event::dto::EventDto;

#[derive(Debug, Clone, Deserialize, IntoParams)]
#[serde(rename_all = "camelCase")]
#[into_params(parameter_in = Query)]
pub struct DashboardQuery {
    pub user_id: Option<String>,
    pub dog_id: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct DashboardDto {
    /// Mean severity of the dog's health events.
    pub total_health_score: f64,
    pub activity_summary: Vec<EventDto>,
    pub diet_summary: Vec<EventDto>,
    pub wellness_summary: Vec<EventDto>,
}

impl TryFrom<DogDashboard> for DashboardDto {
    type Error = Error;

    fn try_from(dashboard: DogDashboard) -> Result<Self, Self::Error> {
        let to_dtos = |events: Vec<Event>| {
            events
                .into_iter()
                .map(EventDto::try_from)
                .collect::<Result<Vec<_>, _>>()
        };

        Ok(Self {
            total_health_score: dashboard.total_health_score,
            activity_summary: to_dtos(dashboard.activity)?,
            diet_summary: to_dtos(dashboard.diet)?,
            wellness_summary: to_dtos(dashboard.wellness)?,
        })
    }
}
