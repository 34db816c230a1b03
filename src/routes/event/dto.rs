use chrono::{DateTime, SecondsFormat, Utc};
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};
use validator::Validate;

use crate::enums::EventCategory;
use crate::errors::Error;
use crate::models::event::{Event, EventDetails};

#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateEventRequestDto {
    #[serde(default)]
    #[validate(length(min = 1, message = "userId is required"))]
    pub user_id: String,
    #[serde(default)]
    #[validate(length(min = 1, message = "dogId is required"))]
    pub dog_id: String,
    /// RFC 3339 timestamp; the time of the request when omitted.
    pub event_date: Option<String>,
    /// Category specific fields, e.g. `{"foodType": "raw", "quantity": 2}`.
    #[serde(default)]
    #[schema(value_type = Object)]
    pub details: serde_json::Value,
}

impl CreateEventRequestDto {
    /// Validates the payload and turns it into an unsaved event.
    pub fn into_event(self, category: EventCategory) -> Result<Event, Error> {
        self.validate()?;

        let event_date = match self.event_date.as_deref() {
            Some(raw) => parse_event_date(raw)?,
            None => Utc::now(),
        };

        let details = EventDetails::from_json(category, self.details)?;
        details.check()?;

        Ok(Event::new(
            self.user_id,
            self.dog_id,
            bson::DateTime::from_chrono(event_date),
            details,
        ))
    }
}

fn parse_event_date(raw: &str) -> Result<DateTime<Utc>, Error> {
    DateTime::parse_from_rfc3339(raw)
        .map(|date| date.with_timezone(&Utc))
        .map_err(|_| Error::bad_request("eventDate must be an RFC 3339 timestamp"))
}

/// Full replacement of an event's details; the owner and dog stay fixed.
#[derive(Debug, Clone, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateEventRequestDto {
    /// RFC 3339 timestamp; the stored date is kept when omitted.
    pub event_date: Option<String>,
    #[serde(default)]
    #[schema(value_type = Object)]
    pub details: serde_json::Value,
}

impl UpdateEventRequestDto {
    pub fn into_parts(
        self,
        category: EventCategory,
    ) -> Result<(EventDetails, Option<DateTime<Utc>>), Error> {
        let event_date = self.event_date.as_deref().map(parse_event_date).transpose()?;
        let details = EventDetails::from_json(category, self.details)?;
        details.check()?;

        Ok((details, event_date))
    }
}

#[derive(Debug, Clone, Deserialize, IntoParams)]
#[serde(rename_all = "camelCase")]
#[into_params(parameter_in = Query)]
pub struct ListEventsQuery {
    pub dog_id: Option<String>,
}

#[derive(Debug, Clone, Deserialize, IntoParams)]
#[serde(rename_all = "camelCase")]
#[into_params(parameter_in = Query)]
pub struct UserEventsQuery {
    pub user_id: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct EventDto {
    pub id: String,
    pub user_id: String,
    pub dog_id: String,
    pub category: EventCategory,
    pub event_date: String,
    pub created_at: String,
    pub updated_at: String,
    #[schema(value_type = Object)]
    pub details: serde_json::Value,
}

impl TryFrom<Event> for EventDto {
    type Error = Error;

    fn try_from(event: Event) -> Result<Self, Self::Error> {
        let mut details = serde_json::to_value(&event.details)?;
        if let Some(fields) = details.as_object_mut() {
            fields.remove("kind");
        }

        Ok(Self {
            id: event.id_hex(),
            category: event.category(),
            user_id: event.user_id,
            dog_id: event.dog_id,
            event_date: to_rfc3339(event.event_date),
            created_at: to_rfc3339(event.created_at),
            updated_at: to_rfc3339(event.updated_at),
            details,
        })
    }
}

/// An event from a user's history, labelled with the dog it belongs to.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UserEventDto {
    pub dog_name: String,
    #[serde(flatten)]
    pub event: EventDto,
}

pub fn to_rfc3339(value: bson::DateTime) -> String {
    value.to_chrono().to_rfc3339_opts(SecondsFormat::Millis, true)
}
