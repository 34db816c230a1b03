use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};
use validator::Validate;
use wither::bson;

use crate::errors::Error;
use crate::models::dog::{Dog, DogChanges};
use crate::routes::event::dto::to_rfc3339;

fn parse_birthday(raw: &str) -> Result<DateTime<Utc>, Error> {
    DateTime::parse_from_rfc3339(raw)
        .map(|date| date.with_timezone(&Utc))
        .map_err(|_| Error::bad_request("birthday must be an RFC 3339 timestamp"))
}

#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateDogRequestDto {
    #[serde(default)]
    #[validate(length(min = 1, message = "userId is required"))]
    pub user_id: String,
    #[serde(default)]
    #[validate(length(min = 1, message = "name is required"))]
    pub name: String,
    #[serde(default)]
    #[validate(length(min = 1, message = "breed is required"))]
    pub breed: String,
    #[serde(default)]
    #[validate(range(min = 0.0, message = "Age must be a non-negative number"))]
    pub age: f64,
    #[serde(default)]
    #[validate(length(min = 1, message = "sex is required"))]
    pub sex: String,
    #[serde(default)]
    #[validate(range(exclusive_min = 0.0, message = "Weight must be a positive number"))]
    pub weight: f64,
    pub birthday: Option<String>,
}

impl CreateDogRequestDto {
    /// The requesting user becomes the first owner.
    pub fn into_dog(self) -> Result<Dog, Error> {
        self.validate()?;
        let birthday = self.birthday.as_deref().map(parse_birthday).transpose()?;

        Ok(Dog {
            name: self.name,
            breed: self.breed,
            age: self.age,
            sex: self.sex,
            weight: self.weight,
            birthday: birthday.map(bson::DateTime::from_chrono),
            owner_ids: vec![self.user_id],
            ..Default::default()
        })
    }
}

#[derive(Debug, Clone, Default, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateDogRequestDto {
    #[validate(length(min = 1))]
    pub name: Option<String>,
    #[validate(length(min = 1))]
    pub breed: Option<String>,
    #[validate(range(min = 0.0, message = "Age must be a non-negative number"))]
    pub age: Option<f64>,
    pub sex: Option<String>,
    #[validate(range(exclusive_min = 0.0, message = "Weight must be a positive number"))]
    pub weight: Option<f64>,
    pub birthday: Option<String>,
}

impl UpdateDogRequestDto {
    pub fn into_changes(self) -> Result<DogChanges, Error> {
        self.validate()?;

        Ok(DogChanges {
            birthday: self.birthday.as_deref().map(parse_birthday).transpose()?,
            name: self.name,
            breed: self.breed,
            age: self.age,
            sex: self.sex,
            weight: self.weight,
        })
    }
}

#[derive(Debug, Clone, Deserialize, IntoParams)]
#[serde(rename_all = "camelCase")]
#[into_params(parameter_in = Query)]
pub struct ListDogsQuery {
    pub user_id: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct DogDto {
    pub id: String,
    pub name: String,
    pub breed: String,
    pub age: f64,
    pub sex: String,
    pub weight: f64,
    pub birthday: Option<String>,
    pub owner_ids: Vec<String>,
    pub diet_event_ids: Vec<String>,
    pub exercise_event_ids: Vec<String>,
    pub behavior_event_ids: Vec<String>,
    pub health_event_ids: Vec<String>,
    pub wellness_event_ids: Vec<String>,
    pub created_at: Option<String>,
    pub updated_at: Option<String>,
}

impl From<Dog> for DogDto {
    fn from(dog: Dog) -> Self {
        Self {
            id: dog.id_hex(),
            name: dog.name,
            breed: dog.breed,
            age: dog.age,
            sex: dog.sex,
            weight: dog.weight,
            birthday: dog.birthday.map(to_rfc3339),
            owner_ids: dog.owner_ids,
            diet_event_ids: dog.diet_event_ids,
            exercise_event_ids: dog.exercise_event_ids,
            behavior_event_ids: dog.behavior_event_ids,
            health_event_ids: dog.health_event_ids,
            wellness_event_ids: dog.wellness_event_ids,
            created_at: dog.created_at.map(to_rfc3339),
            updated_at: dog.updated_at.map(to_rfc3339),
        }
    }
}
