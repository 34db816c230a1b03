use axum::{extract::FromRequestParts, http::request::Parts};
use axum_extra::{
    TypedHeader,
    headers::{Authorization, authorization::Bearer},
};

use crate::{app_state::AppState, errors::Error as AppError};

/// Guards the scheduler-facing endpoints: the bearer token must equal the
/// configured cron secret.
#[derive(Debug)]
pub struct CronAuth;

impl FromRequestParts<AppState> for CronAuth {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let TypedHeader(Authorization(bearer)) =
            TypedHeader::<Authorization<Bearer>>::from_request_parts(parts, state)
                .await
                .map_err(|_| AppError::unauthorized("Authorization header missing"))?;

        match state.cron_secret.as_deref() {
            Some(secret) if !secret.is_empty() && bearer.token() == secret => Ok(CronAuth),
            Some(_) => Err(AppError::unauthorized("Invalid cron secret")),
            None => Err(AppError::unauthorized("Cron endpoint is disabled")),
        }
    }
}
