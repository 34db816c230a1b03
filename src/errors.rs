use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde_json::json;
use wither::WitherError;
use wither::mongodb::error::Error as MongoError;

#[derive(thiserror::Error, Debug)]
pub enum Error {
    #[error("{0}")]
    Wither(#[from] WitherError),

    #[error("{0}")]
    Mongo(#[from] MongoError),

    #[error("{0}")]
    StoreUnavailable(#[from] StoreUnavailable),

    #[error("Error parsing ObjectID {0}")]
    ParseObjectID(String),

    #[error("{0}")]
    BadRequest(#[from] BadRequest),

    #[error("{0}")]
    Validation(#[from] validator::ValidationErrors),

    #[error("{0}")]
    NotFound(#[from] NotFound),

    #[error("{0}")]
    Unauthorized(#[from] Unauthorized),

    #[error("{0}")]
    Generation(#[from] GenerationFailure),

    #[error("{0}")]
    Internal(#[from] Internal),

    #[error("{0}")]
    Request(#[from] reqwest::Error),

    #[error("{0}")]
    SerdeJsonError(#[from] serde_json::Error),
}

impl Error {
    fn get_codes(&self) -> (StatusCode, u16) {
        match *self {
            // 4XX Errors
            Error::ParseObjectID(_) => (StatusCode::BAD_REQUEST, 40001),
            Error::BadRequest(_) => (StatusCode::BAD_REQUEST, 40002),
            Error::Validation(_) => (StatusCode::BAD_REQUEST, 40008),
            Error::NotFound(_) => (StatusCode::NOT_FOUND, 40003),
            Error::Unauthorized(_) => (StatusCode::UNAUTHORIZED, 40004),

            // 5XX Errors
            Error::Internal(_) => (StatusCode::INTERNAL_SERVER_ERROR, 5000),
            Error::Wither(_) => (StatusCode::SERVICE_UNAVAILABLE, 5002),
            Error::Mongo(_) => (StatusCode::SERVICE_UNAVAILABLE, 5003),
            Error::StoreUnavailable(_) => (StatusCode::SERVICE_UNAVAILABLE, 5005),
            Error::Generation(_) => (StatusCode::BAD_GATEWAY, 5006),

            Error::Request(_) => (StatusCode::INTERNAL_SERVER_ERROR, 6002),
            Error::SerdeJsonError(_) => (StatusCode::INTERNAL_SERVER_ERROR, 6003),
        }
    }

    /// True for every failure that originates in the document store.
    pub fn is_store_failure(&self) -> bool {
        matches!(
            self,
            Error::Wither(_) | Error::Mongo(_) | Error::StoreUnavailable(_)
        )
    }

    pub fn status_code(&self) -> StatusCode {
        self.get_codes().0
    }

    pub fn bad_request(message: &str) -> Self {
        Error::BadRequest(BadRequest {
            message: message.to_string(),
        })
    }

    pub fn not_found(message: &str) -> Self {
        Error::NotFound(NotFound {
            message: message.to_string(),
        })
    }

    pub fn internal_err(message: &str) -> Self {
        Error::Internal(Internal {
            message: message.to_string(),
        })
    }

    pub fn unauthorized(message: &str) -> Self {
        Error::Unauthorized(Unauthorized {
            message: message.to_string(),
        })
    }

    pub fn store_unavailable(message: &str) -> Self {
        Error::StoreUnavailable(StoreUnavailable {
            message: message.to_string(),
        })
    }

    pub fn generation(message: &str) -> Self {
        Error::Generation(GenerationFailure {
            message: message.to_string(),
        })
    }
}

impl IntoResponse for Error {
    fn into_response(self) -> Response {
        tracing::error!("{self:?}");

        let (status_code, code) = self.get_codes();
        let message = self.to_string();

        (status_code, Json(json!({ "code": code, "message": message }))).into_response()
    }
}

#[derive(thiserror::Error, Debug)]
#[error("Bad Request: {message}")]
pub struct BadRequest {
    pub message: String,
}

#[derive(thiserror::Error, Debug)]
#[error("Not found: {message}")]
pub struct NotFound {
    pub message: String,
}

#[derive(thiserror::Error, Debug)]
#[error("Internal error: {message}")]
pub struct Internal {
    pub message: String,
}

#[derive(thiserror::Error, Debug)]
#[error("Unauthorized error: {message}")]
pub struct Unauthorized {
    pub message: String,
}

#[derive(thiserror::Error, Debug)]
#[error("Store unavailable: {message}")]
pub struct StoreUnavailable {
    pub message: String,
}

#[derive(thiserror::Error, Debug)]
#[error("Text generation failed: {message}")]
pub struct GenerationFailure {
    pub message: String,
}
