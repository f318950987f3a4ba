//! # API Error Handling
//!
//! One error type for every handler and service. Each variant maps to an
//! HTTP status code and renders the boilerplate's error envelope
//! `{code, status, message, errors}`. Internal detail (database errors,
//! stack context) is logged through `tracing` and never sent to clients.

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use sea_orm::DbErr;
use serde::Serialize;
use std::fmt;

#[derive(Debug)]
pub enum ApiError {
    /// 404 - no row matched an identifier-scoped lookup or mutation.
    NotFound {
        resource: String,
        id: Option<String>,
    },

    /// 400 - malformed or unusable input.
    BadRequest { message: String },

    /// 400 - input failed validation rules; one message per failed field.
    Validation { errors: Vec<String> },

    /// 500 - store failure. Detail is logged, clients get a generic message.
    Database { internal: DbErr },

    /// 500 - any other internal failure.
    Internal { internal: Option<String> },
}

impl ApiError {
    pub fn not_found(resource: impl Into<String>, id: Option<String>) -> Self {
        Self::NotFound {
            resource: resource.into(),
            id,
        }
    }

    pub fn bad_request(message: impl Into<String>) -> Self {
        Self::BadRequest {
            message: message.into(),
        }
    }

    pub fn validation(errors: Vec<String>) -> Self {
        Self::Validation { errors }
    }

    pub fn database(internal: DbErr) -> Self {
        Self::Database { internal }
    }

    pub fn internal(internal: Option<String>) -> Self {
        Self::Internal { internal }
    }

    /// Translates a repository error: `RecordNotFound` becomes a 404 for
    /// `resource`, anything else a logged 500.
    pub fn from_repo(resource: &str, id: Option<String>, err: DbErr) -> Self {
        match err {
            DbErr::RecordNotFound(_) => Self::not_found(resource, id),
            other => Self::database(other),
        }
    }

    #[must_use]
    pub fn status_code(&self) -> StatusCode {
        match self {
            Self::NotFound { .. } => StatusCode::NOT_FOUND,
            Self::BadRequest { .. } | Self::Validation { .. } => StatusCode::BAD_REQUEST,
            Self::Database { .. } | Self::Internal { .. } => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn message(&self) -> String {
        match self {
            Self::NotFound { resource, id } => match id {
                Some(id) => format!("{resource} with id {id} not found"),
                None => format!("{resource} not found"),
            },
            Self::BadRequest { message } => message.clone(),
            Self::Validation { .. } => "Validation failed".to_string(),
            Self::Database { .. } | Self::Internal { .. } => {
                "An internal error occurred".to_string()
            }
        }
    }
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message())
    }
}

impl std::error::Error for ApiError {}

impl From<validator::ValidationErrors> for ApiError {
    fn from(errors: validator::ValidationErrors) -> Self {
        let mut messages: Vec<String> = errors
            .field_errors()
            .iter()
            .flat_map(|(field, errors)| {
                errors.iter().map(move |error| match &error.message {
                    Some(message) => format!("{field}: {message}"),
                    None => format!("{field}: {}", error.code),
                })
            })
            .collect();
        messages.sort();
        Self::Validation { errors: messages }
    }
}

/// Error envelope shared by every failure response.
#[derive(Serialize)]
struct ErrorBody {
    code: u16,
    status: &'static str,
    message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    errors: Option<Vec<String>>,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        match &self {
            Self::Database { internal } => {
                tracing::error!("Database error: {internal}");
            }
            Self::Internal {
                internal: Some(detail),
            } => {
                tracing::error!("Internal error: {detail}");
            }
            _ => {}
        }

        let status = self.status_code();
        let errors = match &self {
            Self::Validation { errors } => Some(errors.clone()),
            _ => None,
        };
        let body = ErrorBody {
            code: status.as_u16(),
            status: "error",
            message: self.message(),
            errors,
        };
        (status, Json(body)).into_response()
    }
}
