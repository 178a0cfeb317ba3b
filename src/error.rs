use actix_web::{HttpResponse, ResponseError};
use chrono::{DateTime, Utc};
use serde::Serialize;
use std::fmt;

/// Application-level error type
#[derive(Debug)]
pub enum AppError {
    /// The submitted repository URL could not be understood
    InvalidInput(String),
    /// The repository exists but yields nothing to bind into a book
    NoContent(String),
    /// GitHub refused the request because the API rate limit is exhausted
    RateLimited {
        message: String,
        reset_at: Option<DateTime<Utc>>,
    },
    /// GitHub answered with a non-success status other than a rate limit
    Upstream(String),
    /// GitHub answered 200 but the payload did not match the Contents API shape
    UpstreamParse(String),
    /// The converter subprocess failed to produce a PDF
    Conversion(String),
    /// The per-request scratch directory could not be created or written
    Workspace(String),
    /// Internal server error
    Internal(String),
}

#[derive(Serialize)]
struct ErrorResponse {
    error: ErrorBody,
    meta: ErrorMeta,
}

#[derive(Serialize)]
struct ErrorBody {
    code: String,
    message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    details: Option<serde_json::Value>,
}

#[derive(Serialize)]
struct ErrorMeta {
    request_id: String,
}

impl AppError {
    fn error_code(&self) -> &'static str {
        match self {
            Self::InvalidInput(_) => "INVALID_INPUT",
            Self::NoContent(_) => "NO_CONTENT",
            Self::RateLimited { .. } => "RATE_LIMITED",
            Self::Upstream(_) => "UPSTREAM_ERROR",
            Self::UpstreamParse(_) => "UPSTREAM_PARSE_ERROR",
            Self::Conversion(_) => "CONVERSION_ERROR",
            Self::Workspace(_) => "WORKSPACE_ERROR",
            Self::Internal(_) => "INTERNAL_ERROR",
        }
    }
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidInput(msg) => write!(f, "Invalid input: {msg}"),
            Self::NoContent(msg) => write!(f, "{msg}"),
            Self::RateLimited { message, .. } => write!(f, "{message}"),
            Self::Upstream(msg) => write!(f, "GitHub request failed: {msg}"),
            Self::UpstreamParse(msg) => write!(f, "Unexpected GitHub response: {msg}"),
            Self::Conversion(msg) => write!(f, "PDF conversion failed: {msg}"),
            Self::Workspace(msg) => write!(f, "Workspace error: {msg}"),
            Self::Internal(msg) => write!(f, "Internal error: {msg}"),
        }
    }
}

impl ResponseError for AppError {
    fn error_response(&self) -> HttpResponse {
        let error_response = ErrorResponse {
            error: ErrorBody {
                code: self.error_code().to_string(),
                message: self.to_string(),
                details: None,
            },
            meta: ErrorMeta {
                request_id: uuid::Uuid::new_v4().to_string(),
            },
        };

        match self {
            Self::InvalidInput(_) | Self::NoContent(_) => {
                HttpResponse::BadRequest().json(error_response)
            }
            Self::RateLimited { reset_at, .. } => {
                let mut builder = HttpResponse::TooManyRequests();
                if let Some(reset_at) = reset_at {
                    let retry_after = (*reset_at - Utc::now()).num_seconds().max(1);
                    builder.insert_header(("Retry-After", retry_after.to_string()));
                }
                builder.json(error_response)
            }
            Self::Upstream(_)
            | Self::UpstreamParse(_)
            | Self::Conversion(_)
            | Self::Workspace(_)
            | Self::Internal(_) => HttpResponse::InternalServerError().json(error_response),
        }
    }
}
