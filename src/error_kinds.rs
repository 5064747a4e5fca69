//! Stable error kinds and the responses they are rendered as.
//!
//! Each kind owns both its HTTP status and its JSON body, so there is no
//! separate status table that could drift from the body table.

use std::fmt;

use actix_web::{
    http::{header, StatusCode},
    HttpResponse,
};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

pub const MSG_RESOURCE_NOT_FOUND: &str = "Resource not found.";
pub const MSG_INTERNAL_ERROR: &str = "Internal server error.";

pub const ID_RESOURCE_NOT_FOUND: &str = "resource_not_found";

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, ToSchema)]
pub struct ErrorMessage {
    pub message: String,
}

/// Body of a classified error: `{"error": {"message": "..."}}`.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, ToSchema)]
pub struct ErrorBody {
    pub error: ErrorMessage,
}

impl ErrorBody {
    pub fn new(message: &str) -> Self {
        ErrorBody {
            error: ErrorMessage { message: message.to_string() },
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// The requested resource (route or record) does not exist.
    ResourceNotFound,
    /// Fallback for anything that has no registered response.
    Internal,
}

impl ErrorKind {
    /// Kinds that can be looked up by identifier.
    pub const REGISTERED: [ErrorKind; 1] = [ErrorKind::ResourceNotFound];

    pub fn identifier(&self) -> &'static str {
        match self {
            ErrorKind::ResourceNotFound => ID_RESOURCE_NOT_FOUND,
            ErrorKind::Internal => "internal",
        }
    }
    pub fn from_identifier(identifier: &str) -> Option<Self> {
        Self::REGISTERED.into_iter().find(|kind| kind.identifier() == identifier)
    }
    pub fn status(&self) -> StatusCode {
        match self {
            ErrorKind::ResourceNotFound => StatusCode::NOT_FOUND,
            ErrorKind::Internal => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
    pub fn body(&self) -> ErrorBody {
        match self {
            ErrorKind::ResourceNotFound => ErrorBody::new(MSG_RESOURCE_NOT_FOUND),
            ErrorKind::Internal => ErrorBody::new(MSG_INTERNAL_ERROR),
        }
    }
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.identifier(), self.body().error.message)
    }
}

impl std::error::Error for ErrorKind {}

/// Look up the response for an error identifier.
///
/// An unregistered identifier gets the generic 500 response.
/// Every `ErrorKind` is rendered through this lookup.
pub fn classify(identifier: &str) -> (StatusCode, ErrorBody) {
    let kind = ErrorKind::from_identifier(identifier).unwrap_or(ErrorKind::Internal);
    (kind.status(), kind.body())
}

impl actix_web::ResponseError for ErrorKind {
    fn status_code(&self) -> StatusCode {
        classify(self.identifier()).0
    }
    fn error_response(&self) -> HttpResponse<actix_web::body::BoxBody> {
        let (status, body) = classify(self.identifier());
        HttpResponse::build(status)
            .insert_header(header::ContentType(mime::APPLICATION_JSON))
            .json(body)
    }
}

/// Default service: any route that is not registered.
pub async fn resource_not_found() -> Result<HttpResponse, ErrorKind> {
    Err(ErrorKind::ResourceNotFound)
}
