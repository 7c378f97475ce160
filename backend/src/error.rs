use crate::models::ErrorResponse;
use log::error;
use rocket::http::Status;
use rocket::request::Request;
use rocket::response::{self, Responder};
use thiserror::Error;

/// Failures surfaced by the catalog services.
///
/// `NotFound` is a distinguished outcome so callers can branch on it
/// without inspecting message text.
#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("{0}")]
    Validation(String),

    #[error("{kind} with ID {id} not found")]
    NotFound { kind: &'static str, id: String },

    #[error("metadata provider error: {0}")]
    Upstream(String),

    #[error("store error: {0}")]
    Store(String),
}

pub type Result<T> = std::result::Result<T, CatalogError>;

impl CatalogError {
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation(message.into())
    }

    pub fn video_not_found(id: &str) -> Self {
        Self::NotFound {
            kind: "video",
            id: id.to_string(),
        }
    }

    pub fn creator_not_found(id: &str) -> Self {
        Self::NotFound {
            kind: "creator",
            id: id.to_string(),
        }
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }

    pub fn status(&self) -> Status {
        match self {
            Self::Validation(_) => Status::BadRequest,
            Self::NotFound { .. } => Status::NotFound,
            Self::Upstream(_) => Status::BadGateway,
            Self::Store(_) => Status::InternalServerError,
        }
    }

    fn kind(&self) -> &'static str {
        match self {
            Self::Validation(_) => "validation_error",
            Self::NotFound { .. } => "not_found",
            Self::Upstream(_) => "upstream_error",
            Self::Store(_) => "store_error",
        }
    }
}

impl From<elasticsearch::Error> for CatalogError {
    fn from(e: elasticsearch::Error) -> Self {
        Self::Store(e.to_string())
    }
}

impl From<reqwest::Error> for CatalogError {
    fn from(e: reqwest::Error) -> Self {
        Self::Upstream(e.to_string())
    }
}

impl<'r> Responder<'r, 'static> for CatalogError {
    fn respond_to(self, request: &'r Request<'_>) -> response::Result<'static> {
        if self.status().code >= 500 {
            error!("{} {} failed: {self}", request.method(), request.uri());
        }
        ErrorResponse::new(self.status(), self.kind(), self.to_string()).respond_to(request)
    }
}
