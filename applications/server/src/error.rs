/// Server error types
use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;
use warden_core::{UniqueField, WardenError};

pub type Result<T> = std::result::Result<T, ServerError>;

#[derive(Debug, Error)]
pub enum ServerError {
    /// Username or email already taken
    #[error("Duplicate {0}")]
    Conflict(UniqueField),

    #[error("Resource not found: {0}")]
    NotFound(String),

    /// Password did not match the stored secret
    #[error("Invalid credential")]
    InvalidCredential,

    #[error("Bad request: {0}")]
    BadRequest(String),

    /// A listing query succeeded but returned nothing
    #[error("No {0} found")]
    EmptyResult(String),

    /// The backing store failed
    #[error("Store unavailable: {0}")]
    StoreUnavailable(String),

    #[error("Configuration error: {0}")]
    Config(String),

    /// Hashing or token signing failed
    #[error("Encoding error: {0}")]
    Encoding(String),

    #[error("Token expired")]
    TokenExpired,

    #[error("Invalid token: {0}")]
    InvalidToken(String),

    #[error("Internal server error: {0}")]
    Internal(String),
}

impl From<WardenError> for ServerError {
    fn from(err: WardenError) -> Self {
        match err {
            WardenError::Duplicate(field) => ServerError::Conflict(field),
            other => ServerError::StoreUnavailable(other.to_string()),
        }
    }
}

impl From<warden_storage::StorageError> for ServerError {
    fn from(err: warden_storage::StorageError) -> Self {
        WardenError::from(err).into()
    }
}

impl From<bcrypt::BcryptError> for ServerError {
    fn from(err: bcrypt::BcryptError) -> Self {
        ServerError::Encoding(err.to_string())
    }
}

impl From<jsonwebtoken::errors::Error> for ServerError {
    fn from(err: jsonwebtoken::errors::Error) -> Self {
        match err.kind() {
            jsonwebtoken::errors::ErrorKind::ExpiredSignature => ServerError::TokenExpired,
            _ => ServerError::InvalidToken(err.to_string()),
        }
    }
}

impl From<tokio::task::JoinError> for ServerError {
    fn from(err: tokio::task::JoinError) -> Self {
        ServerError::Internal(format!("blocking task failed: {err}"))
    }
}

impl ServerError {
    /// Attach the endpoint whose status/message table applies
    pub fn at(self, endpoint: Endpoint) -> EndpointError {
        EndpointError {
            endpoint,
            error: self,
        }
    }
}

/// HTTP endpoints with their own failure vocabulary
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Endpoint {
    Register,
    Login,
    Verify,
    ListUsers,
    GetUser,
    UpdateUser,
    DeleteUser,
    ListAssets,
}

const INTERNAL: &str = "Internal Server Error";
const USER_NOT_FOUND: &str = "User Not Found...!";

impl Endpoint {
    /// Status code and client-facing message for a failure at this endpoint
    pub fn describe(self, err: &ServerError) -> (StatusCode, String) {
        use ServerError as E;
        use StatusCode as S;

        let (status, message): (StatusCode, &str) = match (self, err) {
            (Endpoint::Register, E::Conflict(UniqueField::Username)) => {
                (S::BAD_REQUEST, "Please use unique username")
            }
            (Endpoint::Register, E::Conflict(UniqueField::Email)) => {
                (S::BAD_REQUEST, "Please use unique Email")
            }
            (Endpoint::Register, E::BadRequest(msg)) => return (S::BAD_REQUEST, msg.clone()),
            (Endpoint::Register, _) => (S::INTERNAL_SERVER_ERROR, INTERNAL),

            (Endpoint::Login, E::BadRequest(msg)) => return (S::BAD_REQUEST, msg.clone()),
            (Endpoint::Login, E::NotFound(_)) => (S::NOT_FOUND, "Username not Found"),
            (Endpoint::Login, E::InvalidCredential) => (S::BAD_REQUEST, "Incorrect Password"),
            (Endpoint::Login, _) => (S::INTERNAL_SERVER_ERROR, INTERNAL),

            (Endpoint::Verify, E::NotFound(_)) => (S::NOT_FOUND, "Can't find User!"),
            (Endpoint::Verify, _) => (S::NOT_FOUND, "Authentication Error"),

            (Endpoint::ListUsers, E::EmptyResult(_)) => {
                (S::NOT_IMPLEMENTED, "Couldn't Find Any Users")
            }
            (Endpoint::ListUsers, _) => (S::NOT_FOUND, "Cannot Find Users Data"),

            (Endpoint::GetUser, E::BadRequest(_)) => (S::BAD_REQUEST, "Invalid Username"),
            (Endpoint::GetUser, E::NotFound(_)) => (S::NOT_FOUND, "Couldn't Find the User"),
            (Endpoint::GetUser, _) => (S::INTERNAL_SERVER_ERROR, INTERNAL),

            (Endpoint::UpdateUser, E::BadRequest(msg)) => return (S::BAD_REQUEST, msg.clone()),
            (Endpoint::UpdateUser, E::Conflict(UniqueField::Email)) => {
                (S::BAD_REQUEST, "Please use unique Email")
            }
            (Endpoint::UpdateUser, E::Conflict(UniqueField::Username)) => {
                (S::BAD_REQUEST, "Please use unique username")
            }
            (Endpoint::UpdateUser, _) => (S::INTERNAL_SERVER_ERROR, INTERNAL),

            (Endpoint::DeleteUser, E::BadRequest(_)) => (S::BAD_REQUEST, USER_NOT_FOUND),
            (Endpoint::DeleteUser, _) => (S::INTERNAL_SERVER_ERROR, INTERNAL),

            (Endpoint::ListAssets, E::EmptyResult(_)) => {
                (S::NOT_IMPLEMENTED, "Couldn't Find Any Assets")
            }
            (Endpoint::ListAssets, _) => (S::NOT_FOUND, "Cannot Find Assets Data"),
        };

        (status, message.to_string())
    }
}

/// A failure bound to the endpoint that produced it
#[derive(Debug)]
pub struct EndpointError {
    pub endpoint: Endpoint,
    pub error: ServerError,
}

impl IntoResponse for EndpointError {
    fn into_response(self) -> Response {
        let (status, error_message) = self.endpoint.describe(&self.error);

        if status.is_server_error() || matches!(self.error, ServerError::StoreUnavailable(_)) {
            tracing::error!(endpoint = ?self.endpoint, "Request failed: {}", self.error);
        } else {
            tracing::debug!(endpoint = ?self.endpoint, "Request rejected: {}", self.error);
        }

        let body = Json(json!({
            "error": error_message,
        }));

        (status, body).into_response()
    }
}
