use actix_web::{HttpResponse, ResponseError, http::StatusCode};
use derive_more::Display;

use crate::models::ResponseMessage;

/// Domain error taxonomy. Every service-level failure is raised as one of
/// these and translated to an HTTP status + response envelope at the edge.
#[derive(Debug, Display)]
pub enum ApiError {
    #[display(fmt = "{}", _0)]
    NotFound(String),

    #[display(fmt = "{}", _0)]
    Conflict(String),

    #[display(fmt = "Invalid credentials. Please check your email and password and login role")]
    InvalidCredentials,

    #[display(fmt = "Invalid or expired OTP")]
    InvalidOrExpiredOtp,

    #[display(fmt = "Only PDF attachment allowed, got: {}", _0)]
    UnsupportedFileType(String),

    #[display(fmt = "Could not store file. Error: {}", _0)]
    Storage(String),

    #[display(fmt = "Failed to generate payslip document: {}", _0)]
    Generation(String),

    #[display(fmt = "Failed to send mail: {}", _0)]
    Mail(String),

    #[display(fmt = "Internal Server Error")]
    Database(String),
}

impl ApiError {
    pub fn not_found(entity: &str, id: impl std::fmt::Display) -> Self {
        ApiError::NotFound(format!("{} not found with id: {}", entity, id))
    }
}

impl ResponseError for ApiError {
    fn status_code(&self) -> StatusCode {
        match self {
            ApiError::NotFound(_) => StatusCode::NOT_FOUND,
            ApiError::Conflict(_) => StatusCode::CONFLICT,
            ApiError::InvalidCredentials => StatusCode::UNAUTHORIZED,
            ApiError::InvalidOrExpiredOtp => StatusCode::BAD_REQUEST,
            ApiError::UnsupportedFileType(_) => StatusCode::UNSUPPORTED_MEDIA_TYPE,
            ApiError::Storage(_) | ApiError::Generation(_) | ApiError::Mail(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
            ApiError::Database(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        let status = self.status_code();
        HttpResponse::build(status).json(ResponseMessage::<()>::of(status, self.to_string()))
    }
}

impl From<sqlx::Error> for ApiError {
    fn from(e: sqlx::Error) -> Self {
        tracing::error!(error = %e, "Database error");
        ApiError::Database(e.to_string())
    }
}

impl From<std::io::Error> for ApiError {
    fn from(e: std::io::Error) -> Self {
        ApiError::Storage(e.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_codes_follow_the_taxonomy() {
        assert_eq!(
            ApiError::not_found("Employee", 7).status_code(),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            ApiError::Conflict("dup".into()).status_code(),
            StatusCode::CONFLICT
        );
        assert_eq!(
            ApiError::InvalidCredentials.status_code(),
            StatusCode::UNAUTHORIZED
        );
        assert_eq!(
            ApiError::InvalidOrExpiredOtp.status_code(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            ApiError::UnsupportedFileType("image/png".into()).status_code(),
            StatusCode::UNSUPPORTED_MEDIA_TYPE
        );
        assert_eq!(
            ApiError::Storage("disk full".into()).status_code(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn not_found_message_names_the_entity() {
        let e = ApiError::not_found("Payslip", 42);
        assert_eq!(e.to_string(), "Payslip not found with id: 42");
    }
}
