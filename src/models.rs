use actix_web::http::StatusCode;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Uniform response envelope used by every endpoint:
/// `{statusCode, status, message, data}`.
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ResponseMessage<T> {
    pub status_code: u16,
    pub status: String,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
}

fn status_label(status: StatusCode) -> String {
    status
        .canonical_reason()
        .unwrap_or("UNKNOWN")
        .to_uppercase()
        .replace(' ', "_")
}

impl<T: Serialize> ResponseMessage<T> {
    pub fn ok(message: impl Into<String>, data: T) -> Self {
        Self {
            status_code: StatusCode::OK.as_u16(),
            status: status_label(StatusCode::OK),
            message: message.into(),
            data: Some(data),
        }
    }

    pub fn created(message: impl Into<String>, data: T) -> Self {
        Self {
            status_code: StatusCode::CREATED.as_u16(),
            status: status_label(StatusCode::CREATED),
            message: message.into(),
            data: Some(data),
        }
    }

    /// Envelope without a payload (errors, plain acknowledgements).
    pub fn of(status: StatusCode, message: impl Into<String>) -> Self {
        Self {
            status_code: status.as_u16(),
            status: status_label(status),
            message: message.into(),
            data: None,
        }
    }
}

#[derive(Deserialize, ToSchema)]
pub struct LoginReqDto {
    #[schema(example = "john.doe@company.com", format = "email", value_type = String)]
    pub email: String,
    pub password: String,
    /// Which dashboard the user logs into: admin, hr or employee.
    #[schema(example = "employee")]
    pub login_role: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct Claims {
    /// Employee row backing this account.
    pub employee_id: u64,
    /// Login email.
    pub sub: String,
    /// Role tag: admin / hr / employee.
    pub role: String,
    pub exp: usize,
    pub jti: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn envelope_serializes_camel_case() {
        let msg = ResponseMessage::ok("Job fetched successfully", serde_json::json!({"id": 1}));
        let v = serde_json::to_value(&msg).unwrap();
        assert_eq!(v["statusCode"], 200);
        assert_eq!(v["status"], "OK");
        assert_eq!(v["message"], "Job fetched successfully");
        assert_eq!(v["data"]["id"], 1);
    }

    #[test]
    fn empty_envelope_omits_data() {
        let msg = ResponseMessage::<()>::of(StatusCode::NOT_FOUND, "Job not found");
        let v = serde_json::to_value(&msg).unwrap();
        assert_eq!(v["statusCode"], 404);
        assert_eq!(v["status"], "NOT_FOUND");
        assert!(v.get("data").is_none());
    }
}
