use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use strum_macros::{Display, EnumString};
use utoipa::ToSchema;

/// Applicant lifecycle. OTP_SENT is only ever returned in the apply
/// acknowledgement; rows are persisted once verification succeeds, so the
/// table only holds SUBMITTED applications.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Serialize, Deserialize, Display, EnumString, ToSchema)]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE")]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ApplicationStatus {
    OtpSent,
    Submitted,
}

#[derive(Debug, Serialize, Deserialize, sqlx::FromRow, ToSchema)]
pub struct JobApplication {
    #[schema(example = 1)]
    pub id: u64,
    #[schema(example = 3)]
    pub job_id: u64,

    pub full_name: String,
    #[schema(example = "candidate@mail.com")]
    pub email: String,
    pub phone_number: Option<String>,
    pub linkedin_url: Option<String>,

    pub resume_file_path: Option<String>,
    pub resume_file_name: Option<String>,

    #[schema(value_type = String, format = "date-time")]
    pub applied_at: DateTime<Utc>,

    #[schema(example = "SUBMITTED")]
    pub status: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_tags_match_the_wire_format() {
        assert_eq!(ApplicationStatus::OtpSent.to_string(), "OTP_SENT");
        assert_eq!(ApplicationStatus::Submitted.to_string(), "SUBMITTED");
        assert_eq!(
            "SUBMITTED".parse::<ApplicationStatus>().unwrap(),
            ApplicationStatus::Submitted
        );
    }
}
