use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use strum_macros::{Display, EnumString};
use utoipa::ToSchema;

/// Stages of an assigned task.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Serialize, Deserialize, Display, EnumString, ToSchema)]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE")]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum WorkStatus {
    /// Task given by admin.
    Assigned,
    /// Employee has started working on the task.
    InProgress,
    /// Work finished but the report is not submitted yet.
    Completed,
    /// Final report submitted.
    Reported,
}

#[derive(Debug, Serialize, Deserialize, sqlx::FromRow, ToSchema)]
pub struct Work {
    #[schema(example = 1)]
    pub id: u64,
    #[schema(example = 1001)]
    pub employee_id: u64,

    pub title: String,
    pub description: String,

    #[schema(value_type = String, format = "date")]
    pub assigned_date: NaiveDate,
    #[schema(value_type = String, format = "date", nullable = true)]
    pub due_date: Option<NaiveDate>,
    #[schema(value_type = String, format = "date", nullable = true)]
    pub submitted_date: Option<NaiveDate>,

    #[schema(example = "ASSIGNED")]
    pub status: String,

    pub report_details: Option<String>,

    /// Static path of the assignment attachment, when one was uploaded.
    pub attachment_url: Option<String>,
    /// Static path of the submitted report attachment.
    pub report_attachment_url: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_parses_the_persisted_tags() {
        assert_eq!("ASSIGNED".parse::<WorkStatus>().unwrap(), WorkStatus::Assigned);
        assert_eq!(
            "IN_PROGRESS".parse::<WorkStatus>().unwrap(),
            WorkStatus::InProgress
        );
        assert_eq!(WorkStatus::Reported.to_string(), "REPORTED");
        assert!("DONE".parse::<WorkStatus>().is_err());
    }
}
