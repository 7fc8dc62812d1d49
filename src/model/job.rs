use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(Debug, Serialize, Deserialize, sqlx::FromRow, ToSchema)]
pub struct Job {
    #[schema(example = 1)]
    pub id: u64,

    #[schema(example = "Java Backend Developer")]
    pub title: String,
    pub description: String,

    /// Applications close after this date; open-ended when null.
    #[schema(value_type = String, format = "date", nullable = true)]
    pub closing_date: Option<NaiveDate>,
}

/// Job as shown to applicants. `is_active` is a projection recomputed on
/// every read, never written back to the row.
#[derive(Debug, Serialize, ToSchema)]
pub struct JobView {
    pub id: u64,
    pub title: String,
    pub description: String,
    #[schema(value_type = String, format = "date", nullable = true)]
    pub closing_date: Option<NaiveDate>,
    pub is_active: bool,
}

impl Job {
    pub fn is_active_on(&self, today: NaiveDate) -> bool {
        match self.closing_date {
            Some(closing) => closing >= today,
            None => true,
        }
    }

    pub fn into_view(self, today: NaiveDate) -> JobView {
        let is_active = self.is_active_on(today);
        JobView {
            id: self.id,
            title: self.title,
            description: self.description,
            closing_date: self.closing_date,
            is_active,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn job(closing_date: Option<NaiveDate>) -> Job {
        Job {
            id: 1,
            title: "Java Backend Developer".into(),
            description: "Build services".into(),
            closing_date,
        }
    }

    fn day(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn job_closed_yesterday_is_inactive() {
        let today = day(2025, 8, 6);
        assert!(!job(Some(day(2025, 8, 5))).is_active_on(today));
    }

    #[test]
    fn open_ended_job_is_active() {
        assert!(job(None).is_active_on(day(2025, 8, 6)));
    }

    #[test]
    fn job_closing_today_or_later_is_active() {
        let today = day(2025, 8, 6);
        assert!(job(Some(today)).is_active_on(today));
        assert!(job(Some(day(2025, 9, 1))).is_active_on(today));
    }

    #[test]
    fn view_carries_the_projection() {
        let today = day(2025, 8, 6);
        let view = job(Some(day(2025, 1, 1))).into_view(today);
        assert!(!view.is_active);
        assert_eq!(view.title, "Java Backend Developer");
    }
}
