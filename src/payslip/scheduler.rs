use std::future::Future;

use chrono::{Datelike, Local, NaiveDate};
use sqlx::MySqlPool;
use tracing::{error, info, warn};

use crate::config::Config;
use crate::error::ApiError;
use crate::model::employee;
use crate::payslip::salary::SalaryPolicy;
use crate::payslip::store;

/// Payslip period label for a date, e.g. "August 2025".
pub fn month_year_label(date: NaiveDate) -> String {
    date.format("%B %Y").to_string()
}

pub fn first_of_next_month(date: NaiveDate) -> NaiveDate {
    let (year, month) = if date.month() == 12 {
        (date.year() + 1, 1)
    } else {
        (date.year(), date.month() + 1)
    };
    NaiveDate::from_ymd_opt(year, month, 1).unwrap()
}

#[derive(Debug, Default)]
pub struct BatchSummary {
    pub generated: Vec<u64>,
    pub failed: Vec<u64>,
}

/// Runs `generate` for every employee in order. A failure is logged and
/// recorded but never aborts the batch; there is no retry within a run.
pub async fn generate_for_employees<F, Fut>(employee_ids: &[u64], mut generate: F) -> BatchSummary
where
    F: FnMut(u64) -> Fut,
    Fut: Future<Output = Result<(), ApiError>>,
{
    let mut summary = BatchSummary::default();
    for &id in employee_ids {
        match generate(id).await {
            Ok(()) => summary.generated.push(id),
            Err(e) => {
                error!(employee_id = id, error = %e, "Payslip generation failed, continuing batch");
                summary.failed.push(id);
            }
        }
    }
    summary
}

/// One full batch run: every active employee gets a payslip for the
/// current month. Also invoked by the manual generate-all endpoint.
pub async fn run_monthly_batch(
    pool: &MySqlPool,
    config: &Config,
    policy: &SalaryPolicy,
) -> BatchSummary {
    let label = month_year_label(Local::now().date_naive());
    info!(month = %label, "Starting automatic payslip generation");

    let employees = match employee::fetch_employees_excluding_roles(pool, &[]).await {
        Ok(list) => list,
        Err(e) => {
            error!(error = %e, "Failed to list employees for payslip batch");
            return BatchSummary::default();
        }
    };

    if employees.is_empty() {
        warn!("No employees found for payslip generation");
        return BatchSummary::default();
    }

    let ids: Vec<u64> = employees.iter().map(|e| e.id).collect();
    let summary = generate_for_employees(&ids, |id| {
        let label = label.clone();
        async move {
            store::generate(pool, config, policy, id, &label)
                .await
                .map(|_| ())
        }
    })
    .await;

    info!(
        month = %label,
        generated = summary.generated.len(),
        failed = summary.failed.len(),
        "Monthly payslip batch complete"
    );
    summary
}

/// Background task: sleeps until local midnight on the 1st of each month,
/// then runs the batch. Re-triggering in the same month simply generates
/// a fresh set of rows (no duplicate-run guard, matching the manual
/// trigger).
pub fn spawn_monthly_payslips(pool: MySqlPool, config: Config) {
    actix_web::rt::spawn(async move {
        let policy = SalaryPolicy::default();
        loop {
            let now = Local::now();
            let next_run = first_of_next_month(now.date_naive())
                .and_hms_opt(0, 0, 0)
                .unwrap();
            let wait = (next_run - now.naive_local()).to_std().unwrap_or_default();
            info!(next_run = %next_run, "Payslip scheduler sleeping until the 1st of next month");
            actix_web::rt::time::sleep(wait).await;

            run_monthly_batch(&pool, &config, &policy).await;
        }
    });
}

#[cfg(test)]
mod tests {
    use super::*;

    fn day(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn label_is_full_month_name_and_year() {
        assert_eq!(month_year_label(day(2025, 8, 1)), "August 2025");
        assert_eq!(month_year_label(day(2026, 1, 15)), "January 2026");
    }

    #[test]
    fn next_run_rolls_over_the_year() {
        assert_eq!(first_of_next_month(day(2025, 8, 6)), day(2025, 9, 1));
        assert_eq!(first_of_next_month(day(2025, 12, 15)), day(2026, 1, 1));
        assert_eq!(first_of_next_month(day(2025, 1, 1)), day(2025, 2, 1));
    }

    #[actix_web::test]
    async fn one_failure_does_not_abort_the_batch() {
        let summary = generate_for_employees(&[1, 2, 3], |id| async move {
            if id == 2 {
                Err(ApiError::Storage("disk full".to_string()))
            } else {
                Ok(())
            }
        })
        .await;

        assert_eq!(summary.generated, vec![1, 3]);
        assert_eq!(summary.failed, vec![2]);
    }

    #[actix_web::test]
    async fn empty_batch_is_a_no_op() {
        let summary = generate_for_employees(&[], |_| async move { Ok(()) }).await;
        assert!(summary.generated.is_empty());
        assert!(summary.failed.is_empty());
    }
}
