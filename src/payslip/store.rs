use std::fs;
use std::path::PathBuf;

use chrono::Local;
use sqlx::MySqlPool;
use tracing::{error, info};

use crate::config::Config;
use crate::error::ApiError;
use crate::model::employee::{self, Visibility};
use crate::model::payslip::Payslip;
use crate::payslip::pdf;
use crate::payslip::salary::SalaryPolicy;

/// "August 2025" -> "August_2025"; periods appear in directory and file
/// names, so spaces are replaced.
pub fn normalize_period(period: &str) -> String {
    period.replace(' ', "_")
}

pub fn payslip_file_name(card_number: &str, period: &str) -> String {
    format!("{}_payslip{}.pdf", card_number, normalize_period(period))
}

pub fn payslip_folder(base_folder: &str, period: &str) -> PathBuf {
    PathBuf::from(base_folder).join(normalize_period(period))
}

/// Generates a payslip for one employee and period: computes the salary
/// breakdown, persists the row, renders the PDF to the period folder and
/// attaches the file name/path to the row.
///
/// Calling this twice for the same employee and period inserts a second
/// row and overwrites the same file on disk; regeneration is deliberate
/// and unguarded.
pub async fn generate(
    pool: &MySqlPool,
    config: &Config,
    policy: &SalaryPolicy,
    employee_id: u64,
    month_year: &str,
) -> Result<Payslip, ApiError> {
    let emp = employee::fetch_employee(pool, employee_id, Visibility::ActiveOnly)
        .await?
        .ok_or_else(|| ApiError::not_found("Employee", employee_id))?;

    let breakdown = policy.compute(emp.salary);
    let generated_date = Local::now().naive_local();

    let result = sqlx::query(
        r#"
        INSERT INTO payslips
            (employee_id, payslip_month, generated_date, location,
             basic, hra, flexi, gross_salary,
             pf_deduction, prof_tax_deduction, total_deductions, net_salary,
             balance, aggrg_deduction, inc_hd_salary, tax_credit)
        VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)
        "#,
    )
    .bind(emp.id)
    .bind(month_year)
    .bind(generated_date)
    .bind(&config.company_location)
    .bind(breakdown.basic)
    .bind(breakdown.hra)
    .bind(breakdown.flexi)
    .bind(breakdown.gross_salary)
    .bind(breakdown.pf_deduction)
    .bind(breakdown.prof_tax_deduction)
    .bind(breakdown.total_deductions)
    .bind(breakdown.net_salary)
    .bind(breakdown.balance)
    .bind(breakdown.aggrg_deduction)
    .bind(breakdown.inc_hd_salary)
    .bind(breakdown.tax_credit)
    .execute(pool)
    .await?;

    let mut payslip = Payslip {
        id: result.last_insert_id(),
        employee_id: emp.id,
        payslip_month: month_year.to_string(),
        generated_date,
        location: config.company_location.clone(),
        basic: breakdown.basic,
        hra: breakdown.hra,
        flexi: breakdown.flexi,
        gross_salary: breakdown.gross_salary,
        pf_deduction: breakdown.pf_deduction,
        prof_tax_deduction: breakdown.prof_tax_deduction,
        total_deductions: breakdown.total_deductions,
        net_salary: breakdown.net_salary,
        balance: breakdown.balance,
        aggrg_deduction: breakdown.aggrg_deduction,
        inc_hd_salary: breakdown.inc_hd_salary,
        tax_credit: breakdown.tax_credit,
        file_name: None,
        pdf_path: None,
    };

    let bytes = pdf::render_payslip(&config.company_name, &config.company_logo_path, &emp, &payslip)
        .map_err(|e| {
            error!(employee_id = emp.id, error = %e, "Payslip PDF build failed");
            ApiError::Generation(e.to_string())
        })?;

    let folder = payslip_folder(&config.payslip_base_folder, month_year);
    fs::create_dir_all(&folder)?;

    let file_name = payslip_file_name(&emp.card_number, month_year);
    let full_path = folder.join(&file_name);
    fs::write(&full_path, &bytes)?;

    let pdf_path = full_path.to_string_lossy().into_owned();
    sqlx::query("UPDATE payslips SET file_name = ?, pdf_path = ? WHERE id = ?")
        .bind(&file_name)
        .bind(&pdf_path)
        .bind(payslip.id)
        .execute(pool)
        .await?;

    payslip.file_name = Some(file_name);
    payslip.pdf_path = Some(pdf_path);

    info!(
        employee_id = emp.id,
        payslip_id = payslip.id,
        month = month_year,
        "Payslip generated"
    );

    Ok(payslip)
}

/// Raw bytes of the stored document. Missing row, missing path and a
/// missing file on disk all surface as NotFound.
pub async fn download(pool: &MySqlPool, payslip_id: u64) -> Result<(Payslip, Vec<u8>), ApiError> {
    let payslip = sqlx::query_as::<_, Payslip>("SELECT * FROM payslips WHERE id = ?")
        .bind(payslip_id)
        .fetch_optional(pool)
        .await?
        .ok_or_else(|| ApiError::not_found("Payslip", payslip_id))?;

    let path = payslip
        .pdf_path
        .clone()
        .ok_or_else(|| ApiError::NotFound("Payslip file has not been generated".to_string()))?;

    let bytes = fs::read(&path).map_err(|e| {
        error!(payslip_id, path = %path, error = %e, "Payslip file unreadable");
        ApiError::NotFound("Payslip file not found".to_string())
    })?;

    Ok((payslip, bytes))
}

/// Newest first; generation timestamp is the explicit order, id breaks ties
/// between payslips generated in the same instant.
pub async fn list_for_employee(
    pool: &MySqlPool,
    employee_id: u64,
) -> Result<Vec<Payslip>, ApiError> {
    let payslips = sqlx::query_as::<_, Payslip>(
        "SELECT * FROM payslips WHERE employee_id = ? ORDER BY generated_date DESC, id DESC",
    )
    .bind(employee_id)
    .fetch_all(pool)
    .await?;
    Ok(payslips)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn period_normalization_replaces_spaces() {
        assert_eq!(normalize_period("August 2025"), "August_2025");
        assert_eq!(normalize_period("August_2025"), "August_2025");
    }

    #[test]
    fn file_name_combines_card_number_and_period() {
        assert_eq!(
            payslip_file_name("NEB-1001", "August 2025"),
            "NEB-1001_payslipAugust_2025.pdf"
        );
    }

    #[test]
    fn folder_is_partitioned_by_period() {
        let folder = payslip_folder("payslips", "August 2025");
        assert_eq!(folder, PathBuf::from("payslips/August_2025"));
    }

    #[test]
    fn regeneration_targets_the_same_file() {
        // Two generations for one employee+period resolve to one path; the
        // second run overwrites the first document.
        let a = payslip_folder("base", "August 2025").join(payslip_file_name("NEB-1", "August 2025"));
        let b = payslip_folder("base", "August 2025").join(payslip_file_name("NEB-1", "August 2025"));
        assert_eq!(a, b);
    }
}
