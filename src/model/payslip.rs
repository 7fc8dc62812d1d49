use chrono::NaiveDateTime;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// One generated payslip. The salary breakdown is frozen at generation
/// time; after the PDF is rendered the row is only touched once more, to
/// attach `file_name` / `pdf_path`.
#[derive(Debug, Serialize, Deserialize, sqlx::FromRow, ToSchema)]
pub struct Payslip {
    #[schema(example = 1)]
    pub id: u64,
    #[schema(example = 1001)]
    pub employee_id: u64,

    /// Human-readable pay cycle label, e.g. "August 2025".
    #[schema(example = "August 2025")]
    pub payslip_month: String,

    #[schema(value_type = String, format = "date-time")]
    pub generated_date: NaiveDateTime,

    pub location: String,

    // Earnings
    #[schema(value_type = f64)]
    pub basic: Decimal,
    #[schema(value_type = f64)]
    pub hra: Decimal,
    #[schema(value_type = f64)]
    pub flexi: Decimal,
    #[schema(value_type = f64)]
    pub gross_salary: Decimal,

    // Deductions
    #[schema(value_type = f64)]
    pub pf_deduction: Decimal,
    #[schema(value_type = f64)]
    pub prof_tax_deduction: Decimal,
    #[schema(value_type = f64)]
    pub total_deductions: Decimal,

    #[schema(value_type = f64)]
    pub net_salary: Decimal,

    // Tax / perks display fields
    #[schema(value_type = f64)]
    pub balance: Decimal,
    #[schema(value_type = f64)]
    pub aggrg_deduction: Decimal,
    #[schema(value_type = f64)]
    pub inc_hd_salary: Decimal,
    #[schema(value_type = f64)]
    pub tax_credit: Decimal,

    // Rendered document, attached in the second step of creation.
    pub file_name: Option<String>,
    pub pdf_path: Option<String>,
}
