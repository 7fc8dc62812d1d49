use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::MySqlPool;
use utoipa::ToSchema;

/// Whether soft-deleted rows are visible to a query. Deleting an employee
/// only flips `emp_status` to 'inactive'; historical payslips and work
/// records keep referencing the row.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum Visibility {
    ActiveOnly,
    IncludeInactive,
}

impl Visibility {
    /// SQL fragment appended to a `WHERE` clause.
    pub fn predicate(self) -> &'static str {
        match self {
            Visibility::ActiveOnly => " AND emp_status <> 'inactive'",
            Visibility::IncludeInactive => "",
        }
    }
}

#[derive(Debug, Serialize, Deserialize, sqlx::FromRow, ToSchema)]
#[schema(
    example = json!({
        "id": 1,
        "first_name": "John",
        "last_name": "Doe",
        "email": "john.doe@company.com",
        "mobile": "+919812345678",
        "card_number": "NEB-1001",
        "login_role": "employee",
        "job_role": "developer",
        "domain": "Java",
        "gender": "male",
        "joining_date": "2024-01-01",
        "salary": "50000.00",
        "days_present": 22,
        "paid_leaves": 2,
        "emp_status": "active"
    })
)]
pub struct Employee {
    #[schema(example = 1)]
    pub id: u64,

    pub first_name: String,
    pub last_name: Option<String>,

    #[schema(example = "john.doe@company.com")]
    pub email: String,
    pub mobile: Option<String>,

    /// Company card number, also used in payslip file names.
    #[schema(example = "NEB-1001")]
    pub card_number: String,

    /// admin / hr / employee
    pub login_role: String,
    /// Position, e.g. intern / developer / hr
    pub job_role: Option<String>,
    /// Department, e.g. Java / .Net / Python
    pub domain: Option<String>,
    pub gender: Option<String>,

    #[schema(value_type = String, format = "date", nullable = true)]
    pub joining_date: Option<NaiveDate>,

    #[schema(value_type = f64, example = 50000.0)]
    pub salary: Decimal,

    pub days_present: i32,
    pub paid_leaves: i32,

    #[serde(skip_serializing)]
    #[schema(write_only = true)]
    pub password: String,

    // Bank and tax-related details
    pub bank_account_number: Option<String>,
    pub bank_name: Option<String>,
    pub pf_number: Option<String>,
    pub pan_number: Option<String>,
    pub uan_number: Option<String>,
    pub eps_number: Option<String>,
    pub esi_number: Option<String>,

    #[schema(example = "active")]
    pub emp_status: String,
}

impl Employee {
    pub fn full_name(&self) -> String {
        match self.last_name.as_deref() {
            Some(last) if !last.is_empty() => format!("{} {}", self.first_name, last),
            _ => self.first_name.clone(),
        }
    }
}

pub async fn fetch_employee(
    pool: &MySqlPool,
    id: u64,
    visibility: Visibility,
) -> Result<Option<Employee>, sqlx::Error> {
    let sql = format!(
        "SELECT * FROM employees WHERE id = ?{}",
        visibility.predicate()
    );
    sqlx::query_as::<_, Employee>(&sql)
        .bind(id)
        .fetch_optional(pool)
        .await
}

pub async fn fetch_employee_by_email(
    pool: &MySqlPool,
    email: &str,
    visibility: Visibility,
) -> Result<Option<Employee>, sqlx::Error> {
    let sql = format!(
        "SELECT * FROM employees WHERE email = ?{}",
        visibility.predicate()
    );
    sqlx::query_as::<_, Employee>(&sql)
        .bind(email)
        .fetch_optional(pool)
        .await
}

/// Active employees whose login role is NOT one of `excluded_roles`
/// (the admin list view hides admins, the HR list view hides admins and HR).
pub async fn fetch_employees_excluding_roles(
    pool: &MySqlPool,
    excluded_roles: &[&str],
) -> Result<Vec<Employee>, sqlx::Error> {
    let placeholders = vec!["?"; excluded_roles.len()].join(", ");
    let sql = if excluded_roles.is_empty() {
        format!(
            "SELECT * FROM employees WHERE 1=1{} ORDER BY id",
            Visibility::ActiveOnly.predicate()
        )
    } else {
        format!(
            "SELECT * FROM employees WHERE login_role NOT IN ({}){} ORDER BY id",
            placeholders,
            Visibility::ActiveOnly.predicate()
        )
    };

    let mut query = sqlx::query_as::<_, Employee>(&sql);
    for role in excluded_roles {
        query = query.bind(*role);
    }
    query.fetch_all(pool).await
}

pub async fn email_exists(pool: &MySqlPool, email: &str) -> Result<bool, sqlx::Error> {
    let sql = format!(
        "SELECT EXISTS(SELECT 1 FROM employees WHERE email = ?{} LIMIT 1)",
        Visibility::ActiveOnly.predicate()
    );
    sqlx::query_scalar::<_, bool>(&sql)
        .bind(email)
        .fetch_one(pool)
        .await
}

/// Fully populated employee fixture shared by unit tests across modules.
#[cfg(test)]
pub(crate) fn test_employee() -> Employee {
    Employee {
        id: 1,
        first_name: "John".into(),
        last_name: Some("Doe".into()),
        email: "john.doe@company.com".into(),
        mobile: Some("+919812345678".into()),
        card_number: "NEB-1001".into(),
        login_role: "employee".into(),
        job_role: Some("developer".into()),
        domain: Some("Java".into()),
        gender: Some("male".into()),
        joining_date: NaiveDate::from_ymd_opt(2024, 1, 1),
        salary: Decimal::new(50_000, 0),
        days_present: 22,
        paid_leaves: 2,
        password: "hash".into(),
        bank_account_number: Some("1234567890".into()),
        bank_name: Some("HDFC".into()),
        pf_number: Some("PF123".into()),
        pan_number: Some("PAN123".into()),
        uan_number: Some("UAN123".into()),
        eps_number: Some("EPS123".into()),
        esi_number: Some("ESI123".into()),
        emp_status: "active".into(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn visibility_predicate_excludes_inactive_only_when_asked() {
        assert_eq!(
            Visibility::ActiveOnly.predicate(),
            " AND emp_status <> 'inactive'"
        );
        assert_eq!(Visibility::IncludeInactive.predicate(), "");
    }

    #[test]
    fn full_name_tolerates_missing_last_name() {
        let mut emp = test_employee();
        assert_eq!(emp.full_name(), "John Doe");
        emp.last_name = None;
        assert_eq!(emp.full_name(), "John");
        emp.last_name = Some(String::new());
        assert_eq!(emp.full_name(), "John");
    }
}
