use actix_web::error::ErrorBadRequest;
use chrono::NaiveDate;
use serde_json::Value;
use sqlx::MySqlPool;

/// Columns a partial employee update may touch. Identity, credentials and
/// the soft-delete flag have dedicated endpoints and stay out.
pub const EMPLOYEE_UPDATABLE_COLUMNS: &[&str] = &[
    "first_name",
    "last_name",
    "email",
    "mobile",
    "card_number",
    "job_role",
    "domain",
    "gender",
    "joining_date",
    "salary",
    "days_present",
    "paid_leaves",
    "bank_account_number",
    "bank_name",
    "pf_number",
    "pan_number",
    "uan_number",
    "eps_number",
    "esi_number",
];

/// Subset accepted by the bank-details endpoint.
pub const BANK_DETAIL_COLUMNS: &[&str] = &[
    "bank_account_number",
    "bank_name",
    "pf_number",
    "pan_number",
    "uan_number",
    "eps_number",
    "esi_number",
];

#[derive(Debug)]
pub enum SqlValue {
    String(String),
    I64(i64),
    F64(f64),
    Date(NaiveDate),
}

#[derive(Debug)]
pub struct SqlUpdate {
    pub sql: String,
    pub values: Vec<SqlValue>,
}

/// Builds a partial UPDATE for the employees table from a JSON payload.
///
/// Matches the update semantics of the admin/HR dashboards: null and
/// empty-string fields are skipped rather than written, unknown fields are
/// rejected, and soft-deleted rows are never updated.
pub fn build_employee_update(
    payload: &Value,
    employee_id: u64,
    allowed_columns: &[&str],
) -> Result<SqlUpdate, actix_web::Error> {
    let obj = payload
        .as_object()
        .ok_or_else(|| ErrorBadRequest("Payload must be a JSON object"))?;

    let mut columns = Vec::new();
    let mut values = Vec::new();

    for (key, value) in obj {
        if !allowed_columns.contains(&key.as_str()) {
            return Err(ErrorBadRequest(format!("Field cannot be updated: {}", key)));
        }

        match value {
            Value::Null => continue,
            Value::String(s) if s.is_empty() => continue,
            Value::String(s) => {
                if let Ok(d) = NaiveDate::parse_from_str(s, "%Y-%m-%d") {
                    values.push(SqlValue::Date(d));
                } else {
                    values.push(SqlValue::String(s.clone()));
                }
                columns.push(key.as_str());
            }
            Value::Number(n) => {
                if let Some(i) = n.as_i64() {
                    values.push(SqlValue::I64(i));
                } else if let Some(f) = n.as_f64() {
                    values.push(SqlValue::F64(f));
                }
                columns.push(key.as_str());
            }
            _ => return Err(ErrorBadRequest("Unsupported JSON value type")),
        }
    }

    if columns.is_empty() {
        return Err(ErrorBadRequest("No fields provided for update"));
    }

    let set_clause = columns
        .iter()
        .map(|c| format!("{} = ?", c))
        .collect::<Vec<_>>()
        .join(", ");

    let sql = format!(
        "UPDATE employees SET {} WHERE id = ? AND emp_status <> 'inactive'",
        set_clause
    );
    values.push(SqlValue::I64(employee_id as i64));

    Ok(SqlUpdate { sql, values })
}

pub async fn execute_update(pool: &MySqlPool, update: SqlUpdate) -> Result<u64, sqlx::Error> {
    let mut query = sqlx::query(&update.sql);

    for value in update.values {
        query = match value {
            SqlValue::String(v) => query.bind(v),
            SqlValue::I64(v) => query.bind(v),
            SqlValue::F64(v) => query.bind(v),
            SqlValue::Date(v) => query.bind(v),
        };
    }

    let result = query.execute(pool).await?;
    Ok(result.rows_affected())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn builds_update_for_allowed_fields_only() {
        let payload = json!({"first_name": "Jane", "salary": 60000.0});
        let update = build_employee_update(&payload, 7, EMPLOYEE_UPDATABLE_COLUMNS).unwrap();
        assert_eq!(
            update.sql,
            "UPDATE employees SET first_name = ?, salary = ? WHERE id = ? AND emp_status <> 'inactive'"
        );
        assert_eq!(update.values.len(), 3);
    }

    #[test]
    fn rejects_fields_outside_the_allow_list() {
        for payload in [
            json!({"password": "x"}),
            json!({"emp_status": "active"}),
            json!({"login_role": "admin"}),
        ] {
            assert!(build_employee_update(&payload, 7, EMPLOYEE_UPDATABLE_COLUMNS).is_err());
        }
    }

    #[test]
    fn bank_details_reject_non_bank_fields() {
        let payload = json!({"salary": 1.0});
        assert!(build_employee_update(&payload, 7, BANK_DETAIL_COLUMNS).is_err());
    }

    #[test]
    fn null_and_empty_fields_are_skipped() {
        let payload = json!({"first_name": "", "last_name": null, "mobile": "+911234"});
        let update = build_employee_update(&payload, 7, EMPLOYEE_UPDATABLE_COLUMNS).unwrap();
        assert_eq!(
            update.sql,
            "UPDATE employees SET mobile = ? WHERE id = ? AND emp_status <> 'inactive'"
        );
    }

    #[test]
    fn all_skipped_fields_is_an_error() {
        let payload = json!({"first_name": "", "last_name": null});
        assert!(build_employee_update(&payload, 7, EMPLOYEE_UPDATABLE_COLUMNS).is_err());
    }

    #[test]
    fn iso_dates_are_coerced() {
        let payload = json!({"joining_date": "2024-01-01"});
        let update = build_employee_update(&payload, 7, EMPLOYEE_UPDATABLE_COLUMNS).unwrap();
        assert!(matches!(update.values[0], SqlValue::Date(_)));
    }
}
