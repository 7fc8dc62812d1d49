use actix_web::{HttpResponse, web};
use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::Deserialize;
use serde_json::Value;
use sqlx::MySqlPool;
use tracing::error;
use utoipa::ToSchema;

use crate::auth::auth::AuthUser;
use crate::auth::password::hash_password;
use crate::error::ApiError;
use crate::model::employee::{self, Visibility};
use crate::model::role::Role;
use crate::models::ResponseMessage;
use crate::utils::db_utils::{
    BANK_DETAIL_COLUMNS, EMPLOYEE_UPDATABLE_COLUMNS, build_employee_update, execute_update,
};

#[derive(Deserialize, ToSchema)]
pub struct CreateEmployee {
    #[schema(example = "John")]
    pub first_name: String,
    #[schema(example = "Doe")]
    pub last_name: Option<String>,
    #[schema(example = "john.doe@company.com", format = "email", value_type = String)]
    pub email: String,
    pub mobile: Option<String>,
    #[schema(example = "NEB-1001")]
    pub card_number: String,
    /// Defaults to "employee"; only admins may create HR accounts.
    #[schema(example = "employee")]
    pub login_role: Option<String>,
    #[schema(example = "developer")]
    pub job_role: Option<String>,
    #[schema(example = "Java")]
    pub domain: Option<String>,
    pub gender: Option<String>,
    #[schema(example = "2024-01-01", format = "date", value_type = String)]
    pub joining_date: Option<NaiveDate>,
    #[schema(example = 50000.0, value_type = f64)]
    pub salary: Decimal,
    pub days_present: Option<i32>,
    pub paid_leaves: Option<i32>,
    pub password: String,

    pub bank_account_number: Option<String>,
    pub bank_name: Option<String>,
    pub pf_number: Option<String>,
    pub pan_number: Option<String>,
    pub uan_number: Option<String>,
    pub eps_number: Option<String>,
    pub esi_number: Option<String>,
}

#[derive(Deserialize, ToSchema)]
pub struct UpdatePassword {
    pub password: String,
}

/// Create Employee (HR) or HR account (admin only)
#[utoipa::path(
    post,
    path = "/api/employee",
    request_body = CreateEmployee,
    responses(
        (status = 201, description = "Employee created", body = Object, example = json!({
            "statusCode": 201,
            "status": "CREATED",
            "message": "Employee registered successfully",
            "data": {"id": 1}
        })),
        (status = 409, description = "Email already registered"),
        (status = 401), (status = 403)
    ),
    security(("bearer_auth" = [])),
    tag = "Employee"
)]
pub async fn create_employee(
    auth: AuthUser,
    pool: web::Data<MySqlPool>,
    payload: web::Json<CreateEmployee>,
) -> actix_web::Result<HttpResponse> {
    auth.require_hr_or_admin()?;

    let login_role = payload
        .login_role
        .clone()
        .unwrap_or_else(|| "employee".to_string());
    if login_role == "hr" {
        auth.require_admin()?;
    }
    if Role::from_tag(&login_role).is_none() || login_role == "admin" {
        return Err(actix_web::error::ErrorBadRequest(
            "login_role must be employee or hr",
        ));
    }

    if employee::email_exists(pool.get_ref(), &payload.email)
        .await
        .map_err(ApiError::from)?
    {
        return Err(ApiError::Conflict(format!(
            "Employee with email {} already exists",
            payload.email
        ))
        .into());
    }

    let hashed = hash_password(&payload.password);

    let result = sqlx::query(
        r#"
        INSERT INTO employees
            (first_name, last_name, email, mobile, card_number,
             login_role, job_role, domain, gender, joining_date,
             salary, days_present, paid_leaves, password,
             bank_account_number, bank_name, pf_number, pan_number,
             uan_number, eps_number, esi_number)
        VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)
        "#,
    )
    .bind(&payload.first_name)
    .bind(&payload.last_name)
    .bind(&payload.email)
    .bind(&payload.mobile)
    .bind(&payload.card_number)
    .bind(&login_role)
    .bind(&payload.job_role)
    .bind(&payload.domain)
    .bind(&payload.gender)
    .bind(payload.joining_date)
    .bind(payload.salary)
    .bind(payload.days_present.unwrap_or(0))
    .bind(payload.paid_leaves.unwrap_or(0))
    .bind(&hashed)
    .bind(&payload.bank_account_number)
    .bind(&payload.bank_name)
    .bind(&payload.pf_number)
    .bind(&payload.pan_number)
    .bind(&payload.uan_number)
    .bind(&payload.eps_number)
    .bind(&payload.esi_number)
    .execute(pool.get_ref())
    .await
    .map_err(|e| {
        error!(error = %e, "Failed to create employee");
        ApiError::from(e)
    })?;

    let created = employee::fetch_employee(
        pool.get_ref(),
        result.last_insert_id(),
        Visibility::ActiveOnly,
    )
    .await
    .map_err(ApiError::from)?;

    Ok(HttpResponse::Created().json(ResponseMessage::created(
        "Employee registered successfully",
        created,
    )))
}

/// Employee list for the caller's dashboard: admins see everyone but other
/// admins, HR additionally does not see HR accounts.
#[utoipa::path(
    get,
    path = "/api/employee",
    responses(
        (status = 200, description = "Employee list", body = Object, example = json!({
            "statusCode": 200,
            "status": "OK",
            "message": "Employees fetched successfully",
            "data": [{"id": 1, "first_name": "John"}]
        })),
        (status = 401), (status = 403)
    ),
    security(("bearer_auth" = [])),
    tag = "Employee"
)]
pub async fn list_employees(
    auth: AuthUser,
    pool: web::Data<MySqlPool>,
) -> actix_web::Result<HttpResponse> {
    auth.require_hr_or_admin()?;

    let excluded: &[&str] = match auth.role {
        Role::Admin => &["admin"],
        _ => &["admin", "hr"],
    };

    let employees = employee::fetch_employees_excluding_roles(pool.get_ref(), excluded)
        .await
        .map_err(ApiError::from)?;

    Ok(HttpResponse::Ok().json(ResponseMessage::ok(
        "Employees fetched successfully",
        employees,
    )))
}

/// Get Employee by ID
#[utoipa::path(
    get,
    path = "/api/employee/{employee_id}",
    params(("employee_id", Path, description = "Employee ID")),
    responses(
        (status = 200, description = "Employee found"),
        (status = 404, description = "Employee not found"),
        (status = 401), (status = 403)
    ),
    security(("bearer_auth" = [])),
    tag = "Employee"
)]
pub async fn get_employee(
    auth: AuthUser,
    pool: web::Data<MySqlPool>,
    path: web::Path<u64>,
) -> actix_web::Result<HttpResponse> {
    let employee_id = path.into_inner();
    auth.require_self_or_hr_admin(employee_id)?;

    let emp = employee::fetch_employee(pool.get_ref(), employee_id, Visibility::ActiveOnly)
        .await
        .map_err(ApiError::from)?
        .ok_or_else(|| ApiError::not_found("Employee", employee_id))?;

    Ok(HttpResponse::Ok().json(ResponseMessage::ok("Employee fetched successfully", emp)))
}

/// Get Employee by email (self-service profile lookup)
#[utoipa::path(
    get,
    path = "/api/employee/by-email/{email}",
    params(("email", Path, description = "Employee email")),
    responses(
        (status = 200, description = "Employee found"),
        (status = 404, description = "Employee not found"),
        (status = 401), (status = 403)
    ),
    security(("bearer_auth" = [])),
    tag = "Employee"
)]
pub async fn get_employee_by_email(
    auth: AuthUser,
    pool: web::Data<MySqlPool>,
    path: web::Path<String>,
) -> actix_web::Result<HttpResponse> {
    let email = path.into_inner();
    if auth.role == Role::Employee && !auth.email.eq_ignore_ascii_case(&email) {
        return Err(actix_web::error::ErrorForbidden("Not your record"));
    }

    let emp = employee::fetch_employee_by_email(pool.get_ref(), &email, Visibility::ActiveOnly)
        .await
        .map_err(ApiError::from)?
        .ok_or_else(|| ApiError::NotFound(format!("Employee not found with email: {}", email)))?;

    Ok(HttpResponse::Ok().json(ResponseMessage::ok("Employee fetched successfully", emp)))
}

/// Update Employee (partial; unknown fields are rejected)
#[utoipa::path(
    put,
    path = "/api/employee/{employee_id}",
    params(("employee_id", Path, description = "Employee ID")),
    request_body = Object,
    responses(
        (status = 200, description = "Employee updated"),
        (status = 404, description = "Employee not found"),
        (status = 401), (status = 403)
    ),
    security(("bearer_auth" = [])),
    tag = "Employee"
)]
pub async fn update_employee(
    auth: AuthUser,
    pool: web::Data<MySqlPool>,
    path: web::Path<u64>,
    body: web::Json<Value>,
) -> actix_web::Result<HttpResponse> {
    auth.require_hr_or_admin()?;
    let employee_id = path.into_inner();

    let update = build_employee_update(&body, employee_id, EMPLOYEE_UPDATABLE_COLUMNS)?;
    let affected = execute_update(pool.get_ref(), update)
        .await
        .map_err(ApiError::from)?;

    if affected == 0 {
        return Err(ApiError::not_found("Employee", employee_id).into());
    }

    let emp = employee::fetch_employee(pool.get_ref(), employee_id, Visibility::ActiveOnly)
        .await
        .map_err(ApiError::from)?;

    Ok(HttpResponse::Ok().json(ResponseMessage::ok("Employee updated successfully", emp)))
}

/// Update bank and statutory details only
#[utoipa::path(
    put,
    path = "/api/employee/{employee_id}/bank-details",
    params(("employee_id", Path, description = "Employee ID")),
    request_body = Object,
    responses(
        (status = 200, description = "Bank details updated"),
        (status = 404, description = "Employee not found"),
        (status = 401), (status = 403)
    ),
    security(("bearer_auth" = [])),
    tag = "Employee"
)]
pub async fn update_bank_details(
    auth: AuthUser,
    pool: web::Data<MySqlPool>,
    path: web::Path<u64>,
    body: web::Json<Value>,
) -> actix_web::Result<HttpResponse> {
    auth.require_hr_or_admin()?;
    let employee_id = path.into_inner();

    let update = build_employee_update(&body, employee_id, BANK_DETAIL_COLUMNS)?;
    let affected = execute_update(pool.get_ref(), update)
        .await
        .map_err(ApiError::from)?;

    if affected == 0 {
        return Err(ApiError::not_found("Employee", employee_id).into());
    }

    let emp = employee::fetch_employee(pool.get_ref(), employee_id, Visibility::ActiveOnly)
        .await
        .map_err(ApiError::from)?;

    Ok(HttpResponse::Ok().json(ResponseMessage::ok("Bank details updated successfully", emp)))
}

/// Update password (self, HR or admin)
#[utoipa::path(
    put,
    path = "/api/employee/{employee_id}/password",
    params(("employee_id", Path, description = "Employee ID")),
    request_body = UpdatePassword,
    responses(
        (status = 200, description = "Password updated"),
        (status = 404, description = "Employee not found"),
        (status = 401), (status = 403)
    ),
    security(("bearer_auth" = [])),
    tag = "Employee"
)]
pub async fn update_password(
    auth: AuthUser,
    pool: web::Data<MySqlPool>,
    path: web::Path<u64>,
    body: web::Json<UpdatePassword>,
) -> actix_web::Result<HttpResponse> {
    let employee_id = path.into_inner();
    auth.require_self_or_hr_admin(employee_id)?;

    let hashed = hash_password(&body.password);

    let result = sqlx::query(
        "UPDATE employees SET password = ? WHERE id = ? AND emp_status <> 'inactive'",
    )
    .bind(&hashed)
    .bind(employee_id)
    .execute(pool.get_ref())
    .await
    .map_err(ApiError::from)?;

    if result.rows_affected() == 0 {
        return Err(ApiError::not_found("Employee", employee_id).into());
    }

    Ok(HttpResponse::Ok().json(ResponseMessage::<()>::of(
        actix_web::http::StatusCode::OK,
        "Password updated successfully",
    )))
}

/// Record attendance: sets the number of days present for the month.
#[utoipa::path(
    put,
    path = "/api/employee/{employee_id}/attendance/{days}",
    params(
        ("employee_id", Path, description = "Employee ID"),
        ("days", Path, description = "Days present")
    ),
    responses(
        (status = 200, description = "Attendance updated"),
        (status = 404, description = "Employee not found"),
        (status = 401), (status = 403)
    ),
    security(("bearer_auth" = [])),
    tag = "Employee"
)]
pub async fn update_attendance(
    auth: AuthUser,
    pool: web::Data<MySqlPool>,
    path: web::Path<(u64, i32)>,
) -> actix_web::Result<HttpResponse> {
    auth.require_hr_or_admin()?;
    let (employee_id, days) = path.into_inner();

    let result = sqlx::query(
        "UPDATE employees SET days_present = ? WHERE id = ? AND emp_status <> 'inactive'",
    )
    .bind(days)
    .bind(employee_id)
    .execute(pool.get_ref())
    .await
    .map_err(ApiError::from)?;

    if result.rows_affected() == 0 {
        return Err(ApiError::not_found("Employee", employee_id).into());
    }

    let emp = employee::fetch_employee(pool.get_ref(), employee_id, Visibility::ActiveOnly)
        .await
        .map_err(ApiError::from)?;

    Ok(HttpResponse::Ok().json(ResponseMessage::ok("Attendance updated successfully", emp)))
}

/// Soft delete: the row stays for payslip/work history but disappears
/// from every active query.
#[utoipa::path(
    delete,
    path = "/api/employee/{employee_id}",
    params(("employee_id", Path, description = "Employee ID")),
    responses(
        (status = 200, description = "Employee deleted"),
        (status = 404, description = "Employee not found"),
        (status = 401), (status = 403)
    ),
    security(("bearer_auth" = [])),
    tag = "Employee"
)]
pub async fn delete_employee(
    auth: AuthUser,
    pool: web::Data<MySqlPool>,
    path: web::Path<u64>,
) -> actix_web::Result<HttpResponse> {
    auth.require_hr_or_admin()?;
    let employee_id = path.into_inner();

    let result = sqlx::query(
        "UPDATE employees SET emp_status = 'inactive' WHERE id = ? AND emp_status <> 'inactive'",
    )
    .bind(employee_id)
    .execute(pool.get_ref())
    .await
    .map_err(|e| {
        error!(error = %e, employee_id, "Failed to delete employee");
        ApiError::from(e)
    })?;

    if result.rows_affected() == 0 {
        return Err(ApiError::not_found("Employee", employee_id).into());
    }

    Ok(HttpResponse::Ok().json(ResponseMessage::<()>::of(
        actix_web::http::StatusCode::OK,
        format!("{} Employee deleted successfully", employee_id),
    )))
}
