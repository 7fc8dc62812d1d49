use std::fs;
use std::path::Path;

use actix_multipart::form::{MultipartForm, json::Json as MpJson, tempfile::TempFile, text::Text};
use actix_web::{HttpResponse, web};
use chrono::{Local, NaiveDate, Utc};
use serde::Deserialize;
use sqlx::MySqlPool;
use tracing::error;
use utoipa::ToSchema;

use crate::auth::auth::AuthUser;
use crate::config::Config;
use crate::error::ApiError;
use crate::model::employee::{self, Visibility};
use crate::model::work::{Work, WorkStatus};
use crate::models::ResponseMessage;

#[derive(Deserialize, ToSchema)]
pub struct AddWorkRequest {
    #[schema(example = "Implement export endpoint")]
    pub title: String,
    pub description: String,
    #[schema(example = "2025-08-20", format = "date", value_type = String)]
    pub due_date: Option<NaiveDate>,
    #[schema(example = 1001)]
    pub employee_id: u64,
}

/// `work` carries the JSON payload, `file` an optional PDF brief.
#[derive(MultipartForm)]
pub struct AddWorkForm {
    pub work: MpJson<AddWorkRequest>,
    #[multipart(limit = "10MB")]
    pub file: Option<TempFile>,
}

#[derive(MultipartForm)]
pub struct SubmitReportForm {
    pub status: Text<String>,
    pub report_details: Text<String>,
    #[multipart(limit = "10MB")]
    pub report_attachment: Option<TempFile>,
}

/// Attachments are PDF-only; everything else is rejected before any row
/// is touched.
fn ensure_pdf(content_type: Option<&str>) -> Result<(), ApiError> {
    match content_type {
        Some("application/pdf") => Ok(()),
        other => Err(ApiError::UnsupportedFileType(
            other.unwrap_or("unknown").to_string(),
        )),
    }
}

/// Copies a validated upload into the task attachment directory and
/// returns the static path it will be served from.
fn save_attachment(upload_dir: &str, file: &TempFile) -> Result<String, ApiError> {
    fs::create_dir_all(upload_dir)?;

    let original = file
        .file_name
        .as_deref()
        .and_then(|n| Path::new(n).file_name())
        .and_then(|n| n.to_str())
        .unwrap_or("attachment.pdf");
    let file_name = format!("{}_{}", Utc::now().timestamp_millis(), original);

    let dest = Path::new(upload_dir).join(&file_name);
    fs::copy(file.file.path(), &dest)?;

    Ok(format!("/uploads/tasks/{}", file_name))
}

/// Assign a task to an employee, optionally with a PDF brief.
#[utoipa::path(
    post,
    path = "/api/work",
    request_body(content = Object, content_type = "multipart/form-data"),
    responses(
        (status = 201, description = "Task assigned", body = Object, example = json!({
            "statusCode": 201,
            "status": "CREATED",
            "message": "Task Assigned Successfully",
            "data": {"id": 1, "status": "ASSIGNED"}
        })),
        (status = 404, description = "Employee not found"),
        (status = 415, description = "Non-PDF attachment"),
        (status = 401), (status = 403)
    ),
    security(("bearer_auth" = [])),
    tag = "Work"
)]
pub async fn assign_work(
    auth: AuthUser,
    pool: web::Data<MySqlPool>,
    config: web::Data<Config>,
    MultipartForm(form): MultipartForm<AddWorkForm>,
) -> actix_web::Result<HttpResponse> {
    auth.require_hr_or_admin()?;
    let request = form.work.into_inner();

    let emp = employee::fetch_employee(pool.get_ref(), request.employee_id, Visibility::ActiveOnly)
        .await
        .map_err(ApiError::from)?
        .ok_or_else(|| ApiError::not_found("Employee", request.employee_id))?;

    // Validate and store the attachment before inserting the row, so a bad
    // upload leaves no half-assigned task behind.
    let attachment_url = match &form.file {
        Some(file) => {
            ensure_pdf(file.content_type.as_ref().map(|m| m.essence_str()))?;
            Some(save_attachment(&config.upload_dir, file).map_err(|e| {
                error!(employee_id = emp.id, error = %e, "Failed to store task attachment");
                e
            })?)
        }
        None => None,
    };

    let result = sqlx::query(
        r#"
        INSERT INTO works
            (employee_id, title, description, assigned_date, due_date, status, attachment_url)
        VALUES (?, ?, ?, ?, ?, ?, ?)
        "#,
    )
    .bind(emp.id)
    .bind(&request.title)
    .bind(&request.description)
    .bind(Local::now().date_naive())
    .bind(request.due_date)
    .bind(WorkStatus::Assigned.to_string())
    .bind(&attachment_url)
    .execute(pool.get_ref())
    .await
    .map_err(ApiError::from)?;

    let work = sqlx::query_as::<_, Work>("SELECT * FROM works WHERE id = ?")
        .bind(result.last_insert_id())
        .fetch_one(pool.get_ref())
        .await
        .map_err(ApiError::from)?;

    Ok(HttpResponse::Created().json(ResponseMessage::created("Task Assigned Successfully", work)))
}

/// Tasks of one employee, newest assignment first.
#[utoipa::path(
    get,
    path = "/api/work/employee/{employee_id}",
    params(("employee_id", Path, description = "Employee ID")),
    responses(
        (status = 200, description = "Task list", body = Object, example = json!({
            "statusCode": 200,
            "status": "OK",
            "message": "Tasks fetched successfully",
            "data": [{"id": 1, "title": "Implement export endpoint"}]
        })),
        (status = 401), (status = 403)
    ),
    security(("bearer_auth" = [])),
    tag = "Work"
)]
pub async fn get_works_by_employee(
    auth: AuthUser,
    pool: web::Data<MySqlPool>,
    path: web::Path<u64>,
) -> actix_web::Result<HttpResponse> {
    let employee_id = path.into_inner();
    auth.require_self_or_hr_admin(employee_id)?;

    let works = sqlx::query_as::<_, Work>(
        "SELECT * FROM works WHERE employee_id = ? ORDER BY assigned_date DESC, id DESC",
    )
    .bind(employee_id)
    .fetch_all(pool.get_ref())
    .await
    .map_err(ApiError::from)?;

    Ok(HttpResponse::Ok().json(ResponseMessage::ok("Tasks fetched successfully", works)))
}

/// Submit a task report, optionally with a PDF report attachment.
#[utoipa::path(
    put,
    path = "/api/work/{work_id}/submit",
    params(("work_id", Path, description = "Work ID")),
    request_body(content = Object, content_type = "multipart/form-data"),
    responses(
        (status = 200, description = "Report submitted", body = Object, example = json!({
            "statusCode": 200,
            "status": "OK",
            "message": "Report submitted successfully",
            "data": {"id": 1, "status": "REPORTED"}
        })),
        (status = 400, description = "Unknown work status"),
        (status = 404, description = "Task not found"),
        (status = 415, description = "Non-PDF attachment"),
        (status = 401), (status = 403)
    ),
    security(("bearer_auth" = [])),
    tag = "Work"
)]
pub async fn submit_report(
    auth: AuthUser,
    pool: web::Data<MySqlPool>,
    config: web::Data<Config>,
    path: web::Path<u64>,
    MultipartForm(form): MultipartForm<SubmitReportForm>,
) -> actix_web::Result<HttpResponse> {
    let work_id = path.into_inner();

    let work = sqlx::query_as::<_, Work>("SELECT * FROM works WHERE id = ?")
        .bind(work_id)
        .fetch_optional(pool.get_ref())
        .await
        .map_err(ApiError::from)?
        .ok_or_else(|| ApiError::not_found("Task", work_id))?;

    auth.require_self_or_hr_admin(work.employee_id)?;

    let status: WorkStatus = form
        .status
        .parse()
        .map_err(|_| actix_web::error::ErrorBadRequest("Unknown work status"))?;

    let report_attachment_url = match &form.report_attachment {
        Some(file) => {
            ensure_pdf(file.content_type.as_ref().map(|m| m.essence_str()))?;
            Some(save_attachment(&config.upload_dir, file)?)
        }
        None => work.report_attachment_url.clone(),
    };

    sqlx::query(
        r#"
        UPDATE works
        SET status = ?, report_details = ?, submitted_date = ?, report_attachment_url = ?
        WHERE id = ?
        "#,
    )
    .bind(status.to_string())
    .bind(form.report_details.as_str())
    .bind(Local::now().date_naive())
    .bind(&report_attachment_url)
    .bind(work_id)
    .execute(pool.get_ref())
    .await
    .map_err(ApiError::from)?;

    let updated = sqlx::query_as::<_, Work>("SELECT * FROM works WHERE id = ?")
        .bind(work_id)
        .fetch_one(pool.get_ref())
        .await
        .map_err(ApiError::from)?;

    Ok(HttpResponse::Ok().json(ResponseMessage::ok("Report submitted successfully", updated)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn only_pdf_attachments_pass() {
        assert!(ensure_pdf(Some("application/pdf")).is_ok());
        assert!(matches!(
            ensure_pdf(Some("image/png")),
            Err(ApiError::UnsupportedFileType(_))
        ));
        assert!(matches!(
            ensure_pdf(None),
            Err(ApiError::UnsupportedFileType(_))
        ));
    }
}
