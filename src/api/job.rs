use actix_web::{HttpResponse, web};
use chrono::{Local, NaiveDate};
use serde::Deserialize;
use sqlx::MySqlPool;
use utoipa::ToSchema;

use crate::auth::auth::AuthUser;
use crate::error::ApiError;
use crate::model::job::Job;
use crate::models::ResponseMessage;

#[derive(Deserialize, ToSchema)]
pub struct AddJobRequest {
    #[schema(example = "Java Backend Developer")]
    pub title: String,
    pub description: String,
    /// Omit for an open-ended posting.
    #[schema(example = "2025-09-30", format = "date", value_type = String)]
    pub closing_date: Option<NaiveDate>,
}

/// Publish a job posting on the career page.
#[utoipa::path(
    post,
    path = "/api/job",
    request_body = AddJobRequest,
    responses(
        (status = 201, description = "Job posted", body = Object, example = json!({
            "statusCode": 201,
            "status": "CREATED",
            "message": "Job posted successfully",
            "data": {"id": 1, "title": "Java Backend Developer", "is_active": true}
        })),
        (status = 401), (status = 403)
    ),
    security(("bearer_auth" = [])),
    tag = "Job"
)]
pub async fn add_job(
    auth: AuthUser,
    pool: web::Data<MySqlPool>,
    payload: web::Json<AddJobRequest>,
) -> actix_web::Result<HttpResponse> {
    auth.require_hr_or_admin()?;

    let result = sqlx::query("INSERT INTO jobs (title, description, closing_date) VALUES (?, ?, ?)")
        .bind(&payload.title)
        .bind(&payload.description)
        .bind(payload.closing_date)
        .execute(pool.get_ref())
        .await
        .map_err(ApiError::from)?;

    let job = sqlx::query_as::<_, Job>("SELECT * FROM jobs WHERE id = ?")
        .bind(result.last_insert_id())
        .fetch_one(pool.get_ref())
        .await
        .map_err(ApiError::from)?;

    let view = job.into_view(Local::now().date_naive());
    Ok(HttpResponse::Created().json(ResponseMessage::created("Job posted successfully", view)))
}

/// All postings, with `is_active` projected against today's date.
#[utoipa::path(
    get,
    path = "/api/job",
    responses(
        (status = 200, description = "Job list", body = Object, example = json!({
            "statusCode": 200,
            "status": "OK",
            "message": "Jobs fetched successfully",
            "data": [{"id": 1, "title": "Java Backend Developer", "is_active": true}]
        })),
        (status = 401), (status = 403)
    ),
    security(("bearer_auth" = [])),
    tag = "Job"
)]
pub async fn list_jobs(
    auth: AuthUser,
    pool: web::Data<MySqlPool>,
) -> actix_web::Result<HttpResponse> {
    auth.require_hr_or_admin()?;

    let jobs = sqlx::query_as::<_, Job>("SELECT * FROM jobs ORDER BY id DESC")
        .fetch_all(pool.get_ref())
        .await
        .map_err(ApiError::from)?;

    let today = Local::now().date_naive();
    let views: Vec<_> = jobs.into_iter().map(|j| j.into_view(today)).collect();

    Ok(HttpResponse::Ok().json(ResponseMessage::ok("Jobs fetched successfully", views)))
}
