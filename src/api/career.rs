use actix_web::{HttpResponse, web};
use chrono::{Local, Utc};
use serde::{Deserialize, Serialize};
use sqlx::MySqlPool;
use tracing::info;
use utoipa::ToSchema;

use crate::error::ApiError;
use crate::mailer::Mailer;
use crate::model::job::Job;
use crate::model::job_application::ApplicationStatus;
use crate::models::ResponseMessage;
use crate::utils::applicant_filter;
use crate::utils::otp_store::OtpStore;

#[derive(Deserialize, ToSchema)]
pub struct AddJobApplicationRequest {
    #[schema(example = 1)]
    pub job_id: u64,
    #[schema(example = "Priya Sharma")]
    pub full_name: String,
    #[schema(example = "candidate@mail.com", format = "email", value_type = String)]
    pub email: String,
    pub phone_number: Option<String>,
    pub linkedin_url: Option<String>,
    /// Resume already uploaded by the frontend; only the reference travels.
    pub resume_file_path: Option<String>,
    pub resume_file_name: Option<String>,
}

#[derive(Deserialize, ToSchema)]
pub struct OtpVerificationRequest {
    #[schema(example = "candidate@mail.com", format = "email", value_type = String)]
    pub email: String,
    #[schema(example = "042137")]
    pub otp: String,
    #[schema(example = 1)]
    pub job_id: u64,
    pub full_name: String,
    pub phone_number: Option<String>,
    pub linkedin_url: Option<String>,
    pub resume_file_path: Option<String>,
    pub resume_file_name: Option<String>,
}

#[derive(Serialize)]
struct ApplyAck {
    email: String,
    full_name: String,
    status: ApplicationStatus,
}

async fn fetch_job(pool: &MySqlPool, job_id: u64) -> Result<Job, ApiError> {
    sqlx::query_as::<_, Job>("SELECT * FROM jobs WHERE id = ?")
        .bind(job_id)
        .fetch_optional(pool)
        .await?
        .ok_or_else(|| ApiError::not_found("Job", job_id))
}

/// One application per email, system-wide. The cuckoo filter answers the
/// common negative case without touching the database; a hit still goes to
/// the authoritative table.
async fn has_existing_application(pool: &MySqlPool, email: &str) -> Result<bool, ApiError> {
    if !applicant_filter::might_have_applied(email) {
        return Ok(false);
    }
    let exists = sqlx::query_scalar::<_, bool>(
        "SELECT EXISTS(SELECT 1 FROM job_applications WHERE email = ? LIMIT 1)",
    )
    .bind(email.trim().to_lowercase())
    .fetch_one(pool)
    .await?;
    Ok(exists)
}

/// Job details for the public career page.
#[utoipa::path(
    get,
    path = "/career/job/{job_id}",
    params(("job_id", Path, description = "Job ID")),
    responses(
        (status = 200, description = "Job details", body = Object, example = json!({
            "statusCode": 200,
            "status": "OK",
            "message": "Job fetched successfully",
            "data": {"id": 1, "title": "Java Backend Developer", "is_active": true}
        })),
        (status = 404, description = "Job not found")
    ),
    tag = "Career"
)]
pub async fn get_job(
    pool: web::Data<MySqlPool>,
    path: web::Path<u64>,
) -> actix_web::Result<HttpResponse> {
    let job = fetch_job(pool.get_ref(), path.into_inner()).await?;
    let view = job.into_view(Local::now().date_naive());

    Ok(HttpResponse::Ok().json(ResponseMessage::ok("Job fetched successfully", view)))
}

/// Step 1 of the application: issue an OTP to the candidate's email.
/// Nothing is persisted yet; re-applying replaces the pending code.
#[utoipa::path(
    post,
    path = "/career/applyJob",
    request_body = AddJobApplicationRequest,
    responses(
        (status = 200, description = "OTP sent", body = Object, example = json!({
            "statusCode": 200,
            "status": "OK",
            "message": "OTP sent successfully to your registered email.",
            "data": {"email": "candidate@mail.com", "status": "OTP_SENT"}
        })),
        (status = 404, description = "Job not found"),
        (status = 409, description = "An application already exists for this email")
    ),
    tag = "Career"
)]
pub async fn apply_for_job(
    pool: web::Data<MySqlPool>,
    otp_store: web::Data<OtpStore>,
    mailer: web::Data<Mailer>,
    payload: web::Json<AddJobApplicationRequest>,
) -> actix_web::Result<HttpResponse> {
    fetch_job(pool.get_ref(), payload.job_id).await?;

    if has_existing_application(pool.get_ref(), &payload.email).await? {
        return Err(ApiError::Conflict(format!(
            "An application already exists for email: {}",
            payload.email
        ))
        .into());
    }

    let code = otp_store.issue(&payload.email).await;
    mailer.send_otp_email(&payload.email, &code).await?;

    info!(job_id = payload.job_id, "Application OTP issued");

    Ok(HttpResponse::Ok().json(ResponseMessage::ok(
        "OTP sent successfully to your registered email.",
        ApplyAck {
            email: payload.email.clone(),
            full_name: payload.full_name.clone(),
            status: ApplicationStatus::OtpSent,
        },
    )))
}

/// Step 2: verify the OTP and persist the application.
#[utoipa::path(
    post,
    path = "/career/verifyOtp",
    request_body = OtpVerificationRequest,
    responses(
        (status = 200, description = "Application submitted", body = Object, example = json!({
            "statusCode": 200,
            "status": "OK",
            "message": "Your application has been submitted successfully."
        })),
        (status = 400, description = "Invalid or expired OTP"),
        (status = 404, description = "Job not found")
    ),
    tag = "Career"
)]
pub async fn verify_otp(
    pool: web::Data<MySqlPool>,
    otp_store: web::Data<OtpStore>,
    mailer: web::Data<Mailer>,
    payload: web::Json<OtpVerificationRequest>,
) -> actix_web::Result<HttpResponse> {
    if !otp_store.consume_if_match(&payload.email, &payload.otp).await {
        return Err(ApiError::InvalidOrExpiredOtp.into());
    }

    let job = fetch_job(pool.get_ref(), payload.job_id).await?;
    let email = payload.email.trim().to_lowercase();

    sqlx::query(
        r#"
        INSERT INTO job_applications
            (job_id, full_name, email, phone_number, linkedin_url,
             resume_file_path, resume_file_name, applied_at, status)
        VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?)
        "#,
    )
    .bind(payload.job_id)
    .bind(&payload.full_name)
    .bind(&email)
    .bind(&payload.phone_number)
    .bind(&payload.linkedin_url)
    .bind(&payload.resume_file_path)
    .bind(&payload.resume_file_name)
    .bind(Utc::now())
    .bind(ApplicationStatus::Submitted.to_string())
    .execute(pool.get_ref())
    .await
    .map_err(ApiError::from)?;

    applicant_filter::insert(&email);

    mailer
        .send_confirmation_email(&payload.email, &payload.full_name, &job.title)
        .await?;

    info!(job_id = payload.job_id, "Job application submitted");

    Ok(HttpResponse::Ok().json(ResponseMessage::<()>::of(
        actix_web::http::StatusCode::OK,
        "Your application has been submitted successfully.",
    )))
}
