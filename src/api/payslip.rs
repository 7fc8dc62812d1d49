use actix_web::http::header::{ContentDisposition, DispositionParam, DispositionType};
use actix_web::{HttpResponse, web};
use serde::Deserialize;
use sqlx::MySqlPool;
use utoipa::ToSchema;

use crate::auth::auth::AuthUser;
use crate::config::Config;
use crate::error::ApiError;
use crate::models::ResponseMessage;
use crate::payslip::salary::SalaryPolicy;
use crate::payslip::{scheduler, store};

#[derive(Deserialize, ToSchema)]
pub struct GeneratePayslipRequest {
    #[schema(example = 1001)]
    pub employee_id: u64,
    /// Pay cycle label, e.g. "August 2025". Not validated for uniqueness.
    #[schema(example = "August 2025")]
    pub month_year: String,
}

/// Generate a payslip for one employee and month.
#[utoipa::path(
    post,
    path = "/api/payslip/generate",
    request_body = GeneratePayslipRequest,
    responses(
        (status = 200, description = "Payslip generated", body = Object, example = json!({
            "statusCode": 200,
            "status": "OK",
            "message": "Payslip generated successfully",
            "data": {"id": 1, "payslip_month": "August 2025", "net_salary": "46620.00"}
        })),
        (status = 404, description = "Employee not found"),
        (status = 500, description = "Storage or PDF generation failure"),
        (status = 401), (status = 403)
    ),
    security(("bearer_auth" = [])),
    tag = "Payslip"
)]
pub async fn generate_payslip(
    auth: AuthUser,
    pool: web::Data<MySqlPool>,
    config: web::Data<Config>,
    policy: web::Data<SalaryPolicy>,
    payload: web::Json<GeneratePayslipRequest>,
) -> actix_web::Result<HttpResponse> {
    auth.require_self_or_hr_admin(payload.employee_id)?;

    let payslip = store::generate(
        pool.get_ref(),
        config.get_ref(),
        policy.get_ref(),
        payload.employee_id,
        &payload.month_year,
    )
    .await?;

    Ok(HttpResponse::Ok().json(ResponseMessage::ok("Payslip generated successfully", payslip)))
}

/// Manual trigger of the monthly batch (also runs on the 1st automatically).
#[utoipa::path(
    post,
    path = "/api/payslip/generate-all",
    responses(
        (status = 200, description = "Batch complete", body = Object, example = json!({
            "statusCode": 200,
            "status": "OK",
            "message": "Payslips generated for all employees",
            "data": {"generated": 12, "failed": 0}
        })),
        (status = 401), (status = 403)
    ),
    security(("bearer_auth" = [])),
    tag = "Payslip"
)]
pub async fn generate_all_payslips(
    auth: AuthUser,
    pool: web::Data<MySqlPool>,
    config: web::Data<Config>,
    policy: web::Data<SalaryPolicy>,
) -> actix_web::Result<HttpResponse> {
    auth.require_admin()?;

    let summary =
        scheduler::run_monthly_batch(pool.get_ref(), config.get_ref(), policy.get_ref()).await;

    Ok(HttpResponse::Ok().json(ResponseMessage::ok(
        "Payslips generated for all employees",
        serde_json::json!({
            "generated": summary.generated.len(),
            "failed": summary.failed.len(),
            "failed_employee_ids": summary.failed,
        }),
    )))
}

/// Download the rendered PDF.
#[utoipa::path(
    get,
    path = "/api/payslip/{payslip_id}/download",
    params(("payslip_id", Path, description = "Payslip ID")),
    responses(
        (status = 200, description = "PDF byte stream", content_type = "application/pdf"),
        (status = 404, description = "Payslip or file not found"),
        (status = 401), (status = 403)
    ),
    security(("bearer_auth" = [])),
    tag = "Payslip"
)]
pub async fn download_payslip(
    auth: AuthUser,
    pool: web::Data<MySqlPool>,
    path: web::Path<u64>,
) -> actix_web::Result<HttpResponse> {
    let payslip_id = path.into_inner();

    let (payslip, bytes) = store::download(pool.get_ref(), payslip_id).await?;
    auth.require_self_or_hr_admin(payslip.employee_id)?;

    let file_name = payslip
        .file_name
        .unwrap_or_else(|| format!("payslip_{}.pdf", payslip_id));

    Ok(HttpResponse::Ok()
        .content_type("application/pdf")
        .insert_header(ContentDisposition {
            disposition: DispositionType::Attachment,
            parameters: vec![DispositionParam::Filename(file_name)],
        })
        .body(bytes))
}

/// All payslips of one employee, newest first.
#[utoipa::path(
    get,
    path = "/api/payslip/employee/{employee_id}",
    params(("employee_id", Path, description = "Employee ID")),
    responses(
        (status = 200, description = "Payslip list", body = Object, example = json!({
            "statusCode": 200,
            "status": "OK",
            "message": "Payslips fetched successfully",
            "data": [{"id": 2, "payslip_month": "August 2025"}]
        })),
        (status = 401), (status = 403)
    ),
    security(("bearer_auth" = [])),
    tag = "Payslip"
)]
pub async fn list_payslips(
    auth: AuthUser,
    pool: web::Data<MySqlPool>,
    path: web::Path<u64>,
) -> actix_web::Result<HttpResponse> {
    let employee_id = path.into_inner();
    auth.require_self_or_hr_admin(employee_id)?;

    let payslips = store::list_for_employee(pool.get_ref(), employee_id).await?;

    Ok(HttpResponse::Ok().json(ResponseMessage::ok("Payslips fetched successfully", payslips)))
}
