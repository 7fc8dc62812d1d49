use actix_web::{HttpResponse, web};
use serde::Serialize;
use sqlx::MySqlPool;
use tracing::{debug, info, instrument};

use crate::auth::jwt::generate_access_token;
use crate::auth::password::verify_password;
use crate::config::Config;
use crate::error::ApiError;
use crate::model::employee::{Employee, Visibility};
use crate::models::{LoginReqDto, ResponseMessage};

#[derive(Serialize)]
struct LoginResponse {
    access_token: String,
    employee: Employee,
}

/// Role-aware login for the admin, HR and employee dashboards.
#[utoipa::path(
    post,
    path = "/auth/login",
    request_body = LoginReqDto,
    responses(
        (status = 200, description = "Login successful", body = Object, example = json!({
            "statusCode": 200,
            "status": "OK",
            "message": "Login successful",
            "data": {"access_token": "…", "employee": {"id": 1}}
        })),
        (status = 400, description = "Missing email or password"),
        (status = 401, description = "Invalid credentials")
    ),
    tag = "Auth"
)]
#[instrument(name = "auth_login", skip(pool, config, user), fields(email = %user.email))]
pub async fn login(
    user: web::Json<LoginReqDto>,
    pool: web::Data<MySqlPool>,
    config: web::Data<Config>,
) -> actix_web::Result<HttpResponse> {
    info!("Login request received");

    if user.email.trim().is_empty() || user.password.is_empty() {
        info!("Validation failed: empty email or password");
        return Ok(HttpResponse::BadRequest().json(ResponseMessage::<()>::of(
            actix_web::http::StatusCode::BAD_REQUEST,
            "Email and password are required",
        )));
    }

    debug!("Fetching employee from database");

    let sql = format!(
        "SELECT * FROM employees WHERE email = ? AND login_role = ?{}",
        Visibility::ActiveOnly.predicate()
    );
    let emp = sqlx::query_as::<_, Employee>(&sql)
        .bind(user.email.trim())
        .bind(user.login_role.trim())
        .fetch_optional(pool.get_ref())
        .await
        .map_err(ApiError::from)?;

    let emp = match emp {
        Some(emp) => emp,
        None => {
            info!("Invalid credentials: no matching employee for role");
            return Err(ApiError::InvalidCredentials.into());
        }
    };

    debug!(employee_id = emp.id, "Verifying password");

    if verify_password(&user.password, &emp.password).is_err() {
        info!("Invalid credentials: password mismatch");
        return Err(ApiError::InvalidCredentials.into());
    }

    let access_token = generate_access_token(
        emp.id,
        emp.email.clone(),
        emp.login_role.clone(),
        &config.jwt_secret,
        config.access_token_ttl,
    );

    info!(employee_id = emp.id, "Login successful");

    Ok(HttpResponse::Ok().json(ResponseMessage::ok(
        "Login successful",
        LoginResponse {
            access_token,
            employee: emp,
        },
    )))
}
