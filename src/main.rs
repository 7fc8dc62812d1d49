use std::time::Duration;

use actix_cors::Cors;
use actix_files::Files;
use actix_web::middleware::NormalizePath;
use actix_web::web::Data;
use actix_web::{App, HttpServer, Responder, get};
use dotenvy::dotenv;

mod api;
mod auth;
mod config;
mod db;
mod docs;
mod error;
mod mailer;
mod model;
mod models;
mod payslip;
mod routes;
mod utils;

use config::Config;
use db::init_db;
use mailer::Mailer;
use payslip::salary::SalaryPolicy;
use payslip::scheduler;
use utils::applicant_filter;
use utils::otp_store::OtpStore;

use crate::docs::ApiDoc;
use tracing::info;
use tracing_appender::rolling;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

#[get("/")]
async fn index() -> impl Responder {
    "Hello World!"
}

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    dotenv().ok();

    let config = Config::from_env();

    // Rolling daily log
    let file_appender = rolling::daily("logs", "app.log");
    let (non_blocking, _guard) = tracing_appender::non_blocking(file_appender);

    tracing_subscriber::fmt()
        .with_writer(non_blocking)
        .with_max_level(tracing::Level::DEBUG)
        .with_ansi(false)
        .with_target(false) // removes module path
        .with_level(true)
        .with_thread_ids(false)
        .with_thread_names(false)
        .pretty()
        .init();

    info!("Server starting...");

    let pool = init_db(&config.database_url).await;

    let mailer = Data::new(Mailer::from_config(&config).expect("Failed to build mail transport"));
    let otp_store = Data::new(OtpStore::new(Duration::from_secs(config.otp_ttl_secs)));
    let salary_policy = Data::new(SalaryPolicy::default());

    // Warm the applicant-email filter in the background so applyJob gets
    // its fast duplicate check without delaying startup.
    let pool_for_filter_warmup = pool.clone();
    actix_web::rt::spawn(async move {
        if let Err(e) =
            applicant_filter::warmup_applicant_filter(&pool_for_filter_warmup, 100).await
        {
            eprintln!("Failed to warmup applicant email filter: {:?}", e);
        }
    });

    // Monthly payslip batch, 1st of the month at local midnight.
    scheduler::spawn_monthly_payslips(pool.clone(), config.clone());

    let server_addr = config.server_addr.clone();
    let config_data = config.clone();

    HttpServer::new(move || {
        let cors = Cors::default()
            .allowed_origin(&config.cors_allowed_origin)
            .allowed_methods(vec!["GET", "POST", "PUT", "DELETE"])
            .allow_any_header()
            .max_age(3600);

        App::new()
            .wrap(actix_web::middleware::Logger::default())
            .wrap(NormalizePath::trim())
            .wrap(cors)
            .service(
                SwaggerUi::new("/swagger-ui/{_:.*}") // wildcard {_:.*} to match JS/CSS files
                    .url("/api-doc/openapi.json", ApiDoc::openapi()),
            )
            .app_data(Data::new(pool.clone()))
            .app_data(Data::new(config.clone()))
            .app_data(mailer.clone())
            .app_data(otp_store.clone())
            .app_data(salary_policy.clone())
            .service(index)
            // Task attachments served back as static paths
            .service(Files::new("/uploads/tasks", config.upload_dir.clone()))
            // auth + career + protected routes with rate limiting
            .configure(|cfg| routes::configure(cfg, config_data.clone()))
    })
    .bind(server_addr)?
    .run()
    .await
}
