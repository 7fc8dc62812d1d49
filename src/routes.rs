use crate::{
    api::{career, employee, job, payslip, work},
    auth::{handlers, middleware::auth_middleware},
    config::Config,
};
use actix_governor::{
    Governor, GovernorConfigBuilder, PeerIpKeyExtractor, governor::middleware::NoOpMiddleware,
};
use actix_web::{middleware::from_fn, web};

pub fn configure(cfg: &mut web::ServiceConfig, config: Config) {
    // Helper to build per-route limiter
    fn build_limiter(requests_per_min: u32) -> Governor<PeerIpKeyExtractor, NoOpMiddleware> {
        let per_ms = if requests_per_min == 0 {
            1
        } else {
            60_000 / requests_per_min as u64
        };
        let cfg = GovernorConfigBuilder::default()
            .per_millisecond(per_ms)
            .burst_size(requests_per_min)
            .key_extractor(PeerIpKeyExtractor)
            .finish()
            .unwrap();
        Governor::new(&cfg)
    }

    // Public routes
    cfg.service(
        web::scope("/auth").service(
            web::resource("/login")
                .wrap(build_limiter(config.rate_login_per_min))
                .route(web::post().to(handlers::login)),
        ),
    );

    // Public career page: job details and the OTP-gated application flow
    cfg.service(
        web::scope("/career")
            .service(web::resource("/job/{id}").route(web::get().to(career::get_job)))
            .service(
                web::resource("/applyJob")
                    .wrap(build_limiter(config.rate_career_per_min))
                    .route(web::post().to(career::apply_for_job)),
            )
            .service(
                web::resource("/verifyOtp")
                    .wrap(build_limiter(config.rate_career_per_min))
                    .route(web::post().to(career::verify_otp)),
            ),
    );

    // Protected routes
    cfg.service(
        web::scope(&config.api_prefix)
            .wrap(from_fn(auth_middleware))
            // authentication
            .wrap(build_limiter(config.rate_protected_per_min)) // rate limiting
            .service(
                web::scope("/employee")
                    // /employee
                    .service(
                        web::resource("")
                            .route(web::post().to(employee::create_employee))
                            .route(web::get().to(employee::list_employees)),
                    )
                    // /employee/by-email/{email} (before /{id} so it wins the match)
                    .service(
                        web::resource("/by-email/{email}")
                            .route(web::get().to(employee::get_employee_by_email)),
                    )
                    // /employee/{id}/attendance/{days}
                    .service(
                        web::resource("/{id}/attendance/{days}")
                            .route(web::put().to(employee::update_attendance)),
                    )
                    // /employee/{id}/password
                    .service(
                        web::resource("/{id}/password")
                            .route(web::put().to(employee::update_password)),
                    )
                    // /employee/{id}/bank-details
                    .service(
                        web::resource("/{id}/bank-details")
                            .route(web::put().to(employee::update_bank_details)),
                    )
                    // /employee/{id}
                    .service(
                        web::resource("/{id}")
                            .route(web::put().to(employee::update_employee))
                            .route(web::get().to(employee::get_employee))
                            .route(web::delete().to(employee::delete_employee)),
                    ),
            )
            .service(
                web::scope("/work")
                    // /work
                    .service(web::resource("").route(web::post().to(work::assign_work)))
                    // /work/employee/{id}
                    .service(
                        web::resource("/employee/{id}")
                            .route(web::get().to(work::get_works_by_employee)),
                    )
                    // /work/{id}/submit
                    .service(
                        web::resource("/{id}/submit").route(web::put().to(work::submit_report)),
                    ),
            )
            .service(
                web::scope("/payslip")
                    // /payslip/generate
                    .service(
                        web::resource("/generate")
                            .route(web::post().to(payslip::generate_payslip)),
                    )
                    // /payslip/generate-all (manual batch trigger)
                    .service(
                        web::resource("/generate-all")
                            .route(web::post().to(payslip::generate_all_payslips)),
                    )
                    // /payslip/employee/{id}
                    .service(
                        web::resource("/employee/{id}")
                            .route(web::get().to(payslip::list_payslips)),
                    )
                    // /payslip/{id}/download
                    .service(
                        web::resource("/{id}/download")
                            .route(web::get().to(payslip::download_payslip)),
                    ),
            )
            .service(
                web::scope("/job")
                    // /job
                    .service(
                        web::resource("")
                            .route(web::post().to(job::add_job))
                            .route(web::get().to(job::list_jobs)),
                    ),
            ),
    );
}
