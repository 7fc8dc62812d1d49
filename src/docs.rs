use crate::api::career::{AddJobApplicationRequest, OtpVerificationRequest};
use crate::api::employee::{CreateEmployee, UpdatePassword};
use crate::api::job::AddJobRequest;
use crate::api::payslip::GeneratePayslipRequest;
use crate::api::work::AddWorkRequest;
use crate::model::employee::Employee;
use crate::model::job::{Job, JobView};
use crate::model::job_application::{ApplicationStatus, JobApplication};
use crate::model::payslip::Payslip;
use crate::model::work::{Work, WorkStatus};
use crate::models::LoginReqDto;
use utoipa::Modify;
use utoipa::openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme};
use utoipa::{OpenApi, openapi};

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Career & HR Backend API",
        version = "1.0.0",
        description = r#"
## HR and Career Portal Backend

Backend for the admin / HR / employee dashboards and the public career page.

### Key Features
- **Employee Management** — profiles, attendance, bank details, soft delete
- **Task Management** — assignment with PDF briefs, report submission
- **Payslip Generation** — salary breakdown, PDF rendering, monthly batch
- **Career Page** — job postings and OTP-verified applications

### Security
Dashboard endpoints are protected with **JWT Bearer authentication**; the
career page endpoints are public.

### Response Format
All endpoints wrap their payload in `{statusCode, status, message, data}`.

---
Built with **Rust**, **Actix Web**, **SQLx**, and **Utoipa**.
"#,
    ),
    paths(
        crate::auth::handlers::login,

        crate::api::employee::create_employee,
        crate::api::employee::list_employees,
        crate::api::employee::get_employee,
        crate::api::employee::get_employee_by_email,
        crate::api::employee::update_employee,
        crate::api::employee::update_bank_details,
        crate::api::employee::update_password,
        crate::api::employee::update_attendance,
        crate::api::employee::delete_employee,

        crate::api::work::assign_work,
        crate::api::work::get_works_by_employee,
        crate::api::work::submit_report,

        crate::api::payslip::generate_payslip,
        crate::api::payslip::generate_all_payslips,
        crate::api::payslip::download_payslip,
        crate::api::payslip::list_payslips,

        crate::api::job::add_job,
        crate::api::job::list_jobs,

        crate::api::career::get_job,
        crate::api::career::apply_for_job,
        crate::api::career::verify_otp
    ),
    components(
        schemas(
            LoginReqDto,
            CreateEmployee,
            UpdatePassword,
            Employee,
            Payslip,
            GeneratePayslipRequest,
            AddWorkRequest,
            Work,
            WorkStatus,
            AddJobRequest,
            Job,
            JobView,
            JobApplication,
            ApplicationStatus,
            AddJobApplicationRequest,
            OtpVerificationRequest
        )
    ),
    modifiers(&SecurityAddon),
    tags(
        (name = "Auth", description = "Dashboard login"),
        (name = "Employee", description = "Employee management APIs"),
        (name = "Work", description = "Task assignment and reporting APIs"),
        (name = "Payslip", description = "Payslip generation and download APIs"),
        (name = "Job", description = "Job posting APIs"),
        (name = "Career", description = "Public career page APIs"),
    )
)]
pub struct ApiDoc;

struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut openapi::OpenApi) {
        let components = openapi.components.get_or_insert_with(Default::default);
        components.add_security_scheme(
            "bearer_auth",
            SecurityScheme::Http(
                HttpBuilder::new()
                    .scheme(HttpAuthScheme::Bearer)
                    .bearer_format("JWT")
                    .build(),
            ),
        );
    }
}
