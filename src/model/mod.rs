pub mod employee;
pub mod job;
pub mod job_application;
pub mod payslip;
pub mod role;
pub mod work;
