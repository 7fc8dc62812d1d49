pub mod career;
pub mod employee;
pub mod job;
pub mod payslip;
pub mod work;
