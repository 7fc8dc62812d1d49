pub mod applicant_filter;
pub mod db_utils;
pub mod otp_store;
