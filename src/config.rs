use std::env;
use dotenvy::dotenv;

#[derive(Clone)]
pub struct Config {
    pub database_url: String,
    pub jwt_secret: String,
    pub server_addr: String,
    pub access_token_ttl: usize,

    // Rate limiting
    pub rate_login_per_min: u32,
    pub rate_career_per_min: u32,
    pub rate_protected_per_min: u32,

    pub api_prefix: String,
    pub cors_allowed_origin: String,

    // Payslip generation
    pub payslip_base_folder: String,
    pub company_name: String,
    pub company_location: String,
    pub company_logo_path: String,

    // Task attachments / resumes
    pub upload_dir: String,

    // Mail transport
    pub smtp_host: String,
    pub smtp_port: u16,
    pub smtp_username: String,
    pub smtp_password: String,
    pub mail_from: String,

    /// Seconds a pending application OTP stays valid.
    pub otp_ttl_secs: u64,
}

impl Config {
    pub fn from_env() -> Self {
        dotenv().ok();

        Self {
            server_addr: env::var("SERVER_ADDR").expect("SERVER_ADDR must be set"),
            database_url: env::var("DATABASE_URL").expect("DATABASE_URL must be set"),
            jwt_secret: env::var("JWT_SECRET").expect("JWT_SECRET must be set"),
            access_token_ttl: env::var("ACCESS_TOKEN_TTL")
                .unwrap_or_else(|_| "28800".to_string()) // default 8h, one working day
                .parse()
                .unwrap(),

            rate_login_per_min: env::var("RATE_LOGIN_PER_MIN")
                .unwrap_or_else(|_| "60".to_string())
                .parse()
                .unwrap(),
            rate_career_per_min: env::var("RATE_CAREER_PER_MIN")
                .unwrap_or_else(|_| "30".to_string())
                .parse()
                .unwrap(),
            rate_protected_per_min: env::var("RATE_PROTECTED_PER_MIN")
                .unwrap_or_else(|_| "1000".to_string())
                .parse()
                .unwrap(),

            api_prefix: env::var("API_PREFIX").unwrap_or_else(|_| "/api".to_string()),
            cors_allowed_origin: env::var("CORS_ALLOWED_ORIGIN")
                .unwrap_or_else(|_| "http://localhost:5173".to_string()),

            payslip_base_folder: env::var("PAYSLIP_BASE_FOLDER")
                .unwrap_or_else(|_| "payslips".to_string()),
            company_name: env::var("COMPANY_NAME")
                .unwrap_or_else(|_| "NEBULYTIX TECHNOLOGIES PVT LTD".to_string()),
            company_location: env::var("COMPANY_LOCATION").unwrap_or_else(|_| {
                "FLAT NO 501B,PSR PRIME TOWERS,BESIDE DLF,GACHIBOWLI,500032".to_string()
            }),
            company_logo_path: env::var("COMPANY_LOGO_PATH").unwrap_or_default(),

            upload_dir: env::var("UPLOAD_DIR").unwrap_or_else(|_| "uploads/tasks".to_string()),

            smtp_host: env::var("SMTP_HOST").unwrap_or_else(|_| "smtp.gmail.com".to_string()),
            smtp_port: env::var("SMTP_PORT")
                .unwrap_or_else(|_| "587".to_string())
                .parse()
                .unwrap(),
            smtp_username: env::var("SMTP_USERNAME").unwrap_or_default(),
            smtp_password: env::var("SMTP_PASSWORD").unwrap_or_default(),
            mail_from: env::var("MAIL_FROM")
                .unwrap_or_else(|_| "Neb HR Team <hr@nebulytix.com>".to_string()),

            otp_ttl_secs: env::var("OTP_TTL_SECS")
                .unwrap_or_else(|_| "600".to_string()) // default 10 min
                .parse()
                .unwrap(),
        }
    }
}
