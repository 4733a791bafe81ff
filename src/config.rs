use dotenvy::dotenv;
use std::env;

#[derive(Clone)]
pub struct Config {
    pub server_addr: String,

    // Attendance source: a CSV export path or a MySQL connection string.
    pub csv_source_path: Option<String>,
    pub database_url: Option<String>,
    pub attendance_table: String,

    /// Freshness window: how long a fetched batch stays served from cache.
    pub cache_ttl_secs: u64,

    // Rate limiting
    pub rate_report_per_min: u32,

    pub api_prefix: String,
}

impl Config {
    pub fn from_env() -> Self {
        dotenv().ok();

        Self {
            server_addr: env::var("SERVER_ADDR").expect("SERVER_ADDR must be set"),
            csv_source_path: env::var("CSV_SOURCE_PATH").ok(),
            database_url: env::var("DATABASE_URL").ok(),
            attendance_table: env::var("ATTENDANCE_TABLE")
                .unwrap_or_else(|_| "attendance_log".to_string()),
            cache_ttl_secs: env::var("CACHE_TTL_SECS")
                .unwrap_or_else(|_| "300".to_string()) // default 5 min, same as the sheet dashboard
                .parse()
                .unwrap(),
            rate_report_per_min: env::var("RATE_REPORT_PER_MIN")
                .unwrap_or_else(|_| "120".to_string())
                .parse()
                .unwrap(),
            api_prefix: env::var("API_PREFIX").unwrap_or_else(|_| "/api".to_string()),
        }
    }
}
