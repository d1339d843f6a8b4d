use std::env;

/// Upper bound for the happiness lookback; one leap year of daily rollups.
pub const MAX_LOOKBACK_DAYS: i64 = 366;

#[derive(Debug, Clone)]
pub struct Config {
    pub database_url: String,
    pub host: String,
    pub port: u16,
    pub frontend_url: String,

    /// HS256 secret of the external auth provider.
    pub auth_jwt_secret: String,
    pub auth_jwt_audience: Option<String>,

    pub ai_service_url: String,
    pub ai_timeout_secs: u64,
    pub ai_model_version: String,

    /// A previous-month rewind is only offered during the first N days of a month.
    pub rewind_window_days: u32,
    pub happiness_lookback_days: i64,
}

impl Config {
    pub fn from_env() -> Self {
        Self {
            database_url: env::var("DATABASE_URL").expect("DATABASE_URL must be set"),
            host: env::var("HOST").unwrap_or_else(|_| "0.0.0.0".into()),
            port: env::var("PORT")
                .unwrap_or_else(|_| "8080".into())
                .parse()
                .expect("PORT must be a number"),
            frontend_url: env::var("FRONTEND_URL")
                .unwrap_or_else(|_| "http://localhost:5173".into()),

            auth_jwt_secret: env::var("AUTH_JWT_SECRET").expect("AUTH_JWT_SECRET must be set"),
            auth_jwt_audience: env::var("AUTH_JWT_AUDIENCE").ok().filter(|s| !s.is_empty()),

            ai_service_url: env::var("AI_SERVICE_URL")
                .unwrap_or_else(|_| "http://localhost:5000".into()),
            ai_timeout_secs: env::var("AI_TIMEOUT_SECS")
                .unwrap_or_else(|_| "30".into())
                .parse()
                .unwrap_or(30),
            ai_model_version: env::var("AI_MODEL_VERSION")
                .unwrap_or_else(|_| "gemini-2.0-flash".into()),

            rewind_window_days: day_count(env::var("REWIND_WINDOW_DAYS").ok(), 5, 31) as u32,
            happiness_lookback_days: day_count(
                env::var("HAPPINESS_LOOKBACK_DAYS").ok(),
                30,
                MAX_LOOKBACK_DAYS,
            ),
        }
    }

    pub fn listen_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

/// Parses a day count, falling back to `default` and clamping into `1..=max`.
fn day_count(raw: Option<String>, default: i64, max: i64) -> i64 {
    raw.and_then(|v| v.trim().parse::<i64>().ok())
        .unwrap_or(default)
        .clamp(1, max)
}
