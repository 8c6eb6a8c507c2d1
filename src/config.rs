use dotenv::dotenv;
use once_cell::sync::Lazy;
use std::env;

pub struct Config {
    pub port: u16,
    pub log_level: String,
    pub jwt_secret: String,
    pub bcrypt_cost: u32,
    pub session_ttl_days: i64,
    pub cookie_secure: bool,
    pub client_origin: String,
}

impl std::fmt::Debug for Config {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Config")
            .field("port", &self.port)
            .field("log_level", &self.log_level)
            .field("jwt_secret", &"<redacted>")
            .field("bcrypt_cost", &self.bcrypt_cost)
            .field("session_ttl_days", &self.session_ttl_days)
            .field("cookie_secure", &self.cookie_secure)
            .field("client_origin", &self.client_origin)
            .finish()
    }
}

impl Config {
    fn from_env() -> Self {
        dotenv().ok();

        Self {
            port: env::var("PORT").ok().and_then(|v| v.parse().ok()).unwrap_or(3000),
            log_level: env::var("LOG_LEVEL").unwrap_or_else(|_| "info".to_string()),
            jwt_secret: env::var("JWT_SECRET").unwrap_or_else(|_| "secret".to_string()), // Use a secure secret in production
            bcrypt_cost: env::var("SALT_ROUND")
                .ok()
                .and_then(|v| v.parse().ok())
                .map(clamp_cost)
                .unwrap_or(bcrypt::DEFAULT_COST),
            session_ttl_days: env::var("SESSION_TTL_DAYS")
                .ok()
                .and_then(|v| v.parse().ok())
                .filter(|days| *days > 0)
                .unwrap_or(14),
            cookie_secure: env::var("COOKIE_SECURE")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(true),
            client_origin: env::var("CLIENT_ORIGIN").unwrap_or_else(|_| "http://localhost:5173".to_string()),
        }
    }

    pub fn uses_default_secret(&self) -> bool {
        self.jwt_secret == "secret"
    }
}

/// bcrypt rejects costs outside 4..=31.
fn clamp_cost(cost: u32) -> u32 {
    cost.clamp(4, 31)
}

pub static CONFIG: Lazy<Config> = Lazy::new(Config::from_env);
