use crate::auth::jwt::JwtConfig;

/// Server configuration loaded from environment variables.
///
/// All fields except the secrets have sensible defaults suitable for local
/// development. In production, override via environment variables.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Bind address (default: `0.0.0.0`).
    pub host: String,
    /// Bind port (default: `3000`).
    pub port: u16,
    /// Allowed CORS origins, parsed from comma-separated `CORS_ORIGINS` env var.
    pub cors_origins: Vec<String>,
    /// HTTP request timeout in seconds (default: `30`).
    pub request_timeout_secs: u64,
    /// JWT token configuration (secret, expiry durations).
    pub jwt: JwtConfig,
    /// AES-256-GCM key for the reversible member-password store.
    pub password_encryption_key: [u8; 32],
}

impl ServerConfig {
    /// Load configuration from environment variables with defaults.
    ///
    /// | Env Var                   | Required | Default                 |
    /// |---------------------------|----------|-------------------------|
    /// | `HOST`                    | no       | `0.0.0.0`               |
    /// | `PORT`                    | no       | `3000`                  |
    /// | `CORS_ORIGINS`            | no       | `http://localhost:3001` |
    /// | `REQUEST_TIMEOUT_SECS`    | no       | `30`                    |
    /// | `JWT_SECRET`              | **yes**  | --                      |
    /// | `PASSWORD_ENCRYPTION_KEY` | **yes**  | -- (base64, 32 bytes)   |
    ///
    /// # Panics
    ///
    /// Panics on missing secrets or unparseable values, so misconfiguration
    /// fails fast at startup.
    pub fn from_env() -> Self {
        let host = std::env::var("HOST").unwrap_or_else(|_| "0.0.0.0".into());

        let port: u16 = std::env::var("PORT")
            .unwrap_or_else(|_| "3000".into())
            .parse()
            .expect("PORT must be a valid u16");

        let cors_origins: Vec<String> = std::env::var("CORS_ORIGINS")
            .unwrap_or_else(|_| "http://localhost:3001".into())
            .split(',')
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect();

        let request_timeout_secs: u64 = std::env::var("REQUEST_TIMEOUT_SECS")
            .unwrap_or_else(|_| "30".into())
            .parse()
            .expect("REQUEST_TIMEOUT_SECS must be a valid u64");

        let jwt = JwtConfig::from_env();

        let password_encryption_key = std::env::var("PASSWORD_ENCRYPTION_KEY")
            .expect("PASSWORD_ENCRYPTION_KEY must be set in the environment");
        let password_encryption_key =
            taskdeck_core::crypto::key_from_base64(&password_encryption_key)
                .expect("PASSWORD_ENCRYPTION_KEY must be base64-encoded 32 bytes");

        Self {
            host,
            port,
            cors_origins,
            request_timeout_secs,
            jwt,
            password_encryption_key,
        }
    }
}
