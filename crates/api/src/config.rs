use std::path::PathBuf;

use anyhow::Context;

use crate::auth::jwt::JwtConfig;

/// Server configuration loaded from environment variables.
///
/// All fields except the database URL and JWT secret have defaults suitable
/// for local development. In production, override via environment variables.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Bind address (default: `0.0.0.0`).
    pub host: String,
    /// Bind port (default: `3000`).
    pub port: u16,
    /// Public base URL prefixed to upload paths (default: `http://localhost:3000`).
    pub base_url: String,
    /// Allowed CORS origins, parsed from comma-separated `CORS_ORIGINS` env var.
    pub cors_origins: Vec<String>,
    /// HTTP request timeout in seconds (default: `30`).
    pub request_timeout_secs: u64,
    /// JWT token configuration (secret, expiry).
    pub jwt: JwtConfig,
    /// Public read cache settings.
    pub cache: CacheConfig,
    /// Directory uploaded files are written to and served from.
    pub upload_dir: PathBuf,
    /// Maximum accepted multipart body size in bytes.
    pub max_upload_bytes: usize,
    /// Credentials for the first SUPER_ADMIN, created when no user exists.
    pub bootstrap_admin: Option<BootstrapAdmin>,
}

#[derive(Debug, Clone)]
pub struct CacheConfig {
    pub ttl_secs: u64,
    pub max_entries: u64,
}

#[derive(Clone)]
pub struct BootstrapAdmin {
    pub email: String,
    pub password: String,
}

impl std::fmt::Debug for BootstrapAdmin {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BootstrapAdmin")
            .field("email", &self.email)
            .field("password", &"<redacted>")
            .finish()
    }
}

fn env_or(name: &str, default: &str) -> String {
    std::env::var(name).unwrap_or_else(|_| default.into())
}

fn parse_env<T>(name: &str, default: &str) -> anyhow::Result<T>
where
    T: std::str::FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    env_or(name, default)
        .parse()
        .with_context(|| format!("{name} must be a valid number"))
}

impl ServerConfig {
    /// Load configuration from environment variables with defaults.
    ///
    /// | Env Var                    | Default                    |
    /// |----------------------------|----------------------------|
    /// | `HOST`                     | `0.0.0.0`                  |
    /// | `PORT`                     | `3000`                     |
    /// | `BASE_URL`                 | `http://localhost:3000`    |
    /// | `CORS_ORIGINS`             | `http://localhost:5173`    |
    /// | `REQUEST_TIMEOUT_SECS`     | `30`                       |
    /// | `CACHE_TTL_SECS`           | `3600`                     |
    /// | `CACHE_MAX_ENTRIES`        | `10000`                    |
    /// | `UPLOAD_DIR`               | `./uploads`                |
    /// | `MAX_UPLOAD_BYTES`         | `20971520`                 |
    /// | `BOOTSTRAP_ADMIN_EMAIL`    | unset                      |
    /// | `BOOTSTRAP_ADMIN_PASSWORD` | unset                      |
    ///
    /// See [`JwtConfig::from_env`] for the JWT variables.
    pub fn from_env() -> anyhow::Result<Self> {
        let cors_origins: Vec<String> = env_or("CORS_ORIGINS", "http://localhost:5173")
            .split(',')
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect();

        let bootstrap_admin = match (
            std::env::var("BOOTSTRAP_ADMIN_EMAIL"),
            std::env::var("BOOTSTRAP_ADMIN_PASSWORD"),
        ) {
            (Ok(email), Ok(password)) if !email.is_empty() && !password.is_empty() => {
                Some(BootstrapAdmin { email, password })
            }
            _ => None,
        };

        Ok(Self {
            host: env_or("HOST", "0.0.0.0"),
            port: parse_env("PORT", "3000")?,
            base_url: env_or("BASE_URL", "http://localhost:3000")
                .trim_end_matches('/')
                .to_string(),
            cors_origins,
            request_timeout_secs: parse_env("REQUEST_TIMEOUT_SECS", "30")?,
            jwt: JwtConfig::from_env()?,
            cache: CacheConfig {
                ttl_secs: parse_env("CACHE_TTL_SECS", "3600")?,
                max_entries: parse_env("CACHE_MAX_ENTRIES", "10000")?,
            },
            upload_dir: PathBuf::from(env_or("UPLOAD_DIR", "./uploads")),
            max_upload_bytes: parse_env("MAX_UPLOAD_BYTES", "20971520")?,
            bootstrap_admin,
        })
    }
}
