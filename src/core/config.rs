use sqlx::postgres::{PgConnectOptions, PgSslMode};
use std::env;
use std::path::PathBuf;
use std::time::Duration;

#[derive(Debug, Clone)]
pub struct Config {
    pub app: AppConfig,
    pub database: DatabaseConfig,
    pub auth: AuthConfig,
    pub storage: StorageConfig,
    pub swagger: SwaggerConfig,
}

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub host: String,
    pub port: u16,
    pub cors_allowed_origins: Vec<String>,
    pub max_request_body_size: usize,
}

#[derive(Debug, Clone)]
pub struct DatabaseConfig {
    pub host: String,
    pub port: u16,
    pub user: String,
    pub password: String,
    pub name: String,
    pub ssl_mode: PgSslMode,
    pub max_connections: u32,
    pub min_connections: u32,
    pub acquire_timeout_secs: u64,
    pub idle_timeout_secs: u64,
    pub max_lifetime_secs: u64,
}

#[derive(Clone, Debug)]
pub struct AuthConfig {
    pub jwt_secret: String,
    pub jwt_expiry: Duration,
    pub jwt_leeway: Duration,
    /// Bootstrap credentials, only used when the admin table is empty
    pub admin_username: String,
    pub admin_password: String,
}

/// On-disk roots for uploaded media
#[derive(Debug, Clone)]
pub struct StorageConfig {
    /// Root of `/data` (editor uploads: images, videos, svg icons)
    pub data_dir: PathBuf,
    /// Root of `/homepage` (homepage gallery images and videos)
    pub homepage_dir: PathBuf,
}

#[derive(Debug, Clone)]
pub struct SwaggerConfig {
    pub username: Option<String>,
    pub password: Option<String>,
    pub title: String,
    pub version: String,
    pub description: String,
}

/// Read an env var, treating empty values as unset
fn env_or(key: &str, default: &str) -> String {
    env::var(key)
        .ok()
        .filter(|v| !v.trim().is_empty())
        .unwrap_or_else(|| default.to_string())
}

impl Config {
    pub fn from_env() -> Result<Self, String> {
        // Load .env file if exists, ignore if not found (optional for production)
        if let Err(e) = dotenvy::dotenv() {
            if !e.not_found() {
                eprintln!("Warning: Error loading .env file: {}", e);
            }
        }

        Ok(Config {
            app: AppConfig::from_env()?,
            database: DatabaseConfig::from_env()?,
            auth: AuthConfig::from_env()?,
            storage: StorageConfig::from_env(),
            swagger: SwaggerConfig::from_env(),
        })
    }
}

impl AppConfig {
    const DEFAULT_MAX_REQUEST_BODY_SIZE: usize = 10 * 1024 * 1024; // 10MB
    const DEFAULT_CORS_ORIGINS: &'static str = "http://localhost:4200,http://localhost:4201";

    pub fn from_env() -> Result<Self, String> {
        let host = env_or("HOST", "0.0.0.0");
        let port = env_or("SERVER_PORT", "8080")
            .parse::<u16>()
            .map_err(|e| format!("Invalid SERVER_PORT: {}", e))?;

        let cors_allowed_origins =
            parse_origins(&env_or("CORS_ALLOWED_ORIGINS", Self::DEFAULT_CORS_ORIGINS));

        let max_request_body_size = env_or(
            "MAX_REQUEST_BODY_SIZE",
            &Self::DEFAULT_MAX_REQUEST_BODY_SIZE.to_string(),
        )
        .parse::<usize>()
        .map_err(|_| "MAX_REQUEST_BODY_SIZE must be a valid number".to_string())?;

        Ok(Self {
            host,
            port,
            cors_allowed_origins,
            max_request_body_size,
        })
    }

    pub fn server_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

/// Parse a comma-separated origin list
fn parse_origins(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
        .collect()
}

impl DatabaseConfig {
    // Default values for database connection pool (conservative defaults for small-medium apps)
    const DEFAULT_MAX_CONNECTIONS: u32 = 10;
    const DEFAULT_MIN_CONNECTIONS: u32 = 1;
    const DEFAULT_ACQUIRE_TIMEOUT_SECS: u64 = 5;
    const DEFAULT_IDLE_TIMEOUT_SECS: u64 = 600; // 10 minutes
    const DEFAULT_MAX_LIFETIME_SECS: u64 = 1800; // 30 minutes

    pub fn from_env() -> Result<Self, String> {
        let host = env_or("DB_HOST", "localhost");
        let port = env_or("DB_PORT", "5432")
            .parse::<u16>()
            .map_err(|_| "DB_PORT must be a valid port number".to_string())?;
        let user = env_or("DB_USER", "postgres");
        let password = env_or("DB_PASSWORD", "12346789");
        let name = env_or("DB_NAME", "house_design");
        let ssl_mode = env_or("DB_SSLMODE", "disable")
            .parse::<PgSslMode>()
            .map_err(|e| format!("Invalid DB_SSLMODE: {}", e))?;

        let max_connections = env_or(
            "DB_MAX_CONNECTIONS",
            &Self::DEFAULT_MAX_CONNECTIONS.to_string(),
        )
        .parse::<u32>()
        .map_err(|_| "DB_MAX_CONNECTIONS must be a valid number".to_string())?;

        let min_connections = env_or(
            "DB_MIN_CONNECTIONS",
            &Self::DEFAULT_MIN_CONNECTIONS.to_string(),
        )
        .parse::<u32>()
        .map_err(|_| "DB_MIN_CONNECTIONS must be a valid number".to_string())?;

        let acquire_timeout_secs = env_or(
            "DB_ACQUIRE_TIMEOUT_SECS",
            &Self::DEFAULT_ACQUIRE_TIMEOUT_SECS.to_string(),
        )
        .parse::<u64>()
        .map_err(|_| "DB_ACQUIRE_TIMEOUT_SECS must be a valid number".to_string())?;

        let idle_timeout_secs = env_or(
            "DB_IDLE_TIMEOUT_SECS",
            &Self::DEFAULT_IDLE_TIMEOUT_SECS.to_string(),
        )
        .parse::<u64>()
        .map_err(|_| "DB_IDLE_TIMEOUT_SECS must be a valid number".to_string())?;

        let max_lifetime_secs = env_or(
            "DB_MAX_LIFETIME_SECS",
            &Self::DEFAULT_MAX_LIFETIME_SECS.to_string(),
        )
        .parse::<u64>()
        .map_err(|_| "DB_MAX_LIFETIME_SECS must be a valid number".to_string())?;

        Ok(Self {
            host,
            port,
            user,
            password,
            name,
            ssl_mode,
            max_connections,
            min_connections,
            acquire_timeout_secs,
            idle_timeout_secs,
            max_lifetime_secs,
        })
    }

    pub fn connect_options(&self) -> PgConnectOptions {
        PgConnectOptions::new()
            .host(&self.host)
            .port(self.port)
            .username(&self.user)
            .password(&self.password)
            .database(&self.name)
            .ssl_mode(self.ssl_mode)
    }
}

impl AuthConfig {
    const DEFAULT_JWT_SECRET: &'static str = "house-design-dev-secret-change-me";
    const DEFAULT_JWT_EXPIRY_HOURS: u64 = 24;
    const DEFAULT_JWT_LEEWAY_SECS: u64 = 60; // 1 minute

    pub fn from_env() -> Result<Self, String> {
        let jwt_secret = env::var("JWT_SECRET")
            .ok()
            .filter(|s| !s.is_empty())
            .unwrap_or_else(|| {
                eprintln!("Warning: JWT_SECRET not set, using the development secret");
                Self::DEFAULT_JWT_SECRET.to_string()
            });

        let jwt_expiry_hours = env_or(
            "JWT_EXPIRY_HOURS",
            &Self::DEFAULT_JWT_EXPIRY_HOURS.to_string(),
        )
        .parse::<u64>()
        .map_err(|_| "JWT_EXPIRY_HOURS must be a valid number".to_string())?;

        let jwt_leeway_secs = env_or("JWT_LEEWAY", &Self::DEFAULT_JWT_LEEWAY_SECS.to_string())
            .parse::<u64>()
            .map_err(|_| "JWT_LEEWAY must be a valid number".to_string())?;

        Ok(Self {
            jwt_secret,
            jwt_expiry: Duration::from_secs(jwt_expiry_hours * 3600),
            jwt_leeway: Duration::from_secs(jwt_leeway_secs),
            admin_username: env_or("ADMIN_USERNAME", "admin"),
            admin_password: env_or("ADMIN_PASSWORD", "admin123"),
        })
    }
}

impl StorageConfig {
    pub fn from_env() -> Self {
        Self {
            data_dir: PathBuf::from(env_or("DATA_DIR", "./data")),
            homepage_dir: PathBuf::from(env_or("HOMEPAGE_DIR", "./homepage")),
        }
    }
}

impl SwaggerConfig {
    pub fn from_env() -> Self {
        // Only use credentials if they are non-empty
        let username = env::var("SWAGGER_USERNAME").ok().filter(|s| !s.is_empty());
        let password = env::var("SWAGGER_PASSWORD").ok().filter(|s| !s.is_empty());

        Self {
            username,
            password,
            title: env_or("SWAGGER_TITLE", "House Design API"),
            version: env_or("SWAGGER_VERSION", env!("CARGO_PKG_VERSION")),
            description: env_or(
                "SWAGGER_DESCRIPTION",
                "Content management API for the house design website",
            ),
        }
    }

    /// Returns credentials in "username:password" format if auth is enabled
    pub fn credentials(&self) -> Option<String> {
        match (&self.username, &self.password) {
            (Some(user), Some(pass)) => Some(format!("{}:{}", user, pass)),
            _ => None,
        }
    }
}
