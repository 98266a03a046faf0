//! Application settings and configuration structures.

use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;

/// Root configuration structure containing all application settings.
#[derive(Debug, Clone, Deserialize)]
pub struct Settings {
    /// Server configuration (host, port)
    pub server: ServerSettings,

    /// Database configuration (PostgreSQL)
    pub database: DatabaseSettings,

    /// Image storage configuration
    pub storage: StorageSettings,

    /// CORS configuration
    pub cors: CorsSettings,

    /// Current environment (development, staging, production)
    pub environment: String,
}

/// Server binding configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct ServerSettings {
    /// Host address to bind to (e.g., "0.0.0.0")
    pub host: String,

    /// Port number to listen on
    pub port: u16,

    /// Maximum accepted request body in bytes (multipart uploads included)
    pub max_body_bytes: usize,
}

/// PostgreSQL database configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct DatabaseSettings {
    /// Database connection URL
    pub url: String,

    /// Maximum number of connections in the pool
    pub max_connections: u32,

    /// Minimum number of connections to maintain
    pub min_connections: u32,

    /// Connection acquire timeout in seconds
    pub acquire_timeout: u64,

    /// Apply pending migrations on startup
    pub run_migrations: bool,
}

/// Uploaded image storage configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct StorageSettings {
    /// Root directory uploaded objects are written under
    pub root: String,

    /// Public URL prefix the stored objects are served from
    pub public_url: String,

    /// Key prefix for post images
    pub image_prefix: String,

    /// Largest single image accepted, in bytes
    pub max_image_bytes: usize,
}

/// CORS configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct CorsSettings {
    /// Allowed origins (comma-separated in env)
    pub allowed_origins: Vec<String>,

    /// How long browsers may cache a preflight response, in seconds
    pub max_age_secs: u64,
}

impl Settings {
    /// Load settings from environment variables and configuration files.
    ///
    /// The loading order is:
    /// 1. config/default.toml (base configuration)
    /// 2. config/{RUN_ENV}.toml (environment-specific overrides)
    /// 3. Environment variables (highest priority)
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if configuration cannot be loaded or parsed,
    /// or if the storage settings are unusable.
    pub fn load() -> Result<Self, ConfigError> {
        // Load .env file if present (ignore errors if not found)
        let _ = dotenvy::dotenv();

        let environment = std::env::var("RUN_ENV").unwrap_or_else(|_| "development".into());

        Config::builder()
            .set_default("environment", environment.clone())?
            .set_default("server.host", "0.0.0.0")?
            .set_default("server.port", 8080)?
            .set_default("server.max_body_bytes", 20_971_520_i64)? // 20MB
            .set_default("database.max_connections", 10)?
            .set_default("database.min_connections", 2)?
            .set_default("database.acquire_timeout", 30)?
            .set_default("database.run_migrations", true)?
            .set_default("storage.root", "./uploads")?
            .set_default("storage.public_url", "/static")?
            .set_default("storage.image_prefix", "static")?
            .set_default("storage.max_image_bytes", 10_485_760_i64)? // 10MB
            .set_default("cors.allowed_origins", vec!["http://localhost:3000"])?
            .set_default("cors.max_age_secs", 3600)?
            .add_source(File::with_name("config/default").required(false))
            .add_source(File::with_name(&format!("config/{}", environment)).required(false))
            // APP__SERVER__PORT=8080 -> server.port = 8080
            .add_source(
                Environment::default()
                    .prefix("APP")
                    .separator("__")
                    .try_parsing(true),
            )
            .set_override_option("server.host", std::env::var("SERVER_HOST").ok())?
            .set_override_option("server.port", std::env::var("SERVER_PORT").ok())?
            .set_override_option("database.url", std::env::var("DATABASE_URL").ok())?
            .set_override_option("storage.root", std::env::var("UPLOAD_ROOT").ok())?
            .build()?
            .try_deserialize()
            .and_then(|settings: Self| {
                settings.storage.validate()?;
                Ok(settings)
            })
    }

    /// Get the full server address as a string.
    pub fn server_addr(&self) -> String {
        format!("{}:{}", self.server.host, self.server.port)
    }
}

impl StorageSettings {
    fn validate(&self) -> Result<(), ConfigError> {
        if self.image_prefix.is_empty()
            || self.image_prefix.contains("..")
            || self.image_prefix.starts_with('/')
        {
            return Err(ConfigError::Message(format!(
                "storage.image_prefix must be a relative key prefix, got {:?}",
                self.image_prefix
            )));
        }
        if self.max_image_bytes == 0 {
            return Err(ConfigError::Message(
                "storage.max_image_bytes must be greater than zero".into(),
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn storage(prefix: &str) -> StorageSettings {
        StorageSettings {
            root: "./uploads".into(),
            public_url: "/static".into(),
            image_prefix: prefix.into(),
            max_image_bytes: 1024,
        }
    }

    #[test]
    fn test_storage_prefix_accepts_relative_key() {
        assert!(storage("static").validate().is_ok());
        assert!(storage("images/posts").validate().is_ok());
    }

    #[test]
    fn test_storage_prefix_rejects_traversal_and_absolute() {
        assert!(storage("../etc").validate().is_err());
        assert!(storage("/var/www").validate().is_err());
        assert!(storage("").validate().is_err());
    }

    #[test]
    fn test_storage_rejects_zero_image_limit() {
        let mut settings = storage("static");
        settings.max_image_bytes = 0;
        assert!(settings.validate().is_err());
    }
}
