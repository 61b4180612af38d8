use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};
use std::env;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    pub environment: Environment,
    pub database: DatabaseConfig,
    pub api: ApiConfig,
    pub auth: AuthConfig,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Environment {
    Development,
    Production,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DatabaseConfig {
    pub url: String,
    pub max_connections: u32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiConfig {
    pub port: u16,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthConfig {
    /// When set, bearer tokens are verified RS256 against this remote key set.
    pub jwks_url: Option<String>,
    pub audience: String,
    pub issuer: String,
    /// HS256 fallback used when no JWKS URL is configured.
    pub jwt_secret: String,
}

impl AppConfig {
    pub fn from_env() -> Self {
        let environment = match env::var("APP_ENV").as_deref() {
            Ok("production") | Ok("prod") => Environment::Production,
            _ => Environment::Development,
        };

        let port = env::var("PORT")
            .ok()
            .and_then(|v| v.parse::<u16>().ok())
            .unwrap_or(3000);

        let database = DatabaseConfig {
            url: env::var("DATABASE_URL").unwrap_or_else(|_| "sqlite://fullstack.db".to_string()),
            max_connections: env::var("DATABASE_MAX_CONNECTIONS")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(5),
        };

        let auth = AuthConfig {
            jwks_url: env::var("AUTH_JWKS_URL").ok().filter(|v| !v.is_empty()),
            audience: env::var("AUTH_AUDIENCE").unwrap_or_else(|_| "coffee".to_string()),
            issuer: env::var("AUTH_ISSUER").unwrap_or_default(),
            jwt_secret: env::var("JWT_SECRET").unwrap_or_default(),
        };

        Self { environment, database, api: ApiConfig { port }, auth }
    }
}

// Global singleton config - initialized once at startup
pub static CONFIG: Lazy<AppConfig> = Lazy::new(AppConfig::from_env);

// Convenience function for accessing config
pub fn config() -> &'static AppConfig {
    &CONFIG
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_without_env() {
        // Only assert fields no test environment is expected to override
        let config = AppConfig::from_env();
        assert!(config.database.max_connections >= 1);
        assert!(config.api.port > 0);
    }
}
