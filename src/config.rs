//! Environment-driven configuration. Values come from a `.env` file when one
//! exists, otherwise from the process environment, with development defaults.

use std::env;

#[derive(Debug, Clone)]
pub struct Config {
    pub host: String,
    pub port: u16,
    pub database_url: String,
    pub log_level: String,
    pub version: String,
    pub is_prod: bool,
}

fn var_or(key: &str, default: &str) -> String {
    env::var(key)
        .ok()
        .filter(|value| !value.is_empty())
        .unwrap_or_else(|| default.to_string())
}

impl Config {
    #[must_use]
    pub fn from_env() -> Self {
        if dotenvy::dotenv().is_ok() {
            tracing::info!("Config file loaded from .env");
        } else {
            tracing::warn!("No .env file found, using environment variables only");
        }

        let database_url = env::var("DATABASE_URL")
            .ok()
            .filter(|value| !value.is_empty())
            .unwrap_or_else(|| {
                let user = var_or("DB_USER", "postgres");
                let password = var_or("DB_PASSWORD", "postgres");
                let host = var_or("DB_HOST", "localhost");
                let port = var_or("DB_PORT", "5432");
                let name = var_or("DB_NAME", "app");
                format!("postgres://{user}:{password}@{host}:{port}/{name}?sslmode=disable")
            });

        Self {
            host: var_or("APP_HOST", "0.0.0.0"),
            port: var_or("APP_PORT", "8080").parse().unwrap_or(8080),
            database_url,
            log_level: var_or("LOG_LEVEL", "info"),
            version: var_or("VERSION", env!("CARGO_PKG_VERSION")),
            is_prod: var_or("APP_ENV", "dev") == "prod",
        }
    }

    #[must_use]
    pub fn address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}
