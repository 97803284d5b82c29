//! Local preview host for the built site.

use std::path::{Path, PathBuf};

use axum::Router;
use serde_json::json;
use tower_http::services::{ServeDir, ServeFile};

use crate::logging::{LogLevel, Logger};

const DEFAULT_PORT: u16 = 8080;
const DEFAULT_SITE_DIR: &str = "dist";
const DEFAULT_LOG_LEVEL: LogLevel = LogLevel::Info;
const PORT_BOUNDS: (u16, u16) = (1, u16::MAX);

#[derive(Clone, Debug, PartialEq)]
pub struct ServerConfig {
    pub port: u16,
    pub site_dir: PathBuf,
    pub log_level: LogLevel,
}

impl ServerConfig {
    pub fn from_env() -> Self {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let port = parse_u16_with_bounds(lookup("PORT"), DEFAULT_PORT, PORT_BOUNDS);
        let site_dir = non_empty(lookup("SITE_DIR"))
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from(DEFAULT_SITE_DIR));
        let log_level = non_empty(lookup("LOG_LEVEL"))
            .and_then(|value| LogLevel::parse(&value))
            .unwrap_or(DEFAULT_LOG_LEVEL);

        Self {
            port,
            site_dir,
            log_level,
        }
    }
}

fn parse_u16_with_bounds(value: Option<String>, default: u16, bounds: (u16, u16)) -> u16 {
    value
        .and_then(|value| value.trim().parse::<u16>().ok())
        .filter(|value| (bounds.0..=bounds.1).contains(value))
        .unwrap_or(default)
}

fn non_empty(value: Option<String>) -> Option<String> {
    value
        .map(|value| value.trim().to_string())
        .filter(|value| !value.is_empty())
}

/// Serves `site_dir`, answering unknown paths with its `index.html`.
pub fn router(site_dir: &Path) -> Router {
    let static_service =
        ServeDir::new(site_dir).not_found_service(ServeFile::new(site_dir.join("index.html")));

    Router::new().fallback_service(static_service)
}

pub async fn run() -> Result<(), Box<dyn std::error::Error>> {
    let config = ServerConfig::from_env();
    let logger = Logger::new(config.log_level);
    let bind_address = format!("0.0.0.0:{}", config.port);

    let listener = tokio::net::TcpListener::bind(&bind_address).await?;
    logger.info(
        "server_listening",
        json!({
            "url": format!("http://127.0.0.1:{}", config.port),
            "site_dir": config.site_dir.display().to_string(),
        }),
    );
    axum::serve(listener, router(&config.site_dir)).await?;
    Ok(())
}
