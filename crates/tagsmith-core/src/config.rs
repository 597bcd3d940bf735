//! Configuration module
//!
//! This module provides the configuration structures for the API: server,
//! storage directories and upload limits. Values come from the environment
//! (a `.env` file is honoured via `dotenvy`).

use std::env;
use std::path::PathBuf;

const SERVER_PORT: u16 = 8000;
const MAX_UPLOAD_SIZE_MB: usize = 100;
const MAX_COVER_SIZE_MB: usize = 10;
const HTTP_CONCURRENCY_LIMIT: usize = 1024;
const REQUEST_TIMEOUT_SECS: u64 = 60;
const DEFAULT_UPLOAD_DIR: &str = "uploads";
const DEFAULT_OUTPUT_DIR: &str = "output";
const DEFAULT_COVER_CONTENT_TYPES: &str = "image/jpeg,image/png,image/gif,image/webp,image/bmp";

/// Server-level settings
#[derive(Clone, Debug)]
pub struct BaseConfig {
    pub server_port: u16,
    pub cors_origins: Vec<String>,
    pub environment: String,
    pub http_concurrency_limit: usize,
    pub request_timeout_secs: u64,
}

/// Application configuration
#[derive(Clone, Debug)]
pub struct Config {
    pub base: BaseConfig,
    /// Directory for the incoming namespace (original uploads)
    pub upload_dir: PathBuf,
    /// Directory for the processed namespace (tagged copies)
    pub output_dir: PathBuf,
    pub max_upload_size_bytes: usize,
    pub audio_allowed_extensions: Vec<String>,
    pub max_cover_size_bytes: usize,
    pub cover_allowed_content_types: Vec<String>,
}

impl Config {
    pub fn from_env() -> Result<Self, anyhow::Error> {
        dotenvy::dotenv().ok();

        let environment = env::var("ENVIRONMENT")
            .or_else(|_| env::var("APP_ENV"))
            .unwrap_or_else(|_| "development".to_string());

        let cors_origins_str = env::var("CORS_ORIGINS").unwrap_or_else(|_| "*".to_string());
        if is_production_name(&environment) && cors_origins_str.trim() == "*" {
            return Err(anyhow::anyhow!(
                "CORS_ORIGINS cannot be '*' in production. Please specify explicit origins."
            ));
        }

        let base = BaseConfig {
            server_port: env::var("PORT")
                .unwrap_or_else(|_| SERVER_PORT.to_string())
                .parse()
                .map_err(|_| anyhow::anyhow!("PORT must be a valid number"))?,
            cors_origins: split_list(&cors_origins_str),
            environment,
            http_concurrency_limit: env::var("HTTP_CONCURRENCY_LIMIT")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(HTTP_CONCURRENCY_LIMIT),
            request_timeout_secs: env::var("REQUEST_TIMEOUT_SECS")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(REQUEST_TIMEOUT_SECS),
        };

        let max_upload_size_mb = env::var("MAX_UPLOAD_SIZE_MB")
            .unwrap_or_else(|_| MAX_UPLOAD_SIZE_MB.to_string())
            .parse::<usize>()
            .unwrap_or(MAX_UPLOAD_SIZE_MB);

        let max_cover_size_mb = env::var("MAX_COVER_SIZE_MB")
            .unwrap_or_else(|_| MAX_COVER_SIZE_MB.to_string())
            .parse::<usize>()
            .unwrap_or(MAX_COVER_SIZE_MB);

        Ok(Config {
            base,
            upload_dir: env::var("UPLOAD_DIR")
                .unwrap_or_else(|_| DEFAULT_UPLOAD_DIR.to_string())
                .into(),
            output_dir: env::var("OUTPUT_DIR")
                .unwrap_or_else(|_| DEFAULT_OUTPUT_DIR.to_string())
                .into(),
            max_upload_size_bytes: max_upload_size_mb * 1024 * 1024,
            audio_allowed_extensions: vec!["mp3".to_string()],
            max_cover_size_bytes: max_cover_size_mb * 1024 * 1024,
            cover_allowed_content_types: split_list(
                &env::var("COVER_ALLOWED_CONTENT_TYPES")
                    .unwrap_or_else(|_| DEFAULT_COVER_CONTENT_TYPES.to_string()),
            )
            .into_iter()
            .map(|s| s.to_lowercase())
            .collect(),
        })
    }

    /// Configuration rooted at the given storage directories with default limits.
    pub fn with_dirs(upload_dir: impl Into<PathBuf>, output_dir: impl Into<PathBuf>) -> Self {
        Config {
            base: BaseConfig {
                server_port: SERVER_PORT,
                cors_origins: vec!["*".to_string()],
                environment: "development".to_string(),
                http_concurrency_limit: HTTP_CONCURRENCY_LIMIT,
                request_timeout_secs: REQUEST_TIMEOUT_SECS,
            },
            upload_dir: upload_dir.into(),
            output_dir: output_dir.into(),
            max_upload_size_bytes: MAX_UPLOAD_SIZE_MB * 1024 * 1024,
            audio_allowed_extensions: vec!["mp3".to_string()],
            max_cover_size_bytes: MAX_COVER_SIZE_MB * 1024 * 1024,
            cover_allowed_content_types: split_list(DEFAULT_COVER_CONTENT_TYPES),
        }
    }

    /// Check if the application is running in production mode
    pub fn is_production(&self) -> bool {
        is_production_name(&self.base.environment)
    }

    pub fn server_port(&self) -> u16 {
        self.base.server_port
    }

    pub fn cors_origins(&self) -> &[String] {
        &self.base.cors_origins
    }

    pub fn environment(&self) -> &str {
        &self.base.environment
    }

    pub fn http_concurrency_limit(&self) -> usize {
        self.base.http_concurrency_limit
    }

    pub fn request_timeout_secs(&self) -> u64 {
        self.base.request_timeout_secs
    }

    pub fn max_upload_size_bytes(&self) -> usize {
        self.max_upload_size_bytes
    }

    pub fn max_cover_size_bytes(&self) -> usize {
        self.max_cover_size_bytes
    }

    pub fn audio_allowed_extensions(&self) -> &[String] {
        &self.audio_allowed_extensions
    }

    pub fn cover_allowed_content_types(&self) -> &[String] {
        &self.cover_allowed_content_types
    }

    /// Largest request body the server should accept: one upload or one
    /// cover plus form overhead.
    pub fn max_request_body_bytes(&self) -> usize {
        self.max_upload_size_bytes.max(self.max_cover_size_bytes) + 1024 * 1024
    }
}

fn is_production_name(environment: &str) -> bool {
    let env = environment.to_lowercase();
    env == "production" || env == "prod"
}

fn split_list(value: &str) -> Vec<String> {
    value
        .split(',')
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
        .collect()
}
