//! Configuration validation
//!
//! Validates critical configuration values at startup to catch misconfigurations early.

use anyhow::Result;
use tagsmith_core::Config;

/// Validate critical configuration values
///
/// Fails fast on settings that would make the service unusable or leak
/// into production unsafely.
pub fn validate_config(config: &Config) -> Result<()> {
    if config.server_port() == 0 {
        return Err(anyhow::anyhow!("PORT cannot be 0"));
    }

    // Validate CORS configuration in production
    if config.is_production() && config.cors_origins().iter().any(|o| o == "*") {
        return Err(anyhow::anyhow!(
            "CORS configured to allow all origins (*) in production - this is a security risk. \
            Please set specific allowed origins via CORS_ORIGINS environment variable."
        ));
    }

    // Validate file size limits
    if config.max_upload_size_bytes() == 0 {
        return Err(anyhow::anyhow!("Max upload size cannot be 0"));
    }

    if config.max_cover_size_bytes() == 0 {
        return Err(anyhow::anyhow!("Max cover size cannot be 0"));
    }

    if config.cover_allowed_content_types().is_empty() {
        tracing::warn!("COVER_ALLOWED_CONTENT_TYPES is empty - every cover image will be rejected");
    }

    if config.http_concurrency_limit() == 0 {
        return Err(anyhow::anyhow!("HTTP concurrency limit cannot be 0"));
    }

    // The two namespaces must never alias each other
    if config.upload_dir == config.output_dir {
        return Err(anyhow::anyhow!(
            "UPLOAD_DIR and OUTPUT_DIR must be different directories (both are '{}')",
            config.upload_dir.display()
        ));
    }

    Ok(())
}
