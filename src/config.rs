//! Configuration management for imgprobe.
//!
//! This module provides the command-line interface and its configuration
//! types:
//! - Command-line arguments via clap
//! - Environment variables with `IMGPROBE_` prefix for the server
//! - Sensible defaults for all optional settings
//!
//! # Environment Variables
//!
//! The `serve` command reads the following variables:
//!
//! - `IMGPROBE_HOST` - Server bind address (default: 0.0.0.0)
//! - `IMGPROBE_PORT` - Server port (default: 3000)
//! - `IMGPROBE_S3_BUCKET` - S3 bucket name (required)
//! - `IMGPROBE_S3_PREFIX` - Key prefix inside the bucket
//! - `IMGPROBE_S3_ENDPOINT` - Custom S3 endpoint for S3-compatible services
//! - `IMGPROBE_S3_REGION` - AWS region (default: us-east-1)
//! - `IMGPROBE_CACHE_CAPACITY` - Max cached descriptors (default: 10000)
//! - `IMGPROBE_WINDOW_SIZE` - Header window in bytes (default: 256)
//! - `IMGPROBE_MAX_UPLOAD_BYTES` - Upload body limit (default: 1 MiB)
//! - `IMGPROBE_CORS_ORIGINS` - Allowed CORS origins, comma-separated
//! - `IMGPROBE_CACHE_MAX_AGE` - HTTP cache max-age seconds (default: 3600)

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

use crate::probe::{DEFAULT_WINDOW_SIZE, MAX_WINDOW_SIZE, MIN_WINDOW_SIZE};
use crate::server::DEFAULT_MAX_UPLOAD_BYTES;
use crate::service::DEFAULT_DESCRIPTOR_CACHE_CAPACITY;

// =============================================================================
// Default Values
// =============================================================================

/// Default server host.
pub const DEFAULT_HOST: &str = "0.0.0.0";

/// Default server port.
pub const DEFAULT_PORT: u16 = 3000;

/// Default AWS region.
pub const DEFAULT_REGION: &str = "us-east-1";

/// Default HTTP cache max-age in seconds (1 hour).
pub const DEFAULT_CACHE_MAX_AGE: u32 = 3600;

// =============================================================================
// CLI Arguments
// =============================================================================

/// imgprobe - identify images and read their dimensions from a header window.
#[derive(Parser, Debug, Clone)]
#[command(name = "imgprobe")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

/// Top-level subcommands.
#[derive(Subcommand, Debug, Clone)]
pub enum Command {
    /// Probe local files and print their format and dimensions.
    Probe(ProbeConfig),

    /// Serve the probe HTTP API over an S3 bucket.
    Serve(ServeConfig),
}

// =============================================================================
// Probe Command
// =============================================================================

/// Options for `imgprobe probe`.
#[derive(Args, Debug, Clone)]
pub struct ProbeConfig {
    /// Files to probe.
    #[arg(required = true)]
    pub paths: Vec<PathBuf>,

    /// Header window size in bytes.
    #[arg(short, long, default_value_t = DEFAULT_WINDOW_SIZE)]
    pub window_size: usize,

    /// Print one JSON object per file instead of plain text.
    #[arg(long, default_value_t = false)]
    pub json: bool,

    /// Enable verbose logging (debug level).
    #[arg(short, long, default_value_t = false)]
    pub verbose: bool,
}

impl ProbeConfig {
    /// Validate the configuration and return an error message if invalid.
    pub fn validate(&self) -> Result<(), String> {
        validate_window_size(self.window_size)
    }
}

// =============================================================================
// Serve Command
// =============================================================================

/// Options for `imgprobe serve`.
#[derive(Args, Debug, Clone)]
pub struct ServeConfig {
    // =========================================================================
    // Server Configuration
    // =========================================================================
    /// Host address to bind the server to.
    #[arg(long, default_value = DEFAULT_HOST, env = "IMGPROBE_HOST")]
    pub host: String,

    /// Port to listen on.
    #[arg(short, long, default_value_t = DEFAULT_PORT, env = "IMGPROBE_PORT")]
    pub port: u16,

    // =========================================================================
    // S3 Configuration
    // =========================================================================
    /// S3 bucket name containing the images.
    #[arg(long, env = "IMGPROBE_S3_BUCKET")]
    pub s3_bucket: String,

    /// Key prefix prepended to every requested key.
    #[arg(long, env = "IMGPROBE_S3_PREFIX")]
    pub s3_prefix: Option<String>,

    /// Custom S3 endpoint URL for S3-compatible services (MinIO, etc.).
    ///
    /// If not specified, uses the default AWS S3 endpoint.
    #[arg(long, env = "IMGPROBE_S3_ENDPOINT")]
    pub s3_endpoint: Option<String>,

    /// AWS region for S3.
    #[arg(long, default_value = DEFAULT_REGION, env = "IMGPROBE_S3_REGION")]
    pub s3_region: String,

    // =========================================================================
    // Probe Configuration
    // =========================================================================
    /// Maximum number of descriptors to keep in cache.
    #[arg(long, default_value_t = DEFAULT_DESCRIPTOR_CACHE_CAPACITY, env = "IMGPROBE_CACHE_CAPACITY")]
    pub cache_capacity: usize,

    /// Header window size in bytes.
    #[arg(long, default_value_t = DEFAULT_WINDOW_SIZE, env = "IMGPROBE_WINDOW_SIZE")]
    pub window_size: usize,

    /// Body size limit for `POST /probe` in bytes.
    #[arg(long, default_value_t = DEFAULT_MAX_UPLOAD_BYTES, env = "IMGPROBE_MAX_UPLOAD_BYTES")]
    pub max_upload_bytes: usize,

    // =========================================================================
    // HTTP Configuration
    // =========================================================================
    /// HTTP Cache-Control max-age in seconds.
    #[arg(long, default_value_t = DEFAULT_CACHE_MAX_AGE, env = "IMGPROBE_CACHE_MAX_AGE")]
    pub cache_max_age: u32,

    /// Allowed CORS origins (comma-separated).
    ///
    /// If not specified, allows any origin.
    #[arg(long, env = "IMGPROBE_CORS_ORIGINS", value_delimiter = ',')]
    pub cors_origins: Option<Vec<String>>,

    // =========================================================================
    // Logging Configuration
    // =========================================================================
    /// Enable verbose logging (debug level).
    #[arg(short, long, default_value_t = false)]
    pub verbose: bool,

    /// Disable request tracing.
    #[arg(long, default_value_t = false)]
    pub no_tracing: bool,
}

impl ServeConfig {
    /// Validate the configuration and return an error message if invalid.
    pub fn validate(&self) -> Result<(), String> {
        if self.s3_bucket.is_empty() {
            return Err(
                "S3 bucket name is required. Set --s3-bucket or IMGPROBE_S3_BUCKET".to_string(),
            );
        }

        if self.cache_capacity == 0 {
            return Err("cache_capacity must be greater than 0".to_string());
        }

        validate_window_size(self.window_size)?;

        if self.max_upload_bytes < self.window_size {
            return Err(format!(
                "max_upload_bytes ({}) must be at least the window size ({})",
                self.max_upload_bytes, self.window_size
            ));
        }

        Ok(())
    }

    /// Get the server bind address as "host:port".
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

fn validate_window_size(window_size: usize) -> Result<(), String> {
    if !(MIN_WINDOW_SIZE..=MAX_WINDOW_SIZE).contains(&window_size) {
        return Err(format!(
            "window_size must be between {} and {} bytes",
            MIN_WINDOW_SIZE, MAX_WINDOW_SIZE
        ));
    }
    Ok(())
}

// =============================================================================
// Tests
// =============================================================================
