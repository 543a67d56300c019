//! Configuration management for the application icon server.
//!
//! This module provides a flexible configuration system that supports:
//! - Command-line arguments via clap
//! - Environment variables with `ICON_` prefix
//! - Sensible defaults for all optional settings
//!
//! # Commands
//!
//! - `serve` - Run the HTTP server
//! - `render` - Render a single icon to a file without starting the server
//!
//! # Environment Variables
//!
//! - `ICON_HOST` - Server bind address (default: 0.0.0.0)
//! - `ICON_PORT` - Server port (default: 3000)
//! - `ICON_APPS_DIR` - Directory of application records (required)
//! - `ICON_FETCH_TIMEOUT` - Remote icon fetch timeout in seconds (default: 5)
//! - `ICON_MAX_FETCH_BYTES` - Maximum remote icon size (default: 5 MiB)
//! - `ICON_CACHE_MAX_AGE` - HTTP cache max-age seconds (default: 604800)
//! - `ICON_CORS_ORIGINS` - Allowed CORS origins, comma-separated

use std::path::PathBuf;
use std::time::Duration;

use clap::{Args, Parser, Subcommand};

use crate::io::{DEFAULT_FETCH_TIMEOUT, DEFAULT_MAX_FETCH_BYTES};
use crate::render::{IconSize, DEFAULT_ICON_MAX_AGE};
use crate::store::is_valid_application_id;

// =============================================================================
// Default Values
// =============================================================================

/// Default server host.
pub const DEFAULT_HOST: &str = "0.0.0.0";

/// Default server port.
pub const DEFAULT_PORT: u16 = 3000;

/// Default remote fetch timeout in seconds.
pub const DEFAULT_FETCH_TIMEOUT_SECS: u64 = DEFAULT_FETCH_TIMEOUT.as_secs();

/// Upper bound accepted for the fetch timeout.
pub const MAX_FETCH_TIMEOUT_SECS: u64 = 60;

// =============================================================================
// CLI
// =============================================================================

/// App Icon Server - PWA icons for low-code applications.
///
/// Resolves each application's configured icon (inline data URL or remote
/// image), renders it as a square PNG and falls back to a generated
/// placeholder when no usable icon exists.
#[derive(Parser, Debug, Clone)]
#[command(name = "app-icon-server")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

impl Cli {
    /// Take the selected command.
    pub fn into_command(self) -> Command {
        self.command
    }
}

/// Available commands.
#[derive(Subcommand, Debug, Clone)]
pub enum Command {
    /// Run the HTTP server
    Serve(ServeConfig),

    /// Render one icon to a file
    Render(RenderConfig),
}

// =============================================================================
// Shared Arguments
// =============================================================================

/// Remote fetch limits shared by both commands.
#[derive(Args, Debug, Clone)]
pub struct FetchArgs {
    /// Timeout for fetching a remote icon, in seconds.
    #[arg(long, default_value_t = DEFAULT_FETCH_TIMEOUT_SECS, env = "ICON_FETCH_TIMEOUT")]
    pub fetch_timeout_secs: u64,

    /// Maximum size of a remote icon in bytes.
    #[arg(long, default_value_t = DEFAULT_MAX_FETCH_BYTES, env = "ICON_MAX_FETCH_BYTES")]
    pub max_fetch_bytes: usize,
}

impl FetchArgs {
    /// Validate the fetch limits.
    pub fn validate(&self) -> Result<(), String> {
        if self.fetch_timeout_secs == 0 || self.fetch_timeout_secs > MAX_FETCH_TIMEOUT_SECS {
            return Err(format!(
                "fetch_timeout_secs must be between 1 and {}",
                MAX_FETCH_TIMEOUT_SECS
            ));
        }

        if self.max_fetch_bytes == 0 {
            return Err("max_fetch_bytes must be greater than 0".to_string());
        }

        Ok(())
    }

    /// Get the fetch timeout as a Duration.
    pub fn fetch_timeout(&self) -> Duration {
        Duration::from_secs(self.fetch_timeout_secs)
    }
}

// =============================================================================
// Serve Command
// =============================================================================

/// Configuration for the `serve` command.
#[derive(Args, Debug, Clone)]
pub struct ServeConfig {
    // =========================================================================
    // Server Configuration
    // =========================================================================
    /// Host address to bind the server to.
    #[arg(long, default_value = DEFAULT_HOST, env = "ICON_HOST")]
    pub host: String,

    /// Port to listen on.
    #[arg(short, long, default_value_t = DEFAULT_PORT, env = "ICON_PORT")]
    pub port: u16,

    // =========================================================================
    // Store Configuration
    // =========================================================================
    /// Directory containing one `<application_id>.json` record per application.
    #[arg(long, env = "ICON_APPS_DIR")]
    pub apps_dir: PathBuf,

    // =========================================================================
    // Fetch Configuration
    // =========================================================================
    #[command(flatten)]
    pub fetch: FetchArgs,

    // =========================================================================
    // HTTP Configuration
    // =========================================================================
    /// HTTP Cache-Control max-age in seconds.
    #[arg(long, default_value_t = DEFAULT_ICON_MAX_AGE, env = "ICON_CACHE_MAX_AGE")]
    pub cache_max_age: u32,

    /// Allowed CORS origins (comma-separated).
    ///
    /// If not specified, allows any origin.
    #[arg(long, env = "ICON_CORS_ORIGINS", value_delimiter = ',')]
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
        if self.apps_dir.as_os_str().is_empty() {
            return Err(
                "Applications directory is required. Set --apps-dir or ICON_APPS_DIR".to_string(),
            );
        }

        self.fetch.validate()
    }

    /// Get the server bind address as "host:port".
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

// =============================================================================
// Render Command
// =============================================================================

/// Configuration for the `render` command.
#[derive(Args, Debug, Clone)]
pub struct RenderConfig {
    /// Directory containing one `<application_id>.json` record per application.
    #[arg(long, env = "ICON_APPS_DIR")]
    pub apps_dir: PathBuf,

    /// Application to render.
    #[arg(long)]
    pub app_id: String,

    /// Icon size in pixels (192 or 512).
    #[arg(long, default_value_t = 192)]
    pub size: u32,

    /// Output PNG path.
    #[arg(short, long)]
    pub output: PathBuf,

    #[command(flatten)]
    pub fetch: FetchArgs,

    /// Enable verbose logging (debug level).
    #[arg(short, long, default_value_t = false)]
    pub verbose: bool,
}

impl RenderConfig {
    /// Validate the configuration and return an error message if invalid.
    pub fn validate(&self) -> Result<(), String> {
        if self.icon_size().is_none() {
            return Err(format!(
                "Unsupported icon size: {} (expected 192 or 512)",
                self.size
            ));
        }

        if !is_valid_application_id(&self.app_id) {
            return Err(format!("Invalid application id: {:?}", self.app_id));
        }

        self.fetch.validate()
    }

    /// The requested size, if supported.
    pub fn icon_size(&self) -> Option<IconSize> {
        IconSize::from_pixels(self.size)
    }
}

// =============================================================================
// Tests
// =============================================================================
