//! App Icon Server - PWA icons for low-code applications.
//!
//! This binary starts the HTTP server or renders a single icon offline.

use clap::Parser;
use std::process::ExitCode;
use tracing::{error, info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use app_icon_server::{
    config::{Cli, Command, FetchArgs, RenderConfig, ServeConfig},
    io::HttpFetcher,
    render::IconService,
    server::{create_router, RouterConfig, API_PREFIX},
    store::FsApplicationStore,
};

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    match cli.into_command() {
        Command::Serve(config) => run_serve(config).await,
        Command::Render(config) => run_render(config).await,
    }
}

// =============================================================================
// Serve Command
// =============================================================================

async fn run_serve(config: ServeConfig) -> ExitCode {
    init_logging(config.verbose);

    if let Err(e) = config.validate() {
        error!("Configuration error: {}", e);
        return ExitCode::FAILURE;
    }

    info!("App Icon Server v{}", env!("CARGO_PKG_VERSION"));
    info!("Configuration:");
    info!("  Applications dir: {}", config.apps_dir.display());
    info!(
        "  Remote fetch: {}s timeout, {} bytes max",
        config.fetch.fetch_timeout_secs, config.fetch.max_fetch_bytes
    );
    info!("  Cache-Control max-age: {}s", config.cache_max_age);

    match tokio::fs::metadata(&config.apps_dir).await {
        Ok(meta) if meta.is_dir() => {}
        Ok(_) => {
            error!("{} is not a directory", config.apps_dir.display());
            return ExitCode::FAILURE;
        }
        Err(e) => {
            // Every icon will be the placeholder until the directory appears
            warn!(
                "Applications dir {} is not readable: {}",
                config.apps_dir.display(),
                e
            );
        }
    }

    let icon_service = match build_icon_service(&config.apps_dir, &config.fetch) {
        Ok(service) => service,
        Err(e) => {
            error!("Failed to create HTTP client: {}", e);
            return ExitCode::FAILURE;
        }
    };

    let router = create_router(icon_service, build_router_config(&config));

    let addr = config.bind_address();

    info!("");
    info!("────────────────────────────────────────────────────────────────");
    info!("  Server listening on: http://{}", addr);
    info!("");
    info!("  Try these endpoints:");
    info!("    curl http://{}/health", addr);
    info!("    curl http://{}{}/<app_id>/icons", addr, API_PREFIX);
    info!(
        "    curl -o icon.png http://{}{}/<app_id>/icons/192.png",
        addr, API_PREFIX
    );
    info!("────────────────────────────────────────────────────────────────");
    info!("");

    let listener = match tokio::net::TcpListener::bind(&addr).await {
        Ok(listener) => listener,
        Err(e) => {
            error!("Failed to bind to {}: {}", addr, e);
            return ExitCode::FAILURE;
        }
    };

    if let Err(e) = axum::serve(listener, router).await {
        error!("Server error: {}", e);
        return ExitCode::FAILURE;
    }

    ExitCode::SUCCESS
}

/// Build RouterConfig from the ServeConfig.
fn build_router_config(config: &ServeConfig) -> RouterConfig {
    let mut router_config = RouterConfig::new().with_cache_max_age(config.cache_max_age);

    if let Some(ref origins) = config.cors_origins {
        router_config = router_config.with_cors_origins(origins.clone());
    }

    router_config.with_tracing(!config.no_tracing)
}

/// Wire the filesystem store and HTTP fetcher into an IconService.
fn build_icon_service(
    apps_dir: &std::path::Path,
    fetch: &FetchArgs,
) -> Result<IconService<FsApplicationStore, HttpFetcher>, app_icon_server::FetchError> {
    let fetcher = HttpFetcher::new(fetch.fetch_timeout(), fetch.max_fetch_bytes)?;
    Ok(IconService::new(FsApplicationStore::new(apps_dir), fetcher))
}

// =============================================================================
// Render Command
// =============================================================================

async fn run_render(config: RenderConfig) -> ExitCode {
    if config.verbose {
        init_logging(true);
    }

    if let Err(e) = config.validate() {
        eprintln!("Error: {}", e);
        return ExitCode::FAILURE;
    }

    let icon_service = match build_icon_service(&config.apps_dir, &config.fetch) {
        Ok(service) => service,
        Err(e) => {
            eprintln!("Error: failed to create HTTP client: {}", e);
            return ExitCode::FAILURE;
        }
    };

    let icon = match icon_service.render(&config.app_id, config.size).await {
        Ok(icon) => icon,
        Err(e) => {
            eprintln!("Error: {}", e);
            return ExitCode::FAILURE;
        }
    };

    if let Err(e) = tokio::fs::write(&config.output, &icon.data).await {
        eprintln!("Error: failed to write {}: {}", config.output.display(), e);
        return ExitCode::FAILURE;
    }

    println!(
        "✓ {} ({}×{}, {} bytes, source: {})",
        config.output.display(),
        icon.size,
        icon.size,
        icon.data.len(),
        icon.origin.as_str()
    );

    ExitCode::SUCCESS
}

/// Initialize the tracing/logging subsystem.
fn init_logging(verbose: bool) {
    let env_filter = if verbose {
        "app_icon_server=debug,tower_http=debug"
    } else {
        "app_icon_server=info,tower_http=info"
    };

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| env_filter.into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();
}
