//! imgprobe - identify images and read their dimensions from a header window.
//!
//! This binary probes local files or starts the HTTP server.

use clap::Parser;
use std::process::ExitCode;
use tracing::{error, info};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use imgprobe::{
    config::{Cli, Command, ProbeConfig, ServeConfig},
    create_s3_client,
    probe_path_with_window,
    server::{create_router, RouterConfig},
    service::ProbeService,
    source::S3ObjectSource,
};

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    match cli.command {
        Command::Probe(config) => run_probe(config),
        Command::Serve(config) => run_serve(config).await,
    }
}

// =============================================================================
// Probe Command
// =============================================================================

fn run_probe(config: ProbeConfig) -> ExitCode {
    init_logging(config.verbose);

    if let Err(e) = config.validate() {
        error!("Configuration error: {}", e);
        return ExitCode::FAILURE;
    }

    let mut failed = 0usize;

    for path in &config.paths {
        match probe_path_with_window(path, config.window_size) {
            Ok(descriptor) if config.json => {
                let json = serde_json::json!({
                    "path": path.display().to_string(),
                    "format": descriptor.format,
                    "media_type": descriptor.media_type,
                    "width": descriptor.width,
                    "height": descriptor.height,
                });
                println!("{}", json);
            }
            Ok(descriptor) => {
                println!("{}: {}", path.display(), descriptor);
            }
            Err(e) => {
                failed += 1;
                if config.json {
                    let json = serde_json::json!({
                        "path": path.display().to_string(),
                        "error": e.to_string(),
                    });
                    println!("{}", json);
                } else {
                    eprintln!("{}: {}", path.display(), e);
                }
            }
        }
    }

    if failed > 0 {
        ExitCode::FAILURE
    } else {
        ExitCode::SUCCESS
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

    info!("imgprobe v{}", env!("CARGO_PKG_VERSION"));
    info!("Configuration:");
    info!("  S3 bucket: {}", config.s3_bucket);
    if let Some(ref prefix) = config.s3_prefix {
        info!("  S3 prefix: {}", prefix);
    }
    if let Some(ref endpoint) = config.s3_endpoint {
        info!("  S3 endpoint: {}", endpoint);
    }
    info!("  S3 region: {}", config.s3_region);
    info!(
        "  Probe: {}-byte window, {} cached descriptors",
        config.window_size, config.cache_capacity
    );

    let s3_client = create_s3_client(config.s3_endpoint.as_deref(), &config.s3_region).await;

    let source = S3ObjectSource::new(s3_client, config.s3_bucket.clone())
        .with_prefix(config.s3_prefix.clone());
    let service = ProbeService::new(source)
        .with_cache_capacity(config.cache_capacity)
        .with_window_size(config.window_size);

    let router = create_router(service, build_router_config(&config));

    let addr = config.bind_address();

    info!("");
    info!("  Server listening on: http://{}", addr);
    info!("");
    info!("  Try these endpoints:");
    info!("    curl http://{}/health", addr);
    info!("    curl http://{}/probe/<key>", addr);
    info!("    curl --data-binary @image.png http://{}/probe", addr);
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

/// Initialize the tracing/logging subsystem.
fn init_logging(verbose: bool) {
    let env_filter = if verbose {
        "imgprobe=debug,tower_http=debug"
    } else {
        "imgprobe=info,tower_http=info"
    };

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| env_filter.into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}

/// Build RouterConfig from the application ServeConfig.
fn build_router_config(config: &ServeConfig) -> RouterConfig {
    let mut router_config = RouterConfig::new()
        .with_cache_max_age(config.cache_max_age)
        .with_max_upload_bytes(config.max_upload_bytes)
        .with_tracing(!config.no_tracing);

    if let Some(ref origins) = config.cors_origins {
        router_config = router_config.with_cors_origins(origins.clone());
    }

    router_config
}
