mod cli;

use std::path::Path;

use anyhow::Result;
use catalog_core::config::Config;
use catalog_image::{ImageMetadata, ImageMime};
use clap::Parser;
use cli::{Cli, Commands};
use serde::Serialize;

async fn start_server(
    host: Option<String>,
    port: Option<u16>,
    config_path: Option<&Path>,
) -> Result<()> {
    let mut config = Config::load_or_default(config_path);

    // CLI flags win over the config file.
    if let Some(host) = host {
        config.server.host = host;
    }
    if let Some(port) = port {
        config.server.port = port;
    }

    tracing::info!("Starting catalog server");
    tracing::info!(
        "Server will listen on {}:{}",
        config.server.host,
        config.server.port
    );

    catalog_server::start(config).await?;
    Ok(())
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Respect RUST_LOG env var if set, otherwise use defaults based on verbose flag
    let env_filter = std::env::var("RUST_LOG").unwrap_or_else(|_| {
        if cli.verbose {
            "catalog=trace,catalog_server=trace,catalog_image=debug,catalog_db=debug,tower_http=debug"
                .to_string()
        } else {
            "catalog=debug,catalog_server=debug,catalog_db=info,tower_http=info".to_string()
        }
    });

    tracing_subscriber::fmt()
        .with_env_filter(&env_filter)
        .init();

    match cli.command {
        Commands::Start { host, port } => {
            let rt = tokio::runtime::Runtime::new()?;
            rt.block_on(start_server(host, port, cli.config.as_deref()))
        }
        Commands::Inspect { file, json } => inspect_file(&file, json),
        Commands::Validate {
            config: config_path,
        } => {
            let path = config_path.or(cli.config);
            validate_config(path.as_deref())
        }
        Commands::Version => {
            println!("catalog {}", env!("CARGO_PKG_VERSION"));
            Ok(())
        }
    }
}

/// What `inspect` reports about a file.
#[derive(Debug, Serialize)]
struct InspectReport {
    file: String,
    size: usize,
    mime: &'static str,
    accepted: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    metadata: Option<ImageMetadata>,
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<String>,
}

fn inspect_bytes(file: &Path, bytes: &[u8]) -> InspectReport {
    let mime = catalog_image::sniff_mime_type(bytes);
    let verdict = catalog_image::validate_mime(mime)
        .and_then(|_: ImageMime| catalog_image::extract_metadata(bytes));

    let (metadata, error) = match verdict {
        Ok(meta) => (Some(meta), None),
        Err(e) => (None, Some(e.to_string())),
    };

    InspectReport {
        file: file.display().to_string(),
        size: bytes.len(),
        mime,
        accepted: metadata.is_some(),
        metadata,
        error,
    }
}

fn inspect_file(file: &Path, json: bool) -> Result<()> {
    if !file.exists() {
        anyhow::bail!("File does not exist: {:?}", file);
    }

    let bytes = std::fs::read(file)?;
    let report = inspect_bytes(file, &bytes);

    if json {
        println!("{}", serde_json::to_string_pretty(&report)?);
        return Ok(());
    }

    println!("File: {}", report.file);
    println!("Size: {} bytes", report.size);
    println!("MIME: {}", report.mime);
    println!("Accepted: {}", if report.accepted { "yes" } else { "no" });
    if let Some(meta) = &report.metadata {
        println!("Dimensions: {}x{}", meta.width, meta.height);
        println!("Channels: {}", meta.channels);
        println!("Bit depth: {}", meta.bit_depth);
    }
    if let Some(error) = &report.error {
        println!("Reason: {error}");
    }

    Ok(())
}

fn validate_config(path: Option<&Path>) -> Result<()> {
    let config = match path {
        Some(p) => {
            println!("Validating config: {:?}", p);
            let config = Config::load(p)?;
            println!("✓ Configuration is valid");
            config
        }
        None => {
            println!("No config file specified, using defaults");
            Config::default()
        }
    };

    println!("  Server: {}:{}", config.server.host, config.server.port);
    println!("  Database: {}", config.server.db_path.display());
    println!("  Max body: {} bytes", config.api.max_body_bytes);
    println!("  Legacy status codes: {}", config.api.legacy_status_codes);

    let warnings = config.validate();
    if !warnings.is_empty() {
        println!("\nWarnings:");
        for warning in &warnings {
            println!("  - {warning}");
        }
    }

    Ok(())
}
