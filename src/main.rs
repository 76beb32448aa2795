use std::path::PathBuf;

use anyhow::Context;
use clap::{Parser, Subcommand};
use log::info;

use metromecanica_ot::input::RecordSource;
use metromecanica_ot::work_order::{GenerationOutcome, Generator, WorkOrderGenerator};
use metromecanica_ot::{init_logging, run, AppConfig};

/// Generate a work order (OT) document from an approved proforma record.
#[derive(Debug, Parser)]
#[clap(name = "metromecanica-ot", version, about)]
struct Cli {
    #[clap(subcommand)]
    command: Option<Command>,

    /// Record as inline JSON
    #[clap(value_name = "JSON")]
    json: Option<String>,

    /// Read the record from a JSON file
    #[clap(long, value_name = "PATH")]
    file: Option<PathBuf>,

    /// Read the record from standard input
    #[clap(long)]
    stdin: bool,

    /// Directory where the document is written
    #[clap(long, value_name = "DIR", global = true)]
    output_dir: Option<PathBuf>,

    /// Company logo (PNG or JPEG)
    #[clap(long, value_name = "PATH", global = true)]
    logo: Option<PathBuf>,

    /// JSON file overriding the style theme
    #[clap(long, value_name = "PATH", global = true)]
    theme: Option<PathBuf>,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Run the HTTP service
    Serve {
        /// Bind address, overrides HOST
        #[clap(long)]
        host: Option<String>,
        /// Bind port, overrides PORT
        #[clap(long)]
        port: Option<u16>,
    },
}

fn apply_overrides(cli: &Cli, mut config: AppConfig) -> AppConfig {
    if let Some(dir) = &cli.output_dir {
        config.output_dir = dir.clone();
    }
    if let Some(logo) = &cli.logo {
        config.logo_path = logo.clone();
    }
    if let Some(theme) = &cli.theme {
        config.theme_path = Some(theme.clone());
    }
    config
}

fn generate(cli: Cli, config: AppConfig) -> anyhow::Result<()> {
    let source = RecordSource::from_args(cli.json, cli.file, cli.stdin)?;
    let record = source.read()?;

    let generator =
        WorkOrderGenerator::from_paths(config.theme_path.as_deref(), &config.logo_path)?;

    match generator.generate(&record)? {
        GenerationOutcome::NotApproved { .. } => {
            eprintln!("Proforma no aprobada. No se genera OT.");
        }
        GenerationOutcome::Generated(doc) => {
            let path = doc
                .write_to(&config.output_dir)
                .with_context(|| format!("writing {}", doc.filename))?;
            info!(
                "{} ({} layout) written to {}",
                doc.identifiers.ot_number,
                doc.mode.as_str(),
                path.display()
            );
            println!("OK: {}", path.display());
        }
    }

    Ok(())
}

#[actix_web::main]
async fn main() -> anyhow::Result<()> {
    init_logging();

    let mut cli = Cli::parse();
    let mut config = apply_overrides(&cli, AppConfig::from_env()?);

    match cli.command.take() {
        Some(Command::Serve { host, port }) => {
            if let Some(host) = host {
                config.host = host;
            }
            if let Some(port) = port {
                config.port = port;
            }
            run(config).await.context("HTTP server failed")
        }
        None => generate(cli, config),
    }
}
