//! imgdrop command-line entry point.

mod cli;
mod config;
mod host;
mod sources;

use std::process::ExitCode;

use clap::Parser;
use imgdrop_http::HttpTransport;
use imgdrop_plugin::{ImgdropUploader, UPLOADER_ID};
use tracing_subscriber::EnvFilter;

use crate::cli::{Cli, Command, UploadArgs};
use crate::config::Config;
use crate::host::CliHost;

fn main() -> anyhow::Result<ExitCode> {
    // Logs go to stderr; stdout carries only JSON.
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let config = match &cli.config {
        Some(path) => Config::load_from(path)?,
        None => Config::load()?,
    };

    match cli.command {
        Command::Schema => {
            let host = CliHost::offline(config.to_upload_config());
            ImgdropUploader::register(&host);
            let schema = host
                .registration(UPLOADER_ID)
                .map(|r| r.schema)
                .unwrap_or_default();
            println!("{}", serde_json::to_string_pretty(&schema)?);
            Ok(ExitCode::SUCCESS)
        }
        Command::Upload(args) => {
            let rt = tokio::runtime::Runtime::new()?;
            rt.block_on(upload(config, args))
        }
    }
}

async fn upload(mut config: Config, args: UploadArgs) -> anyhow::Result<ExitCode> {
    args.overrides.apply(&mut config);

    let items = args
        .sources
        .iter()
        .map(|s| sources::item_from_source(s))
        .collect::<anyhow::Result<Vec<_>>>()?;

    tracing::info!(
        version = env!("CARGO_PKG_VERSION"),
        endpoint = %config.endpoint_url,
        items = items.len(),
        "starting upload"
    );

    let host = CliHost::new(config.to_upload_config(), HttpTransport::new()?);
    let outcome = ImgdropUploader::handle(&host, &items).await;

    for note in host.take_notifications() {
        eprintln!("{}: {}", note.title, note.body);
    }

    let results = outcome?;
    println!("{}", serde_json::to_string_pretty(&results)?);

    let failed = results.iter().filter(|r| !r.is_success()).count();
    eprintln!("{} uploaded, {} failed", results.len() - failed, failed);

    if failed > 0 && !args.allow_failures {
        Ok(ExitCode::FAILURE)
    } else {
        Ok(ExitCode::SUCCESS)
    }
}
