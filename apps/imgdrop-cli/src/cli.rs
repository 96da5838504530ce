use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

use crate::config::Config;

#[derive(Parser, Debug)]
#[command(name = "imgdrop", version, about = "Upload images to an HTTP image host")]
pub struct Cli {
    /// Config file to use instead of the platform default
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Upload local files and http(s) URLs in one concurrent batch
    Upload(UploadArgs),
    /// Print the uploader's config schema as JSON
    Schema,
}

#[derive(Args, Debug)]
pub struct UploadArgs {
    /// Local file paths or http(s) URLs
    #[arg(required = true)]
    pub sources: Vec<String>,

    #[command(flatten)]
    pub overrides: Overrides,

    /// Exit with status 0 even if some items failed
    #[arg(long)]
    pub allow_failures: bool,
}

/// Flags that take precedence over the config file.
#[derive(Args, Debug, Default)]
pub struct Overrides {
    /// Upload endpoint; the encoded file name is appended
    #[arg(long)]
    pub endpoint: Option<String>,
    /// Dotted path to the URL in the JSON response
    #[arg(long, conflicts_with = "raw_response")]
    pub response_path: Option<String>,
    /// Use the raw response body as the URL
    #[arg(long)]
    pub raw_response: bool,
    /// Per-request timeout in milliseconds
    #[arg(long)]
    pub timeout_ms: Option<u64>,
}

impl Overrides {
    pub fn apply(&self, config: &mut Config) {
        if let Some(endpoint) = &self.endpoint {
            config.endpoint_url = endpoint.clone();
        }
        if let Some(path) = &self.response_path {
            config.response_path = path.clone();
        }
        if self.raw_response {
            config.response_path.clear();
        }
        if let Some(ms) = self.timeout_ms {
            config.timeout_millis = ms;
        }
    }
}
