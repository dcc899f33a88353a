use std::path::PathBuf;

use anyhow::{bail, Result};
use clap::Parser;
use spdlog::{info, warn};

use mdpublish::client::ApiClient;
use mdpublish::config::TOKEN_ENV_VAR;
use mdpublish::logger::configure_logger;
use mdpublish::processor::PublishSettings;
use mdpublish::runner::run_batch;

use crate::config::open_config;

mod config;

const CFG_FILE_NAME: &str = "mdpublish.toml";

#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// Config path
    #[arg(short, long)]
    config_path: Option<String>,

    /// Directory with the markdown posts, overriding the configured one
    #[arg(short, long)]
    posts_dir: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();
    let config_path = args.config_path.map(PathBuf::from);

    let config = match open_config(config_path) {
        Ok(config) => config,
        Err(err) => {
            eprintln!("{}", err);
            eprintln!("Please run mdpublish --help");
            bail!("invalid configuration");
        }
    };

    if let Err(err) = configure_logger(&config) {
        warn!("Error creating logger sinks. Using console instead. Desc={}", err);
    }

    let posts_dir = args.posts_dir.unwrap_or_else(|| config.paths.posts_dir.clone());
    if !posts_dir.is_dir() {
        bail!("posts directory {} does not exist or is not a directory", posts_dir.display());
    }

    let Some(access_token) = config.access_token() else {
        bail!("no access token: set {} or [api] access_token", TOKEN_ENV_VAR);
    };

    if config.api.publication_id.trim().is_empty() {
        bail!("[api] publication_id must not be empty");
    }

    let client = ApiClient::new(config.endpoint(), access_token);
    let settings = PublishSettings {
        publication_id: config.api.publication_id.clone(),
        post_status: config.post_status(),
        update_existing: config.update_existing(),
    };

    info!("Publishing posts from {}", posts_dir.display());

    let summary = run_batch(&client, &posts_dir, &settings).await?;

    info!(
        "Finished: {} created, {} updated, {} failed",
        summary.created, summary.updated, summary.failed
    );

    if !summary.is_success() {
        bail!(
            "{} of {} post(s) failed",
            summary.failed,
            summary.failed + summary.succeeded()
        );
    }

    Ok(())
}
