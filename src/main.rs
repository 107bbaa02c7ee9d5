//! CLI entry point: list a profile's images as JSON lines.

use std::io::{self, Write};
use std::sync::Arc;

use anyhow::{Context, Result};
use artstation_core::{ArtStation, DirectTransport, SiteConfig};
use clap::Parser;
use futures_util::TryStreamExt;
use serde::Serialize;
use tracing::{debug, info};

mod cli;

use cli::Args;

#[derive(Serialize)]
struct TaskLine<'a> {
    url: &'a str,
    album: Option<&'a str>,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    // Priority: RUST_LOG env var > quiet flag > verbose flag > default (info)
    let default_level = if args.quiet {
        "error"
    } else {
        match args.verbose {
            0 => "info",
            1 => "debug",
            _ => "trace",
        }
    };

    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(default_level));

    // stdout carries the task lines
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();

    debug!(?args, "CLI arguments parsed");

    let config = SiteConfig {
        page_delay_ms: args.page_delay_ms,
        proxy: args.proxy_config(),
        ..SiteConfig::default()
    };
    config.validate()?;

    let site = ArtStation::new(&args.profile_url, config)?;
    info!(username = site.username(), "listing portfolio");

    let transport = Arc::new(DirectTransport::new(site.config())?);
    let mut tasks = site.task_maker(transport).tasks();

    let mut stdout = io::stdout().lock();
    let mut total = 0usize;
    let mut in_albums = 0usize;
    while let Some(task) = tasks.try_next().await? {
        let line = TaskLine {
            url: &task.url,
            album: task.album_name(),
        };
        serde_json::to_writer(&mut stdout, &line).context("failed to encode task")?;
        writeln!(stdout).context("failed to write to stdout")?;
        total += 1;
        if task.placement.is_some() {
            in_albums += 1;
        }
    }
    stdout.flush().context("failed to write to stdout")?;

    info!(
        username = site.username(),
        total,
        in_albums,
        "listing complete"
    );
    Ok(())
}
