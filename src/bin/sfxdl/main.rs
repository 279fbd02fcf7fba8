//! Command-line entrypoint for `sfxdl`.
//!
//! Parses the arguments, installs logging, fetches the sound list and hands
//! it to the library's worker pool. Failed items are listed at the end but
//! do not change the exit status.
mod args;

use args::Args;
use clap::Parser;
use color_eyre::eyre::{Result, WrapErr};
use console::style;
use indicatif::HumanBytes;
use sfxdl::{DownloaderBuilder, ManifestSource, RunSummary};
use std::path::Path;
use tracing_subscriber::EnvFilter;

fn init_tracing(level: &str) {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .compact()
        .try_init()
        .ok();
}

fn print_summary(summary: &RunSummary, output: &Path) {
    println!(
        "{} {} of {} files ({}) into {}",
        style("Finished").green().bold(),
        summary.succeeded(),
        summary.attempted(),
        HumanBytes(summary.bytes()),
        output.display()
    );

    if summary.failed() > 0 {
        println!(
            "{} {} files failed:",
            style("Warning").yellow().bold(),
            summary.failed()
        );
        for (name, reason) in summary.failures() {
            println!("  {} {}: {}", style("✗").red(), name, reason);
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    color_eyre::install()?;

    let args = Args::parse();
    init_tracing(args.log_level());

    let source = ManifestSource::new(&args.domain)?
        .with_path(args.soundlist.as_str())
        .with_suffix(args.suffix.as_str());

    let builder = match args.quiet {
        true => DownloaderBuilder::hidden(),
        false => DownloaderBuilder::new(),
    };
    let mut builder = builder
        .directory(args.output.clone())
        .pool(args.pool())
        .chunk_size(args.chunk_size);
    if let Some(ref proxy) = args.proxy {
        let proxy = reqwest::Proxy::all(proxy.as_str())
            .wrap_err_with(|| format!("invalid proxy {}", proxy))?;
        builder = builder.proxy(proxy);
    }
    let downloader = builder.build()?;

    let manifest = downloader
        .fetch_manifest(&source)
        .await
        .wrap_err("could not retrieve the sound list")?;

    let results = downloader.download(&manifest).await;
    print_summary(&RunSummary::from_results(&results), &args.output);

    Ok(())
}
