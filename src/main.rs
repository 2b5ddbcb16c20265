mod cli;

use std::process::ExitCode;

use clap::Parser;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use ytgrab::downloader::{tools, Downloader};

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| "ytgrab=info".into());
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .try_init();
}

#[tokio::main]
async fn main() -> ExitCode {
    init_tracing();
    let args = cli::Cli::parse();

    let tool = tools::probe_ytdlp();
    match &tool.version {
        Some(version) => info!("yt-dlp {version} at {}", tool.path),
        None => warn!("yt-dlp not detected at {}; the download will fail", tool.path),
    }

    let downloader = Downloader::new()
        .with_network(args.network_config())
        .with_output_dir(args.output_dir.clone());

    let outcome = downloader.run(&args.to_request()).await;
    println!("{}", outcome.report);

    if outcome.succeeded {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    }
}
