mod batch;
mod cli;
mod config;
mod destination;
mod mapper;
mod model;
mod translate;
mod upload;

use std::io;
use std::process::ExitCode;

use anyhow::Result;
use clap::Parser;
use tracing::{error, info};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use batch::RunSummary;
use destination::codebase::CodebaseClient;
use destination::ReferenceData;
use upload::Uploader;

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    init_tracing();

    let args = cli::Args::parse();

    match run(args).await {
        Ok(summary) => {
            summary.print();
            ExitCode::SUCCESS
        }
        Err(e) => {
            error!("Critical failure: {e:#}");
            ExitCode::from(1)
        }
    }
}

/// Logs go to stderr so dry-run payloads on stdout stay clean.
fn init_tracing() {
    tracing_subscriber::registry()
        .with(fmt::layer().compact().with_target(false).with_writer(io::stderr))
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();
}

async fn run(args: cli::Args) -> Result<RunSummary> {
    let config = config::load_config()?;
    let mode = args.mode();
    info!(project = %args.project, input = %args.input.display(), %mode, "Starting migration");

    let rows = model::source_record::open_records(&args.input)?;

    let client = CodebaseClient::new(&config, &args.project);
    let refs = ReferenceData::load(&client).await?;

    let uploader = Uploader::new(&client, mode);
    let mut stdout = io::stdout().lock();
    Ok(batch::run(rows, &refs, &uploader, &mut stdout).await)
}
