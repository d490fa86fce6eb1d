//! vercel-await - Entry Point
//!
//! Runs as a GitHub Action step: waits for the Vercel deployment of the
//! current commit and publishes its URL as the `url` output.

use std::process::ExitCode;

use clap::Parser;
use tracing::{error, info};

use vercel_await::app::run::run;
use vercel_await::ci::env::CiEnvironment;
use vercel_await::ci::output::set_failed;
use vercel_await::cli::Cli;
use vercel_await::logs::init_logging;
use vercel_await::utils::version_info;

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    let ci = match CiEnvironment::from_env() {
        Ok(ci) => ci,
        Err(e) => {
            set_failed(&e.to_string());
            return ExitCode::FAILURE;
        }
    };

    let options = match cli.into_options(&ci) {
        Ok(options) => options,
        Err(e) => {
            set_failed(&e.to_string());
            return ExitCode::FAILURE;
        }
    };

    if let Err(e) = init_logging(options.logs.clone()) {
        println!("Failed to initialize logging: {e}");
    }

    let version = version_info();
    info!(
        "vercel-await {} ({}, built {})",
        version.version, version.git_hash, version.build_time
    );

    match run(&options, &ci).await {
        Ok(deployment) => {
            info!("Deployment {} is ready at {}", deployment.id, deployment.url);
            ExitCode::SUCCESS
        }
        Err(e) => {
            error!("Failed to await the deployment: {e}");
            set_failed(&e.to_string());
            ExitCode::FAILURE
        }
    }
}
