use anyhow::{Context, Result};
use clap::Parser;
use gh_client::{OctocrabClient, TokenResolver};
use gh_queue_scaler::cli::Cli;
use gh_queue_scaler::{logger, QueueLengthScaler};
use std::process::ExitCode;

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    // Load .env before the logger so RUST_LOG from it is honored
    let dotenv = dotenvy::dotenv();
    logger::init(cli.verbose);
    match dotenv {
        Ok(path) => log::debug!("Loaded .env file from: {:?}", path),
        Err(_) => log::debug!(".env file not found, will rely on environment variables"),
    }

    match run(&cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("Error: {:#}", err);
            ExitCode::FAILURE
        }
    }
}

async fn run(cli: &Cli) -> Result<()> {
    let config = cli.load_config().context("Invalid configuration")?;

    let token = match &config.token {
        Some(token) => token.clone(),
        None => TokenResolver::new().get_token().await?,
    };
    let client = OctocrabClient::connect(&config.api_url, token)?;
    let scaler = QueueLengthScaler::new(client, config);

    if cli.json {
        let report = scaler.metric_report().await?;
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        let queue_length = scaler.workflow_queue_length().await?;
        println!("{}", queue_length);
    }

    Ok(())
}
