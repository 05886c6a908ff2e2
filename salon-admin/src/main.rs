//! salon-admin entry point

use clap::Parser;
use salon_admin::Cli;
use salon_client::{ClientConfig, RestClient};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env file
    let _ = dotenvy::dotenv();

    // Initialize tracing; stdout carries command output
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "salon_admin=info,salon_client=info".into()),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let config = ClientConfig::from_env()?;
    tracing::debug!(url = %config.base_url, bucket = %config.storage_bucket, "Backend configured");
    let client = RestClient::new(config)?;

    let output = salon_admin::commands::dispatch(cli, client).await?;
    print!("{output}");
    Ok(())
}
