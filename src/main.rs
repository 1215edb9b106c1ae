use anyhow::{Context as _, bail};
use slackrelay::action::ReplyAction;
use slackrelay::adapters::SlackWebClient;
use slackrelay::params::Params;
use std::sync::Arc;
use tracing::{error, info};

const USAGE: &str = "Usage: slackrelay <channel|#channel|@user> <text>...";

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load environment variables from .env file if it exists
    let _ = dotenvy::dotenv();

    // Initialize tracing subscriber for structured logging
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "slackrelay=info".into()),
        )
        .init();

    info!(
        name = env!("CARGO_PKG_NAME"),
        version = env!("CARGO_PKG_VERSION"),
        description = env!("CARGO_PKG_DESCRIPTION"),
        "Starting application"
    );

    let (destination, text) = parse_args(std::env::args().skip(1))?;

    let params = Params::new()?;
    info!(?params, "Application parameters loaded");

    let client = Arc::new(SlackWebClient::new(&params)?);
    client
        .refresh()
        .await
        .context("Loading Slack directory")?;

    let action = ReplyAction::new(client);
    if let Err(err) = action.send_text_to(&destination, &text).await {
        error!(?err, %destination, "Failed to send message");
        return Err(err.into());
    }

    info!(%destination, "Message sent");
    Ok(())
}

/// Split arguments into destination and message text
fn parse_args(mut args: impl Iterator<Item = String>) -> anyhow::Result<(String, String)> {
    let destination = args.next().context(USAGE)?;
    let text = args.collect::<Vec<_>>().join(" ");

    if text.trim().is_empty() {
        bail!(USAGE);
    }

    Ok((destination, text))
}
