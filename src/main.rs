use anyhow::{anyhow, Result};
use is_terminal::IsTerminal;
use std::sync::Arc;
use subclaim::{Config, Gateway, SharedConfig};
use tokio::signal;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<()> {
    tracing_init();

    let mut first_args = std::env::args().take(2);
    let (program_name, config_file) = (
        first_args.next().unwrap_or("subclaim".to_string()),
        first_args.next(),
    );

    let config = config_init(&program_name, config_file)?;
    let provider = config.provider()?;
    let gateway = Arc::new(Gateway::new(config.domain.clone(), provider));

    tracing::info!("claiming subdomains of {}", gateway.domain());
    tracing::info!("API listening on {}", &config.api_bind_addr);
    subclaim::new_http(config.clone(), gateway, shutdown_signal())?.await?;

    tracing::info!("goodbye");
    Ok(())
}

async fn shutdown_signal() {
    match signal::ctrl_c().await {
        Ok(()) => tracing::info!("quitting from signal"),
        Err(err) => tracing::error!("unable to listen for shutdown signal: {err}"),
    }
}

fn tracing_init() {
    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer().with_ansi(std::io::stdout().is_terminal()))
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "subclaim=info".into()),
        )
        .init();
}

fn config_init(program_name: &str, config_file: Option<String>) -> Result<SharedConfig> {
    match config_file {
        None => Err(anyhow!("usage: {program_name} /path/to/config.json")),
        Some(config_file) => {
            let config = Config::try_from_file(&config_file)?;
            tracing::debug!("loaded config from {config_file}");
            Ok(Arc::new(config))
        }
    }
}
