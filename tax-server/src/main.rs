use clap::Parser;
use tracing::{info, warn};

use tax_server::{Config, config, logging, server};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Must run before parsing so `.env` values reach clap's env fallbacks.
    let env_file = config::load_env_file(None);
    let config = Config::parse();

    logging::init_logging(&config.log_level)?;
    match env_file {
        Ok(path) => info!(path = %path.display(), "loaded environment file"),
        Err(err) if err.not_found() => {
            info!("no .env file found, using environment variables and defaults")
        }
        Err(err) => warn!(error = %err, "failed to load .env file"),
    }

    server::run(config).await
}
