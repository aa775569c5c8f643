use std::path::{Path, PathBuf};

use clap::Parser;

/// Progressive income tax calculator service.
///
/// Every option can also be supplied through the environment variable shown
/// in `--help`.
#[derive(Debug, Clone, PartialEq, Eq, Parser)]
#[command(name = "tax-calculator", version, about, long_about = None)]
pub struct Config {
    /// Port to listen on.
    #[arg(long, env = "PORT", default_value_t = 8080)]
    pub port: u16,

    /// Base URL of the tax bracket API.
    #[arg(long, env = "TAX_API_BASE_URL", default_value = "http://localhost:5001")]
    pub tax_api_url: String,

    /// Log filter, either a bare level or a full `EnvFilter` directive.
    #[arg(long, env = "RUST_LOG", default_value = "info")]
    pub log_level: String,
}

/// Loads variables from a `.env` file before [`Config`] is parsed.
///
/// With no `path`, `.env` is searched for in the working directory and its
/// parents. Variables already present in the environment are not overridden.
/// Callers can tell a missing file apart with [`dotenvy::Error::not_found`].
pub fn load_env_file(path: Option<&Path>) -> Result<PathBuf, dotenvy::Error> {
    match path {
        Some(path) => dotenvy::from_path(path).map(|()| path.to_path_buf()),
        None => dotenvy::dotenv(),
    }
}
