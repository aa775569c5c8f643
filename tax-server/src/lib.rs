pub mod api;
pub mod config;
pub mod logging;
pub mod server;

pub use config::Config;
