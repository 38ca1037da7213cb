mod config;
mod database;
mod logging;

pub use config::DatabaseConfig;
pub use database::setup_database;
pub use logging::setup_logging;
