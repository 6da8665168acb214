use config::ConfigBuilder;
use config::builder::DefaultState;

use crate::error::ConfigError;

// Declare the modules that make up this crate.
pub mod error;
pub mod logging;
pub mod settings;

// Re-export the core types to provide a clean public API.
pub use logging::init_tracing;
pub use settings::{Config, DatabaseSettings, LogFormat, LoggingSettings};

/// Prefix of the environment variables that override file settings,
/// e.g. `PGWRAP_LOGGING__LEVEL=debug`.
pub const ENV_PREFIX: &str = "PGWRAP";

/// Loads the application configuration.
///
/// Sources, later ones overriding earlier ones: an optional `config.toml` in
/// the working directory, then `PGWRAP_*` environment variables. `.env` is
/// loaded first if present. When no URL is configured, `DATABASE_URL` is used.
pub fn load_config() -> Result<Config, ConfigError> {
    // A missing .env file is fine; the variables may come from the environment.
    let _ = dotenvy::dotenv();

    let builder = config::Config::builder()
        .add_source(config::File::with_name("config").required(false))
        .add_source(config::Environment::with_prefix(ENV_PREFIX).separator("__"));

    build_config(builder, std::env::var("DATABASE_URL").ok())
}

fn build_config(
    builder: ConfigBuilder<DefaultState>,
    database_url: Option<String>,
) -> Result<Config, ConfigError> {
    // Attempt to deserialize the entire configuration into our `Config` struct
    let mut config = builder.build()?.try_deserialize::<Config>()?;

    if config.database.url.is_empty() {
        if let Some(url) = database_url {
            config.database.url = url;
        }
    }

    Ok(config)
}
