use config::{Config, ConfigError, Environment, File};
use once_cell::sync::OnceCell;
use std::env;
use std::path::{Path, PathBuf};
use tracing::debug;
pub mod models;
pub use models::*;

/// Environment variable prefix, e.g. `APPOINTLY__API__BASE_URL`.
pub const ENV_PREFIX: &str = "APPOINTLY";

/// Loads the configuration from `config/default`, `config/{RUN_ENV}` and the
/// `APPOINTLY__*` environment variables, in that order of precedence.
///
/// Both files are optional; every section falls back to its defaults.
pub fn load_config() -> Result<AppConfig, ConfigError> {
    ensure_dotenv_loaded();

    let config_dir = env::var("APPOINTLY_CONFIG_DIR")
        .map(PathBuf::from)
        .unwrap_or_else(|_| PathBuf::from("config"));
    load_config_from(&config_dir)
}

/// Same as [`load_config`] but reads the layered files from `config_dir`.
pub fn load_config_from(config_dir: &Path) -> Result<AppConfig, ConfigError> {
    let run_env = env::var("RUN_ENV").unwrap_or_else(|_| "debug".to_string());

    let default_path = config_dir.join("default");
    let env_path = config_dir.join(&run_env);

    debug!(
        "Loading config from {} and {}",
        default_path.display(),
        env_path.display()
    );

    let builder = Config::builder()
        .add_source(File::with_name(&default_path.to_string_lossy()).required(false))
        .add_source(File::with_name(&env_path.to_string_lossy()).required(false))
        .add_source(Environment::with_prefix(ENV_PREFIX).separator("__"));

    builder.build()?.try_deserialize()
}

static INIT_DOTENV: OnceCell<()> = OnceCell::new();

/// Loads the dotenv file once per process.
///
/// The path is taken from `DOTENV_OVERRIDE`, defaulting to `.env`. A missing
/// file is not an error. Returns the path that was used.
pub fn ensure_dotenv_loaded() -> String {
    let dotenv_path = env::var("DOTENV_OVERRIDE").unwrap_or_else(|_| ".env".to_string());

    INIT_DOTENV.get_or_init(|| {
        dotenv::from_filename(&dotenv_path).ok();
    });

    dotenv_path
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_without_files() {
        let dir = PathBuf::from("does/not/exist");
        let config = load_config_from(&dir).expect("defaults should load");
        assert_eq!(config.slots, SlotConfig::default());
        assert_eq!(config.admin.page_size, 5);
        assert!(config.api.base_url.ends_with("/api"));
    }

    #[test]
    fn test_partial_sections_keep_defaults() {
        let json = r#"{ "slots": { "interval_minutes": 15 } }"#;
        let config: AppConfig = serde_json::from_str(json).unwrap();
        assert_eq!(config.slots.interval_minutes, 15);
        assert_eq!(config.slots.start, "09:00");
        assert_eq!(config.api.timeout_secs, 30);
    }
}
