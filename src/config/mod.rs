pub mod config;

pub use self::config::{load_config, AppConfig, DEFAULT_SETTINGS_FILE};
