use anyhow::{Context, Result};
use config::{Config, Environment, File, FileFormat};
use serde::Deserialize;
use url::Url;

pub const DEFAULT_SETTINGS_FILE: &str = "Settings.toml";

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub base: BaseConfig,
    pub amazon: AmazonConfig,
    pub http: HttpConfig,
    pub file: FileConfig,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct BaseConfig {
    pub name: String,
    pub version: String,
}

impl Default for BaseConfig {
    fn default() -> Self {
        Self {
            name: env!("CARGO_PKG_NAME").to_string(),
            version: env!("CARGO_PKG_VERSION").to_string(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct AmazonConfig {
    /// Site origin used to resolve relative product links.
    pub origin: String,
    pub bestsellers_url: String,
    pub pages: Vec<u32>,
    pub target_per_page: usize,
}

impl Default for AmazonConfig {
    fn default() -> Self {
        Self {
            origin: "https://www.amazon.com.tr".to_string(),
            bestsellers_url: "https://www.amazon.com.tr/gp/bestsellers/computers/12601907031"
                .to_string(),
            pages: vec![1, 2],
            target_per_page: 50,
        }
    }
}

impl AmazonConfig {
    pub fn origin_url(&self) -> Result<Url> {
        Url::parse(&self.origin).with_context(|| format!("Invalid amazon.origin: {}", self.origin))
    }

    pub fn listing_page_url(&self, page: u32) -> String {
        format!("{}?ie=UTF8&pg={}", self.bestsellers_url, page)
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct HttpConfig {
    pub accept: String,
    pub accept_language: String,
    pub user_agents: Vec<String>,
    pub retries: u32,
    pub timeout_secs: u64,
    pub delay_min_ms: u64,
    pub delay_max_ms: u64,
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self {
            accept: "text/html,application/xhtml+xml,application/xml;q=0.9,*/*;q=0.8".to_string(),
            accept_language: "tr-TR,tr;q=0.9,en-US;q=0.8,en;q=0.7".to_string(),
            user_agents: vec![
                "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/122.0.0.0 Safari/537.36".to_string(),
                "Mozilla/5.0 (Macintosh; Intel Mac OS X 13_5) AppleWebKit/605.1.15 (KHTML, like Gecko) Version/16.5 Safari/605.1.15".to_string(),
                "Mozilla/5.0 (X11; Linux x86_64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/122.0.0.0 Safari/537.36".to_string(),
            ],
            retries: 3,
            timeout_secs: 12,
            delay_min_ms: 800,
            delay_max_ms: 1600,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct FileConfig {
    pub output_csv: String,
    pub previous_csv: String,
    pub differences_csv: String,
}

impl Default for FileConfig {
    fn default() -> Self {
        Self {
            output_csv: "amazon_bestsellers.csv".to_string(),
            previous_csv: "amazon_bestsellers_previous.csv".to_string(),
            differences_csv: "amazon_bestsellers_differences.csv".to_string(),
        }
    }
}

/// Loads the settings file (optional) and `APP_` environment overrides,
/// e.g. `APP_HTTP__RETRIES=5`.
pub fn load_config(settings_path: &str) -> Result<AppConfig> {
    let settings = Config::builder()
        .add_source(File::new(settings_path, FileFormat::Toml).required(false))
        .add_source(
            Environment::with_prefix("APP")
                .prefix_separator("_")
                .separator("__"),
        )
        .build()
        .context("Failed to read configuration sources")?;

    let config = settings
        .try_deserialize::<AppConfig>()
        .context("Failed to deserialize configuration")?;

    // Fail at start-up rather than on the first relative link.
    config.amazon.origin_url()?;

    Ok(config)
}
