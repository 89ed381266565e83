use std::collections::HashMap;
use std::path::Path;
use std::time::Duration;

use config::{Config, File};
use serde::Deserialize;

use super::Environment;

const ENV_PREFIX: &str = "APP";
const ENVIRONMENT_VAR: &str = "APP_ENVIRONMENT";
const LEGACY_BASE_URL_VAR: &str = "OLLAMA_BASE_URL";
const LEGACY_MODEL_VAR: &str = "OLLAMA_MODEL";

#[derive(Debug, Clone, Deserialize)]
pub struct Settings {
    #[serde(default)]
    pub environment: Environment,
    pub server: ServerSettings,
    pub ollama: OllamaSettings,
    pub summarization: SummarizationSettings,
    pub upload: UploadSettings,
    pub extraction: ExtractionSettings,
    pub logging: LoggingSettings,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ServerSettings {
    pub host: String,
    pub port: u16,
}

#[derive(Debug, Clone, Deserialize)]
pub struct OllamaSettings {
    pub base_url: String,
    pub default_model: String,
    pub health_timeout_secs: u64,
    pub list_timeout_secs: u64,
    pub generate_timeout_secs: u64,
    #[serde(default)]
    pub max_tokens: Option<u32>,
}

impl OllamaSettings {
    pub fn health_timeout(&self) -> Duration {
        Duration::from_secs(self.health_timeout_secs)
    }

    pub fn list_timeout(&self) -> Duration {
        Duration::from_secs(self.list_timeout_secs)
    }

    pub fn generate_timeout(&self) -> Duration {
        Duration::from_secs(self.generate_timeout_secs)
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct SummarizationSettings {
    pub context_budget_chars: usize,
}

#[derive(Debug, Clone, Deserialize)]
pub struct UploadSettings {
    pub scratch_dir: String,
    pub max_upload_bytes: usize,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ExtractionSettings {
    pub timeout_secs: u64,
}

impl ExtractionSettings {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct LoggingSettings {
    pub level: String,
    pub json: bool,
}

impl Default for LoggingSettings {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            json: false,
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum SettingsError {
    #[error("{0}")]
    Environment(String),
    #[error("failed to load configuration: {0}")]
    Load(#[from] config::ConfigError),
    #[error("invalid configuration: {0}")]
    Invalid(String),
}

impl Settings {
    /// Loads settings from the process environment and `appsettings.<env>.toml`
    /// in the working directory.
    pub fn load() -> Result<Self, SettingsError> {
        let vars: HashMap<String, String> = std::env::vars().collect();
        Self::load_from(&vars, Path::new("."))
    }

    /// Layers, later wins: built-in defaults, the optional environment file
    /// in `config_dir`, `APP_*` variables (`__` nests), then the legacy
    /// `OLLAMA_BASE_URL` / `OLLAMA_MODEL` variables.
    pub fn load_from(
        vars: &HashMap<String, String>,
        config_dir: &Path,
    ) -> Result<Self, SettingsError> {
        let environment: Environment = vars
            .get(ENVIRONMENT_VAR)
            .cloned()
            .unwrap_or_else(|| Environment::Local.as_str().to_string())
            .try_into()
            .map_err(SettingsError::Environment)?;

        let env_source: config::Map<String, String> = vars
            .iter()
            .map(|(k, v)| (k.clone(), v.clone()))
            .collect();

        let settings_file = config_dir.join(format!("appsettings.{}.toml", environment.as_str()));

        let configuration = Config::builder()
            .set_default("server.host", "0.0.0.0")?
            .set_default("server.port", 8000)?
            .set_default("ollama.base_url", "http://localhost:11434")?
            .set_default("ollama.default_model", "llama2")?
            .set_default("ollama.health_timeout_secs", 5)?
            .set_default("ollama.list_timeout_secs", 10)?
            .set_default("ollama.generate_timeout_secs", 300)?
            .set_default("summarization.context_budget_chars", 8000)?
            .set_default("upload.scratch_dir", "uploads")?
            .set_default("upload.max_upload_bytes", 50 * 1024 * 1024)?
            .set_default("extraction.timeout_secs", 30)?
            .set_default("logging.level", "info")?
            .set_default("logging.json", false)?
            .add_source(File::from(settings_file).required(false))
            .add_source(
                config::Environment::with_prefix(ENV_PREFIX)
                    .prefix_separator("_")
                    .separator("__")
                    .try_parsing(true)
                    .source(Some(env_source)),
            )
            .set_override("environment", environment.as_str())?
            .set_override_option("ollama.base_url", vars.get(LEGACY_BASE_URL_VAR).cloned())?
            .set_override_option("ollama.default_model", vars.get(LEGACY_MODEL_VAR).cloned())?
            .build()?;

        let settings: Settings = configuration.try_deserialize()?;
        settings.validate()?;
        Ok(settings)
    }

    fn validate(&self) -> Result<(), SettingsError> {
        let base_url = self.ollama.base_url.trim();
        if !(base_url.starts_with("http://") || base_url.starts_with("https://")) {
            return Err(SettingsError::Invalid(format!(
                "ollama.base_url must be an http(s) URL, got '{base_url}'"
            )));
        }
        if self.ollama.default_model.trim().is_empty() {
            return Err(SettingsError::Invalid(
                "ollama.default_model must not be empty".to_string(),
            ));
        }
        if self.summarization.context_budget_chars == 0 {
            return Err(SettingsError::Invalid(
                "summarization.context_budget_chars must be positive".to_string(),
            ));
        }
        if self.upload.max_upload_bytes == 0 {
            return Err(SettingsError::Invalid(
                "upload.max_upload_bytes must be positive".to_string(),
            ));
        }
        if self.ollama.generate_timeout_secs == 0 || self.extraction.timeout_secs == 0 {
            return Err(SettingsError::Invalid(
                "timeouts must be at least one second".to_string(),
            ));
        }
        Ok(())
    }
}
