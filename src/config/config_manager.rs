use std::fs;
use crate::config::constants::CONFIG_FILE;
use crate::errors::{LexlineError, LexlineResult};
use crate::structs::config::config::Config;

pub struct ConfigManager;

impl ConfigManager {

    pub fn load() -> LexlineResult<Config> {
        let Some(config_path) = CONFIG_FILE.as_ref() else {
            return Ok(Config::default());
        };

        if config_path.exists() {
            log::info!("📋 Loading config from: {}", config_path.display());
            let content = fs::read_to_string(config_path)?;
            let config: Config = toml::from_str(&content)?;
            return Ok(config);
        }

        Ok(Config::default())
    }

    pub fn create_sample_config() -> LexlineResult<()> {
        let sample_config = r#"# Lexline Configuration

[api]
# Base URL of the draft/assistant backend
base_url = "https://api.lexline.example/v1"

# Environment variable holding the API key
api_key_env = "LEXLINE_API_KEY"

# Timeout for draft fetch/save/compile calls
request_timeout_secs = 30

[editor]
# Quiet period before a dirty review session is autosaved (milliseconds)
autosave_debounce_ms = 2000

# Cap on the draft excerpt sent to the assistant as chat context
max_context_chars = 20000
"#;

        let Some(config_path) = CONFIG_FILE.as_ref() else {
            return Err(LexlineError::config_error(
                "Could not resolve a home directory for the config file",
                None,
                Some("Set $HOME and retry"),
            ));
        };

        if config_path.exists() {
            return Err(LexlineError::ConfigurationFileError {
                path: config_path.display().to_string(),
                reason: "configuration file already exists".to_string(),
            });
        }

        if let Some(parent) = config_path.parent() {
            fs::create_dir_all(parent)?;
        }

        fs::write(config_path, sample_config)?;
        log::info!("✅ Sample configuration written to {}", config_path.display());
        Ok(())
    }

    pub fn validate_config(config: &Config) -> LexlineResult<()> {
        if config.api.base_url.trim().is_empty() {
            return Err(LexlineError::config_error(
                "api.base_url must not be empty",
                Some("api.base_url"),
                Some("Point it at your draft backend, e.g. https://api.lexline.example/v1"),
            ));
        }

        if config.editor.autosave_debounce_ms == 0 {
            return Err(LexlineError::config_error(
                "autosave debounce must be positive",
                Some("editor.autosave_debounce_ms"),
                Some("Use at least a few hundred milliseconds"),
            ));
        }

        Ok(())
    }
}
