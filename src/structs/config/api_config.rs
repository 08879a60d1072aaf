use serde::{Deserialize, Serialize};
use crate::config::constants::API_KEY_ENV;
use crate::helpers::config_helper::ConfigHelper;

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct ApiConfig {
    #[serde(default = "ConfigHelper::default_base_url")]
    pub base_url: String,

    #[serde(default)]
    pub api_key_env: Option<String>,

    #[serde(default = "ConfigHelper::default_request_timeout_secs")]
    pub request_timeout_secs: u64,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: ConfigHelper::default_base_url(),
            api_key_env: Some(API_KEY_ENV.to_string()),
            request_timeout_secs: ConfigHelper::default_request_timeout_secs(),
        }
    }
}
