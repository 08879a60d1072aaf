use serde::{Deserialize, Serialize};
use crate::structs::config::api_config::ApiConfig;
use crate::structs::config::editor_config::EditorConfig;

#[derive(Debug, Default, Deserialize, Serialize, Clone)]
pub struct Config {
    #[serde(default)]
    pub api: ApiConfig,

    #[serde(default)]
    pub editor: EditorConfig,
}
