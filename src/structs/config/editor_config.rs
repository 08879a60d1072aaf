use serde::{Deserialize, Serialize};
use crate::helpers::config_helper::ConfigHelper;

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct EditorConfig {
    /// Quiet period before a dirty session is autosaved. The timer delays
    /// the save call; it does not cancel a request already in flight.
    #[serde(default = "ConfigHelper::default_autosave_debounce_ms")]
    pub autosave_debounce_ms: u64,

    /// Cap on the draft excerpt sent as chat context.
    #[serde(default = "ConfigHelper::default_max_context_chars")]
    pub max_context_chars: usize,
}

impl Default for EditorConfig {
    fn default() -> Self {
        Self {
            autosave_debounce_ms: ConfigHelper::default_autosave_debounce_ms(),
            max_context_chars: ConfigHelper::default_max_context_chars(),
        }
    }
}
