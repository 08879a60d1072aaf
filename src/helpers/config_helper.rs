pub struct ConfigHelper;

impl ConfigHelper {
    pub fn default_base_url() -> String {
        "https://api.lexline.example/v1".to_string()
    }

    pub fn default_request_timeout_secs() -> u64 {
        30
    }

    pub fn default_autosave_debounce_ms() -> u64 {
        2000
    }

    pub fn default_max_context_chars() -> usize {
        20_000
    }
}
