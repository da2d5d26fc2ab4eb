pub const DEFAULT_BASE_URL: &str = "http://localhost:5000";

pub const DEFAULT_TIMEOUT_SECS: u64 = 60;

pub fn default_sidebar() -> bool {
    true
}

pub fn is_default_sidebar(value: &bool) -> bool {
    *value == default_sidebar()
}
