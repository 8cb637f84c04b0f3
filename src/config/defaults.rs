use std::path::PathBuf;

pub fn default_out_dir() -> PathBuf {
    PathBuf::from("reports_parsed")
}

pub fn default_concurrency() -> usize {
    4
}

pub fn default_timeout_sec() -> u64 {
    30
}

pub fn default_user_agent() -> String {
    format!("c4mine/{}", env!("CARGO_PKG_VERSION"))
}

pub fn default_max_attempts() -> u32 {
    3
}

pub fn default_backoff_base_ms() -> u64 {
    1000
}
