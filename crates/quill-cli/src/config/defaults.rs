use std::path::PathBuf;

pub fn default_root() -> PathBuf {
    PathBuf::from(".")
}

pub fn default_readme_name() -> String {
    "README.md".to_string()
}

pub fn default_timeout() -> u64 {
    300 // five minutes
}

pub fn default_port() -> u16 {
    8080
}

pub fn default_browser() -> bool {
    true
}
