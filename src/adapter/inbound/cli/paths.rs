//! Default file locations.
//!
//! Everything lives under `~/.talika/`:
//! - `~/.talika/config.toml` - configuration, read when `--config` is absent

use std::path::PathBuf;

/// Returns the talika home directory (`~/.talika/`).
pub fn home_dir() -> PathBuf {
    dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(".talika")
}

/// Returns the default config file path (`~/.talika/config.toml`).
pub fn default_config() -> PathBuf {
    home_dir().join("config.toml")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn paths_are_under_talika_home() {
        assert!(home_dir().ends_with(".talika"));
        assert!(default_config().starts_with(home_dir()));
        assert!(default_config().ends_with(".talika/config.toml"));
    }
}
