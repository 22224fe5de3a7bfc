use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::general::transpose::OutOfRangePolicy;

pub const DEFAULT_CONFIG_FILE: &str = "config.json";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AuditionConfig {
    /// Substring matched against output port names. Empty means ask.
    pub output_port: String,
    pub note_ms: u64,
    pub velocity: u8,
}

impl Default for AuditionConfig {
    fn default() -> Self {
        Self {
            output_port: String::new(),
            note_ms: 300,
            velocity: 100,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub debug: bool,
    pub out_of_range: OutOfRangePolicy,
    pub skip_drum_channel: bool,
    pub default_extension: String,
    pub audition: AuditionConfig,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            debug: false,
            out_of_range: OutOfRangePolicy::Clamp,
            skip_drum_channel: false,
            default_extension: "mid".to_string(),
            audition: AuditionConfig::default(),
        }
    }
}

impl Config {
    /// Load settings from `path`. A missing file yields the defaults, a malformed one is an error.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        match std::fs::read_to_string(path) {
            Ok(text) => {
                let config: Config = serde_json::from_str(&text)?;
                log::debug!("loaded config from {}", path.display());
                Ok(config)
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                log::debug!("no config at {}, using defaults", path.display());
                Ok(Self::default())
            }
            Err(e) => Err(Error::io(path, e)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_file_gives_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let config = Config::load(dir.path().join("nope.json")).unwrap();
        assert_eq!(config, Config::default());
    }

    #[test]
    fn partial_file_fills_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");
        std::fs::write(
            &path,
            r#"{ "out_of_range": "reject", "audition": { "output_port": "IAC" } }"#,
        )
        .unwrap();

        let config = Config::load(&path).unwrap();
        assert_eq!(config.out_of_range, OutOfRangePolicy::Reject);
        assert_eq!(config.audition.output_port, "IAC");
        assert_eq!(config.audition.note_ms, 300);
        assert_eq!(config.default_extension, "mid");
        assert!(!config.debug);
    }

    #[test]
    fn malformed_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");
        std::fs::write(&path, "{ debug: yes").unwrap();
        assert!(matches!(Config::load(&path), Err(Error::Config(_))));
    }
}
