//! Configuration management for default file paths.
//!
//! irc2xyz works without any configuration; this module lets users change
//! the built-in defaults (input log path, output trajectory names) through
//! an INI file instead of repeating command-line arguments.
//!
//! # Configuration Files
//!
//! Settings are searched in order, later files overriding earlier ones:
//!
//! 1. Built-in defaults
//! 2. `~/.config/irc2xyz/irc2xyz_config.cfg` (user configuration)
//! 3. `./irc2xyz_config.cfg` (current working directory)
//!
//! Command-line arguments always override configured values.
//!
//! # File Format
//!
//! ```ini
//! [general]
//! default_logfile = 1.log
//!
//! [output]
//! forward_file = irc_forward.xyz
//! backward_file = irc_backward.xyz
//! ```

use configparser::ini::Ini;
use log::{debug, warn};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Errors that can occur during configuration loading.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// I/O error when reading a configuration file
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    /// INI parsing error
    #[error("INI parsing error: {0}")]
    IniParse(String),
}

/// Program settings controlling default input and output paths.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Settings {
    /// General program settings
    pub general: GeneralSettings,
    /// Output file naming
    pub output: OutputSettings,
}

/// General program settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GeneralSettings {
    /// Log file read when no path is given on the command line (default: "1.log")
    pub default_logfile: String,
}

impl Default for GeneralSettings {
    fn default() -> Self {
        Self {
            default_logfile: "1.log".to_string(),
        }
    }
}

/// Output trajectory file naming.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OutputSettings {
    /// Forward trajectory file name (default: "irc_forward.xyz")
    pub forward_file: String,
    /// Backward trajectory file name (default: "irc_backward.xyz")
    pub backward_file: String,
}

impl Default for OutputSettings {
    fn default() -> Self {
        Self {
            forward_file: "irc_forward.xyz".to_string(),
            backward_file: "irc_backward.xyz".to_string(),
        }
    }
}

/// Loads and holds program settings with their provenance.
pub struct SettingsManager {
    settings: Settings,
    config_source: String,
}

impl SettingsManager {
    /// Load settings from the configuration file hierarchy.
    ///
    /// Starts from built-in defaults, then applies the user configuration
    /// and the working-directory configuration in that order, overriding
    /// only the keys each file actually sets. A file that exists but fails
    /// to parse is skipped with a warning rather than aborting the run.
    pub fn load() -> Self {
        let mut settings = Settings::default();
        let mut config_source = "built-in defaults".to_string();

        let mut candidates: Vec<PathBuf> = Vec::new();
        if let Some(user_path) = Self::user_config_path() {
            candidates.push(user_path);
        }
        candidates.push(PathBuf::from("irc2xyz_config.cfg"));

        for path in candidates {
            if !path.exists() {
                continue;
            }
            match Self::apply_config(&mut settings, &path) {
                Ok(()) => {
                    config_source = format!("config file ({})", path.display());
                    debug!("loaded configuration from {}", path.display());
                }
                Err(e) => {
                    warn!("ignoring config file {}: {}", path.display(), e);
                }
            }
        }

        Self {
            settings,
            config_source,
        }
    }

    /// Returns the source of the loaded configuration.
    pub fn config_source(&self) -> &str {
        &self.config_source
    }

    /// Gets a reference to the settings.
    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    /// Location of the per-user configuration file, if a home directory exists.
    fn user_config_path() -> Option<PathBuf> {
        std::env::var_os("HOME").map(|home| {
            PathBuf::from(home)
                .join(".config")
                .join("irc2xyz")
                .join("irc2xyz_config.cfg")
        })
    }

    /// Apply one INI file's keys on top of the current settings.
    fn apply_config(settings: &mut Settings, path: &Path) -> Result<(), ConfigError> {
        let content = fs::read_to_string(path)?;
        let mut ini = Ini::new();
        ini.read(content)
            .map_err(|e| ConfigError::IniParse(format!("failed to parse INI: {}", e)))?;

        if let Some(general) = ini.get_map_ref().get("general") {
            Self::apply_string(general, "default_logfile", &mut settings.general.default_logfile);
        }
        if let Some(output) = ini.get_map_ref().get("output") {
            Self::apply_string(output, "forward_file", &mut settings.output.forward_file);
            Self::apply_string(output, "backward_file", &mut settings.output.backward_file);
        }

        Ok(())
    }

    /// Override `target` with a section key when the key is present.
    fn apply_string(section: &HashMap<String, Option<String>>, key: &str, target: &mut String) {
        if let Some(Some(value)) = section.get(key) {
            *target = value.clone();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_settings() {
        let settings = Settings::default();
        assert_eq!(settings.general.default_logfile, "1.log");
        assert_eq!(settings.output.forward_file, "irc_forward.xyz");
        assert_eq!(settings.output.backward_file, "irc_backward.xyz");
    }

    #[test]
    fn test_apply_config_overrides_present_keys_only() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("irc2xyz_config.cfg");
        fs::write(
            &path,
            "[output]\nforward_file = path_fwd.xyz\n",
        )
        .unwrap();

        let mut settings = Settings::default();
        SettingsManager::apply_config(&mut settings, &path).unwrap();

        assert_eq!(settings.output.forward_file, "path_fwd.xyz");
        assert_eq!(settings.output.backward_file, "irc_backward.xyz");
        assert_eq!(settings.general.default_logfile, "1.log");
    }

    #[test]
    fn test_apply_config_all_sections() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("irc2xyz_config.cfg");
        fs::write(
            &path,
            "[general]\ndefault_logfile = run7.log\n[output]\nforward_file = f.xyz\nbackward_file = b.xyz\n",
        )
        .unwrap();

        let mut settings = Settings::default();
        SettingsManager::apply_config(&mut settings, &path).unwrap();

        assert_eq!(settings.general.default_logfile, "run7.log");
        assert_eq!(settings.output.forward_file, "f.xyz");
        assert_eq!(settings.output.backward_file, "b.xyz");
    }
}
