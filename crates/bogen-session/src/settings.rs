// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Config file persistence.

use std::path::{Path, PathBuf};

use bogen_core::AppConfig;
use bogen_core::error::Result;
use tracing::{debug, warn};

const CONFIG_FILE: &str = "config.json";

/// Load `config.json` from `data_dir`, falling back to defaults when it is
/// missing or unreadable.
pub fn load_config(data_dir: &Path) -> AppConfig {
    let path = data_dir.join(CONFIG_FILE);
    let data = match std::fs::read_to_string(&path) {
        Ok(data) => data,
        Err(err) => {
            debug!(path = %path.display(), error = %err, "no config file; using defaults");
            return AppConfig::default();
        }
    };
    match serde_json::from_str(&data) {
        Ok(config) => config,
        Err(err) => {
            warn!(path = %path.display(), error = %err, "config file unreadable; using defaults");
            AppConfig::default()
        }
    }
}

/// Write `config` to `config.json` in `data_dir`.
pub fn persist_config(data_dir: &Path, config: &AppConfig) -> Result<()> {
    std::fs::create_dir_all(data_dir)?;
    let path = data_dir.join(CONFIG_FILE);
    let json = serde_json::to_string_pretty(config)?;
    std::fs::write(&path, json)?;
    Ok(())
}

/// Directory exports go to: the configured one, else `<data_dir>/exports`.
pub fn export_dir(config: &AppConfig, data_dir: &Path) -> PathBuf {
    config
        .export_dir
        .clone()
        .unwrap_or_else(|| data_dir.join("exports"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use bogen_core::PageSizePolicy;

    #[test]
    fn missing_config_gives_defaults() {
        let dir = tempfile::tempdir().unwrap();
        assert_eq!(load_config(dir.path()), AppConfig::default());
    }

    #[test]
    fn persisted_config_round_trips() {
        let dir = tempfile::tempdir().unwrap();
        let config = AppConfig {
            default_page_policy: PageSizePolicy::FixedLetter,
            document_title: "Receipts".into(),
            ..AppConfig::default()
        };
        persist_config(dir.path(), &config).unwrap();
        assert_eq!(load_config(dir.path()), config);
    }

    #[test]
    fn corrupt_config_gives_defaults() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join(CONFIG_FILE), "{ not json").unwrap();
        assert_eq!(load_config(dir.path()), AppConfig::default());
    }

    #[test]
    fn export_dir_prefers_configured_path() {
        let data = Path::new("/data");
        let mut config = AppConfig::default();
        assert_eq!(export_dir(&config, data), PathBuf::from("/data/exports"));
        config.export_dir = Some(PathBuf::from("/elsewhere"));
        assert_eq!(export_dir(&config, data), PathBuf::from("/elsewhere"));
    }
}
