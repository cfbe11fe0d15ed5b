// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Application configuration.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

/// Persistent application settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Page size used when the caller does not pick one.
    pub default_page_policy: crate::PageSizePolicy,
    /// Title embedded in exported PDF metadata.
    pub document_title: String,
    /// Prefix of generated export file names.
    pub file_name_prefix: String,
    /// Directory exports are written to (data dir `exports/` if unset).
    pub export_dir: Option<PathBuf>,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            default_page_policy: crate::PageSizePolicy::FixedA4,
            document_title: "Bogen Document".into(),
            file_name_prefix: "bogen".into(),
            export_dir: None,
        }
    }
}
