// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Filesystem bridge for desktop builds.
//
// There is no camera or photo library on the desktop. File "picking" is
// driven by selections queued up front (e.g. paths given on the command
// line), and sharing copies the file into a drop directory.

use std::collections::VecDeque;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use bogen_core::error::{BogenError, Result};
use tracing::{debug, info, warn};

use crate::traits::*;

/// Desktop bridge backed by plain files.
pub struct FsBridge {
    /// Pending picker results; each `pick_files` call takes the next one.
    selections: Mutex<VecDeque<Vec<String>>>,
    /// Where `share_file` copies documents to, if anywhere.
    share_dir: Option<PathBuf>,
}

impl FsBridge {
    pub fn new() -> Self {
        Self {
            selections: Mutex::new(VecDeque::new()),
            share_dir: None,
        }
    }

    /// Copy shared files into `dir`.
    pub fn with_share_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.share_dir = Some(dir.into());
        self
    }

    /// Queue the result of one future `pick_files` call.
    pub fn queue_selection<I, S>(&self, paths: I) -> Result<()>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let selection: Vec<String> = paths.into_iter().map(Into::into).collect();
        debug!(files = selection.len(), "queued file selection");
        self.lock_selections()?.push_back(selection);
        Ok(())
    }

    fn lock_selections(&self) -> Result<std::sync::MutexGuard<'_, VecDeque<Vec<String>>>> {
        self.selections
            .lock()
            .map_err(|_| BogenError::Bridge("file selection queue poisoned".into()))
    }
}

impl Default for FsBridge {
    fn default() -> Self {
        Self::new()
    }
}

impl PlatformBridge for FsBridge {
    fn platform_name(&self) -> &str {
        "Desktop (filesystem)"
    }
}

impl NativeCamera for FsBridge {
    fn capture_image(&self) -> Result<Option<Vec<u8>>> {
        warn!("no camera on desktop");
        Err(BogenError::PlatformUnavailable)
    }
}

impl NativePhotoLibrary for FsBridge {
    fn pick_images(&self, _limit: Option<usize>) -> Result<Option<Vec<Vec<u8>>>> {
        warn!("no photo library on desktop");
        Err(BogenError::PlatformUnavailable)
    }
}

impl NativeFilePicker for FsBridge {
    fn pick_files(&self, _mime_types: &[&str]) -> Result<Option<Vec<String>>> {
        // An empty queue is a dismissed picker.
        let selection = self.lock_selections()?.pop_front();
        match &selection {
            Some(paths) => info!(files = paths.len(), "files picked"),
            None => debug!("file picker dismissed"),
        }
        Ok(selection)
    }

    fn read_picked_file(&self, path: &str) -> Result<Vec<u8>> {
        std::fs::read(path).map_err(|err| match err.kind() {
            std::io::ErrorKind::PermissionDenied => {
                BogenError::PermissionDenied(format!("cannot read {path}"))
            }
            _ => BogenError::Io(err),
        })
    }
}

impl NativeShare for FsBridge {
    fn share_file(&self, path: &str, _mime_type: &str) -> Result<()> {
        let Some(dir) = &self.share_dir else {
            return Err(BogenError::PlatformUnavailable);
        };
        let source = Path::new(path);
        let file_name = source
            .file_name()
            .ok_or_else(|| BogenError::Bridge(format!("not a file path: {path}")))?;
        std::fs::create_dir_all(dir)?;
        let target = dir.join(file_name);
        std::fs::copy(source, &target)?;
        info!(target = %target.display(), "file shared");
        Ok(())
    }
}
