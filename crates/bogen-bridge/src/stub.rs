// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Stub bridge for builds where no native capability is available.
//
// Every trait method returns `PlatformUnavailable`.

use bogen_core::error::{BogenError, Result};

use crate::traits::*;

/// No-op bridge.
pub struct StubBridge;

impl PlatformBridge for StubBridge {
    fn platform_name(&self) -> &str {
        "Unavailable (stub)"
    }
}

impl NativeCamera for StubBridge {
    fn capture_image(&self) -> Result<Option<Vec<u8>>> {
        tracing::warn!("NativeCamera::capture_image called on stub bridge");
        Err(BogenError::PlatformUnavailable)
    }
}

impl NativePhotoLibrary for StubBridge {
    fn pick_images(&self, _limit: Option<usize>) -> Result<Option<Vec<Vec<u8>>>> {
        tracing::warn!("NativePhotoLibrary::pick_images called on stub bridge");
        Err(BogenError::PlatformUnavailable)
    }
}

impl NativeFilePicker for StubBridge {
    fn pick_files(&self, _mime_types: &[&str]) -> Result<Option<Vec<String>>> {
        tracing::warn!("NativeFilePicker::pick_files called on stub bridge");
        Err(BogenError::PlatformUnavailable)
    }

    fn read_picked_file(&self, _path: &str) -> Result<Vec<u8>> {
        Err(BogenError::PlatformUnavailable)
    }
}

impl NativeShare for StubBridge {
    fn share_file(&self, _path: &str, _mime_type: &str) -> Result<()> {
        tracing::warn!("NativeShare::share_file called on stub bridge");
        Err(BogenError::PlatformUnavailable)
    }
}
