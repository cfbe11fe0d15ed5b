// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Platform-agnostic trait definitions for native capabilities.
//
// Every call may block on user interaction, so callers run them off the
// owning context (see `bogen-session::acquire`). `Ok(None)` always means the
// user cancelled.

use bogen_core::error::Result;

/// Unified bridge that groups all native capabilities.
pub trait PlatformBridge:
    NativeCamera + NativePhotoLibrary + NativeFilePicker + NativeShare + Send + Sync
{
    /// Human-readable platform name (e.g. "iOS 17", "Android 14").
    fn platform_name(&self) -> &str;
}

/// Capture images from the device camera.
pub trait NativeCamera {
    /// Launch the system camera and return the captured, encoded image.
    /// Returns `PermissionDenied` if camera access was refused.
    fn capture_image(&self) -> Result<Option<Vec<u8>>>;
}

/// Pick images from the photo library.
pub trait NativePhotoLibrary {
    /// Show the library picker; returns the selected images, encoded, in
    /// selection order. `limit` caps the selection where supported.
    fn pick_images(&self, limit: Option<usize>) -> Result<Option<Vec<Vec<u8>>>>;
}

/// Pick files from the device storage.
pub trait NativeFilePicker {
    /// Show a file picker filtered to the given MIME types.
    /// Returns the chosen paths in selection order.
    fn pick_files(&self, mime_types: &[&str]) -> Result<Option<Vec<String>>>;

    /// Read the bytes of a previously picked file.
    fn read_picked_file(&self, path: &str) -> Result<Vec<u8>>;
}

/// Share content via the OS share sheet.
pub trait NativeShare {
    /// Share a file with other apps via the native share sheet.
    fn share_file(&self, path: &str, mime_type: &str) -> Result<()>;
}

/// MIME types offered by image file pickers.
pub const IMAGE_MIME_TYPES: &[&str] = &[
    "image/jpeg",
    "image/png",
    "image/tiff",
    "image/bmp",
    "image/webp",
    "image/gif",
];
