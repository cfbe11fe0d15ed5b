// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Unified error types for Bogen.

use thiserror::Error;

/// Top-level error type for all Bogen operations.
///
/// Nothing here is fatal to the session: collection errors leave the
/// collection untouched, acquisition errors leave it without new images, and
/// export errors leave the caller with no document written.
#[derive(Debug, Error)]
pub enum BogenError {
    // -- Collection errors --
    #[error("index {index} out of range for collection of {len} image(s)")]
    IndexOutOfRange { index: usize, len: usize },

    // -- Acquisition errors --
    #[error("permission denied: {0}")]
    PermissionDenied(String),

    #[error("cancelled by user")]
    UserCancelled,

    // -- Composition / document errors --
    #[error("image {index} has degenerate size {width}x{height}")]
    DegenerateImage { index: usize, width: f64, height: f64 },

    #[error("export failed: {0}")]
    ExportFailed(String),

    #[error("image processing failed: {0}")]
    ImageError(String),

    #[error("PDF operation failed: {0}")]
    PdfError(String),

    // -- Storage / persistence --
    #[error("file I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    // -- Platform bridge --
    #[error("platform bridge error: {0}")]
    Bridge(String),

    #[error("feature not available on this platform")]
    PlatformUnavailable,
}

/// Alias used throughout the codebase.
pub type Result<T> = std::result::Result<T, BogenError>;
