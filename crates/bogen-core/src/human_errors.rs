// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Human-readable error messages.
//
// Every technical error is mapped to plain English with a clear suggestion.
// The severity drives how (and whether) the UI presents it.

use crate::error::BogenError;

/// Severity of an error from the user's perspective.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    /// Nothing to show. The user already knows (e.g. they pressed Cancel).
    Silent,
    /// Worth retrying as-is.
    Transient,
    /// User must do something (grant access, pick another file).
    ActionRequired,
    /// Retrying will not help.
    Permanent,
}

/// A human-readable error with plain English message and actionable suggestion.
#[derive(Debug, Clone)]
pub struct HumanError {
    /// Plain English summary (shown as a heading).
    pub message: String,
    /// What the user should try (shown as body text).
    pub suggestion: String,
    /// Whether trying the same thing again may succeed.
    pub retriable: bool,
    pub severity: Severity,
}

impl HumanError {
    /// Whether the UI should surface this error at all.
    pub fn should_display(&self) -> bool {
        self.severity != Severity::Silent
    }
}

/// Convert a `BogenError` into a `HumanError`.
pub fn humanize_error(err: &BogenError) -> HumanError {
    match err {
        BogenError::IndexOutOfRange { index, len } => HumanError {
            message: "That page isn't there any more.".into(),
            suggestion: format!(
                "The list has changed. Pick the page again. (Position {}, {} page(s) in the list)",
                index + 1,
                len
            ),
            retriable: false,
            severity: Severity::ActionRequired,
        },

        BogenError::PermissionDenied(what) => HumanError {
            message: "The app isn't allowed to use that.".into(),
            suggestion: format!(
                "Allow access in your device settings, then try again. ({what})"
            ),
            retriable: false,
            severity: Severity::ActionRequired,
        },

        BogenError::UserCancelled => HumanError {
            message: "Cancelled.".into(),
            suggestion: String::new(),
            retriable: true,
            severity: Severity::Silent,
        },

        BogenError::DegenerateImage { index, .. } => HumanError {
            message: format!("Image {} has no visible size and was left out.", index + 1),
            suggestion: "Remove it and add the picture again.".into(),
            retriable: false,
            severity: Severity::ActionRequired,
        },

        BogenError::ExportFailed(cause) => HumanError {
            message: "The document couldn't be saved.".into(),
            suggestion: format!("Check there is free space and try again. ({cause})"),
            retriable: true,
            severity: Severity::Transient,
        },

        BogenError::ImageError(_) => HumanError {
            message: "There's a problem with this image.".into(),
            suggestion: "The image may be damaged or in an unusual format. Try saving it as a JPEG or PNG first.".into(),
            retriable: false,
            severity: Severity::Permanent,
        },

        BogenError::PdfError(_) => HumanError {
            message: "The PDF couldn't be created.".into(),
            suggestion: "Try again with fewer pages. If this keeps happening, please report it.".into(),
            retriable: true,
            severity: Severity::Transient,
        },

        BogenError::Io(io_err) => match io_err.kind() {
            std::io::ErrorKind::NotFound => HumanError {
                message: "The file couldn't be found.".into(),
                suggestion: "It may have been moved or deleted. Try choosing the file again.".into(),
                retriable: false,
                severity: Severity::ActionRequired,
            },
            std::io::ErrorKind::PermissionDenied => HumanError {
                message: "The app doesn't have permission to use that file.".into(),
                suggestion: "Check the file permissions, or try copying the file to a different location first.".into(),
                retriable: false,
                severity: Severity::ActionRequired,
            },
            _ => HumanError {
                message: "There was a problem reading or writing a file.".into(),
                suggestion: "Try again. If this keeps happening, your device's storage may be full.".into(),
                retriable: true,
                severity: Severity::Transient,
            },
        },

        BogenError::Serialization(_) => HumanError {
            message: "The app's settings couldn't be read.".into(),
            suggestion: "Default settings will be used. Save your settings again to fix this.".into(),
            retriable: false,
            severity: Severity::Transient,
        },

        BogenError::Bridge(_) => HumanError {
            message: "A device-specific feature didn't work.".into(),
            suggestion: "Try restarting the app. Some features may not be available on all devices.".into(),
            retriable: true,
            severity: Severity::Transient,
        },

        BogenError::PlatformUnavailable => HumanError {
            message: "This feature isn't available on your device.".into(),
            suggestion: "Try importing the pictures from files instead.".into(),
            retriable: false,
            severity: Severity::Permanent,
        },
    }
}
