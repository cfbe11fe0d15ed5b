// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Export sinks — where rendered PDFs go.

use std::fs::{File, OpenOptions};
use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};
use std::sync::Arc;

use bogen_bridge::traits::PlatformBridge;
use bogen_core::error::{BogenError, Result};
use bogen_document::{DegenerateImage, PdfReader, RenderedPdf};
use chrono::{DateTime, TimeZone};
use sha2::{Digest, Sha256};
use tracing::{debug, info, instrument};

const PDF_MIME: &str = "application/pdf";

/// Numbered alternatives tried when the requested file name is taken.
const MAX_NAME_ATTEMPTS: u32 = 1000;

/// Accepts a finished PDF and persists or shares it.
pub trait ExportSink {
    /// Deliver `pdf` under `file_name`; returns where it ended up.
    fn deliver(&self, file_name: &str, pdf: &RenderedPdf) -> Result<PathBuf>;
}

/// Outcome of a successful export.
#[derive(Debug, Clone)]
pub struct ExportReceipt {
    pub location: PathBuf,
    /// Pages composed from images (0 for an empty collection).
    pub page_count: usize,
    /// Pages in the written PDF (an empty document still has one blank page).
    pub pdf_page_count: usize,
    /// Images left out because they had no usable size.
    pub skipped: Vec<DegenerateImage>,
    pub byte_len: usize,
    /// SHA-256 of the written bytes, lowercase hex.
    pub sha256: String,
}

impl ExportReceipt {
    pub fn is_empty(&self) -> bool {
        self.page_count == 0
    }
}

/// `<prefix>-<YYYYmmdd-HHMMSS>.pdf`
pub fn export_file_name<Tz: TimeZone>(prefix: &str, at: &DateTime<Tz>) -> String
where
    Tz::Offset: std::fmt::Display,
{
    format!("{}-{}.pdf", prefix, at.format("%Y%m%d-%H%M%S"))
}

/// Compute the SHA-256 hash of `data` and return it as a lowercase hex string.
pub fn hash_bytes(data: &[u8]) -> String {
    let mut hasher = Sha256::new();
    hasher.update(data);
    hex::encode(hasher.finalize())
}

/// Writes PDFs into a directory and checks they read back intact.
pub struct FileExportSink {
    dir: PathBuf,
}

impl FileExportSink {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }
}

impl ExportSink for FileExportSink {
    #[instrument(skip(self, pdf), fields(dir = %self.dir.display(), bytes = pdf.bytes.len()))]
    fn deliver(&self, file_name: &str, pdf: &RenderedPdf) -> Result<PathBuf> {
        std::fs::create_dir_all(&self.dir)?;
        let (path, mut file) = create_unique(&self.dir, file_name)?;
        file.write_all(&pdf.bytes)?;
        file.sync_all()?;
        drop(file);

        let written = PdfReader::open(&path)?.page_count();
        if written != pdf.page_count {
            return Err(BogenError::ExportFailed(format!(
                "{} has {} page(s), expected {}",
                path.display(),
                written,
                pdf.page_count
            )));
        }

        info!(path = %path.display(), pages = written, "PDF exported");
        Ok(path)
    }
}

/// Create `file_name` in `dir` without touching existing files.
///
/// A taken name gets a numeric suffix: `scan.pdf`, `scan-1.pdf`, `scan-2.pdf`.
fn create_unique(dir: &Path, file_name: &str) -> Result<(PathBuf, File)> {
    let name = Path::new(file_name);
    let stem = name.file_stem().and_then(|s| s.to_str()).unwrap_or(file_name);
    let extension = name.extension().and_then(|e| e.to_str());

    for attempt in 0..MAX_NAME_ATTEMPTS {
        let candidate = match (attempt, extension) {
            (0, _) => file_name.to_string(),
            (n, Some(ext)) => format!("{stem}-{n}.{ext}"),
            (n, None) => format!("{stem}-{n}"),
        };
        let path = dir.join(candidate);
        match OpenOptions::new().write(true).create_new(true).open(&path) {
            Ok(file) => return Ok((path, file)),
            Err(err) if err.kind() == ErrorKind::AlreadyExists => {
                debug!(path = %path.display(), "export name taken");
            }
            Err(err) => return Err(err.into()),
        }
    }

    Err(BogenError::ExportFailed(format!(
        "no free file name for {file_name} in {}",
        dir.display()
    )))
}

/// Stages the PDF on disk and hands it to the platform share sheet.
pub struct ShareExportSink {
    staging: FileExportSink,
    bridge: Arc<dyn PlatformBridge>,
}

impl ShareExportSink {
    pub fn new(staging_dir: impl Into<PathBuf>, bridge: Arc<dyn PlatformBridge>) -> Self {
        Self {
            staging: FileExportSink::new(staging_dir),
            bridge,
        }
    }
}

impl ExportSink for ShareExportSink {
    fn deliver(&self, file_name: &str, pdf: &RenderedPdf) -> Result<PathBuf> {
        let path = self.staging.deliver(file_name, pdf)?;
        let path_str = path
            .to_str()
            .ok_or_else(|| BogenError::ExportFailed(format!("non UTF-8 path {}", path.display())))?;
        self.bridge.share_file(path_str, PDF_MIME)?;
        info!(path = path_str, platform = self.bridge.platform_name(), "PDF shared");
        Ok(path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bogen_bridge::{FsBridge, StubBridge};
    use chrono::Utc;

    /// Single blank A4 page rendered from an empty document.
    fn rendered_blank() -> RenderedPdf {
        let images: Vec<bogen_document::SourceImage> = Vec::new();
        let doc = bogen_document::compose(&images, bogen_core::PageSizePolicy::FixedA4);
        bogen_document::PdfWriter::new().render(&doc).unwrap()
    }

    #[test]
    fn file_names_are_timestamped() {
        let at = Utc.with_ymd_and_hms(2026, 10, 18, 9, 5, 7).unwrap();
        assert_eq!(export_file_name("scan", &at), "scan-20261018-090507.pdf");
    }

    #[test]
    fn hash_is_sha256_hex() {
        assert_eq!(
            hash_bytes(b""),
            "e3b0c44298fc1c149afbf4c8996fb92427ae41e4649b934ca495991b7852b855"
        );
    }

    #[test]
    fn file_sink_writes_and_verifies() {
        let dir = tempfile::tempdir().unwrap();
        let sink = FileExportSink::new(dir.path().join("nested"));
        let pdf = rendered_blank();

        let path = sink.deliver("out.pdf", &pdf).unwrap();
        assert_eq!(path, dir.path().join("nested").join("out.pdf"));
        assert_eq!(std::fs::read(&path).unwrap(), pdf.bytes);
    }

    #[test]
    fn file_sink_never_overwrites() {
        let dir = tempfile::tempdir().unwrap();
        let sink = FileExportSink::new(dir.path());
        let pdf = rendered_blank();
        std::fs::write(dir.path().join("out.pdf"), b"keep me").unwrap();

        let second = sink.deliver("out.pdf", &pdf).unwrap();
        let third = sink.deliver("out.pdf", &pdf).unwrap();

        assert_eq!(second, dir.path().join("out-1.pdf"));
        assert_eq!(third, dir.path().join("out-2.pdf"));
        assert_eq!(std::fs::read(dir.path().join("out.pdf")).unwrap(), b"keep me");
        assert_eq!(std::fs::read(&third).unwrap(), pdf.bytes);
    }

    #[test]
    fn file_sink_rejects_page_count_mismatch() {
        let dir = tempfile::tempdir().unwrap();
        let mut pdf = rendered_blank();
        pdf.page_count = 3;

        let err = FileExportSink::new(dir.path()).deliver("out.pdf", &pdf).unwrap_err();
        assert!(matches!(err, BogenError::ExportFailed(_)));
    }

    #[test]
    fn share_sink_hands_file_to_bridge() {
        let staging = tempfile::tempdir().unwrap();
        let shared = tempfile::tempdir().unwrap();
        let bridge = Arc::new(FsBridge::new().with_share_dir(shared.path()));
        let sink = ShareExportSink::new(staging.path(), bridge);

        sink.deliver("doc.pdf", &rendered_blank()).unwrap();
        assert!(shared.path().join("doc.pdf").exists());
    }

    #[test]
    fn share_sink_surfaces_bridge_errors() {
        let staging = tempfile::tempdir().unwrap();
        let sink = ShareExportSink::new(staging.path(), Arc::new(StubBridge));
        let err = sink.deliver("doc.pdf", &rendered_blank()).unwrap_err();
        assert!(matches!(err, BogenError::PlatformUnavailable));
    }
}
