// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// PDF reader — inspect exported documents using the `lopdf` crate.

use std::path::Path;

use bogen_core::error::{BogenError, Result};
use bogen_core::types::Size;
use lopdf::{Document, Object, ObjectId};
use tracing::{debug, info, instrument};

/// Read-only view of an existing PDF.
pub struct PdfReader {
    /// The underlying lopdf document.
    document: Document,
}

impl PdfReader {
    /// Open a PDF from the filesystem.
    #[instrument(skip_all, fields(path = %path.as_ref().display()))]
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let path_ref = path.as_ref();
        info!("Opening PDF: {}", path_ref.display());

        let document = Document::load(path_ref).map_err(|err| {
            BogenError::PdfError(format!("failed to open {}: {}", path_ref.display(), err))
        })?;

        debug!(pages = document.get_pages().len(), "PDF loaded");
        Ok(Self { document })
    }

    /// Create a reader from raw PDF bytes already in memory.
    #[instrument(skip_all, fields(bytes_len = data.len()))]
    pub fn from_bytes(data: &[u8]) -> Result<Self> {
        let document = Document::load_mem(data).map_err(|err| {
            BogenError::PdfError(format!("failed to load PDF from memory: {}", err))
        })?;

        debug!(pages = document.get_pages().len(), "PDF loaded from bytes");
        Ok(Self { document })
    }

    /// Number of pages in the document.
    pub fn page_count(&self) -> usize {
        self.document.get_pages().len()
    }

    /// Page sizes in points, in page order, taken from each page's MediaBox.
    pub fn page_sizes(&self) -> Result<Vec<Size>> {
        self.document
            .get_pages()
            .into_values()
            .map(|page_id| self.media_box(page_id))
            .collect()
    }

    /// MediaBox of a page, following `/Parent` links for inherited boxes.
    fn media_box(&self, page_id: ObjectId) -> Result<Size> {
        let mut current = Some(page_id);
        while let Some(id) = current {
            let dict = self.document.get_dictionary(id).map_err(|err| {
                BogenError::PdfError(format!("page object {:?} unreadable: {}", id, err))
            })?;

            if let Ok(Object::Array(values)) = dict.get(b"MediaBox") {
                let numbers: Vec<f64> = values.iter().filter_map(number).collect();
                if let [llx, lly, urx, ury] = numbers[..] {
                    return Ok(Size::new(urx - llx, ury - lly));
                }
                return Err(BogenError::PdfError(format!(
                    "page object {:?} has a malformed MediaBox",
                    id
                )));
            }

            current = dict.get(b"Parent").and_then(Object::as_reference).ok();
        }

        Err(BogenError::PdfError(format!(
            "page object {:?} has no MediaBox",
            page_id
        )))
    }
}

fn number(obj: &Object) -> Option<f64> {
    match obj {
        Object::Integer(i) => Some(*i as f64),
        Object::Real(r) => Some(f64::from(*r)),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn garbage_is_pdf_error() {
        let err = PdfReader::from_bytes(b"not a pdf").err().unwrap();
        assert!(matches!(err, BogenError::PdfError(_)));
    }

    #[test]
    fn missing_file_is_pdf_error() {
        assert!(PdfReader::open("/nonexistent/bogen/out.pdf").is_err());
    }
}
