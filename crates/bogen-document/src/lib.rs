// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// bogen-document — Image handling and document output for Bogen.
//
// Provides the ordered image collection, the page composer (page-size
// resolution and aspect-fit placement), image decoding, and PDF rendering and
// inspection.

pub mod collection;
pub mod image;
pub mod layout;
pub mod pdf;

// Re-export the primary types so callers can use `bogen_document::compose` etc.
pub use collection::ImageCollection;
pub use image::source::SourceImage;
pub use layout::compose::{DegenerateImage, Document, Page, compose};
pub use layout::fit::{PageSource, aspect_fit, resolve_page_size};
pub use pdf::reader::PdfReader;
pub use pdf::writer::{PdfWriter, RenderedPdf};
