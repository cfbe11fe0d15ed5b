// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// PDF writer — render composed documents using `printpdf` 0.8.
//
// printpdf 0.8 uses a data-oriented API: documents are built by constructing
// `PdfPage` structs containing `Vec<Op>` operation lists, then serialised via
// `PdfDocument::save()`.

use std::collections::HashMap;

use bogen_core::error::Result;
use bogen_core::types::{ImageId, Rect, Size};
use printpdf::{
    Mm, Op, PdfDocument, PdfPage, PdfSaveOptions, PdfWarnMsg, Pt, RawImage, RawImageData,
    RawImageFormat, XObjectId, XObjectTransform,
};
use tracing::{debug, info, instrument, warn};

use crate::image::source::SourceImage;
use crate::layout::compose::Document;

/// Images are embedded at 72 dpi so one pixel spans one point before scaling.
const EMBED_DPI: f32 = 72.0;

/// Millimetres per PDF point.
const MM_PER_PT: f64 = 25.4 / 72.0;

/// Serialised PDF plus the number of pages actually written.
#[derive(Debug, Clone)]
pub struct RenderedPdf {
    pub bytes: Vec<u8>,
    /// At least one: an empty document is written as a single blank page.
    pub page_count: usize,
}

/// Renders composed documents to PDF bytes.
pub struct PdfWriter {
    /// Title metadata embedded in the PDF /Info dictionary.
    title: Option<String>,
}

impl PdfWriter {
    pub fn new() -> Self {
        Self { title: None }
    }

    /// Set a title for the PDF metadata.
    pub fn set_title(&mut self, title: impl Into<String>) {
        self.title = Some(title.into());
    }

    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.set_title(title);
        self
    }

    /// Render every page of `document`, one embedded image per page.
    ///
    /// An image that appears on several pages is embedded once.
    #[instrument(skip_all, fields(pages = document.page_count()))]
    pub fn render(&self, document: &Document<'_, SourceImage>) -> Result<RenderedPdf> {
        let title = self.title.as_deref().unwrap_or("Bogen Document");
        let page_size = document.page_size();

        info!(
            title,
            page_width = page_size.width,
            page_height = page_size.height,
            "Rendering PDF"
        );

        let (page_w, page_h) = page_dimensions(page_size);
        let mut doc = PdfDocument::new(title);
        let mut embedded: HashMap<ImageId, XObjectId> = HashMap::new();
        let mut pages: Vec<PdfPage> = Vec::with_capacity(document.page_count());

        for page in document.iter() {
            let image = page.source;
            let xobject_id = embedded
                .entry(image.id())
                .or_insert_with(|| doc.add_image(&raw_image(image)))
                .clone();

            let ops = vec![Op::UseXobject {
                id: xobject_id,
                transform: placement(page.drawing_rect, page.page_size, image),
            }];
            pages.push(PdfPage::new(page_w, page_h, ops));
        }

        // If there were no images at all, add a single blank page.
        if pages.is_empty() {
            warn!("Document has no pages; writing a blank page");
            pages.push(PdfPage::new(page_w, page_h, Vec::new()));
        }

        let page_count = pages.len();
        doc.with_pages(pages);

        let mut warnings: Vec<PdfWarnMsg> = Vec::new();
        let bytes = doc.save(&PdfSaveOptions::default(), &mut warnings);

        debug!(
            page_count,
            embedded_images = embedded.len(),
            bytes = bytes.len(),
            warnings = warnings.len(),
            "PDF serialised"
        );

        Ok(RenderedPdf { bytes, page_count })
    }
}

impl Default for PdfWriter {
    fn default() -> Self {
        Self::new()
    }
}

/// Page dimensions in printpdf's Mm units.
fn page_dimensions(size: Size) -> (Mm, Mm) {
    (
        Mm((size.width * MM_PER_PT) as f32),
        Mm((size.height * MM_PER_PT) as f32),
    )
}

/// Convert to RGB8 for printpdf.
fn raw_image(image: &SourceImage) -> RawImage {
    let rgb = image.raster().to_rgb8();
    let (width, height) = rgb.dimensions();
    RawImage {
        pixels: RawImageData::U8(rgb.into_raw()),
        width: width as usize,
        height: height as usize,
        data_format: RawImageFormat::RGB8,
        tag: Vec::new(),
    }
}

/// Transform placing `image` into `rect`.
///
/// Layout rectangles have a top-left origin; PDF user space starts at the
/// bottom-left, so the y offset is measured from the bottom edge.
fn placement(rect: Rect, page: Size, image: &SourceImage) -> XObjectTransform {
    let bottom = page.height - rect.y - rect.height;
    XObjectTransform {
        translate_x: Some(Pt(rect.x as f32)),
        translate_y: Some(Pt(bottom as f32)),
        scale_x: Some((rect.width / f64::from(image.width())) as f32),
        scale_y: Some((rect.height / f64::from(image.height())) as f32),
        dpi: Some(EMBED_DPI),
        rotate: None,
    }
}
