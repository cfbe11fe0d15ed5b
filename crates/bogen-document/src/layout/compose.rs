// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Page composer — turns an ordered list of images into document pages.
//
// Composition is pure: it borrows the images, resolves one page size for the
// whole document, and places each image with `aspect_fit`. Images that cannot
// be placed (zero, negative, or non-finite sides) get no page; they are
// listed in `Document::skipped` and the remaining images are still composed.

use bogen_core::error::BogenError;
use bogen_core::types::{PageSizePolicy, Rect, Size};
use tracing::{debug, instrument, warn};

use super::fit::{PageSource, aspect_fit, resolve_page_size};

/// One output page holding exactly one placed image.
#[derive(Debug)]
pub struct Page<'a, T> {
    /// Position of the source image in the composed slice.
    pub source_index: usize,
    pub page_size: Size,
    /// Where the scaled image is drawn, top-left origin.
    pub drawing_rect: Rect,
    pub source: &'a T,
}

/// An image left out of a document because it has no usable size.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DegenerateImage {
    pub index: usize,
    pub width: f64,
    pub height: f64,
}

impl From<DegenerateImage> for BogenError {
    fn from(d: DegenerateImage) -> Self {
        BogenError::DegenerateImage {
            index: d.index,
            width: d.width,
            height: d.height,
        }
    }
}

/// An immutable, ordered set of composed pages.
///
/// Borrows the images it was composed from, so it cannot outlive (or observe
/// changes to) the collection.
#[derive(Debug)]
pub struct Document<'a, T> {
    policy: PageSizePolicy,
    page_size: Size,
    pages: Vec<Page<'a, T>>,
    skipped: Vec<DegenerateImage>,
}

impl<'a, T> Document<'a, T> {
    pub fn policy(&self) -> PageSizePolicy {
        self.policy
    }

    /// The size shared by every page.
    pub fn page_size(&self) -> Size {
        self.page_size
    }

    pub fn pages(&self) -> &[Page<'a, T>] {
        &self.pages
    }

    pub fn page_count(&self) -> usize {
        self.pages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pages.is_empty()
    }

    /// Images that produced no page, in input order.
    pub fn skipped(&self) -> &[DegenerateImage] {
        &self.skipped
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Page<'a, T>> {
        self.pages.iter()
    }
}

/// Compose one page per image, in input order, using a single page size
/// resolved from `policy`.
#[instrument(skip(images), fields(images = images.len()))]
pub fn compose<T: PageSource>(images: &[T], policy: PageSizePolicy) -> Document<'_, T> {
    let page_size = resolve_page_size(policy, images);
    let mut pages = Vec::with_capacity(images.len());
    let mut skipped = Vec::new();

    for (index, source) in images.iter().enumerate() {
        let natural = source.natural_size();
        match aspect_fit(natural, page_size) {
            Some(drawing_rect) => {
                debug!(
                    index,
                    x = drawing_rect.x,
                    y = drawing_rect.y,
                    width = drawing_rect.width,
                    height = drawing_rect.height,
                    "Image placed on page"
                );
                pages.push(Page {
                    source_index: index,
                    page_size,
                    drawing_rect,
                    source,
                });
            }
            None => {
                warn!(
                    index,
                    width = natural.width,
                    height = natural.height,
                    "Skipping image with degenerate size"
                );
                skipped.push(DegenerateImage {
                    index,
                    width: natural.width,
                    height: natural.height,
                });
            }
        }
    }

    debug!(
        pages = pages.len(),
        skipped = skipped.len(),
        page_width = page_size.width,
        page_height = page_size.height,
        "Composition complete"
    );

    Document {
        policy,
        page_size,
        pages,
        skipped,
    }
}
