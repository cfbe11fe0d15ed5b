// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Page geometry — page-size resolution and aspect-fit placement.
//
// All rectangles use a top-left origin in points. The PDF writer flips the
// y axis when it emits drawing operations.

use bogen_core::types::{A4, PageSizePolicy, Rect, Size};

/// Anything with a natural size that can be placed on a page.
pub trait PageSource {
    fn natural_size(&self) -> Size;
}

impl PageSource for Size {
    fn natural_size(&self) -> Size {
        *self
    }
}

/// Resolve the single page size used for every page of a document.
///
/// `AutoFit` takes the largest width and the largest height independently,
/// ignoring images that cannot be placed. With nothing to measure it falls
/// back to A4.
///
/// Unusable images are left out of the maximum on purpose, so a `0 x 5000`
/// image that `compose` will skip cannot stretch every other page.
pub fn resolve_page_size<T: PageSource>(policy: PageSizePolicy, images: &[T]) -> Size {
    if let Some(size) = policy.fixed_size() {
        return size;
    }

    let (width, height) = images
        .iter()
        .map(PageSource::natural_size)
        .filter(Size::is_usable)
        .fold((None, None), |(w, h): (Option<f64>, Option<f64>), s| {
            (
                Some(w.map_or(s.width, |w| w.max(s.width))),
                Some(h.map_or(s.height, |h| h.max(s.height))),
            )
        });

    Size::new(width.unwrap_or(A4.width), height.unwrap_or(A4.height))
}

/// Scale `image` to the largest size that fits inside `page` without
/// changing its aspect ratio, and centre it on the axis it does not fill.
///
/// Returns `None` when either size has a zero, negative, or non-finite side.
pub fn aspect_fit(image: Size, page: Size) -> Option<Rect> {
    if !image.is_usable() || !page.is_usable() {
        return None;
    }

    let image_aspect = image.aspect();
    let page_aspect = page.aspect();

    let rect = if image_aspect > page_aspect {
        // Relatively wider than the page: fill the width.
        let height = page.width / image_aspect;
        Rect::new(0.0, (page.height - height) / 2.0, page.width, height)
    } else {
        // Relatively taller (or equal): fill the height.
        let width = page.height * image_aspect;
        Rect::new((page.width - width) / 2.0, 0.0, width, page.height)
    };

    Some(rect)
}
