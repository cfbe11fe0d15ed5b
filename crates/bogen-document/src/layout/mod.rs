// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Layout module — page-size resolution, aspect-fit placement, and document
// composition.

pub mod compose;
pub mod fit;

pub use compose::{DegenerateImage, Document, Page, compose};
pub use fit::{PageSource, aspect_fit, resolve_page_size};
