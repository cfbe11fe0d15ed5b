// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Core domain types for Bogen.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Slack allowed when comparing layout geometry in points.
pub const GEOMETRY_EPSILON: f64 = 1e-9;

/// Unique identifier for an image held by a session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ImageId(pub Uuid);

impl ImageId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for ImageId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for ImageId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Where an image came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ImageOrigin {
    /// Captured with the device camera.
    Camera,
    /// Picked from the photo library.
    Library,
    /// Imported from a file.
    File,
}

impl std::fmt::Display for ImageOrigin {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Self::Camera => "camera",
            Self::Library => "library",
            Self::File => "file",
        };
        f.write_str(name)
    }
}

/// Width and height in PDF points (1/72 inch).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Size {
    pub width: f64,
    pub height: f64,
}

impl Size {
    pub const fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }

    /// Width divided by height.
    pub fn aspect(&self) -> f64 {
        self.width / self.height
    }

    /// True when both sides are finite and strictly positive.
    pub fn is_usable(&self) -> bool {
        self.width.is_finite() && self.height.is_finite() && self.width > 0.0 && self.height > 0.0
    }
}

/// Axis-aligned rectangle with a top-left origin, in points.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Rect {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl Rect {
    pub const fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Width divided by height.
    pub fn aspect(&self) -> f64 {
        self.width / self.height
    }

    /// Whether this rectangle lies inside a page of the given size.
    pub fn fits_within(&self, page: Size) -> bool {
        self.x >= -GEOMETRY_EPSILON
            && self.y >= -GEOMETRY_EPSILON
            && self.x + self.width <= page.width + GEOMETRY_EPSILON
            && self.y + self.height <= page.height + GEOMETRY_EPSILON
    }
}

/// ISO A4 in points.
pub const A4: Size = Size::new(595.2, 841.8);

/// US Letter in points.
pub const LETTER: Size = Size::new(612.0, 792.0);

/// How the page rectangle of an exported document is chosen.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum PageSizePolicy {
    #[default]
    FixedA4,
    FixedLetter,
    /// Largest image width by largest image height, resolved per document.
    AutoFit,
}

impl PageSizePolicy {
    /// Fixed page dimensions, or `None` for [`PageSizePolicy::AutoFit`].
    pub fn fixed_size(&self) -> Option<Size> {
        match self {
            Self::FixedA4 => Some(A4),
            Self::FixedLetter => Some(LETTER),
            Self::AutoFit => None,
        }
    }

    /// Parse a user-facing keyword (`a4`, `letter`, `auto`).
    pub fn from_keyword(keyword: &str) -> Option<Self> {
        match keyword.to_ascii_lowercase().as_str() {
            "a4" => Some(Self::FixedA4),
            "letter" => Some(Self::FixedLetter),
            "auto" | "autofit" | "fit" => Some(Self::AutoFit),
            _ => None,
        }
    }

    pub fn keyword(&self) -> &'static str {
        match self {
            Self::FixedA4 => "a4",
            Self::FixedLetter => "letter",
            Self::AutoFit => "auto",
        }
    }
}

/// Collection ordering.
///
/// Insertion order stands in for capture order, so `Ascending` (oldest first)
/// leaves the collection alone and `Descending` reverses it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SortOrder {
    Ascending,
    Descending,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fixed_policies_resolve_to_constants() {
        assert_eq!(PageSizePolicy::FixedA4.fixed_size(), Some(Size::new(595.2, 841.8)));
        assert_eq!(PageSizePolicy::FixedLetter.fixed_size(), Some(Size::new(612.0, 792.0)));
        assert_eq!(PageSizePolicy::AutoFit.fixed_size(), None);
    }

    #[test]
    fn keywords_round_trip() {
        for policy in [
            PageSizePolicy::FixedA4,
            PageSizePolicy::FixedLetter,
            PageSizePolicy::AutoFit,
        ] {
            assert_eq!(PageSizePolicy::from_keyword(policy.keyword()), Some(policy));
        }
        assert_eq!(PageSizePolicy::from_keyword("A4"), Some(PageSizePolicy::FixedA4));
        assert_eq!(PageSizePolicy::from_keyword("tabloid"), None);
    }

    #[test]
    fn zero_and_nan_sizes_are_unusable() {
        assert!(Size::new(10.0, 20.0).is_usable());
        assert!(!Size::new(10.0, 0.0).is_usable());
        assert!(!Size::new(0.0, 10.0).is_usable());
        assert!(!Size::new(f64::NAN, 10.0).is_usable());
        assert!(!Size::new(10.0, f64::INFINITY).is_usable());
    }

    #[test]
    fn rect_containment() {
        let page = Size::new(100.0, 200.0);
        assert!(Rect::new(0.0, 50.0, 100.0, 100.0).fits_within(page));
        assert!(!Rect::new(1.0, 0.0, 100.0, 100.0).fits_within(page));
        assert!(!Rect::new(0.0, -1.0, 10.0, 10.0).fits_within(page));
    }
}
