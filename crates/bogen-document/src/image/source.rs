// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Source images — decoded rasters with an identity and an origin.
//
// Pixels map 1:1 to PDF points, so a 1000x500 image has a natural size of
// 1000x500pt.

use std::path::Path;
use std::sync::Arc;

use bogen_core::error::{BogenError, Result};
use bogen_core::types::{ImageId, ImageOrigin, Size};
use image::DynamicImage;
use tracing::{debug, info, instrument};

use crate::layout::fit::PageSource;

/// A decoded image owned by a collection.
///
/// The raster is reference counted, so cloning a `SourceImage` is cheap and
/// both clones keep the same [`ImageId`].
#[derive(Debug, Clone)]
pub struct SourceImage {
    id: ImageId,
    origin: ImageOrigin,
    raster: Arc<DynamicImage>,
}

impl SourceImage {
    // -- Construction ---------------------------------------------------------

    /// Wrap an already-decoded `DynamicImage`.
    pub fn from_dynamic(image: DynamicImage, origin: ImageOrigin) -> Self {
        Self {
            id: ImageId::new(),
            origin,
            raster: Arc::new(image),
        }
    }

    /// Decode encoded bytes (JPEG, PNG, ...).
    #[instrument(skip(data), fields(data_len = data.len(), %origin))]
    pub fn decode(data: &[u8], origin: ImageOrigin) -> Result<Self> {
        let img = image::load_from_memory(data)
            .map_err(|err| BogenError::ImageError(format!("failed to decode image: {}", err)))?;
        debug!(
            width = img.width(),
            height = img.height(),
            "Image decoded from bytes"
        );
        Ok(Self::from_dynamic(img, origin))
    }

    /// Load and decode an image file.
    #[instrument(skip_all, fields(path = %path.as_ref().display()))]
    pub fn open(path: impl AsRef<Path>, origin: ImageOrigin) -> Result<Self> {
        let img = image::open(path.as_ref()).map_err(|err| match err {
            image::ImageError::IoError(io_err) => BogenError::Io(io_err),
            other => BogenError::ImageError(format!(
                "failed to open {}: {}",
                path.as_ref().display(),
                other
            )),
        })?;
        info!(width = img.width(), height = img.height(), "Image loaded");
        Ok(Self::from_dynamic(img, origin))
    }

    // -- Accessors ------------------------------------------------------------

    pub fn id(&self) -> ImageId {
        self.id
    }

    pub fn origin(&self) -> ImageOrigin {
        self.origin
    }

    /// Width in pixels.
    pub fn width(&self) -> u32 {
        self.raster.width()
    }

    /// Height in pixels.
    pub fn height(&self) -> u32 {
        self.raster.height()
    }

    /// Natural size in points.
    pub fn size(&self) -> Size {
        Size::new(f64::from(self.width()), f64::from(self.height()))
    }

    pub fn raster(&self) -> &DynamicImage {
        &self.raster
    }
}

impl PageSource for SourceImage {
    fn natural_size(&self) -> Size {
        self.size()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{ImageFormat, RgbImage};
    use std::io::Cursor;

    fn png_bytes(width: u32, height: u32) -> Vec<u8> {
        let img = DynamicImage::ImageRgb8(RgbImage::new(width, height));
        let mut out = Cursor::new(Vec::new());
        img.write_to(&mut out, ImageFormat::Png).unwrap();
        out.into_inner()
    }

    #[test]
    fn decode_reports_pixel_size_as_points() {
        let image = SourceImage::decode(&png_bytes(40, 30), ImageOrigin::File).unwrap();
        assert_eq!((image.width(), image.height()), (40, 30));
        assert_eq!(image.size(), Size::new(40.0, 30.0));
        assert_eq!(image.origin(), ImageOrigin::File);
    }

    #[test]
    fn decode_garbage_is_image_error() {
        let err = SourceImage::decode(b"definitely not an image", ImageOrigin::Camera).unwrap_err();
        assert!(matches!(err, BogenError::ImageError(_)));
    }

    #[test]
    fn open_missing_file_is_io_error() {
        let err = SourceImage::open("/nonexistent/bogen/photo.png", ImageOrigin::File).unwrap_err();
        assert!(matches!(err, BogenError::Io(_)));
    }

    #[test]
    fn clones_share_identity() {
        let image = SourceImage::from_dynamic(
            DynamicImage::ImageRgb8(RgbImage::new(2, 2)),
            ImageOrigin::Library,
        );
        let copy = image.clone();
        assert_eq!(image.id(), copy.id());
        assert_ne!(
            image.id(),
            SourceImage::from_dynamic(DynamicImage::new_rgb8(2, 2), ImageOrigin::Library).id()
        );
    }
}
