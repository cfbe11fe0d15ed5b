// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Image acquisition — run a camera, library, or file pick off the owning
// context and hand the decoded images back over the session's channel.

use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use bogen_bridge::traits::{IMAGE_MIME_TYPES, PlatformBridge};
use bogen_core::error::BogenError;
use bogen_core::types::ImageOrigin;
use bogen_document::SourceImage;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tracing::{debug, error, info, instrument, warn};

/// What to acquire.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AcquireRequest {
    Camera,
    Library { limit: Option<usize> },
    Files,
}

impl AcquireRequest {
    pub fn origin(&self) -> ImageOrigin {
        match self {
            Self::Camera => ImageOrigin::Camera,
            Self::Library { .. } => ImageOrigin::Library,
            Self::Files => ImageOrigin::File,
        }
    }
}

/// Result of one acquisition, delivered to the session as a unit.
///
/// `images` keep the order the source returned them in. A cancelled picker
/// yields no images and a single `UserCancelled` error; an undecodable file
/// is reported in `errors` without discarding the others.
#[derive(Debug)]
pub struct Acquisition {
    pub origin: ImageOrigin,
    pub images: Vec<SourceImage>,
    pub errors: Vec<BogenError>,
}

impl Acquisition {
    fn new(origin: ImageOrigin) -> Self {
        Self {
            origin,
            images: Vec::new(),
            errors: Vec::new(),
        }
    }

    fn failed(origin: ImageOrigin, err: BogenError) -> Self {
        Self {
            origin,
            images: Vec::new(),
            errors: vec![err],
        }
    }

    pub fn is_cancelled(&self) -> bool {
        self.images.is_empty()
            && matches!(self.errors.as_slice(), [BogenError::UserCancelled])
    }

    fn decode(&mut self, bytes: &[u8]) {
        match SourceImage::decode(bytes, self.origin) {
            Ok(image) => self.images.push(image),
            Err(err) => {
                warn!(origin = %self.origin, error = %err, "acquired image could not be decoded");
                self.errors.push(err);
            }
        }
    }
}

/// What the session did with an acquisition.
#[derive(Debug)]
pub struct AcquisitionReport {
    pub origin: ImageOrigin,
    /// Position of the first appended image, if any were appended.
    pub first_index: Option<usize>,
    pub added: usize,
    pub errors: Vec<BogenError>,
}

impl AcquisitionReport {
    pub fn is_cancelled(&self) -> bool {
        self.added == 0 && matches!(self.errors.as_slice(), [BogenError::UserCancelled])
    }
}

/// Run `request` against `bridge` on the current thread.
///
/// Blocks for as long as the platform UI is up.
#[instrument(skip(bridge), fields(platform = bridge.platform_name()))]
pub fn acquire(bridge: &dyn PlatformBridge, request: AcquireRequest) -> Acquisition {
    let mut acquisition = Acquisition::new(request.origin());

    match request {
        AcquireRequest::Camera => match bridge.capture_image() {
            Ok(Some(bytes)) => acquisition.decode(&bytes),
            Ok(None) => acquisition.errors.push(BogenError::UserCancelled),
            Err(err) => acquisition.errors.push(err),
        },
        AcquireRequest::Library { limit } => match bridge.pick_images(limit) {
            Ok(Some(picked)) => {
                for bytes in &picked {
                    acquisition.decode(bytes);
                }
            }
            Ok(None) => acquisition.errors.push(BogenError::UserCancelled),
            Err(err) => acquisition.errors.push(err),
        },
        AcquireRequest::Files => match bridge.pick_files(IMAGE_MIME_TYPES) {
            Ok(Some(paths)) => {
                for path in &paths {
                    match bridge.read_picked_file(path) {
                        Ok(bytes) => acquisition.decode(&bytes),
                        Err(err) => {
                            warn!(path, error = %err, "picked file could not be read");
                            acquisition.errors.push(err);
                        }
                    }
                }
            }
            Ok(None) => acquisition.errors.push(BogenError::UserCancelled),
            Err(err) => acquisition.errors.push(err),
        },
    }

    if acquisition.is_cancelled() {
        debug!("acquisition cancelled by user");
    } else {
        info!(
            images = acquisition.images.len(),
            errors = acquisition.errors.len(),
            "acquisition finished"
        );
    }
    acquisition
}

/// Starts acquisitions whose results land in a session's inbox.
///
/// Cheap to clone; hand one to every UI control that can add images.
#[derive(Clone)]
pub struct Acquirer {
    bridge: Arc<dyn PlatformBridge>,
    inbox: mpsc::UnboundedSender<Acquisition>,
    in_flight: Arc<AtomicUsize>,
}

impl Acquirer {
    pub(crate) fn new(
        bridge: Arc<dyn PlatformBridge>,
        inbox: mpsc::UnboundedSender<Acquisition>,
        in_flight: Arc<AtomicUsize>,
    ) -> Self {
        Self {
            bridge,
            inbox,
            in_flight,
        }
    }

    /// Run `request` on a blocking task. Must be called within a Tokio
    /// runtime.
    ///
    /// Exactly one `Acquisition` reaches the inbox per call. A task that
    /// panics or is cancelled is reported as a `Bridge` error.
    pub fn spawn(&self, request: AcquireRequest) -> JoinHandle<()> {
        let bridge = Arc::clone(&self.bridge);
        let inbox = self.inbox.clone();
        self.in_flight.fetch_add(1, Ordering::AcqRel);

        let work = tokio::task::spawn_blocking(move || acquire(bridge.as_ref(), request));
        tokio::spawn(async move {
            let acquisition = match work.await {
                Ok(acquisition) => acquisition,
                Err(err) => {
                    error!(origin = %request.origin(), error = %err, "acquisition task failed");
                    Acquisition::failed(
                        request.origin(),
                        BogenError::Bridge(format!("acquisition task failed: {err}")),
                    )
                }
            };
            if inbox.send(acquisition).is_err() {
                warn!("session closed before acquisition finished; images dropped");
            }
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bogen_bridge::traits::{NativeCamera, NativeFilePicker, NativePhotoLibrary, NativeShare};
    use bogen_core::error::Result;
    use image::{DynamicImage, ImageFormat, RgbImage};
    use crate::session::ScanSession;
    use std::io::Cursor;
    use std::time::Duration;

    pub(crate) fn png(width: u32, height: u32) -> Vec<u8> {
        let mut out = Cursor::new(Vec::new());
        DynamicImage::ImageRgb8(RgbImage::new(width, height))
            .write_to(&mut out, ImageFormat::Png)
            .unwrap();
        out.into_inner()
    }

    /// Bridge whose camera and library answers are fixed up front.
    struct ScriptedBridge {
        camera: fn() -> Result<Option<Vec<u8>>>,
        library: fn() -> Result<Option<Vec<Vec<u8>>>>,
    }

    impl PlatformBridge for ScriptedBridge {
        fn platform_name(&self) -> &str {
            "scripted"
        }
    }

    impl NativeCamera for ScriptedBridge {
        fn capture_image(&self) -> Result<Option<Vec<u8>>> {
            (self.camera)()
        }
    }

    impl NativePhotoLibrary for ScriptedBridge {
        fn pick_images(&self, _limit: Option<usize>) -> Result<Option<Vec<Vec<u8>>>> {
            (self.library)()
        }
    }

    impl NativeFilePicker for ScriptedBridge {
        fn pick_files(&self, _mime_types: &[&str]) -> Result<Option<Vec<String>>> {
            Ok(None)
        }

        fn read_picked_file(&self, _path: &str) -> Result<Vec<u8>> {
            Err(BogenError::PlatformUnavailable)
        }
    }

    impl NativeShare for ScriptedBridge {
        fn share_file(&self, _path: &str, _mime_type: &str) -> Result<()> {
            Ok(())
        }
    }

    fn bridge(
        camera: fn() -> Result<Option<Vec<u8>>>,
        library: fn() -> Result<Option<Vec<Vec<u8>>>>,
    ) -> ScriptedBridge {
        ScriptedBridge { camera, library }
    }

    #[test]
    fn camera_capture_decodes_one_image() {
        let b = bridge(|| Ok(Some(png(8, 4))), || Ok(None));
        let acq = acquire(&b, AcquireRequest::Camera);
        assert_eq!(acq.origin, ImageOrigin::Camera);
        assert_eq!(acq.images.len(), 1);
        assert_eq!(acq.images[0].width(), 8);
        assert!(acq.errors.is_empty());
    }

    #[test]
    fn cancelled_camera_is_user_cancelled() {
        let b = bridge(|| Ok(None), || Ok(None));
        let acq = acquire(&b, AcquireRequest::Camera);
        assert!(acq.is_cancelled());
    }

    #[test]
    fn permission_denied_is_reported() {
        let b = bridge(
            || Err(BogenError::PermissionDenied("camera".into())),
            || Ok(None),
        );
        let acq = acquire(&b, AcquireRequest::Camera);
        assert!(acq.images.is_empty());
        assert!(!acq.is_cancelled());
        assert!(matches!(acq.errors[..], [BogenError::PermissionDenied(_)]));
    }

    #[test]
    fn library_keeps_good_images_and_reports_bad_ones() {
        let b = bridge(
            || Ok(None),
            || Ok(Some(vec![png(3, 3), b"junk".to_vec(), png(5, 2)])),
        );
        let acq = acquire(&b, AcquireRequest::Library { limit: None });
        let widths: Vec<u32> = acq.images.iter().map(SourceImage::width).collect();
        assert_eq!(widths, vec![3, 5]);
        assert!(matches!(acq.errors[..], [BogenError::ImageError(_)]));
    }

    #[test]
    fn dismissed_file_picker_is_cancelled() {
        let b = bridge(|| Ok(None), || Ok(None));
        assert!(acquire(&b, AcquireRequest::Files).is_cancelled());
    }

    #[tokio::test]
    async fn spawned_acquisition_reaches_inbox() {
        let (tx, mut rx) = mpsc::unbounded_channel();
        let in_flight = Arc::new(AtomicUsize::new(0));
        let acquirer = Acquirer::new(
            Arc::new(bridge(|| Ok(Some(png(2, 2))), || Ok(None))),
            tx,
            Arc::clone(&in_flight),
        );
        acquirer.spawn(AcquireRequest::Camera).await.unwrap();

        let acq = rx.recv().await.unwrap();
        assert_eq!(acq.images.len(), 1);
        assert_eq!(in_flight.load(Ordering::Acquire), 1);
    }

    #[tokio::test]
    async fn panicking_bridge_still_reports_to_session() {
        let mut session = ScanSession::default();
        let crashing = bridge(
            || -> Result<Option<Vec<u8>>> { panic!("camera driver crashed") },
            || Ok(None),
        );
        let _task = session.acquirer(Arc::new(crashing)).spawn(AcquireRequest::Camera);

        let report = tokio::time::timeout(Duration::from_secs(2), session.next_acquisition())
            .await
            .expect("acquisition never reported")
            .expect("acquisition was in flight");
        assert_eq!(report.origin, ImageOrigin::Camera);
        assert_eq!(report.added, 0);
        assert!(matches!(report.errors[..], [BogenError::Bridge(_)]));
        assert!(session.is_empty());
        assert_eq!(session.pending_acquisitions(), 0);
    }

    #[tokio::test]
    async fn next_acquisition_is_none_when_idle() {
        let mut session = ScanSession::default();
        assert!(session.next_acquisition().await.is_none());
    }
}
