// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Scan session — the single owner of the image collection.
//
// All mutation goes through `&mut self`, and images from asynchronous
// acquisitions only enter the collection when the session drains its inbox,
// so appends never interleave. Composition borrows the collection; the
// returned `Document` must be dropped before the next mutation.

use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use bogen_bridge::traits::PlatformBridge;
use bogen_core::AppConfig;
use bogen_core::error::{BogenError, Result};
use bogen_core::types::{ImageId, PageSizePolicy, SortOrder};
use bogen_document::{Document, ImageCollection, PdfWriter, SourceImage, compose};
use chrono::Local;
use tokio::sync::mpsc;
use tracing::{debug, info, instrument, warn};

use crate::acquire::{Acquirer, Acquisition, AcquisitionReport};
use crate::export::{ExportReceipt, ExportSink, export_file_name, hash_bytes};

/// A change to the collection, delivered to observers after it happens.
#[derive(Debug, Clone, PartialEq)]
pub enum CollectionEvent {
    Added { index: usize, id: ImageId },
    Removed { index: usize, id: ImageId },
    MovedToFront { from: usize, id: ImageId },
    Sorted { order: SortOrder },
    Cleared { removed: usize },
}

/// Handle returned by [`ScanSession::subscribe`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u64);

type Observer = Box<dyn Fn(&CollectionEvent) + Send>;

/// One document-building session.
pub struct ScanSession {
    images: ImageCollection<SourceImage>,
    config: AppConfig,
    observers: Vec<(SubscriptionId, Observer)>,
    next_subscription: u64,
    inbox_tx: mpsc::UnboundedSender<Acquisition>,
    inbox_rx: mpsc::UnboundedReceiver<Acquisition>,
    /// Acquisitions spawned but not yet received from the inbox.
    in_flight: Arc<AtomicUsize>,
}

impl ScanSession {
    pub fn new(config: AppConfig) -> Self {
        let (inbox_tx, inbox_rx) = mpsc::unbounded_channel();
        Self {
            images: ImageCollection::new(),
            config,
            observers: Vec::new(),
            next_subscription: 0,
            inbox_tx,
            inbox_rx,
            in_flight: Arc::new(AtomicUsize::new(0)),
        }
    }

    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    /// Read-only view of the current images, in order.
    pub fn images(&self) -> &ImageCollection<SourceImage> {
        &self.images
    }

    pub fn len(&self) -> usize {
        self.images.len()
    }

    pub fn is_empty(&self) -> bool {
        self.images.is_empty()
    }

    // -- Observers ------------------------------------------------------------

    /// Register a callback for every collection change.
    pub fn subscribe(
        &mut self,
        observer: impl Fn(&CollectionEvent) + Send + 'static,
    ) -> SubscriptionId {
        let id = SubscriptionId(self.next_subscription);
        self.next_subscription += 1;
        self.observers.push((id, Box::new(observer)));
        id
    }

    /// Returns false if `id` was not subscribed.
    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        let before = self.observers.len();
        self.observers.retain(|(sub, _)| *sub != id);
        self.observers.len() != before
    }

    fn notify(&self, event: CollectionEvent) {
        debug!(?event, observers = self.observers.len(), "collection changed");
        for (_, observer) in &self.observers {
            observer(&event);
        }
    }

    // -- Mutation -------------------------------------------------------------

    pub fn add_image(&mut self, image: SourceImage) {
        let id = image.id();
        let index = self.images.len();
        self.images.add(image);
        info!(%id, index, "image added");
        self.notify(CollectionEvent::Added { index, id });
    }

    /// Remove the image at `at`. Out of range is reported and changes nothing.
    pub fn remove_image(&mut self, at: usize) -> Result<SourceImage> {
        let removed = self.images.remove_at(at).inspect_err(|err| {
            warn!(error = %err, "remove ignored");
        })?;
        info!(id = %removed.id(), index = at, "image removed");
        self.notify(CollectionEvent::Removed {
            index: at,
            id: removed.id(),
        });
        Ok(removed)
    }

    /// Move the image at `at` to the front. Out of range is reported and
    /// changes nothing.
    pub fn move_to_front(&mut self, at: usize) -> Result<()> {
        self.images.move_to_front(at).inspect_err(|err| {
            warn!(error = %err, "move to front ignored");
        })?;
        if let Some(image) = self.images.get(0) {
            let id = image.id();
            self.notify(CollectionEvent::MovedToFront { from: at, id });
        }
        Ok(())
    }

    pub fn sort_images(&mut self, order: SortOrder) {
        self.images.sort(order);
        self.notify(CollectionEvent::Sorted { order });
    }

    pub fn clear(&mut self) {
        let removed = self.images.len();
        self.images.clear();
        info!(removed, "collection cleared");
        self.notify(CollectionEvent::Cleared { removed });
    }

    // -- Acquisition ----------------------------------------------------------

    /// An [`Acquirer`] whose results are delivered to this session.
    pub fn acquirer(&self, bridge: Arc<dyn PlatformBridge>) -> Acquirer {
        Acquirer::new(bridge, self.inbox_tx.clone(), Arc::clone(&self.in_flight))
    }

    /// Append the images of one acquisition, in order, as a contiguous run.
    pub fn apply(&mut self, acquisition: Acquisition) -> AcquisitionReport {
        let Acquisition {
            origin,
            images,
            errors,
        } = acquisition;

        let first_index = (!images.is_empty()).then(|| self.images.len());
        let added = images.len();
        for image in images {
            self.add_image(image);
        }

        for err in &errors {
            match err {
                BogenError::UserCancelled => debug!(%origin, "acquisition cancelled"),
                other => warn!(%origin, error = %other, "acquisition problem"),
            }
        }

        AcquisitionReport {
            origin,
            first_index,
            added,
            errors,
        }
    }

    /// Apply every acquisition that has already arrived, in arrival order.
    pub fn drain_acquisitions(&mut self) -> Vec<AcquisitionReport> {
        let mut reports = Vec::new();
        while let Ok(acquisition) = self.inbox_rx.try_recv() {
            self.in_flight.fetch_sub(1, Ordering::AcqRel);
            reports.push(self.apply(acquisition));
        }
        reports
    }

    /// Number of spawned acquisitions whose results have not been applied.
    pub fn pending_acquisitions(&self) -> usize {
        self.in_flight.load(Ordering::Acquire)
    }

    /// Wait for the next acquisition and apply it.
    ///
    /// Returns `None` without waiting when nothing is in flight. Every
    /// spawned acquisition reports exactly once, even if its task panics.
    pub async fn next_acquisition(&mut self) -> Option<AcquisitionReport> {
        if self.pending_acquisitions() == 0 {
            return None;
        }
        let acquisition = self.inbox_rx.recv().await?;
        self.in_flight.fetch_sub(1, Ordering::AcqRel);
        Some(self.apply(acquisition))
    }

    // -- Composition / export -------------------------------------------------

    /// Compose the current images. Pure; calling it twice gives the same
    /// document.
    pub fn compose(&self, policy: PageSizePolicy) -> Document<'_, SourceImage> {
        compose(self.images.as_slice(), policy)
    }

    /// Compose, render, and hand the PDF to `sink`.
    ///
    /// Any failure past composition is reported as `ExportFailed`, except
    /// platform errors from the sink, which are passed through so the caller
    /// can offer another sink.
    #[instrument(skip(self, sink), fields(images = self.images.len()))]
    pub fn export(&self, policy: PageSizePolicy, sink: &dyn ExportSink) -> Result<ExportReceipt> {
        let document = self.compose(policy);
        let rendered = PdfWriter::new()
            .with_title(self.config.document_title.as_str())
            .render(&document)
            .map_err(export_failed)?;

        let file_name = export_file_name(&self.config.file_name_prefix, &Local::now());
        let location = sink.deliver(&file_name, &rendered).map_err(export_failed)?;

        let receipt = ExportReceipt {
            location,
            page_count: document.page_count(),
            pdf_page_count: rendered.page_count,
            skipped: document.skipped().to_vec(),
            byte_len: rendered.bytes.len(),
            sha256: hash_bytes(&rendered.bytes),
        };

        if receipt.is_empty() {
            warn!(location = %receipt.location.display(), "exported an empty document");
        }
        info!(
            location = %receipt.location.display(),
            pages = receipt.page_count,
            skipped = receipt.skipped.len(),
            "export complete"
        );
        Ok(receipt)
    }

    /// Export with the configured default page size.
    pub fn export_default(&self, sink: &dyn ExportSink) -> Result<ExportReceipt> {
        self.export(self.config.default_page_policy, sink)
    }
}

impl Default for ScanSession {
    fn default() -> Self {
        Self::new(AppConfig::default())
    }
}

fn export_failed(err: BogenError) -> BogenError {
    match err {
        BogenError::ExportFailed(_)
        | BogenError::PlatformUnavailable
        | BogenError::PermissionDenied(_) => err,
        other => BogenError::ExportFailed(other.to_string()),
    }
}
