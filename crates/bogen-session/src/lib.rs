// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// bogen-session — the owning context for one document-building session.
//
// A `ScanSession` owns the image collection. Acquisitions run on blocking
// tasks and report back over a channel the session drains, so appends are
// serialized no matter how many pickers are in flight. Observers are told
// about every change, and exports go through an `ExportSink`.

pub mod acquire;
pub mod data_dir;
pub mod export;
pub mod session;
pub mod settings;

pub use acquire::{AcquireRequest, Acquirer, Acquisition, AcquisitionReport};
pub use export::{ExportReceipt, ExportSink, FileExportSink, ShareExportSink};
pub use session::{CollectionEvent, ScanSession, SubscriptionId};
