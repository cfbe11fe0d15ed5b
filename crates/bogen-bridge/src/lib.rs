// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Bogen — platform bridge abstractions.
//
// Image sources (camera, photo library, file picker) and the share sheet are
// reached through the traits in `traits`. Mobile builds plug in native
// implementations; desktop builds use `FsBridge`, and `StubBridge` stands in
// wherever nothing is available.

pub mod fs;
pub mod stub;
pub mod traits;

pub use fs::FsBridge;
pub use stub::StubBridge;
pub use traits::*;
