// Copyright 2025 STARGA Inc.
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at:
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

// Part of the MIND project (Machine Intelligence Native Design).

//! Piecewise-linear activation design for fixed-point accelerator backends.
//!
//! Accelerators in the MIND lowering path evaluate scalar activations as
//! tables of affine segments. This crate owns the numeric side of that
//! lowering: given an activation kind, a bounded input domain, and a
//! per-point error budget, it returns the shortest segment table whose
//! deviation from the analytic curve stays inside the budget.
//!
//! The solver places segment boundaries by equioscillation descent — the
//! multi-segment generalization of the single-segment Chebyshev fit for
//! curves with monotone second derivative — then grows the segment count
//! until a sampled deviation sweep meets the budget. Domains that straddle
//! a curvature break point are split there and fitted per side.
//!
//! Graph pattern matching, node replacement, and on-device evaluation
//! belong to the host compiler. The boundary is [`approximate`] in and an
//! owned `Vec<Segment>` out; [`PwlTable`](segment::PwlTable) flattens a
//! finished table into the constant arrays the rewriter materializes.
//!
//! Every entry point is pure and synchronous: no shared state, no I/O, and
//! byte-identical output for identical input.

pub mod activation;
pub mod design;
pub mod error;
pub mod segment;

pub(crate) mod power;
pub(crate) mod search;

pub use activation::{Activation, ConstOperand};
pub use design::{approximate, approximate_canonical};
pub use error::PwlError;
pub use segment::{evaluate, PwlTable, Segment};
