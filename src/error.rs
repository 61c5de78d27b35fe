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

//! Errors surfaced by the segment designer.

/// Structured errors returned by the segment designer.
///
/// Every failure propagates to the caller unchanged; the designer never
/// retries internally and never hands back a partial segment table.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum PwlError {
    /// The requested bounds were reversed or not finite.
    #[error("invalid design domain [{lower}, {upper}]")]
    InvalidDomain { lower: f64, upper: f64 },
    /// The activation produced a non-finite value while the search probed
    /// the domain (e.g. `log` evaluated at zero).
    #[error("activation evaluation produced a non-finite value near x = {x}")]
    DomainError { x: f64 },
    /// The exponent constant of a power node is not a scalar of an accepted
    /// numeric type.
    #[error("unsupported power exponent constant: {reason}")]
    UnsupportedType { reason: String },
    /// The descent hit its iteration cap before the residual spread settled,
    /// or the segment budget ran out before the error target was met.
    #[error("approximation failed to converge: {reason}")]
    NotConverged { reason: String },
}
