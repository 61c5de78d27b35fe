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

//! Affine segment model shared with the graph rewriter.

use serde::Serialize;

/// One affine piece of a piecewise-linear activation table.
///
/// `alpha` is the left endpoint of the piece's interval on the input axis;
/// the piece evaluates `y = m * x + b` for `x` in `[alpha, next.alpha)`.
/// The last entry of a finished table is a terminator: its `alpha` closes
/// the domain while its `m` and `b` are zero and never evaluated.
///
/// # Example
/// ```
/// use mind_pwl::segment::{evaluate, Segment};
/// let table = vec![Segment::new(0.0, 2.0, 1.0), Segment::terminator(4.0)];
/// assert_eq!(evaluate(&table, 1.5), 4.0);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Segment {
    pub alpha: f64,
    pub m: f64,
    pub b: f64,
}

impl Segment {
    pub fn new(alpha: f64, m: f64, b: f64) -> Self {
        Segment { alpha, m, b }
    }

    /// Terminator entry closing the table's domain at `alpha`.
    pub fn terminator(alpha: f64) -> Self {
        Segment {
            alpha,
            m: 0.0,
            b: 0.0,
        }
    }
}

/// Segment table flattened into the constant arrays the graph rewriter
/// materializes on the `Pwl` node: one `m` and `b` entry per evaluated
/// piece, with `alpha` carrying the closing domain edge as its extra
/// element.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PwlTable {
    pub m: Vec<f64>,
    pub b: Vec<f64>,
    pub alpha: Vec<f64>,
}

impl PwlTable {
    pub fn from_segments(segments: &[Segment]) -> Self {
        let pieces = segments.len().saturating_sub(1);
        PwlTable {
            m: segments[..pieces].iter().map(|s| s.m).collect(),
            b: segments[..pieces].iter().map(|s| s.b).collect(),
            alpha: segments.iter().map(|s| s.alpha).collect(),
        }
    }

    /// Number of evaluated pieces in the table.
    pub fn len(&self) -> usize {
        self.m.len()
    }

    pub fn is_empty(&self) -> bool {
        self.m.is_empty()
    }
}

/// Evaluate a segment table at `x`.
///
/// Inputs left of the first boundary use the first piece and inputs at or
/// past the closing boundary extend the last piece, mirroring the device's
/// saturation behavior. A table without at least one evaluated piece yields
/// zero.
pub fn evaluate(segments: &[Segment], x: f64) -> f64 {
    if segments.len() < 2 {
        return 0.0;
    }
    let pieces = &segments[..segments.len() - 1];
    let idx = pieces.partition_point(|s| s.alpha <= x).saturating_sub(1);
    pieces[idx].m * x + pieces[idx].b
}

/// Flip a table to the negated curve.
pub(crate) fn negate(segments: &mut [Segment]) {
    for segment in segments.iter_mut() {
        segment.m = -segment.m;
        segment.b = -segment.b;
    }
}

/// Structured errors from the segment-table verifier.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum SegmentVerifyError {
    /// A table needs at least one evaluated piece plus the terminator.
    #[error("table holds {0} entries; at least 2 are required")]
    TooShort(usize),
    /// A coefficient or boundary was not a finite number.
    #[error("non-finite coefficient in segment {index}")]
    NonFinite { index: usize },
    /// Segment boundaries must strictly increase along the input axis.
    #[error("alpha is not strictly increasing at segment {index}")]
    AlphaOrder { index: usize },
    /// Adjacent pieces disagree at their shared boundary by more than the
    /// allowed tolerance.
    #[error("discontinuity of {gap} at segment {index}")]
    Discontinuity { index: usize, gap: f64 },
}

/// Verify that a finished table is well-formed.
///
/// Checks finite coefficients, strictly increasing boundaries, and
/// continuity at interior joints within `tolerance`. The designer calls
/// this on its own output in debug builds; tests use it directly.
pub fn verify(segments: &[Segment], tolerance: f64) -> Result<(), SegmentVerifyError> {
    if segments.len() < 2 {
        return Err(SegmentVerifyError::TooShort(segments.len()));
    }

    for (index, segment) in segments.iter().enumerate() {
        if !segment.alpha.is_finite() || !segment.m.is_finite() || !segment.b.is_finite() {
            return Err(SegmentVerifyError::NonFinite { index });
        }
        if index > 0 && segment.alpha <= segments[index - 1].alpha {
            return Err(SegmentVerifyError::AlphaOrder { index });
        }
    }

    // Joints between evaluated pieces; the terminator has no value to match.
    for index in 0..segments.len().saturating_sub(2) {
        let edge = segments[index + 1].alpha;
        let left = segments[index].m * edge + segments[index].b;
        let right = segments[index + 1].m * edge + segments[index + 1].b;
        let gap = (left - right).abs();
        if gap > tolerance {
            return Err(SegmentVerifyError::Discontinuity { index, gap });
        }
    }

    Ok(())
}
