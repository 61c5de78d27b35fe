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

//! Sampled deviation between an activation and a fitted table.

use crate::activation::kernels::ActivationFn;
use crate::segment::{evaluate, Segment};

/// Sample count for the deviation sweep.
pub(crate) const DESIGN_SAMPLES: usize = 500;

/// Maximum absolute deviation over uniform samples starting at the lower
/// domain edge. `negative` mirrors the sign folding of the table under
/// test, so the comparison is always against the unfolded curve.
///
/// This is the authoritative signal for growing the segment count; the
/// residual the descent itself reports is only a fit diagnostic.
pub(crate) fn max_deviation<F: ActivationFn>(
    kernel: &F,
    segments: &[Segment],
    lower: f64,
    upper: f64,
    negative: bool,
) -> f64 {
    let sgn = if negative { -1.0 } else { 1.0 };
    let delta = (upper - lower) / (DESIGN_SAMPLES as f64 + 1.0);
    if delta < 0.0 {
        return 0.0;
    }

    let mut worst = 0.0f64;
    for i in 0..DESIGN_SAMPLES {
        let x = lower + i as f64 * delta;
        let deviation = (kernel.value(x) - sgn * evaluate(segments, x)).abs();
        worst = worst.max(deviation);
    }
    worst
}
