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

//! Segment-count growth and domain splitting around break points.

pub(crate) mod metric;
pub(crate) mod pivot;

use tracing::debug;

use crate::activation::kernels::ActivationFn;
use crate::error::PwlError;
use crate::segment::{self, Segment};

use self::metric::max_deviation;
use self::pivot::pivot_search;

/// The kernel's break point, when it falls strictly inside
/// `[lower, upper]` and each side must be fitted on its own.
fn split_point<F: ActivationFn>(kernel: &F, lower: f64, upper: f64) -> Option<f64> {
    kernel
        .break_point()
        .filter(|point| lower < *point && upper > *point)
}

/// Fit `kernel` over `[lower, upper]`, growing the segment count until the
/// sampled deviation meets `budget`.
///
/// Returns the finished table, oriented to the plain curve, together with
/// the deviation estimate that stopped the growth. For a split domain the
/// estimate is the mean of the two halves — an adequate growth signal, not
/// a bound; each half was already validated against `budget` on its own.
pub(crate) fn design<F: ActivationFn>(
    kernel: &F,
    lower: f64,
    upper: f64,
    budget: f64,
) -> Result<(Vec<Segment>, f64), PwlError> {
    let break_point = match split_point(kernel, lower, upper) {
        Some(point) => point,
        None => return design_half(kernel, lower, upper, budget),
    };

    let (mut segments, left_deviation) = design_half(kernel, lower, break_point, budget)?;
    let (right, right_deviation) = design_half(kernel, break_point, upper, budget)?;

    // Stitch: the left terminator duplicates the right table's first alpha.
    segments.pop();
    segments.extend(right);
    debug!(
        pieces = segments.len() - 1,
        left_deviation, right_deviation, "stitched split domain"
    );
    Ok((segments, (left_deviation + right_deviation) / 2.0))
}

/// Growth loop for one break-free sub-domain.
///
/// The descent fits the sign-folded curve; the fold is undone here so every
/// caller sees a table oriented to `f`. Smaller counts win ties because the
/// loop exits on the first count that meets the budget.
fn design_half<F: ActivationFn>(
    kernel: &F,
    lower: f64,
    upper: f64,
    budget: f64,
) -> Result<(Vec<Segment>, f64), PwlError> {
    let negative = kernel.is_negative(upper);

    let mut count = 1;
    let mut fit = pivot_search(kernel, count, lower, upper, negative)?;
    let mut deviation = max_deviation(kernel, &fit.segments, lower, upper, negative);
    while count < kernel.max_segments() && deviation > budget {
        count += 1;
        fit = pivot_search(kernel, count, lower, upper, negative)?;
        deviation = max_deviation(kernel, &fit.segments, lower, upper, negative);
    }
    debug!(count, deviation, residual = fit.epsilon, "segment count settled");

    if count >= kernel.max_segments() && deviation > budget {
        return Err(PwlError::NotConverged {
            reason: format!(
                "budget of {budget} unmet with the maximum of {} segments",
                kernel.max_segments()
            ),
        });
    }

    let mut segments = fit.segments;
    if negative {
        segment::negate(&mut segments);
    }
    Ok((segments, deviation))
}
