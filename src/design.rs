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

//! Entry points handed to the graph rewriter.

use tracing::debug;

use crate::activation::{kernels, Activation};
use crate::error::PwlError;
use crate::power;
use crate::search;
use crate::segment::{self, Segment};

/// Design a segment table for `activation` over `[lower, upper]` with a
/// per-point absolute error budget.
///
/// The returned table brackets the domain — the first entry's `alpha` is
/// `lower`, the trailing terminator's is `upper` — and is continuous and
/// deterministic for fixed inputs. Failures carry the full story; a table
/// is never partial.
pub fn approximate(
    activation: &Activation,
    lower: f64,
    upper: f64,
    max_error: f64,
) -> Result<Vec<Segment>, PwlError> {
    if !lower.is_finite() || !upper.is_finite() || lower > upper {
        return Err(PwlError::InvalidDomain { lower, upper });
    }

    let segments = match activation {
        Activation::Sigmoid => fit(&kernels::Sigmoid, lower, upper, max_error)?,
        Activation::Tanh => fit(&kernels::Tanh, lower, upper, max_error)?,
        Activation::Exp => fit(&kernels::Exp, lower, upper, max_error)?,
        Activation::Log => fit(&kernels::Log, lower, upper, max_error)?,
        Activation::SoftSign => fit(&kernels::SoftSign, lower, upper, max_error)?,
        Activation::Power {
            exponent,
            scale,
            shift,
        } => power::design_power(exponent, *scale, *shift, lower, upper, max_error)?,
        Activation::Identity => power::identity_segments(),
    };

    // A stitched break point may carry both halves' residuals.
    debug_assert!(segment::verify(&segments, (2.0 * max_error).max(1e-9)).is_ok());
    Ok(segments)
}

/// [`approximate`] over the activation's canonical domain.
pub fn approximate_canonical(
    activation: &Activation,
    max_error: f64,
) -> Result<Vec<Segment>, PwlError> {
    let (lower, upper) = activation.canonical_domain()?;
    approximate(activation, lower, upper, max_error)
}

fn fit<F: kernels::ActivationFn>(
    kernel: &F,
    lower: f64,
    upper: f64,
    budget: f64,
) -> Result<Vec<Segment>, PwlError> {
    let (segments, deviation) = search::design(kernel, lower, upper, budget)?;
    debug!(
        pieces = segments.len() - 1,
        deviation, "activation table designed"
    );
    Ok(segments)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reversed_bounds_are_invalid() {
        let err = approximate(&Activation::Sigmoid, 3.0, -3.0, 0.01).unwrap_err();
        assert!(matches!(err, PwlError::InvalidDomain { .. }));
    }

    #[test]
    fn nan_bounds_are_invalid() {
        for (lower, upper) in [(f64::NAN, 1.0), (0.0, f64::NAN), (f64::NEG_INFINITY, 0.0)] {
            let err = approximate(&Activation::Tanh, lower, upper, 0.01).unwrap_err();
            assert!(matches!(err, PwlError::InvalidDomain { .. }));
        }
    }

    #[test]
    fn identity_ignores_the_requested_window() {
        let table = approximate(&Activation::Identity, -1.0, 1.0, 0.01).unwrap();
        assert_eq!(table.len(), 2);
        assert_eq!((table[0].m, table[0].b), (1.0, 0.0));
    }
}
