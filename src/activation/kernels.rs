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

//! Analytic kernels behind each activation tag: value, first derivative,
//! canonical design domain, and the caps the search honors.

/// Split point used for the exponential.
pub(crate) const EXP_BREAK: f64 = 0.045;

/// Hard cap on evaluated pieces per fitted sub-domain.
pub(crate) const MAX_SEGMENTS: usize = 128;

/// Default descent iteration cap.
pub(crate) const MAX_ITERATIONS: usize = 2000;

/// Descent iteration cap for the logarithm, which settles slowly on its
/// wide canonical domain.
pub(crate) const MAX_ITERATIONS_LOG: usize = 5000;

/// Analytic description of one scalar activation kind.
///
/// All methods must stay numerically stable on the declared domain; the
/// search treats any non-finite evaluation as a domain failure.
pub(crate) trait ActivationFn {
    fn value(&self, x: f64) -> f64;
    fn deriv(&self, x: f64) -> f64;

    /// Canonical design domain used when the caller does not bound the fit.
    fn lower_bound(&self) -> f64;
    fn upper_bound(&self) -> f64;

    /// Input at which the fit problem changes orientation, when the kind
    /// has one inside its domain.
    fn break_point(&self) -> Option<f64> {
        None
    }

    fn max_segments(&self) -> usize {
        MAX_SEGMENTS
    }

    fn max_iterations(&self) -> usize {
        MAX_ITERATIONS
    }

    /// Whether a sub-domain ending at `upper` is fitted against the negated
    /// curve. The search folds the sign into the descent and unfolds it on
    /// the finished table.
    fn is_negative(&self, upper: f64) -> bool;
}

pub(crate) struct Sigmoid;

impl ActivationFn for Sigmoid {
    fn value(&self, x: f64) -> f64 {
        0.5 * (1.0 + (x / 2.0).tanh())
    }

    fn deriv(&self, x: f64) -> f64 {
        let s = self.value(x);
        s * (1.0 - s)
    }

    fn lower_bound(&self) -> f64 {
        -10.0
    }

    fn upper_bound(&self) -> f64 {
        10.0
    }

    fn break_point(&self) -> Option<f64> {
        Some(0.0)
    }

    fn is_negative(&self, upper: f64) -> bool {
        upper == 0.0
    }
}

pub(crate) struct Tanh;

impl ActivationFn for Tanh {
    fn value(&self, x: f64) -> f64 {
        x.tanh()
    }

    fn deriv(&self, x: f64) -> f64 {
        let t = x.tanh();
        1.0 - t * t
    }

    fn lower_bound(&self) -> f64 {
        -5.0
    }

    fn upper_bound(&self) -> f64 {
        5.0
    }

    fn break_point(&self) -> Option<f64> {
        Some(0.0)
    }

    fn is_negative(&self, upper: f64) -> bool {
        upper == 0.0
    }
}

pub(crate) struct SoftSign;

impl ActivationFn for SoftSign {
    fn value(&self, x: f64) -> f64 {
        x / (1.0 + x.abs())
    }

    fn deriv(&self, x: f64) -> f64 {
        let d = 1.0 + x.abs();
        1.0 / (d * d)
    }

    fn lower_bound(&self) -> f64 {
        -10.0
    }

    fn upper_bound(&self) -> f64 {
        10.0
    }

    fn break_point(&self) -> Option<f64> {
        Some(0.0)
    }

    fn is_negative(&self, upper: f64) -> bool {
        upper == 0.0
    }
}

pub(crate) struct Exp;

impl ActivationFn for Exp {
    fn value(&self, x: f64) -> f64 {
        x.exp()
    }

    fn deriv(&self, x: f64) -> f64 {
        x.exp()
    }

    fn lower_bound(&self) -> f64 {
        -(i16::MAX as f64).ln()
    }

    fn upper_bound(&self) -> f64 {
        (i16::MAX as f64).ln()
    }

    fn break_point(&self) -> Option<f64> {
        Some(EXP_BREAK)
    }

    fn is_negative(&self, _upper: f64) -> bool {
        true
    }
}

pub(crate) struct Log;

impl ActivationFn for Log {
    fn value(&self, x: f64) -> f64 {
        x.ln()
    }

    fn deriv(&self, x: f64) -> f64 {
        1.0 / x
    }

    fn lower_bound(&self) -> f64 {
        0.001
    }

    fn upper_bound(&self) -> f64 {
        2981.0
    }

    fn max_iterations(&self) -> usize {
        MAX_ITERATIONS_LOG
    }

    fn is_negative(&self, _upper: f64) -> bool {
        false
    }
}

/// `(scale * x + shift) ^ exponent`, the general power kernel.
pub(crate) struct Power {
    exponent: f64,
    scale: f64,
    shift: f64,
}

impl Power {
    pub(crate) fn new(exponent: f64, scale: f64, shift: f64) -> Self {
        Power {
            exponent,
            scale,
            shift,
        }
    }

    /// Fractional exponents restrict the domain to non-negative inputs.
    pub(crate) fn has_integer_exponent(&self) -> bool {
        self.exponent % 1.0 == 0.0
    }
}

impl ActivationFn for Power {
    fn value(&self, x: f64) -> f64 {
        (self.scale * x + self.shift).powf(self.exponent)
    }

    fn deriv(&self, x: f64) -> f64 {
        self.exponent * self.scale * (self.scale * x + self.shift).powf(self.exponent - 1.0)
    }

    fn lower_bound(&self) -> f64 {
        if self.has_integer_exponent() {
            -16.0
        } else {
            0.0
        }
    }

    fn upper_bound(&self) -> f64 {
        16.0
    }

    fn break_point(&self) -> Option<f64> {
        Some(0.0)
    }

    fn is_negative(&self, _upper: f64) -> bool {
        self.has_integer_exponent()
    }
}
