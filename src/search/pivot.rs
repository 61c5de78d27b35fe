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

//! Equioscillation descent for a fixed segment count.
//!
//! For a function with monotone second derivative on the sub-domain, the
//! minimax piecewise-linear fit has residuals of equal magnitude at every
//! segment boundary. The descent keeps one tangent point per segment, pins
//! boundaries at the intersections of adjacent tangent lines, and walks the
//! tangent points until the boundary residuals even out.

use tracing::trace;

use crate::activation::kernels::ActivationFn;
use crate::error::PwlError;
use crate::segment::Segment;

/// Relative residual spread below which the fit counts as settled.
pub(crate) const DESIGN_THRESHOLD: f64 = 0.1;

/// Consecutive degenerate-intersection reverts tolerated before giving up;
/// each one halves the step multiplier.
const MAX_GUARDED_REVERTS: u32 = 64;

/// A settled fit: the table for one sub-domain plus the residual the
/// descent centered on.
#[derive(Debug)]
pub(crate) struct PivotFit {
    pub segments: Vec<Segment>,
    pub epsilon: f64,
}

/// Fit `count` segments over `[alpha_0, alpha_n]` against the sign-folded
/// curve `s * f`, `s = -1` when `negative`.
///
/// The returned table approximates the folded curve; the caller owns the
/// final orientation. Fails with [`PwlError::NotConverged`] when the
/// iteration cap is reached before the residual spread settles and with
/// [`PwlError::DomainError`] when the kernel leaves the finite range.
pub(crate) fn pivot_search<F: ActivationFn>(
    kernel: &F,
    count: usize,
    alpha_0: f64,
    alpha_n: f64,
    negative: bool,
) -> Result<PivotFit, PwlError> {
    debug_assert!(count >= 1);
    let n = count;
    let sgn = if negative { -1.0 } else { 1.0 };
    let max_iterations = kernel.max_iterations();

    // Uniform interior tangent seeds.
    let mut t: Vec<f64> = (0..n)
        .map(|i| alpha_0 + ((i + 1) as f64 / (n + 1) as f64) * (alpha_n - alpha_0))
        .collect();
    let mut alpha = vec![0.0; n + 1];
    let mut epsilon = vec![0.0; n + 1];
    let mut d = vec![0.0; n];

    // Only the previous column is ever read back, so the iteration history
    // collapses to one backup of each evolving array.
    let mut t_prev = t.clone();
    let mut alpha_prev = alpha.clone();
    let mut epsilon_prev = epsilon.clone();

    let mut delta = 1.0;
    let mut j: usize = 0;
    let mut same_epsilon = false;
    let mut max_eps = 0.0f64;
    let mut guarded_reverts = 0u32;

    loop {
        // Segment boundaries sit where adjacent tangent lines intersect.
        alpha[0] = alpha_0;
        alpha[n] = alpha_n;
        let mut degenerate = false;
        for i in 1..n {
            let dv = kernel.deriv(t[i]) - kernel.deriv(t[i - 1]);
            if dv.abs() <= f64::EPSILON {
                degenerate = true;
                break;
            }
            alpha[i] = (kernel.value(t[i - 1]) - kernel.value(t[i]) + kernel.deriv(t[i]) * t[i]
                - kernel.deriv(t[i - 1]) * t[i - 1])
                / dv;
        }

        if degenerate {
            // Near-equal derivatives leave the boundary unplaceable; retry
            // from the previous column with a smaller step.
            if j == 0 || guarded_reverts >= MAX_GUARDED_REVERTS {
                return Err(PwlError::NotConverged {
                    reason: format!("degenerate tangent intersection with {n} segments"),
                });
            }
            guarded_reverts += 1;
            delta /= 2.0;
            t.copy_from_slice(&t_prev);
            alpha.copy_from_slice(&alpha_prev);
            epsilon.copy_from_slice(&epsilon_prev);
            step(&t, &alpha, &epsilon, delta, &mut d);
            apply(&mut t, &d);
            continue;
        }
        guarded_reverts = 0;

        // Signed residual at each boundary.
        for i in 0..n {
            epsilon[i] = sgn
                * (kernel.deriv(t[i]) * (alpha[i] - t[i]) + kernel.value(t[i])
                    - kernel.value(alpha[i]));
            if !epsilon[i].is_finite() {
                return Err(PwlError::DomainError { x: alpha[i] });
            }
        }
        epsilon[n] = sgn
            * (kernel.deriv(t[n - 1]) * (alpha[n] - t[n - 1]) + kernel.value(t[n - 1])
                - kernel.value(alpha[n]));
        if !epsilon[n].is_finite() {
            return Err(PwlError::DomainError { x: alpha[n] });
        }

        let max_eps_prev = max_eps;
        max_eps = epsilon.iter().fold(0.0f64, |acc, e| acc.max(e.abs()));
        let min_eps = epsilon
            .iter()
            .fold(f64::INFINITY, |acc, e| acc.min(e.abs()));
        trace!(j, delta, max_eps, min_eps, "descent column");

        if j == max_iterations || max_eps - min_eps < DESIGN_THRESHOLD * min_eps {
            if j == max_iterations {
                return Err(PwlError::NotConverged {
                    reason: format!("iteration cap of {max_iterations} reached with {n} segments"),
                });
            }
            return Ok(emit(kernel, n, sgn, &t, &alpha, max_eps, min_eps));
        }

        if j > 0 {
            if max_eps > max_eps_prev {
                // Overshot: drop the column and retry with half the step.
                delta /= 2.0;
                t.copy_from_slice(&t_prev);
                alpha.copy_from_slice(&alpha_prev);
                epsilon.copy_from_slice(&epsilon_prev);
                step(&t, &alpha, &epsilon, delta, &mut d);
                apply(&mut t, &d);
                continue;
            }
            if max_eps == max_eps_prev {
                // A flat step gets one second chance before it is treated
                // like a regression.
                if !same_epsilon {
                    same_epsilon = true;
                } else {
                    same_epsilon = false;
                    delta /= 2.0;
                    t.copy_from_slice(&t_prev);
                    alpha.copy_from_slice(&alpha_prev);
                    epsilon.copy_from_slice(&epsilon_prev);
                    step(&t, &alpha, &epsilon, delta, &mut d);
                    apply(&mut t, &d);
                    continue;
                }
            }
        }

        t_prev.copy_from_slice(&t);
        alpha_prev.copy_from_slice(&alpha);
        epsilon_prev.copy_from_slice(&epsilon);
        step(&t, &alpha, &epsilon, delta, &mut d);
        apply(&mut t, &d);
        j += 1;
    }
}

/// Descent step toward evened-out residuals.
fn step(t: &[f64], alpha: &[f64], epsilon: &[f64], delta: f64, d: &mut [f64]) {
    for i in 0..t.len() {
        d[i] = delta * (epsilon[i + 1] - epsilon[i])
            / (epsilon[i + 1] / (alpha[i + 1] - t[i]) + epsilon[i] / (t[i] - alpha[i]));
    }
}

fn apply(t: &mut [f64], d: &[f64]) {
    for (ti, di) in t.iter_mut().zip(d) {
        *ti += di;
    }
}

/// Build the table from the settled column, shifting each tangent line by
/// the equioscillation center.
fn emit<F: ActivationFn>(
    kernel: &F,
    n: usize,
    sgn: f64,
    t: &[f64],
    alpha: &[f64],
    max_eps: f64,
    min_eps: f64,
) -> PivotFit {
    let epsilon_final = (max_eps + min_eps) / 4.0;
    let mut segments = Vec::with_capacity(n + 1);
    for i in 0..n {
        let v = sgn * kernel.deriv(t[i]) * (alpha[i] - t[i]) + sgn * kernel.value(t[i])
            - epsilon_final;
        let v_next = sgn * kernel.deriv(t[i]) * (alpha[i + 1] - t[i]) + sgn * kernel.value(t[i])
            - epsilon_final;
        let m = (v_next - v) / (alpha[i + 1] - alpha[i]);
        let b = v - m * alpha[i];
        segments.push(Segment::new(alpha[i], m, b));
    }
    segments.push(Segment::terminator(alpha[n]));
    PivotFit {
        segments,
        epsilon: epsilon_final,
    }
}
