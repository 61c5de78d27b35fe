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

//! Failure paths surfaced through the public entry points.

use mind_pwl::{approximate, Activation, ConstOperand, PwlError};

#[test]
fn reversed_and_non_finite_bounds_are_rejected() {
    for (lower, upper) in [
        (1.0, -1.0),
        (f64::NAN, 1.0),
        (-1.0, f64::NAN),
        (f64::INFINITY, f64::INFINITY),
    ] {
        let err = approximate(&Activation::Sigmoid, lower, upper, 0.01).unwrap_err();
        assert!(matches!(err, PwlError::InvalidDomain { .. }), "{err}");
    }
}

#[test]
fn log_at_zero_leaves_the_finite_range() {
    let err = approximate(&Activation::Log, 0.0, 10.0, 0.01).unwrap_err();
    assert!(matches!(err, PwlError::DomainError { .. }), "{err}");
}

#[test]
fn fractional_power_refuses_a_domain_below_zero() {
    let act = Activation::power(ConstOperand::F32(vec![0.5]));
    let err = approximate(&act, -2.0, 16.0, 0.01).unwrap_err();
    assert!(matches!(err, PwlError::InvalidDomain { .. }), "{err}");
}

#[test]
fn boolean_exponents_are_unsupported() {
    let act = Activation::power(ConstOperand::Bool(vec![true]));
    let err = approximate(&act, -1.0, 1.0, 0.01).unwrap_err();
    assert!(matches!(err, PwlError::UnsupportedType { .. }), "{err}");
}

#[test]
fn vector_exponents_are_unsupported() {
    let act = Activation::power(ConstOperand::I32(vec![2, 3]));
    let err = approximate(&act, -1.0, 1.0, 0.01).unwrap_err();
    assert!(matches!(err, PwlError::UnsupportedType { .. }), "{err}");
}

#[test]
fn impossible_budgets_exhaust_the_segment_cap() {
    let err = approximate(&Activation::Log, 0.001, 2981.0, 1e-6).unwrap_err();
    assert!(matches!(err, PwlError::NotConverged { .. }), "{err}");
}

#[test]
fn errors_render_a_readable_story() {
    let err = approximate(&Activation::Sigmoid, 2.0, -2.0, 0.01).unwrap_err();
    assert!(err.to_string().contains("[2, -2]"), "{err}");
}
