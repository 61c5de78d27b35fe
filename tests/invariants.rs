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

//! Invariants every finished table must satisfy, whatever the activation.

use proptest::prelude::*;

use mind_pwl::{approximate, evaluate, segment, Activation, ConstOperand, PwlTable, Segment};

fn designable_kinds() -> Vec<(Activation, f64, f64)> {
    vec![
        (Activation::Sigmoid, -10.0, 10.0),
        (Activation::Tanh, -5.0, 5.0),
        (Activation::Exp, -3.0, 3.0),
        (Activation::Log, 0.5, 100.0),
        (Activation::SoftSign, -10.0, 10.0),
        (Activation::power(ConstOperand::I32(vec![2])), -1.0, 1.0),
    ]
}

#[test]
fn alphas_increase_strictly_and_bracket_the_domain() {
    for (activation, lower, upper) in designable_kinds() {
        let table = approximate(&activation, lower, upper, 0.01).unwrap();
        assert_eq!(table[0].alpha, lower, "{activation:?}");
        assert_eq!(table[table.len() - 1].alpha, upper, "{activation:?}");
        for window in table.windows(2) {
            assert!(window[0].alpha < window[1].alpha, "{activation:?}");
        }
    }
}

#[test]
fn tables_pass_the_verifier() {
    for (activation, lower, upper) in designable_kinds() {
        let table = approximate(&activation, lower, upper, 0.01).unwrap();
        // A stitched break point may carry each half's full residual.
        segment::verify(&table, 2.0 * 0.01).unwrap();
    }
}

#[test]
fn adjacent_pieces_agree_at_their_joint() {
    let budget = 0.005;
    let table = approximate(&Activation::Sigmoid, -10.0, 10.0, budget).unwrap();
    for window in table[..table.len() - 1].windows(2) {
        let edge = window[1].alpha;
        let left = window[0].m * edge + window[0].b;
        let right = window[1].m * edge + window[1].b;
        assert!(
            (left - right).abs() <= 2.0 * budget,
            "jump of {} at {edge}",
            (left - right).abs()
        );
    }
}

#[test]
fn identical_inputs_give_byte_identical_tables() {
    for (activation, lower, upper) in designable_kinds() {
        let first = approximate(&activation, lower, upper, 0.01).unwrap();
        let second = approximate(&activation, lower, upper, 0.01).unwrap();
        assert_eq!(first, second, "{activation:?}");
        assert_eq!(
            serde_json::to_string(&first).unwrap(),
            serde_json::to_string(&second).unwrap()
        );
    }
}

#[test]
fn tighter_budgets_never_shed_pieces() {
    let mut previous = 0usize;
    for budget in [0.05, 0.02, 0.01, 0.005, 0.002] {
        let table = approximate(&Activation::Sigmoid, -10.0, 10.0, budget).unwrap();
        let count = table.len() - 1;
        assert!(
            count >= previous,
            "budget {budget} produced {count} pieces after {previous}"
        );
        previous = count;
    }
}

#[test]
fn break_free_domains_have_no_interior_stitch() {
    // The logarithm never splits; sigmoid across zero always does.
    let log_table = approximate(&Activation::Log, 0.5, 100.0, 0.01).unwrap();
    assert!(log_table.iter().all(|s| s.alpha != 0.0));
    let sigmoid_table = approximate(&Activation::Sigmoid, -10.0, 10.0, 0.01).unwrap();
    assert!(sigmoid_table.iter().any(|s| s.alpha == 0.0));
}

#[test]
fn flattened_arrays_mirror_the_segments() {
    let table = approximate(&Activation::Tanh, -5.0, 5.0, 0.01).unwrap();
    let arrays = PwlTable::from_segments(&table);
    assert_eq!(arrays.len(), table.len() - 1);
    assert_eq!(arrays.alpha.len(), table.len());
    for (i, segment) in table[..table.len() - 1].iter().enumerate() {
        assert_eq!(arrays.m[i], segment.m);
        assert_eq!(arrays.b[i], segment.b);
        assert_eq!(arrays.alpha[i], segment.alpha);
    }
    assert_eq!(
        arrays.alpha[arrays.len()],
        table[table.len() - 1].alpha
    );
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(24))]

    /// Any feasible sigmoid design brackets its domain, keeps boundaries
    /// ordered, and holds the budget pointwise.
    #[test]
    fn sigmoid_tables_hold_their_budget(
        lower in -10.0f64..-0.5,
        upper in 0.5f64..10.0,
        budget in 0.003f64..0.05,
    ) {
        let table = approximate(&Activation::Sigmoid, lower, upper, budget).unwrap();
        prop_assert_eq!(table[0].alpha, lower);
        prop_assert_eq!(table[table.len() - 1].alpha, upper);
        for window in table.windows(2) {
            prop_assert!(window[0].alpha < window[1].alpha);
        }
        for i in 0..=400 {
            let x = lower + (upper - lower) * i as f64 / 400.0;
            let reference = 1.0 / (1.0 + (-x).exp());
            let deviation = (reference - evaluate(&table, x)).abs();
            prop_assert!(
                deviation <= budget * 1.01,
                "deviation {} at {} with budget {}", deviation, x, budget
            );
        }
    }

    /// Same contract for tanh over randomized windows.
    #[test]
    fn tanh_tables_hold_their_budget(
        lower in -5.0f64..-0.5,
        upper in 0.5f64..5.0,
        budget in 0.003f64..0.05,
    ) {
        let table = approximate(&Activation::Tanh, lower, upper, budget).unwrap();
        prop_assert_eq!(table[0].alpha, lower);
        prop_assert_eq!(table[table.len() - 1].alpha, upper);
        for i in 0..=400 {
            let x = lower + (upper - lower) * i as f64 / 400.0;
            let deviation = (x.tanh() - evaluate(&table, x)).abs();
            prop_assert!(
                deviation <= budget * 1.01,
                "deviation {} at {} with budget {}", deviation, x, budget
            );
        }
    }
}

#[test]
fn segment_literals_round_trip_through_the_verifier() {
    let table = vec![
        Segment::new(-2.0, 0.5, 0.0),
        Segment::new(0.0, 1.0, 0.0),
        Segment::terminator(2.0),
    ];
    segment::verify(&table, 1e-12).unwrap();
}
