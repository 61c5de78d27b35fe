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

//! Power-node handling: exponent extraction and the pass-through shortcut.

use crate::activation::kernels;
use crate::activation::ConstOperand;
use crate::error::PwlError;
use crate::search;
use crate::segment::Segment;

fn scalar<T: Copy>(values: &[T], dtype: &'static str) -> Result<T, PwlError> {
    match values {
        [value] => Ok(*value),
        _ => Err(PwlError::UnsupportedType {
            reason: format!(
                "expected a scalar {dtype} exponent, got {} elements",
                values.len()
            ),
        }),
    }
}

/// Pull the exponent out of the graph constant.
///
/// Every integer width up to 64 bits and every floating width is accepted;
/// anything else, or a constant that is not a single element, is rejected.
pub(crate) fn extract_exponent(operand: &ConstOperand) -> Result<f64, PwlError> {
    let dtype = operand.dtype_name();
    match operand {
        ConstOperand::I8(v) => scalar(v, dtype).map(f64::from),
        ConstOperand::I16(v) => scalar(v, dtype).map(f64::from),
        ConstOperand::I32(v) => scalar(v, dtype).map(f64::from),
        ConstOperand::I64(v) => scalar(v, dtype).map(|x| x as f64),
        ConstOperand::U8(v) => scalar(v, dtype).map(f64::from),
        ConstOperand::U16(v) => scalar(v, dtype).map(f64::from),
        ConstOperand::U32(v) => scalar(v, dtype).map(f64::from),
        ConstOperand::U64(v) => scalar(v, dtype).map(|x| x as f64),
        ConstOperand::F16(v) => scalar(v, dtype).map(|x| x.to_f64()),
        ConstOperand::Bf16(v) => scalar(v, dtype).map(|x| x.to_f64()),
        ConstOperand::F32(v) => scalar(v, dtype).map(f64::from),
        ConstOperand::F64(v) => scalar(v, dtype),
        ConstOperand::Bool(_) => Err(PwlError::UnsupportedType {
            reason: format!("exponent dtype {dtype} is not numeric"),
        }),
    }
}

fn floats_equal(a: f64, b: f64) -> bool {
    (a - b).abs() <= f64::EPSILON * a.abs().max(b.abs()).max(1.0)
}

/// Pass-through table over the full device input range.
pub(crate) fn identity_segments() -> Vec<Segment> {
    vec![
        Segment::new(i32::MIN as f64, 1.0, 0.0),
        Segment::terminator(i32::MAX as f64),
    ]
}

/// Design a table for `(scale * x + shift) ^ p` over `[lower, upper]`.
///
/// An exponent of one short-circuits to the affine table itself — the
/// identity table for a plain power node — since the descent has nothing
/// to fit on a line. Fractional exponents reject domains that reach below
/// zero rather than guessing a clip.
pub(crate) fn design_power(
    exponent: &ConstOperand,
    scale: f64,
    shift: f64,
    lower: f64,
    upper: f64,
    budget: f64,
) -> Result<Vec<Segment>, PwlError> {
    let p = extract_exponent(exponent)?;

    if floats_equal(p, 1.0) {
        let mut segments = identity_segments();
        segments[0].m = scale;
        segments[0].b = shift;
        return Ok(segments);
    }

    let kernel = kernels::Power::new(p, scale, shift);
    if !kernel.has_integer_exponent() && lower < 0.0 {
        return Err(PwlError::InvalidDomain { lower, upper });
    }

    let (segments, _) = search::design(&kernel, lower, upper, budget)?;
    Ok(segments)
}
