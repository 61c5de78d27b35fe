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

//! Activation descriptors crossing the rewriter boundary.

pub(crate) mod kernels;

use half::{bf16, f16};

use crate::error::PwlError;
use crate::power;

use self::kernels::ActivationFn;

/// Typed scalar constant as the graph rewriter hands it over — the exponent
/// operand of a `power` node keeps its graph dtype until extraction.
#[derive(Debug, Clone, PartialEq)]
pub enum ConstOperand {
    I8(Vec<i8>),
    I16(Vec<i16>),
    I32(Vec<i32>),
    I64(Vec<i64>),
    U8(Vec<u8>),
    U16(Vec<u16>),
    U32(Vec<u32>),
    U64(Vec<u64>),
    F16(Vec<f16>),
    Bf16(Vec<bf16>),
    F32(Vec<f32>),
    F64(Vec<f64>),
    Bool(Vec<bool>),
}

impl ConstOperand {
    pub fn dtype_name(&self) -> &'static str {
        match self {
            ConstOperand::I8(_) => "i8",
            ConstOperand::I16(_) => "i16",
            ConstOperand::I32(_) => "i32",
            ConstOperand::I64(_) => "i64",
            ConstOperand::U8(_) => "u8",
            ConstOperand::U16(_) => "u16",
            ConstOperand::U32(_) => "u32",
            ConstOperand::U64(_) => "u64",
            ConstOperand::F16(_) => "f16",
            ConstOperand::Bf16(_) => "bf16",
            ConstOperand::F32(_) => "f32",
            ConstOperand::F64(_) => "f64",
            ConstOperand::Bool(_) => "bool",
        }
    }

    pub fn len(&self) -> usize {
        match self {
            ConstOperand::I8(v) => v.len(),
            ConstOperand::I16(v) => v.len(),
            ConstOperand::I32(v) => v.len(),
            ConstOperand::I64(v) => v.len(),
            ConstOperand::U8(v) => v.len(),
            ConstOperand::U16(v) => v.len(),
            ConstOperand::U32(v) => v.len(),
            ConstOperand::U64(v) => v.len(),
            ConstOperand::F16(v) => v.len(),
            ConstOperand::Bf16(v) => v.len(),
            ConstOperand::F32(v) => v.len(),
            ConstOperand::F64(v) => v.len(),
            ConstOperand::Bool(v) => v.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Scalar activations the designer can lower to a segment table.
#[derive(Debug, Clone, PartialEq)]
pub enum Activation {
    Sigmoid,
    Tanh,
    Exp,
    Log,
    SoftSign,
    /// `(scale * x + shift) ^ p`, with the exponent given as a typed graph
    /// constant. Plain power nodes use `scale = 1`, `shift = 0`; the fused
    /// power-with-affine node carries its own.
    Power {
        exponent: ConstOperand,
        scale: f64,
        shift: f64,
    },
    /// Pass-through table, the degenerate form a power node takes when its
    /// exponent is one.
    Identity,
}

impl Activation {
    /// Plain power node without the fused affine.
    pub fn power(exponent: ConstOperand) -> Self {
        Activation::Power {
            exponent,
            scale: 1.0,
            shift: 0.0,
        }
    }

    /// Canonical design domain for this activation.
    ///
    /// For power nodes the lower edge depends on the exponent, so the
    /// extraction can fail with [`PwlError::UnsupportedType`].
    pub fn canonical_domain(&self) -> Result<(f64, f64), PwlError> {
        let bounds = |k: &dyn ActivationFn| (k.lower_bound(), k.upper_bound());
        match self {
            Activation::Sigmoid => Ok(bounds(&kernels::Sigmoid)),
            Activation::Tanh => Ok(bounds(&kernels::Tanh)),
            Activation::Exp => Ok(bounds(&kernels::Exp)),
            Activation::Log => Ok(bounds(&kernels::Log)),
            Activation::SoftSign => Ok(bounds(&kernels::SoftSign)),
            Activation::Power {
                exponent,
                scale,
                shift,
            } => {
                let p = power::extract_exponent(exponent)?;
                Ok(bounds(&kernels::Power::new(p, *scale, *shift)))
            }
            Activation::Identity => Ok((i32::MIN as f64, i32::MAX as f64)),
        }
    }
}
