// SPDX-License-Identifier: LGPL-3.0-only
//
// This file is provided WITHOUT ANY WARRANTY;
// without even the implied warranty of MERCHANTABILITY
// or FITNESS FOR A PARTICULAR PURPOSE.

use std::sync::Arc;

use fhe::bfv::{BfvParameters, Ciphertext};
use serde::{Deserialize, Serialize};

/// Lane layout of a value inside the SIMD slot vector.
///
/// `Paired` packs two lanes per slot column of the 2×(N/2) slot matrix:
/// lanes 2j and 2j+1 occupy slots j and j+N/2. Element-wise arithmetic
/// preserves the layout, so kernels only require operand modes to match
/// and propagate the mode to the result.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum PackingMode {
    Flat,
    Paired,
}

/// Cleartext lanes, tagged with their element kind.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub enum PlainData {
    Real(Vec<f64>),
    Integer(Vec<i64>),
}

impl PlainData {
    pub fn lanes(&self) -> usize {
        match self {
            PlainData::Real(v) => v.len(),
            PlainData::Integer(v) => v.len(),
        }
    }
}

/// A known-cleartext operand (public constants, folded weights).
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct PlainValue {
    pub data: PlainData,
    pub packing: PackingMode,
    /// Real-to-ring scale the lanes encode under; 1.0 for integers.
    pub scale: f64,
}

impl PlainValue {
    pub fn reals(values: Vec<f64>, scale: f64, packing: PackingMode) -> Self {
        Self {
            data: PlainData::Real(values),
            packing,
            scale,
        }
    }

    pub fn integers(values: Vec<i64>, packing: PackingMode) -> Self {
        Self {
            data: PlainData::Integer(values),
            packing,
            scale: 1.0,
        }
    }

    pub fn lanes(&self) -> usize {
        self.data.lanes()
    }
}

/// An encrypted operand: a BFV ciphertext plus the metadata needed to
/// interpret and combine it.
///
/// `scale` is the real-to-ring factor the lanes were encoded under; it
/// multiplies across ciphertext products. `level` counts multiplicative
/// depth: every cipher-cipher multiply mod-switches the product one
/// level down and increments it. Kernels may mutate `ct` and `level` in
/// place when aligning operands; see the kernel postconditions.
#[derive(Clone)]
pub struct CipherValue {
    pub ct: Ciphertext,
    pub params: Arc<BfvParameters>,
    pub packing: PackingMode,
    pub scale: f64,
    pub level: usize,
    pub lanes: usize,
}

impl std::fmt::Debug for CipherValue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CipherValue")
            .field("packing", &self.packing)
            .field("scale", &self.scale)
            .field("level", &self.level)
            .field("lanes", &self.lanes)
            .finish_non_exhaustive()
    }
}

/// A value on the linear path: exactly one of ciphertext or cleartext.
///
/// Every arithmetic dispatch site matches exhaustively on this enum;
/// there is no unchecked kind anywhere downstream.
#[derive(Clone, Debug)]
pub enum HeValue {
    Cipher(CipherValue),
    Plain(PlainValue),
}

impl HeValue {
    pub fn is_cipher(&self) -> bool {
        matches!(self, HeValue::Cipher(_))
    }

    pub fn lanes(&self) -> usize {
        match self {
            HeValue::Cipher(c) => c.lanes,
            HeValue::Plain(p) => p.lanes(),
        }
    }

    pub fn packing(&self) -> PackingMode {
        match self {
            HeValue::Cipher(c) => c.packing,
            HeValue::Plain(p) => p.packing,
        }
    }
}
