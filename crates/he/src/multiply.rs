// SPDX-License-Identifier: LGPL-3.0-only
//
// This file is provided WITHOUT ANY WARRANTY;
// without even the implied warranty of MERCHANTABILITY
// or FITNESS FOR A PARTICULAR PURPOSE.

//! Multiply kernels for the linear operator path.
//!
//! Four forms, dispatched on the runtime kind of each operand:
//! cipher×cipher, cipher×plain, plain×plain, and the batched
//! element-wise form over two equal-length sequences. Shape, packing,
//! element-kind and context violations abort before any product is
//! formed.

use tracing::debug;

use crate::codec;
use crate::errors::HeError;
use crate::value::{CipherValue, HeValue, PackingMode, PlainData, PlainValue};
use crate::HeBackend;

fn check_packing(a: PackingMode, b: PackingMode) -> Result<(), HeError> {
    if a != b {
        return Err(HeError::PackingMismatch);
    }
    Ok(())
}

fn check_lanes(left: usize, right: usize) -> Result<(), HeError> {
    if left != right {
        return Err(HeError::ShapeMismatch { left, right });
    }
    Ok(())
}

/// Multiplies two ciphertexts.
///
/// Both operands may be mutated: if their levels differ, the shallower
/// one is mod-switched down in place until they match. Postcondition:
/// `a.level == b.level` and the result sits one level deeper with
/// `scale = a.scale * b.scale`.
pub fn multiply_cipher_cipher(
    a: &mut CipherValue,
    b: &mut CipherValue,
    backend: &HeBackend,
) -> Result<CipherValue, HeError> {
    if !backend.same_context(&a.params) || !backend.same_context(&b.params) {
        return Err(HeError::ContextMismatch);
    }
    check_packing(a.packing, b.packing)?;
    check_lanes(a.lanes, b.lanes)?;

    // Align multiplicative depth before multiplying; observable side
    // effect on whichever operand was shallower.
    while a.level < b.level {
        a.ct.mod_switch_to_next_level()?;
        a.level += 1;
    }
    while b.level < a.level {
        b.ct.mod_switch_to_next_level()?;
        b.level += 1;
    }

    let multiplier = backend.multiplier()?;
    let ct = multiplier.multiply(&a.ct, &b.ct)?;
    debug!(level = a.level + 1, lanes = a.lanes, "cipher product");

    Ok(CipherValue {
        ct,
        params: a.params.clone(),
        packing: a.packing,
        scale: a.scale * b.scale,
        level: a.level + 1,
        lanes: a.lanes,
    })
}

/// Multiplies a ciphertext by a cleartext value.
///
/// The plaintext is encoded at the ciphertext's level and never
/// mutated; the ciphertext operand is not rescaled by this form.
pub fn multiply_cipher_plain(
    a: &CipherValue,
    b: &PlainValue,
    backend: &HeBackend,
) -> Result<CipherValue, HeError> {
    if !backend.same_context(&a.params) {
        return Err(HeError::ContextMismatch);
    }
    check_packing(a.packing, b.packing)?;
    check_lanes(a.lanes, b.lanes())?;

    let residues = match &b.data {
        PlainData::Real(values) => codec::encode_reals(values, b.scale, backend.modulus())?,
        PlainData::Integer(values) => codec::encode_integers(values, backend.modulus())?,
    };
    let pt = backend.encode_lanes(&residues, b.packing, a.level)?;
    let ct = &a.ct * &pt;

    Ok(CipherValue {
        ct,
        params: a.params.clone(),
        packing: a.packing,
        scale: a.scale * b.scale,
        level: a.level,
        lanes: a.lanes,
    })
}

/// Multiplies two cleartext values element-wise. Pure.
pub fn multiply_plain_plain(a: &PlainValue, b: &PlainValue) -> Result<PlainValue, HeError> {
    check_packing(a.packing, b.packing)?;
    check_lanes(a.lanes(), b.lanes())?;

    let data = match (&a.data, &b.data) {
        (PlainData::Real(x), PlainData::Real(y)) => {
            PlainData::Real(x.iter().zip(y).map(|(u, v)| u * v).collect())
        }
        (PlainData::Integer(x), PlainData::Integer(y)) => {
            PlainData::Integer(x.iter().zip(y).map(|(u, v)| u * v).collect())
        }
        _ => return Err(HeError::ElementKindMismatch),
    };

    Ok(PlainValue {
        data,
        packing: a.packing,
        scale: a.scale * b.scale,
    })
}

/// Batched element-wise multiply over two equal-length sequences.
///
/// The length check runs before any multiplication is attempted; a
/// failing element aborts the whole batch with no partial results.
/// Per-element dispatch follows the runtime kinds: cipher×cipher and
/// cipher×plain produce ciphertexts, plain×plain stays cleartext.
pub fn multiply_batch(
    a: &mut [HeValue],
    b: &mut [HeValue],
    backend: &HeBackend,
) -> Result<Vec<HeValue>, HeError> {
    if a.len() != b.len() {
        return Err(HeError::ShapeMismatch {
            left: a.len(),
            right: b.len(),
        });
    }
    debug!(count = a.len(), "batched multiply");

    a.iter_mut()
        .zip(b.iter_mut())
        .map(|(left, right)| match (left, right) {
            (HeValue::Cipher(x), HeValue::Cipher(y)) => {
                Ok(HeValue::Cipher(multiply_cipher_cipher(x, y, backend)?))
            }
            (HeValue::Cipher(x), HeValue::Plain(y)) => {
                Ok(HeValue::Cipher(multiply_cipher_plain(x, y, backend)?))
            }
            (HeValue::Plain(x), HeValue::Cipher(y)) => {
                Ok(HeValue::Cipher(multiply_cipher_plain(y, x, backend)?))
            }
            (HeValue::Plain(x), HeValue::Plain(y)) => {
                Ok(HeValue::Plain(multiply_plain_plain(x, y)?))
            }
        })
        .collect()
}
