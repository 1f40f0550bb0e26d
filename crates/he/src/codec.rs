// SPDX-License-Identifier: LGPL-3.0-only
//
// This file is provided WITHOUT ANY WARRANTY;
// without even the implied warranty of MERCHANTABILITY
// or FITNESS FOR A PARTICULAR PURPOSE.

//! Real/integer lane codec for the plaintext ring.
//!
//! Lanes are mapped into `Z_t` under the signed convention (residues
//! above t/2 are negative) and laid out into the SIMD slot vector
//! according to the value's packing mode.

use veil_ring::Modulus;

use crate::errors::HeError;
use crate::value::PackingMode;

/// Encodes real lanes as ring residues at the given scale.
///
/// The scaled magnitude must fit the signed window of the ring; a lane
/// that would wrap is rejected rather than silently aliased.
pub fn encode_reals(values: &[f64], scale: f64, modulus: Modulus) -> Result<Vec<u64>, HeError> {
    let hi = modulus.half() as f64;
    let lo = -((modulus.get() - 1 - modulus.half()) as f64);
    values
        .iter()
        .map(|&v| {
            let scaled = (v * scale).round();
            if !scaled.is_finite() || scaled > hi || scaled < lo {
                return Err(HeError::EncodingOverflow { value: v });
            }
            Ok(modulus.from_signed(scaled as i64))
        })
        .collect()
}

/// Inverse of [`encode_reals`].
pub fn decode_reals(residues: &[u64], scale: f64, modulus: Modulus) -> Vec<f64> {
    residues
        .iter()
        .map(|&r| modulus.to_signed(r) as f64 / scale)
        .collect()
}

pub fn encode_integers(values: &[i64], modulus: Modulus) -> Result<Vec<u64>, HeError> {
    let hi = modulus.half() as i64;
    let lo = -((modulus.get() - 1 - modulus.half()) as i64);
    values
        .iter()
        .map(|&v| {
            if v > hi || v < lo {
                return Err(HeError::EncodingOverflow { value: v as f64 });
            }
            Ok(modulus.from_signed(v))
        })
        .collect()
}

pub fn decode_integers(residues: &[u64], modulus: Modulus) -> Vec<i64> {
    residues.iter().map(|&r| modulus.to_signed(r)).collect()
}

/// Places lane residues into a degree-length slot vector.
pub(crate) fn layout(
    lanes: &[u64],
    degree: usize,
    packing: PackingMode,
) -> Result<Vec<u64>, HeError> {
    let capacity = match packing {
        PackingMode::Flat => degree,
        PackingMode::Paired => degree, // two lanes per column, degree/2 columns
    };
    if lanes.len() > capacity {
        return Err(HeError::CapacityExceeded {
            lanes: lanes.len(),
            slots: capacity,
        });
    }

    let mut slots = vec![0u64; degree];
    match packing {
        PackingMode::Flat => slots[..lanes.len()].copy_from_slice(lanes),
        PackingMode::Paired => {
            let half = degree / 2;
            for (i, &v) in lanes.iter().enumerate() {
                let column = i / 2;
                if i % 2 == 0 {
                    slots[column] = v;
                } else {
                    slots[half + column] = v;
                }
            }
        }
    }
    Ok(slots)
}

/// Inverse of [`layout`]: recovers `lanes` values from a slot vector.
pub(crate) fn unlayout(slots: &[u64], lanes: usize, packing: PackingMode) -> Vec<u64> {
    match packing {
        PackingMode::Flat => slots[..lanes].to_vec(),
        PackingMode::Paired => {
            let half = slots.len() / 2;
            (0..lanes)
                .map(|i| {
                    let column = i / 2;
                    if i % 2 == 0 {
                        slots[column]
                    } else {
                        slots[half + column]
                    }
                })
                .collect()
        }
    }
}
