// SPDX-License-Identifier: LGPL-3.0-only
//
// This file is provided WITHOUT ANY WARRANTY;
// without even the implied warranty of MERCHANTABILITY
// or FITNESS FOR A PARTICULAR PURPOSE.

use serde::{Deserialize, Serialize};

use crate::errors::RingError;

/// The ring modulus q for a computation session.
///
/// Shares, masks and masked outputs are residues in [0, q). q is fixed
/// for the lifetime of a session; on the homomorphic path it coincides
/// with the scheme's plaintext modulus.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Modulus(u64);

impl Modulus {
    pub fn new(q: u64) -> Result<Self, RingError> {
        if q == 0 {
            return Err(RingError::ZeroModulus);
        }
        Ok(Self(q))
    }

    pub fn get(&self) -> u64 {
        self.0
    }

    /// q/2, the boundary of the signed interpretation.
    pub fn half(&self) -> u64 {
        self.0 / 2
    }

    /// Minimum bit width that can represent every residue in [0, q).
    pub fn bits(&self) -> u32 {
        64 - (self.0 - 1).leading_zeros()
    }

    pub fn contains(&self, value: u64) -> bool {
        value < self.0
    }

    pub fn reduce(&self, value: u64) -> u64 {
        value % self.0
    }

    /// Signed interpretation: residues in [0, q/2] are non-negative,
    /// residues in (q/2, q) represent value - q.
    pub fn to_signed(&self, value: u64) -> i64 {
        if value > self.half() {
            -((self.0 - value) as i64)
        } else {
            value as i64
        }
    }

    /// Inverse of [`Modulus::to_signed`] for magnitudes below q.
    pub fn from_signed(&self, value: i64) -> u64 {
        if value < 0 {
            let m = value.unsigned_abs() % self.0;
            if m == 0 {
                0
            } else {
                self.0 - m
            }
        } else {
            value as u64 % self.0
        }
    }
}

/// Checks that every value lies in [0, q).
///
/// Protocol entry points call this eagerly: an out-of-range share
/// corrupts correctness, not just precision, so the first violation
/// aborts with its index and value.
pub fn check_range(values: &[u64], modulus: Modulus) -> Result<(), RingError> {
    for (index, &value) in values.iter().enumerate() {
        if !modulus.contains(value) {
            return Err(RingError::OutOfRange {
                index,
                value,
                modulus: modulus.get(),
            });
        }
    }
    Ok(())
}
