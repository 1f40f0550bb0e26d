// SPDX-License-Identifier: LGPL-3.0-only
//
// This file is provided WITHOUT ANY WARRANTY;
// without even the implied warranty of MERCHANTABILITY
// or FITNESS FOR A PARTICULAR PURPOSE.

//! Error types for ring-domain checks.

use thiserror::Error;

/// Errors that can occur validating or reducing ring values.
#[derive(Debug, Error, PartialEq)]
pub enum RingError {
    /// The session modulus must be nonzero
    #[error("Modulus must be nonzero")]
    ZeroModulus,

    /// The real-side modulus must be non-negative
    #[error("Modulus must be non-negative, got {q}")]
    NegativeModulus { q: f64 },

    /// A value escaped the ring
    #[error("Value {value} at index {index} is outside [0, {modulus})")]
    OutOfRange {
        index: usize,
        value: u64,
        modulus: u64,
    },

    /// Zero-centered reduction failed to land inside [-q/2, q/2]
    #[error("Reduced value {value} is outside [-{modulus}/2, {modulus}/2]")]
    ReductionOutOfBounds { value: f64, modulus: f64 },
}
