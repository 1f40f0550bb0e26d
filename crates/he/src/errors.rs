// SPDX-License-Identifier: LGPL-3.0-only
//
// This file is provided WITHOUT ANY WARRANTY;
// without even the implied warranty of MERCHANTABILITY
// or FITNESS FOR A PARTICULAR PURPOSE.

//! Error types for homomorphic value handling.

use thiserror::Error;
use veil_ring::RingError;

/// Errors from the wrapper, codec, kernels and envelope.
///
/// Everything here is fatal to the current operator invocation: these
/// conditions indicate misuse or corrupted input, never transient state,
/// so no kernel retries internally.
#[derive(Debug, Error)]
pub enum HeError {
    /// Paired batch inputs of different lengths
    #[error("Input sequences have different lengths ({left} vs {right})")]
    ShapeMismatch { left: usize, right: usize },

    /// Operands laid out under different packing modes
    #[error("Operands use incompatible packing modes")]
    PackingMismatch,

    /// Real and integer lanes mixed in one multiply
    #[error("Operand element kinds differ (integer vs real)")]
    ElementKindMismatch,

    /// Operands from different encryption parameter sets
    #[error("Operands belong to different encryption contexts")]
    ContextMismatch,

    /// Cipher-cipher multiplication needs the backend's relinearization key
    #[error("No relinearization key configured for ciphertext multiplication")]
    MissingRelinKey,

    /// Serialized size disagrees with the computed ciphertext size
    #[error("Serialized ciphertext is {actual} bytes, expected {expected}")]
    SizeMismatch { expected: usize, actual: usize },

    /// Envelope discriminator contradicts the requested payload kind
    #[error("Envelope discriminator does not match the payload kind")]
    KindMismatch,

    /// A scaled value does not fit the signed window of the plaintext ring
    #[error("Encoded magnitude of {value} does not fit the plaintext ring")]
    EncodingOverflow { value: f64 },

    /// More lanes than the parameter set has slots
    #[error("Value carries {lanes} lanes but the parameter set offers {slots} slots")]
    CapacityExceeded { lanes: usize, slots: usize },

    #[error("Scheme error: {0}")]
    Scheme(#[from] fhe::Error),

    #[error("Envelope codec error: {0}")]
    Codec(#[from] Box<bincode::ErrorKind>),

    #[error(transparent)]
    Ring(#[from] RingError),
}
