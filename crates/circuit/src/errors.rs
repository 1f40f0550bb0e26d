// SPDX-License-Identifier: LGPL-3.0-only
//
// This file is provided WITHOUT ANY WARRANTY;
// without even the implied warranty of MERCHANTABILITY
// or FITNESS FOR A PARTICULAR PURPOSE.

//! Error types for circuit construction and evaluation.

use thiserror::Error;
use veil_ring::RingError;

use crate::party::Party;

/// Errors from circuit construction, evaluation and output release.
///
/// All of these abort the operator invocation; a partially evaluated
/// circuit is never resumed or inspected.
#[derive(Debug, Error, PartialEq)]
pub enum CircuitError {
    /// Paired share sequences of different lengths
    #[error("Input sequences have different lengths ({left} vs {right})")]
    ShapeMismatch { left: usize, right: usize },

    /// A share or mask escaped the ring before circuit construction
    #[error("{input}: {source}")]
    ShareOutOfRange {
        input: &'static str,
        source: RingError,
    },

    /// The lane width cannot hold a reconstruction sum
    #[error("Bit width {bit_width} cannot represent sums up to 2(q-1), need {required} bits")]
    InsufficientBitWidth { bit_width: u32, required: u32 },

    /// Lane widths above the native word are unsupported
    #[error("Bit width {bit_width} exceeds the 64-bit lane limit")]
    UnsupportedBitWidth { bit_width: u32 },

    /// A wire did not come from this circuit
    #[error("Gate references a wire that is not part of this circuit")]
    ForeignWire,

    /// SIMD operands with different lane counts
    #[error("Gate operands have different lane counts ({left} vs {right})")]
    LaneMismatch { left: usize, right: usize },

    /// SIMD operands with different lane widths
    #[error("Gate operands have different bit widths ({left} vs {right})")]
    WidthMismatch { left: u32, right: u32 },

    /// Gates cannot be appended and evaluation cannot be repeated
    #[error("Circuit was already evaluated")]
    AlreadyEvaluated,

    /// Outputs exist only after evaluation
    #[error("Circuit has not been evaluated")]
    NotEvaluated,

    /// Output asymmetry: only the named party may take a revealed value
    #[error("Output was not revealed to {party:?}")]
    NotRevealedTo { party: Party },

    /// Outputs are released exactly once
    #[error("Output was already taken")]
    OutputConsumed,

    #[error(transparent)]
    Ring(#[from] RingError),
}
