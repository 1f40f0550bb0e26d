// SPDX-License-Identifier: LGPL-3.0-only
//
// This file is provided WITHOUT ANY WARRANTY;
// without even the implied warranty of MERCHANTABILITY
// or FITNESS FOR A PARTICULAR PURPOSE.

use crate::errors::CircuitError;
use crate::party::Party;

/// Handle to a revealed circuit output.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct OutputId(pub(crate) usize);

/// The gate set consumed from the two-party evaluation engine.
///
/// Every gate is SIMD: it applies lane-wise across a batch of values in
/// one evaluation pass, with lane values masked to the wire's bit
/// width. Wires are opaque handles owned by the engine that produced
/// them.
///
/// Evaluation is blocking and atomic: [`SimdEngine::run`] returns only
/// once both parties have finished the interactive protocol, and a
/// failed run leaves nothing to resume. Implementations must refuse
/// further gates and outputs after a run, successful or not.
///
/// The only values that leave the engine are those passed through
/// [`SimdEngine::reveal`], and each only to the party it names.
/// Intermediate wires are unobservable by contract; an implementation
/// that exposes them breaks the protocol, not just this interface.
pub trait SimdEngine {
    type Wire: Clone;

    /// Commits a party's private lane values into the circuit.
    ///
    /// In a networked engine only `owner` supplies real values; the
    /// other party contributes placeholder lanes of the same shape.
    fn simd_input(
        &mut self,
        owner: Party,
        bit_width: u32,
        values: &[u64],
    ) -> Result<Self::Wire, CircuitError>;

    /// A public constant replicated across `lanes` lanes.
    fn simd_constant(
        &mut self,
        bit_width: u32,
        lanes: usize,
        value: u64,
    ) -> Result<Self::Wire, CircuitError>;

    fn add(&mut self, a: &Self::Wire, b: &Self::Wire) -> Result<Self::Wire, CircuitError>;

    fn sub(&mut self, a: &Self::Wire, b: &Self::Wire) -> Result<Self::Wire, CircuitError>;

    /// Unsigned lane-wise comparison: 1 where a > b, else 0.
    fn gt(&mut self, a: &Self::Wire, b: &Self::Wire) -> Result<Self::Wire, CircuitError>;

    /// Oblivious lane-wise select: `on_true` where `sel` is 1, else
    /// `on_false`. Both arms are part of the circuit and always
    /// evaluated; only the data-independent select chooses.
    fn mux(
        &mut self,
        on_true: &Self::Wire,
        on_false: &Self::Wire,
        sel: &Self::Wire,
    ) -> Result<Self::Wire, CircuitError>;

    /// Marks a wire for release to exactly one party.
    fn reveal(&mut self, wire: &Self::Wire, to: Party) -> Result<OutputId, CircuitError>;

    /// Evaluates the circuit. Blocking; both parties participate.
    fn run(&mut self) -> Result<(), CircuitError>;

    /// Releases a revealed output to the receiving party, exactly once.
    fn take_output(&mut self, id: OutputId, as_party: Party) -> Result<Vec<u64>, CircuitError>;
}
