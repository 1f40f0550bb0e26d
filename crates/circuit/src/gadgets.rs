// SPDX-License-Identifier: LGPL-3.0-only
//
// This file is provided WITHOUT ANY WARRANTY;
// without even the implied warranty of MERCHANTABILITY
// or FITNESS FOR A PARTICULAR PURPOSE.

use crate::engine::SimdEngine;
use crate::errors::CircuitError;

/// Conditional subtraction inside the circuit: x - q where x >= q,
/// else x.
///
/// Built as a comparison feeding a select. Both arms exist in the
/// circuit unconditionally; there is no branch on secret data, so
/// neither timing nor circuit structure depends on the lane values.
pub fn reduce_mod<E: SimdEngine>(
    circ: &mut E,
    x: E::Wire,
    modulus: &E::Wire,
) -> Result<E::Wire, CircuitError> {
    let below = circ.gt(modulus, &x)?;
    let reduced = circ.sub(&x, modulus)?;
    circ.mux(&x, &reduced, &below)
}
