// SPDX-License-Identifier: LGPL-3.0-only
//
// This file is provided WITHOUT ANY WARRANTY;
// without even the implied warranty of MERCHANTABILITY
// or FITNESS FOR A PARTICULAR PURPOSE.

use serde::{Deserialize, Serialize};
use tracing::info;
use veil_ring::{check_range, Modulus};

use crate::engine::SimdEngine;
use crate::errors::CircuitError;
use crate::gadgets::reduce_mod;
use crate::party::Party;

/// Inputs to one masked ReLU batch.
///
/// `server_share` and `output_mask` are committed by the server party,
/// `client_share` by the client party. All three are residues in
/// [0, q); the reconstruction is x = (server_share + client_share)
/// mod q, negative under the zero-centered convention iff x > q/2.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SecureReluRequest {
    pub server_share: Vec<u64>,
    pub client_share: Vec<u64>,
    pub output_mask: Vec<u64>,
    /// Lane width of the circuit; must hold sums up to 2(q-1).
    pub bit_width: u32,
    pub modulus: Modulus,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SecureReluResponse {
    /// (relu(x) + output_mask) mod q, revealed to the client only.
    pub masked: Vec<u64>,
}

impl SecureReluRequest {
    /// Validates shape, lane width and ranges before any gate exists.
    ///
    /// Out-of-range shares corrupt the protocol's correctness, not just
    /// its precision, so every violation here is fatal.
    pub fn validate(&self) -> Result<(), CircuitError> {
        let lanes = self.server_share.len();
        for seq in [&self.client_share, &self.output_mask] {
            if seq.len() != lanes {
                return Err(CircuitError::ShapeMismatch {
                    left: lanes,
                    right: seq.len(),
                });
            }
        }

        if self.bit_width == 0 || self.bit_width > 64 {
            return Err(CircuitError::UnsupportedBitWidth {
                bit_width: self.bit_width,
            });
        }
        let max_sum = 2u128 * (self.modulus.get() as u128 - 1);
        let required = (128 - max_sum.leading_zeros()).max(1);
        if self.bit_width < required {
            return Err(CircuitError::InsufficientBitWidth {
                bit_width: self.bit_width,
                required,
            });
        }

        for (input, seq) in [
            ("server share", &self.server_share),
            ("client share", &self.client_share),
            ("output mask", &self.output_mask),
        ] {
            check_range(seq, self.modulus)
                .map_err(|source| CircuitError::ShareOutOfRange { input, source })?;
        }
        Ok(())
    }

    pub fn lanes(&self) -> usize {
        self.server_share.len()
    }
}

/// Builds the masked-ReLU gate sequence and returns the result wire.
///
/// One SIMD circuit over all lanes: reconstruct, sign-test against q/2,
/// oblivious select of zero or the value, re-mask, reduce. Nothing in
/// the gate structure depends on the lane values.
pub fn build_masked_relu<E: SimdEngine>(
    circ: &mut E,
    req: &SecureReluRequest,
) -> Result<E::Wire, CircuitError> {
    let lanes = req.lanes();
    let bit_width = req.bit_width;
    let q = req.modulus.get();

    let xs = circ.simd_input(Party::Server, bit_width, &req.server_share)?;
    let xc = circ.simd_input(Party::Client, bit_width, &req.client_share)?;
    let mask = circ.simd_input(Party::Server, bit_width, &req.output_mask)?;

    let q_wire = circ.simd_constant(bit_width, lanes, q)?;
    let zero = circ.simd_constant(bit_width, lanes, 0)?;
    let half_q = circ.simd_constant(bit_width, lanes, req.modulus.half())?;

    // Reconstruct x = (xs + xc) mod q
    let x = circ.add(&xs, &xc)?;
    let x = reduce_mod(circ, x, &q_wire)?;

    // x > q/2 means the value is negative: select zero there, x
    // elsewhere. Both arms are in the circuit; only the select chooses.
    let negative = circ.gt(&x, &half_q)?;
    let x = circ.mux(&zero, &x, &negative)?;

    // Additively mask the output
    let x = circ.add(&x, &mask)?;
    reduce_mod(circ, x, &q_wire)
}

/// Evaluates one masked-ReLU batch and releases the result to the
/// client party.
///
/// The server party learns nothing: the only value leaving the circuit
/// is the additively masked output, revealed to the client alone.
pub fn secure_relu<E: SimdEngine>(
    engine: &mut E,
    req: &SecureReluRequest,
) -> Result<SecureReluResponse, CircuitError> {
    req.validate()?;
    info!(
        lanes = req.lanes(),
        q = req.modulus.get(),
        bit_width = req.bit_width,
        "secure relu"
    );

    let result = build_masked_relu(engine, req)?;
    let output = engine.reveal(&result, Party::Client)?;
    engine.run()?;
    let masked = engine.take_output(output, Party::Client)?;
    Ok(SecureReluResponse { masked })
}

/// Client-side mask removal: (masked - mask) mod q.
///
/// The surrounding protocol transfers the mask back under encryption;
/// this is the numeric contract both sides rely on.
pub fn unmask(masked: &[u64], mask: &[u64], modulus: Modulus) -> Result<Vec<u64>, CircuitError> {
    if masked.len() != mask.len() {
        return Err(CircuitError::ShapeMismatch {
            left: masked.len(),
            right: mask.len(),
        });
    }
    check_range(masked, modulus).map_err(|source| CircuitError::ShareOutOfRange {
        input: "masked output",
        source,
    })?;
    check_range(mask, modulus).map_err(|source| CircuitError::ShareOutOfRange {
        input: "output mask",
        source,
    })?;

    let q = modulus.get() as u128;
    Ok(masked
        .iter()
        .zip(mask)
        .map(|(&m, &r)| ((m as u128 + q - r as u128) % q) as u64)
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clear::ClearEngine;
    use veil_ring::RingError;

    fn request(xs: Vec<u64>, xc: Vec<u64>, mask: Vec<u64>, q: u64) -> SecureReluRequest {
        SecureReluRequest {
            server_share: xs,
            client_share: xc,
            output_mask: mask,
            bit_width: 64,
            modulus: Modulus::new(q).unwrap(),
        }
    }

    #[test]
    fn positive_values_pass_through_after_unmasking() {
        // x = (30 + 10) mod 100 = 40 <= 50, so relu(x) = 40.
        let req = request(vec![30], vec![10], vec![77], 100);
        let mut circ = ClearEngine::new();
        let response = secure_relu(&mut circ, &req).unwrap();
        let clear = unmask(&response.masked, &req.output_mask, req.modulus).unwrap();
        assert_eq!(clear, vec![40]);
    }

    #[test]
    fn negative_values_collapse_to_zero() {
        // x = (70 + 10) mod 100 = 80 > 50: negative, so relu(x) = 0.
        let req = request(vec![70], vec![10], vec![23], 100);
        let mut circ = ClearEngine::new();
        let response = secure_relu(&mut circ, &req).unwrap();
        let clear = unmask(&response.masked, &req.output_mask, req.modulus).unwrap();
        assert_eq!(clear, vec![0]);
    }

    #[test]
    fn reconstruction_wraps_through_the_modulus() {
        // x = (90 + 30) mod 100 = 20: positive despite the wrap.
        let req = request(vec![90], vec![30], vec![99], 100);
        let mut circ = ClearEngine::new();
        let response = secure_relu(&mut circ, &req).unwrap();
        let clear = unmask(&response.masked, &req.output_mask, req.modulus).unwrap();
        assert_eq!(clear, vec![20]);
    }

    #[test]
    fn all_lanes_evaluate_in_one_circuit() {
        let req = request(
            vec![30, 70, 90, 0, 50],
            vec![10, 10, 30, 0, 0],
            vec![5, 6, 7, 8, 9],
            100,
        );
        let mut circ = ClearEngine::new();
        let response = secure_relu(&mut circ, &req).unwrap();
        assert_eq!(response.masked.len(), 5);
        let clear = unmask(&response.masked, &req.output_mask, req.modulus).unwrap();
        // x: 40, 80, 20, 0, 50 -> relu: 40, 0, 20, 0, 50 (50 == q/2 stays).
        assert_eq!(clear, vec![40, 0, 20, 0, 50]);
    }

    #[test]
    fn shape_mismatch_is_fatal_before_any_gate() {
        let req = request(vec![1, 2], vec![3], vec![4, 5], 100);
        assert_eq!(
            req.validate(),
            Err(CircuitError::ShapeMismatch { left: 2, right: 1 })
        );
    }

    #[test]
    fn out_of_range_share_is_fatal() {
        let req = request(vec![100], vec![0], vec![0], 100);
        assert_eq!(
            req.validate(),
            Err(CircuitError::ShareOutOfRange {
                input: "server share",
                source: RingError::OutOfRange {
                    index: 0,
                    value: 100,
                    modulus: 100
                }
            })
        );
    }

    #[test]
    fn narrow_lanes_are_rejected() {
        // 2(q-1) = 198 needs 8 bits.
        let mut req = request(vec![1], vec![2], vec![3], 100);
        req.bit_width = 7;
        assert_eq!(
            req.validate(),
            Err(CircuitError::InsufficientBitWidth {
                bit_width: 7,
                required: 8
            })
        );
        req.bit_width = 8;
        assert!(req.validate().is_ok());
    }

    #[test]
    fn snug_bit_width_still_computes_correctly() {
        let mut req = request(vec![70, 30], vec![10, 10], vec![50, 60], 100);
        req.bit_width = 8;
        let mut circ = ClearEngine::new();
        let response = secure_relu(&mut circ, &req).unwrap();
        let clear = unmask(&response.masked, &req.output_mask, req.modulus).unwrap();
        assert_eq!(clear, vec![0, 40]);
    }

    #[test]
    fn server_cannot_take_the_output() {
        let req = request(vec![30], vec![10], vec![0], 100);
        let mut circ = ClearEngine::new();
        let wire = build_masked_relu(&mut circ, &req).unwrap();
        let output = circ.reveal(&wire, Party::Client).unwrap();
        circ.run().unwrap();
        assert_eq!(
            circ.take_output(output, Party::Server),
            Err(CircuitError::NotRevealedTo {
                party: Party::Server
            })
        );
    }

    #[test]
    fn requests_survive_wire_framing() {
        let req = request(vec![1, 2], vec![3, 4], vec![5, 6], 100);
        let bytes = bincode::serialize(&req).unwrap();
        let back: SecureReluRequest = bincode::deserialize(&bytes).unwrap();
        assert_eq!(back, req);
    }
}
