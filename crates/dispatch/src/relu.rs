// SPDX-License-Identifier: LGPL-3.0-only
//
// This file is provided WITHOUT ANY WARRANTY;
// without even the implied warranty of MERCHANTABILITY
// or FITNESS FOR A PARTICULAR PURPOSE.

use rayon::prelude::*;
use tracing::debug;
use veil_circuit::{CircuitError, SecureReluRequest, SimdEngine};
use veil_ring::Modulus;
use veil_utils::split_range;

use crate::errors::DispatchError;
use crate::pool::DispatchPool;

/// Masked ReLU over a whole batch of shares.
///
/// Validation covers the full batch before anything is partitioned.
/// Each partition evaluates its own SIMD circuit on a fresh engine from
/// `engine_factory`, as a pure function of that slice of the shares, and
/// the masked outputs recombine in index order after every partition
/// completes. The per-partition circuits inherit the whole protocol
/// contract: output to the client party only.
pub fn secure_relu<E, F>(
    pool: &DispatchPool,
    server_share: &[u64],
    client_share: &[u64],
    output_mask: &[u64],
    bit_width: u32,
    modulus: Modulus,
    engine_factory: F,
) -> Result<Vec<u64>, DispatchError>
where
    E: SimdEngine,
    F: Fn() -> E + Sync,
{
    let request = SecureReluRequest {
        server_share: server_share.to_vec(),
        client_share: client_share.to_vec(),
        output_mask: output_mask.to_vec(),
        bit_width,
        modulus,
    };
    request.validate()?;

    let total = request.lanes();
    let splits = split_range(total, pool.threads().max(1))?;
    debug!(total, partitions = splits.len(), "dispatching secure relu");

    let partials: Vec<Result<Vec<u64>, CircuitError>> = pool.install(|| {
        splits
            .par_iter()
            .map(|range| {
                // Degenerate partitions of tiny batches carry no lanes
                // and no circuit.
                if range.is_empty() {
                    return Ok(Vec::new());
                }
                let sub = SecureReluRequest {
                    server_share: request.server_share[range.clone()].to_vec(),
                    client_share: request.client_share[range.clone()].to_vec(),
                    output_mask: request.output_mask[range.clone()].to_vec(),
                    bit_width,
                    modulus,
                };
                let mut engine = engine_factory();
                Ok(veil_circuit::secure_relu(&mut engine, &sub)?.masked)
            })
            .collect()
    });

    let mut masked = Vec::with_capacity(total);
    for partial in partials {
        masked.extend(partial?);
    }
    Ok(masked)
}
