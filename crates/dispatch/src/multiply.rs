// SPDX-License-Identifier: LGPL-3.0-only
//
// This file is provided WITHOUT ANY WARRANTY;
// without even the implied warranty of MERCHANTABILITY
// or FITNESS FOR A PARTICULAR PURPOSE.

use rayon::prelude::*;
use tracing::debug;
use veil_he::{multiply_batch, HeBackend, HeError, HeValue};
use veil_utils::split_range;

use crate::errors::DispatchError;
use crate::pool::DispatchPool;

/// Element-wise multiply over two equal-length value sequences.
///
/// The batch is split into contiguous partitions, one per worker, and
/// each partition multiplies independently; per-element kind dispatch
/// happens inside [`multiply_batch`]. Operands are taken by value:
/// cipher-cipher elements may be rescaled while aligning levels, and
/// the caller's tensors are replaced by the returned products anyway.
pub fn multiply(
    pool: &DispatchPool,
    mut a: Vec<HeValue>,
    mut b: Vec<HeValue>,
    backend: &HeBackend,
) -> Result<Vec<HeValue>, DispatchError> {
    if a.len() != b.len() {
        return Err(HeError::ShapeMismatch {
            left: a.len(),
            right: b.len(),
        }
        .into());
    }

    let total = a.len();
    let splits = split_range(total, pool.threads().max(1))?;
    debug!(total, partitions = splits.len(), "dispatching multiply");

    // Carve both batches into disjoint mutable sub-slices, one pair
    // per partition.
    let mut jobs: Vec<(&mut [HeValue], &mut [HeValue])> = Vec::with_capacity(splits.len());
    let mut rest_a = a.as_mut_slice();
    let mut rest_b = b.as_mut_slice();
    for range in &splits {
        let len = range.len();
        let (head_a, tail_a) = std::mem::take(&mut rest_a).split_at_mut(len);
        let (head_b, tail_b) = std::mem::take(&mut rest_b).split_at_mut(len);
        rest_a = tail_a;
        rest_b = tail_b;
        jobs.push((head_a, head_b));
    }

    let partials: Vec<Result<Vec<HeValue>, HeError>> = pool.install(|| {
        jobs.into_par_iter()
            .map(|(chunk_a, chunk_b)| multiply_batch(chunk_a, chunk_b, backend))
            .collect()
    });

    let mut products = Vec::with_capacity(total);
    for partial in partials {
        products.extend(partial?);
    }
    Ok(products)
}
