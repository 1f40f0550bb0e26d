// SPDX-License-Identifier: LGPL-3.0-only
//
// This file is provided WITHOUT ANY WARRANTY;
// without even the implied warranty of MERCHANTABILITY
// or FITNESS FOR A PARTICULAR PURPOSE.

//! Error type for batch dispatch.

use thiserror::Error;
use veil_circuit::CircuitError;
use veil_he::HeError;
use veil_utils::PartitionError;

/// Failures surfaced by the batch API.
///
/// Dispatch never retries: none of these are transient, and the
/// backend owns the decision to re-run a whole inference request.
#[derive(Debug, Error)]
pub enum DispatchError {
    #[error("Failed to build worker pool: {0}")]
    Pool(#[from] rayon::ThreadPoolBuildError),

    #[error(transparent)]
    Partition(#[from] PartitionError),

    #[error(transparent)]
    He(#[from] HeError),

    #[error(transparent)]
    Circuit(#[from] CircuitError),
}
