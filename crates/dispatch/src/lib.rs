// SPDX-License-Identifier: LGPL-3.0-only
//
// This file is provided WITHOUT ANY WARRANTY;
// without even the implied warranty of MERCHANTABILITY
// or FITNESS FOR A PARTICULAR PURPOSE.

//! Batch dispatch for the tensor backend.
//!
//! The backend hands whole operator batches to this crate; they are
//! partitioned into contiguous sub-ranges and processed on a worker
//! pool. Sub-ranges share no mutable state; each is a pure function of
//! its slice of the inputs, and results recombine in index order once
//! every partition has completed. A failing partition aborts the whole
//! batch; no partial results are returned.

mod errors;
mod multiply;
mod pool;
mod relu;

pub use errors::DispatchError;
pub use multiply::multiply;
pub use pool::DispatchPool;
pub use relu::secure_relu;
