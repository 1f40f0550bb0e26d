// SPDX-License-Identifier: LGPL-3.0-only
//
// This file is provided WITHOUT ANY WARRANTY;
// without even the implied warranty of MERCHANTABILITY
// or FITNESS FOR A PARTICULAR PURPOSE.

//! Secure two-party circuit layer for the non-linear operator.
//!
//! The rectified linear unit cannot be evaluated under encryption
//! alone, so it runs as a boolean circuit between the two parties: the
//! circuit reconstructs the secret-shared value, performs the sign test
//! against q/2, selects zero or the value obliviously, re-masks with a
//! fresh server-supplied mask and reveals the result to the client
//! only. The gate set is consumed through the [`SimdEngine`] trait; a
//! networked garbled-circuit runtime implements it in production, and
//! [`ClearEngine`] implements it in the clear for tests and
//! single-process runs.

mod clear;
mod engine;
mod errors;
mod gadgets;
mod party;
mod secure_relu;

pub use clear::ClearEngine;
pub use engine::{OutputId, SimdEngine};
pub use errors::CircuitError;
pub use gadgets::reduce_mod;
pub use party::Party;
pub use secure_relu::{
    build_masked_relu, secure_relu, unmask, SecureReluRequest, SecureReluResponse,
};
