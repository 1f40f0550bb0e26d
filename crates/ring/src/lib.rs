// SPDX-License-Identifier: LGPL-3.0-only
//
// This file is provided WITHOUT ANY WARRANTY;
// without even the implied warranty of MERCHANTABILITY
// or FITNESS FOR A PARTICULAR PURPOSE.

//! Ring arithmetic for secret shares and masked values.
//!
//! Shares and masked inference values live in `Z_q` for a per-session
//! modulus q. This crate provides the modulus type, the signed
//! interpretation of residues (values above q/2 are negative), the
//! diagnostic residue-to-real map, and the zero-centered reduction used
//! when re-encoding real intermediates.

mod errors;
mod modulus;
mod real;

pub use errors::RingError;
pub use modulus::{check_range, Modulus};
pub use real::{ring_to_real, zero_center_reduce};
