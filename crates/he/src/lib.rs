// SPDX-License-Identifier: LGPL-3.0-only
//
// This file is provided WITHOUT ANY WARRANTY;
// without even the implied warranty of MERCHANTABILITY
// or FITNESS FOR A PARTICULAR PURPOSE.

//! Homomorphic value wrapper and ciphertext arithmetic.
//!
//! Tensor values on the linear path travel as [`HeValue`]: either a BFV
//! ciphertext or a cleartext lane vector, tagged with its packing mode
//! and real-to-ring scale. The multiply kernels dispatch exhaustively on
//! the cipher/plain kinds, and the envelope module frames values for the
//! wire with an explicit plaintext/ciphertext discriminator.

mod backend;
mod codec;
mod envelope;
mod errors;
mod multiply;
mod value;

pub use backend::{build_params, params, HeBackend};
pub use codec::{decode_integers, decode_reals, encode_integers, encode_reals};
pub use envelope::{
    ciphertext_size, load_cipher, load_plain, save_cipher, save_plain, ValueEnvelope,
};
pub use errors::HeError;
pub use multiply::{
    multiply_batch, multiply_cipher_cipher, multiply_cipher_plain, multiply_plain_plain,
};
pub use value::{CipherValue, HeValue, PackingMode, PlainData, PlainValue};
