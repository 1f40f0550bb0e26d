// SPDX-License-Identifier: LGPL-3.0-only
//
// This file is provided WITHOUT ANY WARRANTY;
// without even the implied warranty of MERCHANTABILITY
// or FITNESS FOR A PARTICULAR PURPOSE.

use std::sync::{Arc, Mutex};

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha20Rng;
use veil_ring::Modulus;
use veil_utils::SharedRng;

pub fn create_shared_rng_from_u64(value: u64) -> SharedRng {
    Arc::new(Mutex::new(ChaCha20Rng::seed_from_u64(value)))
}

/// Uniform residues in [0, q), for share and mask fixtures.
pub fn random_ring_values(rng: &SharedRng, modulus: Modulus, count: usize) -> Vec<u64> {
    let mut rng = rng.lock().unwrap();
    (0..count).map(|_| rng.gen_range(0..modulus.get())).collect()
}

/// Splits known values into additive share pairs: the two outputs sum
/// to the input lane-wise mod q.
pub fn share_values(
    rng: &SharedRng,
    modulus: Modulus,
    values: &[u64],
) -> (Vec<u64>, Vec<u64>) {
    let q = modulus.get();
    let mut rng = rng.lock().unwrap();
    let server: Vec<u64> = (0..values.len()).map(|_| rng.gen_range(0..q)).collect();
    let client: Vec<u64> = values
        .iter()
        .zip(&server)
        .map(|(&v, &s)| ((v as u128 + q as u128 - s as u128) % q as u128) as u64)
        .collect();
    (server, client)
}
