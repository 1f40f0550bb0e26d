// SPDX-License-Identifier: LGPL-3.0-only
//
// This file is provided WITHOUT ANY WARRANTY;
// without even the implied warranty of MERCHANTABILITY
// or FITNESS FOR A PARTICULAR PURPOSE.

use std::sync::Arc;

use fhe::bfv::{
    BfvParameters, BfvParametersBuilder, Encoding, Multiplicator, Plaintext, PublicKey,
    RelinearizationKey, SecretKey,
};
use fhe_traits::{FheDecoder, FheDecrypter, FheEncoder, FheEncrypter};
use veil_ring::Modulus;
use veil_utils::SharedRng;

use crate::codec;
use crate::errors::HeError;
use crate::value::{CipherValue, PackingMode};

/// Standard parameter sets, as (degree, plaintext_modulus, moduli).
pub mod params {
    /// 2048 slots, SIMD-capable plaintext modulus, one 54-bit modulus.
    /// Enough for depth-0 work: cipher-plain products and transport.
    pub const SET_2048_1032193_1: (usize, u64, [u64; 1]) = (2048, 1_032_193, [0x3FFFFFFF000001]);

    /// 8192 slots, three 53-bit moduli: leaves headroom for the level
    /// drop of relinearized cipher-cipher products.
    pub const SET_8192_1032193_3: (usize, u64, [u64; 3]) = (
        8192,
        1_032_193,
        [0x1FFFFFFEA0001, 0x1FFFFFFE88001, 0x1FFFFFFE48001],
    );
}

/// Scheme adaptor: the injectable handle every kernel takes explicitly.
///
/// Carries the parameter set, the relinearizing multiplier (when a
/// relinearization key was provided) and the session RNG. There is no
/// global fallback; two backends never share state unless their parts
/// were cloned from the same handles.
#[derive(Clone)]
pub struct HeBackend {
    params: Arc<BfvParameters>,
    multiplier: Option<Arc<Multiplicator>>,
    rng: SharedRng,
}

impl HeBackend {
    pub fn new(params: Arc<BfvParameters>, rng: SharedRng) -> Self {
        Self {
            params,
            multiplier: None,
            rng,
        }
    }

    /// Backend able to multiply ciphertexts: the relinearization key is
    /// folded into a multiplier that relinearizes and mod-switches every
    /// product one level down.
    pub fn with_relin_key(
        params: Arc<BfvParameters>,
        rk: &RelinearizationKey,
        rng: SharedRng,
    ) -> Result<Self, HeError> {
        let mut multiplier = Multiplicator::default(rk)?;
        multiplier.enable_mod_switching()?;
        Ok(Self {
            params,
            multiplier: Some(Arc::new(multiplier)),
            rng,
        })
    }

    pub fn params(&self) -> &Arc<BfvParameters> {
        &self.params
    }

    pub fn slots(&self) -> usize {
        self.params.degree()
    }

    /// The plaintext modulus as the session ring modulus.
    pub fn modulus(&self) -> Modulus {
        // Parameter construction already rejects a zero plaintext modulus.
        Modulus::new(self.params.plaintext()).expect("nonzero plaintext modulus")
    }

    pub fn rng(&self) -> &SharedRng {
        &self.rng
    }

    pub(crate) fn multiplier(&self) -> Result<&Multiplicator, HeError> {
        self.multiplier.as_deref().ok_or(HeError::MissingRelinKey)
    }

    pub(crate) fn same_context(&self, other: &Arc<BfvParameters>) -> bool {
        Arc::ptr_eq(&self.params, other)
            || (self.params.degree() == other.degree()
                && self.params.plaintext() == other.plaintext()
                && self.params.moduli() == other.moduli())
    }

    /// Encodes lane residues at the ciphertext's level and packing.
    pub(crate) fn encode_lanes(
        &self,
        lanes: &[u64],
        packing: PackingMode,
        level: usize,
    ) -> Result<Plaintext, HeError> {
        let slots = codec::layout(lanes, self.slots(), packing)?;
        let pt = Plaintext::try_encode(&slots, Encoding::simd_at_level(level), &self.params)?;
        Ok(pt)
    }

    /// Encrypts real lanes at the given scale.
    pub fn encrypt_reals(
        &self,
        pk: &PublicKey,
        values: &[f64],
        scale: f64,
        packing: PackingMode,
    ) -> Result<CipherValue, HeError> {
        let residues = codec::encode_reals(values, scale, self.modulus())?;
        let pt = self.encode_lanes(&residues, packing, 0)?;
        let ct = pk.try_encrypt(&pt, &mut *self.rng.lock().unwrap())?;
        Ok(CipherValue {
            ct,
            params: self.params.clone(),
            packing,
            scale,
            level: 0,
            lanes: values.len(),
        })
    }

    pub fn encrypt_integers(
        &self,
        pk: &PublicKey,
        values: &[i64],
        packing: PackingMode,
    ) -> Result<CipherValue, HeError> {
        let residues = codec::encode_integers(values, self.modulus())?;
        let pt = self.encode_lanes(&residues, packing, 0)?;
        let ct = pk.try_encrypt(&pt, &mut *self.rng.lock().unwrap())?;
        Ok(CipherValue {
            ct,
            params: self.params.clone(),
            packing,
            scale: 1.0,
            level: 0,
            lanes: values.len(),
        })
    }

    /// Decrypts and decodes real lanes at the value's recorded scale.
    pub fn decrypt_reals(&self, sk: &SecretKey, value: &CipherValue) -> Result<Vec<f64>, HeError> {
        let pt = sk.try_decrypt(&value.ct)?;
        let slots = Vec::<u64>::try_decode(&pt, Encoding::simd_at_level(value.level))?;
        let residues = codec::unlayout(&slots, value.lanes, value.packing);
        Ok(codec::decode_reals(&residues, value.scale, self.modulus()))
    }

    pub fn decrypt_integers(
        &self,
        sk: &SecretKey,
        value: &CipherValue,
    ) -> Result<Vec<i64>, HeError> {
        let pt = sk.try_decrypt(&value.ct)?;
        let slots = Vec::<u64>::try_decode(&pt, Encoding::simd_at_level(value.level))?;
        let residues = codec::unlayout(&slots, value.lanes, value.packing);
        Ok(codec::decode_integers(&residues, self.modulus()))
    }
}

/// Builds BFV parameters for a (degree, plaintext_modulus, moduli) set.
pub fn build_params(
    degree: usize,
    plaintext_modulus: u64,
    moduli: &[u64],
) -> Result<Arc<BfvParameters>, HeError> {
    let params = BfvParametersBuilder::new()
        .set_degree(degree)
        .set_plaintext_modulus(plaintext_modulus)
        .set_moduli(moduli)
        .build_arc()?;
    Ok(params)
}
