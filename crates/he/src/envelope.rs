// SPDX-License-Identifier: LGPL-3.0-only
//
// This file is provided WITHOUT ANY WARRANTY;
// without even the implied warranty of MERCHANTABILITY
// or FITNESS FOR A PARTICULAR PURPOSE.

//! Wire envelope for homomorphic values.
//!
//! A value travels as a discriminator bit plus a byte payload: the
//! scheme's own byte stream for ciphertexts, bincode for cleartext
//! lanes. The discriminator must agree with the payload kind on both
//! save and load; a disagreement is a type error, never a coercion.

use fhe::bfv::Ciphertext;
use fhe_traits::{DeserializeParametrized, Serialize as FheSerialize};
use serde::{Deserialize, Serialize};
use veil_utils::ArcBytes;

use crate::errors::HeError;
use crate::value::{CipherValue, PackingMode, PlainData, PlainValue};
use crate::HeBackend;

/// Serialized value plus the metadata needed to reinterpret it.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ValueEnvelope {
    pub is_plaintext: bool,
    pub payload: ArcBytes,
    pub packing: PackingMode,
    pub scale: f64,
    pub level: usize,
    pub lanes: usize,
}

/// The ciphertext's natural serialized size in bytes.
pub fn ciphertext_size(ct: &Ciphertext) -> usize {
    ct.to_bytes().len()
}

/// Frames a ciphertext for the wire.
///
/// The payload must come out at exactly the computed ciphertext size;
/// the size query and the serializer are separate paths, and drift
/// between them is an integrity failure, not something to truncate.
pub fn save_cipher(value: &CipherValue) -> Result<ValueEnvelope, HeError> {
    let expected = ciphertext_size(&value.ct);
    let bytes = value.ct.to_bytes();
    if bytes.len() != expected {
        return Err(HeError::SizeMismatch {
            expected,
            actual: bytes.len(),
        });
    }

    Ok(ValueEnvelope {
        is_plaintext: false,
        payload: ArcBytes::from_bytes(bytes),
        packing: value.packing,
        scale: value.scale,
        level: value.level,
        lanes: value.lanes,
    })
}

/// Recovers a ciphertext from an envelope under the backend's context.
///
/// The envelope must be flagged as ciphertext, and the payload must
/// deserialize under the same parameter set it was saved with.
pub fn load_cipher(envelope: &ValueEnvelope, backend: &HeBackend) -> Result<CipherValue, HeError> {
    if envelope.is_plaintext {
        return Err(HeError::KindMismatch);
    }

    let ct = Ciphertext::from_bytes(&envelope.payload, backend.params())?;
    Ok(CipherValue {
        ct,
        params: backend.params().clone(),
        packing: envelope.packing,
        scale: envelope.scale,
        level: envelope.level,
        lanes: envelope.lanes,
    })
}

pub fn save_plain(value: &PlainValue) -> Result<ValueEnvelope, HeError> {
    let bytes = bincode::serialize(&value.data)?;
    Ok(ValueEnvelope {
        is_plaintext: true,
        payload: ArcBytes::from_bytes(bytes),
        packing: value.packing,
        scale: value.scale,
        level: 0,
        lanes: value.lanes(),
    })
}

pub fn load_plain(envelope: &ValueEnvelope) -> Result<PlainValue, HeError> {
    if !envelope.is_plaintext {
        return Err(HeError::KindMismatch);
    }

    let data: PlainData = bincode::deserialize(&envelope.payload)?;
    Ok(PlainValue {
        data,
        packing: envelope.packing,
        scale: envelope.scale,
    })
}
