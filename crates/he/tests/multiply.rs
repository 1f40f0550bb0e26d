// SPDX-License-Identifier: LGPL-3.0-only
//
// This file is provided WITHOUT ANY WARRANTY;
// without even the implied warranty of MERCHANTABILITY
// or FITNESS FOR A PARTICULAR PURPOSE.

use anyhow::Result;
use fhe::bfv::{PublicKey, RelinearizationKey, SecretKey};
use veil_he::{
    build_params, load_cipher, load_plain, multiply_batch, multiply_cipher_cipher,
    multiply_cipher_plain, params, save_cipher, save_plain, HeBackend, HeError, HeValue,
    PackingMode, PlainValue,
};
use veil_test_helpers::create_shared_rng_from_u64;

fn leveled_backend() -> Result<(HeBackend, SecretKey, PublicKey)> {
    let (degree, plaintext_modulus, moduli) = params::SET_8192_1032193_3;
    let params = build_params(degree, plaintext_modulus, &moduli)?;
    let rng = create_shared_rng_from_u64(42);
    let (sk, pk, rk) = {
        let mut rng = rng.lock().unwrap();
        let sk = SecretKey::random(&params, &mut *rng);
        let pk = PublicKey::new(&sk, &mut *rng);
        let rk = RelinearizationKey::new(&sk, &mut *rng)?;
        (sk, pk, rk)
    };
    let backend = HeBackend::with_relin_key(params, &rk, rng)?;
    Ok((backend, sk, pk))
}

fn flat_backend() -> Result<(HeBackend, SecretKey, PublicKey)> {
    let (degree, plaintext_modulus, moduli) = params::SET_2048_1032193_1;
    let params = build_params(degree, plaintext_modulus, &moduli)?;
    let rng = create_shared_rng_from_u64(7);
    let (sk, pk) = {
        let mut rng = rng.lock().unwrap();
        let sk = SecretKey::random(&params, &mut *rng);
        let pk = PublicKey::new(&sk, &mut *rng);
        (sk, pk)
    };
    Ok((HeBackend::new(params, rng), sk, pk))
}

fn assert_close(actual: &[f64], expected: &[f64]) {
    assert_eq!(actual.len(), expected.len());
    for (a, e) in actual.iter().zip(expected) {
        assert!((a - e).abs() < 1e-9, "got {a}, expected {e}");
    }
}

#[test]
fn cipher_cipher_product_decrypts_to_lane_products() -> Result<()> {
    let (backend, sk, pk) = leveled_backend()?;

    let xs = [1.5, -2.0, 3.25, 0.0, -0.5];
    let ys = [2.0, 0.5, -1.0, 4.0, 3.0];
    let mut a = backend.encrypt_reals(&pk, &xs, 16.0, PackingMode::Flat)?;
    let mut b = backend.encrypt_reals(&pk, &ys, 16.0, PackingMode::Flat)?;

    let product = multiply_cipher_cipher(&mut a, &mut b, &backend)?;
    assert_eq!(product.level, 1);
    assert_eq!(product.scale, 256.0);

    let decrypted = backend.decrypt_reals(&sk, &product)?;
    assert_close(&decrypted, &[3.0, -1.0, -3.25, 0.0, -1.5]);
    Ok(())
}

#[test]
fn cipher_plain_product_leaves_plain_untouched() -> Result<()> {
    let (backend, sk, pk) = flat_backend()?;

    let cipher = backend.encrypt_reals(&pk, &[1.0, -3.0, 0.25], 32.0, PackingMode::Flat)?;
    let plain = PlainValue::reals(vec![2.0, 2.0, -8.0], 4.0, PackingMode::Flat);

    let product = multiply_cipher_plain(&cipher, &plain, &backend)?;
    assert_eq!(product.level, 0);
    assert_eq!(product.scale, 128.0);

    let decrypted = backend.decrypt_reals(&sk, &product)?;
    assert_close(&decrypted, &[2.0, -6.0, -2.0]);
    Ok(())
}

#[test]
fn cipher_cipher_requires_relin_key() -> Result<()> {
    let (backend, _sk, pk) = flat_backend()?;
    let mut a = backend.encrypt_reals(&pk, &[1.0], 8.0, PackingMode::Flat)?;
    let mut b = a.clone();
    assert!(matches!(
        multiply_cipher_cipher(&mut a, &mut b, &backend),
        Err(HeError::MissingRelinKey)
    ));
    Ok(())
}

#[test]
fn packing_mismatch_is_fatal() -> Result<()> {
    let (backend, _sk, pk) = flat_backend()?;
    let cipher = backend.encrypt_reals(&pk, &[1.0, 2.0], 8.0, PackingMode::Paired)?;
    let plain = PlainValue::reals(vec![1.0, 2.0], 8.0, PackingMode::Flat);
    assert!(matches!(
        multiply_cipher_plain(&cipher, &plain, &backend),
        Err(HeError::PackingMismatch)
    ));
    Ok(())
}

#[test]
fn paired_packing_round_trips_through_encryption() -> Result<()> {
    let (backend, sk, pk) = flat_backend()?;
    let values = [1.0, -1.0, 2.5, 0.0, -4.25];
    let cipher = backend.encrypt_reals(&pk, &values, 64.0, PackingMode::Paired)?;
    let decrypted = backend.decrypt_reals(&sk, &cipher)?;
    assert_close(&decrypted, &values);
    Ok(())
}

#[test]
fn batched_multiply_dispatches_on_element_kinds() -> Result<()> {
    let (backend, sk, pk) = leveled_backend()?;

    // Five elements with mixed cipher/plain tags.
    let mut left = vec![
        HeValue::Cipher(backend.encrypt_reals(&pk, &[2.0], 16.0, PackingMode::Flat)?),
        HeValue::Cipher(backend.encrypt_reals(&pk, &[3.0], 16.0, PackingMode::Flat)?),
        HeValue::Plain(PlainValue::reals(vec![4.0], 16.0, PackingMode::Flat)),
        HeValue::Plain(PlainValue::reals(vec![5.0], 16.0, PackingMode::Flat)),
        HeValue::Cipher(backend.encrypt_reals(&pk, &[-6.0], 16.0, PackingMode::Flat)?),
    ];
    let mut right = vec![
        HeValue::Cipher(backend.encrypt_reals(&pk, &[0.5], 16.0, PackingMode::Flat)?),
        HeValue::Plain(PlainValue::reals(vec![-1.0], 16.0, PackingMode::Flat)),
        HeValue::Cipher(backend.encrypt_reals(&pk, &[2.0], 16.0, PackingMode::Flat)?),
        HeValue::Plain(PlainValue::reals(vec![3.0], 16.0, PackingMode::Flat)),
        HeValue::Cipher(backend.encrypt_reals(&pk, &[1.5], 16.0, PackingMode::Flat)?),
    ];

    let out = multiply_batch(&mut left, &mut right, &backend)?;
    assert_eq!(out.len(), 5);

    // Kind follows the dispatch rule: only plain×plain stays plain.
    let expected = [1.0, -3.0, 8.0, 15.0, -9.0];
    for (i, value) in out.iter().enumerate() {
        match value {
            HeValue::Cipher(c) => {
                assert!(i != 3);
                let lanes = backend.decrypt_reals(&sk, c)?;
                assert!((lanes[0] - expected[i]).abs() < 1e-9);
            }
            HeValue::Plain(p) => {
                assert_eq!(i, 3);
                assert_eq!(p.scale, 256.0);
                match &p.data {
                    veil_he::PlainData::Real(v) => assert_eq!(v[0], 15.0),
                    other => panic!("unexpected plain data {other:?}"),
                }
            }
        }
    }
    Ok(())
}

#[test]
fn batched_multiply_rejects_length_mismatch_before_any_work() -> Result<()> {
    let (backend, _sk, _pk) = flat_backend()?;
    let mut left = vec![HeValue::Plain(PlainValue::integers(
        vec![1],
        PackingMode::Flat,
    ))];
    let mut right = vec![];
    assert!(matches!(
        multiply_batch(&mut left, &mut right, &backend),
        Err(HeError::ShapeMismatch { left: 1, right: 0 })
    ));
    Ok(())
}

#[test]
fn ciphertext_envelope_round_trips() -> Result<()> {
    let (backend, sk, pk) = flat_backend()?;
    let values = [0.5, -1.25, 7.0];
    let cipher = backend.encrypt_reals(&pk, &values, 32.0, PackingMode::Flat)?;

    let envelope = save_cipher(&cipher)?;
    assert!(!envelope.is_plaintext);
    assert_eq!(
        envelope.payload.size_bytes(),
        veil_he::ciphertext_size(&cipher.ct)
    );

    let loaded = load_cipher(&envelope, &backend)?;
    let decrypted = backend.decrypt_reals(&sk, &loaded)?;
    assert_close(&decrypted, &values);
    Ok(())
}

#[test]
fn plaintext_flagged_envelope_refuses_cipher_load() -> Result<()> {
    let (backend, _sk, pk) = flat_backend()?;
    let cipher = backend.encrypt_reals(&pk, &[1.0], 8.0, PackingMode::Flat)?;
    let mut envelope = save_cipher(&cipher)?;
    envelope.is_plaintext = true;
    assert!(matches!(
        load_cipher(&envelope, &backend),
        Err(HeError::KindMismatch)
    ));
    Ok(())
}

#[test]
fn cross_context_load_is_rejected() -> Result<()> {
    let (backend, _sk, pk) = flat_backend()?;
    let cipher = backend.encrypt_reals(&pk, &[1.0], 8.0, PackingMode::Flat)?;
    let envelope = save_cipher(&cipher)?;

    let (other_backend, _sk2, _pk2) = leveled_backend()?;
    assert!(load_cipher(&envelope, &other_backend).is_err());
    Ok(())
}

#[test]
fn plain_envelope_keeps_its_discriminator() -> Result<()> {
    let plain = PlainValue::integers(vec![1, -2, 3], PackingMode::Flat);
    let envelope = save_plain(&plain)?;
    assert!(envelope.is_plaintext);
    assert_eq!(load_plain(&envelope)?, plain);
    Ok(())
}
