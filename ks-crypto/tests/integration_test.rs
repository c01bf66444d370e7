use ks_crypto::cipher::{CiphertextBlock, decrypt_block, encrypt_block};
use ks_crypto::codec::{blocks_to_text, parse_ciphertext, serialize_ciphertext, text_to_blocks};
use ks_crypto::errors::KSCryptoError;
use ks_crypto::keypair::{SharedParams, generate_keys};
use ks_crypto::ring::mod_inverse;

#[test]
fn happy_flow() -> Result<(), KSCryptoError> {
    let shared_params = SharedParams::default();
    let ring = shared_params.ring()?;

    let (public_key, private_key) = generate_keys(&shared_params)?;

    let blocks = text_to_blocks("Test")?;
    assert_eq!(blocks.len(), 1);

    let mut rng = rand::rng();
    let encrypted = vec![encrypt_block(&blocks[0], &public_key, &mut rng)?];
    let framed = serialize_ciphertext(&encrypted)?;

    let parsed = parse_ciphertext(&framed)?;
    assert_eq!(parsed, encrypted);

    let decrypted = decrypt_block(&parsed[0], &private_key, &ring)?;
    let decoded = blocks_to_text(&[decrypted])?;

    dbg!(&framed, &decoded);

    assert_eq!(decoded, "Test");

    Ok(())
}

#[test]
fn regenerating_keys_is_reproducible() -> Result<(), KSCryptoError> {
    let params = SharedParams::try_with(
        95,
        [[14, 13], [13, 14]],
        [[12, 11], [11, 12]],
        [[14, 15], [43, 58]],
    )?;

    let first = generate_keys(&params)?;
    let second = generate_keys(&params.clone())?;

    assert_eq!(first, second);

    let (public_key, _) = first;
    assert_eq!(public_key.modulus, 95);
    assert_eq!(public_key.key1, [[53, 30], [28, 19]]);
    assert_eq!(public_key.key2, [[84, 21], [60, 12]]);
    Ok(())
}

#[test]
fn reference_ciphertext_decrypts() -> Result<(), KSCryptoError> {
    // "Test" blinded with u = 2, X = [[3, 1], [1, 3]] under the reference keys
    let framed = "<Yk-v;Gsu>";

    let shared_params = SharedParams::default();
    let ring = shared_params.ring()?;
    let (_, private_key) = generate_keys(&shared_params)?;

    let parsed = parse_ciphertext(framed)?;
    assert_eq!(
        parsed,
        vec![CiphertextBlock {
            c1: [[57, 75], [13, 86]],
            c2: [[27, 39], [83, 85]],
        }]
    );
    assert_eq!(serialize_ciphertext(&parsed)?, framed);

    let decrypted = decrypt_block(&parsed[0], &private_key, &ring)?;
    assert_eq!(blocks_to_text(&[decrypted])?, "Test");
    Ok(())
}

#[test]
fn scalar_inverse_of_shared_factor_fails() {
    assert!(matches!(
        mod_inverse(5, 10),
        Err(KSCryptoError::NotInvertible(_))
    ));
    assert_eq!(mod_inverse(3, 10).ok(), Some(7));
}
