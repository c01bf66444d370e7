//! Text-level encryption pipeline: encode, encrypt, frame, and back.

use crate::cipher::{decrypt_blocks, encrypt_blocks};
use crate::codec::{blocks_to_text, parse_ciphertext, serialize_ciphertext, text_to_ring_blocks};
use crate::errors::KSCryptoError;
use crate::keypair::{PrivateKey, PublicKey, SharedParams, generate_keys};
use crate::ring::Ring;

use rand::Rng;

/// Encrypts `text` and returns it in the framed `<...>` format.
///
/// # Errors
///
/// Returns `KSCryptoError::UnsupportedCharacter` for characters below the space or whose
/// value does not fit the public key's modulus.
pub fn encrypt_text<R: Rng + ?Sized>(
    text: &str,
    public_key: &PublicKey,
    rng: &mut R,
) -> Result<String, KSCryptoError> {
    let ring = public_key.ring()?;

    let blocks = text_to_ring_blocks(text, &ring)?;

    let encrypted = encrypt_blocks(&blocks, public_key, rng)?;
    serialize_ciphertext(&encrypted)
}

/// Decrypts a framed ciphertext. The result keeps the trailing space padding.
pub fn decrypt_text(
    framed: &str,
    private_key: &PrivateKey,
    ring: &Ring,
) -> Result<String, KSCryptoError> {
    let blocks = parse_ciphertext(framed)?;
    let decrypted = decrypt_blocks(&blocks, private_key, ring)?;
    blocks_to_text(&decrypted)
}

/// Key material generated once and held read-only for every call.
#[derive(Debug, Clone)]
pub struct Session {
    pub ring: Ring,
    pub public_key: PublicKey,
    pub private_key: PrivateKey,
}

impl Session {
    pub fn try_with(params: &SharedParams) -> Result<Self, KSCryptoError> {
        let (public_key, private_key) = generate_keys(params)?;

        Ok(Self {
            ring: params.ring()?,
            public_key,
            private_key,
        })
    }

    pub fn encrypt(&self, text: &str) -> Result<String, KSCryptoError> {
        encrypt_text(text, &self.public_key, &mut rand::rng())
    }

    pub fn decrypt(&self, framed: &str) -> Result<String, KSCryptoError> {
        decrypt_text(framed, &self.private_key, &self.ring)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use rand::SeedableRng;
    use rand::rngs::StdRng;

    #[test]
    fn test_session_round_trip() -> Result<(), KSCryptoError> {
        let session = Session::try_with(&SharedParams::default())?;

        let framed = session.encrypt("Test")?;
        assert!(framed.starts_with('<') && framed.ends_with('>'));
        assert_eq!(framed.chars().count(), 10);
        assert_eq!(session.decrypt(&framed)?, "Test");
        Ok(())
    }

    #[test]
    fn test_padding_is_kept_on_decrypt() -> Result<(), KSCryptoError> {
        let session = Session::try_with(&SharedParams::default())?;
        let mut rng = StdRng::seed_from_u64(11);

        let framed = encrypt_text("Hello, world", &session.public_key, &mut rng)?;
        assert_eq!(framed.chars().count(), 3 * 8 + 2);
        assert_eq!(session.decrypt(&framed)?, "Hello, world");

        let framed = encrypt_text("Hey", &session.public_key, &mut rng)?;
        assert_eq!(session.decrypt(&framed)?, "Hey ");
        Ok(())
    }

    #[test]
    fn test_character_outside_ring_rejected() -> Result<(), KSCryptoError> {
        let session = Session::try_with(&SharedParams::default())?;

        // 'é' has value 201, which does not fit mod 95
        match session.encrypt("café") {
            Err(KSCryptoError::UnsupportedCharacter {
                character,
                position,
            }) => {
                assert_eq!(character, 'é');
                assert_eq!(position, 3);
            }
            other => panic!("expected UnsupportedCharacter, got {:?}", other),
        }
        Ok(())
    }

    #[test]
    fn test_decrypt_rejects_unframed_input() -> Result<(), KSCryptoError> {
        let session = Session::try_with(&SharedParams::default())?;
        assert!(matches!(
            session.decrypt("no frame here"),
            Err(KSCryptoError::MalformedCiphertext(_))
        ));
        Ok(())
    }
}
