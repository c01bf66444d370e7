use crate::cipher::CiphertextBlock;
use crate::errors::KSCryptoError;
use crate::keypair::{PrivateKey, PublicKey};
use crate::ring::matrix_ops::{matrix_chain_mul, matrix_inverse, normalize_matrix, scalar_mul};
use crate::ring::{Matrix, Ring};

use rand::Rng;

/// Upper bound on draws for each randomly sampled blinding parameter.
pub const MAX_SAMPLING_ATTEMPTS: usize = 10_000;

/// Draws a unit `u` from `[1, m-1]` and returns `(u, u⁻¹)`.
///
/// # Errors
///
/// Returns `KSCryptoError::BlindingSamplingFailure` if no unit was drawn within
/// `max_attempts` draws.
pub fn sample_unit<R: Rng + ?Sized>(
    ring: &Ring,
    rng: &mut R,
    max_attempts: usize,
) -> Result<(i64, i64), KSCryptoError> {
    let m = ring.modulus() as i64;

    for attempt in 0..max_attempts {
        let u = rng.random_range(1..m);
        match ring.inv(u) {
            Ok(u_inv) => return Ok((u, u_inv)),
            Err(_) => log::trace!("blinding unit {} rejected (attempt {})", u, attempt + 1),
        }
    }

    log::warn!("no blinding unit found mod {} after {} draws", m, max_attempts);
    Err(KSCryptoError::BlindingSamplingFailure {
        attempts: max_attempts,
    })
}

/// Draws an invertible blinding matrix `X = [[p, q], [q, p]]` with `p, q` in `[0, m)` and
/// returns `(X, X⁻¹)`.
///
/// # Errors
///
/// Returns `KSCryptoError::BlindingSamplingFailure` if no invertible matrix was drawn
/// within `max_attempts` draws.
pub fn sample_blinding_matrix<R: Rng + ?Sized>(
    ring: &Ring,
    rng: &mut R,
    max_attempts: usize,
) -> Result<(Matrix, Matrix), KSCryptoError> {
    let m = ring.modulus() as i64;

    for attempt in 0..max_attempts {
        let p = rng.random_range(0..m);
        let q = rng.random_range(0..m);
        let X = [[p, q], [q, p]];

        match matrix_inverse(&X, ring) {
            Ok(X_inv) => return Ok((X, X_inv)),
            Err(_) => log::trace!("blinding matrix {:?} rejected (attempt {})", X, attempt + 1),
        }
    }

    log::warn!(
        "no invertible blinding matrix found mod {} after {} draws",
        m,
        max_attempts
    );
    Err(KSCryptoError::BlindingSamplingFailure {
        attempts: max_attempts,
    })
}

/// Encrypts one plaintext block under `public_key`.
///
/// A fresh unit `u` and blinding matrix `X` are drawn from `rng` on every call, then
///
/// ```text
/// C1 = u⁻¹ · X⁻¹ · key2 · X         (mod m)
/// C2 = u · plaintext · X⁻¹ · key1 · X (mod m)
/// ```
///
/// Encrypting the same block twice gives different ciphertexts.
pub fn encrypt_block<R: Rng + ?Sized>(
    plaintext: &Matrix,
    public_key: &PublicKey,
    rng: &mut R,
) -> Result<CiphertextBlock, KSCryptoError> {
    let ring = public_key.ring()?;

    let (u, u_inv) = sample_unit(&ring, rng, MAX_SAMPLING_ATTEMPTS)?;
    let (X, X_inv) = sample_blinding_matrix(&ring, rng, MAX_SAMPLING_ATTEMPTS)?;

    let blinded_X_inv = scalar_mul(u_inv, &X_inv, &ring);
    let c1 = matrix_chain_mul(&[&blinded_X_inv, &public_key.key2, &X], &ring);

    let scaled_plaintext = scalar_mul(u, &normalize_matrix(plaintext, &ring), &ring);
    let c2 = matrix_chain_mul(&[&scaled_plaintext, &X_inv, &public_key.key1, &X], &ring);

    Ok(CiphertextBlock { c1, c2 })
}

/// Encrypts every block independently, each with its own blinding.
pub fn encrypt_blocks<R: Rng + ?Sized>(
    blocks: &[Matrix],
    public_key: &PublicKey,
    rng: &mut R,
) -> Result<Vec<CiphertextBlock>, KSCryptoError> {
    let encrypted = blocks
        .iter()
        .map(|block| encrypt_block(block, public_key, rng))
        .collect::<Result<Vec<_>, _>>()?;

    log::debug!("encrypted {} blocks", encrypted.len());
    Ok(encrypted)
}

/// Private key material resolved once so a batch of blocks shares the inverse searches.
struct Unblinder<'a> {
    ring: &'a Ring,
    A: Matrix,
    A_inv_B: Matrix,
    B_inv: Matrix,
}

impl<'a> Unblinder<'a> {
    fn try_with(private_key: &PrivateKey, ring: &'a Ring) -> Result<Self, KSCryptoError> {
        let A = normalize_matrix(&private_key.matrix_A, ring);
        let B = normalize_matrix(&private_key.matrix_B, ring);

        let A_inv = matrix_inverse(&A, ring).map_err(|e| {
            KSCryptoError::KeyInvalid(format!("private matrix A is not invertible: {}", e))
        })?;
        let B_inv = matrix_inverse(&B, ring).map_err(|e| {
            KSCryptoError::KeyInvalid(format!("private matrix B is not invertible: {}", e))
        })?;

        Ok(Self {
            ring,
            A,
            A_inv_B: matrix_chain_mul(&[&A_inv, &B], ring),
            B_inv,
        })
    }

    /// d = A⁻¹ · B · C1 · B⁻¹ · A, plaintext = C2 · d
    fn unblind(&self, block: &CiphertextBlock) -> Matrix {
        let d = matrix_chain_mul(&[&self.A_inv_B, &block.c1, &self.B_inv, &self.A], self.ring);
        matrix_chain_mul(&[&block.c2, &d], self.ring)
    }
}

/// Decrypts one ciphertext block with `private_key` over `ring`.
///
/// The block itself is not validated: a block that was not produced by
/// [`encrypt_block`] under the matching public key decrypts to an arbitrary matrix.
///
/// # Errors
///
/// Returns `KSCryptoError::KeyInvalid` if A or B has no inverse mod m.
pub fn decrypt_block(
    block: &CiphertextBlock,
    private_key: &PrivateKey,
    ring: &Ring,
) -> Result<Matrix, KSCryptoError> {
    Ok(Unblinder::try_with(private_key, ring)?.unblind(block))
}

/// Decrypts every block, resolving the private key inverses once for the batch.
pub fn decrypt_blocks(
    blocks: &[CiphertextBlock],
    private_key: &PrivateKey,
    ring: &Ring,
) -> Result<Vec<Matrix>, KSCryptoError> {
    let unblinder = Unblinder::try_with(private_key, ring)?;
    let decrypted: Vec<Matrix> = blocks.iter().map(|block| unblinder.unblind(block)).collect();

    log::debug!("decrypted {} blocks", decrypted.len());
    Ok(decrypted)
}
