use crate::errors::KSCryptoError;
use crate::keypair::shared_params::SharedParams;
use crate::ring::matrix_ops::{matrix_chain_mul, matrix_inverse};
use crate::ring::{Matrix, Ring};

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PrivateKey {
    pub matrix_A: Matrix,
    pub matrix_B: Matrix,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PublicKey {
    pub modulus: u64,
    pub key1: Matrix,
    pub key2: Matrix,
}

impl PublicKey {
    /// Returns the ring Z_m the key was generated over.
    pub fn ring(&self) -> Result<Ring, KSCryptoError> {
        Ring::try_with(self.modulus)
    }
}

/// Inverts one of the key generation constants, reporting which one failed.
fn invert_constant(name: &str, matrix: &Matrix, ring: &Ring) -> Result<Matrix, KSCryptoError> {
    matrix_inverse(matrix, ring).map_err(|e| {
        KSCryptoError::KeyGenerationFailure(format!("matrix {} is not invertible: {}", name, e))
    })
}

/// Derives the key pair from `params`.
///
/// The private key is the pair `(A, B)`. The public key is
///
/// ```text
/// key1 = A⁻¹ · A⁻¹ · B⁻¹ · N   · A · A · B   (mod m)
/// key2 = A⁻¹ · B⁻¹ · B⁻¹ · N⁻¹ · A · B · B   (mod m)
/// ```
///
/// with every product taken left to right and reduced immediately. The derivation is
/// deterministic: the same parameters always give the same keys.
///
/// # Errors
///
/// Returns `KSCryptoError::KeyGenerationFailure` if A, B or N has no inverse mod m,
/// whatever their shape. Invertible parameters that fail [`SharedParams::validate`]
/// give `KSCryptoError::InvalidParameters`.
pub fn generate_keys(params: &SharedParams) -> Result<(PublicKey, PrivateKey), KSCryptoError> {
    let ring = params.ring()?;

    let A = &params.matrix_A;
    let B = &params.matrix_B;
    let N = &params.matrix_N;

    let A_inv = invert_constant("A", A, &ring)?;
    let B_inv = invert_constant("B", B, &ring)?;
    let N_inv = invert_constant("N", N, &ring)?;

    params.validate()?;

    let key1 = matrix_chain_mul(&[&A_inv, &A_inv, &B_inv, N, A, A, B], &ring);
    let key2 = matrix_chain_mul(&[&A_inv, &B_inv, &B_inv, &N_inv, A, B, B], &ring);

    let public_key = PublicKey {
        modulus: params.modulus,
        key1,
        key2,
    };
    let private_key = PrivateKey {
        matrix_A: *A,
        matrix_B: *B,
    };

    log::info!(
        "generated public key: m={} key1={:?} key2={:?}",
        public_key.modulus,
        public_key.key1,
        public_key.key2
    );
    log::debug!(
        "generated private key: A={:?} B={:?}",
        private_key.matrix_A,
        private_key.matrix_B
    );

    Ok((public_key, private_key))
}
