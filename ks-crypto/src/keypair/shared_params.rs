use crate::errors::KSCryptoError;
use crate::ring::{Matrix, Ring};

use serde::{Deserialize, Serialize};

/// Modulus of the reference parameter set. Codes 0..95 cover printable ASCII after the
/// offset of 32.
pub const REFERENCE_MODULUS: u64 = 95;
pub const REFERENCE_MATRIX_A: Matrix = [[14, 13], [13, 14]];
pub const REFERENCE_MATRIX_B: Matrix = [[12, 11], [11, 12]];
pub const REFERENCE_MATRIX_N: Matrix = [[14, 15], [43, 58]];

/// Parameters the key material is derived from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SharedParams {
    /// Modulus m of the ring Z_m all arithmetic happens in.
    pub modulus: u64,
    /// First private key component.
    pub matrix_A: Matrix,
    /// Second private key component.
    pub matrix_B: Matrix,
    /// Auxiliary matrix used only while deriving the public key.
    pub matrix_N: Matrix,
}

/// Returns `true` for matrices of the form `[[p, q], [q, p]]`.
pub fn is_symmetric_circulant(matrix: &Matrix) -> bool {
    matrix[0][0] == matrix[1][1] && matrix[0][1] == matrix[1][0]
}

impl Default for SharedParams {
    fn default() -> Self {
        Self {
            modulus: REFERENCE_MODULUS,
            matrix_A: REFERENCE_MATRIX_A,
            matrix_B: REFERENCE_MATRIX_B,
            matrix_N: REFERENCE_MATRIX_N,
        }
    }
}

impl SharedParams {
    /// Creates a new SharedParams instance with the given parameters.
    ///
    /// Only the modulus and entry ranges are validated here. Whether A, B and N are invertible is checked
    /// by [`crate::keypair::generate_keys`].
    pub fn try_with(
        modulus: u64,
        matrix_A: Matrix,
        matrix_B: Matrix,
        matrix_N: Matrix,
    ) -> Result<Self, KSCryptoError> {
        let params = Self {
            modulus,
            matrix_A,
            matrix_B,
            matrix_N,
        };
        params.validate()?;

        Ok(params)
    }

    /// Checks the modulus, that every entry is already reduced into `[0, m)` and that
    /// A and B have the `[[p, q], [q, p]]` shape.
    ///
    /// Decryption only cancels the blinding matrix because A, B and the blinding matrix
    /// all commute, which holds for matrices of that shape.
    pub fn validate(&self) -> Result<(), KSCryptoError> {
        let ring = self.ring()?;

        for (name, matrix) in [
            ("A", &self.matrix_A),
            ("B", &self.matrix_B),
            ("N", &self.matrix_N),
        ] {
            if matrix.iter().flatten().any(|&v| ring.normalize(v) != v) {
                return Err(KSCryptoError::InvalidParameters(format!(
                    "matrix {} = {:?} has entries outside [0, {})",
                    name, matrix, self.modulus
                )));
            }
        }

        for (name, matrix) in [("A", &self.matrix_A), ("B", &self.matrix_B)] {
            if !is_symmetric_circulant(matrix) {
                return Err(KSCryptoError::InvalidParameters(format!(
                    "matrix {} = {:?} must have the form [[p, q], [q, p]]",
                    name, matrix
                )));
            }
        }

        Ok(())
    }

    /// Returns the ring Z_m described by these parameters.
    pub fn ring(&self) -> Result<Ring, KSCryptoError> {
        Ring::try_with(self.modulus)
    }

    /// Parses a JSON parameter set and validates it.
    pub fn from_json(json: &str) -> Result<Self, KSCryptoError> {
        let params: Self = serde_json::from_str(json)?;
        params.validate()?;

        Ok(params)
    }

    pub fn to_json(&self) -> Result<String, KSCryptoError> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}
