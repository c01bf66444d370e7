//! Implementation of ring ops using modular arithmetic.

use crate::errors::KSCryptoError;

use super::gcd;

use serde::{Deserialize, Serialize};

/// Represents a finite ring Z_m using modular arithmetic.
///
/// The cipher only ever runs over small moduli (the reference parameter set uses 95),
/// so inverses are found by exhaustive search rather than the Extended Euclidean Algorithm.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Serialize, Deserialize)]
pub struct Ring {
    pub modulus: u64,
}

impl Ring {
    /// Create a new Ring with the given modulus.
    ///
    /// The modulus must be greater than 1 and small enough for the `i64` arithmetic
    /// of the matrix layer.
    pub fn try_with(modulus: u64) -> Result<Self, KSCryptoError> {
        if modulus <= 1 {
            return Err(KSCryptoError::InvalidModulus(format!(
                "Modulus must be greater than 1, got {}",
                modulus
            )));
        }
        if modulus > u32::MAX as u64 {
            return Err(KSCryptoError::InvalidModulus(format!(
                "Modulus {} is too large for exhaustive inverse search",
                modulus
            )));
        }

        Ok(Ring { modulus })
    }

    /// Returns the modulus of the ring.
    ///
    /// # Example
    ///
    /// ```
    /// # use ks_crypto::ring::Ring;
    /// let ring = Ring::try_with(95).unwrap();
    /// assert_eq!(ring.modulus(), 95);
    /// ```
    pub fn modulus(&self) -> u64 {
        self.modulus
    }

    /// Normalizes a value to be within the range `[0, modulus - 1]`.
    ///
    /// # Example
    ///
    /// ```
    /// # use ks_crypto::ring::Ring;
    /// let ring = Ring::try_with(10).unwrap();
    /// assert_eq!(ring.normalize(15), 5);
    /// assert_eq!(ring.normalize(-3), 7);
    /// assert_eq!(ring.normalize(10), 0);
    /// ```
    pub fn normalize(&self, value: i64) -> i64 {
        value.rem_euclid(self.modulus as i64)
    }

    /// Computes `(a + b) mod modulus`.
    pub fn add(&self, a: i64, b: i64) -> i64 {
        let a_norm = self.normalize(a);
        let b_norm = self.normalize(b);

        self.normalize(a_norm + b_norm)
    }

    /// Computes `(a * b) mod modulus`.
    ///
    /// Uses `i128` internally to prevent overflow during multiplication before the modulo operation.
    ///
    /// # Example
    ///
    /// ```
    /// # use ks_crypto::ring::Ring;
    /// let ring = Ring::try_with(10).unwrap();
    /// assert_eq!(ring.mul(7, 5), 5);
    /// assert_eq!(ring.mul(-2, 6), 8);
    /// ```
    pub fn mul(&self, a: i64, b: i64) -> i64 {
        let a_norm = self.normalize(a);
        let b_norm = self.normalize(b);

        let result = (a_norm as i128 * b_norm as i128) % (self.modulus as i128);

        result as i64
    }

    /// Returns `true` when `a` is a unit of the ring, i.e. `gcd(a, modulus) == 1`.
    pub fn is_unit(&self, a: i64) -> bool {
        gcd(self.normalize(a), self.modulus as i64) == 1
    }

    /// Computes the modular multiplicative inverse `a^-1 mod modulus`.
    ///
    /// Walks `[0, modulus)` in increasing order and returns the first `i` with
    /// `a * i ≡ 1`. O(modulus).
    ///
    /// # Errors
    ///
    /// Returns `KSCryptoError::NotInvertible` if no such value exists (`gcd(a, modulus) != 1`).
    ///
    /// # Example
    ///
    /// ```
    /// # use ks_crypto::ring::Ring;
    /// let ring = Ring::try_with(10).unwrap();
    /// assert_eq!(ring.inv(3).unwrap(), 7); // 3 * 7 = 21 = 1 mod 10
    /// assert_eq!(ring.inv(9).unwrap(), 9);
    /// assert!(ring.inv(5).is_err()); // gcd(5, 10) = 5
    /// assert!(ring.inv(0).is_err());
    /// ```
    pub fn inv(&self, a: i64) -> Result<i64, KSCryptoError> {
        let m = self.modulus as i64;

        (0..m).find(|&i| self.mul(a, i) == 1).ok_or_else(|| {
            KSCryptoError::NotInvertible(format!(
                "Modular inverse does not exist for {} mod {} (gcd={})",
                self.normalize(a),
                m,
                gcd(self.normalize(a), m)
            ))
        })
    }
}

/// Finds the inverse of `num` modulo `modulus` by exhaustive search.
///
/// Convenience wrapper over [`Ring::inv`] for callers holding a bare modulus.
pub fn mod_inverse(num: i64, modulus: u64) -> Result<i64, KSCryptoError> {
    Ring::try_with(modulus)?.inv(num)
}
