//! # Cipher Module
//!
//! Block encryption under a [`crate::keypair::PublicKey`] and decryption with the
//! matching [`crate::keypair::PrivateKey`].

pub mod engine;

use crate::ring::Matrix;

use serde::{Deserialize, Serialize};

pub use engine::{decrypt_block, decrypt_blocks, encrypt_block, encrypt_blocks};

/// One encrypted plaintext block.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CiphertextBlock {
    pub c1: Matrix,
    pub c2: Matrix,
}

impl CiphertextBlock {
    /// Flattens the block into its 8 cells: C1 row-major, then C2 row-major.
    pub fn cells(&self) -> [i64; 8] {
        let [[a, b], [c, d]] = self.c1;
        let [[e, f], [g, h]] = self.c2;
        [a, b, c, d, e, f, g, h]
    }

    /// Inverse of [`CiphertextBlock::cells`].
    pub fn from_cells(cells: [i64; 8]) -> Self {
        let [a, b, c, d, e, f, g, h] = cells;
        Self {
            c1: [[a, b], [c, d]],
            c2: [[e, f], [g, h]],
        }
    }
}
