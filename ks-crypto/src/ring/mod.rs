#![allow(non_snake_case)] // Allow non-snake_case identifiers (like matrix variable names)

//! # Ring Module
//!
//! Provides the [`Ring`] struct for representing finite rings Z_m and the fixed-size
//! 2x2 matrix algebra the cipher is built on.

pub mod helper;
pub mod math;
pub mod matrix_ops;

/// Represents a 2x2 matrix over Z_m, stored row-major.
pub type Matrix = [[i64; 2]; 2];

pub use helper::gcd;
pub use math::{Ring, mod_inverse};
pub use matrix_ops::mod_matrix_inverse;
