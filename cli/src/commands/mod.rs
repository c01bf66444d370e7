pub mod decrypt;
pub mod demo;
pub mod encrypt;
pub mod keys;

use std::io::Read;

use anyhow::{Context, Result};

/// Returns `arg`, or the whole of stdin with the trailing newline removed.
pub fn arg_or_stdin(arg: Option<String>) -> Result<String> {
    match arg {
        Some(value) => Ok(value),
        None => {
            let mut input = String::new();
            std::io::stdin()
                .read_to_string(&mut input)
                .context("reading stdin")?;
            Ok(input.trim_end_matches(['\r', '\n']).to_string())
        }
    }
}

/// Formats a 2x2 matrix on one line, e.g. `[[14 13] [13 14]]`.
pub fn format_matrix(matrix: &ks_crypto::ring::Matrix) -> String {
    format!(
        "[[{} {}] [{} {}]]",
        matrix[0][0], matrix[0][1], matrix[1][0], matrix[1][1]
    )
}
