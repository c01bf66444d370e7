use anyhow::{Context, Result};
use ks_crypto::session::Session;

use super::arg_or_stdin;

pub fn run(session: &Session, ciphertext: Option<String>) -> Result<()> {
    let ciphertext = arg_or_stdin(ciphertext)?;
    let plaintext = session
        .decrypt(&ciphertext)
        .context("decrypting ciphertext")?;

    println!("{}", plaintext);
    Ok(())
}
