use anyhow::{Context, Result};
use ks_crypto::session::Session;

use super::arg_or_stdin;

pub fn run(session: &Session, text: Option<String>) -> Result<()> {
    let text = arg_or_stdin(text)?;
    let framed = session.encrypt(&text).context("encrypting text")?;

    println!("{}", framed);
    Ok(())
}
