use anyhow::Result;
use ks_crypto::keypair::{PrivateKey, PublicKey};
use ks_crypto::session::Session;
use serde::Serialize;

use super::format_matrix;

#[derive(Serialize)]
struct KeysReport<'a> {
    public_key: &'a PublicKey,
    private_key: &'a PrivateKey,
}

pub fn run(session: &Session, json: bool) -> Result<()> {
    if json {
        let report = KeysReport {
            public_key: &session.public_key,
            private_key: &session.private_key,
        };
        println!("{}", serde_json::to_string_pretty(&report)?);
        return Ok(());
    }

    let public_key = &session.public_key;
    let private_key = &session.private_key;

    println!("Public key");
    println!("  modulus: {}", public_key.modulus);
    println!("  key1:    {}", format_matrix(&public_key.key1));
    println!("  key2:    {}", format_matrix(&public_key.key2));
    println!("Private key");
    println!("  A:       {}", format_matrix(&private_key.matrix_A));
    println!("  B:       {}", format_matrix(&private_key.matrix_B));

    Ok(())
}
