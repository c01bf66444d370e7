use anyhow::{Context, Result, ensure};
use ks_crypto::cipher::{decrypt_blocks, encrypt_blocks};
use ks_crypto::codec::{
    blocks_to_text, parse_ciphertext, serialize_ciphertext, text_to_ring_blocks,
};
use ks_crypto::session::Session;

use super::format_matrix;

/// Runs the full pipeline one stage at a time, printing what each stage produced.
pub fn run(session: &Session, text: &str) -> Result<()> {
    println!("Plaintext: {:?}", text);

    println!("\nConverting string to matrix set...");
    let blocks = text_to_ring_blocks(text, &session.ring).context("encoding text")?;
    for block in &blocks {
        println!("  {}", format_matrix(block));
    }

    println!("\nEncrypting matrix set...");
    let encrypted = encrypt_blocks(&blocks, &session.public_key, &mut rand::rng())
        .context("encrypting blocks")?;
    for block in &encrypted {
        println!("  C1 {}  C2 {}", format_matrix(&block.c1), format_matrix(&block.c2));
    }

    let framed = serialize_ciphertext(&encrypted).context("framing ciphertext")?;
    println!("\nEncrypted code: {}", framed);

    println!("\nConverting ciphertext to matrix set...");
    let parsed = parse_ciphertext(&framed).context("parsing ciphertext")?;

    println!("\nDecrypting matrix set...");
    let decrypted = decrypt_blocks(&parsed, &session.private_key, &session.ring)
        .context("decrypting blocks")?;
    let recovered = blocks_to_text(&decrypted).context("decoding blocks")?;
    println!("\nDecrypted code: {:?}", recovered);

    ensure!(
        recovered.trim_end_matches(' ') == text.trim_end_matches(' '),
        "round trip mismatch: {:?} != {:?}",
        recovered,
        text
    );
    Ok(())
}
