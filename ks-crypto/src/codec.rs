//! Text <-> block encoding and the framed ciphertext format.
//!
//! Each character is stored as `codepoint - 32`, four characters to a 2x2 block in
//! row-major order. A ciphertext is written as `<` followed by eight characters per
//! block (C1 row-major, then C2 row-major) and a closing `>`.

use crate::cipher::CiphertextBlock;
use crate::errors::KSCryptoError;
use crate::ring::{Matrix, Ring};

/// Offset subtracted from every code point so that the space character maps to 0.
pub const CHAR_OFFSET: u32 = 32;
/// Characters per plaintext block.
pub const BLOCK_CHARS: usize = 4;
/// Characters per framed ciphertext block.
pub const CIPHERTEXT_BLOCK_CHARS: usize = 8;
pub const PADDING_CHAR: char = ' ';
pub const FRAME_START: char = '<';
pub const FRAME_END: char = '>';

/// Maps a character to its cell value.
pub fn char_to_cell(character: char, position: usize) -> Result<i64, KSCryptoError> {
    let code = character as u32;
    if code < CHAR_OFFSET {
        return Err(KSCryptoError::UnsupportedCharacter {
            character,
            position,
        });
    }

    Ok((code - CHAR_OFFSET) as i64)
}

/// Maps a cell value back to its character.
pub fn cell_to_char(value: i64) -> Result<char, KSCryptoError> {
    u32::try_from(value)
        .ok()
        .and_then(|v| v.checked_add(CHAR_OFFSET))
        .and_then(char::from_u32)
        .ok_or_else(|| {
            KSCryptoError::DecodingError(format!("value {} does not map to a character", value))
        })
}

/// Pads `text` with trailing spaces to a multiple of four characters.
pub fn pad_text(text: &str) -> String {
    let mut padded = text.to_string();
    while padded.chars().count() % BLOCK_CHARS != 0 {
        padded.push(PADDING_CHAR);
    }
    padded
}

/// Encodes `text` as a sequence of plaintext blocks.
///
/// # Errors
///
/// Returns `KSCryptoError::UnsupportedCharacter` for any character below the space.
///
/// # Example
///
/// ```
/// # use ks_crypto::codec::text_to_blocks;
/// let blocks = text_to_blocks("Test").unwrap();
/// assert_eq!(blocks, vec![[[52, 69], [83, 84]]]);
///
/// // padded with spaces (value 0)
/// assert_eq!(text_to_blocks("Hi").unwrap(), vec![[[40, 73], [0, 0]]]);
/// ```
pub fn text_to_blocks(text: &str) -> Result<Vec<Matrix>, KSCryptoError> {
    let cells = pad_text(text)
        .chars()
        .enumerate()
        .map(|(position, character)| char_to_cell(character, position))
        .collect::<Result<Vec<i64>, _>>()?;

    Ok(cells
        .chunks_exact(BLOCK_CHARS)
        .map(|chunk| [[chunk[0], chunk[1]], [chunk[2], chunk[3]]])
        .collect())
}

/// Rejects cells the ring cannot represent, which would otherwise wrap silently.
///
/// `text` is the input `blocks` were encoded from and is used to name the offending
/// character.
pub fn check_representable(
    text: &str,
    blocks: &[Matrix],
    ring: &Ring,
) -> Result<(), KSCryptoError> {
    let m = ring.modulus() as i64;

    let overflow = blocks
        .iter()
        .flat_map(|block| block.iter().flatten())
        .position(|&value| value >= m);

    match overflow {
        Some(position) => Err(KSCryptoError::UnsupportedCharacter {
            // padding is always representable, so the offending cell is part of `text`
            character: text.chars().nth(position).unwrap_or(PADDING_CHAR),
            position,
        }),
        None => Ok(()),
    }
}

/// Encodes `text` like [`text_to_blocks`] and checks every cell fits `ring`.
///
/// # Errors
///
/// Returns `KSCryptoError::UnsupportedCharacter` for characters below the space or whose
/// value is not below the modulus.
pub fn text_to_ring_blocks(text: &str, ring: &Ring) -> Result<Vec<Matrix>, KSCryptoError> {
    let blocks = text_to_blocks(text)?;
    check_representable(text, &blocks, ring)?;

    Ok(blocks)
}

/// Decodes plaintext blocks back into text, row-major, in block order.
///
/// Padding is kept: the result is always a multiple of four characters long.
pub fn blocks_to_text(blocks: &[Matrix]) -> Result<String, KSCryptoError> {
    blocks
        .iter()
        .flat_map(|block| block.iter().flatten())
        .map(|&value| cell_to_char(value))
        .collect()
}

/// Writes ciphertext blocks in the framed `<...>` format.
pub fn serialize_ciphertext(blocks: &[CiphertextBlock]) -> Result<String, KSCryptoError> {
    let mut framed = String::with_capacity(blocks.len() * CIPHERTEXT_BLOCK_CHARS + 2);
    framed.push(FRAME_START);
    for block in blocks {
        for value in block.cells() {
            framed.push(cell_to_char(value)?);
        }
    }
    framed.push(FRAME_END);

    Ok(framed)
}

/// Parses the framed `<...>` format back into ciphertext blocks.
///
/// Whitespace outside the frame is ignored. Inside the frame every character is a cell,
/// including spaces and `<`/`>`.
///
/// # Errors
///
/// Returns `KSCryptoError::MalformedCiphertext` when a delimiter is missing or the frame
/// body is not a whole number of blocks, and `KSCryptoError::UnsupportedCharacter` for a
/// character below the space.
pub fn parse_ciphertext(framed: &str) -> Result<Vec<CiphertextBlock>, KSCryptoError> {
    let body = framed
        .trim()
        .strip_prefix(FRAME_START)
        .and_then(|rest| rest.strip_suffix(FRAME_END))
        .ok_or_else(|| {
            KSCryptoError::MalformedCiphertext(format!(
                "ciphertext must be enclosed in '{}' and '{}'",
                FRAME_START, FRAME_END
            ))
        })?;

    let cells = body
        .chars()
        .enumerate()
        .map(|(position, character)| char_to_cell(character, position + 1))
        .collect::<Result<Vec<i64>, _>>()?;

    if cells.len() % CIPHERTEXT_BLOCK_CHARS != 0 {
        return Err(KSCryptoError::MalformedCiphertext(format!(
            "frame holds {} characters, expected a multiple of {}",
            cells.len(),
            CIPHERTEXT_BLOCK_CHARS
        )));
    }

    let blocks: Vec<CiphertextBlock> = cells
        .chunks_exact(CIPHERTEXT_BLOCK_CHARS)
        .map(|chunk| {
            let mut block_cells = [0i64; CIPHERTEXT_BLOCK_CHARS];
            block_cells.copy_from_slice(chunk);
            CiphertextBlock::from_cells(block_cells)
        })
        .collect();

    log::debug!("parsed {} ciphertext blocks", blocks.len());
    Ok(blocks)
}
