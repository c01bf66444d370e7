#[derive(thiserror::Error, Debug)]
pub enum KSCryptoError {
    /// Error when a scalar or a matrix has no inverse in the ring.
    #[error("NotInvertible: {0}")]
    NotInvertible(String),
    /// Error when creating a ring with an invalid modulus (m <= 1).
    #[error("InvalidModulus: {0}")]
    InvalidModulus(String),

    /// One of the key generation constants (A, B or N) has no inverse.
    #[error("KeyGenerationFailure: {0}")]
    KeyGenerationFailure(String),
    /// A private key component has no inverse at decryption time.
    #[error("KeyInvalid: {0}")]
    KeyInvalid(String),

    #[error("Unsupported character {character:?} at position {position}")]
    UnsupportedCharacter { character: char, position: usize },
    #[error("Could not sample a blinding parameter after {attempts} attempts")]
    BlindingSamplingFailure { attempts: usize },

    #[error("DecodingError: {0}")]
    DecodingError(String),
    #[error("MalformedCiphertext: {0}")]
    MalformedCiphertext(String),
    #[error("InvalidParameters: {0}")]
    InvalidParameters(String),

    #[error("Data serialization: {0}")]
    SerializationError(#[from] serde_json::Error),
}
