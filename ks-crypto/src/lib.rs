#![allow(non_snake_case)]

pub mod cipher;
pub mod codec;
pub mod errors;
pub mod keypair;
pub mod ring;
pub mod session;

pub use cipher::CiphertextBlock;
pub use errors::KSCryptoError;
pub use keypair::{PrivateKey, PublicKey, SharedParams, generate_keys};
pub use session::Session;
