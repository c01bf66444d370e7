pub mod keys;
pub mod shared_params;

pub use keys::{PrivateKey, PublicKey, generate_keys};
pub use shared_params::SharedParams;
