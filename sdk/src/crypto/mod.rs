//! # Cryptographic Primitives
//!
//! Hashing and key parsing shared by the auth schemes and the transaction
//! layer. Everything here is a thin wrapper around audited implementations
//! (`sha2`, `ed25519-dalek`, `blst`). If you're tempted to optimize these
//! functions, please reconsider.

pub mod hash;
pub mod keys;

pub use hash::{compute_id, generate_id_with_index, sha256_array};
pub use keys::KeyError;
