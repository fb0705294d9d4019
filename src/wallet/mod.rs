//! EVM Key Material
//!
//! Generates secp256k1 key pairs from OS randomness and derives the
//! corresponding Ethereum address. Keys live only in process memory and are
//! handed to the signer by value; nothing here performs I/O.

mod keygen;

pub use keygen::{EvmKeypair, KeyError};
