#![warn(missing_docs)]
//! MD5, SHA-1, SHA-256 and the SHA-3/Keccak family over a single streaming
//! block engine.
//!
//! Every algorithm is a [`BlockTransform`] driven by [`Hasher`], which accepts
//! writes of any size, feeds the transform whole blocks and applies the
//! algorithm's padding on finalization. Finalizing resets the hasher, so an
//! instance can be reused for the next message.
//!
//! The fixed-size hashers also implement the RustCrypto [`digest`] traits.
//!
//! # Example
//! ```
//! use krypto::{keccak, Sha256};
//! use anyhow::Result;
//!
//! fn main() -> Result<()> {
//!   let mut h = Sha256::default();
//!   h.update(b"The quick brown fox ").update(b"jumps over the lazy dog");
//!   println!("Result: {}", h.hex_digest());
//!
//!   let xof = keccak::shake128(b"hello world", 512)?;
//!   println!("Result: {}", hex::encode(&xof));
//!
//!   Ok(())
//! }
//! ```
/// Word rotation and byte-order helpers.
mod bits;
/// `error` holds the crate error type.
mod error;
/// `hasher` is the streaming block engine shared by all algorithms.
pub mod hasher;
/// `keccak` is the Keccak-f[1600] sponge and the SHA-3 family modes.
pub mod keccak;
/// `md5` is the MD5 message digest.
pub mod md5;
/// `sha1` is the SHA-1 message digest.
pub mod sha1;
/// `sha256` is the SHA-256 message digest.
pub mod sha256;

pub use error::Error;
pub use hasher::{BlockTransform, FixedTransform, Hasher};
pub use keccak::{Keccak, KeccakCore};
pub use md5::Md5;
pub use sha1::Sha1;
pub use sha256::Sha256;
