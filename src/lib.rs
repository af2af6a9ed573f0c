//! Textbook RSA with a randomized `0x02 || r || 0x00 || m` padding.
//!
//! Keys and payloads are plain decimal text (see [`util::file_ops`]). The
//! three tools built on this library are `rsa-keygen`, `rsa-enc` and
//! `rsa-dec`, also available as subcommands of `padded-rsa`.
//!
//! Decryption does not validate padding unless asked to; see
//! [`rsa::CipherConfig`].

pub mod cli;
pub mod error;
pub mod rsa;
pub mod util;

pub use error::{Result, RsaError};
