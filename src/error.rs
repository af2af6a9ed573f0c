// Error types shared by the RSA engine, the key/value codec and the tools

use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Everything that can stop a keygen, encrypt or decrypt run
#[derive(Debug, Error)]
pub enum RsaError {
    #[error("{0} options are required")]
    MissingArgument(String),

    #[error("malformed key file {}: {reason}", .path.display())]
    MalformedKeyFile { path: PathBuf, reason: String },

    #[error("malformed payload file {}: {reason}", .path.display())]
    MalformedPayloadFile { path: PathBuf, reason: String },

    /// `e` has no inverse modulo φ(N) for every pair of primes drawn
    #[error("key generation failed: e is not invertible modulo phi(N) after {attempts} attempt(s)")]
    KeyGenerationFailed { attempts: u32 },

    #[error("plaintext too large: {bits} bits, at most {max_bits} bits fit the padding")]
    PlaintextTooLarge { bits: u64, max_bits: u64 },

    #[error("invalid modulus size {num_bits}: {reason}")]
    InvalidBitLength { num_bits: u64, reason: &'static str },

    /// Only raised when padding verification is switched on
    #[error("invalid padding: {0}")]
    InvalidPadding(String),

    #[error("I/O error on {}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

impl RsaError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: io::Error) -> Self {
        RsaError::Io {
            path: path.into(),
            source,
        }
    }
}

/// Result type for the RSA engine and codec
pub type Result<T> = std::result::Result<T, RsaError>;
