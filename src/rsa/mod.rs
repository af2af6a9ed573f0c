// RSA Module - Main module file
// Key generation and the padded encrypt/decrypt transform

pub mod bigint;
pub mod config;
pub mod decrypt;
pub mod encrypt;
pub mod keygen;
pub mod padding;
pub mod secret;

pub use bigint::RsaBigInt;
pub use config::{CipherConfig, KeyGenConfig};
pub use decrypt::decrypt;
pub use encrypt::{encrypt, encrypt_with_rng};
pub use keygen::{generate_key_pair, generate_key_pair_with, KeyPair, PublicKey, SecretKey, PUBLIC_EXPONENT};
pub use padding::PaddingLayout;
pub use secret::Secret;
