// Utilities: key and payload file I/O

pub mod file_ops;

pub use file_ops::{
    read_payload, read_public_key, read_secret_key, write_key_pair, write_payload, KeyText,
};
