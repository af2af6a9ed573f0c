// Key and payload files
//
// Key file, three decimal lines:
//   num_bits
//   N
//   e (public key) or d (secret key)
// Payload file, one decimal line: the plaintext or ciphertext integer.
//
// A single trailing newline is stripped. Anything else (blank lines,
// spaces, carriage returns, signs, hex) is rejected.

use std::fs;
use std::io::Write;
use std::path::Path;

use log::{debug, warn};
use tempfile::NamedTempFile;
use zeroize::Zeroizing;

use crate::error::{Result, RsaError};
use crate::rsa::bigint::{bit_length, from_decimal, to_decimal, RsaBigInt};
use crate::rsa::keygen::{PublicKey, SecretKey};

/// Parsed key file contents
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeyText {
    pub num_bits: u64,
    pub n: RsaBigInt,
    pub exponent: RsaBigInt,
}

/// Read entire file into memory
pub fn read_file(path: &Path) -> Result<Vec<u8>> {
    fs::read(path).map_err(|e| RsaError::io(path, e))
}

/// Write data to `path` through a temporary file in the same directory,
/// so the destination either keeps its old contents or gets all of `data`
pub fn write_file(path: &Path, data: &[u8]) -> Result<()> {
    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };

    let mut file = NamedTempFile::new_in(dir).map_err(|e| RsaError::io(path, e))?;
    file.write_all(data).map_err(|e| RsaError::io(path, e))?;
    file.as_file().sync_all().map_err(|e| RsaError::io(path, e))?;
    file.persist(path).map_err(|e| RsaError::io(path, e.error))?;

    debug!("wrote {} bytes to {}", data.len(), path.display());
    Ok(())
}

fn strip_newline(text: &str) -> &str {
    text.strip_suffix('\n').unwrap_or(text)
}

fn parse_decimal_line(line: &str, what: &str) -> std::result::Result<RsaBigInt, String> {
    from_decimal(line).ok_or_else(|| format!("{what} is not a decimal integer"))
}

/// Parse the three-line key format
pub fn parse_key_text(text: &str) -> std::result::Result<KeyText, String> {
    let lines: Vec<&str> = strip_newline(text).split('\n').collect();
    if lines.len() != 3 {
        return Err(format!("expected 3 lines, found {}", lines.len()));
    }

    let num_bits = parse_decimal_line(lines[0], "line 1 (num_bits)")?;
    let num_bits = u64::try_from(&num_bits).map_err(|_| "line 1 (num_bits) is out of range".to_string())?;
    let n = parse_decimal_line(lines[1], "line 2 (N)")?;
    let exponent = parse_decimal_line(lines[2], "line 3 (exponent)")?;

    if n < RsaBigInt::from(2u8) {
        return Err("N must be at least 2".to_string());
    }
    // Generated keys have bits(N) in {num_bits - 1, num_bits}
    if num_bits > bit_length(&n) + 1 {
        return Err(format!(
            "num_bits {} does not match a {}-bit modulus",
            num_bits,
            bit_length(&n)
        ));
    }

    Ok(KeyText { num_bits, n, exponent })
}

pub fn format_key_text(num_bits: u64, n: &RsaBigInt, exponent: &RsaBigInt) -> String {
    format!("{}\n{}\n{}\n", num_bits, to_decimal(n), to_decimal(exponent))
}

/// Parse a single-integer payload
pub fn parse_payload_text(text: &str) -> std::result::Result<RsaBigInt, String> {
    let line = strip_newline(text);
    if line.contains('\n') {
        return Err("expected a single line".to_string());
    }
    parse_decimal_line(line, "payload")
}

pub fn format_payload_text(value: &RsaBigInt) -> String {
    format!("{}\n", to_decimal(value))
}

fn read_key_text(path: &Path) -> Result<KeyText> {
    let malformed = |reason: String| RsaError::MalformedKeyFile {
        path: path.to_path_buf(),
        reason,
    };

    let bytes = Zeroizing::new(read_file(path)?);
    let text = std::str::from_utf8(&bytes).map_err(|_| malformed("not UTF-8 text".to_string()))?;
    parse_key_text(text).map_err(malformed)
}

pub fn read_public_key(path: &Path) -> Result<PublicKey> {
    let key = read_key_text(path)?;
    Ok(PublicKey::new(key.n, key.exponent, key.num_bits))
}

pub fn read_secret_key(path: &Path) -> Result<SecretKey> {
    let key = read_key_text(path)?;
    Ok(SecretKey::new(key.n, key.exponent, key.num_bits))
}

pub fn write_public_key(path: &Path, key: &PublicKey) -> Result<()> {
    write_file(path, format_key_text(key.num_bits, &key.n, &key.e).as_bytes())
}

pub fn write_secret_key(path: &Path, key: &SecretKey) -> Result<()> {
    let text = Zeroizing::new(format_key_text(key.num_bits, &key.n, key.d()));
    write_file(path, text.as_bytes())
}

/// Write both key files. If the secret key cannot be written the public
/// key file is removed again.
pub fn write_key_pair(
    public_path: &Path,
    secret_path: &Path,
    public_key: &PublicKey,
    secret_key: &SecretKey,
) -> Result<()> {
    write_public_key(public_path, public_key)?;

    if let Err(e) = write_secret_key(secret_path, secret_key) {
        if let Err(cleanup) = fs::remove_file(public_path) {
            warn!("could not remove {}: {}", public_path.display(), cleanup);
        }
        return Err(e);
    }

    Ok(())
}

pub fn read_payload(path: &Path) -> Result<RsaBigInt> {
    let bytes = Zeroizing::new(read_file(path)?);
    let malformed = |reason: String| RsaError::MalformedPayloadFile {
        path: path.to_path_buf(),
        reason,
    };

    let text = std::str::from_utf8(&bytes).map_err(|_| malformed("not UTF-8 text".to_string()))?;
    parse_payload_text(text).map_err(malformed)
}

pub fn write_payload(path: &Path, value: &RsaBigInt) -> Result<()> {
    let text = Zeroizing::new(format_payload_text(value));
    write_file(path, text.as_bytes())
}
