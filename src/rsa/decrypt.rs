// RSA Decryption Implementation
// m = (c^d mod N) masked to its lowest num_bits/2 - 24 bits
//
// Known weakness: with the default configuration nothing above the message
// field is checked. Any integer decrypts to some plaintext, so a tampered
// or forged ciphertext is never detected. Enable
// `CipherConfig::verify_padding` to reject values that do not carry
// `0x02 || r || 0x00`.

use super::bigint::{mod_exp, RsaBigInt};
use super::config::CipherConfig;
use super::keygen::SecretKey;
use super::padding::{unpad, verify_padding, PaddingLayout};
use super::secret::Secret;
use crate::error::Result;

/// Decrypt the integer `c` with `secret_key`
pub fn decrypt(c: &RsaBigInt, secret_key: &SecretKey, config: &CipherConfig) -> Result<RsaBigInt> {
    let layout = PaddingLayout::new(secret_key.num_bits)?;

    let enc = Secret::new(mod_exp(c, secret_key.d(), &secret_key.n));
    if config.verify_padding {
        verify_padding(&enc, &layout)?;
    }

    Ok(unpad(&enc, &layout))
}
