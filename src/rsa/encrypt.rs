// RSA Encryption Implementation
// c = pad(m)^e mod N

use log::debug;
use rand::{thread_rng, CryptoRng, Rng};

use super::bigint::{bit_length, mod_exp, RsaBigInt};
use super::config::CipherConfig;
use super::keygen::PublicKey;
use super::padding::{pad, PaddingLayout};
use crate::error::{Result, RsaError};

/// Encrypt the integer `m` under `public_key`
pub fn encrypt(m: &RsaBigInt, public_key: &PublicKey, config: &CipherConfig) -> Result<RsaBigInt> {
    encrypt_with_rng(m, public_key, config, &mut thread_rng())
}

/// Encrypt with an explicit randomness source for the padding nonce
pub fn encrypt_with_rng<R>(
    m: &RsaBigInt,
    public_key: &PublicKey,
    config: &CipherConfig,
    rng: &mut R,
) -> Result<RsaBigInt>
where
    R: Rng + CryptoRng + ?Sized,
{
    let layout = PaddingLayout::new(public_key.num_bits)?;

    if !layout.fits(m) {
        if config.strict_plaintext {
            return Err(RsaError::PlaintextTooLarge {
                bits: bit_length(m),
                max_bits: layout.m_bits,
            });
        }
        debug!(
            "plaintext of {} bits exceeds the {}-bit message field, encoding anyway",
            bit_length(m),
            layout.m_bits
        );
    }

    let enc = pad(m, &layout, rng);
    Ok(mod_exp(&enc, &public_key.e, &public_key.n))
}
