// RSA Key Generation
// Implements RSA key pair generation with the fixed public exponent e = 3

use std::fmt;

use log::{debug, info};
use num_traits::One;
use rand::{thread_rng, CryptoRng, Rng};

use super::bigint::{from_u64, generate_prime, mod_inverse, mul, sub, RsaBigInt};
use super::config::KeyGenConfig;
use super::secret::Secret;
use crate::error::{Result, RsaError};

/// Public exponent shared by every key
pub const PUBLIC_EXPONENT: u64 = 3;

/// RSA Public Key: `{N, e, num_bits}`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PublicKey {
    pub n: RsaBigInt, // Modulus
    pub e: RsaBigInt, // Public exponent
    /// Requested modulus size; drives the padding layout
    pub num_bits: u64,
}

/// RSA Secret Key: `{N, d, num_bits}`. `e` is implicitly 3.
#[derive(Debug)]
pub struct SecretKey {
    pub n: RsaBigInt,
    d: Secret,
    pub num_bits: u64,
}

/// Freshly generated key material. `p` and `q` are wiped when the pair is
/// dropped or split.
#[derive(Debug)]
pub struct KeyPair {
    p: Secret,
    q: Secret,
    pub n: RsaBigInt,
    pub e: RsaBigInt,
    d: Secret,
    pub num_bits: u64,
}

impl PublicKey {
    pub fn new(n: RsaBigInt, e: RsaBigInt, num_bits: u64) -> Self {
        Self { n, e, num_bits }
    }
}

impl SecretKey {
    pub fn new(n: RsaBigInt, d: RsaBigInt, num_bits: u64) -> Self {
        Self {
            n,
            d: Secret::new(d),
            num_bits,
        }
    }

    /// Private exponent
    pub fn d(&self) -> &RsaBigInt {
        self.d.expose()
    }
}

impl KeyPair {
    pub fn p(&self) -> &RsaBigInt {
        self.p.expose()
    }

    pub fn q(&self) -> &RsaBigInt {
        self.q.expose()
    }

    pub fn d(&self) -> &RsaBigInt {
        self.d.expose()
    }

    pub fn public_key(&self) -> PublicKey {
        PublicKey::new(self.n.clone(), self.e.clone(), self.num_bits)
    }

    pub fn secret_key(&self) -> SecretKey {
        SecretKey::new(self.n.clone(), self.d.expose().clone(), self.num_bits)
    }

    /// Project the distributable keys and discard the primes
    pub fn split(self) -> (PublicKey, SecretKey) {
        let public = self.public_key();
        let secret = self.secret_key();
        (public, secret)
    }
}

impl fmt::Display for PublicKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-bit public key (e = {})", self.num_bits, self.e)
    }
}

/// Generate a key pair for a `num_bits` modulus, with no retry
pub fn generate_key_pair(num_bits: u64) -> Result<KeyPair> {
    generate_key_pair_with(num_bits, &KeyGenConfig::default(), &mut thread_rng())
}

/// Generate a key pair, drawing up to `config.max_attempts` prime pairs
///
/// Each attempt:
/// 1. draws `p`, `q` of `num_bits / 2` bits
/// 2. computes `N = p*q` and `phi(N) = (p-1)(q-1)`
/// 3. inverts `e = 3` modulo `phi(N)`
///
/// With the default single attempt, step 3 fails whenever either prime is
/// 1 mod 3, which happens for roughly three pairs in four.
pub fn generate_key_pair_with<R>(num_bits: u64, config: &KeyGenConfig, rng: &mut R) -> Result<KeyPair>
where
    R: Rng + CryptoRng + ?Sized,
{
    let half_bits = num_bits / 2;
    if half_bits < 2 {
        return Err(RsaError::InvalidBitLength {
            num_bits,
            reason: "each prime needs at least 2 bits",
        });
    }

    let attempts = config.max_attempts.max(1);
    for attempt in 1..=attempts {
        let p = Secret::new(generate_prime(half_bits, rng));
        let q = Secret::new(generate_prime(half_bits, rng));

        match key_pair_from_primes(p, q, num_bits) {
            Some(pair) => {
                info!("generated {num_bits}-bit key pair on attempt {attempt}");
                return Ok(pair);
            }
            None => debug!("e = {PUBLIC_EXPONENT} not invertible mod phi(N), attempt {attempt}/{attempts}"),
        }
    }

    Err(RsaError::KeyGenerationFailed { attempts })
}

/// Assemble a key pair from two primes; `None` when `e` has no inverse
/// modulo `phi(N)` (or a prime is 0)
pub(crate) fn key_pair_from_primes(p: Secret, q: Secret, num_bits: u64) -> Option<KeyPair> {
    let one = RsaBigInt::one();
    let n = mul(p.expose(), q.expose());
    let p_1 = Secret::new(sub(p.expose(), &one)?);
    let q_1 = Secret::new(sub(q.expose(), &one)?);
    let phi_n = Secret::new(mul(p_1.expose(), q_1.expose()));

    let e = from_u64(PUBLIC_EXPONENT);
    let d = Secret::new(mod_inverse(&e, &phi_n)?);

    Some(KeyPair {
        p,
        q,
        n,
        e,
        d,
        num_bits,
    })
}
