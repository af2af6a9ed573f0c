// RSA Big Integer Operations
// Wrapper around num-bigint for the operations the padded RSA engine needs

use num_bigint::{BigInt, BigUint, RandBigInt};
use num_integer::Integer;
use num_traits::{CheckedSub, One, Zero};
use rand::{CryptoRng, Rng};

/// RSA Big Integer type alias
pub type RsaBigInt = BigUint;

/// Miller-Rabin rounds used by `generate_prime`; error bound 4^-40
pub const MILLER_RABIN_ROUNDS: u32 = 40;

// Odd primes below 256, used to sieve candidates before Miller-Rabin
const SMALL_PRIMES: [u32; 53] = [
    3, 5, 7, 11, 13, 17, 19, 23, 29, 31, 37, 41, 43, 47, 53, 59, 61, 67, 71, 73, 79, 83, 89, 97,
    101, 103, 107, 109, 113, 127, 131, 137, 139, 149, 151, 157, 163, 167, 173, 179, 181, 191, 193,
    197, 199, 211, 223, 227, 229, 233, 239, 241, 251,
];

/// Create a big integer from u64
pub fn from_u64(n: u64) -> RsaBigInt {
    RsaBigInt::from(n)
}

/// Create a big integer from bytes (big-endian)
pub fn from_bytes(bytes: &[u8]) -> RsaBigInt {
    RsaBigInt::from_bytes_be(bytes)
}

/// Convert big integer to bytes (big-endian, minimal length)
pub fn to_bytes(n: &RsaBigInt) -> Vec<u8> {
    n.to_bytes_be()
}

/// Big-endian bytes left-padded with zeros to hold `bit_length` bits.
/// Values wider than that are returned unpadded.
pub fn to_bytes_fixed(n: &RsaBigInt, bit_length: u64) -> Vec<u8> {
    let width = bit_length.div_ceil(8) as usize;
    let bytes = n.to_bytes_be();
    if bytes.len() >= width {
        return bytes;
    }
    let mut out = vec![0u8; width - bytes.len()];
    out.extend_from_slice(&bytes);
    out
}

pub fn add(a: &RsaBigInt, b: &RsaBigInt) -> RsaBigInt {
    a + b
}

/// `a - b`, or `None` when the result would be negative
pub fn sub(a: &RsaBigInt, b: &RsaBigInt) -> Option<RsaBigInt> {
    a.checked_sub(b)
}

pub fn mul(a: &RsaBigInt, b: &RsaBigInt) -> RsaBigInt {
    a * b
}

/// Number of significant bits; zero has bit length 0
pub fn bit_length(n: &RsaBigInt) -> u64 {
    n.bits()
}

/// `n << bits`
pub fn shift_left(n: &RsaBigInt, bits: u64) -> RsaBigInt {
    n << bits as usize
}

/// Keep only the `bits` least significant bits of `n`
pub fn mask_low_bits(n: &RsaBigInt, bits: u64) -> RsaBigInt {
    if n.bits() <= bits {
        return n.clone();
    }
    let mask = (RsaBigInt::one() << bits as usize) - 1u8;
    n & &mask
}

/// `base^exp mod modulus`, scanning the exponent from its top bit down
/// (square, then multiply on a set bit).
///
/// Total over all inputs: a modulus of 0 or 1 yields 0.
pub fn mod_exp(base: &RsaBigInt, exp: &RsaBigInt, modulus: &RsaBigInt) -> RsaBigInt {
    if modulus <= &RsaBigInt::one() {
        return RsaBigInt::zero();
    }

    let base = base % modulus;
    let mut acc = RsaBigInt::one();
    for i in (0..exp.bits()).rev() {
        acc = &acc * &acc % modulus;
        if exp.bit(i) {
            acc = &acc * &base % modulus;
        }
    }
    acc
}

/// Extended Euclidean Algorithm
/// Returns (gcd, x, y) such that a*x + b*y = gcd = gcd(a, b)
pub fn extended_gcd(a: &RsaBigInt, b: &RsaBigInt) -> (RsaBigInt, BigInt, BigInt) {
    let (mut old_r, mut r) = (BigInt::from(a.clone()), BigInt::from(b.clone()));
    let (mut old_s, mut s) = (BigInt::one(), BigInt::zero());
    let (mut old_t, mut t) = (BigInt::zero(), BigInt::one());

    while !r.is_zero() {
        let quotient = &old_r / &r;

        let next_r = &old_r - &quotient * &r;
        old_r = std::mem::replace(&mut r, next_r);

        let next_s = &old_s - &quotient * &s;
        old_s = std::mem::replace(&mut s, next_s);

        let next_t = &old_t - &quotient * &t;
        old_t = std::mem::replace(&mut t, next_t);
    }

    // old_r is never negative: both inputs are
    let gcd = old_r.to_biguint().unwrap_or_default();
    (gcd, old_s, old_t)
}

/// Compute modular inverse: a^(-1) mod m
/// Returns None if inverse doesn't exist
pub fn mod_inverse(a: &RsaBigInt, m: &RsaBigInt) -> Option<RsaBigInt> {
    if m.is_zero() {
        return None;
    }

    let (gcd, x, _) = extended_gcd(a, m);
    if !gcd.is_one() {
        return None;
    }

    // mod_floor with a positive modulus lands in [0, m)
    x.mod_floor(&BigInt::from(m.clone())).to_biguint()
}

/// Miller-Rabin primality test, preceded by trial division
/// Returns true if n is probably prime
pub fn is_probable_prime<R>(n: &RsaBigInt, rounds: u32, rng: &mut R) -> bool
where
    R: Rng + CryptoRng + ?Sized,
{
    let two = RsaBigInt::from(2u8);
    if n < &two {
        return false;
    }
    if n == &two {
        return true;
    }
    if n.is_even() {
        return false;
    }

    for &p in SMALL_PRIMES.iter() {
        let p = RsaBigInt::from(p);
        if n == &p {
            return true;
        }
        if (n % &p).is_zero() {
            return false;
        }
    }
    // No factor below 256 and below 256^2 means prime
    if n.bits() <= 16 {
        return true;
    }

    // Write n-1 as d * 2^s with d odd
    let n_minus_one = n - 1u8;
    let s = n_minus_one.trailing_zeros().unwrap_or(0);
    let d = &n_minus_one >> s as usize;

    // Witness loop
    for _ in 0..rounds {
        // Pick random witness a in [2, n-2]
        let a = rng.gen_biguint_range(&two, &n_minus_one);

        let mut x = mod_exp(&a, &d, n);
        if x.is_one() || x == n_minus_one {
            continue;
        }

        let mut witness_passed = false;
        for _ in 1..s {
            x = (&x * &x) % n;
            if x == n_minus_one {
                witness_passed = true;
                break;
            }
        }

        if !witness_passed {
            // Composite
            return false;
        }
    }

    // Probably prime
    true
}

/// Uniform random integer of exactly `bit_length` bits (top bit set).
/// `bit_length` must be at least 1.
pub fn random_bits<R>(bit_length: u64, rng: &mut R) -> RsaBigInt
where
    R: Rng + CryptoRng + ?Sized,
{
    debug_assert!(bit_length >= 1);
    let mut n = rng.gen_biguint(bit_length);
    n.set_bit(bit_length - 1, true);
    n
}

/// Generate a random prime of exactly `bit_length` bits.
/// `bit_length` must be at least 2.
pub fn generate_prime<R>(bit_length: u64, rng: &mut R) -> RsaBigInt
where
    R: Rng + CryptoRng + ?Sized,
{
    debug_assert!(bit_length >= 2);
    let mut candidates = 0u64;

    loop {
        candidates += 1;
        let mut prime = random_bits(bit_length, rng);

        // Make it odd; setting bit 0 keeps the top bit and the width
        prime.set_bit(0, true);

        if is_probable_prime(&prime, MILLER_RABIN_ROUNDS, rng) {
            log::debug!("found {bit_length}-bit prime after {candidates} candidate(s)");
            return prime;
        }
    }
}

/// Decimal text of `n`
pub fn to_decimal(n: &RsaBigInt) -> String {
    n.to_str_radix(10)
}

/// Parse a non-empty run of ASCII digits. Signs, separators and
/// whitespace are rejected.
pub fn from_decimal(text: &str) -> Option<RsaBigInt> {
    if text.is_empty() || !text.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    RsaBigInt::parse_bytes(text.as_bytes(), 10)
}
