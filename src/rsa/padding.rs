// Randomized padding
// Padded value, most significant field first:
//   0x02 (8 bits) || r (num_bits/2 bits) || 0x00 (8 bits) || m (num_bits/2 - 24 bits)
// r is a fresh nonce with no zero byte. The fields are joined with big
// integer shifts and additions, never byte-aligned copies.

use log::debug;
use num_bigint::BigUint;
use num_traits::{ToPrimitive, Zero};
use rand::{CryptoRng, Rng};
use zeroize::Zeroizing;

use super::bigint::{bit_length, mask_low_bits, random_bits, shift_left, to_bytes_fixed, RsaBigInt};
use super::secret::Secret;
use crate::error::{Result, RsaError};

/// Leading marker byte
pub const MARKER: u8 = 0x02;
/// Byte between the nonce and the message
pub const SEPARATOR: u8 = 0x00;
/// Bits of `num_bits / 2` not available to the message
pub const OVERHEAD_BITS: u64 = 24;

/// Field widths for one modulus size
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PaddingLayout {
    pub num_bits: u64,
    /// Nonce width, `num_bits / 2`
    pub r_bits: u64,
    /// Message width, `num_bits / 2 - 24`
    pub m_bits: u64,
}

impl PaddingLayout {
    pub fn new(num_bits: u64) -> Result<Self> {
        let r_bits = num_bits / 2;
        if r_bits <= OVERHEAD_BITS {
            return Err(RsaError::InvalidBitLength {
                num_bits,
                reason: "num_bits / 2 must exceed 24 to leave room for a message",
            });
        }

        Ok(Self {
            num_bits,
            r_bits,
            m_bits: r_bits - OVERHEAD_BITS,
        })
    }

    /// Width of the whole padded field, marker byte included
    pub fn padded_bits(&self) -> u64 {
        8 + self.r_bits + 8 + self.m_bits
    }

    /// Whether `m` fits the message field
    pub fn fits(&self, m: &RsaBigInt) -> bool {
        bit_length(m) <= self.m_bits
    }
}

/// Draw a nonce of exactly `r_bits` bits whose big-endian bytes are all
/// non-zero, redrawing until one is found
pub fn generate_nonce<R>(layout: &PaddingLayout, rng: &mut R) -> Secret
where
    R: Rng + CryptoRng + ?Sized,
{
    let mut draws = 0u32;
    loop {
        draws += 1;
        let r = Secret::new(random_bits(layout.r_bits, rng));
        let bytes = Zeroizing::new(to_bytes_fixed(&r, layout.r_bits));
        if !bytes.contains(&0) {
            debug!("nonce accepted after {draws} draw(s)");
            return r;
        }
    }
}

/// Build the padded value for `m`.
///
/// `m` is added into the low field unchecked. A message wider than
/// `m_bits` carries into the separator and nonce; callers wanting a hard
/// failure check `PaddingLayout::fits` first.
pub fn pad<R>(m: &RsaBigInt, layout: &PaddingLayout, rng: &mut R) -> Secret
where
    R: Rng + CryptoRng + ?Sized,
{
    let r = generate_nonce(layout, rng);

    let marker_and_nonce = Secret::new(shift_left(&BigUint::from(MARKER), layout.r_bits) + r.expose());
    let with_separator = Secret::new(shift_left(&marker_and_nonce, 8) + BigUint::from(SEPARATOR));
    Secret::new(shift_left(&with_separator, layout.m_bits) + m)
}

/// Recover the message field: the lowest `m_bits` bits. The discarded high
/// bits are not inspected.
pub fn unpad(enc: &RsaBigInt, layout: &PaddingLayout) -> RsaBigInt {
    mask_low_bits(enc, layout.m_bits)
}

/// Check that the bits above the message field read `0x02 || r || 0x00`
/// with `r` a full-width nonce free of zero bytes
pub fn verify_padding(enc: &RsaBigInt, layout: &PaddingLayout) -> Result<()> {
    let high = Secret::new(enc >> layout.m_bits as usize);

    let separator = (high.expose() & &BigUint::from(0xffu8)).to_u8().unwrap_or(u8::MAX);
    if separator != SEPARATOR {
        return Err(RsaError::InvalidPadding(format!("separator byte is {separator:#04x}")));
    }

    let marker_and_nonce = Secret::new(high.expose() >> 8usize);
    let marker = marker_and_nonce.expose() >> layout.r_bits as usize;
    if marker != BigUint::from(MARKER) {
        return Err(RsaError::InvalidPadding(if marker.is_zero() {
            "marker byte missing".to_string()
        } else {
            format!("marker field is {marker:#x}")
        }));
    }

    let r = Secret::new(mask_low_bits(&marker_and_nonce, layout.r_bits));
    if bit_length(&r) != layout.r_bits {
        return Err(RsaError::InvalidPadding("nonce is shorter than its field".to_string()));
    }
    let bytes = Zeroizing::new(to_bytes_fixed(&r, layout.r_bits));
    if bytes.contains(&0) {
        return Err(RsaError::InvalidPadding("nonce contains a zero byte".to_string()));
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rsa::bigint::{from_u64, to_bytes};
    use num_bigint::RandBigInt;
    use rand::rngs::StdRng;
    use rand::{thread_rng, SeedableRng};

    #[test]
    fn test_layout() {
        let layout = PaddingLayout::new(512).unwrap();
        assert_eq!(layout.r_bits, 256);
        assert_eq!(layout.m_bits, 232);
        assert_eq!(layout.padded_bits(), 504);

        let odd = PaddingLayout::new(1025).unwrap();
        assert_eq!(odd.r_bits, 512);
        assert_eq!(odd.m_bits, 488);
    }

    #[test]
    fn test_layout_too_small() {
        assert!(PaddingLayout::new(48).is_err());
        assert!(PaddingLayout::new(49).is_err());
        assert_eq!(PaddingLayout::new(50).unwrap().m_bits, 1);
    }

    #[test]
    fn test_nonce_has_no_zero_byte() {
        let mut rng = thread_rng();
        // 60-bit nonces: 8 bytes, top byte partial
        for num_bits in [120u64, 512] {
            let layout = PaddingLayout::new(num_bits).unwrap();
            for _ in 0..200 {
                let r = generate_nonce(&layout, &mut rng);
                assert_eq!(r.bits(), layout.r_bits);
                assert!(!to_bytes(&r).contains(&0));
            }
        }
    }

    #[test]
    fn test_pad_structure() {
        let layout = PaddingLayout::new(512).unwrap();
        let m = from_u64(12345);
        let enc = pad(&m, &layout, &mut thread_rng());

        // 0x02 contributes 2 significant bits to an 8-bit field
        assert_eq!(enc.bits(), layout.padded_bits() - 6);
        assert!(enc.bits() < 511);

        assert_eq!(unpad(&enc, &layout), m);
        let separator = (enc.expose() >> layout.m_bits as usize) & BigUint::from(0xffu8);
        assert!(separator.is_zero());
        let marker = enc.expose() >> (layout.m_bits + 8 + layout.r_bits) as usize;
        assert_eq!(marker, from_u64(2));
        verify_padding(&enc, &layout).unwrap();
    }

    #[test]
    fn test_pad_randomized() {
        let layout = PaddingLayout::new(256).unwrap();
        let m = from_u64(7);
        let mut rng = thread_rng();
        let a = pad(&m, &layout, &mut rng);
        let b = pad(&m, &layout, &mut rng);
        assert_ne!(a.expose(), b.expose());
        assert_eq!(unpad(&a, &layout), unpad(&b, &layout));
    }

    #[test]
    fn test_pad_deterministic_for_seed() {
        let layout = PaddingLayout::new(256).unwrap();
        let m = from_u64(99);
        let a = pad(&m, &layout, &mut StdRng::seed_from_u64(3));
        let b = pad(&m, &layout, &mut StdRng::seed_from_u64(3));
        assert_eq!(a.expose(), b.expose());
    }

    #[test]
    fn test_oversized_message_bleeds_into_padding() {
        let layout = PaddingLayout::new(128).unwrap();
        let m = from_u64(1) << layout.m_bits as usize; // one bit too wide
        assert!(!layout.fits(&m));

        let enc = pad(&m, &layout, &mut thread_rng());
        assert_eq!(unpad(&enc, &layout), from_u64(0));
        assert!(verify_padding(&enc, &layout).is_err());
    }

    #[test]
    fn test_verify_padding_rejects_garbage() {
        let layout = PaddingLayout::new(512).unwrap();
        assert!(verify_padding(&from_u64(1), &layout).is_err());

        let mut random = thread_rng().gen_biguint(500);
        random.set_bit(layout.m_bits, true);
        assert!(matches!(
            verify_padding(&random, &layout),
            Err(RsaError::InvalidPadding(_))
        ));
    }
}
