// Zeroizing owner for transient secret integers (primes, phi(N), nonces,
// padded values)

use std::fmt;
use std::ops::Deref;

use zeroize::{Zeroize, ZeroizeOnDrop};

use super::bigint::RsaBigInt;

/// A big integer whose limbs are cleared in place when it is dropped.
///
/// `BigUint` exposes no mutable access to its digits, so clearing goes bit by
/// bit through `set_bit`, lowest bit first. Each limb is overwritten with zero
/// where it lives, and the final normalization only truncates zero limbs.
/// Temporaries created by arithmetic on the value are not covered.
pub struct Secret(RsaBigInt);

impl Secret {
    pub fn new(value: RsaBigInt) -> Self {
        Secret(value)
    }

    pub fn expose(&self) -> &RsaBigInt {
        &self.0
    }
}

impl Zeroize for Secret {
    fn zeroize(&mut self) {
        clear_in_place(&mut self.0);
    }
}

impl Drop for Secret {
    fn drop(&mut self) {
        self.zeroize();
    }
}

impl ZeroizeOnDrop for Secret {}

impl Deref for Secret {
    type Target = RsaBigInt;

    fn deref(&self) -> &RsaBigInt {
        &self.0
    }
}

impl From<RsaBigInt> for Secret {
    fn from(value: RsaBigInt) -> Self {
        Secret(value)
    }
}

impl fmt::Debug for Secret {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Secret({} bits)", self.0.bits())
    }
}

/// Overwrite every set bit of `n` with zero, leaving `n == 0`
pub(crate) fn clear_in_place(n: &mut RsaBigInt) {
    let bits = n.bits();
    for i in 0..bits {
        if n.bit(i) {
            n.set_bit(i, false);
        }
    }
}
