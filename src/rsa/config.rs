// Configuration records for the cipher and the key generator

/// Checks applied by `encrypt` and `decrypt`.
///
/// The default rejects oversized plaintexts but, like the classic tools,
/// never looks at the padding when decrypting.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct CipherConfig {
    /// Fail with `PlaintextTooLarge` instead of letting the message bleed
    /// into the separator and nonce bits
    pub strict_plaintext: bool,
    /// Require `0x02 || r || 0x00` above the message bits after decryption
    pub verify_padding: bool,
}

impl Default for CipherConfig {
    fn default() -> Self {
        Self {
            strict_plaintext: true,
            verify_padding: false,
        }
    }
}

impl CipherConfig {
    /// Bit-for-bit behaviour of the classic tools: no size check, no
    /// padding check
    pub fn compatible() -> Self {
        Self {
            strict_plaintext: false,
            verify_padding: false,
        }
    }

    pub fn with_strict_plaintext(mut self, strict: bool) -> Self {
        self.strict_plaintext = strict;
        self
    }

    pub fn with_padding_check(mut self, verify: bool) -> Self {
        self.verify_padding = verify;
        self
    }
}

/// Key generation settings
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct KeyGenConfig {
    /// Fresh prime pairs to try when e = 3 is not invertible mod phi(N).
    /// 1 fails on the first non-invertible pair.
    pub max_attempts: u32,
}

impl Default for KeyGenConfig {
    fn default() -> Self {
        Self { max_attempts: 1 }
    }
}

impl KeyGenConfig {
    pub fn with_max_attempts(mut self, attempts: u32) -> Self {
        self.max_attempts = attempts.max(1);
        self
    }
}
