//! FF3-1 format-preserving encryption (NIST SP 800-38G rev. 1, §6.2).
//!
//! FF3-1 is an eight-round Feistel network over numeral strings with a
//! fixed 7-byte tweak. AES is keyed with the byte-reversed user key, each
//! half is interpreted with its numerals reversed, and the single-block
//! round function is applied to a byte-reversed block.
//!
//! Properties:
//! - Ciphertext has the same length and alphabet as the plaintext
//! - The tweak is exactly 7 bytes, split into two 4-byte round words
//! - Deterministic: no nonce, no authentication

use num_bigint::{BigInt, Sign};
use num_integer::Integer;

use crate::common::{Direction, Error, BLOCK_LENGTH};
use crate::ffx::{bigint_to_chars, chars_to_bigint, fill_bytes_be, Ffx};

/// FF3-1 context.
///
/// Immutable after construction; a single context may be used for any
/// number of concurrent encrypt/decrypt calls.
#[allow(non_camel_case_types)]
pub struct FF3_1 {
    ffx: Ffx,
}

impl FF3_1 {
    /// Create an FF3-1 context.
    ///
    /// # Arguments
    /// * `key` - AES key; the length (16, 24, or 32 bytes) selects the variant
    /// * `twk` - default tweak, used by calls that do not supply one; must
    ///   be exactly 7 bytes
    /// * `radix` - radix of the input/output data
    /// * `alpha` - optional alphabet; its prefix of length `radix` is used,
    ///   falling back to the canonical 62-symbol alphabet
    ///
    /// # Errors
    /// Returns a configuration error for a bad key length, radix,
    /// alphabet, or default tweak length.
    pub fn new(
        key: &[u8],
        twk: Option<&[u8]>,
        radix: usize,
        alpha: Option<&str>,
    ) -> Result<Self, Error> {
        // ff3-1 keys aes with the byte-reversed user key
        let mut k = key.to_vec();
        k.reverse();

        // maximum text length:
        //   2 * log_radix(2**96) = 192 / log2(radix)
        let max_txt = (192f64 / (radix as f64).log2()).floor() as u64;

        Ok(FF3_1 {
            ffx: Ffx::new(&k, twk, max_txt, 7, 7, radix, alpha)?,
        })
    }

    /// Encryption and decryption share this routine; the direction decides
    /// the round-constant order, the tweak-word order, and the sign of the
    /// half update.
    fn cipher(&self, x: &[char], twk: Option<&[u8]>, dir: Direction) -> Result<Vec<char>, Error> {
        let alpha = self.ffx.alphabet();
        let radix = alpha.len();

        let n = x.len();
        let v = n / 2;
        let u = n - v;

        self.ffx.validate_text_length(n)?;
        let t = self.ffx.tweak_or_default(twk);
        self.ffx.validate_tweak_length(t.len())?;

        // split the 7-byte tweak into two 4-byte round words
        let mut tw = [[0u8; 4]; 2];
        tw[0][..3].copy_from_slice(&t[..3]);
        tw[0][3] = t[3] & 0xf0;
        tw[1][..3].copy_from_slice(&t[4..7]);
        tw[1][3] = (t[3] & 0x0f) << 4;

        let big_radix = BigInt::from(radix);
        let mut m_v = big_radix.pow(v as u32);
        let mut m_u = m_v.clone();
        if u != v {
            m_u *= &big_radix;
        }

        // each half is interpreted with its numerals reversed
        let mut rev = x[..u].to_vec();
        rev.reverse();
        let mut a = chars_to_bigint(alpha, &rev)?;
        let mut rev = x[u..].to_vec();
        rev.reverse();
        let mut b = chars_to_bigint(alpha, &rev)?;

        if let Direction::Decrypt = dir {
            core::mem::swap(&mut a, &mut b);
            core::mem::swap(&mut m_u, &mut m_v);
            tw.swap(0, 1);
        }

        for i in 0..8u8 {
            let mut p = [0u8; BLOCK_LENGTH];
            p[..4].copy_from_slice(&tw[(i as usize + 1) % 2]);
            p[3] ^= match dir {
                Direction::Encrypt => i,
                Direction::Decrypt => 7 - i,
            };
            fill_bytes_be(&b, &mut p[4..16]);

            p.reverse();
            let mut q = self.ffx.ciph(&p);
            q.reverse();

            let y = BigInt::from_bytes_be(Sign::Plus, &q);
            let c = match dir {
                Direction::Encrypt => a + y,
                Direction::Decrypt => a - y,
            };

            a = b;
            b = c.mod_floor(&m_u);
            core::mem::swap(&mut m_u, &mut m_v);
        }

        if let Direction::Decrypt = dir {
            core::mem::swap(&mut a, &mut b);
        }

        let mut out = bigint_to_chars(alpha, &a, u);
        out.reverse();
        let mut tail = bigint_to_chars(alpha, &b, v);
        tail.reverse();
        out.append(&mut tail);
        Ok(out)
    }

    /// Encrypt a pre-decoded numeral string.
    ///
    /// A `twk` of `None` uses the default tweak bound at construction.
    pub fn encrypt_chars(&self, x: &[char], twk: Option<&[u8]>) -> Result<Vec<char>, Error> {
        self.cipher(x, twk, Direction::Encrypt)
    }

    /// Decrypt a pre-decoded numeral string.
    pub fn decrypt_chars(&self, x: &[char], twk: Option<&[u8]>) -> Result<Vec<char>, Error> {
        self.cipher(x, twk, Direction::Decrypt)
    }

    /// Encrypt a string.
    ///
    /// A `twk` of `None` uses the default tweak bound at construction.
    pub fn encrypt(&self, x: &str, twk: Option<&[u8]>) -> Result<String, Error> {
        let x: Vec<char> = x.chars().collect();
        Ok(self.encrypt_chars(&x, twk)?.into_iter().collect())
    }

    /// Decrypt a string.
    pub fn decrypt(&self, x: &str, twk: Option<&[u8]>) -> Result<String, Error> {
        let x: Vec<char> = x.chars().collect();
        Ok(self.decrypt_chars(&x, twk)?.into_iter().collect())
    }
}
