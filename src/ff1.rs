//! FF1 format-preserving encryption (NIST SP 800-38G rev. 1, §6.1).
//!
//! FF1 is a ten-round Feistel network over numeral strings. Each round
//! derives its constant from an AES-CBC-MAC over a structured framing of
//! the radix, text length, tweak, and the current right half.
//!
//! Properties:
//! - Ciphertext has the same length and alphabet as the plaintext
//! - Tweaks may be any length within the bounds chosen at construction
//! - Deterministic: no nonce, no authentication

use num_bigint::{BigInt, Sign};
use num_integer::Integer;

use crate::common::{Direction, Error, BLOCK_LENGTH};
use crate::ffx::{bigint_to_chars, chars_to_bigint, fill_bytes_be, Ffx};

/// FF1 context.
///
/// Immutable after construction; a single context may be used for any
/// number of concurrent encrypt/decrypt calls.
pub struct FF1 {
    ffx: Ffx,
}

impl FF1 {
    /// Create an FF1 context.
    ///
    /// # Arguments
    /// * `key` - AES key; the length (16, 24, or 32 bytes) selects the variant
    /// * `twk` - default tweak, used by calls that do not supply one
    /// * `min_twk` / `max_twk` - bounds on tweak lengths; both 0 means unbounded
    /// * `radix` - radix of the input/output data
    /// * `alpha` - optional alphabet; its prefix of length `radix` is used,
    ///   falling back to the canonical 62-symbol alphabet
    ///
    /// # Errors
    /// Returns a configuration error for a bad key length, radix,
    /// alphabet, or tweak bound combination.
    pub fn new(
        key: &[u8],
        twk: Option<&[u8]>,
        min_twk: usize,
        max_twk: usize,
        radix: usize,
        alpha: Option<&str>,
    ) -> Result<Self, Error> {
        // the maximum text length for FF1 is fixed by the algorithm at 2**32
        Ok(FF1 {
            ffx: Ffx::new(key, twk, 1u64 << 32, min_twk, max_twk, radix, alpha)?,
        })
    }

    /// Encryption and decryption share this routine; the direction decides
    /// the round-constant order and the sign of the half update.
    fn cipher(&self, x: &[char], twk: Option<&[u8]>, dir: Direction) -> Result<Vec<char>, Error> {
        let alpha = self.ffx.alphabet();
        let radix = alpha.len();

        let n = x.len();
        let u = n / 2;
        let v = n - u;

        self.ffx.validate_text_length(n)?;
        let t = self.ffx.tweak_or_default(twk);
        self.ffx.validate_tweak_length(t.len())?;

        let b = ((((radix as f64).log2() * v as f64).ceil() as usize) + 7) / 8;
        let d = 4 * ((b + 3) / 4) + 4;

        // P and Q are populated separately but fed to the prf as a single
        // message, so they share one allocation with Q as the tail
        let mut p = vec![0u8; 16 + (t.len() + b + 1).div_ceil(16) * 16];
        let mut r = vec![0u8; d.div_ceil(16) * 16];

        p[0] = 1;
        p[1] = 2;
        // the radix occupies bytes 3..6 as a 24-bit big-endian value;
        // writing it as 32 bits and then placing the fixed 0x01 over
        // byte 2 lands the same bytes
        p[2..6].copy_from_slice(&(radix as u32).to_be_bytes());
        p[2] = 1;
        p[6] = 10;
        p[7] = u as u8;
        p[8..12].copy_from_slice(&(n as u32).to_be_bytes());
        p[12..16].copy_from_slice(&(t.len() as u32).to_be_bytes());
        p[16..16 + t.len()].copy_from_slice(t);

        let big_radix = BigInt::from(radix);
        let mut m_u = big_radix.pow(u as u32);
        let mut m_v = m_u.clone();
        if u != v {
            m_v *= &big_radix;
        }

        let mut n_a = chars_to_bigint(alpha, &x[..u])?;
        let mut n_b = chars_to_bigint(alpha, &x[u..])?;
        if let Direction::Decrypt = dir {
            core::mem::swap(&mut n_a, &mut n_b);
            core::mem::swap(&mut m_u, &mut m_v);
        }

        for i in 0..10usize {
            let round = p.len() - b - 1;
            p[round] = match dir {
                Direction::Encrypt => i as u8,
                Direction::Decrypt => (9 - i) as u8,
            };
            let tail = p.len() - b;
            fill_bytes_be(&n_b, &mut p[tail..]);

            let r0 = self.ffx.prf(&p);
            r[..BLOCK_LENGTH].copy_from_slice(&r0);

            // when more than 16 bytes are needed, the 2nd and subsequent
            // blocks are ciph(r0 ^ 1), ciph(r0 ^ 2), ...
            for j in 1..r.len() / BLOCK_LENGTH {
                let mut blk = r0;
                let w = u32::from_be_bytes(blk[12..16].try_into().unwrap());
                blk[12..16].copy_from_slice(&(w ^ j as u32).to_be_bytes());
                r[j * BLOCK_LENGTH..(j + 1) * BLOCK_LENGTH].copy_from_slice(&self.ffx.ciph(&blk));
            }

            // the round constant is the integer held in the first d bytes
            let y = BigInt::from_bytes_be(Sign::Plus, &r[..d]);
            match dir {
                Direction::Encrypt => n_a += y,
                Direction::Decrypt => n_a -= y,
            }

            core::mem::swap(&mut n_a, &mut n_b);
            n_b = n_b.mod_floor(&m_u);
            core::mem::swap(&mut m_u, &mut m_v);
        }

        if let Direction::Decrypt = dir {
            core::mem::swap(&mut n_a, &mut n_b);
        }

        let mut out = bigint_to_chars(alpha, &n_a, u);
        out.extend(bigint_to_chars(alpha, &n_b, v));
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
