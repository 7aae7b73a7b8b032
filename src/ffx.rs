//! Shared FFX substrate underneath FF1 and FF3-1.
//!
//! Holds the keyed AES cipher and the alphabet, enforces the tweak and
//! text length bounds, and converts between numeral strings over the
//! alphabet and arbitrary-precision integers. The construction is
//! immutable; encrypt/decrypt calls on top of it keep all scratch state
//! on the call stack so a single context can serve many threads.

use num_bigint::{BigInt, BigUint};
use num_integer::Integer;
use num_traits::{ToPrimitive, Zero};

use crate::alphabet::{Alphabet, DEFAULT_ALPHABET};
use crate::common::{xor_block, AesCipher, Error, BLOCK_LENGTH};

/// Common context for the FPE algorithms.
pub(crate) struct Ffx {
    cipher: AesCipher,
    alphabet: Alphabet,
    min_txt: usize,
    max_txt: u64,
    min_twk: usize,
    max_twk: usize,
    twk: Vec<u8>,
}

impl Ffx {
    /// Build a context. `min_txt` is not supplied as it is determined by
    /// the radix. A `max_twk` of 0 means the tweak length is unbounded
    /// above.
    pub fn new(
        key: &[u8],
        twk: Option<&[u8]>,
        max_txt: u64,
        min_twk: usize,
        max_twk: usize,
        radix: usize,
        alpha: Option<&str>,
    ) -> Result<Self, Error> {
        let source = alpha.unwrap_or(DEFAULT_ALPHABET);
        if radix < 2 || radix > source.chars().count() {
            return Err(Error::UnsupportedRadix);
        }
        let prefix: String = source.chars().take(radix).collect();
        let alphabet = Alphabet::new(&prefix)?;

        // for both ff1 and ff3-1: radix**min_txt >= 1000000
        //
        // therefore:
        //   min_txt = ceil(log_radix(1000000))
        //           = ceil(6 / log_10(radix))
        let min_txt = (6f64 / (radix as f64).log10()).ceil() as usize;
        if min_txt < 2 || min_txt as u64 > max_txt {
            return Err(Error::UnsupportedRadixLengthCombination);
        }

        // the default tweak is never absent; an omitted one is stored as
        // an empty slice
        let twk = twk.unwrap_or(&[]).to_vec();
        if min_twk > max_twk || twk.len() < min_twk || (max_twk > 0 && twk.len() > max_twk) {
            return Err(Error::InvalidTweakLength);
        }

        let cipher = AesCipher::new(key)?;

        Ok(Ffx {
            cipher,
            alphabet,
            min_txt,
            max_txt,
            min_twk,
            max_twk,
            twk,
        })
    }

    pub fn alphabet(&self) -> &Alphabet {
        &self.alphabet
    }

    /// Resolve a per-call tweak, falling back to the default bound at
    /// construction.
    pub fn tweak_or_default<'a>(&'a self, twk: Option<&'a [u8]>) -> &'a [u8] {
        twk.unwrap_or(&self.twk)
    }

    pub fn validate_text_length(&self, n: usize) -> Result<(), Error> {
        if n < self.min_txt || n as u64 > self.max_txt {
            return Err(Error::InvalidTextLength);
        }
        Ok(())
    }

    pub fn validate_tweak_length(&self, n: usize) -> Result<(), Error> {
        if n < self.min_twk || (self.max_twk > 0 && n > self.max_twk) {
            return Err(Error::InvalidTweakLength);
        }
        Ok(())
    }

    /// AES-CBC-MAC of `msg` under a zero IV, keeping only the final
    /// block. `msg` must be a multiple of 16 bytes long.
    pub fn prf(&self, msg: &[u8]) -> [u8; BLOCK_LENGTH] {
        debug_assert_eq!(msg.len() % BLOCK_LENGTH, 0);

        let mut mac = [0u8; BLOCK_LENGTH];
        for block in msg.chunks_exact(BLOCK_LENGTH) {
            xor_block(&mut mac, block.try_into().unwrap());
            self.cipher.encrypt_block(&mut mac);
        }
        mac
    }

    /// Single-block AES encryption, functionally a one-block prf.
    pub fn ciph(&self, block: &[u8; BLOCK_LENGTH]) -> [u8; BLOCK_LENGTH] {
        let mut out = *block;
        self.cipher.encrypt_block(&mut out);
        out
    }
}

/// Interpret `x` as a big-endian base-`radix` numeral string over `alpha`.
pub(crate) fn chars_to_bigint(alpha: &Alphabet, x: &[char]) -> Result<BigInt, Error> {
    let radix = alpha.len();
    if radix <= 256 {
        let mut digits = Vec::with_capacity(x.len());
        for &c in x {
            digits.push(alpha.position_of(c).ok_or(Error::SymbolNotInAlphabet)? as u8);
        }
        // digits are alphabet positions, so always below the radix
        let n = BigUint::from_radix_be(&digits, radix as u32).unwrap();
        Ok(n.into())
    } else {
        let big_radix = BigUint::from(radix);
        let mut n = BigUint::zero();
        for &c in x {
            let pos = alpha.position_of(c).ok_or(Error::SymbolNotInAlphabet)?;
            n = n * &big_radix + pos;
        }
        Ok(n.into())
    }
}

/// Render `n` as exactly `width` symbols over `alpha`, left-padding with
/// the zero symbol. `n` must be non-negative and below radix**width.
pub(crate) fn bigint_to_chars(alpha: &Alphabet, n: &BigInt, width: usize) -> Vec<char> {
    let radix = alpha.len();
    let digits: Vec<usize> = if radix <= 256 {
        n.magnitude()
            .to_radix_be(radix as u32)
            .into_iter()
            .map(usize::from)
            .collect()
    } else {
        let big_radix = BigUint::from(radix);
        let mut rem = n.magnitude().clone();
        let mut digits = Vec::new();
        while !rem.is_zero() {
            let (q, r) = rem.div_rem(&big_radix);
            digits.push(r.to_usize().unwrap());
            rem = q;
        }
        digits.reverse();
        digits
    };

    // to_radix_be renders zero as a single zero digit
    let digits = if digits == [0] { Vec::new() } else { digits };

    debug_assert!(digits.len() <= width);
    let mut out = vec![alpha.symbol_at(0); width - digits.len()];
    out.extend(digits.into_iter().map(|d| alpha.symbol_at(d)));
    out
}

/// Serialize `n` big-endian into `out`, left-padded with zeros. `n` must
/// be non-negative and fit in `out`.
pub(crate) fn fill_bytes_be(n: &BigInt, out: &mut [u8]) {
    let bytes = n.magnitude().to_bytes_be();
    debug_assert!(bytes.len() <= out.len());
    let split = out.len() - bytes.len();
    out[..split].fill(0);
    out[split..].copy_from_slice(&bytes);
}
