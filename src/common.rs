#![allow(deprecated)]
//! Common definitions shared by the FF1 and FF3-1 implementations.

#[allow(deprecated)]
use aes::cipher::{Array, BlockCipherEncrypt, KeyInit};
use aes::{Aes128, Aes192, Aes256};

/// Unified error type for all FPE operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Error {
    /// Radix is below 2 or exceeds the alphabet size.
    UnsupportedRadix,
    /// The minimum text length implied by the radix exceeds the maximum.
    UnsupportedRadixLengthCombination,
    /// Tweak length is outside the bounds allowed by the context.
    InvalidTweakLength,
    /// Text length is outside the bounds allowed by the context.
    InvalidTextLength,
    /// AES key is not 16, 24, or 32 bytes.
    InvalidKeyLength,
    /// The alphabet contains a repeated symbol.
    DuplicateAlphabet,
    /// The input contains a symbol absent from the alphabet.
    SymbolNotInAlphabet,
}

impl core::fmt::Display for Error {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Error::UnsupportedRadix => write!(f, "unsupported radix"),
            Error::UnsupportedRadixLengthCombination => {
                write!(f, "unsupported radix/maximum text length combination")
            }
            Error::InvalidTweakLength => write!(f, "invalid tweak length"),
            Error::InvalidTextLength => write!(f, "invalid text length"),
            Error::InvalidKeyLength => write!(f, "invalid key length"),
            Error::DuplicateAlphabet => write!(f, "duplicate symbols in alphabet"),
            Error::SymbolNotInAlphabet => write!(f, "symbol not in alphabet"),
        }
    }
}

impl std::error::Error for Error {}

/// AES block length in bytes.
pub const BLOCK_LENGTH: usize = 16;

/// Direction of cipher operation.
#[derive(Clone, Copy)]
pub enum Direction {
    Encrypt,
    Decrypt,
}

/// AES keyed for encryption, with the variant selected by key length.
///
/// Both FF1 and FF3-1 use the forward AES transform for decryption as
/// well, so no decryption schedule is kept.
pub(crate) enum AesCipher {
    Aes128(Aes128),
    Aes192(Aes192),
    Aes256(Aes256),
}

impl AesCipher {
    /// Build a cipher from a 16-, 24-, or 32-byte key.
    pub fn new(key: &[u8]) -> Result<Self, Error> {
        match key.len() {
            16 => Ok(AesCipher::Aes128(Aes128::new(Array::from_slice(key)))),
            24 => Ok(AesCipher::Aes192(Aes192::new(Array::from_slice(key)))),
            32 => Ok(AesCipher::Aes256(Aes256::new(Array::from_slice(key)))),
            _ => Err(Error::InvalidKeyLength),
        }
    }

    /// Encrypt a single block in place.
    pub fn encrypt_block(&self, block: &mut [u8; BLOCK_LENGTH]) {
        let mut b = Array::clone_from_slice(block);
        match self {
            AesCipher::Aes128(ks) => ks.encrypt_block(&mut b),
            AesCipher::Aes192(ks) => ks.encrypt_block(&mut b),
            AesCipher::Aes256(ks) => ks.encrypt_block(&mut b),
        }
        block.copy_from_slice(b.as_slice());
    }
}

/// XOR two 16-byte blocks, storing result in the first argument.
#[inline]
pub(crate) fn xor_block(dst: &mut [u8; BLOCK_LENGTH], src: &[u8; BLOCK_LENGTH]) {
    for i in 0..BLOCK_LENGTH {
        dst[i] ^= src[i];
    }
}
