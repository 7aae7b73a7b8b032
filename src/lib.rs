//! FF1 and FF3-1 format-preserving encryption library.
//!
//! This crate implements the two format-preserving encryption (FPE)
//! algorithms of NIST Special Publication 800-38G revision 1. FPE
//! encrypts a string of symbols drawn from a finite alphabet into
//! another string of the same length over the same alphabet.
//!
//! # Overview
//!
//! FPE is suitable for fields whose ciphertext must keep the syntactic
//! shape of the plaintext:
//! - Credit card and account numbers
//! - National identifiers
//! - Database columns with format constraints
//!
//! # Variants
//!
//! - **FF1**: ten-round Feistel network, tweaks of any bounded length
//! - **FF3-1**: eight-round Feistel network, fixed 7-byte tweak
//!
//! Both run over an AES block cipher selected by key length (16, 24, or
//! 32 bytes) and support radixes from 2 up to the alphabet size, with a
//! caller-supplied alphabet or the canonical 62-symbol one.
//!
//! # Quick Start
//!
//! ## FF1
//!
//! ```rust
//! use ffx::FF1;
//!
//! // NIST SP 800-38G appendix A, sample 1
//! let key = [
//!     0x2b, 0x7e, 0x15, 0x16, 0x28, 0xae, 0xd2, 0xa6,
//!     0xab, 0xf7, 0x15, 0x88, 0x09, 0xcf, 0x4f, 0x3c,
//! ];
//! let ff1 = FF1::new(&key, None, 0, 0, 10, None).unwrap();
//!
//! let ct = ff1.encrypt("0123456789", None).unwrap();
//! assert_eq!(ct, "2433477484");
//! assert_eq!(ff1.decrypt(&ct, None).unwrap(), "0123456789");
//! ```
//!
//! ## FF3-1
//!
//! ```rust
//! use ffx::FF3_1;
//!
//! let key = [
//!     0xad, 0x41, 0xec, 0x5d, 0x23, 0x56, 0xde, 0xae,
//!     0x53, 0xae, 0x76, 0xf5, 0x0b, 0x4b, 0xa6, 0xd2,
//! ];
//! let tweak = [0xcf, 0x29, 0xda, 0x1e, 0x18, 0xd9, 0x70];
//! let ff3_1 = FF3_1::new(&key, Some(&tweak), 10, None).unwrap();
//!
//! let ct = ff3_1.encrypt("6520935496", None).unwrap();
//! assert_eq!(ct, "4716569208");
//! assert_eq!(ff3_1.decrypt(&ct, None).unwrap(), "6520935496");
//! ```
//!
//! # Security Considerations
//!
//! - FPE is deterministic: identical `(key, tweak, plaintext)` always
//!   produces the same ciphertext. Vary the tweak where that matters.
//! - Tweaks are public, per-message associated data; they need not be
//!   unique or secret.
//! - No authentication: these are encryption-only permutations; pair
//!   them with a MAC or AEAD if integrity protection is needed.
//! - Minimum message length depends on the radix (`radix^minlen` must
//!   reach one million).

pub mod alphabet;
pub mod common;
pub mod ff1;
pub mod ff3_1;

mod ffx;

#[cfg(test)]
mod cross_check;

pub use alphabet::{Alphabet, DEFAULT_ALPHABET};
pub use common::Error;
pub use ff1::FF1;
pub use ff3_1::FF3_1;
