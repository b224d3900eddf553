//! Fixed-size letter-multiset fingerprints.
//!
//! A [`Fingerprint`] packs a word into 64 bits, least significant bit first:
//!
//! | bits   | field                                        |
//! |--------|----------------------------------------------|
//! | 0..52  | 26 two-bit letter counters, `A` at bits 0..2 |
//! | 52..57 | number of letters, mod 32                    |
//! | 57..64 | overflow accumulator, mod 128                |
//!
//! Each counter holds its letter's count mod 4. Whenever a counter wraps from 3 back to 0, the
//! letter's 1-based alphabet rank (`A` = 1, ..., `Z` = 26) is added to the overflow accumulator.
//! Two permutations of the same word always produce the same fingerprint. The converse does not
//! hold in general: the encoding is lossy once a letter occurs 4 or more times, or once a word has
//! 32 or more letters, and two such words can collide even though they are not anagrams.
//! `AAAAAAAABBBBBBBB` and `AAAAAAAAAAAACCCC` share a fingerprint: both have sixteen letters, every
//! counter at zero, and wrap weights summing to 6.

use std::fmt::{self, Debug, Display, Formatter};
use std::hash::{BuildHasherDefault, Hasher};

const LETTERS: u32 = 26;
const COUNTER_BITS: u32 = 2;
const COUNTER_MASK: u64 = 0b11;

const LEN_SHIFT: u32 = LETTERS * COUNTER_BITS;
const LEN_BITS: u32 = 5;
const LEN_MASK: u64 = (1 << LEN_BITS) - 1;

const OVERFLOW_SHIFT: u32 = LEN_SHIFT + LEN_BITS;
const OVERFLOW_MASK: u64 = 0x7f;

/// Packed, order-independent summary of a word's letters and length.
#[derive(Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Fingerprint(u64);

impl Fingerprint {
    /// Fingerprint a word.
    ///
    /// Only the bytes `A` through `Z` are counted. Every other byte (lowercase letters, digits,
    /// punctuation, the individual bytes of a multi-byte character) is skipped and contributes to
    /// neither a counter nor the length field. The length field is therefore the number of
    /// counted letters, not the byte length of `word`. Callers that want other characters treated
    /// differently must normalize before fingerprinting.
    pub fn of(word: &str) -> Self {
        let mut bits = 0u64;
        // Both fields wrap at a power of two dividing 256, so u8 arithmetic followed by a mask
        // gives the same result as wrapping at the field width.
        let mut len = 0u8;
        let mut overflow = 0u8;

        for letter in word.bytes() {
            let index = match letter_index(letter) {
                Some(index) => index,
                None => continue,
            };
            let shift = index * COUNTER_BITS;
            let counter = (((bits >> shift) & COUNTER_MASK) + 1) & COUNTER_MASK;
            bits = (bits & !(COUNTER_MASK << shift)) | (counter << shift);
            if counter == 0 {
                overflow = overflow.wrapping_add(index as u8 + 1);
            }
            len = len.wrapping_add(1);
        }

        bits |= (u64::from(len) & LEN_MASK) << LEN_SHIFT;
        bits |= (u64::from(overflow) & OVERFLOW_MASK) << OVERFLOW_SHIFT;
        Self(bits)
    }

    pub fn from_bits(bits: u64) -> Self {
        Self(bits)
    }

    pub fn bits(self) -> u64 {
        self.0
    }

    /// The 2-bit counter for an uppercase letter, or `None` if `letter` is not in `A..=Z`.
    pub fn count(self, letter: u8) -> Option<u8> {
        letter_index(letter).map(|index| ((self.0 >> (index * COUNTER_BITS)) & COUNTER_MASK) as u8)
    }

    pub fn len(self) -> u8 {
        ((self.0 >> LEN_SHIFT) & LEN_MASK) as u8
    }

    pub fn is_empty(self) -> bool {
        self.len() == 0
    }

    /// Sum of the ranks of every counter wraparound, mod 128.
    pub fn overflow(self) -> u8 {
        ((self.0 >> OVERFLOW_SHIFT) & OVERFLOW_MASK) as u8
    }
}

/// Fingerprint a word. See [`Fingerprint::of`].
pub fn encode(word: &str) -> Fingerprint {
    Fingerprint::of(word)
}

fn letter_index(letter: u8) -> Option<u32> {
    letter
        .is_ascii_uppercase()
        .then(|| u32::from(letter - b'A'))
}

impl Display for Fingerprint {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        write!(f, "{:016x}", self.0)
    }
}

impl Debug for Fingerprint {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        let mut counts = String::new();
        for letter in b'A'..=b'Z' {
            if let Some(count @ 1..=3) = self.count(letter) {
                counts.push(letter as char);
                counts.push((b'0' + count) as char);
            }
        }
        f.debug_struct("Fingerprint")
            .field("counts", &counts)
            .field("len", &self.len())
            .field("overflow", &self.overflow())
            .finish()
    }
}

/// Hasher for maps keyed by [`Fingerprint`].
///
/// The key is a single `u64`, so instead of running SipHash over it we do one widening multiply
/// and fold the high half of the product into the low half. A plain 64-bit multiply would leave
/// the low bits of the hash (used to pick a bucket) blind to the length and overflow fields.
#[derive(Default)]
pub struct FingerprintHasher {
    hash: u64,
}

const MIX: u64 = 0x9e37_79b9_7f4a_7c15;

impl Hasher for FingerprintHasher {
    fn finish(&self) -> u64 {
        self.hash
    }

    #[inline]
    fn write_u64(&mut self, i: u64) {
        let full = u128::from(self.hash ^ i) * u128::from(MIX);
        self.hash = (full as u64) ^ ((full >> 64) as u64);
    }

    fn write(&mut self, bytes: &[u8]) {
        for &byte in bytes {
            self.write_u64(u64::from(byte));
        }
    }
}

pub type FingerprintBuildHasher = BuildHasherDefault<FingerprintHasher>;
