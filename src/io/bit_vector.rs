//! # BitVector
//!
//! Both codecs serialize their body as a stream of bits that is cut into 6-bit groups, each of
//! which is stored as one printable byte `63..=126`. [`BitVector`] is that stream.

use std::{collections::VecDeque, fmt};

/// Offset added to every 6-bit group to make it printable
pub const PRINTABLE_OFFSET: u8 = 63;

/// Number of payload bits per printable byte
pub const BITS_PER_BYTE: usize = 6;

/// An ordered sequence of bits that can grow at both ends.
/// Multi-bit values are always stored big-endian.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct BitVector {
    bits: VecDeque<bool>,
}

impl BitVector {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            bits: VecDeque::with_capacity(capacity),
        }
    }

    /// Unpacks printable bytes into 6 bits each.
    /// Returns the first byte outside of `63..=126` as error.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, u8> {
        let mut result = Self::with_capacity(bytes.len() * BITS_PER_BYTE);
        for &byte in bytes {
            if !(PRINTABLE_OFFSET..=PRINTABLE_OFFSET + 63).contains(&byte) {
                return Err(byte);
            }
            result.append_bits((byte - PRINTABLE_OFFSET) as u64, BITS_PER_BYTE);
        }
        Ok(result)
    }

    /// Packs every 6 bits into one printable byte.
    /// The length must be a multiple of 6; pad beforehand.
    pub fn to_bytes(&self) -> Vec<u8> {
        debug_assert_eq!(self.len() % BITS_PER_BYTE, 0);
        (0..self.len() / BITS_PER_BYTE)
            .map(|i| self.int_at(i * BITS_PER_BYTE, BITS_PER_BYTE) as u8 + PRINTABLE_OFFSET)
            .collect()
    }

    pub fn len(&self) -> usize {
        self.bits.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bits.is_empty()
    }

    pub fn append(&mut self, bit: bool) {
        self.bits.push_back(bit);
    }

    pub fn prepend(&mut self, bit: bool) {
        self.bits.push_front(bit);
    }

    /// Appends the lowest `width` bits of `value`, most significant first
    pub fn append_bits(&mut self, value: u64, width: usize) {
        debug_assert!(width <= 64);
        for shift in (0..width).rev() {
            self.bits.push_back((value >> shift) & 1 == 1);
        }
    }

    /// Appends `with` until the length is a multiple of `multiple`
    pub fn pad_right(&mut self, multiple: usize, with: bool) {
        while self.len() % multiple != 0 {
            self.bits.push_back(with);
        }
    }

    /// Prepends zeros until the length is a multiple of `multiple`
    pub fn pad_left(&mut self, multiple: usize) {
        while self.len() % multiple != 0 {
            self.bits.push_front(false);
        }
    }

    /// Returns the bit at `index`
    /// ** Panics if `index >= self.len()` **
    pub fn bit_at(&self, index: usize) -> bool {
        self.bits[index]
    }

    /// Reads `width` bits starting at `index` as a big-endian integer
    /// ** Panics if the range exceeds the vector **
    pub fn int_at(&self, index: usize, width: usize) -> u64 {
        self.bits
            .range(index..index + width)
            .fold(0, |acc, &bit| (acc << 1) | u64::from(bit))
    }

    pub fn iter(&self) -> impl Iterator<Item = bool> + '_ {
        self.bits.iter().copied()
    }
}

impl fmt::Display for BitVector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for bit in self.iter() {
            f.write_str(if bit { "1" } else { "0" })?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bits_are_big_endian() {
        let mut bits = BitVector::new();
        bits.append_bits(0b101, 3);
        bits.prepend(true);
        bits.append(false);
        assert_eq!(bits.to_string(), "11010");
        assert_eq!(bits.int_at(1, 3), 0b101);

        bits.pad_right(6, true);
        assert_eq!(bits.to_string(), "110101");
        assert_eq!(bits.to_bytes(), vec![0b110101 + 63]);

        let mut short = BitVector::new();
        short.append_bits(3, 2);
        short.pad_left(6);
        assert_eq!(short.to_string(), "000011");
    }

    #[test]
    fn printable_bytes() {
        let bits = BitVector::from_bytes(b"?~").unwrap();
        assert_eq!(bits.len(), 12);
        assert_eq!(bits.int_at(0, 6), 0);
        assert_eq!(bits.int_at(6, 6), 63);
        assert_eq!(bits.to_bytes(), b"?~".to_vec());

        assert_eq!(BitVector::from_bytes(b"?\n"), Err(b'\n'));
    }
}
