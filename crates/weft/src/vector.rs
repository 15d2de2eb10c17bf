use crate::logic::{Bit4, Scaler};
use std::fmt;

// 2 bits per element, so one u64 word holds 32 four-state bits.
const BITS_PER_WORD: usize = u64::BITS as usize / 2;

// Every element `x` (0b10), the fill pattern for freshly built vectors.
const ALL_X: u64 = 0xAAAA_AAAA_AAAA_AAAA;

/// A fixed-width vector of [`Bit4`] values, addressed from 0 (LSB) to
/// `size - 1` (MSB). Carries no strength information; use [`Vector8`] when
/// strengths matter.
///
/// Widths up to 32 bits are stored inline in a single word, wider vectors
/// spill to a heap allocation. The representation is not observable: all
/// accessors behave identically either way. Width is fixed at construction,
/// matching a hardware signal.
#[derive(Clone, PartialEq, Eq)]
pub struct Vector4 {
    size: usize,
    bits: Bits,
}

#[derive(Clone, PartialEq, Eq)]
enum Bits {
    Word(u64),
    Heap(Box<[u64]>),
}

impl Vector4 {
    /// Build a vector of `size` bits, all `x`.
    pub fn new(size: usize) -> Vector4 {
        let bits = if size <= BITS_PER_WORD {
            Bits::Word(ALL_X)
        } else {
            let words = size.div_ceil(BITS_PER_WORD);
            Bits::Heap(vec![ALL_X; words].into_boxed_slice())
        };
        Vector4 { size, bits }
    }

    /// Build a vector from a bit slice, index 0 first.
    pub fn from_bits(bits: &[Bit4]) -> Vector4 {
        let mut vec = Vector4::new(bits.len());
        for (idx, bit) in bits.iter().enumerate() {
            vec.set_bit(idx, *bit);
        }
        vec
    }

    pub fn size(&self) -> usize {
        self.size
    }

    pub fn value(&self, idx: usize) -> Bit4 {
        assert!(idx < self.size, "vector index {idx} out of range for width {}", self.size);
        let word = match &self.bits {
            Bits::Word(word) => *word,
            Bits::Heap(words) => words[idx / BITS_PER_WORD],
        };
        Bit4::from_bits(word >> ((idx % BITS_PER_WORD) * 2))
    }

    pub fn set_bit(&mut self, idx: usize, val: Bit4) {
        assert!(idx < self.size, "vector index {idx} out of range for width {}", self.size);
        let word = match &mut self.bits {
            Bits::Word(word) => word,
            Bits::Heap(words) => &mut words[idx / BITS_PER_WORD],
        };
        let off = (idx % BITS_PER_WORD) * 2;
        *word = (*word & !(3u64 << off)) | (val.to_bits() << off);
    }
}

impl fmt::Display for Vector4 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for idx in (0..self.size).rev() {
            write!(f, "{}", self.value(idx))?;
        }
        Ok(())
    }
}

impl fmt::Debug for Vector4 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Vector4({}'b{})", self.size, self)
    }
}

/// A fixed-width vector of strength-carrying [`Scaler`] values, same
/// addressing convention as [`Vector4`]. Always heap-backed; scalers do not
/// pack down to two bits.
#[derive(Clone, PartialEq, Eq)]
pub struct Vector8 {
    bits: Box<[Scaler]>,
}

impl Vector8 {
    /// Build a vector of `size` scalers, all high impedance.
    pub fn new(size: usize) -> Vector8 {
        Vector8 { bits: vec![Scaler::default(); size].into_boxed_slice() }
    }

    pub fn size(&self) -> usize {
        self.bits.len()
    }

    pub fn value(&self, idx: usize) -> Scaler {
        assert!(idx < self.bits.len(), "vector index {idx} out of range for width {}", self.bits.len());
        self.bits[idx]
    }

    pub fn set_bit(&mut self, idx: usize, val: Scaler) {
        assert!(idx < self.bits.len(), "vector index {idx} out of range for width {}", self.bits.len());
        self.bits[idx] = val;
    }
}

impl fmt::Debug for Vector8 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Vector8[")?;
        for idx in (0..self.size()).rev() {
            if idx + 1 != self.size() {
                write!(f, " ")?;
            }
            write!(f, "{}", self.value(idx))?;
        }
        write!(f, "]")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn new_vector_is_all_x() {
        for size in [0, 1, 17, 32, 33, 95] {
            let vec = Vector4::new(size);
            assert_eq!(vec.size(), size);
            for idx in 0..size {
                assert_eq!(vec.value(idx), Bit4::BX);
            }
        }
    }

    #[test]
    fn set_bit_is_isolated() {
        // Straddle the inline/heap boundary on purpose.
        for size in [4, 32, 33, 70] {
            for target in [0, size / 2, size - 1] {
                let mut vec = Vector4::new(size);
                vec.set_bit(target, Bit4::B1);
                for idx in 0..size {
                    let expect = if idx == target { Bit4::B1 } else { Bit4::BX };
                    assert_eq!(vec.value(idx), expect, "width {size} bit {idx}");
                }
            }
        }
    }

    #[test]
    fn display_is_msb_first() {
        let vec = Vector4::from_bits(&[Bit4::B0, Bit4::B1, Bit4::BX, Bit4::BZ]);
        assert_eq!(vec.to_string(), "zx10");
    }

    #[test]
    #[should_panic(expected = "out of range")]
    fn value_out_of_range_panics() {
        Vector4::new(8).value(8);
    }

    #[test]
    fn vector8_defaults_to_hiz() {
        let vec = Vector8::new(5);
        for idx in 0..5 {
            assert_eq!(vec.value(idx), Scaler::default());
        }
    }

    #[test]
    fn vector8_copies_are_independent() {
        let original = Vector8::new(3);
        let mut copy = original.clone();
        copy.set_bit(1, Scaler::new(Bit4::B1, 6));
        assert_eq!(original.value(1), Scaler::default());
        assert_eq!(copy.value(1), Scaler::new(Bit4::B1, 6));
    }

    proptest! {
        #[test]
        fn copies_are_independent(size in 1usize..80, idx in 0usize..80, bits in 0u8..4) {
            prop_assume!(idx < size);
            let original = Vector4::new(size);
            let mut copy = original.clone();
            copy.set_bit(idx, Bit4::from_bits(bits as u64));
            prop_assert_eq!(original.value(idx), Bit4::BX);
        }

        #[test]
        fn set_then_get_round_trips(size in 1usize..80, idx in 0usize..80, bits in 0u8..4) {
            prop_assume!(idx < size);
            let val = Bit4::from_bits(bits as u64);
            let mut vec = Vector4::new(size);
            vec.set_bit(idx, val);
            prop_assert_eq!(vec.value(idx), val);
        }
    }
}
