use std::fmt;

/// The four Verilog bit states. The discriminants fit in two bits so that
/// [`crate::Vector4`] can pack elements densely.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum Bit4 {
    B0 = 0,
    B1 = 1,
    BX = 2,
    BZ = 3,
}

impl Bit4 {
    /// Decode from the 2-bit packed encoding. Bits above the low two are
    /// ignored.
    pub(crate) fn from_bits(bits: u64) -> Bit4 {
        match bits & 3 {
            0 => Bit4::B0,
            1 => Bit4::B1,
            2 => Bit4::BX,
            _ => Bit4::BZ,
        }
    }

    pub(crate) fn to_bits(self) -> u64 {
        self as u64
    }

    /// True for `0` and `1`, false for `x` and `z`.
    pub fn is_defined(self) -> bool {
        matches!(self, Bit4::B0 | Bit4::B1)
    }

    fn digit(self) -> Option<u64> {
        match self {
            Bit4::B0 => Some(0),
            Bit4::B1 => Some(1),
            Bit4::BX | Bit4::BZ => None,
        }
    }
}

impl fmt::Display for Bit4 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let c = match self {
            Bit4::B0 => '0',
            Bit4::B1 => '1',
            Bit4::BX => 'x',
            Bit4::BZ => 'z',
        };
        write!(f, "{}", c)
    }
}

/// Binary addition of two bits with carry in and out.
///
/// Undefined inputs poison the result: if any of `a`, `b` or `carry` is `x`
/// or `z`, both the sum and the outgoing carry are `x`. Arithmetic node
/// functions build multi-bit adders out of this kernel.
pub fn add_with_carry(a: Bit4, b: Bit4, carry: Bit4) -> (Bit4, Bit4) {
    let (Some(a), Some(b), Some(c)) = (a.digit(), b.digit(), carry.digit()) else {
        return (Bit4::BX, Bit4::BX);
    };
    let sum = a + b + c;
    (Bit4::from_bits(sum & 1), Bit4::from_bits(sum >> 1))
}

/// Drive strength levels, 0 (high impedance) through 7 (supply).
pub mod strength {
    pub const HIZ: u8 = 0;
    pub const SMALL: u8 = 1;
    pub const MEDIUM: u8 = 2;
    pub const WEAK: u8 = 3;
    pub const LARGE: u8 = 4;
    pub const PULL: u8 = 5;
    pub const STRONG: u8 = 6;
    pub const SUPPLY: u8 = 7;
}

/// A single bit with a drive strength attached.
///
/// Strength only exists here and in [`crate::Vector8`]; everything else in
/// the core works on plain [`Bit4`] values. Two scalers combine only through
/// [`resolve`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Scaler {
    value: Bit4,
    strength: u8,
}

impl Scaler {
    /// An unambiguous value at the given strength (0..=7).
    pub fn new(value: Bit4, strength: u8) -> Scaler {
        assert!(strength <= strength::SUPPLY, "drive strength out of range: {strength}");
        Scaler { value, strength }
    }

    pub fn value(&self) -> Bit4 {
        self.value
    }

    pub fn strength(&self) -> u8 {
        self.strength
    }
}

/// The high impedance scaler.
impl Default for Scaler {
    fn default() -> Self {
        Scaler { value: Bit4::BZ, strength: strength::HIZ }
    }
}

impl fmt::Display for Scaler {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}@{}", self.value, self.strength)
    }
}

/// Wired-logic resolution of two drivers of the same node.
///
/// The strictly stronger driver wins outright. At equal strength, equal
/// values keep that value and conflicting values give `x`, both at the
/// shared strength. Two high impedance operands resolve to high impedance.
/// Commutative by construction.
pub fn resolve(a: Scaler, b: Scaler) -> Scaler {
    if a.strength > b.strength {
        return a;
    }
    if b.strength > a.strength {
        return b;
    }
    if a.strength == strength::HIZ {
        return Scaler::default();
    }
    if a.value == b.value {
        a
    } else {
        Scaler::new(Bit4::BX, a.strength)
    }
}
