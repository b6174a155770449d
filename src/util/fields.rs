/// A structure for splitting an instruction word into
/// the positional fields used by the instruction set.
///
/// ```text
///  15   12 11    8 7     4 3     0
/// +-------+-------+-------+-------+
/// | family|   x   |   y   |   n   |
/// +-------+-------+-------+-------+
///         |          addr         |
///                 |     byte      |
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Fields(u8, u8);

impl Fields {
    pub fn from_u16(value: u16) -> Fields {
        Fields((value >> 8) as u8, (value & 0x00FF) as u8)
    }

    pub fn new(left: u8, right: u8) -> Fields {
        Fields(left, right)
    }

    /// Left-shift the first byte 8 bits,
    /// then take bitwise or with the second byte.
    pub fn as_u16(&self) -> u16 {
        ((self.0 as u16) << 8) | self.1 as u16
    }

    /// All four nibbles, most significant first.
    pub fn nibbles(&self) -> (u8, u8, u8, u8) {
        (self.family(), self.x(), self.y(), self.n())
    }

    pub fn family(&self) -> u8 {
        self.0 >> 4
    }

    /// Bits 8-11, the first register operand.
    pub fn x(&self) -> u8 {
        self.0 & 0x0F
    }

    /// Bits 4-7, the second register operand.
    pub fn y(&self) -> u8 {
        self.1 >> 4
    }

    /// Bits 0-3, a small immediate.
    pub fn n(&self) -> u8 {
        self.1 & 0x0F
    }

    /// Bits 0-7.
    pub fn byte(&self) -> u8 {
        self.1
    }

    /// Bits 0-11.
    pub fn addr(&self) -> u16 {
        self.as_u16() & 0x0FFF
    }
}
