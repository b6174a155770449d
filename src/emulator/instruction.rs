use crate::emulator::error::Fault;
use crate::util::fields::Fields;

/// A wrapper for addresses.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Addr(pub u16);

/// A wrapper for registers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Reg(pub u8);

/// A wrapper for constants.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Const(pub u8);

/// A single instruction from the CHIP-8 instruction set.
/// Two bytes written in hexadecimal, with the following special characters:
/// - NNN: address
/// - NN: 8-bit constant
/// - N: 4-bit constant
/// - X and Y: 4-bit register identifier
/// - PC: Program counter
/// - I: 16 bit register for memory address
/// - VN: One of the 16 available variables (register identifiers)
///
/// Besides the common subset, `5XY0`, the `8XY_` arithmetic group and `FX55`
/// are decoded too. `0NNN` (machine code routines) is never decoded and is
/// reported as `Fault::UnknownInstruction`, like any other unlisted word.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Instruction {
    ClearScreen, // 00E0
    Return, // 00EE
    Goto(Addr), // 1NNN
    Call(Addr), // 2NNN
    IfRegEqConst(Reg, Const), // 3XNN
    IfRegNeqConst(Reg, Const), // 4XNN
    IfRegEqReg(Reg, Reg), // 5XY0
    SetRegToConst(Reg, Const), // 6XNN
    IncRegByConst(Reg, Const), // 7XNN
    SetRegToReg(Reg, Reg), // 8XY0
    BitwiseOr(Reg, Reg), // 8XY1
    BitwiseAnd(Reg, Reg), // 8XY2
    BitwiseXor(Reg, Reg), // 8XY3
    IncRegByReg(Reg, Reg), // 8XY4
    DecRegByReg(Reg, Reg), // 8XY5
    BitshiftRight(Reg), // 8XY6
    SetVxVyMinusVx(Reg, Reg), // 8XY7
    BitshiftLeft(Reg), // 8XYE
    IfRegNeqReg(Reg, Reg), // 9XY0
    SetI(Addr), // ANNN
    SetPcToV0PlusAddr(Addr), // BNNN
    SetVxRand(Reg, Const), // CXNN
    Draw(Reg, Reg, Const), // DXYN
    IfKeyDown(Reg), // EX9E
    IfKeyUp(Reg), // EXA1
    SetRegToDelayTimer(Reg), // FX07
    WaitForKey(Reg), // FX0A
    SetDelayTimerToReg(Reg), // FX15
    SetSoundTimerToReg(Reg), // FX18
    AddRegToI(Reg), // FX1E
    SetIToGlyph(Reg), // FX29
    StoreBcd(Reg), // FX33
    RegDump(Reg), // FX55
    RegLoad(Reg) // FX65
}

impl Instruction {

    pub fn from_u16(value: u16) -> Result<Instruction, Fault> {
        Instruction::decode(Fields::from_u16(value))
    }

    /// Decode the big-endian word made of `left` and `right`.
    pub fn from_two_u8(left: u8, right: u8) -> Result<Instruction, Fault> {
        Instruction::decode(Fields::new(left, right))
    }

    fn decode(opcode: Fields) -> Result<Instruction, Fault> {
        let instruction = match opcode.nibbles() {
            (0, 0, 0xE, 0) => Instruction::ClearScreen,
            (0, 0, 0xE, 0xE) => Instruction::Return,
            (1, _, _, _) => Instruction::Goto(Addr(opcode.addr())),
            (2, _, _, _) => Instruction::Call(Addr(opcode.addr())),
            (3, x, _, _) => Instruction::IfRegEqConst(Reg(x), Const(opcode.byte())),
            (4, x, _, _) => Instruction::IfRegNeqConst(Reg(x), Const(opcode.byte())),
            (5, x, y, 0) => Instruction::IfRegEqReg(Reg(x), Reg(y)),
            (6, x, _, _) => Instruction::SetRegToConst(Reg(x), Const(opcode.byte())),
            (7, x, _, _) => Instruction::IncRegByConst(Reg(x), Const(opcode.byte())),
            (8, x, y, 0) => Instruction::SetRegToReg(Reg(x), Reg(y)),
            (8, x, y, 1) => Instruction::BitwiseOr(Reg(x), Reg(y)),
            (8, x, y, 2) => Instruction::BitwiseAnd(Reg(x), Reg(y)),
            (8, x, y, 3) => Instruction::BitwiseXor(Reg(x), Reg(y)),
            (8, x, y, 4) => Instruction::IncRegByReg(Reg(x), Reg(y)),
            (8, x, y, 5) => Instruction::DecRegByReg(Reg(x), Reg(y)),
            (8, x, _, 6) => Instruction::BitshiftRight(Reg(x)),
            (8, x, y, 7) => Instruction::SetVxVyMinusVx(Reg(x), Reg(y)),
            (8, x, _, 0xE) => Instruction::BitshiftLeft(Reg(x)),
            (9, x, y, 0) => Instruction::IfRegNeqReg(Reg(x), Reg(y)),
            (0xA, _, _, _) => Instruction::SetI(Addr(opcode.addr())),
            (0xB, _, _, _) => Instruction::SetPcToV0PlusAddr(Addr(opcode.addr())),
            (0xC, x, _, _) => Instruction::SetVxRand(Reg(x), Const(opcode.byte())),
            (0xD, x, y, n) => Instruction::Draw(Reg(x), Reg(y), Const(n)),
            (0xE, x, 9, 0xE) => Instruction::IfKeyDown(Reg(x)),
            (0xE, x, 0xA, 1) => Instruction::IfKeyUp(Reg(x)),
            (0xF, x, 0, 7) => Instruction::SetRegToDelayTimer(Reg(x)),
            (0xF, x, 0, 0xA) => Instruction::WaitForKey(Reg(x)),
            (0xF, x, 1, 5) => Instruction::SetDelayTimerToReg(Reg(x)),
            (0xF, x, 1, 8) => Instruction::SetSoundTimerToReg(Reg(x)),
            (0xF, x, 1, 0xE) => Instruction::AddRegToI(Reg(x)),
            (0xF, x, 2, 9) => Instruction::SetIToGlyph(Reg(x)),
            (0xF, x, 3, 3) => Instruction::StoreBcd(Reg(x)),
            (0xF, x, 5, 5) => Instruction::RegDump(Reg(x)),
            (0xF, x, 6, 5) => Instruction::RegLoad(Reg(x)),
            _ => return Err(Fault::UnknownInstruction { opcode: opcode.as_u16() }),
        };
        Ok(instruction)
    }
}


#[cfg(test)]
mod tests {

    use super::*;
    use proptest::prelude::*;
    use test_case::test_case;

    #[test_case(0x00E0 => Instruction::ClearScreen ; "clear screen")]
    #[test_case(0x00EE => Instruction::Return ; "return from call")]
    #[test_case(0x1025 => Instruction::Goto(Addr(0x25)) ; "goto")]
    #[test_case(0x2037 => Instruction::Call(Addr(0x37)) ; "call")]
    #[test_case(0x3A08 => Instruction::IfRegEqConst(Reg(0xA), Const(8)) ; "skip if equal to constant")]
    #[test_case(0x4A08 => Instruction::IfRegNeqConst(Reg(0xA), Const(8)) ; "skip if not equal to constant")]
    #[test_case(0x5AB0 => Instruction::IfRegEqReg(Reg(0xA), Reg(0xB)) ; "skip if registers equal")]
    #[test_case(0x6B23 => Instruction::SetRegToConst(Reg(0xB), Const(0x23)) ; "set register")]
    #[test_case(0x7CA1 => Instruction::IncRegByConst(Reg(0xC), Const(0xA1)) ; "add constant")]
    #[test_case(0x8AB0 => Instruction::SetRegToReg(Reg(0xA), Reg(0xB)) ; "copy register")]
    #[test_case(0x8DE1 => Instruction::BitwiseOr(Reg(0xD), Reg(0xE)) ; "or")]
    #[test_case(0x8DE2 => Instruction::BitwiseAnd(Reg(0xD), Reg(0xE)) ; "and")]
    #[test_case(0x8DE3 => Instruction::BitwiseXor(Reg(0xD), Reg(0xE)) ; "xor")]
    #[test_case(0x8AB4 => Instruction::IncRegByReg(Reg(0xA), Reg(0xB)) ; "add register")]
    #[test_case(0x8AB5 => Instruction::DecRegByReg(Reg(0xA), Reg(0xB)) ; "subtract register")]
    #[test_case(0x8AB6 => Instruction::BitshiftRight(Reg(0xA)) ; "shift right")]
    #[test_case(0x8AB7 => Instruction::SetVxVyMinusVx(Reg(0xA), Reg(0xB)) ; "reverse subtract")]
    #[test_case(0x8A0E => Instruction::BitshiftLeft(Reg(0xA)) ; "shift left")]
    #[test_case(0x9AB0 => Instruction::IfRegNeqReg(Reg(0xA), Reg(0xB)) ; "skip if registers differ")]
    #[test_case(0xA025 => Instruction::SetI(Addr(0x25)) ; "set index")]
    #[test_case(0xB025 => Instruction::SetPcToV0PlusAddr(Addr(0x25)) ; "jump with offset")]
    #[test_case(0xCA23 => Instruction::SetVxRand(Reg(0xA), Const(0x23)) ; "random")]
    #[test_case(0xDABC => Instruction::Draw(Reg(0xA), Reg(0xB), Const(0xC)) ; "draw")]
    #[test_case(0xEA9E => Instruction::IfKeyDown(Reg(0xA)) ; "skip if key down")]
    #[test_case(0xEAA1 => Instruction::IfKeyUp(Reg(0xA)) ; "skip if key up")]
    #[test_case(0xFA07 => Instruction::SetRegToDelayTimer(Reg(0xA)) ; "read delay timer")]
    #[test_case(0xFA0A => Instruction::WaitForKey(Reg(0xA)) ; "wait for key")]
    #[test_case(0xFA15 => Instruction::SetDelayTimerToReg(Reg(0xA)) ; "set delay timer")]
    #[test_case(0xFA18 => Instruction::SetSoundTimerToReg(Reg(0xA)) ; "set sound timer")]
    #[test_case(0xFA1E => Instruction::AddRegToI(Reg(0xA)) ; "add to index")]
    #[test_case(0xFA29 => Instruction::SetIToGlyph(Reg(0xA)) ; "glyph address")]
    #[test_case(0xFA33 => Instruction::StoreBcd(Reg(0xA)) ; "bcd")]
    #[test_case(0xFA55 => Instruction::RegDump(Reg(0xA)) ; "register dump")]
    #[test_case(0xFA65 => Instruction::RegLoad(Reg(0xA)) ; "register load")]
    fn opcodes_are_parsed_correctly(word: u16) -> Instruction {
        Instruction::from_u16(word).unwrap()
    }

    #[test_case(0x0000 ; "zero")]
    #[test_case(0x0123 ; "machine code routine")]
    #[test_case(0x00E1 ; "almost clear screen")]
    #[test_case(0x5AB1 ; "register compare with tail")]
    #[test_case(0x8AB8 ; "unused alu operation")]
    #[test_case(0x9AB1 ; "register skip with tail")]
    #[test_case(0xE0FF ; "unused key operation")]
    #[test_case(0xF0FF ; "unused misc operation")]
    fn unknown_opcodes_are_reported(word: u16) {
        assert_eq!(
            Instruction::from_u16(word),
            Err(Fault::UnknownInstruction { opcode: word })
        );
    }

    #[test]
    fn from_two_u8_equals_from_u16() {
        pretty_assertions::assert_eq!(Instruction::from_two_u8(0x12, 0x34), Instruction::from_u16(0x1234));
        assert_eq!(Instruction::from_two_u8(0x2F, 0x2F), Instruction::from_u16(0x2F2F));
        assert_eq!(Instruction::from_two_u8(0xD0, 0x11), Instruction::from_u16(0xD011));
    }

    proptest! {
        #[test]
        fn decoding_never_panics(word in any::<u16>()) {
            match Instruction::from_u16(word) {
                Ok(_) => {}
                Err(fault) => prop_assert_eq!(fault, Fault::UnknownInstruction { opcode: word }),
            }
        }
    }
}
