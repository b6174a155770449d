use thiserror::Error;

/// Everything that can go wrong while loading or running a program.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Fault {
    #[error("unknown instruction {opcode:#06X}")]
    UnknownInstruction { opcode: u16 },

    #[error("stack overflow: call to {address:#05X} with a full call stack")]
    StackOverflow { address: u16 },

    #[error("stack underflow: return with an empty call stack")]
    StackUnderflow,

    #[error("program counter {pc:#06X} is out of bounds")]
    OutOfBounds { pc: u16 },

    #[error("ROM is too large ({size} bytes), max size is {max_size} bytes")]
    RomTooLarge { size: usize, max_size: usize },
}

impl Fault {
    /// Whether execution can continue after this fault.
    /// Only unknown instructions are skipped, the rest mean the program is broken.
    pub fn is_fatal(&self) -> bool {
        !matches!(self, Fault::UnknownInstruction { .. })
    }
}
