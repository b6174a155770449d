//! The data the emulator operates on, as described at
//! https://en.wikipedia.org/wiki/CHIP-8#Virtual_machine_description.

use crate::emulator::error::Fault;
use crate::emulator::input::Keypad;
use crate::emulator::loader;
use crate::emulator::output::Framebuffer;

pub const MEM_SIZE: usize = 4096;
pub const NUM_REGISTERS: usize = 16;
pub const STACK_SIZE: usize = 16;
pub const PC_START: u16 = 0x200;

/// Register VF, also written as a flag by arithmetic and drawing.
pub const FLAG: usize = 0xF;

/// Return addresses for subroutine calls, at most `STACK_SIZE` deep.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CallStack {
    addresses: [u16; STACK_SIZE],
    pointer: usize,
}

impl CallStack {
    pub fn new() -> CallStack {
        CallStack {
            addresses: [0; STACK_SIZE],
            pointer: 0,
        }
    }

    /// Store a return address. `target` is where the call is going, for the error message.
    pub fn push(&mut self, address: u16, target: u16) -> Result<(), Fault> {
        let slot = self
            .addresses
            .get_mut(self.pointer)
            .ok_or(Fault::StackOverflow { address: target })?;
        *slot = address;
        self.pointer += 1;
        Ok(())
    }

    pub fn pop(&mut self) -> Result<u16, Fault> {
        if self.pointer == 0 {
            return Err(Fault::StackUnderflow);
        }
        self.pointer -= 1;
        Ok(self.addresses[self.pointer])
    }

    /// The stack pointer, always in `0..=STACK_SIZE`.
    pub fn len(&self) -> usize {
        self.pointer
    }

    pub fn is_empty(&self) -> bool {
        self.pointer == 0
    }
}

impl Default for CallStack {
    fn default() -> Self {
        Self::new()
    }
}

/// The full machine state. One instance is owned by the host,
/// and every component mutates it in turn.
#[derive(Clone)]
pub struct State {
    pub memory: [u8; MEM_SIZE],
    pub registers: [u8; NUM_REGISTERS],
    pub index: u16,
    pub program_counter: u16,
    pub stack: CallStack,
    pub delay_timer: u8,
    pub sound_timer: u8,
    pub framebuffer: Framebuffer,
    pub keypad: Keypad,
}

impl State {
    /// A zeroed machine with the font loaded and the program counter at `PC_START`.
    pub fn new() -> State {
        let mut state = State {
            memory: [0; MEM_SIZE],
            registers: [0; NUM_REGISTERS],
            index: 0,
            program_counter: PC_START,
            stack: CallStack::new(),
            delay_timer: 0,
            sound_timer: 0,
            framebuffer: Framebuffer::new(),
            keypad: Keypad::new(),
        };
        loader::load_font(&mut state);
        state
    }
}

impl Default for State {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_state_starts_at_program_start() {
        let state = State::new();
        assert_eq!(state.program_counter, PC_START);
        assert_eq!(state.index, 0);
        assert_eq!(state.registers, [0; NUM_REGISTERS]);
        assert!(state.stack.is_empty());
        assert_eq!(state.framebuffer.lit_pixels(), 0);
        assert!(state.memory[0x50..].iter().all(|&b| b == 0));
    }

    #[test]
    fn stack_is_last_in_first_out() {
        let mut stack = CallStack::new();
        stack.push(0x202, 0x300).unwrap();
        stack.push(0x302, 0x400).unwrap();
        assert_eq!(stack.len(), 2);
        assert_eq!(stack.pop(), Ok(0x302));
        assert_eq!(stack.pop(), Ok(0x202));
        assert!(stack.is_empty());
    }

    #[test]
    fn stack_overflows_past_sixteen() {
        let mut stack = CallStack::new();
        for i in 0..STACK_SIZE as u16 {
            stack.push(0x200 + 2 * i, 0x300).unwrap();
        }
        assert_eq!(stack.push(0x222, 0x300), Err(Fault::StackOverflow { address: 0x300 }));
        assert_eq!(stack.len(), STACK_SIZE);
    }

    #[test]
    fn empty_stack_underflows() {
        let mut stack = CallStack::new();
        assert_eq!(stack.pop(), Err(Fault::StackUnderflow));
        assert_eq!(stack.len(), 0);
    }
}
