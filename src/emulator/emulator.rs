//! The fetch-decode-execute engine.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::emulator::error::Fault;
use crate::emulator::input::Keypad;
use crate::emulator::instruction::*;
use crate::emulator::loader::{self, GLYPH_SIZE};
use crate::emulator::output::Framebuffer;
use crate::emulator::state::{State, FLAG, MEM_SIZE};
use crate::emulator::timer;

/// Addresses are 12 bits wide.
const ADDR_MASK: u16 = 0x0FFF;

pub struct Emulator {
    state: State,
    rng: StdRng,
}

impl Emulator {

    /// Create a new emulator with the font loaded and no program.
    pub fn new() -> Emulator {
        Emulator {
            state: State::new(),
            rng: StdRng::from_entropy(),
        }
    }

    /// Create a new emulator whose random numbers are reproducible.
    pub fn with_seed(seed: u64) -> Emulator {
        Emulator {
            state: State::new(),
            rng: StdRng::seed_from_u64(seed),
        }
    }

    /// Copy a program into memory at 0x200.
    pub fn load(&mut self, program: &[u8]) -> Result<(), Fault> {
        loader::load(&mut self.state, program)
    }

    pub fn state(&self) -> &State {
        &self.state
    }

    pub fn framebuffer(&self) -> &Framebuffer {
        &self.state.framebuffer
    }

    pub fn keypad_mut(&mut self) -> &mut Keypad {
        &mut self.state.keypad
    }

    pub fn sound_timer(&self) -> u8 {
        self.state.sound_timer
    }

    /// Whether a tone should be playing right now.
    pub fn is_sounding(&self) -> bool {
        self.state.sound_timer > 0
    }

    /// Count both timers down once. Call this at 60 Hz.
    pub fn tick_timers(&mut self) {
        timer::tick(&mut self.state);
    }

    /// Load the instruction at the program counter and execute it.
    ///
    /// If the instruction fails fatally, the program counter is left
    /// pointing at it.
    pub fn step(&mut self) -> Result<(), Fault> {
        let pc = self.state.program_counter;
        if pc as usize >= MEM_SIZE - 1 {
            return Err(Fault::OutOfBounds { pc });
        }

        // Each opcode is two bytes
        let left = self.state.memory[pc as usize];
        let right = self.state.memory[pc as usize + 1];
        self.state.program_counter += 2;

        let result = Instruction::from_two_u8(left, right).and_then(|instruction| {
            log::trace!("{:#05X}: {:?}", pc, instruction);
            self.execute_single(instruction)
        });

        if let Err(fault) = &result {
            if fault.is_fatal() {
                self.state.program_counter = pc;
            }
        }
        result
    }

    /// Decode and execute a single instruction word, without fetching it.
    pub fn execute(&mut self, word: u16) -> Result<(), Fault> {
        self.execute_single(Instruction::from_u16(word)?)
    }

    /// Execute instructions in order, stopping at the first fault.
    pub fn execute_many(&mut self, instructions: &[Instruction]) -> Result<(), Fault> {
        instructions
            .iter()
            .try_for_each(|&instruction| self.execute_single(instruction))
    }

    fn skip_if(&mut self, condition: bool) {
        if condition {
            self.state.program_counter = self.state.program_counter.wrapping_add(2);
        }
    }

    /// Execute a single instruction
    pub fn execute_single(&mut self, instruction: Instruction) -> Result<(), Fault> {
        let state = &mut self.state;
        let v = &mut state.registers;

        match instruction {

            Instruction::ClearScreen => state.framebuffer.clear(),

            // Return to the previous call site via the stack.
            Instruction::Return => {
                state.program_counter = state.stack.pop()?;
            }

            Instruction::Goto(Addr(addr)) => {
                state.program_counter = addr;
            }

            // Store the current address on the stack, then jump to the specified address
            Instruction::Call(Addr(addr)) => {
                state.stack.push(state.program_counter, addr)?;
                state.program_counter = addr;
            }

            Instruction::IfRegEqConst(Reg(x), Const(n)) => {
                let condition = v[x as usize] == n;
                self.skip_if(condition);
            }

            Instruction::IfRegNeqConst(Reg(x), Const(n)) => {
                let condition = v[x as usize] != n;
                self.skip_if(condition);
            }

            Instruction::IfRegEqReg(Reg(x), Reg(y)) => {
                let condition = v[x as usize] == v[y as usize];
                self.skip_if(condition);
            }

            Instruction::SetRegToConst(Reg(x), Const(n)) => {
                v[x as usize] = n;
            }

            // No carry flag for this one
            Instruction::IncRegByConst(Reg(x), Const(n)) => {
                v[x as usize] = v[x as usize].wrapping_add(n);
            }

            Instruction::SetRegToReg(Reg(x), Reg(y)) => {
                v[x as usize] = v[y as usize];
            }

            Instruction::BitwiseOr(Reg(x), Reg(y)) => {
                v[x as usize] |= v[y as usize];
            }

            Instruction::BitwiseAnd(Reg(x), Reg(y)) => {
                v[x as usize] &= v[y as usize];
            }

            Instruction::BitwiseXor(Reg(x), Reg(y)) => {
                v[x as usize] ^= v[y as usize];
            }

            // The flag is written last, so it wins when x is VF.
            Instruction::IncRegByReg(Reg(x), Reg(y)) => {
                let (sum, carry) = v[x as usize].overflowing_add(v[y as usize]);
                v[x as usize] = sum;
                v[FLAG] = carry as u8;
            }

            Instruction::DecRegByReg(Reg(x), Reg(y)) => {
                let (difference, borrow) = v[x as usize].overflowing_sub(v[y as usize]);
                v[x as usize] = difference;
                v[FLAG] = !borrow as u8;
            }

            Instruction::BitshiftRight(Reg(x)) => {
                let old = v[x as usize];
                v[x as usize] = old >> 1;
                v[FLAG] = old & 1;
            }

            Instruction::SetVxVyMinusVx(Reg(x), Reg(y)) => {
                let (difference, borrow) = v[y as usize].overflowing_sub(v[x as usize]);
                v[x as usize] = difference;
                v[FLAG] = !borrow as u8;
            }

            Instruction::BitshiftLeft(Reg(x)) => {
                let old = v[x as usize];
                v[x as usize] = old << 1;
                v[FLAG] = old >> 7;
            }

            Instruction::IfRegNeqReg(Reg(x), Reg(y)) => {
                let condition = v[x as usize] != v[y as usize];
                self.skip_if(condition);
            }

            Instruction::SetI(Addr(addr)) => {
                state.index = addr & ADDR_MASK;
            }

            // May point past memory, in which case the next fetch fails.
            Instruction::SetPcToV0PlusAddr(Addr(addr)) => {
                state.program_counter = v[0] as u16 + addr;
            }

            Instruction::SetVxRand(Reg(x), Const(n)) => {
                v[x as usize] = self.rng.gen::<u8>() & n;
            }

            Instruction::Draw(Reg(x), Reg(y), Const(sprite_height)) => {
                let x_coord = v[x as usize] as usize;
                let y_coord = v[y as usize] as usize;
                v[FLAG] = 0;

                // Each sprite row is one byte, rows past the end of memory are skipped
                let sprite_addr = state.index as usize;
                for row in 0..sprite_height as usize {
                    let sprite_row = match state.memory.get(sprite_addr + row) {
                        Some(&byte) => byte,
                        None => break,
                    };
                    for col in 0..8 {
                        if sprite_row & (0x80 >> col) == 0 {
                            continue;
                        }
                        // Collision is judged on the pixel before it is flipped
                        if state.framebuffer.toggle(x_coord + col, y_coord + row) {
                            v[FLAG] = 1;
                        }
                    }
                }
            }

            Instruction::IfKeyDown(Reg(x)) => {
                let condition = state.keypad.is_down(v[x as usize]);
                self.skip_if(condition);
            }

            Instruction::IfKeyUp(Reg(x)) => {
                let condition = !state.keypad.is_down(v[x as usize]);
                self.skip_if(condition);
            }

            Instruction::SetRegToDelayTimer(Reg(x)) => {
                v[x as usize] = state.delay_timer;
            }

            // Rewind onto this instruction until a key is held, so it runs again next cycle.
            Instruction::WaitForKey(Reg(x)) => match state.keypad.first_down() {
                Some(key) => v[x as usize] = key,
                None => state.program_counter = state.program_counter.wrapping_sub(2),
            },

            Instruction::SetDelayTimerToReg(Reg(x)) => {
                state.delay_timer = v[x as usize];
            }

            Instruction::SetSoundTimerToReg(Reg(x)) => {
                state.sound_timer = v[x as usize];
            }

            Instruction::AddRegToI(Reg(x)) => {
                state.index = state.index.wrapping_add(v[x as usize] as u16) & ADDR_MASK;
            }

            Instruction::SetIToGlyph(Reg(x)) => {
                state.index = (v[x as usize] as u16 * GLYPH_SIZE) & ADDR_MASK;
            }

            // Hundreds, tens and ones, dropping any digit that would land past memory.
            Instruction::StoreBcd(Reg(x)) => {
                let value = v[x as usize];
                let digits = [value / 100, value / 10 % 10, value % 10];
                let i = state.index as usize;
                for (offset, &digit) in digits.iter().enumerate() {
                    if let Some(cell) = state.memory.get_mut(i + offset) {
                        *cell = digit;
                    }
                }
            }

            // Dump register values up to Vx
            Instruction::RegDump(Reg(x)) => {
                let i = state.index as usize;
                for reg_no in 0..=x as usize {
                    match state.memory.get_mut(i + reg_no) {
                        Some(cell) => *cell = v[reg_no],
                        None => break,
                    }
                }
            }

            // Load register values up to Vx
            Instruction::RegLoad(Reg(x)) => {
                let i = state.index as usize;
                for reg_no in 0..=x as usize {
                    match state.memory.get(i + reg_no) {
                        Some(&byte) => v[reg_no] = byte,
                        None => break,
                    }
                }
            }
        };

        Ok(())
    }
}

impl Default for Emulator {
    fn default() -> Self {
        Self::new()
    }
}
