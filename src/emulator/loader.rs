use crate::emulator::error::Fault;
use crate::emulator::state::{State, MEM_SIZE, PC_START};

pub const FONT_START: usize = 0x000;
pub const MAX_ROM_SIZE: usize = MEM_SIZE - PC_START as usize;

/// Sprites for the hexadecimal digits 0-F, five bytes each.
pub const FONT: [u8; 80] = [
    0xF0, 0x90, 0x90, 0x90, 0xF0, // 0
    0x20, 0x60, 0x20, 0x20, 0x70, // 1
    0xF0, 0x10, 0xF0, 0x80, 0xF0, // 2
    0xF0, 0x10, 0xF0, 0x10, 0xF0, // 3
    0x90, 0x90, 0xF0, 0x10, 0x10, // 4
    0xF0, 0x80, 0xF0, 0x10, 0xF0, // 5
    0xF0, 0x80, 0xF0, 0x90, 0xF0, // 6
    0xF0, 0x10, 0x20, 0x40, 0x40, // 7
    0xF0, 0x90, 0xF0, 0x90, 0xF0, // 8
    0xF0, 0x90, 0xF0, 0x10, 0xF0, // 9
    0xF0, 0x90, 0xF0, 0x90, 0x90, // A
    0xE0, 0x90, 0xE0, 0x90, 0xE0, // B
    0xF0, 0x80, 0x80, 0x80, 0xF0, // C
    0xE0, 0x90, 0x90, 0x90, 0xE0, // D
    0xF0, 0x80, 0xF0, 0x80, 0xF0, // E
    0xF0, 0x80, 0xF0, 0x80, 0x80, // F
];

/// Bytes per glyph in `FONT`.
pub const GLYPH_SIZE: u16 = 5;

pub fn load_font(state: &mut State) {
    state.memory[FONT_START..FONT_START + FONT.len()].copy_from_slice(&FONT);
}

/// Copy a program into memory at `PC_START`.
/// Nothing is written if the program doesn't fit.
pub fn load(state: &mut State, rom: &[u8]) -> Result<(), Fault> {
    if rom.len() > MAX_ROM_SIZE {
        return Err(Fault::RomTooLarge {
            size: rom.len(),
            max_size: MAX_ROM_SIZE,
        });
    }

    let start = PC_START as usize;
    state.memory[start..start + rom.len()].copy_from_slice(rom);
    log::info!("Loaded {} bytes at {:#05X}", rom.len(), start);
    log::debug!("{} bytes of program space left", MAX_ROM_SIZE - rom.len());

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn font_is_in_low_memory() {
        let state = State::new();
        assert_eq!(&state.memory[0x000..0x050], &FONT[..]);
    }

    #[test]
    fn rom_lands_at_program_start() {
        let mut state = State::new();
        load(&mut state, &[0x00, 0xE0, 0x12, 0x00]).unwrap();
        assert_eq!(&state.memory[0x200..0x204], &[0x00, 0xE0, 0x12, 0x00]);
        assert_eq!(state.memory[0x204], 0);
        assert_eq!(state.program_counter, PC_START);
    }

    #[test]
    fn largest_rom_fills_memory() {
        let mut state = State::new();
        let rom = vec![0xAB; MAX_ROM_SIZE];
        load(&mut state, &rom).unwrap();
        assert_eq!(state.memory[MEM_SIZE - 1], 0xAB);
    }

    #[test]
    fn oversized_rom_is_rejected_untouched() {
        let mut state = State::new();
        let rom = vec![0xAB; MAX_ROM_SIZE + 1];
        assert_eq!(
            load(&mut state, &rom),
            Err(Fault::RomTooLarge { size: 3585, max_size: 3584 })
        );
        assert!(state.memory[0x200..].iter().all(|&b| b == 0));
    }
}
