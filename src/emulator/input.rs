pub const NUM_KEYS: usize = 16;

/// The state of the 16-key hexadecimal keypad.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Keypad {
    keys: [bool; NUM_KEYS],
}

impl Keypad {
    pub fn new() -> Keypad {
        Keypad::default()
    }

    /// Mark a key as pressed or released. Codes outside 0x0..=0xF are ignored.
    pub fn set_key(&mut self, code: u8, down: bool) {
        if let Some(key) = self.keys.get_mut(code as usize) {
            *key = down;
        }
    }

    /// Whether the key is currently held. Codes outside 0x0..=0xF are never down.
    pub fn is_down(&self, code: u8) -> bool {
        self.keys.get(code as usize).copied().unwrap_or(false)
    }

    /// The lowest-numbered key that is currently held, if any.
    pub fn first_down(&self) -> Option<u8> {
        self.keys.iter().position(|&down| down).map(|code| code as u8)
    }
}

/// Represents an input device that updates the keypad, typically once per frame.
pub trait EmulatorInput {
    fn poll(&mut self, keypad: &mut Keypad);
}

/// An input device that never provides any input
pub struct DummyInput;

impl EmulatorInput for DummyInput {
    fn poll(&mut self, _: &mut Keypad) {}
}
