//! The CHIP-8 virtual machine as described at https://en.wikipedia.org/wiki/CHIP-8#Virtual_machine_description.

pub mod emulator;
pub mod error;
pub mod host;
pub mod input;
pub mod instruction;
pub mod loader;
pub mod output;
pub mod state;
pub mod timer;

pub use self::emulator::Emulator;
pub use self::error::Fault;
