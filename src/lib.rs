/*!

A CHIP-8 virtual machine as specified at https://en.wikipedia.org/wiki/CHIP-8.

# Runner

To try the emulator on a program without any screen or keyboard attached,
use `cargo run --release -- <program> --frames 600 --dump`.
This runs ten seconds worth of frames and prints the final screen.

# Library

The main way of running a program is to load instructions as bytes and step through them.

```rust
use emu8::emulator::Emulator;

let mut emulator = Emulator::new();

// Load a program at address 0x200.
let clear_display = [0x00, 0xE0];
emulator.load(&clear_display).unwrap();
emulator.step().unwrap(); // Will now clear the display
```

Alternatively, you can experiment by executing instructions manually.

```rust
use emu8::emulator::Emulator;
use emu8::emulator::instruction::{Instruction, Reg, Const, Addr};

let mut emulator = Emulator::new();

// Execute raw instruction words
emulator.execute(0x00E0).unwrap();

// Or many decoded instructions sequentially
emulator.execute_many(&[
    Instruction::Goto(Addr(0x250)),
    Instruction::SetRegToConst(Reg(0xA), Const(35)),
    Instruction::SetRegToReg(Reg(0xB), Reg(0xA))
]).unwrap();
assert_eq!(emulator.state().registers[0xB], 35);
```

Faults tell you whether the program can keep going.

```rust
use emu8::emulator::{Emulator, Fault};

let mut emulator = Emulator::new();
let fault = emulator.execute(0x00EE).unwrap_err();
assert_eq!(fault, Fault::StackUnderflow);
assert!(fault.is_fatal());
```

## Custom input and output

To drive the emulator in real time, implement `EmulatorInput` and `EmulatorOutput`,
which represent somewhere to get keyboard input from and a screen respectively.
Take a look at `src/emulator/input.rs` and `src/emulator/output.rs` to see how to implement this,
then hand them to a `Host`, which keeps instructions and the 60 Hz timers on separate clocks.

```ignore
use emu8::emulator::host::{Host, HostConfig};

let mut host = Host::new(emulator, MyInput::new(), MyOutput::new(), HostConfig::default());
host.run()?;
```
*/

pub mod emulator;
pub mod util;
