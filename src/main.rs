use std::error::Error;
use std::path::PathBuf;

use log::LevelFilter;
use structopt::StructOpt;

use emu8::emulator::host::{Host, HostConfig, DEFAULT_CYCLES_PER_SECOND};
use emu8::emulator::input::DummyInput;
use emu8::emulator::output::DummyOutput;
use emu8::emulator::Emulator;

/// Run a CHIP-8 program without a screen or keyboard attached.
#[derive(StructOpt, Debug)]
#[structopt(name = "emu8")]
struct Opt {
    /// Instructions to execute per second
    #[structopt(short, long, default_value = "700")]
    cycles_per_second: u32,

    /// Stop after this many frames (60 per second)
    #[structopt(short, long)]
    frames: Option<u64>,

    /// Seed for the random number instruction
    #[structopt(long)]
    seed: Option<u64>,

    /// Print the screen when the program stops
    #[structopt(long)]
    dump: bool,

    /// Verbose mode (-v, -vv, -vvv, etc.)
    #[structopt(short, long, parse(from_occurrences))]
    verbose: u8,

    /// The program to execute
    #[structopt(parse(from_os_str))]
    input: PathBuf,
}

fn init_logging(verbose: u8) {
    let mut builder = env_logger::Builder::from_default_env();
    let builder = match verbose {
        0 => &mut builder,
        1 => builder.filter_level(LevelFilter::Info),
        2 => builder.filter_level(LevelFilter::Debug),
        _ => builder.filter_level(LevelFilter::Trace),
    };
    builder.init();
}

fn main() -> Result<(), Box<dyn Error>> {

    // Get configuration and read input file
    let opt = Opt::from_args();
    init_logging(opt.verbose);
    log::info!("Executing {:?}", &opt.input);
    let program = std::fs::read(&opt.input)?;

    // Load instructions into emulator memory
    let mut emulator = match opt.seed {
        Some(seed) => Emulator::with_seed(seed),
        None => Emulator::new(),
    };
    emulator.load(&program)?;

    if opt.cycles_per_second == 0 {
        log::warn!("Instruction rate must be positive, using {}", DEFAULT_CYCLES_PER_SECOND);
    }
    let config = HostConfig {
        cycles_per_second: match opt.cycles_per_second {
            0 => DEFAULT_CYCLES_PER_SECOND,
            rate => rate,
        },
        frame_limit: opt.frames,
    };

    // Start execution
    let mut host = Host::new(emulator, DummyInput, DummyOutput, config);
    let result = host.run();

    if opt.dump {
        print!("{}", host.emulator().framebuffer());
    }

    result?;
    Ok(())
}
