//! The loop that drives an emulator: input, instructions, timers, then presentation.

use std::thread;
use std::time::{Duration, Instant};

use crate::emulator::emulator::Emulator;
use crate::emulator::error::Fault;
use crate::emulator::input::EmulatorInput;
use crate::emulator::output::EmulatorOutput;
use crate::emulator::timer::{Pacer, TIMER_HZ};

pub const DEFAULT_CYCLES_PER_SECOND: u32 = 700;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HostConfig {
    /// Instructions executed per second of wall-clock time.
    pub cycles_per_second: u32,
    /// Stop after this many frames, or run until a fatal fault.
    pub frame_limit: Option<u64>,
}

impl Default for HostConfig {
    fn default() -> Self {
        HostConfig {
            cycles_per_second: DEFAULT_CYCLES_PER_SECOND,
            frame_limit: None,
        }
    }
}

pub struct Host<I: EmulatorInput, O: EmulatorOutput> {
    emulator: Emulator,
    input: I,
    output: O,
    pacer: Pacer,
    config: HostConfig,
}

impl<I: EmulatorInput, O: EmulatorOutput> Host<I, O> {

    pub fn new(emulator: Emulator, input: I, output: O, config: HostConfig) -> Host<I, O> {
        Host {
            emulator,
            input,
            output,
            pacer: Pacer::new(config.cycles_per_second),
            config,
        }
    }

    pub fn emulator(&self) -> &Emulator {
        &self.emulator
    }

    pub fn output(&self) -> &O {
        &self.output
    }

    /// Run one frame worth of work for `elapsed` wall-clock time.
    /// Only fatal faults are returned, unknown instructions are logged and skipped.
    pub fn run_frame(&mut self, elapsed: Duration) -> Result<(), Fault> {
        self.input.poll(self.emulator.keypad_mut());

        let budget = self.pacer.advance(elapsed);
        for _ in 0..budget.cycles {
            match self.emulator.step() {
                Ok(()) => {}
                Err(fault) if !fault.is_fatal() => log::warn!("{}", fault),
                Err(fault) => return Err(fault),
            }
        }

        for _ in 0..budget.ticks {
            self.emulator.tick_timers();
        }

        self.output.refresh(self.emulator.framebuffer(), self.emulator.is_sounding());
        Ok(())
    }

    /// Run frames at roughly 60 per second until the frame limit is reached.
    /// Returns the number of frames that ran.
    pub fn run(&mut self) -> Result<u64, Fault> {
        let frame_time = Duration::from_secs(1) / TIMER_HZ;
        let mut frames = 0;
        let mut last_frame = Instant::now();

        log::info!("Running at {} instructions per second", self.config.cycles_per_second);
        while self.config.frame_limit.map_or(true, |limit| frames < limit) {
            let now = Instant::now();
            let result = self.run_frame(now.duration_since(last_frame));
            last_frame = now;

            if let Err(fault) = result {
                log::error!("Halted after {} frames: {}", frames, fault);
                return Err(fault);
            }
            frames += 1;

            // Sleep until the next frame is due
            let spent = last_frame.elapsed();
            if spent < frame_time {
                thread::sleep(frame_time - spent);
            }
        }

        log::info!("Stopped after {} frames", frames);
        Ok(frames)
    }
}
