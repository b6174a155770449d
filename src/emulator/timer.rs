//! Countdown timers and the pacing of the two clocks driving the emulator.
//!
//! Instructions run at a configurable rate, while the delay and sound timers
//! always count down at 60 Hz. The `Pacer` keeps the two apart, so running
//! more instructions per frame doesn't make the timers run faster.

use std::time::Duration;

use crate::emulator::state::State;

pub const TIMER_HZ: u32 = 60;

/// The most wall-clock time a single `Pacer::advance` will account for.
pub const MAX_FRAME_TIME: Duration = Duration::from_millis(250);

/// Decrement both timers by one, stopping at zero.
pub fn tick(state: &mut State) {
    state.delay_timer = state.delay_timer.saturating_sub(1);
    state.sound_timer = state.sound_timer.saturating_sub(1);
}

/// How much work is owed after some time has passed.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Budget {
    pub cycles: u32,
    pub ticks: u32,
}

/// Turns elapsed time into instruction cycles and timer ticks.
#[derive(Debug, Clone)]
pub struct Pacer {
    cycle_interval: Duration,
    tick_interval: Duration,
    cycle_debt: Duration,
    tick_debt: Duration,
}

impl Pacer {
    /// A rate of zero is treated as one instruction per second.
    /// Rates above one per nanosecond run one instruction per nanosecond.
    pub fn new(cycles_per_second: u32) -> Pacer {
        let cycle_interval = Duration::from_secs(1) / cycles_per_second.max(1);
        Pacer {
            cycle_interval: cycle_interval.max(Duration::from_nanos(1)),
            tick_interval: Duration::from_secs(1) / TIMER_HZ,
            cycle_debt: Duration::from_secs(0),
            tick_debt: Duration::from_secs(0),
        }
    }

    pub fn advance(&mut self, elapsed: Duration) -> Budget {
        let elapsed = elapsed.min(MAX_FRAME_TIME);
        self.cycle_debt += elapsed;
        self.tick_debt += elapsed;
        Budget {
            cycles: settle(&mut self.cycle_debt, self.cycle_interval),
            ticks: settle(&mut self.tick_debt, self.tick_interval),
        }
    }
}

/// Take as many whole intervals out of `debt` as fit, returning the count.
fn settle(debt: &mut Duration, interval: Duration) -> u32 {
    let count = (debt.as_nanos() / interval.as_nanos()) as u32;
    *debt -= interval * count;
    count
}
