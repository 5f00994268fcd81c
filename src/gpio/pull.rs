use embedded_hal::delay::DelayNs;

use crate::gpio::{
    regs::{GPPUD, GPPUDCLK0, RegisterBlock},
    types::{Pin, PullMode},
    view::RegisterView,
};

/// Default settle time between pull-control steps.
pub const PULL_SETTLE_MS: u32 = 1;

/// Runs the timed pull-up/down handshake and samples an input pin.
///
/// The pull-control and pull-clock registers are global, so the caller
/// must hold the window's critical section for the whole sequence, which
/// [`RegisterView`] guarantees.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PullSequencer {
    mode: PullMode,
    settle_ms: u32,
}

impl Default for PullSequencer {
    fn default() -> Self {
        Self::new(PullMode::Up, PULL_SETTLE_MS)
    }
}

impl PullSequencer {
    /// `settle_ms` is clamped to at least one millisecond.
    pub const fn new(mode: PullMode, settle_ms: u32) -> Self {
        let settle_ms = if settle_ms == 0 { 1 } else { settle_ms };
        Self { mode, settle_ms }
    }

    pub const fn mode(&self) -> PullMode {
        self.mode
    }

    pub const fn settle_ms(&self) -> u32 {
        self.settle_ms
    }

    /// Latches the pull mode onto `pin`, stops driving the pull circuitry
    /// and returns the pin's input level.
    pub fn sample<B, D>(&self, view: &mut RegisterView<'_, B>, pin: Pin, delay: &mut D) -> bool
    where
        B: RegisterBlock,
        D: DelayNs,
    {
        view.write_word(GPPUD, self.mode.code());
        delay.delay_ms(self.settle_ms);
        view.write_word(GPPUDCLK0, pin.mask());
        delay.delay_ms(self.settle_ms);
        view.write_word(GPPUD, 0);
        view.write_word(GPPUDCLK0, 0);

        view.level(pin)
    }
}
