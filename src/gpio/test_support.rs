//! Test support utilities - only compiled in test builds.

use core::cell::Cell;

use embedded_hal::delay::DelayNs;

use crate::gpio::{
    error::MapError,
    mapper::RegisterMapper,
    regs::{GPCLR0, GPSET0, RegisterBlock, WINDOW_WORDS},
};

/// In-memory register block.
///
/// Writes to the set/clear registers are also applied to `latch`, which
/// models the output level the hardware would drive.
pub struct FakeBlock {
    pub words: [u32; WINDOW_WORDS],
    pub latch: u32,
    pub writes: heapless::Vec<(usize, u32), 256>,
}

impl FakeBlock {
    pub fn new() -> Self {
        Self {
            words: [0; WINDOW_WORDS],
            latch: 0,
            writes: heapless::Vec::new(),
        }
    }
}

impl Default for FakeBlock {
    fn default() -> Self {
        Self::new()
    }
}

impl RegisterBlock for FakeBlock {
    fn read(&self, index: usize) -> u32 {
        self.words[index]
    }

    fn write(&mut self, index: usize, value: u32) {
        match index {
            GPSET0 => self.latch |= value,
            GPCLR0 => self.latch &= !value,
            _ => {}
        }
        self.words[index] = value;
        let _ = self.writes.push((index, value));
    }
}

/// Mapper over a [`FakeBlock`] that survives map cycles.
///
/// The block's contents are moved back into the mapper on unmap so tests
/// can inspect them after the window closes.
#[derive(Default)]
pub struct FakeMapper {
    pub block: Option<FakeBlock>,
    pub maps: usize,
    pub unmaps: usize,
    pub fail: bool,
    pub last_request: Option<(usize, usize)>,
}

impl FakeMapper {
    pub fn new() -> Self {
        Self {
            block: Some(FakeBlock::new()),
            ..Self::default()
        }
    }

    pub fn failing() -> Self {
        Self {
            fail: true,
            ..Self::new()
        }
    }

    /// Preloads a register word visible on the next map.
    pub fn with_word(mut self, index: usize, value: u32) -> Self {
        if let Some(block) = self.block.as_mut() {
            block.words[index] = value;
        }
        self
    }

    pub fn block(&self) -> &FakeBlock {
        self.block.as_ref().expect("block is mapped")
    }
}

impl RegisterMapper for FakeMapper {
    type Block = FakeBlock;

    fn map(&mut self, phys_base: usize, len: usize) -> Result<FakeBlock, MapError> {
        if self.fail {
            return Err(MapError);
        }
        self.maps += 1;
        self.last_request = Some((phys_base, len));
        Ok(self.block.take().unwrap_or_default())
    }

    fn unmap(&mut self, block: FakeBlock) {
        self.unmaps += 1;
        self.block = Some(block);
    }
}

/// Delay that returns immediately.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoopDelay;

impl DelayNs for NoopDelay {
    fn delay_ns(&mut self, _ns: u32) {}
}

/// Delay that records how often and how long it was asked to wait.
pub struct CountingDelay<'a> {
    pub calls: &'a Cell<u32>,
    pub total_ns: &'a Cell<u64>,
}

impl DelayNs for CountingDelay<'_> {
    fn delay_ns(&mut self, ns: u32) {
        self.calls.set(self.calls.get() + 1);
        self.total_ns.set(self.total_ns.get() + ns as u64);
    }
}
