#![allow(unsafe_code)]

//! Fixed register layout of the GPIO block and raw word access.

use core::ptr::NonNull;

/// Base of the peripheral bus as seen by the ARM core.
pub const PERIPHERAL_BASE: usize = 0x3F00_0000;
/// Offset of the GPIO block inside the peripheral range.
pub const GPIO_OFFSET: usize = 0x20_0000;
/// Physical address of the GPIO register block.
pub const GPIO_PHYS_BASE: usize = PERIPHERAL_BASE + GPIO_OFFSET;
/// Size of the register window in bytes.
pub const WINDOW_LEN: usize = 0xC0;
/// Number of 32-bit words in the register window.
pub const WINDOW_WORDS: usize = WINDOW_LEN / 4;

/// First function-select word (pins 0-9); words 0-3 cover pins 0-31.
pub const GPFSEL0: usize = 0;
/// Output set register.
pub const GPSET0: usize = 7;
/// Output clear register.
pub const GPCLR0: usize = 10;
/// Input level register.
pub const GPLEV0: usize = 13;
/// Pull-up/down control register.
pub const GPPUD: usize = 37;
/// Pull-up/down clock register.
pub const GPPUDCLK0: usize = 38;

/// Word-addressed access to a mapped register block.
///
/// `index` is a 32-bit word index inside the window, always below
/// [`WINDOW_WORDS`].
pub trait RegisterBlock {
    /// Reads one register word.
    fn read(&self, index: usize) -> u32;
    /// Writes one register word.
    fn write(&mut self, index: usize, value: u32);
}

/// Volatile register access over a mapped base pointer.
#[derive(Debug)]
pub struct MmioBlock {
    base: NonNull<u32>,
}

// The block is only reachable through the window's critical section.
unsafe impl Send for MmioBlock {}

impl MmioBlock {
    /// Wraps a mapped window.
    ///
    /// # Safety
    /// `base` must point to at least [`WINDOW_LEN`] bytes of mapped,
    /// 4-byte aligned device memory that stays valid until the block is
    /// handed back to its mapper.
    pub unsafe fn new(base: NonNull<u32>) -> Self {
        Self { base }
    }

    /// Returns the mapped base address.
    pub fn base(&self) -> NonNull<u32> {
        self.base
    }
}

impl RegisterBlock for MmioBlock {
    #[inline]
    fn read(&self, index: usize) -> u32 {
        assert!(index < WINDOW_WORDS, "register index {} outside window", index);
        unsafe { self.base.as_ptr().add(index).read_volatile() }
    }

    #[inline]
    fn write(&mut self, index: usize, value: u32) {
        assert!(index < WINDOW_WORDS, "register index {} outside window", index);
        unsafe { self.base.as_ptr().add(index).write_volatile(value) }
    }
}
