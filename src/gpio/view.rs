use crate::gpio::{
    GpioError,
    helpers::function_select_field,
    regs::{GPCLR0, GPLEV0, GPSET0, RegisterBlock, WINDOW_WORDS},
    types::{Pin, PinFunction},
};

/// Scoped access to the mapped register block.
///
/// A view only exists inside a [`WindowLease`](crate::gpio::WindowLease)
/// critical section, so multi-step sequences built from its methods never
/// interleave with another caller.
pub struct RegisterView<'a, B: RegisterBlock> {
    block: &'a mut B,
}

impl<'a, B: RegisterBlock> core::fmt::Debug for RegisterView<'a, B> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("RegisterView").finish_non_exhaustive()
    }
}

impl<'a, B: RegisterBlock> RegisterView<'a, B> {
    pub(crate) fn new(block: &'a mut B) -> Self {
        Self { block }
    }

    /// Selects the pin's function with a read-modify-write of its
    /// function-select word. Only the pin's 3-bit field changes.
    pub fn set_function(&mut self, pin: Pin, function: PinFunction) {
        let field = function_select_field(pin);
        let word = self.block.read(field.index);
        let word = (word & !field.mask()) | ((function.code() & 0x07) << field.shift);
        self.block.write(field.index, word);
    }

    /// Returns the raw 3-bit function code currently selected for `pin`.
    pub fn function_code(&self, pin: Pin) -> u32 {
        let field = function_select_field(pin);
        (self.block.read(field.index) & field.mask()) >> field.shift
    }

    /// Drives the masked output bits high; other outputs keep their level.
    #[inline]
    pub fn set_bits(&mut self, mask: u32) {
        self.block.write(GPSET0, mask);
    }

    /// Drives the masked output bits low; other outputs keep their level.
    #[inline]
    pub fn clear_bits(&mut self, mask: u32) {
        self.block.write(GPCLR0, mask);
    }

    /// Raw input level register.
    #[inline]
    pub fn levels(&self) -> u32 {
        self.block.read(GPLEV0)
    }

    /// Returns true if the pin's input level bit is set.
    #[inline]
    pub fn level(&self, pin: Pin) -> bool {
        self.levels() & pin.mask() != 0
    }

    /// Raw read of any word in the window.
    ///
    /// Returns `OutOfBounds` for an index past the end of the window.
    pub fn read_word(&self, index: usize) -> Result<u32, GpioError> {
        if index >= WINDOW_WORDS {
            return Err(GpioError::OutOfBounds);
        }
        Ok(self.block.read(index))
    }

    pub(crate) fn write_word(&mut self, index: usize, value: u32) {
        self.block.write(index, value);
    }
}
