//! `embedded-hal` digital pin adapter over an open device handle.

use embedded_hal::{
    delay::DelayNs,
    digital::{ErrorType, InputPin, OutputPin},
};

use crate::gpio::{
    GpioError,
    table::{DeviceHandle, DeviceHandleTable},
    window::WindowSource,
};

/// Borrows a controller and one of its open handles as a HAL pin.
///
/// Output handles support [`OutputPin`], input handles [`InputPin`]; the
/// other direction fails with [`GpioError::Unsupported`]. Reads sample
/// the live level every time, unlike the single-shot device read.
pub struct HalPin<'t, 'h, W: WindowSource, D: DelayNs> {
    table: &'t DeviceHandleTable<W, D>,
    handle: &'h DeviceHandle<'t, W::Mapper>,
}

impl<'t, 'h, W: WindowSource, D: DelayNs> HalPin<'t, 'h, W, D> {
    pub fn new(
        table: &'t DeviceHandleTable<W, D>,
        handle: &'h DeviceHandle<'t, W::Mapper>,
    ) -> Self {
        Self { table, handle }
    }
}

impl<W: WindowSource, D: DelayNs> ErrorType for HalPin<'_, '_, W, D> {
    type Error = GpioError;
}

impl<W: WindowSource, D: DelayNs> OutputPin for HalPin<'_, '_, W, D> {
    #[inline]
    fn set_high(&mut self) -> Result<(), Self::Error> {
        self.table.drive(self.handle, true)
    }

    #[inline]
    fn set_low(&mut self) -> Result<(), Self::Error> {
        self.table.drive(self.handle, false)
    }
}

impl<W: WindowSource, D: DelayNs> InputPin for HalPin<'_, '_, W, D> {
    fn is_high(&mut self) -> Result<bool, Self::Error> {
        self.table.sample(self.handle)
    }

    fn is_low(&mut self) -> Result<bool, Self::Error> {
        self.is_high().map(|high| !high)
    }
}
