use core::marker::PhantomData;

use embedded_hal::delay::DelayNs;

use crate::gpio::{
    GpioError,
    family::DeviceFamily,
    mapper::RegisterMapper,
    pull::{PULL_SETTLE_MS, PullSequencer},
    table::DeviceHandleTable,
    types::PullMode,
    window::{RegisterWindow, WindowSource},
};

// Builder states
pub struct NeedFamily;
pub struct NeedWindow;
pub struct NeedDelay;
pub struct Ready;

/// Typestate builder for a [`DeviceHandleTable`].
///
/// ```rust,no_run
/// use gpio_window::prelude::*;
/// # struct Spin;
/// # impl embedded_hal::delay::DelayNs for Spin { fn delay_ns(&mut self, _: u32) {} }
/// # let mapper: StaticMapper = unimplemented!();
///
/// let leds = GpioControllerBuilder::new()
///     .family(LED_FAMILY)
///     .mapper(mapper)
///     .delay(Spin)
///     .build()
///     .unwrap();
/// leds.initialize().unwrap();
/// ```
pub struct GpioControllerBuilder<F, W, D, State> {
    family: F,
    window: W,
    delay: D,
    pull: Option<PullMode>,
    settle_ms: u32,
    _phantom: PhantomData<State>,
}

// Start the builder
impl GpioControllerBuilder<(), (), (), NeedFamily> {
    pub fn new() -> Self {
        GpioControllerBuilder {
            family: (),
            window: (),
            delay: (),
            pull: None,
            settle_ms: PULL_SETTLE_MS,
            _phantom: PhantomData,
        }
    }

    /// Set the device family (node prefix, role and pin table).
    pub fn family(
        self,
        family: DeviceFamily,
    ) -> GpioControllerBuilder<DeviceFamily, (), (), NeedWindow> {
        GpioControllerBuilder {
            family,
            window: (),
            delay: (),
            pull: self.pull,
            settle_ms: self.settle_ms,
            _phantom: PhantomData,
        }
    }
}

impl Default for GpioControllerBuilder<(), (), (), NeedFamily> {
    fn default() -> Self {
        Self::new()
    }
}

// Set the register window
impl GpioControllerBuilder<DeviceFamily, (), (), NeedWindow> {
    /// Lease from a shared window, e.g. a `static` used by every family.
    pub fn window<'w, M: RegisterMapper>(
        self,
        window: &'w RegisterWindow<M>,
    ) -> GpioControllerBuilder<DeviceFamily, &'w RegisterWindow<M>, (), NeedDelay> {
        GpioControllerBuilder {
            family: self.family,
            window,
            delay: (),
            pull: self.pull,
            settle_ms: self.settle_ms,
            _phantom: PhantomData,
        }
    }

    /// Give this family a private window over `mapper`.
    pub fn mapper<M: RegisterMapper>(
        self,
        mapper: M,
    ) -> GpioControllerBuilder<DeviceFamily, RegisterWindow<M>, (), NeedDelay> {
        GpioControllerBuilder {
            family: self.family,
            window: RegisterWindow::new(mapper),
            delay: (),
            pull: self.pull,
            settle_ms: self.settle_ms,
            _phantom: PhantomData,
        }
    }
}

// Set the settle delay provider
impl<W: WindowSource> GpioControllerBuilder<DeviceFamily, W, (), NeedDelay> {
    pub fn delay<D: DelayNs>(self, delay: D) -> GpioControllerBuilder<DeviceFamily, W, D, Ready> {
        GpioControllerBuilder {
            family: self.family,
            window: self.window,
            delay,
            pull: self.pull,
            settle_ms: self.settle_ms,
            _phantom: PhantomData,
        }
    }
}

impl<W: WindowSource, D: DelayNs> GpioControllerBuilder<DeviceFamily, W, D, Ready> {
    /// Override the family's pull mode.
    pub fn pull_mode(mut self, pull: PullMode) -> Self {
        self.pull = Some(pull);
        self
    }

    /// Settle time between pull-control steps, clamped to at least 1 ms.
    pub fn settle_ms(mut self, ms: u32) -> Self {
        self.settle_ms = ms;
        self
    }

    /// Validate the family and build the controller.
    ///
    /// Fails with `InvalidPin` if the family lists a pin above 31 or the
    /// same pin twice. No register is touched.
    pub fn build(self) -> Result<DeviceHandleTable<W, D>, GpioError> {
        let pins = self.family.pin_table()?;
        let pull = PullSequencer::new(self.pull.unwrap_or(self.family.pull), self.settle_ms);
        Ok(DeviceHandleTable::new(
            self.family,
            pins,
            pull,
            self.window,
            self.delay,
        ))
    }
}
