use core::cell::RefCell;

use critical_section::Mutex;
use embedded_hal::delay::DelayNs;

use crate::gpio::{
    GpioError,
    family::{DeviceFamily, NODE_NAME_LEN, PinTable},
    mapper::RegisterMapper,
    pull::PullSequencer,
    types::{PinAssignment, PinRole},
    window::{RegisterWindow, WindowLease, WindowSource},
};

/// One open device endpoint.
///
/// Holds a lease on the register window for as long as it lives, so the
/// window stays mapped until every handle is closed.
pub struct DeviceHandle<'a, M: RegisterMapper> {
    assignment: PinAssignment,
    position: usize,
    lease: WindowLease<'a, M>,
}

impl<'a, M: RegisterMapper> core::fmt::Debug for DeviceHandle<'a, M> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("DeviceHandle")
            .field("assignment", &self.assignment)
            .field("position", &self.position)
            .finish_non_exhaustive()
    }
}

impl<'a, M: RegisterMapper> DeviceHandle<'a, M> {
    pub fn minor(&self) -> u32 {
        self.assignment.minor
    }

    pub fn assignment(&self) -> PinAssignment {
        self.assignment
    }

    /// Stream position; nonzero once the single read has been served.
    pub fn position(&self) -> usize {
        self.position
    }
}

/// Per-minor device endpoints of one family over a register window.
///
/// `W` is either an owned [`RegisterWindow`] or a shared
/// `&RegisterWindow`; families built over the same shared window lease
/// from one open count and map the block once.
///
/// The external device framework forwards its open/read/write/release
/// calls here; node creation and minor allocation stay outside.
pub struct DeviceHandleTable<W: WindowSource, D: DelayNs> {
    family: DeviceFamily,
    pins: PinTable,
    pull: PullSequencer,
    window: W,
    delay: Mutex<RefCell<D>>,
}

impl<W: WindowSource, D: DelayNs> core::fmt::Debug for DeviceHandleTable<W, D> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("DeviceHandleTable")
            .field("family", &self.family.name)
            .field("pins", &self.pins)
            .field("window", self.window.window())
            .finish_non_exhaustive()
    }
}

impl<W: WindowSource, D: DelayNs> DeviceHandleTable<W, D> {
    pub(crate) fn new(
        family: DeviceFamily,
        pins: PinTable,
        pull: PullSequencer,
        window: W,
        delay: D,
    ) -> Self {
        Self {
            family,
            pins,
            pull,
            window,
            delay: Mutex::new(RefCell::new(delay)),
        }
    }

    pub fn family(&self) -> &DeviceFamily {
        &self.family
    }

    pub fn pull(&self) -> &PullSequencer {
        &self.pull
    }

    pub fn window(&self) -> &RegisterWindow<W::Mapper> {
        self.window.window()
    }

    pub fn minor_count(&self) -> u32 {
        self.pins.len() as u32
    }

    /// Number of handles currently open.
    pub fn open_handles(&self) -> usize {
        self.window().open_count()
    }

    pub fn assignment(&self, minor: u32) -> Result<PinAssignment, GpioError> {
        self.pins
            .get(minor as usize)
            .copied()
            .ok_or(GpioError::InvalidMinor)
    }

    pub fn node_name(&self, minor: u32) -> Result<heapless::String<NODE_NAME_LEN>, GpioError> {
        self.family.node_name(minor)
    }

    /// Establishes the role of every pin in the family.
    ///
    /// Maps the window for the duration of the call only.
    pub fn initialize(&self) -> Result<(), GpioError> {
        log::info!("{} loading...", self.family.name);
        let lease = self.window().acquire()?;
        lease.with_view(|view| {
            for a in self.pins.iter() {
                view.set_function(a.pin, a.role.function());
            }
        })
    }

    /// Opens the endpoint for `minor` and (re)establishes its pin role.
    pub fn open(&self, minor: u32) -> Result<DeviceHandle<'_, W::Mapper>, GpioError> {
        let assignment = self.assignment(minor).map_err(|e| {
            log::warn!("{}: open request for invalid minor {}", self.family.name, minor);
            e
        })?;
        log::info!("{}: open request minor: {}", self.family.name, minor);

        let lease = self.window().acquire()?;
        lease.with_view(|view| view.set_function(assignment.pin, assignment.role.function()))?;

        Ok(DeviceHandle {
            assignment,
            position: 0,
            lease,
        })
    }

    /// Closes a handle, unmapping the window if it was the last one.
    pub fn close(&self, handle: DeviceHandle<'_, W::Mapper>) {
        log::debug!("{}: release minor: {}", self.family.name, handle.minor());
        drop(handle);
    }

    /// Drives an output pin high or low.
    pub fn drive(&self, handle: &DeviceHandle<'_, W::Mapper>, high: bool) -> Result<(), GpioError> {
        let a = handle.assignment;
        if a.role != PinRole::Output {
            return Err(GpioError::Unsupported);
        }
        handle.lease.with_view(|view| {
            if high {
                view.set_bits(a.pin.mask());
            } else {
                view.clear_bits(a.pin.mask());
            }
        })
    }

    /// Samples an input pin through the pull-resistor handshake.
    pub fn sample(&self, handle: &DeviceHandle<'_, W::Mapper>) -> Result<bool, GpioError> {
        let a = handle.assignment;
        if a.role != PinRole::Input {
            return Err(GpioError::Unsupported);
        }
        critical_section::with(|cs| {
            let mut delay = self.delay.borrow_ref_mut(cs);
            handle
                .lease
                .with_view_in(cs, |view| self.pull.sample(view, a.pin, &mut *delay))
        })
    }

    /// Device write: `'1'` sets the pin, `'0'` clears it, anything else is
    /// accepted and ignored. Consumes one byte when `buf` is non-empty.
    pub fn write(&self, handle: &DeviceHandle<'_, W::Mapper>, buf: &[u8]) -> Result<usize, GpioError> {
        if handle.assignment.role != PinRole::Output {
            return Err(GpioError::Unsupported);
        }
        let Some(&byte) = buf.first() else {
            return Ok(0);
        };
        match byte {
            b'1' => self.drive(handle, true)?,
            b'0' => self.drive(handle, false)?,
            _ => {}
        }
        Ok(1)
    }

    /// Device read: the first read returns `"0\n"` or `"1\n"`, every later
    /// read returns 0 bytes.
    pub fn read(&self, handle: &mut DeviceHandle<'_, W::Mapper>, buf: &mut [u8]) -> Result<usize, GpioError> {
        if handle.assignment.role != PinRole::Input {
            return Err(GpioError::Unsupported);
        }
        if handle.position > 0 || buf.is_empty() {
            return Ok(0);
        }

        let level = self.sample(handle)?;
        let line = [if level { b'1' } else { b'0' }, b'\n'];

        let n = line.len().min(buf.len());
        buf[..n].copy_from_slice(&line[..n]);
        handle.position += line.len();
        Ok(n)
    }
}
