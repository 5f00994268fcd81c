//! A `no_std`, no-alloc controller for a shared GPIO register window.
//!
//! Four LED outputs and three switch inputs are exposed as per-minor
//! device endpoints, all multiplexed over one memory-mapped GPIO register
//! block. The crate owns the hard part: mapping that block exactly once,
//! sharing it between any number of open handles, demultiplexing it into
//! per-pin function and level operations, and unmapping it when the last
//! handle closes. Creating device nodes is left to the surrounding device
//! framework, which forwards its file operations to a
//! [`DeviceHandleTable`](gpio::DeviceHandleTable).
//!
//! # Architecture
//!
//! ```text
//! open(minor) ──▶ DeviceHandleTable ──▶ RegisterWindow::acquire()
//!                      │                 (maps on first lease)
//!                      │
//!   write('1'|'0') ────┼──▶ RegisterView::set_bits / clear_bits
//!   read()  ───────────┼──▶ PullSequencer::sample ──▶ GPLEV0
//!                      │
//! close(handle) ───────┴──▶ WindowLease dropped (unmaps on last)
//! ```
//!
//! Every register sequence and every change to the open count runs under
//! one `critical_section`, so a function-select read-modify-write or the
//! pull-resistor handshake never interleaves with another caller.
//!
//! # Example
//!
//! ```rust,no_run
//! use core::ptr::NonNull;
//! use gpio_window::prelude::*;
//!
//! # struct Spin;
//! # impl embedded_hal::delay::DelayNs for Spin { fn delay_ns(&mut self, _: u32) {} }
//! // Bare metal: the GPIO block is identity mapped. One window serves
//! // every family, so the block is mapped once however many are open.
//! static WINDOW: RegisterWindow<StaticMapper> = RegisterWindow::new(unsafe {
//!     StaticMapper::new(NonNull::new_unchecked(0x3F20_0000 as *mut u32))
//! });
//!
//! let leds = GpioControllerBuilder::new()
//!     .family(LED_FAMILY)
//!     .window(&WINDOW)
//!     .delay(Spin)
//!     .build()
//!     .unwrap();
//! let switches = GpioControllerBuilder::new()
//!     .family(SWITCH_FAMILY)
//!     .window(&WINDOW)
//!     .delay(Spin)
//!     .build()
//!     .unwrap();
//! leds.initialize().unwrap();
//! switches.initialize().unwrap();
//!
//! let led = leds.open(0).unwrap();
//! leds.write(&led, b"1").unwrap();
//!
//! let mut handle = switches.open(0).unwrap();
//! let mut line = [0u8; 2];
//! let n = switches.read(&mut handle, &mut line).unwrap();
//! assert_eq!(&line[..n], b"1\n");
//! assert_eq!(switches.read(&mut handle, &mut line).unwrap(), 0);
//! switches.close(handle);
//! leds.close(led);
//! ```

#![deny(unsafe_code)]
#![no_std]

pub mod gpio;

pub mod prelude {
    pub use crate::gpio::prelude::*;
}
