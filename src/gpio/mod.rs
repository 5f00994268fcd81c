pub mod builder;
pub mod error;
pub mod family;
pub mod hal;
pub mod helpers;
pub mod mapper;
pub mod pull;
pub mod regs;
pub mod table;
pub mod types;
pub mod view;
pub mod window;

#[cfg(test)]
mod test_support;

pub use builder::GpioControllerBuilder;
pub use error::{GpioError, MapError};
pub use family::{DeviceFamily, LED_FAMILY, PinTable, SWITCH_FAMILY};
pub use hal::HalPin;
pub use mapper::{RegisterMapper, StaticMapper};
pub use pull::PullSequencer;
pub use regs::{MmioBlock, RegisterBlock};
pub use table::{DeviceHandle, DeviceHandleTable};
pub use types::{Pin, PinAssignment, PinFunction, PinRole, PullMode, RegisterFieldAddress};
pub use view::RegisterView;
pub use window::{RegisterWindow, WindowLease, WindowSource};

pub mod prelude {
    pub use super::{
        DeviceFamily, DeviceHandle, DeviceHandleTable, GpioControllerBuilder, GpioError, HalPin,
        LED_FAMILY, MapError, MmioBlock, Pin, PinAssignment, PinFunction, PinRole, PullMode,
        PullSequencer, RegisterBlock, RegisterMapper, RegisterView, RegisterWindow,
        SWITCH_FAMILY, StaticMapper, WindowLease, WindowSource,
    };
}
