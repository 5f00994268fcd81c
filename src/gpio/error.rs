/// Errors that can occur while driving the GPIO register window.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GpioError {
    /// The register range could not be mapped.
    Map,
    /// Open requested outside the family's minor range.
    InvalidMinor,
    /// Release without an outstanding acquire, or access while unmapped.
    Lifecycle,
    /// Pin number above 31, or a pin listed twice in one family.
    InvalidPin,
    /// Operation not defined for the handle's pin role.
    Unsupported,
    /// Register index outside the mapped window.
    OutOfBounds,
}

impl core::fmt::Display for GpioError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            GpioError::Map => write!(f, "register range could not be mapped"),
            GpioError::InvalidMinor => write!(f, "minor number outside configured range"),
            GpioError::Lifecycle => write!(f, "register window released while not acquired"),
            GpioError::InvalidPin => write!(f, "pin number invalid or duplicated"),
            GpioError::Unsupported => write!(f, "operation not supported for this pin role"),
            GpioError::OutOfBounds => write!(f, "register index outside the mapped window"),
        }
    }
}

impl embedded_hal::digital::Error for GpioError {
    fn kind(&self) -> embedded_hal::digital::ErrorKind {
        embedded_hal::digital::ErrorKind::Other
    }
}

/// Failure reported by a [`RegisterMapper`](crate::gpio::RegisterMapper).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct MapError;

impl From<MapError> for GpioError {
    fn from(_: MapError) -> Self {
        GpioError::Map
    }
}
