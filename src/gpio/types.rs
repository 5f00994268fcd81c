use crate::gpio::GpioError;

/// Number of pins addressable through the first bank of registers.
pub const MAX_PINS: usize = 32;

/// A validated GPIO pin number in `0..=31`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Pin(u8);

impl Pin {
    /// Returns `InvalidPin` for numbers above 31.
    pub const fn new(number: u8) -> Result<Self, GpioError> {
        if (number as usize) < MAX_PINS {
            Ok(Self(number))
        } else {
            Err(GpioError::InvalidPin)
        }
    }

    #[inline]
    pub const fn number(self) -> u8 {
        self.0
    }

    /// Single-bit mask for this pin in a 32-bit bank register.
    #[inline]
    pub const fn mask(self) -> u32 {
        1 << self.0
    }
}

impl TryFrom<u8> for Pin {
    type Error = GpioError;

    fn try_from(number: u8) -> Result<Self, Self::Error> {
        Pin::new(number)
    }
}

/// 3-bit function-select code.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u32)]
pub enum PinFunction {
    Input = 0b000,
    Output = 0b001,
}

impl PinFunction {
    #[inline]
    pub const fn code(self) -> u32 {
        self as u32
    }
}

/// Role a pin plays inside a device family.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PinRole {
    /// Driven through the set/clear registers.
    Output,
    /// Sampled through the pull sequencer.
    Input,
}

impl PinRole {
    /// Function-select code that establishes this role.
    pub const fn function(self) -> PinFunction {
        match self {
            PinRole::Output => PinFunction::Output,
            PinRole::Input => PinFunction::Input,
        }
    }
}

/// Pull resistor mode written to the pull-control register.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[repr(u32)]
pub enum PullMode {
    #[default]
    None = 0x0,
    Down = 0x1,
    Up = 0x2,
}

impl PullMode {
    #[inline]
    pub const fn code(self) -> u32 {
        self as u32 & 0x03
    }
}

/// Immutable binding of one minor number to a pin and role.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PinAssignment {
    pub minor: u32,
    pub pin: Pin,
    pub role: PinRole,
}

/// Location of a pin's function-select field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RegisterFieldAddress {
    /// Word index inside the register window.
    pub index: usize,
    /// Bit offset of the 3-bit field inside that word.
    pub shift: u32,
}

impl RegisterFieldAddress {
    /// Mask covering the 3-bit field.
    #[inline]
    pub const fn mask(self) -> u32 {
        0x07 << self.shift
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pin_range_is_enforced() {
        assert_eq!(Pin::new(0).map(Pin::number), Ok(0));
        assert_eq!(Pin::new(31).map(Pin::mask), Ok(0x8000_0000));
        assert_eq!(Pin::new(32), Err(GpioError::InvalidPin));
        assert_eq!(Pin::try_from(200), Err(GpioError::InvalidPin));
    }

    #[test]
    fn codes_match_hardware_encoding() {
        assert_eq!(PinFunction::Input.code(), 0);
        assert_eq!(PinFunction::Output.code(), 1);
        assert_eq!(PullMode::None.code(), 0);
        assert_eq!(PullMode::Down.code(), 1);
        assert_eq!(PullMode::Up.code(), 2);
        assert_eq!(PinRole::Output.function(), PinFunction::Output);
        assert_eq!(PinRole::Input.function(), PinFunction::Input);
    }
}
