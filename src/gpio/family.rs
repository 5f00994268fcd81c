use core::fmt::Write;

use crate::gpio::{
    GpioError,
    types::{MAX_PINS, Pin, PinAssignment, PinRole, PullMode},
};

/// Maximum length of a device node name.
pub const NODE_NAME_LEN: usize = 16;

/// Minor-to-pin lookup table built once per controller.
pub type PinTable = heapless::Vec<PinAssignment, MAX_PINS>;

/// A logical device family: one node per minor, each bound to a pin.
///
/// Minor `i` drives `pins[i]`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DeviceFamily {
    /// Node name prefix, e.g. `rtled` for `/dev/rtled0`.
    pub name: &'static str,
    pub role: PinRole,
    pub pins: &'static [u8],
    pub pull: PullMode,
}

/// Four LED outputs.
pub const LED_FAMILY: DeviceFamily = DeviceFamily {
    name: "rtled",
    role: PinRole::Output,
    pins: &[18, 23, 24, 25],
    pull: PullMode::None,
};

/// Three switch inputs, sampled with the pull-up enabled.
pub const SWITCH_FAMILY: DeviceFamily = DeviceFamily {
    name: "rtswitch",
    role: PinRole::Input,
    pins: &[21, 26, 20],
    pull: PullMode::Up,
};

impl DeviceFamily {
    pub const fn minor_count(&self) -> u32 {
        self.pins.len() as u32
    }

    /// Validates the pin list and builds the lookup table.
    ///
    /// Fails with `InvalidPin` for a pin above 31 or a duplicated pin.
    pub fn pin_table(&self) -> Result<PinTable, GpioError> {
        let mut seen = bitmaps::Bitmap::<32>::new();
        let mut table = PinTable::new();

        for (minor, &number) in self.pins.iter().enumerate() {
            let pin = Pin::new(number)?;
            if seen.set(pin.number() as usize, true) {
                return Err(GpioError::InvalidPin);
            }
            table
                .push(PinAssignment {
                    minor: minor as u32,
                    pin,
                    role: self.role,
                })
                .map_err(|_| GpioError::InvalidPin)?;
        }

        Ok(table)
    }

    /// Node name for `minor`, e.g. `rtswitch2`.
    pub fn node_name(&self, minor: u32) -> Result<heapless::String<NODE_NAME_LEN>, GpioError> {
        if minor >= self.minor_count() {
            return Err(GpioError::InvalidMinor);
        }
        let mut name = heapless::String::new();
        write!(name, "{}{}", self.name, minor).map_err(|_| GpioError::InvalidMinor)?;
        Ok(name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builtin_families_are_valid() {
        let leds = LED_FAMILY.pin_table().unwrap();
        assert_eq!(leds.len(), 4);
        assert_eq!(leds[0].pin.number(), 18);
        assert_eq!(leds[3].pin.number(), 25);
        assert!(leds.iter().all(|a| a.role == PinRole::Output));

        let switches = SWITCH_FAMILY.pin_table().unwrap();
        assert_eq!(switches.len(), 3);
        assert_eq!(switches[1].minor, 1);
        assert_eq!(switches[1].pin.number(), 26);
        assert_eq!(switches[2].pin.number(), 20);
    }

    #[test]
    fn invalid_tables_rejected() {
        let out_of_range = DeviceFamily {
            pins: &[4, 32],
            ..LED_FAMILY
        };
        assert_eq!(out_of_range.pin_table(), Err(GpioError::InvalidPin));

        let duplicate = DeviceFamily {
            pins: &[4, 5, 4],
            ..LED_FAMILY
        };
        assert_eq!(duplicate.pin_table(), Err(GpioError::InvalidPin));
    }

    #[test]
    fn node_names() {
        assert_eq!(LED_FAMILY.node_name(0).unwrap().as_str(), "rtled0");
        assert_eq!(SWITCH_FAMILY.node_name(2).unwrap().as_str(), "rtswitch2");
        assert_eq!(SWITCH_FAMILY.node_name(3), Err(GpioError::InvalidMinor));
    }
}
