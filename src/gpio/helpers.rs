//! Register address calculations for a pin.
//!
//! These are pure functions of the pin number; nothing is cached between
//! pins.

use crate::gpio::{
    regs::GPFSEL0,
    types::{Pin, RegisterFieldAddress},
};

/// Pins covered by one function-select word.
pub const PINS_PER_FSEL: u8 = 10;

/// Calculates where a pin's 3-bit function-select field lives.
///
/// The word index is `pin / 10` within the function-select bank and the
/// shift is `(pin % 10) * 3`.
///
/// # Example
/// ```
/// use gpio_window::gpio::{Pin, helpers::function_select_field};
///
/// let field = function_select_field(Pin::new(18).unwrap());
/// assert_eq!((field.index, field.shift), (1, 24));
/// assert_eq!(field.mask(), 0b111 << 24);
/// ```
pub const fn function_select_field(pin: Pin) -> RegisterFieldAddress {
    let n = pin.number();
    RegisterFieldAddress {
        index: GPFSEL0 + (n / PINS_PER_FSEL) as usize,
        shift: (n % PINS_PER_FSEL) as u32 * 3,
    }
}

/// Combines pins into one bank bitmask.
///
/// ```
/// use gpio_window::gpio::{Pin, helpers::pin_mask};
///
/// let pins = [Pin::new(18).unwrap(), Pin::new(23).unwrap()];
/// assert_eq!(pin_mask(&pins), (1 << 18) | (1 << 23));
/// ```
pub fn pin_mask(pins: &[Pin]) -> u32 {
    let mut bits = bitmaps::Bitmap::<32>::new();
    for pin in pins {
        bits.set(pin.number() as usize, true);
    }
    bits.into_value()
}

#[test]
fn function_select_field_edge_cases() {
    let field = |n| function_select_field(Pin::new(n).unwrap());

    // First and last pin of the first word
    assert_eq!(field(0), RegisterFieldAddress { index: 0, shift: 0 });
    assert_eq!(field(9), RegisterFieldAddress { index: 0, shift: 27 });

    // Word boundary
    assert_eq!(field(10), RegisterFieldAddress { index: 1, shift: 0 });

    // Highest addressable pin
    assert_eq!(field(31), RegisterFieldAddress { index: 3, shift: 3 });

    // Switch pins
    assert_eq!(field(21), RegisterFieldAddress { index: 2, shift: 3 });
    assert_eq!(field(26), RegisterFieldAddress { index: 2, shift: 18 });
}

#[test]
fn pin_mask_ignores_duplicates() {
    let p = Pin::new(5).unwrap();
    assert_eq!(pin_mask(&[p, p]), 1 << 5);
    assert_eq!(pin_mask(&[]), 0);
}
