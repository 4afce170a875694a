use super::{Hsv, Rgb};
use smart_leds::hsv::hsv2rgb;

/// Color state of a single pixel
///
/// All channels are `u8`, so they can never leave `0..=255`. Hue lives on a
/// 256-step circle and is only ever advanced with wrapping arithmetic.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ColorCell {
    pub hue: u8,
    pub saturation: u8,
    pub value: u8,
}

impl ColorCell {
    /// Unlit pixel (black, full saturation, hue 0)
    pub const OFF: Self = Self::new(0, 255, 0);

    pub const fn new(hue: u8, saturation: u8, value: u8) -> Self {
        Self {
            hue,
            saturation,
            value,
        }
    }

    /// Rotate the hue around the color circle
    #[inline]
    pub const fn rotate_hue(&mut self, step: u8) {
        self.hue = self.hue.wrapping_add(step);
    }

    pub const fn is_dark(self) -> bool {
        self.value == 0
    }

    /// Convert to an output pixel using the standard 8-bit HSV conversion
    #[inline]
    pub fn to_rgb(self) -> Rgb {
        hsv2rgb(self.into())
    }
}

impl From<ColorCell> for Hsv {
    fn from(cell: ColorCell) -> Self {
        Hsv {
            hue: cell.hue,
            sat: cell.saturation,
            val: cell.value,
        }
    }
}

impl From<Hsv> for ColorCell {
    fn from(hsv: Hsv) -> Self {
        Self::new(hsv.hue, hsv.sat, hsv.val)
    }
}
