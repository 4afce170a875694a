mod cell;
mod utils;

use smart_leds::RGB8;
use smart_leds::hsv::Hsv as HSV;

pub use cell::ColorCell;
pub use utils::{cells_to_rgb, fill_rgb, rgb_from_u32};

pub type Rgb = RGB8;
pub type Hsv = HSV;

/// Fully black output pixel
pub const BLACK: Rgb = Rgb { r: 0, g: 0, b: 0 };
