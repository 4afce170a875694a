//! Global brightness cap
//!
//! Scales every channel of every pixel, like `FastLED`'s `setBrightness`.
//! Keeps current draw within what the supply can deliver.

use super::Filter;
use crate::color::{BLACK, Rgb, fill_rgb};
use crate::math8::scale8;

#[derive(Debug, Clone, Copy)]
pub(crate) struct BrightnessCap {
    /// Scale factor (0-255 = 0.0-1.0)
    scale: u8,
}

impl BrightnessCap {
    pub(crate) const fn new(scale: u8) -> Self {
        Self { scale }
    }
}

impl Filter for BrightnessCap {
    fn apply(&self, frame: &mut [Rgb]) {
        match self.scale {
            255 => {}
            0 => fill_rgb(frame, BLACK),
            scale => {
                for pixel in frame.iter_mut() {
                    pixel.r = scale8(pixel.r, scale);
                    pixel.g = scale8(pixel.g, scale);
                    pixel.b = scale8(pixel.b, scale);
                }
            }
        }
    }
}
