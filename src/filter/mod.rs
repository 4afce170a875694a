//! Output post-processing
//!
//! Applied to each group's RGB buffer after HSV conversion and before it
//! reaches the pixel sink. Correction runs first so the brightness cap
//! scales the corrected color.

use crate::color::Rgb;
use crate::config::OutputConfig;

mod brightness;
mod color_correction;

pub(crate) use brightness::BrightnessCap;
pub(crate) use color_correction::ColorCorrection;

pub(crate) trait Filter {
    /// Apply the filter to a frame
    fn apply(&self, frame: &mut [Rgb]);
}

/// Filter chain of one pixel group
#[derive(Debug, Clone, Copy)]
pub(crate) struct OutputFilters {
    color_correction: ColorCorrection,
    brightness: BrightnessCap,
}

impl OutputFilters {
    pub(crate) const fn new(config: &OutputConfig) -> Self {
        Self {
            color_correction: ColorCorrection::new(config.color_correction),
            brightness: BrightnessCap::new(config.brightness),
        }
    }

    pub(crate) fn apply(&self, frame: &mut [Rgb]) {
        self.color_correction.apply(frame);
        self.brightness.apply(frame);
    }
}
