//! Flash-then-decay pixel recoloring
//!
//! On ignition a pixel jumps to a bright, fully desaturated flash and its
//! hue advances by a fixed step, so consecutive strikes cycle through the
//! color wheel. Every frame, ignited or not, the value then drops and the
//! saturation climbs back towards full color.

use rand::RngCore;

use crate::color::ColorCell;
use crate::math8::{qadd8, qsub8};
use crate::trigger_buffer::TriggerBuffer;

/// How much brightness a pixel loses per frame
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DecayStep {
    /// Always lose `step`
    Fixed(u8),
    /// Lose either `0` or `step`, chosen by a coin flip per pixel per frame
    ///
    /// Gives the comet tail its flicker.
    Flicker(u8),
}

impl DecayStep {
    /// Resolve the step for one pixel on one frame
    #[inline]
    pub fn sample<R: RngCore>(self, rng: &mut R) -> u8 {
        match self {
            Self::Fixed(step) => step,
            Self::Flicker(step) => {
                if rng.next_u32() & 1 == 1 {
                    step
                } else {
                    0
                }
            }
        }
    }
}

/// Per-pixel update rule
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DecayModel {
    /// Value assigned on ignition
    pub flash_value: u8,
    /// Hue advance on every ignition
    pub hue_step: u8,
    /// Brightness lost per frame
    pub step: DecayStep,
    /// Saturation regained per frame
    pub saturation_recovery: u8,
}

impl DecayModel {
    /// Flickering comet used for beams
    pub const BEAM: Self = Self {
        flash_value: 200,
        hue_step: 40,
        step: DecayStep::Flicker(20),
        saturation_recovery: 50,
    };

    /// Steady release used for drum groups
    pub const DRUM: Self = Self {
        flash_value: 200,
        hue_step: 40,
        step: DecayStep::Fixed(20),
        saturation_recovery: 50,
    };

    /// Update one pixel for this frame
    ///
    /// Ignition is applied first, then decay and saturation recovery run on
    /// the same frame regardless.
    #[inline]
    pub fn update<R: RngCore>(&self, cell: &mut ColorCell, ignited: bool, rng: &mut R) {
        if ignited {
            cell.value = self.flash_value;
            cell.rotate_hue(self.hue_step);
            cell.saturation = 0;
        }
        cell.value = qsub8(cell.value, self.step.sample(rng));
        cell.saturation = qadd8(cell.saturation, self.saturation_recovery);
    }

    /// Recolor every pixel from its slot in a trigger buffer
    pub fn apply<R: RngCore, const N: usize>(
        &self,
        buffer: &TriggerBuffer<N>,
        cells: &mut [ColorCell],
        rng: &mut R,
    ) {
        self.apply_with(cells, |i| buffer.is_lit(i), rng);
    }

    /// Recolor every pixel, asking `ignited` whether pixel `i` fires
    pub fn apply_with<R, F>(&self, cells: &mut [ColorCell], ignited: F, rng: &mut R)
    where
        R: RngCore,
        F: Fn(usize) -> bool,
    {
        for (i, cell) in cells.iter_mut().enumerate() {
            self.update(cell, ignited(i), rng);
        }
    }
}

impl Default for DecayModel {
    fn default() -> Self {
        Self::BEAM
    }
}
