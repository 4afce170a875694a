//! Ambient sweep for idle rigs
//!
//! A single head walks from the first to the last pixel, one pixel per
//! step. Sweeps alternate between blacking out the strip and relighting it
//! with a freshly picked hue that drifts slowly as the head moves, which
//! reads as a slow breathing motion instead of the sharp reactive comet.

use rand::RngCore;

use crate::color::ColorCell;
use crate::config::IdleConfig;
use crate::math8::fade8;

/// Values at or below this snap to black when the trail fades them
const TRAIL_FLOOR: u8 = 10;

/// Which pass the sweep head is currently making
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IdlePhase {
    /// The head paints pixels black
    FadeOut,
    /// The head paints pixels with the ambient hue
    FadeIn,
}

/// Slow sweeping animation shown while a rig is idle
#[derive(Debug, Clone)]
pub struct IdleAnimator {
    config: IdleConfig,
    position: usize,
    phase: IdlePhase,
    hue: u8,
}

impl IdleAnimator {
    pub const fn new(config: IdleConfig) -> Self {
        Self {
            config,
            position: 0,
            phase: IdlePhase::FadeOut,
            hue: 0,
        }
    }

    /// Restart at the first pixel with a fade-out pass
    pub const fn reset(&mut self) {
        self.position = 0;
        self.phase = IdlePhase::FadeOut;
    }

    /// Advance the sweep by one pixel
    #[allow(clippy::cast_possible_truncation)]
    pub fn tick<R: RngCore>(&mut self, cells: &mut [ColorCell], rng: &mut R) {
        if cells.is_empty() {
            return;
        }
        if self.position >= cells.len() {
            self.position = 0;
        }

        self.fade_trail(cells, rng);

        let size = usize::from(self.config.meteor_size);
        let first = (self.position + 1).saturating_sub(size);
        for cell in &mut cells[first..=self.position] {
            match self.phase {
                IdlePhase::FadeOut => cell.value = 0,
                IdlePhase::FadeIn => {
                    *cell = ColorCell::new(self.hue, 255, self.config.ambient_value);
                }
            }
        }
        if self.phase == IdlePhase::FadeIn {
            self.hue = self.hue.wrapping_add(self.config.hue_drift);
        }

        self.position += 1;
        if self.position == cells.len() {
            self.position = 0;
            self.phase = match self.phase {
                IdlePhase::FadeOut => {
                    self.hue = (rng.next_u32() & 0xFF) as u8;
                    IdlePhase::FadeIn
                }
                IdlePhase::FadeIn => IdlePhase::FadeOut,
            };
        }
    }

    fn fade_trail<R: RngCore>(&self, cells: &mut [ColorCell], rng: &mut R) {
        if self.config.trail == 0 {
            return;
        }
        for cell in cells {
            if self.config.random_trail && rng.next_u32() % 10 <= 5 {
                continue;
            }
            cell.value = fade8(cell.value, self.config.trail, TRAIL_FLOOR);
        }
    }

    pub const fn phase(&self) -> IdlePhase {
        self.phase
    }

    /// Index the head paints on the next tick
    pub const fn position(&self) -> usize {
        self.position
    }

    /// Current ambient hue
    pub const fn hue(&self) -> u8 {
        self.hue
    }

    pub const fn config(&self) -> &IdleConfig {
        &self.config
    }
}
