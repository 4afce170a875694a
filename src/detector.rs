//! Threshold/hysteresis strike detection
//!
//! A reading must climb above `threshold` to register a strike and fall
//! below the lower `hysteresis` level before another strike can register.
//! Noise between the two levels never produces an edge.

use crate::config::{ConfigError, DetectorConfig};

/// Raw reading reported by a digital input in the high state
pub const DIGITAL_HIGH: u16 = 1023;

/// Debounced transition of the trigger flag
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Edge {
    Rose,
    Fell,
}

/// Debounced trigger state for one sensor channel
#[derive(Debug, Clone)]
pub struct TriggerDetector {
    threshold: u16,
    hysteresis: u16,
    raw: u16,
    triggered: bool,
}

impl TriggerDetector {
    pub fn new(config: DetectorConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self {
            threshold: config.threshold,
            hysteresis: config.hysteresis,
            raw: 0,
            triggered: false,
        })
    }

    /// Feed one sample
    ///
    /// Returns `Rose` once per crossing above the threshold and `Fell` once
    /// per crossing below the hysteresis level.
    pub fn update(&mut self, raw: u16) -> Option<Edge> {
        self.raw = raw;
        if !self.triggered && raw > self.threshold {
            self.triggered = true;
            return Some(Edge::Rose);
        }
        if self.triggered && raw < self.hysteresis {
            self.triggered = false;
            return Some(Edge::Fell);
        }
        None
    }

    /// Debounced flag
    pub const fn is_triggered(&self) -> bool {
        self.triggered
    }

    /// Last sample fed to [`update`](Self::update)
    pub const fn raw(&self) -> u16 {
        self.raw
    }

    pub const fn threshold(&self) -> u16 {
        self.threshold
    }

    pub const fn hysteresis(&self) -> u16 {
        self.hysteresis
    }
}
