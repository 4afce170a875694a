#![no_std]

use core::fmt;

pub mod activity;
pub mod channel;
pub mod color;
pub mod config;
pub mod decay;
pub mod detector;
mod filter;
pub mod idle;
pub mod installation;
pub mod interval;
pub mod math8;
pub mod rig;
pub mod system;
pub mod trigger_buffer;

pub use activity::{ActivityMonitor, Mode};
pub use channel::{Strike, StrikeChannel, StrikeReceiver, StrikeSender};
pub use config::{
    BeamIdleBehavior, ConfigError, DetectorConfig, GroupConfig, IdleConfig, InstallationConfig,
    OutputConfig, RigConfig, SensorBinding, SensorConfig, Spread,
};
pub use decay::{DecayModel, DecayStep};
pub use detector::{DIGITAL_HIGH, Edge, TriggerDetector};
pub use idle::{IdleAnimator, IdlePhase};
pub use installation::{FrameResult, Installation, InstallationError};
pub use rig::{NoIndicator, Rig, RigDriver, RigState, StartupError};
pub use system::{Frame, LightingSystem, PixelGroup};
pub use trigger_buffer::TriggerBuffer;

pub use color::{ColorCell, Rgb};
pub use embassy_time::{Duration, Instant};

/// Abstract LED driver trait
///
/// Implement this trait to support different hardware platforms.
/// Called once per frame with the finished buffer of one pixel array.
pub trait OutputDriver {
    /// Write colors to the LED strip
    fn write(&mut self, colors: &[Rgb]);
}

/// Analog or digital strike sensor
pub trait SensorSource {
    /// Bring the sensor up; called once before the first frame
    fn init(&mut self) -> Result<(), SensorError> {
        Ok(())
    }

    /// Take one sample
    ///
    /// Digital inputs report `0` or [`DIGITAL_HIGH`].
    fn read(&mut self) -> u16;
}

/// On/off status output
pub trait IndicatorPin {
    /// Drive `pin` to `level`
    fn set(&mut self, pin: u8, level: bool);
}

/// Why a sensor could not be brought up
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SensorError {
    /// Nothing answered at the sensor's address
    NotDetected,
    /// The bus or peripheral reported an error
    Bus,
    /// The sensor answered but rejected its configuration
    Configuration,
}

impl fmt::Display for SensorError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NotDetected => write!(f, "sensor not detected"),
            Self::Bus => write!(f, "bus error"),
            Self::Configuration => write!(f, "configuration rejected"),
        }
    }
}
