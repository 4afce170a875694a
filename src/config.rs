//! Static rig configuration
//!
//! Everything here is plain data handed over once at startup. Defaults
//! describe the reference installation: a 120 pixel beam driven by a push
//! button at 40 frames per second and a 60 pixel drum ring.

use core::fmt;

use embassy_time::Duration;
use heapless::Vec;

use crate::color::{Rgb, rgb_from_u32};
use crate::decay::DecayModel;

/// Maximum number of sensors a single rig can poll
pub const MAX_SENSORS: usize = 8;

/// Maximum number of independently flashing drum segments
pub const MAX_SEGMENTS: u8 = 32;

/// `FastLED`'s "typical LED strip" correction
pub const TYPICAL_LED_STRIP: Rgb = rgb_from_u32(0x00FF_B0F0);

/// Default frame rate of an installation
pub const DEFAULT_FRAME_RATE_HZ: u32 = 40;

/// Per-pixel decay constants of a pixel group
pub type DecayConfig = DecayModel;

/// Configuration error
///
/// Raised while building components. Always fatal: a rig with a bad
/// configuration is never started.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigError {
    /// The release level must sit strictly below the trigger threshold
    HysteresisNotBelowThreshold { threshold: u16, hysteresis: u16 },
    /// A pixel group is longer than the rig's capacity
    TooManyLeds { requested: usize, capacity: usize },
    /// More sensors than [`MAX_SENSORS`]
    TooManySensors { requested: usize },
    /// A rig needs at least one sensor
    NoSensors,
    /// Segment count is zero, above [`MAX_SEGMENTS`] or leaves a segment empty
    InvalidSegments { segments: u8, leds: usize },
    /// A sensor is bound to a segment the drum does not have
    SegmentOutOfRange { segment: u8, segments: u8 },
    /// The idle meteor needs at least one pixel
    InvalidMeteorSize,
    /// Frame rate must be positive
    ZeroFrameRate,
    /// More rigs than the installation can hold
    TooManyRigs { capacity: usize },
    /// Number of readings does not match the number of sensors
    SensorCountMismatch { expected: usize, actual: usize },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::HysteresisNotBelowThreshold {
                threshold,
                hysteresis,
            } => write!(
                f,
                "hysteresis {} must be below threshold {}",
                hysteresis, threshold
            ),
            Self::TooManyLeds {
                requested,
                capacity,
            } => write!(f, "{} leds requested, capacity is {}", requested, capacity),
            Self::TooManySensors { requested } => write!(
                f,
                "{} sensors requested, at most {} supported",
                requested, MAX_SENSORS
            ),
            Self::NoSensors => write!(f, "rig has no sensors"),
            Self::InvalidSegments { segments, leds } => {
                write!(f, "cannot split {} leds into {} segments", leds, segments)
            }
            Self::SegmentOutOfRange { segment, segments } => write!(
                f,
                "sensor bound to segment {} of {}",
                segment, segments
            ),
            Self::InvalidMeteorSize => write!(f, "idle meteor size must be at least 1"),
            Self::ZeroFrameRate => write!(f, "frame rate must be positive"),
            Self::TooManyRigs { capacity } => {
                write!(f, "installation holds at most {} rigs", capacity)
            }
            Self::SensorCountMismatch { expected, actual } => {
                write!(f, "expected {} readings, got {}", expected, actual)
            }
        }
    }
}

/// Trigger levels of one sensor channel
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DetectorConfig {
    /// A reading above this raises the trigger flag
    pub threshold: u16,
    /// A reading below this lowers the trigger flag again
    pub hysteresis: u16,
}

impl DetectorConfig {
    pub const fn new(threshold: u16, hysteresis: u16) -> Self {
        Self {
            threshold,
            hysteresis,
        }
    }

    /// Levels for a digital pin reporting `0` or [`DIGITAL_HIGH`](crate::DIGITAL_HIGH)
    pub const fn digital() -> Self {
        Self::new(crate::DIGITAL_HIGH / 2, crate::DIGITAL_HIGH / 4)
    }

    pub const fn validate(&self) -> Result<(), ConfigError> {
        if self.hysteresis >= self.threshold {
            return Err(ConfigError::HysteresisNotBelowThreshold {
                threshold: self.threshold,
                hysteresis: self.hysteresis,
            });
        }
        Ok(())
    }
}

impl Default for DetectorConfig {
    fn default() -> Self {
        Self::new(100, 50)
    }
}

/// How a strike spreads over a pixel group
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Spread {
    /// Comet: the strike enters at pixel 0 and travels one pixel per frame
    Travel,
    /// Every pixel of each struck segment flashes at once
    Flash { segments: u8 },
}

/// Post-processing of a group's RGB output
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OutputConfig {
    /// Global brightness cap (0-255)
    pub brightness: u8,
    /// Per-channel correction factors (255 = untouched)
    pub color_correction: Rgb,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            brightness: 40,
            color_correction: TYPICAL_LED_STRIP,
        }
    }
}

/// One addressable pixel array of a rig
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GroupConfig {
    pub leds: usize,
    pub spread: Spread,
    pub decay: DecayConfig,
    pub output: OutputConfig,
}

impl GroupConfig {
    /// Comet-driven beam
    pub fn beam(leds: usize) -> Self {
        Self {
            leds,
            spread: Spread::Travel,
            decay: DecayModel::BEAM,
            output: OutputConfig::default(),
        }
    }

    /// Drum ring flashing as a whole
    pub fn drum(leds: usize) -> Self {
        Self {
            leds,
            spread: Spread::Flash { segments: 1 },
            decay: DecayModel::DRUM,
            output: OutputConfig {
                brightness: 50,
                ..OutputConfig::default()
            },
        }
    }

    /// Group that is not wired up
    pub fn absent() -> Self {
        Self::beam(0)
    }

    pub const fn segments(&self) -> u8 {
        match self.spread {
            Spread::Travel => 1,
            Spread::Flash { segments } => segments,
        }
    }

    pub const fn validate(&self, capacity: usize) -> Result<(), ConfigError> {
        if self.leds > capacity {
            return Err(ConfigError::TooManyLeds {
                requested: self.leds,
                capacity,
            });
        }
        if let Spread::Flash { segments } = self.spread {
            let too_many = segments as usize > self.leds && self.leds > 0;
            if segments == 0 || segments > MAX_SEGMENTS || too_many {
                return Err(ConfigError::InvalidSegments {
                    segments,
                    leds: self.leds,
                });
            }
        }
        Ok(())
    }
}

/// Drum pixels a sensor flashes when struck
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SensorBinding {
    /// The whole drum group
    Whole,
    /// A single drum segment
    Segment(u8),
}

/// One sensor channel of a rig
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SensorConfig {
    pub detector: DetectorConfig,
    pub binding: SensorBinding,
}

impl SensorConfig {
    pub const fn new(detector: DetectorConfig, binding: SensorBinding) -> Self {
        Self { detector, binding }
    }
}

/// Ambient sweep shown while idle
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IdleConfig {
    /// Time between sweep steps
    pub step_interval: Duration,
    /// Brightness of freshly lit pixels
    pub ambient_value: u8,
    /// Hue advance per sweep step while relighting
    pub hue_drift: u8,
    /// Fade applied to every pixel per step (0 keeps a fixed brightness)
    pub trail: u8,
    /// Fade each pixel only on a random subset of steps
    pub random_trail: bool,
    /// Pixels painted behind the sweep head
    pub meteor_size: u8,
}

impl IdleConfig {
    pub const fn validate(&self) -> Result<(), ConfigError> {
        if self.meteor_size == 0 {
            return Err(ConfigError::InvalidMeteorSize);
        }
        Ok(())
    }
}

impl Default for IdleConfig {
    fn default() -> Self {
        Self {
            step_interval: Duration::from_millis(20),
            ambient_value: 200,
            hue_drift: 1,
            trail: 0,
            random_trail: false,
            meteor_size: 1,
        }
    }
}

/// What the beam shows while the rig is idle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum BeamIdleBehavior {
    /// Keep propagating and decaying as usual
    #[default]
    Reactive,
    /// Output black until the next strike
    Blank,
}

/// Complete description of one rig
#[derive(Debug, Clone)]
pub struct RigConfig {
    pub beam: GroupConfig,
    pub drum: GroupConfig,
    pub sensors: Vec<SensorConfig, MAX_SENSORS>,
    /// Quiet time after which the rig goes idle
    pub idle_threshold: Duration,
    /// Minimum time between sensor polls (zero polls every frame)
    pub sample_interval: Duration,
    pub idle: IdleConfig,
    pub beam_when_idle: BeamIdleBehavior,
    /// Status LED mirroring the debounced trigger flag
    pub indicator_pin: Option<u8>,
}

impl RigConfig {
    /// Rig with a beam and a drum group driven by the given sensors
    pub fn new(
        beam: GroupConfig,
        drum: GroupConfig,
        sensors: &[SensorConfig],
    ) -> Result<Self, ConfigError> {
        let sensors = Vec::from_slice(sensors).map_err(|()| ConfigError::TooManySensors {
            requested: sensors.len(),
        })?;
        Ok(Self {
            beam,
            drum,
            sensors,
            idle_threshold: Duration::from_secs(10),
            sample_interval: Duration::from_millis(0),
            idle: IdleConfig::default(),
            beam_when_idle: BeamIdleBehavior::Reactive,
            indicator_pin: None,
        })
    }

    /// Push-button beam of 120 pixels with a status LED on pin 13
    pub fn button_beam() -> Self {
        let button = SensorConfig::new(DetectorConfig::digital(), SensorBinding::Whole);
        Self {
            beam: GroupConfig::beam(120),
            drum: GroupConfig::absent(),
            sensors: core::iter::once(button).collect(),
            idle_threshold: Duration::from_secs(10),
            sample_interval: Duration::from_millis(0),
            idle: IdleConfig::default(),
            beam_when_idle: BeamIdleBehavior::Reactive,
            indicator_pin: Some(13),
        }
    }

    /// Drum ring split into one segment per piezo, sampled every 100 ms
    pub fn piezo_drum(leds_per_segment: usize, piezos: u8) -> Self {
        // Capped at MAX_SENSORS so the collect cannot overflow
        let sensors = (0..piezos.min(MAX_SENSORS as u8))
            .map(|segment| {
                SensorConfig::new(DetectorConfig::default(), SensorBinding::Segment(segment))
            })
            .collect();
        let mut drum = GroupConfig::drum(leds_per_segment * usize::from(piezos));
        drum.spread = Spread::Flash { segments: piezos };
        Self {
            beam: GroupConfig::absent(),
            drum,
            sensors,
            idle_threshold: Duration::from_secs(10),
            sample_interval: Duration::from_millis(100),
            idle: IdleConfig::default(),
            beam_when_idle: BeamIdleBehavior::Reactive,
            indicator_pin: None,
        }
    }

    pub fn validate(&self, capacity: usize) -> Result<(), ConfigError> {
        self.beam.validate(capacity)?;
        self.drum.validate(capacity)?;
        self.idle.validate()?;
        if self.sensors.is_empty() {
            return Err(ConfigError::NoSensors);
        }
        let segments = self.drum.segments();
        for sensor in &self.sensors {
            sensor.detector.validate()?;
            if let SensorBinding::Segment(segment) = sensor.binding {
                if segment >= segments {
                    return Err(ConfigError::SegmentOutOfRange { segment, segments });
                }
            }
        }
        Ok(())
    }
}

/// Shared frame clock of an installation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InstallationConfig {
    pub frame_rate_hz: u32,
}

impl InstallationConfig {
    pub const fn validate(&self) -> Result<(), ConfigError> {
        if self.frame_rate_hz == 0 {
            return Err(ConfigError::ZeroFrameRate);
        }
        Ok(())
    }

    /// Duration of one frame
    pub fn frame_duration(&self) -> Duration {
        Duration::from_hz(u64::from(self.frame_rate_hz.max(1)))
    }
}

impl Default for InstallationConfig {
    fn default() -> Self {
        Self {
            frame_rate_hz: DEFAULT_FRAME_RATE_HZ,
        }
    }
}
