mod tests {
    use embassy_time::Instant;
    use rand::rngs::mock::StepRng;
    use strikelight::system::FAULT_COLOR;
    use strikelight::{
        ConfigError, DetectorConfig, GroupConfig, IndicatorPin, LightingSystem, OutputDriver,
        Rig, RigConfig, RigState, Rgb, SensorBinding, SensorConfig, SensorError, SensorSource,
    };

    struct ScriptedSensor {
        readings: Vec<u16>,
        reads: usize,
        fail: Option<SensorError>,
    }

    impl ScriptedSensor {
        fn new(readings: &[u16]) -> Self {
            Self {
                readings: readings.to_vec(),
                reads: 0,
                fail: None,
            }
        }

        fn broken(cause: SensorError) -> Self {
            Self {
                fail: Some(cause),
                ..Self::new(&[0])
            }
        }
    }

    impl SensorSource for ScriptedSensor {
        fn init(&mut self) -> Result<(), SensorError> {
            match self.fail {
                Some(cause) => Err(cause),
                None => Ok(()),
            }
        }

        fn read(&mut self) -> u16 {
            let index = self.reads.min(self.readings.len() - 1);
            self.reads += 1;
            self.readings[index]
        }
    }

    #[derive(Default)]
    struct RecordingStrip {
        frames: Vec<Vec<Rgb>>,
    }

    impl OutputDriver for RecordingStrip {
        fn write(&mut self, colors: &[Rgb]) {
            self.frames.push(colors.to_vec());
        }
    }

    #[derive(Default)]
    struct RecordingPin {
        writes: Vec<(u8, bool)>,
    }

    impl IndicatorPin for RecordingPin {
        fn set(&mut self, pin: u8, level: bool) {
            self.writes.push((pin, level));
        }
    }

    type TestRig = Rig<StepRng, ScriptedSensor, RecordingStrip, RecordingPin, 16>;

    fn config() -> RigConfig {
        let sensor = SensorConfig::new(DetectorConfig::new(100, 50), SensorBinding::Whole);
        let mut config =
            RigConfig::new(GroupConfig::beam(8), GroupConfig::drum(16), &[sensor]).unwrap();
        config.indicator_pin = Some(13);
        config
    }

    fn rig(sensor: ScriptedSensor) -> TestRig {
        let system =
            LightingSystem::new(&config(), StepRng::new(0, 0), Instant::from_millis(0)).unwrap();
        Rig::new(
            system,
            [sensor],
            RecordingStrip::default(),
            RecordingStrip::default(),
            RecordingPin::default(),
        )
        .unwrap()
    }

    #[test]
    fn test_running_rig_shows_every_frame() {
        let mut rig = rig(ScriptedSensor::new(&[150, 150, 0]));
        rig.start().unwrap();
        assert_eq!(rig.state(), RigState::Running);

        for frame in 0..3 {
            rig.frame(Instant::from_millis(frame * 25));
        }

        assert_eq!(rig.beam_output().frames.len(), 3);
        assert_eq!(rig.drum_output().frames.len(), 3);
        assert_eq!(rig.beam_output().frames[0].len(), 8);
        assert_eq!(rig.drum_output().frames[0].len(), 16);
        assert_eq!(rig.indicator().writes, vec![(13, true), (13, false)]);
        assert_eq!(rig.system().beam().cells()[2].value, 200);
    }

    #[test]
    fn test_unstarted_rig_stays_dark() {
        let mut rig = rig(ScriptedSensor::new(&[150]));
        rig.frame(Instant::from_millis(0));
        assert_eq!(rig.state(), RigState::Ready);
        assert!(rig.beam_output().frames.is_empty());
    }

    #[test]
    fn test_failed_sensor_halts_with_fault() {
        let mut rig = rig(ScriptedSensor::broken(SensorError::NotDetected));
        let error = rig.start().unwrap_err();
        assert_eq!(error.sensor, 0);
        assert_eq!(error.cause, SensorError::NotDetected);
        assert_eq!(rig.state(), RigState::Halted);

        rig.strike(Instant::from_millis(0), SensorBinding::Whole);
        rig.frame(Instant::from_millis(25));

        let frames = &rig.drum_output().frames;
        assert_eq!(frames.len(), 2);
        assert!(frames.iter().flatten().all(|pixel| *pixel == FAULT_COLOR));
        assert_eq!(rig.indicator().writes, vec![(13, true), (13, true)]);
        assert!(rig.system().beam().buffer().lit_count() == 0);
    }

    #[test]
    fn test_sensor_count_must_match_config() {
        let system: LightingSystem<StepRng, 16> =
            LightingSystem::new(&config(), StepRng::new(0, 0), Instant::from_millis(0)).unwrap();
        let result = Rig::new(
            system,
            [ScriptedSensor::new(&[0]), ScriptedSensor::new(&[0])],
            RecordingStrip::default(),
            RecordingStrip::default(),
            RecordingPin::default(),
        );
        assert!(matches!(
            result,
            Err(ConfigError::SensorCountMismatch {
                expected: 1,
                actual: 2
            })
        ));
    }

    #[test]
    fn test_startup_error_message() {
        let mut rig = rig(ScriptedSensor::broken(SensorError::Bus));
        let error = rig.start().unwrap_err();
        assert_eq!(error.to_string(), "sensor 0 failed to start: bus error");
    }
}
