mod tests {
    use rand::rngs::mock::StepRng;
    use strikelight::{ColorCell, DecayModel, DecayStep, TriggerBuffer};

    const DRUM: DecayModel = DecayModel {
        flash_value: 200,
        hue_step: 40,
        step: DecayStep::Fixed(20),
        saturation_recovery: 50,
    };

    fn coin(heads: bool) -> StepRng {
        StepRng::new(u64::from(heads), 0)
    }

    #[test]
    fn test_flash_then_steady_release() {
        let mut rng = coin(false);
        let mut cell = ColorCell::OFF;

        // Ignition and the first release step happen on the same frame
        DRUM.update(&mut cell, true, &mut rng);
        assert_eq!(cell, ColorCell::new(40, 50, 180));

        let mut previous = cell.value;
        for expected in [160, 140, 120, 100, 80, 60, 40, 20, 0, 0, 0] {
            DRUM.update(&mut cell, false, &mut rng);
            assert_eq!(cell.value, expected);
            assert!(cell.value <= previous);
            previous = cell.value;
        }
        assert_eq!(cell.saturation, 255);
        assert_eq!(cell.hue, 40);
    }

    #[test]
    fn test_flicker_follows_coin() {
        let model = DecayModel::BEAM;

        let mut cell = ColorCell::OFF;
        model.update(&mut cell, true, &mut coin(false));
        assert_eq!(cell.value, 200);

        let mut cell = ColorCell::OFF;
        model.update(&mut cell, true, &mut coin(true));
        assert_eq!(cell.value, 180);
    }

    #[test]
    fn test_hue_wraps_on_repeated_strikes() {
        let mut rng = coin(false);
        let mut cell = ColorCell::new(250, 255, 0);
        DRUM.update(&mut cell, true, &mut rng);
        assert_eq!(cell.hue, 34);
        DRUM.update(&mut cell, true, &mut rng);
        assert_eq!(cell.hue, 74);
    }

    #[test]
    fn test_saturation_recovers_to_full() {
        let mut rng = coin(false);
        let mut cell = ColorCell::OFF;
        DRUM.update(&mut cell, true, &mut rng);
        let saturations: Vec<u8> = (0..6)
            .map(|_| {
                DRUM.update(&mut cell, false, &mut rng);
                cell.saturation
            })
            .collect();
        assert_eq!(saturations, vec![100, 150, 200, 250, 255, 255]);
    }

    #[test]
    fn test_apply_reads_buffer_slots() {
        let mut rng = coin(false);
        let mut buffer = TriggerBuffer::<5>::new(5).unwrap();
        let mut cells = [ColorCell::OFF; 5];

        buffer.ignite();
        DecayModel::BEAM.apply(&buffer, &mut cells, &mut rng);
        assert_eq!(cells[0].value, 200);
        assert!(cells[1..].iter().all(|cell| cell.value == 0));

        buffer.tick();
        DecayModel::BEAM.apply(&buffer, &mut cells, &mut rng);
        assert_eq!(cells[1].value, 200);
        assert_eq!(cells[0].saturation, 100);
        assert_eq!(cells[1].saturation, 50);
    }
}
