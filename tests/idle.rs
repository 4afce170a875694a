mod tests {
    use rand::SeedableRng;
    use rand::rngs::SmallRng;
    use rand::rngs::mock::StepRng;
    use strikelight::{ColorCell, IdleAnimator, IdleConfig, IdlePhase};

    fn lit_drum() -> [ColorCell; 60] {
        [ColorCell::new(10, 255, 150); 60]
    }

    #[test]
    fn test_fade_out_then_relight() {
        let mut rng = StepRng::new(77, 0);
        let mut idle = IdleAnimator::new(IdleConfig::default());
        let mut cells = lit_drum();

        for _ in 0..60 {
            idle.tick(&mut cells, &mut rng);
        }
        assert!(cells.iter().all(|cell| cell.value == 0));
        assert_eq!(idle.phase(), IdlePhase::FadeIn);
        assert_eq!(idle.hue(), 77);

        for k in 1..=60 {
            idle.tick(&mut cells, &mut rng);
            assert!(cells[..k].iter().all(|cell| cell.value == 200));
            assert!(cells[k..].iter().all(|cell| cell.value == 0));
        }
        for (i, cell) in cells.iter().enumerate() {
            assert_eq!(cell.hue, 77u8.wrapping_add(i as u8));
            assert_eq!(cell.saturation, 255);
        }
        assert_eq!(idle.phase(), IdlePhase::FadeOut);
        assert_eq!(idle.position(), 0);
    }

    #[test]
    fn test_meteor_paints_behind_head() {
        let mut rng = StepRng::new(0, 0);
        let config = IdleConfig {
            meteor_size: 3,
            ..IdleConfig::default()
        };
        let mut idle = IdleAnimator::new(config);
        let mut cells = [ColorCell::new(0, 255, 100); 10];

        idle.tick(&mut cells, &mut rng);
        assert_eq!(cells[0].value, 0);
        assert_eq!(cells[1].value, 100);

        for _ in 0..4 {
            idle.tick(&mut cells, &mut rng);
        }
        // Head at 4, painted 2..=4 on the last step
        assert!(cells[..5].iter().all(|cell| cell.value == 0));
        assert_eq!(cells[5].value, 100);
    }

    #[test]
    fn test_trail_fades_whole_strip() {
        let mut rng = StepRng::new(0, 0);
        let config = IdleConfig {
            trail: 128,
            ..IdleConfig::default()
        };
        let mut idle = IdleAnimator::new(config);
        let mut cells = [ColorCell::new(0, 255, 200); 4];

        idle.tick(&mut cells, &mut rng);
        assert_eq!(cells[0].value, 0);
        assert_eq!(cells[3].value, 100);

        idle.tick(&mut cells, &mut rng);
        assert_eq!(cells[3].value, 50);
    }

    #[test]
    fn test_reset_restarts_fade_out() {
        let mut rng = StepRng::new(0, 0);
        let mut idle = IdleAnimator::new(IdleConfig::default());
        let mut cells = [ColorCell::OFF; 3];
        for _ in 0..4 {
            idle.tick(&mut cells, &mut rng);
        }
        assert_eq!(idle.phase(), IdlePhase::FadeIn);

        idle.reset();
        assert_eq!(idle.phase(), IdlePhase::FadeOut);
        assert_eq!(idle.position(), 0);
    }

    #[test]
    fn test_empty_strip_is_ignored() {
        let mut rng = StepRng::new(0, 0);
        let mut idle = IdleAnimator::new(IdleConfig::default());
        idle.tick(&mut [], &mut rng);
        assert_eq!(idle.position(), 0);
    }

    #[test]
    fn test_random_trail_only_dims_during_fade_out() {
        let mut rng = SmallRng::seed_from_u64(7);
        let config = IdleConfig {
            trail: 64,
            random_trail: true,
            ..IdleConfig::default()
        };
        let mut idle = IdleAnimator::new(config);
        let mut cells = lit_drum();

        for _ in 0..60 {
            let before = cells;
            idle.tick(&mut cells, &mut rng);
            for (old, new) in before.iter().zip(&cells) {
                assert!(new.value <= old.value);
                assert_eq!(new.hue, old.hue);
            }
        }
        assert!(cells.iter().all(|cell| cell.value == 0));
    }
}
