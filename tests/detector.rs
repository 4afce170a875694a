mod tests {
    use strikelight::{ConfigError, DIGITAL_HIGH, DetectorConfig, Edge, TriggerDetector};

    fn detector() -> TriggerDetector {
        TriggerDetector::new(DetectorConfig::new(100, 50)).unwrap()
    }

    #[test]
    fn test_rose_once_without_chatter() {
        let mut detector = detector();
        let edges: Vec<Option<Edge>> = [150, 120, 80, 99, 101, 60, 51, 150, 50]
            .into_iter()
            .map(|raw| detector.update(raw))
            .collect();

        assert_eq!(edges[0], Some(Edge::Rose));
        assert!(edges[1..].iter().all(Option::is_none));
        assert!(detector.is_triggered());

        assert_eq!(detector.update(49), Some(Edge::Fell));
        assert!(!detector.is_triggered());
        assert_eq!(detector.update(20), None);
        assert_eq!(detector.update(99), None);
    }

    #[test]
    fn test_threshold_must_be_exceeded() {
        let mut detector = detector();
        assert_eq!(detector.update(100), None);
        assert_eq!(detector.update(101), Some(Edge::Rose));
        assert_eq!(detector.raw(), 101);
    }

    #[test]
    fn test_rearms_after_release() {
        let mut detector = detector();
        assert_eq!(detector.update(200), Some(Edge::Rose));
        assert_eq!(detector.update(0), Some(Edge::Fell));
        assert_eq!(detector.update(200), Some(Edge::Rose));
    }

    #[test]
    fn test_hysteresis_must_be_below_threshold() {
        let result = TriggerDetector::new(DetectorConfig::new(100, 100));
        assert!(matches!(
            result,
            Err(ConfigError::HysteresisNotBelowThreshold {
                threshold: 100,
                hysteresis: 100
            })
        ));
    }

    #[test]
    fn test_digital_levels() {
        let mut detector = TriggerDetector::new(DetectorConfig::digital()).unwrap();
        assert_eq!(detector.update(0), None);
        assert_eq!(detector.update(DIGITAL_HIGH), Some(Edge::Rose));
        assert_eq!(detector.update(DIGITAL_HIGH), None);
        assert_eq!(detector.update(0), Some(Edge::Fell));
    }
}
