mod tests {
    use smart_leds::hsv::{Hsv, hsv2rgb};
    use strikelight::color::{BLACK, ColorCell, Rgb, cells_to_rgb, rgb_from_u32};

    #[test]
    fn test_cell_matches_standard_conversion() {
        let cell = ColorCell::new(40, 50, 200);
        let expected = hsv2rgb(Hsv {
            hue: 40,
            sat: 50,
            val: 200,
        });
        assert_eq!(cell.to_rgb(), expected);
    }

    #[test]
    fn test_dark_cell_is_black() {
        assert_eq!(ColorCell::OFF.to_rgb(), BLACK);
        assert_eq!(ColorCell::new(123, 17, 0).to_rgb(), BLACK);
    }

    #[test]
    fn test_rotate_hue_wraps() {
        let mut cell = ColorCell::new(240, 255, 255);
        cell.rotate_hue(40);
        assert_eq!(cell.hue, 24);
    }

    #[test]
    fn test_cells_to_rgb_converts_prefix() {
        let cells = [ColorCell::new(0, 0, 255), ColorCell::OFF];
        let mut out = [Rgb::new(1, 2, 3); 3];
        let converted = cells_to_rgb(&cells, &mut out);
        assert_eq!(converted.len(), 2);
        assert_eq!(out[0], Rgb::new(255, 255, 255));
        assert_eq!(out[1], BLACK);
        assert_eq!(out[2], Rgb::new(1, 2, 3));
    }

    #[test]
    fn test_rgb_from_u32() {
        assert_eq!(rgb_from_u32(0x00FF_B0F0), Rgb::new(255, 176, 240));
    }
}
