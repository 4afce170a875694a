use crate::color::{ColorCell, Rgb};

/// Convert a run of cells into output pixels
///
/// Converts `min(cells.len(), out.len())` pixels and returns the converted
/// prefix of `out`.
pub fn cells_to_rgb<'a>(cells: &[ColorCell], out: &'a mut [Rgb]) -> &'a mut [Rgb] {
    let len = cells.len().min(out.len());
    for (pixel, cell) in out[..len].iter_mut().zip(cells) {
        *pixel = cell.to_rgb();
    }
    &mut out[..len]
}

/// Fill every pixel with one color
pub fn fill_rgb(leds: &mut [Rgb], color: Rgb) {
    for led in leds {
        *led = color;
    }
}

/// Create an RGB color from a u32 value (0xRRGGBB format)
#[allow(clippy::cast_possible_truncation)]
pub const fn rgb_from_u32(color: u32) -> Rgb {
    Rgb {
        r: ((color >> 16) & 0xFF) as u8,
        g: ((color >> 8) & 0xFF) as u8,
        b: (color & 0xFF) as u8,
    }
}
