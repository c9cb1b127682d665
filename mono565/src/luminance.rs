use crate::{
    geometry::{check_len, DimensionError},
    utils::{decode_565, expand_565},
};

/// Luminance of a RGB565 pixel.
///
/// The channels are widened to 8 bits and weighted 0.299/0.587/0.114. The sum is computed in
/// thousandths and truncated, so white maps to exactly 255.
#[inline]
pub const fn luminance(pixel: u16) -> u8 {
    let [r, g, b] = expand_565(decode_565(pixel));
    let y = (299 * r as u32 + 587 * g as u32 + 114 * b as u32) / 1000;

    y as u8
}

/// Converts every pixel of `rgb565` into its luminance, writing to `out`.
///
/// `out` must have the same length as `rgb565`. An empty input is fine and writes nothing.
pub fn extract(rgb565: &[u16], out: &mut [u8]) -> Result<(), DimensionError> {
    check_len("luminance", rgb565.len(), out.len())?;

    for (&pixel, y) in rgb565.iter().zip(out.iter_mut()) {
        *y = luminance(pixel);
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn primaries() {
        assert_eq!(luminance(0x0000), 0);
        assert_eq!(luminance(0xFFFF), 255);
        assert_eq!(luminance(0xF800), 76);
        assert_eq!(luminance(0x07E0), 149);
        assert_eq!(luminance(0x001F), 29);
    }

    #[test]
    fn weights_are_monotonic_per_channel() {
        for g in 1..64u16 {
            assert!(luminance(g << 5) >= luminance((g - 1) << 5));
        }
    }

    #[test]
    fn extract_buffers() {
        let mut out = [0xAA; 3];
        extract(&[0x0000, 0xFFFF, 0xF800], &mut out).unwrap();
        assert_eq!(out, [0, 255, 76]);

        extract(&[], &mut []).unwrap();
    }

    #[test]
    fn extract_rejects_short_output_untouched() {
        let mut out = [0xAA; 2];
        assert!(extract(&[0xFFFF; 3], &mut out).is_err());
        assert_eq!(out, [0xAA; 2]);
    }
}
