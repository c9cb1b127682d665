//! Error diffusion dithering of luminance buffers down to black and white.
//!
//! Pixels are visited in row-major order and become [`WHITE`] if their value is above the
//! threshold and [`BLACK`] otherwise. The signed difference is spread over neighbors that have not
//! been visited yet, `error * weight / divisor` each, truncated towards zero and saturated to
//! `0..=255`.
//!
//! The two kernels differ in what they threshold:
//!
//! - [`DitherKernel::FloydSteinberg`] thresholds each pixel at its own luminance and spreads the
//!   error into a working copy. The binary result therefore only depends on the pixel itself.
//! - [`DitherKernel::Atkinson`] thresholds the working copy, so errors accumulate.
//!
//! Which neighbors receive a share depends on how many rows and columns are left after the pixel,
//! see [`DitherKernel::targets`]. The "below left" neighbor is always the pixel `row_width - 1`
//! further on, so for the first column it is the last pixel of the same row.

use crate::{
    consts::{BLACK, WHITE},
    geometry::{check_len, row_count, DimensionError},
};

/// Neighbor of the current pixel that can receive a share of its error.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Target {
    Next,
    SecondNext,
    BelowLeft,
    Below,
    BelowRight,
    TwoBelow,
}

impl Target {
    /// Distance from the current pixel in a buffer `row_width` pixels wide.
    #[inline]
    pub const fn offset(self, row_width: usize) -> usize {
        match self {
            Target::Next => 1,
            Target::SecondNext => 2,
            Target::BelowLeft => row_width - 1,
            Target::Below => row_width,
            Target::BelowRight => row_width + 1,
            Target::TwoBelow => 2 * row_width,
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum DitherKernel {
    /// 7/16 right, 3/16, 5/16 and 1/16 on the row below.
    FloydSteinberg,
    /// 1/8 to each of two pixels right, three below and one two rows below.
    #[default]
    Atkinson,
}

impl DitherKernel {
    pub const fn divisor(self) -> i16 {
        match self {
            DitherKernel::FloydSteinberg => 16,
            DitherKernel::Atkinson => 8,
        }
    }

    /// Neighbors and weights receiving the error of a pixel with `rows_left` rows below it and
    /// `columns_left` columns to its right.
    ///
    /// ```text
    /// Floyd-Steinberg          Atkinson
    ///
    ///        X   7                    X   1   1
    ///    3   5   1                1   1   1
    ///                                 1
    /// ```
    ///
    /// Floyd-Steinberg spreads nothing from the last column and only to the right on the last row.
    /// Atkinson drops the targets that would fall outside the image, with three cases for the rows
    /// (general, second to last, last) and three for the columns (general, second to last, last).
    /// Dropped weight is not handed to the remaining targets.
    pub const fn targets(self, rows_left: usize, columns_left: usize) -> &'static [(Target, u8)] {
        use Target::*;

        match self {
            DitherKernel::FloydSteinberg => match (rows_left, columns_left) {
                (_, 0) => &[],
                (0, _) => &[(Next, 7)],
                _ => &[(Next, 7), (BelowLeft, 3), (Below, 5), (BelowRight, 1)],
            },
            DitherKernel::Atkinson => match (rows_left, columns_left) {
                (2.., 2..) => &[
                    (Next, 1),
                    (SecondNext, 1),
                    (BelowLeft, 1),
                    (Below, 1),
                    (BelowRight, 1),
                    (TwoBelow, 1),
                ],
                (2.., 1) => &[
                    (Next, 1),
                    (BelowLeft, 1),
                    (Below, 1),
                    (BelowRight, 1),
                    (TwoBelow, 1),
                ],
                (2.., 0) => &[(BelowLeft, 1), (Below, 1), (TwoBelow, 1)],
                (1, 2..) => &[
                    (Next, 1),
                    (SecondNext, 1),
                    (BelowLeft, 1),
                    (Below, 1),
                    (BelowRight, 1),
                ],
                (1, 1) => &[(Next, 1), (BelowLeft, 1), (Below, 1), (BelowRight, 1)],
                (1, 0) => &[(BelowLeft, 1), (Below, 1)],
                (_, 2..) => &[(Next, 1), (SecondNext, 1)],
                (_, 1) => &[(Next, 1)],
                (_, _) => &[],
            },
        }
    }
}

/// Dithers `luminance` into `out`, leaving `luminance` untouched.
///
/// `row_width` must be non-zero and divide the pixel count, and `out` must be as long as
/// `luminance`. Nothing is written if either check fails.
pub fn dither(
    luminance: &[u8],
    out: &mut [u8],
    row_width: usize,
    threshold: u8,
    kernel: DitherKernel,
) -> Result<(), DimensionError> {
    row_count(luminance.len(), row_width)?;
    check_len("dither", luminance.len(), out.len())?;

    out.copy_from_slice(luminance);
    match kernel {
        DitherKernel::FloydSteinberg => floyd_steinberg(luminance, out, row_width, threshold),
        DitherKernel::Atkinson => atkinson(out, row_width, threshold),
    }

    Ok(())
}

/// Dithers `buf` in place. The result is the same as [`dither`]'s.
pub fn dither_in_place(
    buf: &mut [u8],
    row_width: usize,
    threshold: u8,
    kernel: DitherKernel,
) -> Result<(), DimensionError> {
    row_count(buf.len(), row_width)?;
    dither_unchecked(buf, row_width, threshold, kernel);

    Ok(())
}

/// Callers have checked that `row_width` is non-zero and divides `buf.len()`.
pub(crate) fn dither_unchecked(
    buf: &mut [u8],
    row_width: usize,
    threshold: u8,
    kernel: DitherKernel,
) {
    match kernel {
        // the working copy is never read back, thresholding each pixel is all that is visible
        DitherKernel::FloydSteinberg => {
            for pixel in buf.iter_mut() {
                *pixel = quantize(*pixel, threshold);
            }
        }
        DitherKernel::Atkinson => atkinson(buf, row_width, threshold),
    }
}

#[inline]
const fn quantize(value: u8, threshold: u8) -> u8 {
    if value > threshold {
        WHITE
    } else {
        BLACK
    }
}

/// `working` starts out as a copy of `luminance`.
fn floyd_steinberg(luminance: &[u8], working: &mut [u8], row_width: usize, threshold: u8) {
    for (i, &old) in luminance.iter().enumerate() {
        let new = quantize(old, threshold);
        working[i] = new;

        let error = i16::from(old) - i16::from(new);
        spread_error(working, i, error, row_width, DitherKernel::FloydSteinberg);
    }
}

/// `working` holds thresholded pixels before the cursor and working values from the cursor on.
fn atkinson(working: &mut [u8], row_width: usize, threshold: u8) {
    for i in 0..working.len() {
        let old = working[i];
        let new = quantize(old, threshold);
        working[i] = new;

        let error = i16::from(old) - i16::from(new);
        spread_error(working, i, error, row_width, DitherKernel::Atkinson);
    }
}

/// Adds the shares of `error`, made at pixel `i`, to the pixels after it.
pub(crate) fn spread_error(
    working: &mut [u8],
    i: usize,
    error: i16,
    row_width: usize,
    kernel: DitherKernel,
) {
    if error == 0 {
        return;
    }

    let rows = working.len() / row_width;
    let rows_left = rows - 1 - i / row_width;
    let columns_left = row_width - 1 - i % row_width;

    for &(target, weight) in kernel.targets(rows_left, columns_left) {
        // a single column has "below left" on the pixel itself
        let offset = target.offset(row_width);
        if offset == 0 {
            continue;
        }

        let share = error * i16::from(weight) / kernel.divisor();
        let pixel = &mut working[i + offset];
        *pixel = (i16::from(*pixel) + share).clamp(0, 255) as u8;
    }
}
