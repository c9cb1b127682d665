use crate::consts::{ALIGNMENT, PIXELS_PER_WORD, SCALE};
use snafu::{ensure, Snafu};

/// Rejected image or buffer dimensions.
///
/// Every stage checks its inputs and returns this before writing to any output buffer.
#[derive(Debug, Snafu, Clone, PartialEq, Eq)]
#[snafu(module)]
pub enum DimensionError {
    #[snafu(display("Image dimensions must be non-zero, got {width}x{height}"))]
    Empty { width: usize, height: usize },

    #[snafu(display(
        "Image dimensions {width}x{height} are not aligned to multiples of {alignment}"
    ))]
    Misaligned {
        width: usize,
        height: usize,
        alignment: usize,
    },

    #[snafu(display(
        "Row width {row_width} does not evenly divide the pixel count {pixel_count}"
    ))]
    RaggedRows { pixel_count: usize, row_width: usize },

    #[snafu(display("The {buffer} buffer holds {actual} elements, but {expected} are required"))]
    BufferLength {
        buffer: &'static str,
        expected: usize,
        actual: usize,
    },
}

/// Validated source image size.
///
/// Width and height are non-zero multiples of 8. After the 2x upscale both sides are multiples of
/// 16, so rows split evenly into packed words in both the upscaled and the rotated orientation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Geometry {
    width: u16,
    height: u16,
}

impl Geometry {
    pub fn new(width: u16, height: u16) -> Result<Self, DimensionError> {
        check_non_empty(usize::from(width), usize::from(height))?;
        check_alignment(usize::from(width), usize::from(height), ALIGNMENT)?;

        Ok(Self { width, height })
    }

    #[inline]
    pub const fn width(&self) -> u16 {
        self.width
    }

    #[inline]
    pub const fn height(&self) -> u16 {
        self.height
    }

    /// Number of source pixels, `W * H`.
    #[inline]
    pub const fn pixel_count(&self) -> usize {
        self.width as usize * self.height as usize
    }

    #[inline]
    pub const fn upscaled_width(&self) -> usize {
        self.width as usize * SCALE
    }

    #[inline]
    pub const fn upscaled_height(&self) -> usize {
        self.height as usize * SCALE
    }

    /// Number of words in both the packed buffer and the panel frame.
    #[inline]
    pub const fn packed_len(&self) -> usize {
        self.upscaled_width() * self.upscaled_height() / PIXELS_PER_WORD
    }

    /// Words per row of the packed (unrotated) buffer.
    #[inline]
    pub const fn words_per_row(&self) -> usize {
        self.upscaled_width() / PIXELS_PER_WORD
    }

    /// Words per row of the rotated panel frame.
    #[inline]
    pub const fn panel_words_per_row(&self) -> usize {
        self.upscaled_height() / PIXELS_PER_WORD
    }
}

/// Checks that `buffer` has exactly `expected` elements.
pub(crate) fn check_len(
    buffer: &'static str,
    expected: usize,
    actual: usize,
) -> Result<(), DimensionError> {
    ensure!(
        expected == actual,
        dimension_error::BufferLengthSnafu {
            buffer,
            expected,
            actual,
        }
    );
    Ok(())
}

pub(crate) fn check_non_empty(width: usize, height: usize) -> Result<(), DimensionError> {
    ensure!(
        width != 0 && height != 0,
        dimension_error::EmptySnafu { width, height }
    );
    Ok(())
}

/// Checks that both `width` and `height` are multiples of `alignment`.
pub(crate) fn check_alignment(
    width: usize,
    height: usize,
    alignment: usize,
) -> Result<(), DimensionError> {
    ensure!(
        width % alignment == 0 && height % alignment == 0,
        dimension_error::MisalignedSnafu {
            width,
            height,
            alignment,
        }
    );
    Ok(())
}

/// Returns the number of rows when `pixel_count` pixels are laid out `row_width` to a row.
pub(crate) fn row_count(pixel_count: usize, row_width: usize) -> Result<usize, DimensionError> {
    ensure!(
        row_width != 0 && pixel_count % row_width == 0,
        dimension_error::RaggedRowsSnafu {
            pixel_count,
            row_width,
        }
    );
    Ok(pixel_count / row_width)
}
