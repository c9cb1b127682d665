//! Bit-packing of binary pixels with a 2x nearest-neighbor upscale.
//!
//! Every source pixel becomes a 2x2 block: two adjacent bits in a packed word, repeated on the
//! following packed row. Eight source pixels fill one word.
//!
//! ```plain
//! source row:  p0 p1 p2 p3 p4 p5 p6 p7
//!
//! word before byte swap:
//! | 15 14 | 13 12 | 11 10 |  9  8 |  7  6 |  5  4 |  3  2 |  1  0 |
//! |  p0   |  p1   |  p2   |  p3   |  p4   |  p5   |  p6   |  p7   |
//! ```
//!
//! The two bytes of the word are then swapped to match the panel's byte order.

use crate::{
    consts::{PIXELS_PER_WORD, SCALE, SOURCE_PIXELS_PER_WORD, WHITE},
    geometry::{check_len, row_count, DimensionError},
};
use itertools::izip;

/// Packs eight binary pixels into one byte-swapped word, two bits per pixel.
///
/// Only [`WHITE`] pixels set bits.
#[inline]
pub fn pack_group(group: &[u8]) -> u16 {
    let word = group
        .iter()
        .take(SOURCE_PIXELS_PER_WORD)
        .enumerate()
        .filter(|&(_, &pixel)| pixel == WHITE)
        .fold(0u16, |word, (j, _)| word | (0b11 << (14 - 2 * j)));

    word.swap_bytes()
}

/// Packs and upscales `binary`, laid out `row_width` pixels to a row, into `out`.
///
/// `row_width` must be a non-zero multiple of 8 that divides the pixel count, and `out` must hold
/// exactly a quarter as many words as there are source pixels.
pub fn upscale(binary: &[u8], row_width: usize, out: &mut [u16]) -> Result<(), DimensionError> {
    let rows = row_count(binary.len(), row_width)?;
    if row_width % SOURCE_PIXELS_PER_WORD != 0 {
        return Err(DimensionError::Misaligned {
            width: row_width,
            height: rows,
            alignment: SOURCE_PIXELS_PER_WORD,
        });
    }
    check_len(
        "packed",
        binary.len() * SCALE * SCALE / PIXELS_PER_WORD,
        out.len(),
    )?;

    upscale_rows(binary, row_width, out);

    Ok(())
}

/// Callers have validated the layout.
pub(crate) fn upscale_rows(binary: &[u8], row_width: usize, out: &mut [u16]) {
    let words_per_row = row_width / SOURCE_PIXELS_PER_WORD;

    for (source_row, packed_rows) in izip!(
        binary.chunks_exact(row_width),
        out.chunks_exact_mut(words_per_row * SCALE)
    ) {
        let (row, duplicate) = packed_rows.split_at_mut(words_per_row);

        let groups = source_row.chunks_exact(SOURCE_PIXELS_PER_WORD);
        for (group, word) in izip!(groups, row.iter_mut()) {
            *word = pack_group(group);
        }

        duplicate.copy_from_slice(row);
    }
}
