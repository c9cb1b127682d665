//! 90 degree rotation of a packed buffer into the panel's scan order.
//!
//! The source is `upscaled_rows` rows of `upscaled_columns / 16` words. The result has
//! `upscaled_columns` rows of `upscaled_rows / 16` words. The word and bit placement below is
//! fixed by the order the panel controller shifts pixels in. It undoes the byte swap done by the
//! packer, swaps the bytes of the destination words, and reverses every block of 8 destination
//! rows. Read back with [`panel_pixel`], the frame is the upscaled image turned clockwise.

use crate::{
    consts::{PIXELS_PER_WORD, ROW_BLOCK},
    geometry::{check_alignment, check_len, check_non_empty, DimensionError},
};
use itertools::iproduct;

/// Rotates `packed` into `out`.
///
/// Both upscaled dimensions must be non-zero multiples of 16, and `packed` and `out` must each
/// hold `upscaled_columns * upscaled_rows / 16` words. `out` is fully overwritten.
pub fn rotate(
    packed: &[u16],
    upscaled_columns: usize,
    upscaled_rows: usize,
    out: &mut [u16],
) -> Result<(), DimensionError> {
    check_non_empty(upscaled_columns, upscaled_rows)?;
    check_alignment(upscaled_columns, upscaled_rows, PIXELS_PER_WORD)?;

    let len = upscaled_columns * upscaled_rows / PIXELS_PER_WORD;
    check_len("packed", len, packed.len())?;
    check_len("panel", len, out.len())?;

    rotate_words(packed, upscaled_columns, upscaled_rows, out);

    Ok(())
}

/// Callers have validated the layout.
pub(crate) fn rotate_words(
    packed: &[u16],
    upscaled_columns: usize,
    upscaled_rows: usize,
    out: &mut [u16],
) {
    let source_words = upscaled_columns / PIXELS_PER_WORD;
    let panel_words = upscaled_rows / PIXELS_PER_WORD;

    out.fill(0);

    for (i, j) in iproduct!(0..upscaled_rows, 0..source_words) {
        let word = packed[i * source_words + j];
        if word == 0 {
            continue;
        }

        let bit = if i % 16 < 8 { i % 16 + 8 } else { i % 16 - 8 };

        for k in (0..16).rev().filter(|&k| word & (1 << k) != 0) {
            let index = panel_words * 16 * j + (panel_words - 1) - i / 16 + panel_words * k;
            out[index] |= 1 << bit;
        }
    }

    reverse_row_blocks(out, panel_words);
}

/// Swaps rows 0 and 7, 1 and 6, 2 and 5, 3 and 4 of every block of 8 rows.
fn reverse_row_blocks(frame: &mut [u16], words_per_row: usize) {
    for block in frame.chunks_exact_mut(words_per_row * ROW_BLOCK) {
        for row in 0..ROW_BLOCK / 2 {
            let (upper, lower) = block.split_at_mut((ROW_BLOCK - 1 - row) * words_per_row);
            upper[row * words_per_row..][..words_per_row]
                .swap_with_slice(&mut lower[..words_per_row]);
        }
    }
}

/// Reads pixel (`row`, `column`) of a panel frame in the order the panel scans it.
///
/// Panics if the coordinates lie outside the frame.
#[inline]
pub fn panel_pixel(frame: &[u16], words_per_row: usize, row: usize, column: usize) -> bool {
    let word = frame[row * words_per_row + column / PIXELS_PER_WORD];
    let bit = (15 - column % PIXELS_PER_WORD) ^ 8;

    word & (1 << bit) != 0
}
