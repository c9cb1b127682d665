pub use byteorder::{BigEndian, ByteOrder, LittleEndian};

use crate::geometry::{check_len, DimensionError};

/// Splits a RGB565 pixel into its components.
#[inline]
pub const fn decode_565(pixel: u16) -> [u8; 3] {
    let r = (pixel & 0b1111_1000_0000_0000) >> 11;
    let g = (pixel & 0b0000_0111_1110_0000) >> 5;
    let b = pixel & 0b0000_0000_0001_1111;

    [r as u8, g as u8, b as u8]
}

/// Widens a RGB565 pixel to 8 bits per channel by replicating the top bits into the freed low
/// bits, so that full-scale channels map to 255.
#[inline]
pub const fn expand_565([r, g, b]: [u8; 3]) -> [u8; 3] {
    [(r << 3) | (r >> 2), (g << 2) | (g >> 4), (b << 3) | (b >> 2)]
}

/// Converts an RGB888 pixel into a packed RGB565 pixel.
#[inline]
pub const fn rgb888_to_rgb565([r, g, b]: [u8; 3]) -> u16 {
    // https://stackoverflow.com/questions/2442576/how-does-one-convert-16-bit-rgb565-to-24-bit-rgb888
    let r = (r as u32 * 249 + 1014) >> 11;
    let g = (g as u32 * 253 + 505) >> 10;
    let b = (b as u32 * 249 + 1014) >> 11;

    ((r as u16) << 11) | ((g as u16) << 5) | (b as u16)
}

/// Serializes packed words into `out` using the byte order `B`.
///
/// `out` must be exactly twice as long as `words`.
pub fn words_to_bytes<B: ByteOrder>(words: &[u16], out: &mut [u8]) -> Result<(), DimensionError> {
    check_len("byte", words.len() * 2, out.len())?;
    B::write_u16_into(words, out);
    Ok(())
}

/// Reads words serialized with [`words_to_bytes`] back into `out`.
pub fn bytes_to_words<B: ByteOrder>(bytes: &[u8], out: &mut [u16]) -> Result<(), DimensionError> {
    check_len("byte", out.len() * 2, bytes.len())?;
    B::read_u16_into(bytes, out);
    Ok(())
}
