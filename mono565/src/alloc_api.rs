//! Owned stage buffers.
//!
//! Each stage takes the previous stage's buffer by value, so a buffer is only ever reachable from
//! the stage currently working on it. The luminance storage is reused for the dithered image.

use crate::{
    dither::{dither_unchecked, DitherKernel},
    geometry::{check_len, DimensionError, Geometry},
    luminance::luminance,
    pack::upscale_rows,
    pipeline::Mono565Context,
    rotate::{panel_pixel, rotate_words},
    utils::{bytes_to_words, ByteOrder},
};
use alloc::{vec, vec::Vec};

#[cfg(feature = "std")]
mod std_api;
#[cfg(feature = "std")]
pub use std_api::*;

/// 8-bit luminance, one byte per source pixel.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LumaImage {
    geometry: Geometry,
    pixels: Vec<u8>,
}

impl LumaImage {
    pub fn from_rgb565(geometry: Geometry, rgb565: &[u16]) -> Result<Self, DimensionError> {
        check_len("rgb565", geometry.pixel_count(), rgb565.len())?;

        let pixels = rgb565.iter().copied().map(luminance).collect();
        Ok(Self { geometry, pixels })
    }

    /// Wraps an existing luminance buffer.
    pub fn from_vec(geometry: Geometry, pixels: Vec<u8>) -> Result<Self, DimensionError> {
        check_len("luminance", geometry.pixel_count(), pixels.len())?;
        Ok(Self { geometry, pixels })
    }

    pub fn geometry(&self) -> Geometry {
        self.geometry
    }

    pub fn pixels(&self) -> &[u8] {
        &self.pixels
    }

    pub fn dither(self, threshold: u8, kernel: DitherKernel) -> BinaryImage {
        let Self { geometry, mut pixels } = self;
        dither_unchecked(&mut pixels, usize::from(geometry.width()), threshold, kernel);

        BinaryImage { geometry, pixels }
    }
}

/// Dithered image, every pixel 0 or 255.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BinaryImage {
    geometry: Geometry,
    pixels: Vec<u8>,
}

impl BinaryImage {
    pub fn geometry(&self) -> Geometry {
        self.geometry
    }

    pub fn pixels(&self) -> &[u8] {
        &self.pixels
    }

    pub fn upscale(self) -> PackedImage {
        let geometry = self.geometry;
        let mut words = vec![0; geometry.packed_len()];
        upscale_rows(&self.pixels, usize::from(geometry.width()), &mut words);

        PackedImage { geometry, words }
    }
}

/// 1 bit per pixel at twice the source resolution, in source orientation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PackedImage {
    geometry: Geometry,
    words: Vec<u16>,
}

impl PackedImage {
    pub fn geometry(&self) -> Geometry {
        self.geometry
    }

    pub fn words(&self) -> &[u16] {
        &self.words
    }

    pub fn rotate(self) -> PanelFrame {
        let geometry = self.geometry;
        let mut words = vec![0; geometry.packed_len()];
        rotate_words(
            &self.words,
            geometry.upscaled_width(),
            geometry.upscaled_height(),
            &mut words,
        );

        PanelFrame { geometry, words }
    }
}

/// Finished frame in the panel's scan order.
///
/// In panel coordinates the frame is [`height`](Self::height) pixels wide and
/// [`width`](Self::width) rows tall.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PanelFrame {
    geometry: Geometry,
    words: Vec<u16>,
}

impl PanelFrame {
    /// Wraps a frame read back from storage, e.g. one written by [`PanelFrame::to_bytes`].
    pub fn from_words(geometry: Geometry, words: Vec<u16>) -> Result<Self, DimensionError> {
        check_len("panel", geometry.packed_len(), words.len())?;
        Ok(Self { geometry, words })
    }

    pub fn from_bytes<B: ByteOrder>(
        geometry: Geometry,
        bytes: &[u8],
    ) -> Result<Self, DimensionError> {
        let mut words = vec![0; geometry.packed_len()];
        bytes_to_words::<B>(bytes, &mut words)?;
        Ok(Self { geometry, words })
    }

    pub fn geometry(&self) -> Geometry {
        self.geometry
    }

    /// Panel pixels per row.
    pub fn width(&self) -> usize {
        self.geometry.upscaled_height()
    }

    /// Panel rows.
    pub fn height(&self) -> usize {
        self.geometry.upscaled_width()
    }

    pub fn words(&self) -> &[u16] {
        &self.words
    }

    pub fn into_words(self) -> Vec<u16> {
        self.words
    }

    /// Whether the panel pixel at (`column`, `row`) is white.
    ///
    /// Returns `None` outside the frame.
    pub fn pixel(&self, column: usize, row: usize) -> Option<bool> {
        (column < self.width() && row < self.height()).then(|| {
            panel_pixel(
                &self.words,
                self.geometry.panel_words_per_row(),
                row,
                column,
            )
        })
    }

    /// Serializes the frame for transfer, two bytes per word in byte order `B`.
    pub fn to_bytes<B: ByteOrder>(&self) -> Vec<u8> {
        let mut bytes = vec![0; self.words.len() * 2];
        B::write_u16_into(&self.words, &mut bytes);
        bytes
    }
}

impl Mono565Context {
    /// Runs all four stages, allocating the intermediate buffers.
    pub fn render(&self, rgb565: &[u16]) -> Result<PanelFrame, DimensionError> {
        let binary = LumaImage::from_rgb565(self.geometry, rgb565)?
            .dither(self.options.threshold, self.options.kernel);

        Ok(binary.upscale().rotate())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        consts::{BLACK, WHITE},
        pipeline::RenderOptions,
        utils::{BigEndian, LittleEndian},
    };

    #[test]
    fn stages_hand_over_buffers() {
        let geometry = Geometry::new(8, 8).unwrap();
        let luma = LumaImage::from_rgb565(geometry, &[0x8410; 64]).unwrap();
        assert!(luma.pixels().iter().all(|&y| y == luminance(0x8410)));

        let binary = luma.dither(127, DitherKernel::FloydSteinberg);
        assert!(binary.pixels().iter().all(|&p| p == BLACK || p == WHITE));

        let packed = binary.upscale();
        assert_eq!(packed.words().len(), 16);

        let frame = packed.rotate();
        assert_eq!(frame.words().len(), 16);
        assert_eq!((frame.width(), frame.height()), (16, 16));
    }

    #[test]
    fn render_matches_slice_api() {
        let geometry = Geometry::new(16, 24).unwrap();
        let context = Mono565Context::new(geometry, RenderOptions::new().with_threshold(90));
        let image = (0..geometry.pixel_count())
            .map(|i| (i as u16).wrapping_mul(0x9E37))
            .collect::<Vec<_>>();

        let mut scratch = vec![0; geometry.pixel_count()];
        let mut packed = vec![0; geometry.packed_len()];
        let mut out = vec![0; geometry.packed_len()];
        context
            .render_to_slice(&image, &mut scratch, &mut packed, &mut out)
            .unwrap();

        assert_eq!(context.render(&image).unwrap().into_words(), out);
    }

    #[test]
    fn single_white_pixel_lands_top_right() {
        let geometry = Geometry::new(8, 8).unwrap();
        let mut image = vec![0x0000; 64];
        image[0] = 0xFFFF;

        let frame = Mono565Context::new(geometry, RenderOptions::default())
            .render(&image)
            .unwrap();

        for row in 0..frame.height() {
            for column in 0..frame.width() {
                let expected = row < 2 && column >= 14;
                assert_eq!(frame.pixel(column, row), Some(expected), "{column}, {row}");
            }
        }
        assert_eq!(frame.pixel(16, 0), None);
        assert_eq!(frame.pixel(0, 16), None);
    }

    #[test]
    fn bytes_roundtrip() {
        let geometry = Geometry::new(8, 8).unwrap();
        let words = (0..16u16).map(|w| w * 0x0101 + 1).collect::<Vec<_>>();
        let frame = PanelFrame::from_words(geometry, words.clone()).unwrap();

        let be = frame.to_bytes::<BigEndian>();
        assert_eq!(&be[..4], &[0x00, 0x01, 0x01, 0x02]);
        let le = frame.to_bytes::<LittleEndian>();
        assert_eq!(&le[..4], &[0x01, 0x00, 0x02, 0x01]);

        let back = PanelFrame::from_bytes::<BigEndian>(geometry, &be).unwrap();
        assert_eq!(back.into_words(), words);

        assert!(PanelFrame::from_bytes::<BigEndian>(geometry, &be[1..]).is_err());
        assert!(PanelFrame::from_words(geometry, vec![0; 15]).is_err());
    }

    #[test]
    fn rejects_mismatched_input() {
        let geometry = Geometry::new(8, 8).unwrap();
        let context = Mono565Context::new(geometry, RenderOptions::default());

        assert!(context.render(&[0; 63]).is_err());
        assert!(LumaImage::from_vec(geometry, vec![0; 65]).is_err());
    }
}
