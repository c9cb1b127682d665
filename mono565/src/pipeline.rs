use crate::{
    consts::DEFAULT_THRESHOLD,
    dither::{dither_unchecked, DitherKernel},
    geometry::{check_len, DimensionError, Geometry},
    luminance::extract,
    pack::upscale_rows,
    rotate::rotate_words,
};

/// Tunables of the dithering stage.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RenderOptions {
    /// Pixels above this become white.
    pub threshold: u8,
    pub kernel: DitherKernel,
}

impl RenderOptions {
    pub const fn new() -> Self {
        Self {
            threshold: DEFAULT_THRESHOLD,
            kernel: DitherKernel::Atkinson,
        }
    }

    pub const fn with_threshold(self, threshold: u8) -> Self {
        Self { threshold, ..self }
    }

    pub const fn with_kernel(self, kernel: DitherKernel) -> Self {
        Self { kernel, ..self }
    }
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self::new()
    }
}

/// Runs all four stages for images of one size.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Mono565Context {
    pub geometry: Geometry,
    pub options: RenderOptions,
}

impl Mono565Context {
    pub const fn new(geometry: Geometry, options: RenderOptions) -> Self {
        Self { geometry, options }
    }

    /// Renders a RGB565 image into a panel frame without allocating.
    ///
    /// - `rgb565`: the source image, `W * H` pixels
    /// - `scratch`: `W * H` bytes, holds the luminance and then the dithered image
    /// - `packed`: `W * H / 4` words, holds the upscaled image before rotation
    /// - `out`: `W * H / 4` words, receives the panel frame
    ///
    /// All lengths are checked before anything is written.
    pub fn render_to_slice(
        &self,
        rgb565: &[u16],
        scratch: &mut [u8],
        packed: &mut [u16],
        out: &mut [u16],
    ) -> Result<(), DimensionError> {
        let geometry = self.geometry;
        check_len("rgb565", geometry.pixel_count(), rgb565.len())?;
        check_len("scratch", geometry.pixel_count(), scratch.len())?;
        check_len("packed", geometry.packed_len(), packed.len())?;
        check_len("panel", geometry.packed_len(), out.len())?;

        debug!(
            "rendering {}x{} image, threshold {}, {:?}",
            geometry.width(),
            geometry.height(),
            self.options.threshold,
            self.options.kernel
        );

        extract(rgb565, scratch)?;
        self.dither_stage(scratch);

        upscale_rows(scratch, usize::from(geometry.width()), packed);
        debug!("packed {} words", packed.len());

        rotate_words(
            packed,
            geometry.upscaled_width(),
            geometry.upscaled_height(),
            out,
        );
        debug!(
            "rotated into {} rows of {} words",
            geometry.upscaled_width(),
            geometry.panel_words_per_row()
        );

        Ok(())
    }

    fn dither_stage(&self, buf: &mut [u8]) {
        dither_unchecked(
            buf,
            usize::from(self.geometry.width()),
            self.options.threshold,
            self.options.kernel,
        );
        debug!(
            "dithered {} pixels, {} white",
            buf.len(),
            buf.iter().filter(|&&p| p == crate::consts::WHITE).count()
        );
    }
}
