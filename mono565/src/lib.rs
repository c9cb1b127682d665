//! Conversion pipeline from RGB565 images to 1-bit frames for monochrome e-paper panels.
//!
//! The pipeline has four stages, each a pure transform over a complete buffer:
//!
//! 1. [`luminance`]: RGB565 to 8-bit luminance. Channels are widened by bit replication and
//!    weighted with the BT.601 coefficients (0.299, 0.587, 0.114).
//! 2. [`dither`]: error diffusion down to black (0) and white (255), using either
//!    [Floyd-Steinberg](dither::DitherKernel::FloydSteinberg) or
//!    [Atkinson](dither::DitherKernel::Atkinson).
//! 3. [`pack`]: 1 bit per pixel, every source pixel becoming a 2x2 block.
//! 4. [`rotate`]: 90 degree rotation into the order the panel controller scans.
//!
//! # Buffer layout
//!
//! Packed buffers hold 16 pixels per `u16`, the leftmost pixel in the most significant bit, with the
//! two bytes of each word swapped afterwards. A `W`x`H` source image turns into `W * H / 4` words.
//!
//! The panel frame has `2 * W` rows of `2 * H / 16` words. Reading it back in panel order, row `r`
//! and column `c` live in bit `(15 - c % 16) ^ 8` of word `r * 2 * H / 16 + c / 16`, and hold the
//! upscaled source pixel at `x = r`, `y = 2 * H - 1 - c`.
//!
//! # Allocation
//!
//! Every stage works on caller-provided slices and never allocates, so the crate runs on
//! microcontrollers without a heap. The `alloc` feature adds owned stage buffers that hand their
//! storage from one stage to the next ([`LumaImage`] through [`PanelFrame`]).
//!
//! All dimensions are checked before a buffer is touched. Width and height must be non-zero
//! multiples of 8 (see [`Geometry`]), and every stage reports a [`DimensionError`] instead of
//! writing out of bounds.
#![cfg_attr(not(any(test, feature = "std")), no_std)]

#[cfg(feature = "alloc")]
extern crate alloc;

macro_rules! debug {
    ($($arg:tt)*) => {
        #[cfg(feature = "log")]
        log::debug!($($arg)*);
    };
}

#[cfg(feature = "alloc")]
pub mod alloc_api;

pub mod dither;
pub mod geometry;
pub mod luminance;
pub mod pack;
pub mod pipeline;
pub mod rotate;
pub mod utils;

#[cfg(feature = "alloc")]
pub use alloc_api::{BinaryImage, LumaImage, PackedImage, PanelFrame};
pub use dither::DitherKernel;
pub use geometry::{DimensionError, Geometry};
pub use pipeline::{Mono565Context, RenderOptions};

pub mod consts {
    /// Value of a black binary pixel.
    pub const BLACK: u8 = 0x00;

    /// Value of a white binary pixel.
    pub const WHITE: u8 = 0xFF;

    /// Number of 1-bit pixels held by one packed word.
    pub const PIXELS_PER_WORD: usize = 16;

    /// Number of source pixels consumed per packed word (each is doubled horizontally).
    pub const SOURCE_PIXELS_PER_WORD: usize = PIXELS_PER_WORD / SCALE;

    /// Linear upscale factor applied on each axis by the packer.
    pub const SCALE: usize = 2;

    /// Source width and height must be multiples of this.
    pub const ALIGNMENT: usize = 8;

    /// Rows per block reversed by the rotator's final fix-up pass.
    pub const ROW_BLOCK: usize = 8;

    /// Default dither threshold, the midpoint of the 8-bit range.
    pub const DEFAULT_THRESHOLD: u8 = 127;
}
