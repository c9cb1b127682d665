#![no_std]

use mono565::{DitherKernel, Geometry, Mono565Context, RenderOptions};

#[panic_handler]
fn panic_handler(_info: &core::panic::PanicInfo) -> ! {
    unsafe { core::hint::unreachable_unchecked() }
}

/// Value of `kernel` selecting Floyd-Steinberg dithering in [`mono565_render`].
pub const MONO565_KERNEL_FLOYD_STEINBERG: u8 = 0;
/// Value of `kernel` selecting Atkinson dithering in [`mono565_render`].
pub const MONO565_KERNEL_ATKINSON: u8 = 1;

/// Converts RGB565 pixels into 8-bit luminance.
///
/// - `input`: Pointer to the RGB565 pixels
/// - `input_len`: Number of pixels
/// - `output`: Pointer to the luminance buffer
/// - `output_len`: Length of the luminance buffer, in bytes. Must equal `input_len`.
///
/// Returns the number of bytes written, or -1 if the lengths differ.
///
/// # Safety
///
/// The pointers must be valid for the given lengths, and the buffers must not overlap.
#[no_mangle]
pub unsafe extern "C" fn mono565_luminance(
    input: *const u16,
    input_len: usize,
    output: *mut u8,
    output_len: usize,
) -> isize {
    let input = unsafe { core::slice::from_raw_parts(input, input_len) };
    let output = unsafe { core::slice::from_raw_parts_mut(output, output_len) };

    match mono565::luminance::extract(input, output) {
        Ok(()) => output.len() as isize,
        Err(_) => -1,
    }
}

unsafe fn dither_raw(
    input: *const u8,
    output: *mut u8,
    len: usize,
    row_width: usize,
    threshold: u8,
    kernel: DitherKernel,
) -> isize {
    let input = unsafe { core::slice::from_raw_parts(input, len) };
    let output = unsafe { core::slice::from_raw_parts_mut(output, len) };

    match mono565::dither::dither(input, output, row_width, threshold, kernel) {
        Ok(()) => len as isize,
        Err(_) => -1,
    }
}

/// Dithers a luminance buffer to black and white with the Floyd-Steinberg kernel.
///
/// - `input`: Pointer to the luminance buffer, left untouched
/// - `output`: Pointer to the output buffer, receives 0 or 255 per pixel
/// - `len`: Length of both buffers, in bytes
/// - `row_width`: Pixels per row. Must be non-zero and divide `len`.
/// - `threshold`: Pixels above this value become white
///
/// Returns the number of pixels written, or -1 if `row_width` does not fit `len`.
///
/// # Safety
///
/// Both pointers must be valid for `len` bytes, and the buffers must not overlap.
#[no_mangle]
pub unsafe extern "C" fn mono565_dither_floyd_steinberg(
    input: *const u8,
    output: *mut u8,
    len: usize,
    row_width: usize,
    threshold: u8,
) -> isize {
    unsafe {
        dither_raw(
            input,
            output,
            len,
            row_width,
            threshold,
            DitherKernel::FloydSteinberg,
        )
    }
}

/// Dithers a luminance buffer to black and white with the Atkinson kernel.
///
/// Parameters and return value are the same as for [`mono565_dither_floyd_steinberg`].
///
/// # Safety
///
/// Both pointers must be valid for `len` bytes, and the buffers must not overlap.
#[no_mangle]
pub unsafe extern "C" fn mono565_dither_atkinson(
    input: *const u8,
    output: *mut u8,
    len: usize,
    row_width: usize,
    threshold: u8,
) -> isize {
    unsafe {
        dither_raw(
            input,
            output,
            len,
            row_width,
            threshold,
            DitherKernel::Atkinson,
        )
    }
}

/// Packs a dithered buffer to 1 bit per pixel, upscaling it 2x in both directions.
///
/// - `input`: Pointer to the dithered pixels
/// - `input_len`: Number of pixels
/// - `row_width`: Pixels per row. Must be a non-zero multiple of 8 that divides `input_len`.
/// - `output`: Pointer to the packed buffer
/// - `output_len`: Length of the packed buffer, in 16-bit words. Must be `input_len / 4`.
///
/// Returns the number of words written, or -1 if the layout is invalid.
///
/// # Safety
///
/// The pointers must be valid for the given lengths.
#[no_mangle]
pub unsafe extern "C" fn mono565_upscale(
    input: *const u8,
    input_len: usize,
    row_width: usize,
    output: *mut u16,
    output_len: usize,
) -> isize {
    let input = unsafe { core::slice::from_raw_parts(input, input_len) };
    let output = unsafe { core::slice::from_raw_parts_mut(output, output_len) };

    match mono565::pack::upscale(input, row_width, output) {
        Ok(()) => output.len() as isize,
        Err(_) => -1,
    }
}

/// Rotates a packed buffer into the panel's scan order.
///
/// - `input`: Pointer to the packed buffer
/// - `input_len`: Length of the packed buffer, in 16-bit words
/// - `upscaled_columns`, `upscaled_rows`: Size of the packed image in pixels. Both must be
///   non-zero multiples of 16.
/// - `output`: Pointer to the panel frame, fully overwritten
/// - `output_len`: Length of the panel frame, in 16-bit words. Must equal `input_len`.
///
/// Returns the number of words written, or -1 if the layout is invalid.
///
/// # Safety
///
/// The pointers must be valid for the given lengths, and the buffers must not overlap.
#[no_mangle]
pub unsafe extern "C" fn mono565_rotate(
    input: *const u16,
    input_len: usize,
    upscaled_columns: usize,
    upscaled_rows: usize,
    output: *mut u16,
    output_len: usize,
) -> isize {
    let input = unsafe { core::slice::from_raw_parts(input, input_len) };
    let output = unsafe { core::slice::from_raw_parts_mut(output, output_len) };

    match mono565::rotate::rotate(input, upscaled_columns, upscaled_rows, output) {
        Ok(()) => output.len() as isize,
        Err(_) => -1,
    }
}

/// Renders a RGB565 image into a panel frame.
///
/// - `input`: Pointer to the RGB565 pixels
/// - `width`, `height`: Size of the image. Both must be non-zero multiples of 8.
/// - `threshold`: Dither threshold, 127 is a good default
/// - `kernel`: [`MONO565_KERNEL_FLOYD_STEINBERG`] or [`MONO565_KERNEL_ATKINSON`]
/// - `scratch`: Pointer to `width * height` bytes of scratch space
/// - `packed`: Pointer to `width * height / 4` words of scratch space
/// - `output`: Pointer to the panel frame
/// - `output_len`: Length of the panel frame, in 16-bit words. Must be `width * height / 4`.
///
/// Returns the number of words written, or -1 if the dimensions, the kernel or the output length
/// are invalid.
///
/// # Safety
///
/// `input` and `scratch` must be valid for `width * height` elements, `packed` for
/// `width * height / 4` words, and `output` for `output_len` words. No two buffers may overlap.
#[no_mangle]
pub unsafe extern "C" fn mono565_render(
    input: *const u16,
    width: u16,
    height: u16,
    threshold: u8,
    kernel: u8,
    scratch: *mut u8,
    packed: *mut u16,
    output: *mut u16,
    output_len: usize,
) -> isize {
    let kernel = match kernel {
        MONO565_KERNEL_FLOYD_STEINBERG => DitherKernel::FloydSteinberg,
        MONO565_KERNEL_ATKINSON => DitherKernel::Atkinson,
        _ => return -1,
    };
    let Ok(geometry) = Geometry::new(width, height) else {
        return -1;
    };

    let input = unsafe { core::slice::from_raw_parts(input, geometry.pixel_count()) };
    let scratch = unsafe { core::slice::from_raw_parts_mut(scratch, geometry.pixel_count()) };
    let packed = unsafe { core::slice::from_raw_parts_mut(packed, geometry.packed_len()) };
    let output = unsafe { core::slice::from_raw_parts_mut(output, output_len) };

    let options = RenderOptions::new()
        .with_threshold(threshold)
        .with_kernel(kernel);

    match Mono565Context::new(geometry, options).render_to_slice(input, scratch, packed, output) {
        Ok(()) => output.len() as isize,
        Err(_) => -1,
    }
}
