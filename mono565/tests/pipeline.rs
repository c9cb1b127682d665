use image::{Rgb, RgbImage};
use mono565::{
    consts::{BLACK, WHITE},
    luminance::luminance,
    utils::{rgb888_to_rgb565, BigEndian},
    DitherKernel, Geometry, LumaImage, Mono565Context, PanelFrame, RenderOptions,
};

const KERNELS: [DitherKernel; 2] = [DitherKernel::FloydSteinberg, DitherKernel::Atkinson];

fn test_image(width: u32, height: u32) -> RgbImage {
    RgbImage::from_fn(width, height, |x, y| {
        let r = (x * 255 / (width - 1)) as u8;
        let g = (y * 255 / (height - 1)) as u8;
        let b = ((x + y) % 64 * 4) as u8;
        Rgb([r, g, b])
    })
}

fn to_rgb565(image: &RgbImage) -> Vec<u16> {
    image.pixels().map(|p| rgb888_to_rgb565(p.0)).collect()
}

#[test]
fn panel_frame_is_the_dithered_image_turned_clockwise() {
    let image = test_image(64, 48);
    let rgb565 = to_rgb565(&image);
    let geometry = Geometry::new(64, 48).unwrap();

    for kernel in KERNELS {
        let options = RenderOptions::new().with_kernel(kernel);
        let frame = Mono565Context::new(geometry, options)
            .render(&rgb565)
            .unwrap();

        let binary = LumaImage::from_rgb565(geometry, &rgb565)
            .unwrap()
            .dither(options.threshold, kernel);
        assert!(binary.pixels().iter().all(|&p| p == BLACK || p == WHITE));

        assert_eq!((frame.width(), frame.height()), (96, 128));
        for y in 0..geometry.upscaled_height() {
            for x in 0..geometry.upscaled_width() {
                let source = binary.pixels()[(y / 2) * 64 + x / 2] == WHITE;
                let column = geometry.upscaled_height() - 1 - y;
                assert_eq!(frame.pixel(column, x), Some(source), "{kernel:?} {x}, {y}");
            }
        }
    }
}

#[test]
fn solid_colors() {
    let geometry = Geometry::new(32, 16).unwrap();
    let context = Mono565Context::new(geometry, RenderOptions::default());

    let black = context.render(&vec![0x0000; geometry.pixel_count()]).unwrap();
    assert!(black.words().iter().all(|&w| w == 0));

    let white = context.render(&vec![0xFFFF; geometry.pixel_count()]).unwrap();
    assert!(white.words().iter().all(|&w| w == 0xFFFF));
}

#[test]
fn only_white_reaches_full_luminance() {
    let full = (0..=u16::MAX)
        .filter(|&pixel| luminance(pixel) == 255)
        .collect::<Vec<_>>();
    assert_eq!(full, [0xFFFF]);
    assert_eq!(luminance(0x0000), 0);
}

#[test]
fn atkinson_keeps_brightness() {
    let geometry = Geometry::new(64, 64).unwrap();

    for level in [0x2104u16, 0x8410, 0xC618] {
        let luma =
            LumaImage::from_rgb565(geometry, &vec![level; geometry.pixel_count()]).unwrap();
        let mean_in = luma.pixels().iter().map(|&y| y as f32).sum::<f32>() / 4096.0;

        let binary = luma.dither(127, DitherKernel::Atkinson);
        let mean_out = binary.pixels().iter().map(|&y| y as f32).sum::<f32>() / 4096.0;

        // a quarter of the error is dropped, the darkest tones go black
        assert!(
            (mean_in - mean_out).abs() < 40.0,
            "{level:#06x}: {mean_in} vs {mean_out}"
        );
    }
}

#[test]
fn floyd_steinberg_thresholds_each_pixel() {
    let geometry = Geometry::new(64, 48).unwrap();
    let rgb565 = to_rgb565(&test_image(64, 48));

    let luma = LumaImage::from_rgb565(geometry, &rgb565).unwrap();
    let expected = luma
        .pixels()
        .iter()
        .map(|&y| if y > 127 { WHITE } else { BLACK })
        .collect::<Vec<_>>();

    let binary = luma.dither(127, DitherKernel::FloydSteinberg);
    assert_eq!(binary.pixels(), expected);
}

#[test]
fn full_size_frame() {
    let geometry = Geometry::new(320, 240).unwrap();
    let rgb565 = to_rgb565(&test_image(320, 240));

    let frame = Mono565Context::new(geometry, RenderOptions::default())
        .render(&rgb565)
        .unwrap();
    assert_eq!(frame.words().len(), 320 * 240 / 4);

    let bytes = frame.to_bytes::<BigEndian>();
    assert_eq!(bytes.len(), 320 * 240 / 2);
    assert_eq!(
        PanelFrame::from_bytes::<BigEndian>(geometry, &bytes).unwrap(),
        frame
    );
}
