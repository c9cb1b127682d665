use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use image::{Rgb, RgbImage};
use mono565::{
    dither, luminance, pack, rotate, utils::rgb888_to_rgb565, DitherKernel, Geometry,
    Mono565Context, RenderOptions,
};

const SIZES: [(u16, u16); 2] = [(320, 240), (800, 480)];

fn gradient(width: u16, height: u16) -> Vec<u16> {
    let (width, height) = (u32::from(width), u32::from(height));
    let image = RgbImage::from_fn(width, height, |x, y| {
        Rgb([
            (x * 255 / width) as u8,
            (y * 255 / height) as u8,
            ((x ^ y) & 0xFF) as u8,
        ])
    });

    image.pixels().map(|p| rgb888_to_rgb565(p.0)).collect()
}

fn stages(c: &mut Criterion) {
    let mut group = c.benchmark_group("stages");

    for (width, height) in SIZES {
        let geometry = Geometry::new(width, height).unwrap();
        let name = format!("{width}x{height}");
        let rgb565 = gradient(width, height);
        let row_width = usize::from(width);

        let mut luma = vec![0; geometry.pixel_count()];
        luminance::extract(&rgb565, &mut luma).unwrap();
        let mut binary = vec![0; geometry.pixel_count()];
        dither::dither(&luma, &mut binary, row_width, 127, DitherKernel::Atkinson).unwrap();
        let mut packed = vec![0; geometry.packed_len()];
        pack::upscale(&binary, row_width, &mut packed).unwrap();
        let mut panel = vec![0; geometry.packed_len()];

        group.throughput(Throughput::Elements(geometry.pixel_count() as u64));

        group.bench_with_input(BenchmarkId::new("luminance", &name), &rgb565, |b, input| {
            let mut out = vec![0; input.len()];
            b.iter(|| luminance::extract(input, &mut out))
        });
        for kernel in [DitherKernel::FloydSteinberg, DitherKernel::Atkinson] {
            group.bench_with_input(
                BenchmarkId::new(format!("dither {kernel:?}"), &name),
                &luma,
                |b, input| {
                    let mut out = vec![0; input.len()];
                    b.iter(|| dither::dither(input, &mut out, row_width, 127, kernel))
                },
            );
        }
        group.bench_with_input(BenchmarkId::new("upscale", &name), &binary, |b, input| {
            let mut out = vec![0; geometry.packed_len()];
            b.iter(|| pack::upscale(input, row_width, &mut out))
        });
        group.bench_with_input(BenchmarkId::new("rotate", &name), &packed, |b, input| {
            b.iter(|| {
                rotate::rotate(
                    input,
                    geometry.upscaled_width(),
                    geometry.upscaled_height(),
                    &mut panel,
                )
            })
        });
    }
}

fn pipeline(c: &mut Criterion) {
    let mut group = c.benchmark_group("pipeline");

    for (width, height) in SIZES {
        let geometry = Geometry::new(width, height).unwrap();
        let context = Mono565Context::new(geometry, RenderOptions::default());
        let name = format!("{width}x{height}");
        let rgb565 = gradient(width, height);

        group.throughput(Throughput::Elements(geometry.pixel_count() as u64));

        group.bench_with_input(BenchmarkId::new("render_to_slice", &name), &rgb565, |b, input| {
            let mut scratch = vec![0; geometry.pixel_count()];
            let mut packed = vec![0; geometry.packed_len()];
            let mut out = vec![0; geometry.packed_len()];
            b.iter(|| context.render_to_slice(input, &mut scratch, &mut packed, &mut out))
        });
        group.bench_with_input(BenchmarkId::new("render", &name), &rgb565, |b, input| {
            b.iter(|| context.render(input))
        });
    }
}

criterion_group!(benches, stages, pipeline);
criterion_main!(benches);
