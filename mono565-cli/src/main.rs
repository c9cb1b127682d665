use argh::FromArgs;
use image::{GrayImage, ImageFormat, Luma};
use log::info;
use mono565::{
    utils::{rgb888_to_rgb565, BigEndian, LittleEndian},
    DitherKernel, Geometry, Mono565Context, PanelFrame, RenderOptions,
};
use std::{fs::File, io::BufWriter, str::FromStr};

/// Converts images into 1-bit e-paper panel frames.
#[derive(FromArgs)]
struct Cli {
    #[argh(subcommand)]
    command: Command,
}

#[derive(FromArgs)]
#[argh(subcommand)]
enum Command {
    Convert(Convert),
    Preview(Preview),
}

/// Renders an image into a panel frame.
#[derive(FromArgs)]
#[argh(subcommand, name = "convert")]
struct Convert {
    /// dither threshold, 0-255 (default 127)
    #[argh(option, default = "mono565::consts::DEFAULT_THRESHOLD")]
    threshold: u8,

    /// dithering kernel: floyd-steinberg or atkinson (default atkinson)
    #[argh(option, default = "Kernel(DitherKernel::Atkinson)")]
    kernel: Kernel,

    /// write words big-endian instead of little-endian
    #[argh(switch)]
    big_endian: bool,

    /// the input file (PNG, JPG, BMP or TIFF). Width and height must be multiples of 8.
    #[argh(positional)]
    input: String,
    /// the output file, raw frame words
    #[argh(positional)]
    output: String,
}

/// Renders a panel frame back into a grayscale PNG, as the panel would show it.
#[derive(FromArgs)]
#[argh(subcommand, name = "preview")]
struct Preview {
    /// width of the source image the frame was rendered from
    #[argh(option)]
    width: u16,

    /// height of the source image the frame was rendered from
    #[argh(option)]
    height: u16,

    /// the frame words are big-endian
    #[argh(switch)]
    big_endian: bool,

    /// the input frame
    #[argh(positional)]
    input: String,
    /// the output PNG
    #[argh(positional)]
    output: String,
}

struct Kernel(DitherKernel);

impl FromStr for Kernel {
    type Err = &'static str;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "floyd-steinberg" => Ok(Kernel(DitherKernel::FloydSteinberg)),
            "atkinson" => Ok(Kernel(DitherKernel::Atkinson)),
            _ => Err("expected `floyd-steinberg` or `atkinson`"),
        }
    }
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::Builder::from_default_env().init();

    let Cli { command } = argh::from_env();

    match command {
        Command::Convert(options) => convert(options),
        Command::Preview(options) => preview(options),
    }
}

fn convert(options: Convert) -> Result<(), Box<dyn std::error::Error>> {
    let Convert {
        threshold,
        kernel: Kernel(kernel),
        big_endian,
        input,
        output,
    } = options;

    let image = image::io::Reader::open(&input)?
        .with_guessed_format()?
        .decode()?;

    let width = image.width();
    let height = image.height();

    println!("Converting {width}x{height} image");

    if width > u16::MAX as u32 || height > u16::MAX as u32 {
        return Err("image dimensions are too large".into());
    }
    let geometry = Geometry::new(width as u16, height as u16)?;

    let rgb565 = image
        .into_rgb8()
        .pixels()
        .map(|p| rgb888_to_rgb565(p.0))
        .collect::<Vec<_>>();

    let options = RenderOptions::new()
        .with_threshold(threshold)
        .with_kernel(kernel);
    info!("render options: {options:?}");

    let frame = Mono565Context::new(geometry, options).render(&rgb565)?;

    let w = BufWriter::new(File::create(&output)?);
    if big_endian {
        frame.write_to::<BigEndian, _>(w)?;
    } else {
        frame.write_to::<LittleEndian, _>(w)?;
    }

    println!(
        "Written {}x{} panel frame ({} bytes) to `{output}`",
        frame.width(),
        frame.height(),
        frame.words().len() * 2
    );

    Ok(())
}

fn preview(options: Preview) -> Result<(), Box<dyn std::error::Error>> {
    let Preview {
        width,
        height,
        big_endian,
        input,
        output,
    } = options;

    let geometry = Geometry::new(width, height)?;
    let bytes = std::fs::read(&input)?;

    println!("Reading `{input}`");

    let frame = if big_endian {
        PanelFrame::from_bytes::<BigEndian>(geometry, &bytes)?
    } else {
        PanelFrame::from_bytes::<LittleEndian>(geometry, &bytes)?
    };

    let mut preview = GrayImage::new(frame.width() as u32, frame.height() as u32);
    for (column, row, pixel) in preview.enumerate_pixels_mut() {
        let white = frame
            .pixel(column as usize, row as usize)
            .unwrap_or_default();
        *pixel = Luma([if white { 0xFF } else { 0x00 }]);
    }

    preview.save_with_format(&output, ImageFormat::Png)?;

    println!(
        "Written {}x{} preview to `{output}`",
        frame.width(),
        frame.height()
    );

    Ok(())
}
