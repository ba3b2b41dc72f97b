//! BMP decode pipeline (internal).
//!
//! Use [`crate::ImageReader`] to open files and run these.

pub(crate) mod header;
pub(crate) mod palette;
pub(crate) mod rows;

use alloc::vec::Vec;

use crate::canvas::{Canvas, CanvasPixels, try_alloc};
use crate::error::ImageError;
use crate::limits::Limits;
use crate::pixel::PixelFormat;
use crate::storage::ImageFile;
use crate::surface::{Surface, clip};
use header::{BitDepth, BmpHeader};
use palette::Palette;
use rows::{BUF_PIXELS, RowStreamer};

/// Width and height from the headers alone.
pub(crate) fn dimensions<F: ImageFile + ?Sized>(file: &mut F) -> Result<(u32, u32), ImageError> {
    let header = BmpHeader::read(file)?;
    Ok((header.width, header.height))
}

/// Decode onto `surface` with the image's top-left corner at `(x, y)`.
///
/// Rows and columns outside the surface are never read. An image placed
/// entirely off the surface succeeds without touching pixel data.
pub(crate) fn draw<F, D>(file: &mut F, surface: &mut D, x: i32, y: i32) -> Result<(), ImageError>
where
    F: ImageFile + ?Sized,
    D: Surface + ?Sized,
{
    let header = BmpHeader::read(file)?;
    let Some(clip) = clip(
        x,
        y,
        header.width,
        header.height,
        surface.width(),
        surface.height(),
    ) else {
        crate::log::debug!(
            "{}x{} image at ({x}, {y}) is off the surface",
            header.width,
            header.height
        );
        return Ok(());
    };

    let palette = Palette::for_header(file, &header)?;
    let format = pixel_format(header.depth, &palette);
    let mut rows = RowStreamer::new(file, &header);
    let mut out = [0u16; BUF_PIXELS];

    for row in clip.rows.clone() {
        let dest_y = clip.dest_y + (row - clip.rows.start);
        rows.stream_row(row, clip.cols.clone(), |chunk| {
            let run = &mut out[..chunk.pixels];
            format.normalize(chunk.raw, chunk.skip_bits, run);
            surface.write_run(clip.dest_x + (chunk.col - clip.cols.start), dest_y, run);
        })?;
    }
    Ok(())
}

/// Decode into a newly allocated RGB565 canvas.
pub(crate) fn load<F: ImageFile + ?Sized>(file: &mut F, limits: &Limits) -> Result<Canvas, ImageError> {
    let header = BmpHeader::read(file)?;
    let palette = Palette::for_header(file, &header)?;
    load_rgb565(file, &header, &palette, limits)
}

/// Decode keeping palette indices for indexed images; direct color
/// images still produce RGB565.
pub(crate) fn load_native<F: ImageFile + ?Sized>(
    file: &mut F,
    limits: &Limits,
) -> Result<Canvas, ImageError> {
    let header = BmpHeader::read(file)?;
    let palette = Palette::for_header(file, &header)?;
    match header.depth {
        BitDepth::One => load_mono(file, &header, &palette, limits),
        BitDepth::Eight => load_indexed(file, &header, &palette, limits),
        BitDepth::Sixteen | BitDepth::TwentyFour => load_rgb565(file, &header, &palette, limits),
    }
}

fn pixel_format(depth: BitDepth, palette: &Palette) -> PixelFormat<'_> {
    match depth {
        BitDepth::One => PixelFormat::Indexed1(palette),
        BitDepth::Eight => PixelFormat::Indexed8(palette),
        BitDepth::Sixteen => PixelFormat::Direct16,
        BitDepth::TwentyFour => PixelFormat::Direct24,
    }
}

/// Pixel count of a full canvas, or `Malloc` if it can't be addressed.
fn pixel_count(header: &BmpHeader) -> Result<usize, ImageError> {
    (header.width as usize)
        .checked_mul(header.height as usize)
        .ok_or(ImageError::Malloc { bytes: usize::MAX })
}

fn load_rgb565<F: ImageFile + ?Sized>(
    file: &mut F,
    header: &BmpHeader,
    palette: &Palette,
    limits: &Limits,
) -> Result<Canvas, ImageError> {
    let w = header.width as usize;
    let mut buf: Vec<u16> =
        try_alloc(pixel_count(header)?, header.width, header.height, limits)?;

    let format = pixel_format(header.depth, palette);
    let mut rows = RowStreamer::new(file, header);
    for row in 0..header.height {
        let line = &mut buf[row as usize * w..][..w];
        rows.stream_row(row, 0..header.width, |chunk| {
            let start = chunk.col as usize;
            format.normalize(chunk.raw, chunk.skip_bits, &mut line[start..start + chunk.pixels]);
        })?;
    }
    Ok(Canvas::new(header.width, header.height, CanvasPixels::Rgb565(buf)))
}

fn load_indexed<F: ImageFile + ?Sized>(
    file: &mut F,
    header: &BmpHeader,
    palette: &Palette,
    limits: &Limits,
) -> Result<Canvas, ImageError> {
    let w = header.width as usize;
    let mut indices: Vec<u8> =
        try_alloc(pixel_count(header)?, header.width, header.height, limits)?;

    let mut rows = RowStreamer::new(file, header);
    for row in 0..header.height {
        let line = &mut indices[row as usize * w..][..w];
        rows.stream_row(row, 0..header.width, |chunk| {
            let start = chunk.col as usize;
            line[start..start + chunk.pixels].copy_from_slice(chunk.raw);
        })?;
    }
    Ok(Canvas::new(
        header.width,
        header.height,
        CanvasPixels::Indexed {
            indices,
            palette: palette.as_slice().to_vec(),
        },
    ))
}

fn load_mono<F: ImageFile + ?Sized>(
    file: &mut F,
    header: &BmpHeader,
    palette: &Palette,
    limits: &Limits,
) -> Result<Canvas, ImageError> {
    let stride = (header.width as usize).div_ceil(8);
    let len = stride
        .checked_mul(header.height as usize)
        .ok_or(ImageError::Malloc { bytes: usize::MAX })?;
    let mut bits: Vec<u8> = try_alloc(len, header.width, header.height, limits)?;

    let mut rows = RowStreamer::new(file, header);
    for row in 0..header.height {
        let line = &mut bits[row as usize * stride..][..stride];
        rows.stream_row(row, 0..header.width, |chunk| {
            // Chunks start on byte boundaries when streaming whole rows.
            let start = chunk.col as usize / 8;
            line[start..start + chunk.raw.len()].copy_from_slice(chunk.raw);
        })?;
    }
    let colors = palette.colors();
    Ok(Canvas::new(
        header.width,
        header.height,
        CanvasPixels::Mono {
            bits,
            palette: [colors[0], colors[1]],
        },
    ))
}

