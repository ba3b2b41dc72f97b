//! In-memory decode results.

use alloc::vec::Vec;

use crate::error::ImageError;
use crate::limits::Limits;

/// Canvas pixel formats.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum CanvasFormat {
    /// 1 bit per pixel with a 2-color palette.
    Canvas1,
    /// 1 byte per pixel with a palette of up to 256 colors.
    Canvas8,
    /// RGB565, 16 bits per pixel.
    Canvas16,
}

/// Pixel storage of a [`Canvas`]. The variant decides the format.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum CanvasPixels {
    /// Rows of `ceil(width / 8)` bytes, most significant bit leftmost.
    Mono { bits: Vec<u8>, palette: [u16; 2] },
    /// One palette index per pixel.
    Indexed { indices: Vec<u8>, palette: Vec<u16> },
    /// One RGB565 value per pixel.
    Rgb565(Vec<u16>),
}

/// A decoded image, owned by the caller.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Canvas {
    width: u32,
    height: u32,
    pixels: CanvasPixels,
}

impl Canvas {
    pub(crate) fn new(width: u32, height: u32, pixels: CanvasPixels) -> Self {
        Self {
            width,
            height,
            pixels,
        }
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    /// Total pixel count.
    pub fn len(&self) -> usize {
        self.width as usize * self.height as usize
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn format(&self) -> CanvasFormat {
        match self.pixels {
            CanvasPixels::Mono { .. } => CanvasFormat::Canvas1,
            CanvasPixels::Indexed { .. } => CanvasFormat::Canvas8,
            CanvasPixels::Rgb565(_) => CanvasFormat::Canvas16,
        }
    }

    pub fn pixels(&self) -> &CanvasPixels {
        &self.pixels
    }

    pub fn into_pixels(self) -> CanvasPixels {
        self.pixels
    }

    /// RGB565 buffer, row-major, for [`CanvasFormat::Canvas16`] canvases.
    pub fn as_rgb565(&self) -> Option<&[u16]> {
        match &self.pixels {
            CanvasPixels::Rgb565(buf) => Some(buf.as_slice()),
            _ => None,
        }
    }

    /// The palette of an indexed canvas.
    pub fn palette(&self) -> Option<&[u16]> {
        match &self.pixels {
            CanvasPixels::Mono { palette, .. } => Some(palette.as_slice()),
            CanvasPixels::Indexed { palette, .. } => Some(palette.as_slice()),
            CanvasPixels::Rgb565(_) => None,
        }
    }

    /// RGB565 color at `(x, y)`, resolving palette indices.
    pub fn pixel(&self, x: u32, y: u32) -> Option<u16> {
        if x >= self.width || y >= self.height {
            return None;
        }
        let (x, y, w) = (x as usize, y as usize, self.width as usize);
        match &self.pixels {
            CanvasPixels::Rgb565(buf) => buf.get(y * w + x).copied(),
            CanvasPixels::Indexed { indices, palette } => {
                let idx = *indices.get(y * w + x)?;
                Some(palette.get(usize::from(idx)).copied().unwrap_or(0))
            }
            CanvasPixels::Mono { bits, palette } => {
                let byte = bits.get(y * w.div_ceil(8) + x / 8)?;
                Some(palette[usize::from((byte >> (7 - x % 8)) & 1)])
            }
        }
    }

    /// Borrow an RGB565 canvas as an [`imgref::ImgRef`].
    #[cfg(feature = "imgref")]
    pub fn as_imgref(&self) -> Option<imgref::ImgRef<'_, u16>> {
        self.as_rgb565()
            .map(|buf| imgref::ImgRef::new(buf, self.width as usize, self.height as usize))
    }

    /// Convert to 8-bit RGB (low bits zero-filled).
    #[cfg(feature = "imgref")]
    pub fn to_rgb8_imgvec(&self) -> imgref::ImgVec<rgb::RGB8> {
        let mut out = Vec::with_capacity(self.len());
        for y in 0..self.height {
            for x in 0..self.width {
                let c = self.pixel(x, y).unwrap_or(0);
                out.push(crate::pixel::rgb565_to_rgb8(c));
            }
        }
        imgref::ImgVec::new(out, self.width as usize, self.height as usize)
    }
}

/// Allocate a zeroed buffer of `len` elements, or fail with
/// [`ImageError::Malloc`] if limits refuse it or the allocator can't.
pub(crate) fn try_alloc<T: Copy + Default>(
    len: usize,
    width: u32,
    height: u32,
    limits: &Limits,
) -> Result<Vec<T>, ImageError> {
    let bytes = len
        .checked_mul(core::mem::size_of::<T>())
        .ok_or(ImageError::Malloc { bytes: usize::MAX })?;
    limits.check(width, height, bytes)?;
    let mut buf = Vec::new();
    buf.try_reserve_exact(len)
        .map_err(|_| ImageError::Malloc { bytes })?;
    buf.resize(len, T::default());
    Ok(buf)
}
