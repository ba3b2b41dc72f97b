//! BMP file header and info header parsing.

use crate::error::FormatError;
use crate::storage::ImageFile;

const FILE_HEADER_SIZE: u32 = 14;

// ── Little-endian reads ─────────────────────────────────────────────

/// Little-endian integer reads from the file cursor. BMP headers are
/// little-endian regardless of host byte order.
pub(crate) struct LeReader<'f, F: ?Sized> {
    file: &'f mut F,
}

impl<'f, F: ImageFile + ?Sized> LeReader<'f, F> {
    pub(crate) fn new(file: &'f mut F) -> Self {
        Self { file }
    }

    fn read_fixed_bytes<const N: usize>(&mut self) -> Result<[u8; N], FormatError> {
        let mut buf = [0u8; N];
        if !self.file.read_exact(&mut buf) {
            return Err(FormatError::Truncated);
        }
        Ok(buf)
    }

    pub(crate) fn read_u16(&mut self) -> Result<u16, FormatError> {
        self.read_fixed_bytes().map(u16::from_le_bytes)
    }

    pub(crate) fn read_u32(&mut self) -> Result<u32, FormatError> {
        self.read_fixed_bytes().map(u32::from_le_bytes)
    }

    pub(crate) fn read_i32(&mut self) -> Result<i32, FormatError> {
        self.read_fixed_bytes().map(i32::from_le_bytes)
    }
}

// ── Header types ────────────────────────────────────────────────────

/// Supported bits per pixel.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum BitDepth {
    One,
    Eight,
    Sixteen,
    TwentyFour,
}

impl BitDepth {
    fn from_u16(bpp: u16) -> Option<Self> {
        match bpp {
            1 => Some(Self::One),
            8 => Some(Self::Eight),
            16 => Some(Self::Sixteen),
            24 => Some(Self::TwentyFour),
            _ => None,
        }
    }

    pub(crate) fn bits(self) -> u32 {
        match self {
            Self::One => 1,
            Self::Eight => 8,
            Self::Sixteen => 16,
            Self::TwentyFour => 24,
        }
    }

    pub(crate) fn is_indexed(self) -> bool {
        matches!(self, Self::One | Self::Eight)
    }
}

/// Storage order of pixel rows.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum RowOrder {
    /// Positive height: last display row first.
    BottomUp,
    /// Negative height: first display row first.
    TopDown,
}

/// Parsed file and info headers.
#[derive(Clone, Debug, PartialEq, Eq)]
pub(crate) struct BmpHeader {
    pub pixel_offset: u32,
    pub info_size: u32,
    pub width: u32,
    pub height: u32,
    pub row_order: RowOrder,
    pub depth: BitDepth,
    /// Colors-used field; zero means "all 2^bpp".
    pub colors_used: u32,
    /// Bytes per stored row, padded to a multiple of 4.
    pub row_size: u64,
}

impl BmpHeader {
    /// Parse both headers from a file positioned at offset 0, leaving the
    /// cursor at the end of the info header (where a color table starts).
    pub(crate) fn read<F: ImageFile + ?Sized>(file: &mut F) -> Result<Self, FormatError> {
        let mut le = LeReader::new(file);

        if le.read_u16()? != u16::from_le_bytes(*b"BM") {
            return Err(FormatError::BadSignature);
        }
        let _file_size = le.read_u32()?;
        let _reserved = le.read_u32()?;
        let pixel_offset = le.read_u32()?;

        let info_size = le.read_u32()?;
        if !matches!(info_size, 40 | 52 | 56 | 108 | 124) {
            return Err(FormatError::UnsupportedHeader(info_size));
        }
        let width = le.read_i32()?;
        let height = le.read_i32()?;
        let planes = le.read_u16()?;
        let bpp = le.read_u16()?;
        let compression = le.read_u32()?;
        let _image_size = le.read_u32()?;
        let _x_pixels_per_meter = le.read_u32()?;
        let _y_pixels_per_meter = le.read_u32()?;
        let colors_used = le.read_u32()?;
        let _colors_important = le.read_u32()?;

        if planes != 1 {
            return Err(FormatError::BadPlanes(planes));
        }
        if compression != 0 {
            return Err(FormatError::UnsupportedCompression(compression));
        }
        let depth = BitDepth::from_u16(bpp).ok_or(FormatError::UnsupportedDepth(bpp))?;
        if width < 0 {
            return Err(FormatError::BadWidth);
        }
        if u64::from(pixel_offset) < u64::from(FILE_HEADER_SIZE) + u64::from(info_size) {
            return Err(FormatError::BadPixelOffset);
        }

        // Extended info headers carry masks and color space data we don't use.
        if info_size > 40 && !file.seek(u64::from(FILE_HEADER_SIZE + info_size)) {
            return Err(FormatError::Truncated);
        }

        let width = width as u32;
        let row_size = (u64::from(width) * u64::from(depth.bits())).div_ceil(32) * 4;
        let row_order = if height < 0 {
            RowOrder::TopDown
        } else {
            RowOrder::BottomUp
        };

        let header = Self {
            pixel_offset,
            info_size,
            width,
            height: height.unsigned_abs(),
            row_order,
            depth,
            colors_used,
            row_size,
        };
        crate::log::debug!(
            "BMP {}x{} {}bpp {:?}, pixels at {}",
            header.width,
            header.height,
            depth.bits(),
            row_order,
            pixel_offset
        );
        Ok(header)
    }

    /// Offset of the color table.
    pub(crate) fn palette_offset(&self) -> u32 {
        FILE_HEADER_SIZE + self.info_size
    }

    /// File offset of a row, `row` counted from the top of the image.
    pub(crate) fn row_offset(&self, row: u32) -> u64 {
        let stored = match self.row_order {
            RowOrder::BottomUp => self.height - 1 - row,
            RowOrder::TopDown => row,
        };
        u64::from(self.pixel_offset) + u64::from(stored) * self.row_size
    }
}
