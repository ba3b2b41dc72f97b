//! Row streaming with a fixed-size scratch buffer.

use core::ops::Range;

use super::header::BmpHeader;
use crate::error::FormatError;
use crate::storage::ImageFile;

/// Pixels delivered per chunk. A multiple of 8 so 1-bit chunks after the
/// first start on a byte boundary.
pub(crate) const BUF_PIXELS: usize = 80;

const RAW_CAPACITY: usize = BUF_PIXELS * 3;

/// Packed source bytes for a run of pixels within one row.
pub(crate) struct RowChunk<'b> {
    /// Image column of the first pixel.
    pub col: u32,
    pub raw: &'b [u8],
    /// Bit offset of the first pixel inside `raw[0]`.
    pub skip_bits: usize,
    /// Number of pixels in the chunk, at most [`BUF_PIXELS`].
    pub pixels: usize,
}

/// Reads rows of packed pixel data, one bounded chunk at a time.
pub(crate) struct RowStreamer<'a, F: ?Sized> {
    file: &'a mut F,
    header: &'a BmpHeader,
    raw: [u8; RAW_CAPACITY],
    /// Where the file cursor sits after the last read, if known.
    cursor: Option<u64>,
}

impl<'a, F: ImageFile + ?Sized> RowStreamer<'a, F> {
    pub(crate) fn new(file: &'a mut F, header: &'a BmpHeader) -> Self {
        Self {
            file,
            header,
            raw: [0; RAW_CAPACITY],
            cursor: None,
        }
    }

    /// Stream columns `cols` of display row `row` (0 = top) to `each`.
    ///
    /// Padding bytes and columns outside `cols` are never read. A short read
    /// or failed seek means the file is truncated.
    pub(crate) fn stream_row(
        &mut self,
        row: u32,
        cols: Range<u32>,
        mut each: impl FnMut(RowChunk<'_>),
    ) -> Result<(), FormatError> {
        if cols.is_empty() {
            return Ok(());
        }
        let bits = self.header.depth.bits() as usize;
        let start_bit = u64::from(cols.start) * bits as u64;
        let mut offset = self.header.row_offset(row) + start_bit / 8;
        let mut skip_bits = (start_bit % 8) as usize;

        if self.cursor != Some(offset) && !self.file.seek(offset) {
            return Err(FormatError::Truncated);
        }

        let mut col = cols.start;
        while col < cols.end {
            let pixels = ((cols.end - col) as usize).min(BUF_PIXELS - skip_bits);
            let len = (skip_bits + pixels * bits).div_ceil(8);
            let raw = &mut self.raw[..len];
            if !self.file.read_exact(raw) {
                self.cursor = None;
                return Err(FormatError::Truncated);
            }
            offset += len as u64;
            each(RowChunk {
                col,
                raw,
                skip_bits,
                pixels,
            });
            col += pixels as u32;
            skip_bits = 0;
        }
        self.cursor = Some(offset);
        Ok(())
    }
}
