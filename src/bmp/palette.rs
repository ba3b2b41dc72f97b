//! Color table loading for 1-bit and 8-bit images.

use super::header::{BmpHeader, LeReader};
use crate::error::FormatError;
use crate::pixel::pack_rgb565;
use crate::storage::ImageFile;

/// Color table, converted to RGB565 at load time.
///
/// Always 256 slots; entries past `len` stay black so any 8-bit index is a
/// valid lookup.
#[derive(Clone, Debug)]
pub(crate) struct Palette {
    colors: [u16; 256],
    len: usize,
}

impl Palette {
    pub(crate) const EMPTY: Self = Self {
        colors: [0; 256],
        len: 0,
    };

    /// Load the color table if the header's bit depth needs one; direct
    /// color images get an empty palette without touching the file.
    pub(crate) fn for_header<F: ImageFile + ?Sized>(
        file: &mut F,
        header: &BmpHeader,
    ) -> Result<Self, FormatError> {
        if !header.depth.is_indexed() {
            return Ok(Self::EMPTY);
        }

        let max_colors = 1u32 << header.depth.bits();
        let count = match header.colors_used {
            n if n != 0 && n <= max_colors => n,
            _ => max_colors,
        };

        let start = header.palette_offset();
        let room = header.pixel_offset - start;
        if room == 0 {
            return Err(FormatError::MissingPalette);
        }
        if count * 4 > room {
            return Err(FormatError::PaletteOverrun);
        }
        if !file.seek(u64::from(start)) {
            return Err(FormatError::Truncated);
        }

        let mut palette = Self::EMPTY;
        let mut le = LeReader::new(file);
        for slot in &mut palette.colors[..count as usize] {
            let [b, g, r, _] = le.read_u32()?.to_le_bytes();
            *slot = pack_rgb565(r, g, b);
        }
        palette.len = count as usize;
        crate::log::trace!("loaded {count} color palette");
        Ok(palette)
    }

    #[cfg(test)]
    pub(crate) fn from_colors(colors: &[u16]) -> Self {
        let mut palette = Self::EMPTY;
        palette.colors[..colors.len()].copy_from_slice(colors);
        palette.len = colors.len();
        palette
    }

    /// All 256 lookup slots.
    pub(crate) fn colors(&self) -> &[u16; 256] {
        &self.colors
    }

    /// The entries actually present in the file.
    pub(crate) fn as_slice(&self) -> &[u16] {
        &self.colors[..self.len]
    }
}
