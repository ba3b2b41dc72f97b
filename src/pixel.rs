//! RGB565 packing and per-format row normalization.

use crate::bmp::palette::Palette;

/// Pack 8-bit channels into RGB565 by keeping the top 5/6/5 bits.
#[inline]
pub const fn pack_rgb565(r: u8, g: u8, b: u8) -> u16 {
    ((r as u16 & 0xF8) << 8) | ((g as u16 & 0xFC) << 3) | (b as u16 >> 3)
}

/// Unpack RGB565 into 8-bit channels. Low bits are zero, so
/// `unpack_rgb565(pack_rgb565(r, g, b))` equals `(r & 0xF8, g & 0xFC, b & 0xF8)`.
#[inline]
pub const fn unpack_rgb565(c: u16) -> (u8, u8, u8) {
    (
        ((c >> 8) & 0xF8) as u8,
        ((c >> 3) & 0xFC) as u8,
        ((c << 3) & 0xF8) as u8,
    )
}

/// Convert an RGB8 color to RGB565.
#[cfg(feature = "rgb")]
#[inline]
pub fn rgb8_to_rgb565(c: rgb::RGB8) -> u16 {
    pack_rgb565(c.r, c.g, c.b)
}

/// Convert an RGB565 color to RGB8 (low bits zero).
#[cfg(feature = "rgb")]
#[inline]
pub fn rgb565_to_rgb8(c: u16) -> rgb::RGB8 {
    let (r, g, b) = unpack_rgb565(c);
    rgb::RGB8::new(r, g, b)
}

/// X1R5G5B5 (the uncompressed 16-bit BMP layout) to R5G6B5.
///
/// Red already sits in the high bits of the little-endian word, so no
/// red/blue swap is needed; green is widened by repeating its top bit.
#[inline]
fn x555_to_rgb565(v: u16) -> u16 {
    let r = (v >> 10) & 0x1F;
    let g = (v >> 5) & 0x1F;
    let b = v & 0x1F;
    (r << 11) | (((g << 1) | (g >> 4)) << 5) | b
}

/// On-disk pixel encoding, chosen once per image from the header.
#[derive(Clone, Copy, Debug)]
pub(crate) enum PixelFormat<'p> {
    /// 3 bytes per pixel, B, G, R.
    Direct24,
    /// 2 bytes per pixel, little-endian X1R5G5B5.
    Direct16,
    /// 1 bit per pixel, MSB first, via palette.
    Indexed1(&'p Palette),
    /// 1 byte per pixel via palette.
    Indexed8(&'p Palette),
}

impl PixelFormat<'_> {
    /// Convert packed source pixels to RGB565.
    ///
    /// `raw` starts at the byte holding the first pixel; `skip_bits` is the bit
    /// offset of that pixel inside the byte (only non-zero for 1-bit images).
    /// Exactly `out.len()` pixels are produced.
    pub(crate) fn normalize(&self, raw: &[u8], skip_bits: usize, out: &mut [u16]) {
        match *self {
            Self::Direct24 => {
                for (px, bgr) in out.iter_mut().zip(raw.chunks_exact(3)) {
                    *px = pack_rgb565(bgr[2], bgr[1], bgr[0]);
                }
            }
            Self::Direct16 => {
                for (px, le) in out.iter_mut().zip(raw.chunks_exact(2)) {
                    *px = x555_to_rgb565(u16::from_le_bytes([le[0], le[1]]));
                }
            }
            Self::Indexed8(palette) => {
                let colors = palette.colors();
                for (px, &idx) in out.iter_mut().zip(raw) {
                    *px = colors[usize::from(idx)];
                }
            }
            Self::Indexed1(palette) => {
                let colors = palette.colors();
                for (i, px) in out.iter_mut().enumerate() {
                    let bit = skip_bits + i;
                    let idx = (raw[bit >> 3] >> (7 - (bit & 7))) & 1;
                    *px = colors[usize::from(idx)];
                }
            }
        }
    }
}
