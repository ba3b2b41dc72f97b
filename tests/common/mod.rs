//! Shared helpers: a tiny BMP writer and a surface that records writes.

#![allow(dead_code)]

use zenimagereader::Surface;

/// Reference RGB565 packing, independent of the crate's.
pub fn rgb565(r: u8, g: u8, b: u8) -> u16 {
    (u16::from(r >> 3) << 11) | (u16::from(g >> 2) << 5) | u16::from(b >> 3)
}

/// Builds uncompressed BMP files pixel by pixel.
#[derive(Clone, Debug)]
pub struct TestBmp {
    pub width: u32,
    pub height: u32,
    bpp: u16,
    top_down: bool,
    /// RGB palette entries.
    palette: Vec<[u8; 3]>,
    /// Packed (unpadded) bytes per display row, top row first.
    rows: Vec<Vec<u8>>,
    /// Expected RGB565 output, row-major from the top.
    pub expected: Vec<u16>,
}

impl TestBmp {
    pub fn rgb24(width: u32, height: u32, color: impl Fn(u32, u32) -> [u8; 3]) -> Self {
        let mut rows = Vec::new();
        let mut expected = Vec::new();
        for y in 0..height {
            let mut row = Vec::new();
            for x in 0..width {
                let [r, g, b] = color(x, y);
                row.extend_from_slice(&[b, g, r]);
                expected.push(rgb565(r, g, b));
            }
            rows.push(row);
        }
        Self::new(width, height, 24, Vec::new(), rows, expected)
    }

    /// 16-bit pixels given as X1R5G5B5 words.
    pub fn rgb16(width: u32, height: u32, word: impl Fn(u32, u32) -> u16) -> Self {
        let mut rows = Vec::new();
        let mut expected = Vec::new();
        for y in 0..height {
            let mut row = Vec::new();
            for x in 0..width {
                let v = word(x, y);
                row.extend_from_slice(&v.to_le_bytes());
                let (r, g, b) = ((v >> 10) & 31, (v >> 5) & 31, v & 31);
                expected.push((r << 11) | (((g << 1) | (g >> 4)) << 5) | b);
            }
            rows.push(row);
        }
        Self::new(width, height, 16, Vec::new(), rows, expected)
    }

    pub fn indexed8(
        width: u32,
        height: u32,
        palette: Vec<[u8; 3]>,
        index: impl Fn(u32, u32) -> u8,
    ) -> Self {
        let mut rows = Vec::new();
        let mut expected = Vec::new();
        for y in 0..height {
            let mut row = Vec::new();
            for x in 0..width {
                let i = index(x, y);
                row.push(i);
                let [r, g, b] = palette[usize::from(i)];
                expected.push(rgb565(r, g, b));
            }
            rows.push(row);
        }
        Self::new(width, height, 8, palette, rows, expected)
    }

    pub fn mono(width: u32, height: u32, palette: [[u8; 3]; 2], bit: impl Fn(u32, u32) -> bool) -> Self {
        let mut rows = Vec::new();
        let mut expected = Vec::new();
        for y in 0..height {
            let mut row = vec![0u8; (width as usize).div_ceil(8)];
            for x in 0..width {
                let on = bit(x, y);
                if on {
                    row[x as usize / 8] |= 0x80 >> (x % 8);
                }
                let [r, g, b] = palette[usize::from(on)];
                expected.push(rgb565(r, g, b));
            }
            rows.push(row);
        }
        Self::new(width, height, 1, palette.to_vec(), rows, expected)
    }

    fn new(
        width: u32,
        height: u32,
        bpp: u16,
        palette: Vec<[u8; 3]>,
        rows: Vec<Vec<u8>>,
        expected: Vec<u16>,
    ) -> Self {
        Self {
            width,
            height,
            bpp,
            top_down: false,
            palette,
            rows,
            expected,
        }
    }

    /// Store rows top row first (negative height).
    pub fn top_down(mut self) -> Self {
        self.top_down = true;
        self
    }

    pub fn expected_at(&self, x: u32, y: u32) -> u16 {
        self.expected[(y * self.width + x) as usize]
    }

    /// Packed row bytes of display row `y`, as stored on disk.
    pub fn packed_row(&self, y: u32) -> &[u8] {
        &self.rows[y as usize]
    }

    pub fn encode(&self) -> Vec<u8> {
        let row_size = (self.width as usize * usize::from(self.bpp)).div_ceil(32) * 4;
        let offset = 54 + self.palette.len() * 4;
        let file_size = offset + row_size * self.height as usize;
        let height = if self.top_down {
            -(self.height as i32)
        } else {
            self.height as i32
        };

        let mut out = Vec::with_capacity(file_size);
        out.extend_from_slice(b"BM");
        out.extend_from_slice(&(file_size as u32).to_le_bytes());
        out.extend_from_slice(&0u32.to_le_bytes());
        out.extend_from_slice(&(offset as u32).to_le_bytes());
        out.extend_from_slice(&40u32.to_le_bytes());
        out.extend_from_slice(&(self.width as i32).to_le_bytes());
        out.extend_from_slice(&height.to_le_bytes());
        out.extend_from_slice(&1u16.to_le_bytes());
        out.extend_from_slice(&self.bpp.to_le_bytes());
        out.extend_from_slice(&0u32.to_le_bytes()); // compression
        out.extend_from_slice(&((row_size * self.height as usize) as u32).to_le_bytes());
        out.extend_from_slice(&2835u32.to_le_bytes());
        out.extend_from_slice(&2835u32.to_le_bytes());
        out.extend_from_slice(&(self.palette.len() as u32).to_le_bytes());
        out.extend_from_slice(&0u32.to_le_bytes());
        for [r, g, b] in &self.palette {
            out.extend_from_slice(&[*b, *g, *r, 0]);
        }

        let mut stored: Vec<&Vec<u8>> = self.rows.iter().collect();
        if !self.top_down {
            stored.reverse();
        }
        for row in stored {
            out.extend_from_slice(row);
            // Non-zero padding so misread padding shows up as wrong pixels.
            out.resize(out.len() + row_size - row.len(), 0xA5);
        }
        out
    }
}

/// A surface that remembers every pixel written and checks bounds.
#[derive(Debug)]
pub struct RecordingSurface {
    pub width: u32,
    pub height: u32,
    pub frame: Vec<Option<u16>>,
    pub runs: usize,
}

impl RecordingSurface {
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            frame: vec![None; (width * height) as usize],
            runs: 0,
        }
    }

    pub fn at(&self, x: u32, y: u32) -> Option<u16> {
        self.frame[(y * self.width + x) as usize]
    }

    pub fn written(&self) -> usize {
        self.frame.iter().filter(|p| p.is_some()).count()
    }
}

impl Surface for RecordingSurface {
    fn width(&self) -> u32 {
        self.width
    }

    fn height(&self) -> u32 {
        self.height
    }

    fn write_run(&mut self, x: u32, y: u32, pixels: &[u16]) {
        assert!(y < self.height, "row {y} outside surface");
        assert!(
            x as usize + pixels.len() <= self.width as usize,
            "run {x}+{} outside surface",
            pixels.len()
        );
        assert!(!pixels.is_empty());
        let start = (y * self.width + x) as usize;
        for (slot, &px) in self.frame[start..start + pixels.len()].iter_mut().zip(pixels) {
            *slot = Some(px);
        }
        self.runs += 1;
    }
}
