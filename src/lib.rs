//! # zenimagereader
//!
//! Streaming BMP reader for microcontrollers driving small color displays
//! from a memory card.
//!
//! Images are decoded row by row through a fixed-size scratch buffer, so
//! drawing needs no heap at all, whatever the image size. Every supported
//! source format is normalized to RGB565.
//!
//! ## Supported Formats
//!
//! Uncompressed BMP (`BI_RGB`) with a 40-byte or later info header:
//! - **24-bit** BGR
//! - **16-bit** X1R5G5B5 (green widened to 6 bits)
//! - **8-bit** and **1-bit** palette images
//!
//! Both bottom-up (positive height) and top-down (negative height) row
//! orders are handled.
//!
//! ## Operations
//!
//! - [`ImageReader::draw_bmp`] streams an image onto a [`Surface`], clipped
//!   to its bounds. Placements partly or fully off the surface are fine.
//! - [`ImageReader::load_bmp`] decodes into a heap [`Canvas`].
//! - [`ImageReader::bmp_dimensions`] reads only the headers.
//!
//! Every operation returns `Result<_, ImageError>`; [`ImageError::code`]
//! gives the flat [`ImageReturnCode`].
//!
//! ## Non-Goals
//!
//! - RLE and bitfield compression
//! - 2, 4 and 32-bit images
//! - Encoding BMP files
//! - Color management
//!
//! ## Usage
//!
//! ```
//! use zenimagereader::{ImageReader, MemStorage, Surface};
//!
//! struct Tft {
//!     frame: Vec<u16>,
//! }
//!
//! impl Surface for Tft {
//!     fn width(&self) -> u32 { 4 }
//!     fn height(&self) -> u32 { 4 }
//!     fn write_run(&mut self, x: u32, y: u32, pixels: &[u16]) {
//!         let start = (y * 4 + x) as usize;
//!         self.frame[start..start + pixels.len()].copy_from_slice(pixels);
//!     }
//! }
//!
//! // 1x1 24-bit BMP, one red pixel
//! let mut bmp = Vec::new();
//! bmp.extend_from_slice(b"BM");
//! bmp.extend_from_slice(&58u32.to_le_bytes());
//! bmp.extend_from_slice(&0u32.to_le_bytes());
//! bmp.extend_from_slice(&54u32.to_le_bytes());
//! bmp.extend_from_slice(&40u32.to_le_bytes());
//! bmp.extend_from_slice(&1i32.to_le_bytes());
//! bmp.extend_from_slice(&1i32.to_le_bytes());
//! bmp.extend_from_slice(&1u16.to_le_bytes());
//! bmp.extend_from_slice(&24u16.to_le_bytes());
//! bmp.extend_from_slice(&[0u8; 24]);
//! bmp.extend_from_slice(&[0x00, 0x00, 0xFF, 0x00]);
//!
//! let mut storage = MemStorage::new();
//! storage.insert("red.bmp", bmp);
//! let mut reader = ImageReader::new(storage);
//!
//! let mut tft = Tft { frame: vec![0; 16] };
//! reader.draw_bmp("red.bmp", &mut tft, 3, 3)?;
//! assert_eq!(tft.frame[15], 0xF800);
//!
//! let canvas = reader.load_bmp("red.bmp")?;
//! assert_eq!(canvas.pixel(0, 0), Some(0xF800));
//! assert_eq!(reader.bmp_dimensions("red.bmp")?, (1, 1));
//! # Ok::<(), zenimagereader::ImageError>(())
//! ```

#![cfg_attr(not(feature = "std"), no_std)]
#![forbid(unsafe_code)]

extern crate alloc;

mod bmp;
mod canvas;
mod error;
mod limits;
mod log;
mod pixel;
mod reader;
mod storage;
mod surface;

// Re-exports
pub use canvas::{Canvas, CanvasFormat, CanvasPixels};
pub use error::{FormatError, ImageError, ImageReturnCode};
pub use limits::Limits;
pub use pixel::{pack_rgb565, unpack_rgb565};
#[cfg(feature = "rgb")]
pub use pixel::{rgb8_to_rgb565, rgb565_to_rgb8};
pub use reader::ImageReader;
#[cfg(feature = "std")]
pub use storage::FsStorage;
pub use storage::{ImageFile, MemFile, MemStorage, Storage};
pub use surface::Surface;
