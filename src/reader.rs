//! The public entry point: opening files and running the decode pipeline.

use crate::bmp;
use crate::canvas::Canvas;
use crate::error::ImageError;
use crate::limits::Limits;
use crate::storage::Storage;
use crate::surface::Surface;

/// Reads BMP images from a [`Storage`] and draws or loads them.
///
/// Each operation opens its file, decodes, and drops the handle before
/// returning, on success and on every error. Operations take `&mut self`,
/// so one reader never has two files open at once.
///
/// ```
/// use zenimagereader::{ImageReader, MemStorage, ImageError};
///
/// let mut storage = MemStorage::new();
/// storage.insert("nope.bmp", &b"GIF89a"[..]);
/// let mut reader = ImageReader::new(storage);
/// assert_eq!(reader.bmp_dimensions("missing.bmp"), Err(ImageError::FileNotFound));
/// assert!(matches!(reader.bmp_dimensions("nope.bmp"), Err(ImageError::Format(_))));
/// ```
#[derive(Debug)]
pub struct ImageReader<S> {
    storage: S,
    limits: Limits,
}

impl<S: Storage> ImageReader<S> {
    pub fn new(storage: S) -> Self {
        Self::with_limits(storage, Limits::default())
    }

    /// A reader whose canvas loads are bounded by `limits`.
    pub fn with_limits(storage: S, limits: Limits) -> Self {
        Self { storage, limits }
    }

    pub fn limits(&self) -> &Limits {
        &self.limits
    }

    pub fn storage(&self) -> &S {
        &self.storage
    }

    pub fn storage_mut(&mut self) -> &mut S {
        &mut self.storage
    }

    pub fn into_storage(self) -> S {
        self.storage
    }

    /// Draw `name` onto `surface` with its top-left corner at `(x, y)`.
    ///
    /// Only the part overlapping the surface is read and written. An image
    /// placed entirely off the surface is a success with nothing drawn. On a
    /// format error, rows drawn before the error stay drawn.
    pub fn draw_bmp<D: Surface + ?Sized>(
        &mut self,
        name: &str,
        surface: &mut D,
        x: i32,
        y: i32,
    ) -> Result<(), ImageError> {
        let mut file = self.open(name)?;
        bmp::draw(&mut file, surface, x, y).inspect_err(|e| log_failure(name, e))
    }

    /// Decode `name` into a new RGB565 canvas ([`crate::CanvasFormat::Canvas16`]).
    ///
    /// Fails with [`ImageError::Malloc`] if the canvas can't be allocated or
    /// exceeds the reader's [`Limits`]; no canvas is returned on any error.
    pub fn load_bmp(&mut self, name: &str) -> Result<Canvas, ImageError> {
        let mut file = self.open(name)?;
        bmp::load(&mut file, &self.limits).inspect_err(|e| log_failure(name, e))
    }

    /// Like [`load_bmp`](Self::load_bmp), but 1-bit and 8-bit images keep
    /// their palette indices ([`crate::CanvasFormat::Canvas1`] and
    /// [`crate::CanvasFormat::Canvas8`]).
    pub fn load_bmp_native(&mut self, name: &str) -> Result<Canvas, ImageError> {
        let mut file = self.open(name)?;
        bmp::load_native(&mut file, &self.limits).inspect_err(|e| log_failure(name, e))
    }

    /// Width and height of `name`, read from the headers only.
    pub fn bmp_dimensions(&mut self, name: &str) -> Result<(u32, u32), ImageError> {
        let mut file = self.open(name)?;
        bmp::dimensions(&mut file).inspect_err(|e| log_failure(name, e))
    }

    fn open(&mut self, name: &str) -> Result<S::File, ImageError> {
        self.storage.open(name).ok_or_else(|| {
            crate::log::warn!("{name}: cannot open");
            ImageError::FileNotFound
        })
    }
}

#[allow(unused_variables)]
fn log_failure(name: &str, e: &ImageError) {
    crate::log::warn!("{name}: {e}");
}
