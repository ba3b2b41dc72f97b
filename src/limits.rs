use crate::error::ImageError;

/// Resource limits for canvas loading.
///
/// All fields default to `None` (no limit). Limits only gate the canvas
/// allocation; drawing and dimension queries never consult them.
#[derive(Clone, Debug, Default)]
pub struct Limits {
    pub max_width: Option<u64>,
    pub max_height: Option<u64>,
    /// Maximum pixel count (width * height).
    pub max_pixels: Option<u64>,
    /// Maximum memory bytes for the canvas allocation.
    pub max_memory_bytes: Option<u64>,
}

impl Limits {
    /// Check a pending canvas allocation. A refused allocation is a
    /// [`ImageError::Malloc`], the same as the allocator failing.
    pub(crate) fn check(&self, width: u32, height: u32, bytes: usize) -> Result<(), ImageError> {
        let refuse = || {
            crate::log::debug!("canvas {width}x{height} ({bytes} bytes) refused by limits");
            Err(ImageError::Malloc { bytes })
        };
        if let Some(max_w) = self.max_width {
            if u64::from(width) > max_w {
                return refuse();
            }
        }
        if let Some(max_h) = self.max_height {
            if u64::from(height) > max_h {
                return refuse();
            }
        }
        if let Some(max_px) = self.max_pixels {
            if u64::from(width) * u64::from(height) > max_px {
                return refuse();
            }
        }
        if let Some(max_mem) = self.max_memory_bytes {
            if bytes as u64 > max_mem {
                return refuse();
            }
        }
        Ok(())
    }
}
