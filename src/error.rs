/// Errors from drawing, loading, or probing a BMP file.
///
/// The three variants are the whole status taxonomy; success is `Ok`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum ImageError {
    #[error("file not found")]
    FileNotFound,

    #[error("unsupported image format: {0}")]
    Format(#[from] FormatError),

    #[error("could not allocate {bytes} byte canvas")]
    Malloc { bytes: usize },
}

/// Why a file was rejected as not being a decodable BMP.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
#[non_exhaustive]
pub enum FormatError {
    #[error("missing BM signature")]
    BadSignature,

    #[error("unsupported info header size {0}")]
    UnsupportedHeader(u32),

    #[error("planes field is {0}, expected 1")]
    BadPlanes(u16),

    #[error("compression method {0} unsupported")]
    UnsupportedCompression(u32),

    #[error("bit depth {0} unsupported")]
    UnsupportedDepth(u16),

    #[error("width must be positive")]
    BadWidth,

    #[error("pixel data offset points inside the headers")]
    BadPixelOffset,

    #[error("indexed image has no color table")]
    MissingPalette,

    #[error("color table runs past the pixel data")]
    PaletteOverrun,

    #[error("file is truncated")]
    Truncated,
}

/// Flat status code, one per outcome.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ImageReturnCode {
    /// Successful operation (or image clipped entirely off the surface).
    Success,
    /// Could not open the file.
    FileNotFound,
    /// Not a supported image format.
    Format,
    /// Could not allocate the canvas (load only).
    Malloc,
}

impl ImageError {
    /// The status code for this error.
    pub fn code(&self) -> ImageReturnCode {
        match self {
            Self::FileNotFound => ImageReturnCode::FileNotFound,
            Self::Format(_) => ImageReturnCode::Format,
            Self::Malloc { .. } => ImageReturnCode::Malloc,
        }
    }
}

impl<T> From<&Result<T, ImageError>> for ImageReturnCode {
    fn from(result: &Result<T, ImageError>) -> Self {
        match result {
            Ok(_) => ImageReturnCode::Success,
            Err(e) => e.code(),
        }
    }
}
