use thiserror::Error;

#[derive(Error, Debug)]
pub enum RmpError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Image format error: {0}")]
    Image(#[from] image::ImageError),

    #[error("Structuring element size must be odd, got {0}")]
    EvenElementSize(u32),

    #[error("Structuring element size {size} is outside {min}..={max}")]
    ElementSizeOutOfRange { size: u32, min: u32, max: u32 },

    #[error("Number of rotations must be 1 or more, got {0}")]
    InvalidIterations(i64),

    #[error("Invalid value for {field}: {value:?}")]
    InvalidValue { field: &'static str, value: String },

    #[error("Image {width}x{height} exceeds the {max}x{max} size limit")]
    ImageTooLarge { width: usize, height: usize, max: usize },

    #[error("Invalid image dimensions: {width}x{height}")]
    InvalidDimensions { width: usize, height: usize },

    #[error("Unsupported bit depth: {0} (expected 8 or 16)")]
    UnsupportedBitDepth(u8),

    #[error("Pixel value {value} exceeds the {bit_depth}-bit limit")]
    PixelOutOfRange { value: u16, bit_depth: u8 },

    #[error("Unsupported pixel format: {0} (expected 8-bit or 16-bit grayscale)")]
    UnsupportedPixelFormat(String),

    #[error("Invalid slice selection: {0}")]
    InvalidSliceSelection(String),

    #[error("Worker pool unavailable: {0}")]
    ResourceExhaustion(String),
}

impl RmpError {
    /// True for errors raised while validating parameters, before any pixel
    /// is processed.
    pub fn is_configuration_error(&self) -> bool {
        matches!(
            self,
            Self::EvenElementSize(_)
                | Self::ElementSizeOutOfRange { .. }
                | Self::InvalidIterations(_)
                | Self::InvalidValue { .. }
                | Self::ImageTooLarge { .. }
                | Self::InvalidDimensions { .. }
                | Self::UnsupportedBitDepth(_)
                | Self::PixelOutOfRange { .. }
                | Self::UnsupportedPixelFormat(_)
                | Self::InvalidSliceSelection(_)
        )
    }
}

pub type Result<T> = std::result::Result<T, RmpError>;
