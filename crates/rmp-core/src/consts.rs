/// Largest accepted image side, in pixels.
pub const MAX_IMAGE_SIZE: usize = 2048;

/// Smallest structuring element size.
pub const MIN_ELEMENT_SIZE: u32 = 3;

/// Largest structuring element size.
pub const MAX_ELEMENT_SIZE: u32 = 99;

/// Scale applied to the half image size when sizing the rotation canvas.
/// 2.0 leaves room for the image diagonal at any angle.
pub const CANVAS_SCALE_COEF: f64 = 2.0;

/// Scale applied to the canvas inscribed radius for the valid scan window.
pub const SCAN_WINDOW_SCALE: f64 = 1.0;

/// Value of pi used by the rotator. Kept at this precision so results match
/// reference output bit for bit.
pub const ROTATION_PI: f64 = 3.141592;

/// Angular range swept by the rotation passes, in degrees.
pub const HALF_TURN_DEGREES: f64 = 180.0;

/// Equalization output levels used by most contrast stages.
pub const EQUALIZE_LEVELS: usize = 64;

/// Equalization output levels for the 16-bit black top-hat stage of Enhance type 2.
pub const EQUALIZE_LEVELS_WIDE: usize = 128;

/// Fixed progress steps of the Enhance operators on top of the rotation passes:
/// start, two top-hats, three stages per top-hat, recombination, three final stages.
pub const ENHANCE_EXTRA_STEPS: usize = 12;

/// Fixed progress steps of the Smoothing operator on top of the rotation passes.
pub const SMOOTHING_EXTRA_STEPS: usize = 3;
