//! Layout and default-option constants for the Splash bitstream.

/// Size in bytes of the fixed Splash header (§6).
pub const HEADER_LENGTH: usize = 12;

/// The 6-byte ASCII magic at header offset 3.
pub const MAGIC: &[u8; 6] = b"splash";

/// The only bitstream version this crate writes or accepts.
pub const VERSION: u8 = 1;

/// The reserved compression-flag byte at header offset 11; always 0.
pub const COMPRESSION_FLAG: u8 = 0;

/// Ceiling applied to every error-vector entry (24-bit unsigned).
pub const MAX_ERROR: u32 = 0x00FF_FFFF;

/// Initial canvas fill value for each of the R, G, B channels.
pub const INITIAL_CANVAS_VALUE: u8 = 0x7F;

/// Default brush radius (`radius` encoder option).
pub const DEFAULT_RADIUS: u8 = 5;

/// Default pixels-per-frame divisor for non-initial frames (`ppf` encoder option).
pub const DEFAULT_PPF: f32 = 1.0;

/// Default pixels-per-keyframe divisor for the first frame (`ppk` encoder option).
pub const DEFAULT_PPK: f32 = 2.0;
