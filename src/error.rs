use thiserror::Error;

/// Errors surfaced by the Splash codec core.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum SplashError {
    /// Width or height is zero, or `width * height` does not fit in a `usize`.
    #[error("invalid frame dimensions")]
    InvalidDimensions,
    /// Header length field did not read back 12.
    #[error("invalid header length")]
    InvalidHeaderLength,
    /// The 6-byte magic at header offset 3 was not `splash`.
    #[error("bad magic bytes")]
    BadMagic,
    /// The version byte at header offset 9 was not 1.
    #[error("unsupported bitstream version")]
    UnsupportedVersion,
    /// Packet too short to even hold a 12-byte header.
    #[error("packet shorter than header")]
    PacketTooShort,
    /// The source or output frame buffer is too small for the given width/height/stride.
    #[error("frame buffer too small for given dimensions")]
    FrameBufferTooSmall,
    /// An `EncoderOptions` field was out of its documented range.
    #[error("invalid encoder option")]
    InvalidOption,
}
