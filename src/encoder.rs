//! Frame Codec, encode side (component C, half 1 of 2).

use crate::bitstream::PacketWriter;
use crate::canvas::{Canvas, ErrorVector};
use crate::constants::{HEADER_LENGTH, MAX_ERROR};
use crate::engine::{self, PixelSource, StepOutcome};
use crate::error::SplashError;
use crate::frame::FrameView;
use crate::header::Header;
use crate::options::EncoderOptions;

/// One coded frame, ready to hand to the host container.
#[derive(Debug, Clone)]
pub struct Packet {
    pub data: Vec<u8>,
    /// Always true: every Splash packet is a keyframe at the container
    /// level (§6); inter-frame dependency lives entirely in the persistent
    /// canvas, not in the packet stream.
    pub keyframe: bool,
}

/// Encodes a sequence of RGB0 frames against a persistent canvas.
pub struct Encoder {
    canvas: Canvas,
    options: EncoderOptions,
    frames_encoded: u64,
}

impl Encoder {
    pub fn new(width: u32, height: u32, options: EncoderOptions) -> Result<Self, SplashError> {
        options.validate()?;
        Ok(Self {
            canvas: Canvas::new(width, height)?,
            options,
            frames_encoded: 0,
        })
    }

    pub fn width(&self) -> u32 {
        self.canvas.width()
    }

    pub fn height(&self) -> u32 {
        self.canvas.height()
    }

    /// Encodes one frame (§4.C encoder steps 1-7) and returns the packet.
    pub fn encode_frame(&mut self, frame: &FrameView) -> Result<Packet, SplashError> {
        if frame.width() != self.canvas.width() || frame.height() != self.canvas.height() {
            return Err(SplashError::InvalidDimensions);
        }

        let width = self.canvas.width();
        let height = self.canvas.height();
        let pixel_count = width as usize * height as usize;

        let (mut x_error, mut y_error) = seed_error_vectors(&self.canvas, frame);

        let divisor = if self.frames_encoded == 0 {
            self.options.ppk
        } else {
            self.options.ppf
        };
        let max_pixels = (pixel_count as f64 / divisor as f64).round() as u32;

        let capacity = (HEADER_LENGTH + width as usize + height as usize + pixel_count) * 3;
        let mut writer = PacketWriter::with_capacity(capacity);

        let header = Header {
            radius: self.options.radius,
        };
        header.write(&mut writer);

        for i in 0..width as usize {
            writer.write_u24_le(x_error.get(i));
        }
        for j in 0..height as usize {
            writer.write_u24_le(y_error.get(j));
        }

        let mut source = EncodeSource {
            frame,
            writer: &mut writer,
            pixels_emitted: 0,
        };

        loop {
            if source.pixels_emitted >= max_pixels {
                break;
            }
            match engine::step(&mut self.canvas, &mut x_error, &mut y_error, self.options.radius, &mut source)? {
                StepOutcome::Painted => continue,
                StepOutcome::Terminated => break,
                StepOutcome::Incomplete => {
                    unreachable!("encoding never runs out of source pixels to read")
                }
            }
        }

        if self.options.ppf == 1.0 {
            warn_on_inaccuracy(&self.canvas, frame);
        }

        self.frames_encoded += 1;

        Ok(Packet {
            data: writer.into_vec(),
            keyframe: true,
        })
    }
}

struct EncodeSource<'a, 'b> {
    frame: &'b FrameView<'b>,
    writer: &'a mut PacketWriter,
    pixels_emitted: u32,
}

impl PixelSource for EncodeSource<'_, '_> {
    fn sample(&mut self, x: u32, y: u32) -> Result<Option<(u8, u8, u8)>, SplashError> {
        let rgb = self.frame.pixel(x, y);
        self.writer.write_u8(rgb.0);
        self.writer.write_u8(rgb.1);
        self.writer.write_u8(rgb.2);
        self.pixels_emitted += 1;
        Ok(Some(rgb))
    }
}

/// §4.C step 3-4: per-column/per-row sum of absolute channel differences
/// between the current canvas and the incoming frame, clamped to 24 bits.
fn seed_error_vectors(canvas: &Canvas, frame: &FrameView) -> (ErrorVector, ErrorVector) {
    let width = canvas.width();
    let height = canvas.height();
    let mut x_values = vec![0u32; width as usize];
    let mut y_values = vec![0u32; height as usize];

    for y in 0..height {
        for x in 0..width {
            let (cr, cg, cb) = canvas.pixel(x, y);
            let (fr, fg, fb) = frame.pixel(x, y);
            let diff = (cr as i32 - fr as i32).unsigned_abs()
                + (cg as i32 - fg as i32).unsigned_abs()
                + (cb as i32 - fb as i32).unsigned_abs();
            let xi = x as usize;
            let yi = y as usize;
            x_values[xi] = x_values[xi].saturating_add(diff).min(MAX_ERROR);
            y_values[yi] = y_values[yi].saturating_add(diff).min(MAX_ERROR);
        }
    }

    (ErrorVector::from_values(x_values), ErrorVector::from_values(y_values))
}

/// §4.C step 8: when `ppf == 1` the encoder intends to fully resolve every
/// frame; warn (non-fatal) if the canvas didn't actually converge. Counts
/// per-channel mismatches (R, G, B counted separately), matching the
/// reference's `cntMiss`.
fn warn_on_inaccuracy(canvas: &Canvas, frame: &FrameView) {
    let mut mismatched_channels = 0u32;
    for y in 0..canvas.height() {
        for x in 0..canvas.width() {
            let (cr, cg, cb) = canvas.pixel(x, y);
            let (fr, fg, fb) = frame.pixel(x, y);
            mismatched_channels += (cr != fr) as u32 + (cg != fg) as u32 + (cb != fb) as u32;
        }
    }
    if mismatched_channels > 0 {
        log::warn!("Inaccurate {mismatched_channels} final pixels");
    }
}
