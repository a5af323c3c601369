//! Frame Codec, decode side (component C, half 2 of 2).

use crate::bitstream::PacketReader;
use crate::canvas::{Canvas, ErrorVector};
use crate::engine::{self, PixelSource, StepOutcome};
use crate::error::SplashError;
use crate::frame::FrameViewMut;
use crate::header::Header;

/// Outcome of decoding one packet.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DecodeReport {
    /// Always true: every Splash packet is a keyframe (§6).
    pub keyframe: bool,
    /// Set when the bitstream ran out before the engine terminated cleanly
    /// (§7 "Short packet"). The output frame still holds whatever the
    /// canvas managed to paint.
    pub incomplete: bool,
}

/// Decodes a sequence of Splash packets against a persistent canvas.
pub struct Decoder {
    canvas: Canvas,
}

impl Decoder {
    pub fn new(width: u32, height: u32) -> Result<Self, SplashError> {
        Ok(Self {
            canvas: Canvas::new(width, height)?,
        })
    }

    pub fn width(&self) -> u32 {
        self.canvas.width()
    }

    pub fn height(&self) -> u32 {
        self.canvas.height()
    }

    /// Decodes one packet (§4.C decoder steps 1-7) into `output`.
    pub fn decode_packet(&mut self, packet: &[u8], output: &mut FrameViewMut) -> Result<DecodeReport, SplashError> {
        if output.width() != self.canvas.width() || output.height() != self.canvas.height() {
            return Err(SplashError::InvalidDimensions);
        }

        let width = self.canvas.width();
        let height = self.canvas.height();

        let mut reader = PacketReader::new(packet);
        let header = Header::read(&mut reader)?;

        let mut x_error = ErrorVector::zeroed(width as usize);
        for i in 0..width as usize {
            let value = reader.read_u24_le().ok_or(SplashError::PacketTooShort)?;
            x_error.set(i, value);
        }

        let mut y_error = ErrorVector::zeroed(height as usize);
        for j in 0..height as usize {
            let value = reader.read_u24_le().ok_or(SplashError::PacketTooShort)?;
            y_error.set(j, value);
        }

        let mut incomplete = false;
        {
            let mut source = DecodeSource { reader: &mut reader };
            loop {
                match engine::step(&mut self.canvas, &mut x_error, &mut y_error, header.radius, &mut source)? {
                    // Mirrors the reference's `while (pos < size)` guard: a
                    // budget-limited packet ends exactly at a record boundary,
                    // which is not a short packet.
                    StepOutcome::Painted if source.reader.remaining() == 0 => break,
                    StepOutcome::Painted => continue,
                    StepOutcome::Terminated => break,
                    StepOutcome::Incomplete => {
                        incomplete = true;
                        break;
                    }
                }
            }
        }

        if incomplete {
            log::warn!("Incomplete scan line");
        }

        for y in 0..height {
            for x in 0..width {
                output.set_pixel(x, y, self.canvas.pixel(x, y));
            }
        }

        Ok(DecodeReport {
            keyframe: true,
            incomplete,
        })
    }
}

struct DecodeSource<'a, 'b> {
    reader: &'a mut PacketReader<'b>,
}

impl PixelSource for DecodeSource<'_, '_> {
    fn sample(&mut self, _x: u32, _y: u32) -> Result<Option<(u8, u8, u8)>, SplashError> {
        let Some(r) = self.reader.read_u8() else {
            return Ok(None);
        };
        let Some(g) = self.reader.read_u8() else {
            return Ok(None);
        };
        let Some(b) = self.reader.read_u8() else {
            return Ok(None);
        };
        Ok(Some((r, g, b)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::encoder::Encoder;
    use crate::frame::FrameView;
    use crate::options::EncoderOptions;

    fn rgb0_frame(width: u32, height: u32, fill: (u8, u8, u8)) -> Vec<u8> {
        let mut data = vec![0u8; width as usize * height as usize * 4];
        for chunk in data.chunks_mut(4) {
            chunk[0] = fill.0;
            chunk[1] = fill.1;
            chunk[2] = fill.2;
        }
        data
    }

    #[test]
    fn s1_round_trip() {
        let data = rgb0_frame(1, 1, (10, 20, 30));
        let frame = FrameView::new(&data, 1, 1, 4).unwrap();
        let mut encoder = Encoder::new(1, 1, EncoderOptions { radius: 1, ..EncoderOptions::default() }).unwrap();
        let packet = encoder.encode_frame(&frame).unwrap();

        let mut decoder = Decoder::new(1, 1).unwrap();
        let mut out = vec![0u8; 4];
        let mut out_view = FrameViewMut::new(&mut out, 1, 1, 4).unwrap();
        let report = decoder.decode_packet(&packet.data, &mut out_view).unwrap();

        assert!(report.keyframe);
        assert!(!report.incomplete);
        assert_eq!(&out, &[10, 20, 30, 255]);
    }

    #[test]
    fn truncated_packet_reports_incomplete_without_crashing() {
        let data = rgb0_frame(8, 8, (3, 200, 90));
        let frame = FrameView::new(&data, 8, 8, 32).unwrap();
        let mut encoder = Encoder::new(8, 8, EncoderOptions { radius: 3, ppf: 1.0, ppk: 1.0 }).unwrap();
        let packet = encoder.encode_frame(&frame).unwrap();

        let half = packet.data.len() / 2;
        let mut decoder = Decoder::new(8, 8).unwrap();
        let mut out = vec![0u8; 8 * 8 * 4];
        let mut out_view = FrameViewMut::new(&mut out, 8, 8, 32).unwrap();
        let report = decoder.decode_packet(&packet.data[..half], &mut out_view).unwrap();

        assert!(report.incomplete);
    }

    #[test]
    fn decode_rejects_mismatched_output_dimensions() {
        let mut decoder = Decoder::new(2, 2).unwrap();
        let mut out = vec![0u8; 3 * 3 * 4];
        let mut out_view = FrameViewMut::new(&mut out, 3, 3, 12).unwrap();
        let packet = vec![0u8; 12];
        assert_eq!(
            decoder.decode_packet(&packet, &mut out_view).unwrap_err(),
            SplashError::InvalidDimensions
        );
    }

    #[test]
    fn two_frame_session_byte_matches_encoder_canvas() {
        let w = 8;
        let h = 8;
        let mut encoder = Encoder::new(w, h, EncoderOptions { radius: 3, ppf: 1.0, ppk: 1.0 }).unwrap();
        let mut decoder = Decoder::new(w, h).unwrap();

        let mut checker = vec![0u8; (w * h * 4) as usize];
        for y in 0..h {
            for x in 0..w {
                let idx = (y * w + x) as usize * 4;
                let on = (x + y) % 2 == 0;
                let v = if on { 255 } else { 0 };
                checker[idx] = v;
                checker[idx + 1] = v;
                checker[idx + 2] = v;
            }
        }

        for _ in 0..2 {
            let frame = FrameView::new(&checker, w, h, w as usize * 4).unwrap();
            let packet = encoder.encode_frame(&frame).unwrap();

            let mut out = vec![0u8; (w * h * 4) as usize];
            let mut out_view = FrameViewMut::new(&mut out, w, h, w as usize * 4).unwrap();
            decoder.decode_packet(&packet.data, &mut out_view).unwrap();

            for y in 0..h {
                for x in 0..w {
                    let idx = (y * w + x) as usize * 4;
                    assert_eq!(
                        &out[idx..idx + 3],
                        &[
                            decoder_canvas_pixel(&decoder, x, y).0,
                            decoder_canvas_pixel(&decoder, x, y).1,
                            decoder_canvas_pixel(&decoder, x, y).2,
                        ]
                    );
                }
            }
        }
    }

    fn decoder_canvas_pixel(decoder: &Decoder, x: u32, y: u32) -> (u8, u8, u8) {
        decoder.canvas.pixel(x, y)
    }
}
