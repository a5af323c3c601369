//! Splash Engine (component B): picks the next "worst" row or column from
//! the error vectors, sources one pixel per exact-line crossing, and paints
//! a weighted disk into the canvas. One parametric implementation serves
//! both the column and the row path — §9 notes the column/row duplication
//! in the written spec is an artifact of the prose, not a contract.

use crate::canvas::{Canvas, ErrorVector};
use crate::error::SplashError;

/// What one `step` call accomplished.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StepOutcome {
    /// Progress was made: a line was marked exact (and zero or more pixels
    /// were painted). The caller may invoke `step` again.
    Painted,
    /// Both error vectors are fully exhausted; there is nothing left to do.
    Terminated,
    /// Decode only: the bitstream ran out mid-splash. The step stopped
    /// before painting the crossing that needed more data.
    Incomplete,
}

/// Supplies (or consumes) one pixel triple per exact-line crossing. Encoding
/// reads from the source frame and appends to the output packet; decoding
/// reads from the packet and reports `Ok(None)` once the stream is dry.
pub trait PixelSource {
    fn sample(&mut self, x: u32, y: u32) -> Result<Option<(u8, u8, u8)>, SplashError>;
}

#[derive(Debug, Clone, Copy)]
enum Axis {
    Column,
    Row,
}

impl Axis {
    /// Maps a (primary, secondary) index pair to canvas (x, y).
    fn coords(self, primary: usize, secondary: usize) -> (u32, u32) {
        match self {
            Axis::Column => (primary as u32, secondary as u32),
            Axis::Row => (secondary as u32, primary as u32),
        }
    }
}

/// Performs one splash: selects the worst column or row, attenuates its
/// error vector, and paints every exact-line crossing along it.
pub fn step(
    canvas: &mut Canvas,
    x_error: &mut ErrorVector,
    y_error: &mut ErrorVector,
    radius: u8,
    source: &mut dyn PixelSource,
) -> Result<StepOutcome, SplashError> {
    let (worst_x_i, worst_x_err) = x_error.argmax();
    let (worst_y_j, worst_y_err) = y_error.argmax();

    if worst_x_err == 0 && worst_y_err == 0 {
        return Ok(StepOutcome::Terminated);
    }

    if worst_x_err > worst_y_err {
        splash_axis(canvas, x_error, y_error, radius, worst_x_i, Axis::Column, source)
    } else {
        splash_axis(canvas, y_error, x_error, radius, worst_y_j, Axis::Row, source)
    }
}

#[allow(clippy::too_many_arguments)]
fn splash_axis(
    canvas: &mut Canvas,
    primary_error: &mut ErrorVector,
    secondary_error: &ErrorVector,
    radius: u8,
    center: usize,
    axis: Axis,
    source: &mut dyn PixelSource,
) -> Result<StepOutcome, SplashError> {
    let (min_p, max_p) = primary_error.expand_range(center, radius);
    let max_error = primary_error.attenuate(min_p, max_p, center, radius);

    for s in 0..secondary_error.len() {
        if secondary_error.get(s) != 0 {
            continue;
        }
        let (x, y) = axis.coords(center, s);
        let triple = match source.sample(x, y)? {
            Some(triple) => triple,
            None => return Ok(StepOutcome::Incomplete),
        };
        let (min_s, max_s) = secondary_error.expand_range(s, radius);
        paint_disk(
            canvas,
            primary_error,
            secondary_error,
            axis,
            (min_p, max_p),
            (min_s, max_s),
            (center, s),
            max_error,
            triple,
            radius,
        );
    }
    Ok(StepOutcome::Painted)
}

#[allow(clippy::too_many_arguments)]
fn paint_disk(
    canvas: &mut Canvas,
    primary_error: &ErrorVector,
    secondary_error: &ErrorVector,
    axis: Axis,
    (min_p, max_p): (usize, usize),
    (min_s, max_s): (usize, usize),
    (center_p, center_s): (usize, usize),
    max_error: u32,
    source_rgb: (u8, u8, u8),
    radius: u8,
) {
    for p in min_p..=max_p {
        for s in min_s..=max_s {
            let dp = p as f32 - center_p as f32;
            let ds = s as f32 - center_s as f32;
            let distance = (dp * dp + ds * ds).sqrt();
            let fill_alpha = 1.0 - distance / radius as f32;
            if fill_alpha <= 0.0 {
                continue;
            }

            let xerr = primary_error.get(p) as f32 / max_error as f32;
            let yerr = secondary_error.get(s) as f32 / max_error as f32;
            let xyerr = (xerr + yerr) / 2.0;
            let alpha = 256 - (256.0 * xyerr).round() as i32;

            let (x, y) = axis.coords(p, s);
            let (old_r, old_g, old_b) = canvas.pixel(x, y);
            let new_rgb = (
                blend(source_rgb.0, old_r, alpha),
                blend(source_rgb.1, old_g, alpha),
                blend(source_rgb.2, old_b, alpha),
            );
            canvas.set_pixel(x, y, new_rgb);
        }
    }
}

#[inline]
fn blend(src: u8, old: u8, alpha: i32) -> u8 {
    debug_assert!((1..=256).contains(&alpha));
    ((src as i32 * alpha + old as i32 * (256 - alpha)) >> 8) as u8
}
