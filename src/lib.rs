/*!
# splash-codec

`splash-codec` is a pure Rust implementation of Splash, a sparse-sample,
growing-canvas image and video codec. Rather than transform-coding full
frames, each packet splashes a handful of sampled pixels onto a
persistent canvas shared between encoder and decoder; the canvas
converges toward the true frame over successive packets without ever
transmitting an explicit position.

## Core pipeline

- **Canvas & Error State** (`canvas`): the persistent RGB bitmap and the
  two 24-bit error vectors that drive splash selection.
- **Splash Engine** (`engine`): one parametric algorithm that picks the
  worst row or column, attenuates its error vector, and paints a
  weighted disk at every exact-line crossing.
- **Frame Codec** (`encoder`, `decoder`): drives the engine across a
  whole frame and serializes the bitstream (`header`, `bitstream`).

## Ambient layer

Typed errors (`error`), encoder configuration (`options`), and a small
CLI harness (`src/bin/splash.rs`) for driving the codec over raw RGB0
frame files round out the crate. Warnings the reference decoder treats
as non-fatal (a short packet, an unconverged "exact" frame) are routed
through the `log` facade rather than returned as errors.
*/

pub mod bitstream;
pub mod canvas;
pub mod constants;
pub mod decoder;
pub mod encoder;
pub mod engine;
pub mod error;
pub mod frame;
pub mod header;
pub mod options;

pub use decoder::{DecodeReport, Decoder};
pub use encoder::{Encoder, Packet};
pub use error::SplashError;
pub use frame::{FrameView, FrameViewMut};
pub use options::EncoderOptions;
