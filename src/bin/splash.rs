//! splash CLI - growing-canvas codec command-line utility.
//!
//! Drives the Splash encoder and decoder over raw RGB0 frame files. This is
//! a minimal stand-in for the host media framework the core library is
//! designed to be embedded in, not a general-purpose container format.

use clap::{Parser, Subcommand};
use splash_codec::{Decoder, Encoder, EncoderOptions, FrameView, FrameViewMut};
use std::fs;
use std::path::PathBuf;

/// Sparse-sample growing-canvas codec for raw RGB0 frame sequences
#[derive(Parser)]
#[command(name = "splash")]
#[command(author = "splash-codec contributors")]
#[command(version)]
#[command(about = "Encode and decode raw RGB0 frames with the Splash codec", long_about = None)]
#[command(after_help = "EXAMPLES:
    splash encode -i frame0.rgb0 -o frame0.splash -w 640 -h 480
    splash decode -i frame0.splash -o frame0.rgb0 -w 640 -h 480
    splash info -i frame0.splash

Frame files are raw RGB0 (4 bytes per pixel, tightly packed, no header).")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Encode one raw RGB0 frame into a Splash packet
    #[command(visible_alias = "e")]
    Encode {
        /// Input raw RGB0 frame file
        #[arg(short, long, help = "Path to the raw RGB0 frame")]
        input: PathBuf,

        /// Output Splash packet file
        #[arg(short, long, help = "Path for the encoded packet")]
        output: PathBuf,

        /// Frame width in pixels
        #[arg(short, long)]
        width: u32,

        /// Frame height in pixels
        #[arg(short = 'H', long)]
        height: u32,

        /// Brush radius in pixels
        #[arg(short, long)]
        radius: Option<u8>,

        /// Pixel budget divisor for the first frame (round(W*H / ppk))
        #[arg(long)]
        ppk: Option<f32>,

        /// Pixel budget divisor for later frames (round(W*H / ppf))
        #[arg(long)]
        ppf: Option<f32>,
    },

    /// Decode a Splash packet into a raw RGB0 frame
    #[command(visible_alias = "d")]
    Decode {
        /// Input Splash packet file
        #[arg(short, long, help = "Path to the Splash packet")]
        input: PathBuf,

        /// Output raw RGB0 frame file
        #[arg(short, long, help = "Path for the decoded frame")]
        output: PathBuf,

        /// Frame width in pixels
        #[arg(short, long)]
        width: u32,

        /// Frame height in pixels
        #[arg(short = 'H', long)]
        height: u32,
    },

    /// Display header information for a Splash packet
    #[command(visible_alias = "i")]
    Info {
        /// Input Splash packet file
        #[arg(short, long, help = "Path to the Splash packet")]
        input: PathBuf,
    },
}

fn main() {
    env_logger::init();
    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Encode {
            input,
            output,
            width,
            height,
            radius,
            ppk,
            ppf,
        } => encode_frame(&input, &output, width, height, radius, ppk, ppf),
        Commands::Decode {
            input,
            output,
            width,
            height,
        } => decode_frame(&input, &output, width, height),
        Commands::Info { input } => show_info(&input),
    };

    if let Err(e) = result {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}

fn encode_frame(
    input: &PathBuf,
    output: &PathBuf,
    width: u32,
    height: u32,
    radius: Option<u8>,
    ppk: Option<f32>,
    ppf: Option<f32>,
) -> Result<(), Box<dyn std::error::Error>> {
    let data = fs::read(input)?;
    let stride = width as usize * 4;
    let frame = FrameView::new(&data, width, height, stride)?;

    let mut options = EncoderOptions::default();
    if let Some(radius) = radius {
        options.radius = radius;
    }
    if let Some(ppk) = ppk {
        options.ppk = ppk;
    }
    if let Some(ppf) = ppf {
        options.ppf = ppf;
    }

    let mut encoder = Encoder::new(width, height, options)?;
    let packet = encoder.encode_frame(&frame)?;
    fs::write(output, &packet.data)?;

    println!(
        "Encoded {width}x{height} frame to {output:?} ({} bytes)",
        packet.data.len()
    );
    Ok(())
}

fn decode_frame(
    input: &PathBuf,
    output: &PathBuf,
    width: u32,
    height: u32,
) -> Result<(), Box<dyn std::error::Error>> {
    let packet = fs::read(input)?;
    let mut decoder = Decoder::new(width, height)?;

    let stride = width as usize * 4;
    let mut pixels = vec![0u8; stride * height as usize];
    let mut out = FrameViewMut::new(&mut pixels, width, height, stride)?;
    let report = decoder.decode_packet(&packet, &mut out)?;

    fs::write(output, &pixels)?;
    println!(
        "Decoded {width}x{height} frame to {output:?}{}",
        if report.incomplete { " (incomplete)" } else { "" }
    );
    Ok(())
}

fn show_info(input: &PathBuf) -> Result<(), Box<dyn std::error::Error>> {
    let data = fs::read(input)?;
    println!("File: {input:?}");
    println!("Size: {} bytes", data.len());
    if data.len() >= 12 {
        let header_length = data[0] as u32 | ((data[1] as u32) << 8) | ((data[2] as u32) << 16);
        println!("Header length: {header_length}");
        println!("Magic:         {:?}", String::from_utf8_lossy(&data[3..9]));
        println!("Version:       {}", data[9]);
        println!("Radius:        {}", data[10]);
    } else {
        println!("Too short to contain a Splash header");
    }
    Ok(())
}
