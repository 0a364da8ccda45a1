//! glyphmosaic CLI - Convert PNG images and GIF animations to glyph mosaics

use clap::Parser;
use glyphmosaic::{Converter, FrameTiming, MosaicError};
use image::Delay;
use std::path::{Path, PathBuf};

#[derive(Parser)]
#[command(name = "glyphmosaic", about = "Convert images and GIFs to glyph-tile mosaics")]
struct Args {
    /// Input image (.gif is rendered frame by frame)
    input: PathBuf,
    /// Output file (default: re-<input name> beside the input)
    #[arg(short, long)]
    output: Option<PathBuf>,
    /// Font file used to render the character set
    #[arg(short, long, default_value = "fonts/msyh.ttc")]
    font: PathBuf,
    /// Face index inside a font collection
    #[arg(long, default_value = "0")]
    font_index: u32,
    /// Delay between output GIF frames in milliseconds
    #[arg(long, default_value = "10")]
    delay_ms: u32,
    /// Keep each source frame's delay instead of a uniform one
    #[arg(long)]
    keep_timing: bool,
    /// Print the brightness/glyph table as JSON
    #[arg(long)]
    print_atlas: bool,
}

fn main() -> Result<(), MosaicError> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    let args = Args::parse();

    let timing = if args.keep_timing {
        FrameTiming::Source
    } else {
        FrameTiming::Uniform(Delay::from_numer_denom_ms(args.delay_ms, 1))
    };
    let converter = Converter::new(&args.font, args.font_index)?.with_timing(timing);
    log::debug!("atlas levels: {:?}", converter.atlas().keys());

    if args.print_atlas {
        let report = serde_json::to_string_pretty(&converter.atlas().report())
            .map_err(std::io::Error::other)?;
        println!("{}", report);
    }

    let animated = is_gif(&args.input);
    let output = args.output.unwrap_or_else(|| default_output(&args.input, animated));

    if animated {
        converter.convert_gif_file(&args.input, &output)?;
    } else {
        converter.convert_still_file(&args.input, &output)?;
    }

    log::info!("Done.");
    Ok(())
}

fn is_gif(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| ext.eq_ignore_ascii_case("gif"))
}

/// `images/cp.png` -> `images/re-cp.png`; still output is always PNG.
fn default_output(input: &Path, animated: bool) -> PathBuf {
    let stem = input.file_stem().and_then(|s| s.to_str()).unwrap_or("out");
    let ext = if animated { "gif" } else { "png" };
    input.with_file_name(format!("re-{}.{}", stem, ext))
}
