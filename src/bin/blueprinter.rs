use clap::Parser;
use std::error::Error;
use std::fs;
use std::path::{Path, PathBuf};

use blueprint_mosaic::emit::ColorPrecision;
use blueprint_mosaic::pipeline::{MosaicConfig, Pipeline, ProgressSink};

#[derive(Parser, Debug)]
#[command(
    name = "blueprinter",
    about = "Approximate an image as a pasteable grid of Unreal comment nodes",
    version
)]
struct Cli {
    /// Input image (png, jpg, bmp, ...)
    image: PathBuf,

    /// Image height in comment nodes; width follows the aspect ratio
    #[arg(short = 'r', long = "rows", default_value_t = 90)]
    rows: u32,

    /// Print the node text to stdout instead of copying it to the clipboard
    #[arg(long = "stdout")]
    stdout: bool,

    /// Write the node text to a file instead of the clipboard
    #[arg(short = 'o', long = "out")]
    out: Option<PathBuf>,

    /// Ignore the alpha channel and emit the opaque legacy schema
    #[arg(long = "no-alpha")]
    no_alpha: bool,

    /// Emit full-precision color floats instead of 3 decimal places
    #[arg(long = "full-precision")]
    full_precision: bool,

    /// Reuse the horizontal cell size vertically (legacy behavior)
    #[arg(long = "legacy-step")]
    legacy_step: bool,
}

struct ConsoleProgress;

impl ProgressSink for ConsoleProgress {
    fn report(&mut self, percent: f32) {
        println!("{percent:.0}%");
    }
}

fn write_text_file(path: &Path, contents: &str) -> Result<(), Box<dyn Error>> {
    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
    {
        fs::create_dir_all(parent)?;
    }
    fs::write(path, contents)?;
    Ok(())
}

fn main() -> Result<(), Box<dyn Error>> {
    let cli = Cli::parse();

    let img = image::open(&cli.image)
        .map_err(|e| format!("Failed to open {}: {e}", cli.image.display()))?;

    let config = MosaicConfig {
        rows: cli.rows,
        track_alpha: !cli.no_alpha,
        precision: if cli.full_precision {
            ColorPrecision::Full
        } else {
            ColorPrecision::Compact
        },
        legacy_step: cli.legacy_step,
    };

    let pipeline = Pipeline::new(&img, &config)?;
    let spec = pipeline.spec();

    if (spec.working_width, spec.working_height) != (img.width(), img.height()) {
        println!(
            "Resized image from {}x{} to {}x{}",
            img.width(),
            img.height(),
            spec.working_width,
            spec.working_height
        );
    }
    println!(
        "Image in nodes: {}x{} (total {})",
        spec.cols,
        spec.rows,
        spec.total()
    );

    let mosaic = pipeline.render(&mut ConsoleProgress);

    if mosaic.emitted == 0 {
        eprintln!("No nodes emitted; the image may be fully transparent.");
        return Ok(());
    }

    if let Some(out) = &cli.out {
        write_text_file(out, &mosaic.text)?;
        println!("Wrote {} nodes to {}", mosaic.emitted, out.display());
    } else if cli.stdout {
        println!("{}", mosaic.text);
    } else {
        let mut clipboard = arboard::Clipboard::new()?;
        clipboard.set_text(mosaic.text)?;
        println!("Copied {} nodes to clipboard!", mosaic.emitted);
    }

    Ok(())
}
