mod app;
mod state;
mod ui;

use std::path::{Path, PathBuf};
use std::process::ExitCode;

use anyhow::{anyhow, Context, Result};
use clap::error::ErrorKind;
use clap::Parser;
use eframe::egui;

use app::PreviewApp;
use imagenet_packer::{
    load_and_split, register_interrupt_handler, BuildOptions, CancellationToken, DatasetBuilder,
    DEFAULT_TEST_FRACTION,
};
use state::PreviewState;

/// Samples listed (and shown) from each half of the split.
const SAMPLES_PER_HALF: usize = 3;

#[derive(Parser, Debug)]
#[command(
    name = "imagenet-packer",
    version,
    about = "Pack class directories of JPEG images into one dataset file, then split it",
    after_help = "Example: imagenet-packer imagenet_train imagenet.dat 224"
)]
struct Cli {
    /// Root directory holding one `<id>_<description>` folder per class
    image_directory: PathBuf,

    /// Dataset file to write
    output_file: PathBuf,

    /// Images are resized to SIZE x SIZE
    image_size: u32,

    /// Fraction of samples held out for testing
    #[arg(long, default_value_t = DEFAULT_TEST_FRACTION)]
    test_fraction: f64,

    /// Show a few training and testing images in a window
    #[arg(long)]
    preview: bool,
}

fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(e) => {
            let _ = e.print();
            return match e.kind() {
                ErrorKind::DisplayHelp | ErrorKind::DisplayVersion => ExitCode::SUCCESS,
                _ => ExitCode::FAILURE,
            };
        }
    };

    match run(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {e:#}");
            ExitCode::FAILURE
        }
    }
}

fn run(cli: &Cli) -> Result<()> {
    let cancel = CancellationToken::new();
    if let Err(e) = register_interrupt_handler(&cancel) {
        log::error!("Could not set interrupt handler: {e}");
    }

    log::info!("Creating dataset with parameters:");
    log::info!("  Image directory: {}", cli.image_directory.display());
    log::info!("  Output file: {}", cli.output_file.display());
    log::info!("  Image size: {0}x{0}", cli.image_size);

    DatasetBuilder::new(BuildOptions::square(cli.image_size), cancel)
        .build(&cli.image_directory, &cli.output_file)
        .context("building dataset")?;

    let split = load_and_split(&cli.output_file, cli.test_fraction)
        .with_context(|| format!("loading {}", cli.output_file.display()))?;
    let preview = PreviewState::from_split(&split, SAMPLES_PER_HALF);
    print_summary(&preview);

    if cli.preview {
        show_window(&cli.output_file, preview)?;
    }

    println!("\nDataset evaluation complete.");
    Ok(())
}

fn print_summary(preview: &PreviewState) {
    for (name, total, samples) in [
        ("Training", preview.train_total, &preview.train),
        ("Testing", preview.test_total, &preview.test),
    ] {
        println!("\n{name} set ({total} images):");
        for (i, s) in samples.iter().enumerate() {
            println!("  Image {} - Label: {} ({})", i + 1, s.numeric_label, s.label);
        }
    }
}

fn show_window(dataset_path: &Path, preview: PreviewState) -> Result<()> {
    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([720.0, 560.0])
            .with_min_inner_size([400.0, 300.0]),
        ..Default::default()
    };

    eframe::run_native(
        &format!("Dataset preview – {}", dataset_path.display()),
        options,
        Box::new(|_cc| Ok(Box::new(PreviewApp::new(preview)))),
    )
    .map_err(|e| anyhow!("preview window failed: {e}"))
}
