//! Packs an iconset directory into an ICNS file without altering the images
//! it contains.
//!
//! ```shell
//! iconset2icns path/to/App.iconset
//! # ICNS will be saved to ./App.icns
//! ```
//!
//! Files in the iconset must follow the standard naming scheme
//! (`icon_16x16.png`, `icon_16x16@2x.png`, ..., `icon_512x512@2x.png`);
//! anything else is skipped with a warning.

use clap::Parser;
use icnsutil::pack;
use std::path::PathBuf;
use std::process;
use tracing::Level;

#[derive(Parser)]
#[command(name = "iconset2icns", version)]
#[command(about = "Packs an .iconset directory into an .icns file")]
struct Cli {
    /// Path to the .iconset directory
    iconset: PathBuf,

    /// Directory in which to create the .icns file
    #[arg(short, long, value_name = "DIR", default_value = ".")]
    output_dir: PathBuf,

    /// Log every file as it is packed
    #[arg(short, long, conflicts_with = "quiet")]
    verbose: bool,

    /// Only report errors
    #[arg(short, long)]
    quiet: bool,
}

fn main() {
    let cli = Cli::parse();
    let level = if cli.verbose {
        Level::DEBUG
    } else if cli.quiet {
        Level::ERROR
    } else {
        Level::WARN
    };
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .without_time()
        .with_target(false)
        .init();

    match pack(&cli.iconset, &cli.output_dir) {
        Ok(report) => {
            if !cli.quiet {
                println!("Packed {} icon(s) into {} ({} bytes)",
                         report.icons.len(),
                         report.icns_path.display(),
                         report.file_length);
            }
        }
        Err(err) => {
            eprintln!("Error: {}", err);
            process::exit(1);
        }
    }
}
