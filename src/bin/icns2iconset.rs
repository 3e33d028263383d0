//! Unpacks an ICNS file into an iconset directory without altering the
//! images it contains.
//!
//! ```shell
//! icns2iconset path/to/App.icns
//! # Icons will be saved to ./App.iconset/
//! ```

use clap::Parser;
use icnsutil::{unpack, UnpackOptions};
use std::path::PathBuf;
use std::process;
use tracing::Level;

#[derive(Parser)]
#[command(name = "icns2iconset", version)]
#[command(about = "Unpacks an .icns file into an .iconset directory")]
struct Cli {
    /// Path to the .icns file
    icns: PathBuf,

    /// Directory in which to create the .iconset directory
    #[arg(short, long, value_name = "DIR", default_value = ".")]
    output_dir: PathBuf,

    /// Require the file length in the header to match the file contents
    #[arg(long)]
    strict: bool,

    /// Log every element as it is extracted
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

    let options = UnpackOptions { strict: cli.strict };
    match unpack(&cli.icns, &cli.output_dir, &options) {
        Ok(report) => {
            if !cli.quiet {
                println!("Extracted {} icon(s) into {}",
                         report.icons.len(),
                         report.iconset_path.display());
            }
        }
        Err(err) => {
            eprintln!("Error: {}", err);
            process::exit(1);
        }
    }
}
