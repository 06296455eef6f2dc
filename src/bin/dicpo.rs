//! dicpo - copy a file out of the root directory of an SFS disk image.
//!
//! Usage:
//!   dicpo disk.img myfile.txt       # writes ./myfile.txt

use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::Parser;

use sfs::config::{Config, ConfigArgs};
use sfs::ops::SimpleFs;
use sfs::util::{cli, logging};

#[derive(Parser)]
#[command(name = "dicpo")]
#[command(about = "Copy a file from the root directory of a disk image to the current directory")]
struct Args {
    /// Path to the disk image containing the file
    image: PathBuf,

    /// Name of the file to copy from the disk image
    filename: String,

    #[command(flatten)]
    config: ConfigArgs,

    /// Verbose output
    #[arg(short, long)]
    verbose: bool,
}

fn run(args: Args) -> Result<()> {
    let config = Config::from(args.config);
    let fs = SimpleFs::open_image(&args.image, &config)
        .with_context(|| format!("cannot open {}", args.image.display()))?;

    fs.copy_out(&args.filename, ".")
        .with_context(|| format!("cannot copy {} from {}", args.filename, args.image.display()))?;
    fs.detach();
    Ok(())
}

fn main() -> ExitCode {
    let args = match cli::parse_args::<Args>() {
        Ok(Some(args)) => args,
        Ok(None) => return ExitCode::SUCCESS,
        Err(error) => {
            eprintln!("error: {error}");
            return ExitCode::FAILURE;
        }
    };
    logging::init(args.verbose);

    match run(args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(error) => {
            eprintln!("error: {error:#}");
            ExitCode::FAILURE
        }
    }
}
