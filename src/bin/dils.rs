//! dils - list the root directory of an SFS disk image.
//!
//! Usage:
//!   dils initrd        # names only
//!   dils -l initrd     # long format

use std::io;
use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::Parser;

use sfs::config::{Config, ConfigArgs};
use sfs::ops::{ListMode, SimpleFs};
use sfs::util::{cli, logging};

#[derive(Parser)]
#[command(name = "dils")]
#[command(about = "List the contents of the root directory of a disk image")]
struct Args {
    /// Print the listing in long format
    #[arg(short = 'l')]
    long: bool,

    /// Path to the disk image
    image: PathBuf,

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

    let mode = if args.long { ListMode::Long } else { ListMode::Short };
    let listings = fs
        .list(mode)
        .with_context(|| format!("cannot list {}", args.image.display()))?;

    let mut out = io::stdout().lock();
    for listing in &listings {
        listing.write_to(&mut out)?;
    }
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
