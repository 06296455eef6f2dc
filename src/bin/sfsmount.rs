//! sfsmount - serve the root directory of an SFS disk image read-only over FUSE.

use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::Parser;

use sfs::config::{Config, ConfigArgs};
use sfs::ops::SimpleFs;
use sfs::util::{cli, logging};

#[derive(Parser)]
#[command(name = "sfsmount")]
#[command(about = "Mount a disk image read-only")]
struct Args {
    /// Path to the disk image
    image: PathBuf,

    /// Directory to mount on
    mountpoint: PathBuf,

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
    sfs::fuse::mount(fs, &args.mountpoint)
        .with_context(|| format!("cannot mount on {}", args.mountpoint.display()))
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
