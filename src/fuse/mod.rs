use std::io;
use std::path::Path;

use fuser::MountOption;
use tracing::info;

use crate::driver::DeviceDriver;
use crate::ops::SimpleFs;

pub mod filesystem;

pub use filesystem::FuseDriver;

/// Serves the image read-only at `mountpoint` until it is unmounted.
pub fn mount<A: DeviceDriver, P: AsRef<Path>>(fs: SimpleFs<A>, mountpoint: P) -> io::Result<()> {
    let options = [
        MountOption::RO,
        MountOption::FSName("sfs".to_string()),
        MountOption::DefaultPermissions,
    ];
    info!(mountpoint = %mountpoint.as_ref().display(), "mounting");
    fuser::mount2(FuseDriver::new(fs), mountpoint, &options)
}
