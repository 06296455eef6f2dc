use std::io;
use std::path::Path;

use tracing::{debug, trace};

use crate::config::Config;
use crate::consts::{BlockPointer, POINTER_WIDTH};
use crate::driver::file_drive::FileDrive;
use crate::driver::DeviceDriver;
use crate::util::error::{Error, Result};
use raw::raw_read_block;

mod raw;

/// Fixed-size block reads over a sector device.
pub struct IO<A: DeviceDriver> {
    device: A,
    pub block_size: usize,
    pub block_count: u64,
}

impl IO<FileDrive> {
    pub fn attach<P: AsRef<Path>>(path: P, config: &Config) -> Result<IO<FileDrive>> {
        let drive = FileDrive::open(path, config.sector_size)?;
        IO::new(drive, config.block_size)
    }
}

impl<A: DeviceDriver> IO<A> {
    pub fn new(device: A, block_size: usize) -> Result<IO<A>> {
        let sector_size = device.get_sector_size();

        if block_size < sector_size {
            return Err(Error::Config(format!(
                "block size {} is smaller than sector size {}",
                block_size, sector_size
            )));
        }

        if block_size % sector_size != 0 {
            return Err(Error::Config(format!(
                "block size {} is not a multiple of sector size {}",
                block_size, sector_size
            )));
        }

        let block_count = device.get_size() / block_size as u64;
        debug!(block_size, block_count, "attached block store");
        Ok(IO { device, block_size, block_count })
    }

    pub fn get_block_size(&self) -> usize {
        self.block_size
    }

    /// Pointers held by one pointer block.
    #[inline]
    pub fn get_fan_out(&self) -> usize {
        self.block_size / POINTER_WIDTH
    }

    pub fn get_block_count(&self) -> u64 {
        self.block_count
    }

    pub fn device(&self) -> &A {
        &self.device
    }

    pub fn read_block(&self, index: u64) -> Result<Vec<u8>> {
        if index >= self.block_count {
            return Err(Error::Io(io::Error::new(
                io::ErrorKind::UnexpectedEof,
                format!("block {} beyond end of image ({} blocks)", index, self.block_count),
            )));
        }

        trace!(block = index, "read block");
        Ok(raw_read_block(&self.device, self.block_size, index)?)
    }

    /// Reads a block named by an on-disk pointer.
    pub fn read_pointer(&self, pointer: BlockPointer) -> Result<Vec<u8>> {
        self.read_block(pointer as u64)
    }

    pub fn detach(self) -> A {
        debug!(block_count = self.block_count, "detached block store");
        self.device
    }
}
