use std::cell::Cell;
use std::io;

use crate::driver::DeviceDriver;

/// An image held in memory. Counts sector reads so callers can check that an
/// operation left the device untouched.
pub struct MemoryDrive {
    data: Vec<u8>,
    sector_size: usize,
    reads: Cell<u64>,
}

impl MemoryDrive {
    pub fn new(data: Vec<u8>, sector_size: usize) -> MemoryDrive {
        MemoryDrive { data, sector_size, reads: Cell::new(0) }
    }

    pub fn reads(&self) -> u64 {
        self.reads.get()
    }
}

impl DeviceDriver for MemoryDrive {
    fn get_sector_count(&self) -> u64 {
        (self.data.len() / self.sector_size) as u64
    }

    fn get_sector_size(&self) -> usize {
        self.sector_size
    }

    fn read_sector(&self, index: u64) -> io::Result<Vec<u8>> {
        if index >= self.get_sector_count() {
            return Err(io::Error::new(
                io::ErrorKind::UnexpectedEof,
                format!("sector {} beyond end of image", index),
            ));
        }
        self.reads.set(self.reads.get() + 1);
        let offset = index as usize * self.sector_size;
        Ok(self.data[offset..offset + self.sector_size].to_vec())
    }
}
