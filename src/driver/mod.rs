use std::io;

pub mod file_drive;
pub mod memory_drive;

/// Sector-addressed, read-only access to a disk image.
pub trait DeviceDriver {
    fn get_sector_count(&self) -> u64;
    fn get_sector_size(&self) -> usize;
    fn read_sector(&self, index: u64) -> io::Result<Vec<u8>>;

    fn get_size(&self) -> u64 {
        self.get_sector_count() * self.get_sector_size() as u64
    }
}
