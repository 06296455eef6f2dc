use std::io;

use crate::driver::DeviceDriver;

pub(crate) fn raw_read_block<A: DeviceDriver>(drive: &A, block_size: usize, index: u64) -> io::Result<Vec<u8>> {
    if block_size == drive.get_sector_size() {
        drive.read_sector(index)
    } else {
        let ratio = (block_size / drive.get_sector_size()) as u64;
        let mut buffer = Vec::with_capacity(block_size);

        let start = index * ratio;
        let end = start + ratio;

        for i in start..end {
            buffer.append(&mut drive.read_sector(i)?);
        }

        Ok(buffer)
    }
}
