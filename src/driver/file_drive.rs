use std::fs::File;
use std::io;
use std::os::unix::fs::FileExt;
use std::path::Path;

use tracing::debug;

use crate::driver::DeviceDriver;

pub struct FileDrive {
    file: File,
    pub bytes: u64,
    pub sector_size: usize,
}

impl FileDrive {
    pub fn open<P: AsRef<Path>>(path: P, sector_size: usize) -> io::Result<FileDrive> {
        let path = path.as_ref();
        let file = File::open(path)?;
        let bytes = file.metadata()?.len();
        debug!(path = %path.display(), bytes, sector_size, "opened image");
        Ok(FileDrive { file, bytes, sector_size })
    }
}

impl DeviceDriver for FileDrive {
    fn get_sector_count(&self) -> u64 {
        self.bytes / self.sector_size as u64
    }

    fn get_sector_size(&self) -> usize {
        self.sector_size
    }

    fn read_sector(&self, index: u64) -> io::Result<Vec<u8>> {
        let mut buffer = vec![0; self.sector_size];
        self.file.read_exact_at(&mut buffer, index * self.sector_size as u64)?;
        Ok(buffer)
    }
}
