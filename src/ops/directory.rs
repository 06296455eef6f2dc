use std::borrow::Cow;

use crate::consts::{InodePointer, DIRENT_SIZE, FILE_NAME_LENGTH};
use crate::driver::DeviceDriver;
use crate::structure::inode::Inode;
use crate::structure::Structure;
use crate::util::error::Result;
use crate::util::serializable::{c_string, put_c_string, read_u32, ByteSerializable, KnownSize};

#[derive(Debug, Clone, PartialEq)]
pub struct DirEntry {
    pub name: Vec<u8>,
    pub inode: InodePointer,
}

impl DirEntry {
    pub fn new(name: &str, inode: InodePointer) -> DirEntry {
        DirEntry { name: name.as_bytes().to_vec(), inode }
    }

    pub fn name_lossy(&self) -> Cow<'_, str> {
        String::from_utf8_lossy(&self.name)
    }
}

impl KnownSize for DirEntry {
    fn size_on_disk() -> usize {
        DIRENT_SIZE
    }
}

impl ByteSerializable for DirEntry {
    fn to_bytes(&self) -> Vec<u8> {
        let mut bytes = Vec::with_capacity(DIRENT_SIZE);
        put_c_string(&mut bytes, &self.name, FILE_NAME_LENGTH);
        bytes.extend_from_slice(&self.inode.to_le_bytes());
        bytes
    }

    fn from_bytes(bytes: &[u8]) -> Self {
        DirEntry {
            name: c_string(&bytes[..FILE_NAME_LENGTH]).to_vec(),
            inode: read_u32(bytes, FILE_NAME_LENGTH),
        }
    }
}

/// Whole records within the first `content_length` bytes of `buffer`.
fn records(buffer: &[u8], content_length: usize) -> impl Iterator<Item = &[u8]> {
    let length = content_length.min(buffer.len());
    buffer[..length].chunks_exact(DIRENT_SIZE)
}

/// Compares a name field the way `strncmp(field, name, FILE_NAME_LENGTH)` would.
fn name_matches(field: &[u8], name: &[u8]) -> bool {
    for (i, &stored) in field.iter().take(FILE_NAME_LENGTH).enumerate() {
        let wanted = name.get(i).copied().unwrap_or(0);
        if stored != wanted {
            return false;
        }
        if stored == 0 {
            return true;
        }
    }
    true
}

/// Directory content as entries in on-disk order. A trailing partial record is
/// ignored.
pub fn entries(buffer: &[u8], content_length: usize) -> Vec<DirEntry> {
    records(buffer, content_length).map(DirEntry::from_bytes).collect()
}

/// First entry named `name`, in on-disk order.
pub fn find_by_name(buffer: &[u8], content_length: usize, name: &[u8]) -> Option<InodePointer> {
    records(buffer, content_length)
        .find(|record| name_matches(&record[..FILE_NAME_LENGTH], name))
        .map(|record| read_u32(record, FILE_NAME_LENGTH))
}

pub struct Directory {
    pub inode: Inode,
}

impl Directory {
    pub fn from_inode(inode: Inode) -> Directory {
        Directory { inode }
    }

    fn content<A: DeviceDriver>(&self, structure: &Structure<A>) -> Result<(Vec<u8>, usize)> {
        let data = structure.read_data(&self.inode)?;
        let length = data.len();
        Ok((data, length))
    }

    pub fn get_entries<A: DeviceDriver>(&self, structure: &Structure<A>) -> Result<Vec<DirEntry>> {
        let (data, length) = self.content(structure)?;
        Ok(entries(&data, length))
    }

    pub fn find<A: DeviceDriver>(&self, structure: &Structure<A>, name: &[u8]) -> Result<Option<InodePointer>> {
        let (data, length) = self.content(structure)?;
        Ok(find_by_name(&data, length, name))
    }
}
