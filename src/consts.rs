use std::num::NonZeroU32;

pub const SUPERBLOCK_SCAN_LIMIT: u64 = 64;
pub const BLOCK_SIZE: usize = 128;
pub const DIRECT_POINTERS: usize = 5;
pub const POINTER_WIDTH: usize = 4;
pub const INODE_SIZE: usize = 64;

pub const SFS_MAGIC: u32 = 0x000E_F5F5;
pub const SFS_TYPESTR: &str = "vmlarix_sfs";
pub const TYPESTR_LENGTH: usize = 32;

pub const DIRENT_SIZE: usize = 32;
pub const FILE_NAME_LENGTH: usize = DIRENT_SIZE - 4;

pub type BlockPointer = u32;
pub type InodePointer = u32;

/// A block pointer as stored in an inode or pointer block. `None` is the
/// on-disk value 0, which ends a chain; block 0 never holds file data or
/// pointer payload.
pub type BlockRef = Option<NonZeroU32>;
pub type DirectPointers = [BlockRef; DIRECT_POINTERS];
