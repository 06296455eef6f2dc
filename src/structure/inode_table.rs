use tracing::trace;

use crate::consts::{BlockPointer, InodePointer};
use crate::driver::DeviceDriver;
use crate::io::IO;
use crate::structure::inode::Inode;
use crate::util::error::{Error, Result};
use crate::util::serializable::{ByteSerializable, KnownSize};

const INODES_PER_BLOCK: u32 = 2;

/// The on-disk inode array: two records per block, starting at `table_index`.
#[derive(Debug, Clone, PartialEq)]
pub struct InodeTable {
    table_index: BlockPointer,
    pub(crate) inode_count: u32,
}

impl InodeTable {
    pub fn new(table_index: BlockPointer, inode_count: u32) -> InodeTable {
        InodeTable { table_index, inode_count }
    }

    pub fn read_inode<A: DeviceDriver>(&self, io: &IO<A>, index: InodePointer) -> Result<Inode> {
        if index >= self.inode_count {
            return Err(Error::OutOfRange { inode: index, count: self.inode_count });
        }

        let inode_block = self.inode_block(index);
        let offset = Self::inode_offset(index, io.get_block_size());
        trace!(inode = index, block = inode_block, offset, "read inode");

        let block = io.read_block(inode_block)?;
        Ok(Inode::from_bytes(&block[offset..offset + Inode::size_on_disk()]))
    }

    #[inline]
    fn inode_block(&self, index: InodePointer) -> u64 {
        self.table_index as u64 + (index / INODES_PER_BLOCK) as u64
    }

    #[inline]
    fn inode_offset(index: InodePointer, block_size: usize) -> usize {
        (index % INODES_PER_BLOCK) as usize * (block_size / INODES_PER_BLOCK as usize)
    }
}
