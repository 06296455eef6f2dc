use tracing::debug;

use crate::config::Config;
use crate::consts::{BlockPointer, InodePointer};
use crate::driver::DeviceDriver;
use crate::io::IO;
use crate::structure::blockmap::BlockMap;
use crate::structure::inode::Inode;
use crate::structure::inode_table::InodeTable;
use crate::structure::superblock::SuperBlock;
use crate::util::error::{Error, Result};

pub mod blockmap;
pub mod inode;
pub mod inode_table;
pub mod superblock;

/// A located filesystem: the block store plus the records that anchor it.
pub struct Structure<A: DeviceDriver> {
    pub(crate) io: IO<A>,
    pub(crate) superblock: SuperBlock,
    superblock_index: BlockPointer,
    inode_table: InodeTable,
}

impl<A: DeviceDriver> Structure<A> {
    pub fn mount(io: IO<A>, config: &Config) -> Result<Structure<A>> {
        if io.get_block_size() != config.block_size {
            return Err(Error::Config(format!(
                "store block size {} differs from configured {}",
                io.get_block_size(),
                config.block_size
            )));
        }

        let (superblock, superblock_index) = SuperBlock::locate(&io, config.scan_limit)?;
        let inode_count = config.inode_count.unwrap_or(superblock.num_inodes);
        let inode_table = InodeTable::new(superblock.inodes, inode_count);
        debug!(superblock_index, inode_count, "mounted");

        Ok(Structure { io, superblock, superblock_index, inode_table })
    }

    pub fn get_block_size(&self) -> usize {
        self.io.get_block_size()
    }

    pub fn get_superblock_index(&self) -> BlockPointer {
        self.superblock_index
    }

    pub fn get_root_inode_id(&self) -> InodePointer {
        self.superblock.root_inode
    }

    pub fn read_inode(&self, index: InodePointer) -> Result<Inode> {
        self.inode_table.read_inode(&self.io, index)
    }

    pub fn get_root_inode(&self) -> Result<Inode> {
        self.read_inode(self.superblock.root_inode)
    }

    pub fn read_data(&self, inode: &Inode) -> Result<Vec<u8>> {
        BlockMap::new(&self.io).read_inode(inode)
    }

    pub fn read_bytes(&self, inode: &Inode, length: u64) -> Result<Vec<u8>> {
        BlockMap::new(&self.io).read_bytes(inode, length)
    }

    pub fn detach(self) -> A {
        self.io.detach()
    }
}
