use tracing::{debug, trace};

use crate::consts::{BlockPointer, InodePointer, SFS_MAGIC, SFS_TYPESTR, TYPESTR_LENGTH};
use crate::driver::DeviceDriver;
use crate::io::IO;
use crate::util::error::{Error, Result};
use crate::util::serializable::{c_string, put_c_string, read_u32, ByteSerializable, KnownSize};

const SUPERBLOCK_SIZE: usize = 88;

#[derive(Debug, Clone, PartialEq)]
pub struct SuperBlock {
    pub magic: u32,
    pub type_name: Vec<u8>,
    pub block_size: u32,
    pub sectors_per_block: u32,
    pub superblock: BlockPointer,
    pub num_blocks: u32,
    pub free_block_bitmap: BlockPointer,
    pub free_block_bitmap_blocks: u32,
    pub blocks_free: u32,
    pub num_inodes: u32,
    pub free_inode_bitmap: BlockPointer,
    pub free_inode_bitmap_blocks: u32,
    pub inodes_free: u32,
    /// First block of the inode table.
    pub inodes: BlockPointer,
    pub root_inode: InodePointer,
}

impl SuperBlock {
    pub fn new(block_size: u32, num_inodes: u32, inodes: BlockPointer, root_inode: InodePointer) -> SuperBlock {
        SuperBlock {
            magic: SFS_MAGIC,
            type_name: SFS_TYPESTR.as_bytes().to_vec(),
            block_size,
            sectors_per_block: 1,
            superblock: 0,
            num_blocks: 0,
            free_block_bitmap: 0,
            free_block_bitmap_blocks: 0,
            blocks_free: 0,
            num_inodes,
            free_inode_bitmap: 0,
            free_inode_bitmap_blocks: 0,
            inodes_free: 0,
            inodes,
            root_inode,
        }
    }

    pub fn is_valid(&self) -> bool {
        self.magic == SFS_MAGIC && self.type_name == SFS_TYPESTR.as_bytes()
    }

    /// Probes blocks from 0 upwards and returns the first valid superblock with
    /// the block it was found in. Gives up after `scan_limit` blocks or at the
    /// end of the image, whichever comes first.
    pub fn locate<A: DeviceDriver>(io: &IO<A>, scan_limit: u64) -> Result<(SuperBlock, BlockPointer)> {
        let limit = scan_limit.min(io.get_block_count());

        for index in 0..limit {
            let block = io.read_block(index)?;
            let candidate = SuperBlock::from_bytes(&block);
            if !candidate.is_valid() {
                trace!(block = index, magic = candidate.magic, "not a superblock");
                continue;
            }

            if candidate.block_size as usize != io.get_block_size() {
                return Err(Error::Config(format!(
                    "superblock at block {} records block size {}, store uses {}",
                    index,
                    candidate.block_size,
                    io.get_block_size()
                )));
            }

            debug!(
                block = index,
                inodes = candidate.inodes,
                num_inodes = candidate.num_inodes,
                root = candidate.root_inode,
                "located superblock"
            );
            return Ok((candidate, index as BlockPointer));
        }

        Err(Error::NotFound(format!("no superblock within the first {} blocks", limit)))
    }
}

impl KnownSize for SuperBlock {
    fn size_on_disk() -> usize {
        SUPERBLOCK_SIZE
    }
}

impl ByteSerializable for SuperBlock {
    fn to_bytes(&self) -> Vec<u8> {
        let mut buffer = Vec::with_capacity(SUPERBLOCK_SIZE);
        buffer.extend_from_slice(&self.magic.to_le_bytes());
        put_c_string(&mut buffer, &self.type_name, TYPESTR_LENGTH);
        for field in [
            self.block_size,
            self.sectors_per_block,
            self.superblock,
            self.num_blocks,
            self.free_block_bitmap,
            self.free_block_bitmap_blocks,
            self.blocks_free,
            self.num_inodes,
            self.free_inode_bitmap,
            self.free_inode_bitmap_blocks,
            self.inodes_free,
            self.inodes,
            self.root_inode,
        ] {
            buffer.extend_from_slice(&field.to_le_bytes());
        }
        buffer
    }

    fn from_bytes(buffer: &[u8]) -> Self {
        let fields = 4 + TYPESTR_LENGTH;
        SuperBlock {
            magic: read_u32(buffer, 0),
            type_name: c_string(&buffer[4..fields]).to_vec(),
            block_size: read_u32(buffer, fields),
            sectors_per_block: read_u32(buffer, fields + 4),
            superblock: read_u32(buffer, fields + 8),
            num_blocks: read_u32(buffer, fields + 12),
            free_block_bitmap: read_u32(buffer, fields + 16),
            free_block_bitmap_blocks: read_u32(buffer, fields + 20),
            blocks_free: read_u32(buffer, fields + 24),
            num_inodes: read_u32(buffer, fields + 28),
            free_inode_bitmap: read_u32(buffer, fields + 32),
            free_inode_bitmap_blocks: read_u32(buffer, fields + 36),
            inodes_free: read_u32(buffer, fields + 40),
            inodes: read_u32(buffer, fields + 44),
            root_inode: read_u32(buffer, fields + 48),
        }
    }
}
