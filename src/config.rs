//! Runtime parameters shared by the block store and every traversal.

use clap::Args;

use crate::consts::{BLOCK_SIZE, INODE_SIZE, POINTER_WIDTH, SUPERBLOCK_SCAN_LIMIT};
use crate::util::error::{Error, Result};

#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    pub block_size: usize,
    pub sector_size: usize,
    /// Highest block number (exclusive) probed for a superblock.
    pub scan_limit: u64,
    /// Overrides the inode count recorded in the superblock.
    pub inode_count: Option<u32>,
}

impl Default for Config {
    fn default() -> Config {
        Config {
            block_size: BLOCK_SIZE,
            sector_size: BLOCK_SIZE,
            scan_limit: SUPERBLOCK_SCAN_LIMIT,
            inode_count: None,
        }
    }
}

impl Config {
    pub fn validate(&self) -> Result<()> {
        if self.block_size == 0 || self.block_size % POINTER_WIDTH != 0 {
            return Err(Error::Config(format!(
                "block size {} is not a positive multiple of {}",
                self.block_size, POINTER_WIDTH
            )));
        }

        // Two inode records share a block.
        if self.block_size < 2 * INODE_SIZE {
            return Err(Error::Config(format!(
                "block size {} cannot hold two {}-byte inodes",
                self.block_size, INODE_SIZE
            )));
        }

        if self.sector_size == 0 || self.block_size % self.sector_size != 0 {
            return Err(Error::Config(format!(
                "block size {} must be a multiple of sector size {}",
                self.block_size, self.sector_size
            )));
        }

        if self.scan_limit == 0 {
            return Err(Error::Config("superblock scan limit must be nonzero".to_string()));
        }

        Ok(())
    }
}

/// Image geometry flags shared by the command-line front ends.
#[derive(Debug, Clone, Args)]
pub struct ConfigArgs {
    /// Bytes per filesystem block
    #[arg(long, env = "SFS_BLOCK_SIZE", default_value_t = BLOCK_SIZE)]
    pub block_size: usize,

    /// Bytes per device sector
    #[arg(long, env = "SFS_SECTOR_SIZE", default_value_t = BLOCK_SIZE)]
    pub sector_size: usize,

    /// Number of leading blocks searched for the superblock
    #[arg(long, env = "SFS_SCAN_LIMIT", default_value_t = SUPERBLOCK_SCAN_LIMIT)]
    pub scan_limit: u64,

    /// Inode count to use instead of the superblock's
    #[arg(long, env = "SFS_INODE_COUNT")]
    pub inode_count: Option<u32>,
}

impl From<ConfigArgs> for Config {
    fn from(args: ConfigArgs) -> Config {
        Config {
            block_size: args.block_size,
            sector_size: args.sector_size,
            scan_limit: args.scan_limit,
            inode_count: args.inode_count,
        }
    }
}
