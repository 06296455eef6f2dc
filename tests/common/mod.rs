#![allow(dead_code)]

use std::io::Write;
use std::num::NonZeroU32;

use sfs::consts::{BLOCK_SIZE, DIRECT_POINTERS};
use sfs::ops::directory::DirEntry;
use sfs::structure::inode::{Inode, InodeKind};
use sfs::structure::superblock::SuperBlock;
use sfs::util::serializable::ByteSerializable;
use tempfile::NamedTempFile;

const FAN_OUT: usize = BLOCK_SIZE / 4;

/// Lays out a small image: filler blocks, the superblock, the inode table, then
/// data and pointer blocks in allocation order.
pub struct ImageBuilder {
    blocks: Vec<Vec<u8>>,
    superblock_index: usize,
    table_start: u32,
    inode_count: u32,
    root: u32,
}

impl ImageBuilder {
    pub fn new(superblock_index: usize, inode_count: u32, root: u32) -> ImageBuilder {
        let mut blocks = vec![vec![0xEE; BLOCK_SIZE]; superblock_index + 1];
        let table_start = (superblock_index + 1) as u32;
        let table_blocks = (inode_count as usize + 1) / 2;
        blocks.extend(std::iter::repeat(vec![0; BLOCK_SIZE]).take(table_blocks));

        let mut builder = ImageBuilder { blocks, superblock_index, table_start, inode_count, root };
        builder.write_superblock();
        builder
    }

    fn write_superblock(&mut self) {
        let mut superblock = SuperBlock::new(BLOCK_SIZE as u32, self.inode_count, self.table_start, self.root);
        superblock.superblock = self.superblock_index as u32;
        let mut bytes = superblock.to_bytes();
        bytes.resize(BLOCK_SIZE, 0);
        self.blocks[self.superblock_index] = bytes;
    }

    pub fn alloc(&mut self, data: &[u8]) -> u32 {
        let mut block = data.to_vec();
        block.resize(BLOCK_SIZE, 0);
        self.blocks.push(block);
        (self.blocks.len() - 1) as u32
    }

    fn alloc_pointers(&mut self, pointers: &[u32]) -> u32 {
        let bytes: Vec<u8> = pointers.iter().flat_map(|p| p.to_le_bytes()).collect();
        self.alloc(&bytes)
    }

    pub fn set_inode(&mut self, id: u32, inode: &Inode) {
        let block = self.table_start as usize + id as usize / 2;
        let offset = (id as usize % 2) * BLOCK_SIZE / 2;
        self.blocks[block][offset..offset + 64].copy_from_slice(&inode.to_bytes());
    }

    /// Stores `content` through direct, single and double indirect pointers.
    pub fn add_inode(&mut self, id: u32, kind: InodeKind, perm: u16, content: &[u8]) -> Inode {
        let data: Vec<u32> = content.chunks(BLOCK_SIZE).map(|chunk| self.alloc(chunk)).collect();
        let mut inode = Inode::new(kind, perm, content.len() as u64);
        inode.owner = 1000;
        inode.group = 100;
        inode.mtime = 1_700_000_000;
        inode.atime = 1_700_000_000;

        let (direct, rest) = data.split_at(data.len().min(DIRECT_POINTERS));
        for (slot, block) in direct.iter().enumerate() {
            inode.direct[slot] = NonZeroU32::new(*block);
        }

        let (single, rest) = rest.split_at(rest.len().min(FAN_OUT));
        if !single.is_empty() {
            inode.indirect = NonZeroU32::new(self.alloc_pointers(single));
        }

        assert!(rest.len() <= FAN_OUT * FAN_OUT, "fixture too large");
        if !rest.is_empty() {
            let groups: Vec<u32> = rest.chunks(FAN_OUT).map(|group| self.alloc_pointers(group)).collect();
            inode.double_indirect = NonZeroU32::new(self.alloc_pointers(&groups));
        }

        self.set_inode(id, &inode);
        inode
    }

    pub fn add_file(&mut self, id: u32, content: &[u8]) -> Inode {
        self.add_inode(id, InodeKind::File, 0o644, content)
    }

    pub fn add_root(&mut self, entries: &[(&str, u32)]) -> Inode {
        let content = directory(entries);
        let root = self.root;
        self.add_inode(root, InodeKind::Directory, 0o755, &content)
    }

    pub fn build(&self) -> Vec<u8> {
        self.blocks.concat()
    }

    pub fn write(&self) -> NamedTempFile {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(&self.build()).unwrap();
        file.flush().unwrap();
        file
    }
}

pub fn directory(entries: &[(&str, u32)]) -> Vec<u8> {
    entries
        .iter()
        .flat_map(|(name, inode)| DirEntry::new(name, *inode).to_bytes())
        .collect()
}

/// Deterministic, block-position-sensitive content.
pub fn content(length: usize, seed: u8) -> Vec<u8> {
    (0..length).map(|i| (i as u8).wrapping_mul(7).wrapping_add(seed).wrapping_add((i / 128) as u8)).collect()
}

/// Root with `readme.txt` (inode 5, 100 bytes) and `bin` (inode 8, 300 bytes).
pub fn sample() -> ImageBuilder {
    let mut builder = ImageBuilder::new(0, 16, 0);
    builder.add_root(&[("readme.txt", 5), ("bin", 8)]);
    builder.add_file(5, &content(100, 1));
    builder.add_file(8, &content(300, 2));
    builder
}
