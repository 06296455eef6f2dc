use std::num::NonZeroU32;

use crate::consts::{BlockPointer, BlockRef, DirectPointers, DIRECT_POINTERS, INODE_SIZE};
use crate::util::serializable::{read_u16, read_u32, read_u64, ByteSerializable, KnownSize};

const NULL_POINTER: BlockPointer = 0;
const DIRECT_OFFSET: usize = 32;
const INDIRECT_OFFSET: usize = DIRECT_OFFSET + DIRECT_POINTERS * 4;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InodeKind {
    File,
    Directory,
    Other(u8),
}

impl InodeKind {
    fn from_raw(raw: u8) -> InodeKind {
        match raw {
            0 => InodeKind::File,
            1 => InodeKind::Directory,
            other => InodeKind::Other(other),
        }
    }

    fn to_raw(self) -> u8 {
        match self {
            InodeKind::File => 0,
            InodeKind::Directory => 1,
            InodeKind::Other(raw) => raw,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Inode {
    pub owner: u32,
    pub group: u32,
    pub ctime: u32,
    pub mtime: u32,
    pub atime: u32,
    pub perm: u16,
    pub kind: InodeKind,
    pub refcount: u8,
    pub size: u64,
    pub direct: DirectPointers,
    pub indirect: BlockRef,
    pub double_indirect: BlockRef,
    pub triple_indirect: BlockRef,
}

impl Inode {
    pub fn new(kind: InodeKind, perm: u16, size: u64) -> Inode {
        Inode {
            owner: 0,
            group: 0,
            ctime: 0,
            mtime: 0,
            atime: 0,
            perm,
            kind,
            refcount: 1,
            size,
            direct: [None; DIRECT_POINTERS],
            indirect: None,
            double_indirect: None,
            triple_indirect: None,
        }
    }
}

#[inline]
pub(crate) fn block_ref(raw: BlockPointer) -> BlockRef {
    NonZeroU32::new(raw)
}

#[inline]
pub(crate) fn raw_pointer(pointer: BlockRef) -> BlockPointer {
    pointer.map_or(NULL_POINTER, NonZeroU32::get)
}

impl KnownSize for Inode {
    fn size_on_disk() -> usize {
        INODE_SIZE
    }
}

impl ByteSerializable for Inode {
    fn to_bytes(&self) -> Vec<u8> {
        let mut bytes = Vec::<u8>::with_capacity(INODE_SIZE);
        bytes.extend_from_slice(&self.owner.to_le_bytes());
        bytes.extend_from_slice(&self.group.to_le_bytes());
        bytes.extend_from_slice(&self.ctime.to_le_bytes());
        bytes.extend_from_slice(&self.mtime.to_le_bytes());
        bytes.extend_from_slice(&self.atime.to_le_bytes());
        bytes.extend_from_slice(&self.perm.to_le_bytes());
        bytes.push(self.kind.to_raw());
        bytes.push(self.refcount);
        bytes.extend_from_slice(&self.size.to_le_bytes());
        for pointer in self.direct {
            bytes.extend_from_slice(&raw_pointer(pointer).to_le_bytes());
        }
        bytes.extend_from_slice(&raw_pointer(self.indirect).to_le_bytes());
        bytes.extend_from_slice(&raw_pointer(self.double_indirect).to_le_bytes());
        bytes.extend_from_slice(&raw_pointer(self.triple_indirect).to_le_bytes());
        bytes
    }

    fn from_bytes(bytes: &[u8]) -> Self {
        let mut direct = [None; DIRECT_POINTERS];
        for (i, pointer) in direct.iter_mut().enumerate() {
            *pointer = block_ref(read_u32(bytes, DIRECT_OFFSET + i * 4));
        }

        Inode {
            owner: read_u32(bytes, 0),
            group: read_u32(bytes, 4),
            ctime: read_u32(bytes, 8),
            mtime: read_u32(bytes, 12),
            atime: read_u32(bytes, 16),
            perm: read_u16(bytes, 20),
            kind: InodeKind::from_raw(bytes[22]),
            refcount: bytes[23],
            size: read_u64(bytes, 24),
            direct,
            indirect: block_ref(read_u32(bytes, INDIRECT_OFFSET)),
            double_indirect: block_ref(read_u32(bytes, INDIRECT_OFFSET + 4)),
            triple_indirect: block_ref(read_u32(bytes, INDIRECT_OFFSET + 8)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_inode_to_bytes() {
        let inode = Inode::new(InodeKind::File, 0o644, 100);
        let bytes = inode.to_bytes();
        assert_eq!(bytes.len(), Inode::size_on_disk());
    }

    #[test]
    fn test_inode_from_bytes() {
        let mut bytes = vec![0u8; INODE_SIZE];
        bytes[0..4].copy_from_slice(&1000u32.to_le_bytes());
        bytes[4..8].copy_from_slice(&100u32.to_le_bytes());
        bytes[20..22].copy_from_slice(&0o755u16.to_le_bytes());
        bytes[22] = 1;
        bytes[23] = 2;
        bytes[24..32].copy_from_slice(&(5u64 * 128).to_le_bytes());
        bytes[32..36].copy_from_slice(&9u32.to_le_bytes());
        bytes[36..40].copy_from_slice(&10u32.to_le_bytes());
        bytes[60..64].copy_from_slice(&77u32.to_le_bytes());

        let inode = Inode::from_bytes(&bytes);
        assert_eq!(inode.owner, 1000);
        assert_eq!(inode.group, 100);
        assert_eq!(inode.perm, 0o755);
        assert_eq!(inode.kind, InodeKind::Directory);
        assert_eq!(inode.refcount, 2);
        assert_eq!(inode.size, 640);
        assert_eq!(inode.direct[0], NonZeroU32::new(9));
        assert_eq!(inode.direct[1], NonZeroU32::new(10));
        assert_eq!(inode.direct[2], None);
        assert_eq!(inode.indirect, None);
        assert_eq!(inode.triple_indirect, NonZeroU32::new(77));
        assert_eq!(inode.to_bytes(), bytes);
    }

    #[test]
    fn unknown_kind_is_kept() {
        let mut bytes = Inode::new(InodeKind::File, 0, 0).to_bytes();
        bytes[22] = 6;
        assert_eq!(Inode::from_bytes(&bytes).kind, InodeKind::Other(6));
    }
}
