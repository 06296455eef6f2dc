//! Maps an inode's logical bytes onto its block pointers.
//!
//! Pointers are consulted strictly in this order: the direct array, the
//! single-indirect block, the double-indirect block, then the triple-indirect
//! block. A pointer block at tier `k` holds `block_size / 4` pointers to tier
//! `k - 1` structures; tier 0 is file data. The first sentinel pointer met
//! anywhere ends the walk.

use tracing::{trace, warn};

use crate::consts::{BlockRef, DIRECT_POINTERS, POINTER_WIDTH};
use crate::driver::DeviceDriver;
use crate::io::IO;
use crate::structure::inode::{block_ref, Inode};
use crate::util::error::{Error, Result};
use crate::util::serializable::read_u32;

const DATA_TIER: u8 = 0;

#[derive(Debug, PartialEq, Eq, Clone, Copy)]
enum Flow {
    Continue,
    Done,
}

pub struct BlockMap<'a, A: DeviceDriver> {
    io: &'a IO<A>,
}

impl<'a, A: DeviceDriver> BlockMap<'a, A> {
    pub fn new(io: &'a IO<A>) -> BlockMap<'a, A> {
        BlockMap { io }
    }

    /// Bytes addressable through every tier of one inode.
    pub fn capacity(&self) -> u64 {
        let block_size = self.io.get_block_size() as u64;
        let fan_out = self.io.get_fan_out() as u64;
        let blocks = DIRECT_POINTERS as u64 + fan_out + fan_out * fan_out + fan_out * fan_out * fan_out;
        blocks.saturating_mul(block_size)
    }

    /// Reads the inode's whole content, `inode.size` bytes.
    pub fn read_inode(&self, inode: &Inode) -> Result<Vec<u8>> {
        self.read_bytes(inode, inode.size)
    }

    /// Returns exactly `length` bytes of the inode's content.
    pub fn read_bytes(&self, inode: &Inode, length: u64) -> Result<Vec<u8>> {
        if length == 0 {
            return Ok(Vec::new());
        }

        if inode.direct[0].is_none() {
            warn!(size = inode.size, length, "inode has no first block");
            return Err(Error::Inconsistent(format!(
                "size {} but the first direct pointer is empty",
                inode.size
            )));
        }

        let wanted = usize::try_from(length)
            .map_err(|_| Error::Truncated { expected: length, got: 0 })?;
        let reserve = length.min(self.capacity()) as usize;
        let mut walk = Walk { io: self.io, data: Vec::with_capacity(reserve), length: wanted };

        let tiers = inode
            .direct
            .iter()
            .map(|pointer| (*pointer, DATA_TIER))
            .chain([(inode.indirect, 1), (inode.double_indirect, 2), (inode.triple_indirect, 3)]);

        for (pointer, tier) in tiers {
            if walk.visit(pointer, tier)? == Flow::Done {
                break;
            }
        }

        if walk.data.len() < wanted {
            warn!(expected = length, got = walk.data.len(), "block chain ends before inode size");
            return Err(Error::Truncated { expected: length, got: walk.data.len() as u64 });
        }

        Ok(walk.data)
    }
}

struct Walk<'a, A: DeviceDriver> {
    io: &'a IO<A>,
    data: Vec<u8>,
    length: usize,
}

impl<'a, A: DeviceDriver> Walk<'a, A> {
    fn visit(&mut self, pointer: BlockRef, tier: u8) -> Result<Flow> {
        if self.data.len() >= self.length {
            return Ok(Flow::Done);
        }

        let Some(block) = pointer else {
            trace!(tier, offset = self.data.len(), "sentinel pointer");
            return Ok(Flow::Done);
        };

        let block = self.io.read_pointer(block.get())?;

        if tier == DATA_TIER {
            let count = (self.length - self.data.len()).min(block.len());
            self.data.extend_from_slice(&block[..count]);
            return Ok(Flow::Continue);
        }

        trace!(tier, offset = self.data.len(), "descend pointer block");
        for pointer in pointers(&block) {
            if self.visit(pointer, tier - 1)? == Flow::Done {
                return Ok(Flow::Done);
            }
        }

        Ok(Flow::Continue)
    }
}

fn pointers(block: &[u8]) -> impl Iterator<Item = BlockRef> + '_ {
    block.chunks_exact(POINTER_WIDTH).map(|raw| block_ref(read_u32(raw, 0)))
}
