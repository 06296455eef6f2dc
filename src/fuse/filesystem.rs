use std::ffi::OsStr;
use std::os::unix::ffi::OsStrExt;
use std::time::{Duration, SystemTime, UNIX_EPOCH};

use fuser::{FileAttr, FileType, Filesystem, ReplyAttr, ReplyData, ReplyDirectory, ReplyEntry, Request, FUSE_ROOT_ID};
use tracing::warn;

use crate::consts::InodePointer;
use crate::driver::DeviceDriver;
use crate::ops::SimpleFs;
use crate::structure::inode::{Inode, InodeKind};
use crate::util::error::Error;

const TTL: Duration = Duration::from_secs(1);
// st_blocks is counted in 512-byte units.
const STAT_BLOCK_SIZE: u64 = 512;
// FUSE reserves 1 for the root; other SFS inodes are shifted past it.
const INO_OFFSET: u64 = 2;

pub struct FuseDriver<A: DeviceDriver> {
    fs: SimpleFs<A>,
    root: InodePointer,
}

impl<A: DeviceDriver> FuseDriver<A> {
    pub fn new(fs: SimpleFs<A>) -> FuseDriver<A> {
        let root = fs.structure().get_root_inode_id();
        FuseDriver { fs, root }
    }

    fn to_fuse(&self, id: InodePointer) -> u64 {
        if id == self.root {
            FUSE_ROOT_ID
        } else {
            id as u64 + INO_OFFSET
        }
    }

    fn to_sfs(&self, ino: u64) -> Option<InodePointer> {
        if ino == FUSE_ROOT_ID {
            Some(self.root)
        } else {
            ino.checked_sub(INO_OFFSET).and_then(|id| InodePointer::try_from(id).ok())
        }
    }

    fn inode(&self, ino: u64) -> Result<Inode, Error> {
        let id = self
            .to_sfs(ino)
            .ok_or_else(|| Error::NotFound(format!("fuse inode {}", ino)))?;
        self.fs.get_inode(id)
    }

    /// Type of a directory entry's target. An unreadable inode is logged and
    /// listed as a regular file.
    fn entry_kind(&self, id: InodePointer) -> FileType {
        match self.fs.get_inode(id) {
            Ok(inode) => file_type(inode.kind),
            Err(e) => {
                log_errno("readdir", self.to_fuse(id), &e);
                FileType::RegularFile
            }
        }
    }

    fn inode_to_fileattr(&self, ino: u64, inode: &Inode) -> FileAttr {
        let block_size = self.fs.structure().get_block_size() as u64;
        let time = |seconds: u32| UNIX_EPOCH + Duration::from_secs(seconds as u64);
        FileAttr {
            ino,
            size: inode.size,
            blocks: inode.size.div_ceil(STAT_BLOCK_SIZE),
            atime: time(inode.atime),
            mtime: time(inode.mtime),
            ctime: time(inode.ctime),
            crtime: SystemTime::UNIX_EPOCH,
            kind: file_type(inode.kind),
            perm: inode.perm & 0o7777,
            nlink: inode.refcount as u32,
            uid: inode.owner,
            gid: inode.group,
            rdev: 0,
            flags: 0,
            blksize: block_size as u32,
        }
    }
}

fn file_type(kind: InodeKind) -> FileType {
    match kind {
        InodeKind::Directory => FileType::Directory,
        _ => FileType::RegularFile,
    }
}

fn log_errno(operation: &str, ino: u64, error: &Error) -> i32 {
    warn!(operation, ino, %error, "request failed");
    error.to_errno()
}

impl<A: DeviceDriver> Filesystem for FuseDriver<A> {
    fn lookup(&mut self, _req: &Request<'_>, parent: u64, name: &OsStr, reply: ReplyEntry) {
        if parent != FUSE_ROOT_ID {
            reply.error(libc::ENOENT);
            return;
        }
        let Some(name) = name.to_str() else {
            reply.error(libc::ENOENT);
            return;
        };

        match self.fs.lookup(name) {
            Ok((id, inode)) => {
                let ino = self.to_fuse(id);
                reply.entry(&TTL, &self.inode_to_fileattr(ino, &inode), 0);
            }
            Err(e) => reply.error(log_errno("lookup", parent, &e)),
        }
    }

    fn getattr(&mut self, _req: &Request<'_>, ino: u64, reply: ReplyAttr) {
        match self.inode(ino) {
            Ok(inode) => reply.attr(&TTL, &self.inode_to_fileattr(ino, &inode)),
            Err(e) => reply.error(log_errno("getattr", ino, &e)),
        }
    }

    fn read(
        &mut self,
        _req: &Request<'_>,
        ino: u64,
        _fh: u64,
        offset: i64,
        size: u32,
        _flags: i32,
        _lock_owner: Option<u64>,
        reply: ReplyData,
    ) {
        let data = match self.inode(ino).and_then(|inode| self.fs.structure().read_data(&inode)) {
            Ok(data) => data,
            Err(e) => {
                reply.error(log_errno("read", ino, &e));
                return;
            }
        };

        let start = usize::try_from(offset).unwrap_or(0).min(data.len());
        let end = start.saturating_add(size as usize).min(data.len());
        reply.data(&data[start..end]);
    }

    fn readdir(&mut self, _req: &Request<'_>, ino: u64, _fh: u64, offset: i64, mut reply: ReplyDirectory) {
        if ino != FUSE_ROOT_ID {
            reply.error(libc::ENOTDIR);
            return;
        }

        let entries = match self.fs.root_entries() {
            Ok(entries) => entries,
            Err(e) => {
                reply.error(log_errno("readdir", ino, &e));
                return;
            }
        };

        let mut listing = vec![
            (FUSE_ROOT_ID, FileType::Directory, OsStr::new(".").to_os_string()),
            (FUSE_ROOT_ID, FileType::Directory, OsStr::new("..").to_os_string()),
        ];
        for entry in &entries {
            let kind = self.entry_kind(entry.inode);
            listing.push((self.to_fuse(entry.inode), kind, OsStr::from_bytes(&entry.name).to_os_string()));
        }

        let skip = usize::try_from(offset).unwrap_or(0);
        for (i, (ino, kind, name)) in listing.into_iter().enumerate().skip(skip) {
            if reply.add(ino, (i + 1) as i64, kind, name) {
                break;
            }
        }
        reply.ok();
    }
}
