use std::fs::OpenOptions;
use std::io::{self, Write};
use std::os::unix::fs::OpenOptionsExt;
use std::path::{Path, PathBuf};

use tracing::debug;

use crate::config::Config;
use crate::consts::InodePointer;
use crate::driver::file_drive::FileDrive;
use crate::driver::DeviceDriver;
use crate::io::IO;
use crate::ops::directory::{DirEntry, Directory};
use crate::structure::inode::Inode;
use crate::structure::Structure;
use crate::util::error::{Error, Result};

pub mod directory;
pub mod meta;

const OUTPUT_MODE: u32 = 0o644;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ListMode {
    Short,
    Long,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Listing {
    pub entry: DirEntry,
    /// Present in long mode.
    pub inode: Option<Inode>,
}

impl Listing {
    /// Writes one output line. The name goes out as stored, byte for byte.
    pub fn write_to<W: Write>(&self, out: &mut W) -> io::Result<()> {
        if let Some(inode) = &self.inode {
            write!(out, "{} ", meta::long_prefix(inode))?;
        }
        out.write_all(&self.entry.name)?;
        out.write_all(b"\n")
    }

    pub fn render(&self) -> String {
        let name = self.entry.name_lossy();
        match &self.inode {
            Some(inode) => meta::long_line(inode, &name),
            None => name.into_owned(),
        }
    }
}

/// A single path component that stays inside the directory it is joined to.
fn is_plain_name(name: &str) -> bool {
    !name.is_empty() && name != "." && name != ".." && !name.contains('/')
}

/// Read-only access to one image: root directory listing and file extraction.
pub struct SimpleFs<A: DeviceDriver> {
    structure: Structure<A>,
}

impl SimpleFs<FileDrive> {
    pub fn open_image<P: AsRef<Path>>(path: P, config: &Config) -> Result<SimpleFs<FileDrive>> {
        config.validate()?;
        let io = IO::attach(path, config)?;
        SimpleFs::mount(io, config)
    }
}

impl<A: DeviceDriver> SimpleFs<A> {
    pub fn open(device: A, config: &Config) -> Result<SimpleFs<A>> {
        config.validate()?;
        let io = IO::new(device, config.block_size)?;
        SimpleFs::mount(io, config)
    }

    fn mount(io: IO<A>, config: &Config) -> Result<SimpleFs<A>> {
        let structure = Structure::mount(io, config)?;
        Ok(SimpleFs { structure })
    }

    pub fn structure(&self) -> &Structure<A> {
        &self.structure
    }

    pub fn get_inode(&self, id: InodePointer) -> Result<Inode> {
        self.structure.read_inode(id)
    }

    pub fn root_inode(&self) -> Result<Inode> {
        self.structure.get_root_inode()
    }

    fn root(&self) -> Result<Directory> {
        Ok(Directory::from_inode(self.root_inode()?))
    }

    pub fn root_entries(&self) -> Result<Vec<DirEntry>> {
        self.root()?.get_entries(&self.structure)
    }

    pub fn lookup(&self, name: &str) -> Result<(InodePointer, Inode)> {
        let id = self
            .root()?
            .find(&self.structure, name.as_bytes())?
            .ok_or_else(|| Error::NotFound(format!("{} is not in the root directory", name)))?;
        let inode = self.structure.read_inode(id)?;
        debug!(name, inode = id, size = inode.size, "lookup");
        Ok((id, inode))
    }

    pub fn read_file(&self, name: &str) -> Result<Vec<u8>> {
        let (_, inode) = self.lookup(name)?;
        self.structure.read_data(&inode)
    }

    /// Copies `name` into `dest_dir` under the same name. Nothing is created
    /// unless the whole file could be read.
    pub fn copy_out<P: AsRef<Path>>(&self, name: &str, dest_dir: P) -> Result<PathBuf> {
        if !is_plain_name(name) {
            return Err(Error::InvalidName(name.to_string()));
        }

        let data = self.read_file(name)?;
        let path = dest_dir.as_ref().join(name);

        let mut file = OpenOptions::new()
            .write(true)
            .create(true)
            .truncate(true)
            .mode(OUTPUT_MODE)
            .open(&path)?;
        file.write_all(&data)?;

        debug!(name, bytes = data.len(), path = %path.display(), "copied");
        Ok(path)
    }

    pub fn list(&self, mode: ListMode) -> Result<Vec<Listing>> {
        self.root_entries()?
            .into_iter()
            .map(|entry| -> Result<Listing> {
                let inode = match mode {
                    ListMode::Short => None,
                    ListMode::Long => Some(self.structure.read_inode(entry.inode)?),
                };
                Ok(Listing { entry, inode })
            })
            .collect()
    }

    pub fn detach(self) -> A {
        self.structure.detach()
    }
}

#[cfg(test)]
mod tests {
    use super::{is_plain_name, Listing};
    use crate::ops::directory::DirEntry;
    use crate::structure::inode::{Inode, InodeKind};

    #[test]
    fn plain_names() {
        assert!(is_plain_name("readme.txt"));
        assert!(is_plain_name("..hidden"));
        assert!(!is_plain_name(""));
        assert!(!is_plain_name(".."));
        assert!(!is_plain_name("../escape"));
        assert!(!is_plain_name("/etc/passwd"));
    }

    #[test]
    fn names_are_written_raw() {
        let listing = Listing { entry: DirEntry { name: vec![0xff, b'a'], inode: 1 }, inode: None };
        let mut out = Vec::new();
        listing.write_to(&mut out).unwrap();
        assert_eq!(out, vec![0xff, b'a', b'\n']);
    }

    #[test]
    fn long_line_keeps_raw_name() {
        let mut inode = Inode::new(InodeKind::File, 0o644, 7);
        inode.atime = 1_700_000_000;
        let listing = Listing { entry: DirEntry { name: vec![b'x', 0xfe], inode: 1 }, inode: Some(inode) };

        let mut out = Vec::new();
        listing.write_to(&mut out).unwrap();
        assert!(out.starts_with(b"-rw-r--r--  1     0     0      7 "));
        assert!(out.ends_with(&[b' ', b'x', 0xfe, b'\n']));
    }
}
