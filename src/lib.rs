//! Read-only access to simple-filesystem (SFS) disk images.
//!
//! An image is a sequence of fixed-size blocks. A superblock somewhere near the
//! start anchors an inode table holding two inodes per block; each inode
//! addresses its content through five direct pointers and one single, double
//! and triple indirect pointer. Only the root directory is interpreted.
//!
//! ```no_run
//! use sfs::config::Config;
//! use sfs::ops::{ListMode, SimpleFs};
//!
//! let fs = SimpleFs::open_image("disk.img", &Config::default())?;
//! for listing in fs.list(ListMode::Short)? {
//!     println!("{}", listing.render());
//! }
//! # Ok::<(), sfs::util::error::Error>(())
//! ```

pub mod config;
pub mod consts;
pub mod driver;
#[cfg(feature = "fuse")]
pub mod fuse;
pub mod io;
pub mod ops;
pub mod structure;
pub mod util;

pub use util::error::{Error, Result};
