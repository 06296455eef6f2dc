use crate::structure::inode::Inode;
use crate::util::format::pretty_timestamp;
use crate::util::mode::ModeBitsHelper;

/// The `ls -l` columns before the name: mode, links, owner, group, size, atime.
pub fn long_prefix(inode: &Inode) -> String {
    format!(
        "{}{:>3} {:>5} {:>5} {:>6} {}",
        inode.perm.to_permission_string(inode.kind),
        inode.refcount,
        inode.owner,
        inode.group,
        inode.size,
        pretty_timestamp(inode.atime)
    )
}

pub fn long_line(inode: &Inode, name: &str) -> String {
    format!("{} {}", long_prefix(inode), name)
}

#[cfg(test)]
mod tests {
    use crate::structure::inode::{Inode, InodeKind};

    #[test]
    fn long_line_columns() {
        let mut inode = Inode::new(InodeKind::File, 0o644, 100);
        inode.owner = 1000;
        inode.group = 50;
        inode.refcount = 1;
        inode.atime = 1_700_000_000;

        let line = super::long_line(&inode, "readme.txt");
        assert!(line.starts_with("-rw-r--r--  1  1000    50    100 "));
        assert!(line.ends_with(" 2023 readme.txt"));
    }

    #[test]
    fn shows_access_time() {
        let mut inode = Inode::new(InodeKind::File, 0o644, 0);
        inode.atime = 1_700_000_000;
        inode.mtime = 0;
        assert!(super::long_prefix(&inode).ends_with(" 2023"));
    }
}
