use crate::structure::inode::InodeKind;

pub type ModeBits = u16;

const SET_UID: ModeBits = 0o4000;
const SET_GID: ModeBits = 0o2000;
const STICKY: ModeBits = 0o1000;

pub trait ModeBitsHelper {
    fn to_permission_string(&self, kind: InodeKind) -> String;
}

impl ModeBitsHelper for ModeBits {
    fn to_permission_string(&self, kind: InodeKind) -> String {
        let mode = *self;
        let bit = |mask: ModeBits, c: char| if mode & mask != 0 { c } else { '-' };
        let exec = |mask: ModeBits, special: ModeBits, set: char| match (mode & mask != 0, mode & special != 0) {
            (true, true) => set,
            (true, false) => 'x',
            (false, true) => set.to_ascii_uppercase(),
            (false, false) => '-',
        };

        let mut result = String::with_capacity(10);
        result.push(if kind == InodeKind::Directory { 'd' } else { '-' });
        result.push(bit(0o400, 'r'));
        result.push(bit(0o200, 'w'));
        result.push(exec(0o100, SET_UID, 's'));
        result.push(bit(0o040, 'r'));
        result.push(bit(0o020, 'w'));
        result.push(exec(0o010, SET_GID, 's'));
        result.push(bit(0o004, 'r'));
        result.push(bit(0o002, 'w'));
        result.push(exec(0o001, STICKY, 't'));
        result
    }
}
