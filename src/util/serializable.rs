/// Fixed-layout records. `from_bytes` expects at least `size_on_disk()` bytes;
/// callers slice blocks accordingly.
pub trait ByteSerializable {
    fn to_bytes(&self) -> Vec<u8>;
    fn from_bytes(bytes: &[u8]) -> Self;
}

pub trait KnownSize: ByteSerializable {
    fn size_on_disk() -> usize;
}

#[inline]
pub(crate) fn read_u16(bytes: &[u8], offset: usize) -> u16 {
    u16::from_le_bytes([bytes[offset], bytes[offset + 1]])
}

#[inline]
pub(crate) fn read_u32(bytes: &[u8], offset: usize) -> u32 {
    u32::from_le_bytes([bytes[offset], bytes[offset + 1], bytes[offset + 2], bytes[offset + 3]])
}

#[inline]
pub(crate) fn read_u64(bytes: &[u8], offset: usize) -> u64 {
    let mut raw = [0u8; 8];
    raw.copy_from_slice(&bytes[offset..offset + 8]);
    u64::from_le_bytes(raw)
}

/// Bytes of a NUL-terminated field, without the terminator. A field with no
/// NUL is taken whole.
pub(crate) fn c_string(field: &[u8]) -> &[u8] {
    match field.iter().position(|b| *b == 0) {
        Some(end) => &field[..end],
        None => field,
    }
}

/// Writes `value` into a fixed-width field, NUL padded. Longer values are cut
/// to the field width.
pub(crate) fn put_c_string(bytes: &mut Vec<u8>, value: &[u8], width: usize) {
    let len = value.len().min(width);
    bytes.extend_from_slice(&value[..len]);
    bytes.extend(std::iter::repeat(0).take(width - len));
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn little_endian_fields() {
        let bytes = [0x78, 0x56, 0x34, 0x12, 0xff, 0, 0, 0, 0, 0, 0, 0x01];
        assert_eq!(read_u16(&bytes, 0), 0x5678);
        assert_eq!(read_u32(&bytes, 0), 0x1234_5678);
        assert_eq!(read_u64(&bytes, 4), 0x0100_0000_0000_00ff);
    }

    #[test]
    fn c_strings() {
        assert_eq!(c_string(b"abc\0def"), b"abc");
        assert_eq!(c_string(b"abcd"), b"abcd");

        let mut field = Vec::new();
        put_c_string(&mut field, b"readme", 8);
        assert_eq!(field, b"readme\0\0");
    }
}
