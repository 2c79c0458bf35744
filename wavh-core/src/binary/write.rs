use byteorder::{ByteOrder, LittleEndian};

use crate::FourCc;

// Буфер заранее выделен под `byte_length()` байт, поэтому границы здесь
// гарантирует вызывающий код.

pub fn write_tag_local(
    buf: &mut [u8],
    off: &mut usize,
    tag: FourCc,
) {
    buf[*off..*off + 4].copy_from_slice(tag.as_bytes());
    *off += 4;
}

pub fn write_u32_local(
    buf: &mut [u8],
    off: &mut usize,
    val: u32,
) {
    LittleEndian::write_u32(&mut buf[*off..*off + 4], val);
    *off += 4;
}

pub fn write_i16_local(
    buf: &mut [u8],
    off: &mut usize,
    val: i16,
) {
    LittleEndian::write_i16(&mut buf[*off..*off + 2], val);
    *off += 2;
}

/// Заполняет `n` байт нулями.
pub fn write_zeros_local(
    buf: &mut [u8],
    off: &mut usize,
    n: usize,
) {
    buf[*off..*off + n].fill(0);
    *off += n;
}
