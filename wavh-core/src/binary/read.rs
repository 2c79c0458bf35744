use byteorder::{ByteOrder, LittleEndian};

use crate::{FourCc, WavError, WavResult};

/// Возвращает `n` байт начиная с `*off` и сдвигает смещение.
fn take<'a>(
    buf: &'a [u8],
    off: &mut usize,
    n: usize,
) -> WavResult<&'a [u8]> {
    let end = off.checked_add(n).filter(|&end| end <= buf.len());

    match end {
        Some(end) => {
            let bytes = &buf[*off..end];
            *off = end;
            Ok(bytes)
        }
        None => Err(WavError::Truncated {
            offset: *off,
            needed: n,
            available: buf.len(),
        }),
    }
}

pub fn read_tag_local(
    buf: &[u8],
    off: &mut usize,
) -> WavResult<FourCc> {
    let b = take(buf, off, 4)?;
    Ok(FourCc::new([b[0], b[1], b[2], b[3]]))
}

/// Читает тег без сдвига смещения. `None`, если байт не хватает.
pub fn peek_tag_local(
    buf: &[u8],
    off: usize,
) -> Option<FourCc> {
    let mut probe = off;
    read_tag_local(buf, &mut probe).ok()
}

pub fn read_u32_local(
    buf: &[u8],
    off: &mut usize,
) -> WavResult<u32> {
    take(buf, off, 4).map(LittleEndian::read_u32)
}

pub fn read_i16_local(
    buf: &[u8],
    off: &mut usize,
) -> WavResult<i16> {
    take(buf, off, 2).map(LittleEndian::read_i16)
}

/// Пропускает `n` байт, не интерпретируя их.
pub fn skip_local(
    buf: &[u8],
    off: &mut usize,
    n: usize,
) -> WavResult<()> {
    take(buf, off, n).map(|_| ())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_read_little_endian() {
        let buf = [0x44, 0xAC, 0x00, 0x00, 0xFE, 0xFF];
        let mut off = 0;

        assert_eq!(read_u32_local(&buf, &mut off).unwrap(), 44_100);
        assert_eq!(read_i16_local(&buf, &mut off).unwrap(), -2);
        assert_eq!(off, 6);
    }

    #[test]
    fn test_read_past_end() {
        let buf = [1u8, 2, 3];
        let mut off = 1;

        match read_u32_local(&buf, &mut off) {
            Err(WavError::Truncated {
                offset,
                needed,
                available,
            }) => {
                assert_eq!((offset, needed, available), (1, 4, 3));
            }
            other => panic!("expected Truncated, got {other:?}"),
        }
        // Смещение не сдвигается при ошибке
        assert_eq!(off, 1);
    }

    #[test]
    fn test_peek_does_not_advance() {
        let buf = *b"JUNKxx";
        assert_eq!(peek_tag_local(&buf, 0), Some(FourCc::JUNK));
        assert_eq!(peek_tag_local(&buf, 3), None);
    }

    #[test]
    fn test_skip_overflow() {
        let buf = [0u8; 8];
        let mut off = 4;
        assert!(skip_local(&buf, &mut off, usize::MAX).is_err());
        assert!(skip_local(&buf, &mut off, 4).is_ok());
        assert_eq!(off, 8);
    }
}
