use std::{
    fs::File,
    io::{self, BufReader, BufWriter, Read, Seek, SeekFrom, Write},
    path::Path,
};

use byteorder::{ByteOrder, LittleEndian, WriteBytesExt};
use log::debug;

use crate::{
    format::{WavHeader, WAV_HEADER_SIZE},
    WavError, WavResult,
};

/// Сколько байт читается с начала файла перед первой попыткой разбора.
/// Заголовок с большим чанком `JUNK` дочитывается по мере необходимости.
pub const HEADER_PROBE_SIZE: usize = 4096;

/// Потоковый писатель WAV файлов.
///
/// Заголовок записывается сразу, аудиоданные добавляются следом. На
/// [`finish`](WavWriter::finish) количество записанных байт сверяется с
/// `data_size` заголовка.
pub struct WavWriter<W: Write> {
    writer: BufWriter<W>,
    header: WavHeader,
    payload_written: u64,
}

/// Потоковый читатель WAV файлов.
pub struct WavReader<R: Read + Seek> {
    reader: BufReader<R>,
    header: WavHeader,
}

impl<W: Write> WavWriter<W> {
    /// Создаёт новый писатель, немедленно записывая заголовок в поток.
    pub fn new(
        inner: W,
        header: WavHeader,
    ) -> WavResult<Self> {
        let mut writer = BufWriter::new(inner);

        writer.write_all(&header.to_bytes())?;
        debug!(
            "Header written: {} bytes, payload expected {} bytes",
            header.byte_length(),
            header.payload_byte_length()
        );

        Ok(Self {
            writer,
            header,
            payload_written: 0,
        })
    }

    /// Записывает выборки в порядке little-endian.
    pub fn write_samples(
        &mut self,
        samples: &[i16],
    ) -> WavResult<()> {
        let mut bytes = vec![0u8; samples.len() * 2];
        LittleEndian::write_i16_into(samples, &mut bytes);

        self.writer.write_all(&bytes)?;
        self.payload_written += bytes.len() as u64;

        Ok(())
    }

    /// Записывает стерео кадры, чередуя левый и правый каналы.
    pub fn write_frames(
        &mut self,
        left: &[i16],
        right: &[i16],
    ) -> WavResult<()> {
        if left.len() != right.len() {
            return Err(WavError::StereoLengthMismatch {
                left: left.len(),
                right: right.len(),
            });
        }

        for (&l, &r) in left.iter().zip(right) {
            self.writer.write_i16::<LittleEndian>(l)?;
            self.writer.write_i16::<LittleEndian>(r)?;
        }
        self.payload_written += left.len() as u64 * 4;

        Ok(())
    }

    /// Записывает уже закодированные аудиоданные.
    pub fn write_payload(
        &mut self,
        bytes: &[u8],
    ) -> WavResult<()> {
        self.writer.write_all(bytes)?;
        self.payload_written += bytes.len() as u64;

        Ok(())
    }

    /// Копирует аудиоданные из `src` до его конца.
    pub fn copy_payload_from<R: Read>(
        &mut self,
        src: &mut R,
    ) -> WavResult<u64> {
        let copied = io::copy(src, &mut self.writer)?;
        self.payload_written += copied;

        Ok(copied)
    }

    /// Завершает запись: сбрасывает буфер и возвращает внутренний поток.
    pub fn finish(self) -> WavResult<W> {
        let expected = self.header.payload_byte_length() as u64;

        if self.payload_written != expected {
            return Err(WavError::FormatViolation(format!(
                "payload mismatch: header data_size={}, written={}",
                expected, self.payload_written,
            )));
        }

        let mut inner = self
            .writer
            .into_inner()
            .map_err(|e| WavError::Io(e.into_error()))?;
        inner.flush()?;

        debug!("WAV stream finished: {expected} payload bytes");
        Ok(inner)
    }

    /// Количество записанных байт аудиоданных.
    pub fn payload_written(&self) -> u64 {
        self.payload_written
    }

    /// Ссылка на записанный заголовок.
    pub fn header(&self) -> &WavHeader {
        &self.header
    }
}

impl<R: Read + Seek> WavReader<R> {
    /// Создаёт читатель: разбирает заголовок и встаёт на начало
    /// аудиоданных. Поток должен быть позиционирован на начало файла.
    pub fn new(inner: R) -> WavResult<Self> {
        let mut reader = BufReader::new(inner);
        let start = reader.stream_position()?;

        let header = read_header(&mut reader)?;
        reader.seek(SeekFrom::Start(start + header.byte_length() as u64))?;

        debug!(
            "Header parsed: {} bytes, padding chunk: {}, payload {} bytes",
            header.byte_length(),
            header.has_padding_chunk(),
            header.payload_byte_length()
        );

        Ok(Self { reader, header })
    }

    /// Читает ровно `payload_byte_length()` байт аудиоданных.
    pub fn read_payload(&mut self) -> WavResult<Vec<u8>> {
        let mut data = vec![0u8; self.header.payload_byte_length()];
        self.reader.read_exact(&mut data)?;

        Ok(data)
    }

    /// Поток аудиоданных, ограниченный `payload_byte_length()` байтами.
    pub fn payload_reader(&mut self) -> io::Take<&mut BufReader<R>> {
        let len = self.header.payload_byte_length() as u64;
        self.reader.by_ref().take(len)
    }

    /// Прочитанный заголовок файла.
    pub fn header(&self) -> &WavHeader {
        &self.header
    }
}

/// Читает и разбирает заголовок из начала потока.
///
/// Из потока может быть прочитано больше байт, чем занимает заголовок.
pub fn read_header<R: Read>(reader: &mut R) -> WavResult<WavHeader> {
    let mut buf = Vec::with_capacity(HEADER_PROBE_SIZE);
    let mut eof = fill_to(reader, &mut buf, HEADER_PROBE_SIZE)?;

    loop {
        match WavHeader::parse(&buf) {
            Ok(header) => return Ok(header),
            Err(e) => match e.required_len() {
                Some(required) if !eof => {
                    debug!("Header needs {required} bytes, have {}", buf.len());
                    eof = fill_to(reader, &mut buf, required)?;
                }
                _ => return Err(e),
            },
        }
    }
}

/// Читает заголовок из существующего WAV файла.
pub fn read_header_from_path<P: AsRef<Path>>(path: P) -> WavResult<WavHeader> {
    let mut file = File::open(path)?;
    read_header(&mut file)
}

/// Пишет моно файл качества CD: заголовок и выборки.
pub fn write_mono_cd<W: Write>(
    inner: W,
    mono: &[i16],
) -> WavResult<W> {
    check_payload_len(mono.len(), 2)?;

    let header = WavHeader::for_mono_cd_audio(mono);
    let mut writer = WavWriter::new(inner, header)?;
    writer.write_samples(mono)?;
    writer.finish()
}

/// Пишет стерео файл качества CD с чередованием каналов.
pub fn write_stereo_cd<W: Write>(
    inner: W,
    left: &[i16],
    right: &[i16],
) -> WavResult<W> {
    let header = WavHeader::for_stereo_cd_audio(left, right)?;
    check_payload_len(left.len(), 4)?;

    let mut writer = WavWriter::new(inner, header)?;
    writer.write_frames(left, right)?;
    writer.finish()
}

/// Копирует WAV файл через кодек: заголовок пересериализуется (заполнитель
/// `JUNK` становится нулями), аудиоданные переносятся без изменений.
pub fn copy_wav<R: Read + Seek, W: Write>(
    src: R,
    dst: W,
) -> WavResult<WavHeader> {
    let mut reader = WavReader::new(src)?;
    let header = reader.header().clone();

    let mut writer = WavWriter::new(dst, header.clone())?;
    writer.copy_payload_from(&mut reader.payload_reader())?;
    writer.finish()?;

    Ok(header)
}

/// Дочитывает `buf` до `len` байт. Возвращает `true`, если поток кончился
/// раньше.
fn fill_to<R: Read>(
    reader: &mut R,
    buf: &mut Vec<u8>,
    len: usize,
) -> io::Result<bool> {
    let want = len.saturating_sub(buf.len()) as u64;
    reader.by_ref().take(want).read_to_end(buf)?;

    Ok(buf.len() < len)
}

/// `container_size` и `data_size` — 32-битные поля.
fn check_payload_len(
    samples: usize,
    block_align: u64,
) -> WavResult<()> {
    let bytes = samples as u64 * block_align;
    let limit = u32::MAX as u64 - (WAV_HEADER_SIZE as u64 - 8);

    if bytes > limit {
        return Err(WavError::PayloadTooLarge { bytes });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use std::io::Cursor;

    use super::*;
    use crate::FourCc;

    fn ramp(n: usize) -> Vec<i16> {
        (0..n).map(|i| (i as i16).wrapping_mul(257)).collect()
    }

    #[test]
    fn test_write_mono_layout() {
        let samples = [1i16, -2, 0x1234];
        let out = write_mono_cd(Vec::new(), &samples).unwrap();

        assert_eq!(out.len(), 44 + 6);
        assert_eq!(&out[36..40], b"data");
        assert_eq!(&out[40..44], &[6, 0, 0, 0]);
        assert_eq!(&out[44..], &[0x01, 0x00, 0xFE, 0xFF, 0x34, 0x12]);
    }

    #[test]
    fn test_write_stereo_interleaved() {
        let left = [1i16, 3];
        let right = [2i16, 4];
        let out = write_stereo_cd(Vec::new(), &left, &right).unwrap();

        let header = WavHeader::parse(&out).unwrap();
        assert_eq!(header.channel_count(), 2);
        assert_eq!(header.data_size(), 8);
        assert_eq!(&out[44..], &[1, 0, 2, 0, 3, 0, 4, 0]);
    }

    #[test]
    fn test_write_stereo_mismatch() {
        let result = write_stereo_cd(Vec::new(), &[0; 3], &[0; 2]);
        assert!(matches!(
            result,
            Err(WavError::StereoLengthMismatch { left: 3, right: 2 })
        ));
    }

    #[test]
    fn test_write_frames_mismatch() {
        let header = WavHeader::new(1, 2, 44_100, 16, 2);
        let mut writer = WavWriter::new(Vec::new(), header).unwrap();

        assert!(writer.write_frames(&[0; 2], &[0; 1]).is_err());
        assert_eq!(writer.payload_written(), 0);
    }

    #[test]
    fn test_finish_detects_short_payload() {
        let header = WavHeader::new(1, 1, 44_100, 16, 10);
        let mut writer = WavWriter::new(Vec::new(), header).unwrap();
        writer.write_samples(&[0; 9]).unwrap();

        let err = writer.finish().unwrap_err();
        assert!(err.to_string().contains("payload mismatch"));
    }

    #[test]
    fn test_reader_round_trip() {
        let samples = ramp(1_000);
        let raw = write_mono_cd(Vec::new(), &samples).unwrap();

        let mut reader = WavReader::new(Cursor::new(raw.clone())).unwrap();
        assert_eq!(reader.header().payload_byte_length(), 2_000);

        let payload = reader.read_payload().unwrap();
        assert_eq!(payload, &raw[44..]);
    }

    #[test]
    fn test_reader_large_padding() {
        let header = WavHeader::new(1, 1, 44_100, 16, 4).with_padding(10_000);
        let mut writer = WavWriter::new(Vec::new(), header.clone()).unwrap();
        writer.write_samples(&[7, 8, 9, 10]).unwrap();
        let raw = writer.finish().unwrap();

        let mut reader = WavReader::new(Cursor::new(raw)).unwrap();
        assert_eq!(reader.header(), &header);
        assert_eq!(reader.header().byte_length(), 10_052);
        assert_eq!(reader.read_payload().unwrap(), &[7, 0, 8, 0, 9, 0, 10, 0]);
    }

    #[test]
    fn test_reader_truncated_header() {
        let raw = WavHeader::new(1, 1, 44_100, 16, 0).to_bytes();

        let result = WavReader::new(Cursor::new(raw[..30].to_vec()));
        assert!(matches!(result, Err(WavError::Truncated { available: 30, .. })));
    }

    #[test]
    fn test_reader_truncated_payload() {
        let mut raw = write_mono_cd(Vec::new(), &ramp(10)).unwrap();
        raw.truncate(50);

        let mut reader = WavReader::new(Cursor::new(raw)).unwrap();
        assert!(matches!(reader.read_payload(), Err(WavError::Io(_))));
    }

    #[test]
    fn test_copy_wav_zeroes_padding() {
        let mut src = Vec::new();
        src.extend_from_slice(b"RIFF");
        src.extend_from_slice(&(4 + 12 + 24 + 8 + 4u32).to_le_bytes());
        src.extend_from_slice(b"WAVE");
        src.extend_from_slice(b"JUNK");
        src.extend_from_slice(&4u32.to_le_bytes());
        src.extend_from_slice(b"\xDE\xAD\xBE\xEF");
        src.extend_from_slice(&WavHeader::new(1, 1, 44_100, 16, 2).to_bytes()[12..]);
        src.extend_from_slice(&[1, 0, 2, 0]);

        let mut dst = Vec::new();
        let header = copy_wav(Cursor::new(src.clone()), &mut dst).unwrap();

        assert_eq!(header.padding_tag(), Some(FourCc::JUNK));
        assert_eq!(dst.len(), src.len());
        assert_eq!(&dst[20..24], &[0, 0, 0, 0]);
        assert_eq!(&dst[24..], &src[24..]);
        assert_eq!(WavHeader::parse(&dst).unwrap(), header);
    }

    #[test]
    fn test_payload_too_large() {
        assert!(check_payload_len(1_000, 4).is_ok());
        assert!(matches!(
            check_payload_len(u32::MAX as usize, 2),
            Err(WavError::PayloadTooLarge { .. })
        ));
    }
}
