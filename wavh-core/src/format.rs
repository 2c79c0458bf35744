//! Заголовок файла RIFF/WAVE.
//!
//! Кодек распознаёт ровно одну последовательность чанков: `RIFF`, `WAVE`,
//! необязательный `JUNK`, `fmt ` (16 байт) и пару тег/размер чанка `data`.
//! Все многобайтовые числа хранятся в порядке little-endian.
//!
//! ```text
//! [0..4]    "RIFF"
//! [4..8]    container_size    u32 — байт после этого поля, включая данные
//! [8..12]   "WAVE"
//! [12..16]  "JUNK"            — необязательно
//! [16..20]  padding_size      u32
//! [20..20+N]                  — N байт заполнителя (не сохраняются)
//! [..]      "fmt "
//! [..]      format_chunk_size u32 = 16
//! [..]      sample_encoding   i16 (1 = PCM, 3 = float)
//! [..]      channel_count     i16
//! [..]      sample_rate       u32
//! [..]      byte_rate         u32
//! [..]      block_align       i16
//! [..]      bit_depth         i16
//! [..]      "data"
//! [..]      data_size         u32
//! ```
//!
//! Разбор нестрогий: теги кроме `JUNK` не сверяются с ожидаемыми и
//! сохраняются как есть. Строгая проверка доступна через
//! [`WavHeader::validate`].

use std::fmt;

use log::trace;
use serde::Serialize;

use crate::{
    binary::{
        peek_tag_local, read_i16_local, read_tag_local, read_u32_local, skip_local,
        write_i16_local, write_tag_local, write_u32_local, write_zeros_local,
    },
    FourCc, SampleEncoding, WavError, WavResult,
};

/// Размер заголовка без чанка-заполнителя
pub const WAV_HEADER_SIZE: usize = 44;

/// Размер заголовка с чанком-заполнителем, без учёта его содержимого
pub const WAV_PADDED_HEADER_BASE: usize = 52;

/// Смещение, по которому может начинаться чанк `JUNK`
pub const PADDING_TAG_OFFSET: usize = 12;

/// Размер тела чанка `fmt ` для поддерживаемого варианта формата
pub const FORMAT_CHUNK_SIZE: u32 = 16;

/// Частота дискретизации компакт-диска
pub const CD_SAMPLE_RATE: u32 = 44_100;

/// Разрядность компакт-диска
pub const CD_BIT_DEPTH: i16 = 16;

/// Чанк-заполнитель. Хранится только длина, содержимое отбрасывается.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct PaddingChunk {
    pub tag: FourCc,
    pub size: u32,
}

/// Заголовок WAV файла (44 байта или 52 + N с чанком `JUNK`)
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct WavHeader {
    container_tag: FourCc,
    container_size: u32,
    format_tag: FourCc,
    #[serde(skip_serializing_if = "Option::is_none")]
    padding: Option<PaddingChunk>,
    format_chunk_tag: FourCc,
    format_chunk_size: u32,
    sample_encoding: i16,
    channel_count: i16,
    sample_rate: u32,
    byte_rate: u32,
    block_align: i16,
    bit_depth: i16,
    data_chunk_tag: FourCc,
    data_size: u32,
}

////////////////////////////////////////////////////////////////////////////////
// Конструкторы
////////////////////////////////////////////////////////////////////////////////

impl WavHeader {
    /// Создаёт заголовок по параметрам потока.
    ///
    /// `block_align`, `byte_rate`, `data_size` и `container_size`
    /// вычисляются. Аргументы не проверяются: арифметика выполняется с
    /// переполнением по модулю ширины поля, как в самом формате.
    ///
    /// * `sample_encoding` — 1 для целых выборок, 3 для float
    /// * `channel_count` — 1 моно, 2 стерео
    /// * `sample_rate` — обычно 44 100 или 48 000
    /// * `bit_depth` — 8, 16, 24 или 32
    /// * `samples_per_channel` — зависит от длины записи
    pub fn new(
        sample_encoding: i16,
        channel_count: i16,
        sample_rate: u32,
        bit_depth: i16,
        samples_per_channel: u32,
    ) -> Self {
        let block_align = channel_count.wrapping_mul(bit_depth / 8);
        let byte_rate = (block_align as u32).wrapping_mul(sample_rate);
        let data_size = (block_align as u32).wrapping_mul(samples_per_channel);

        let mut header = WavHeader {
            container_tag: FourCc::RIFF,
            container_size: 0,
            format_tag: FourCc::WAVE,
            padding: None,
            format_chunk_tag: FourCc::FMT,
            format_chunk_size: FORMAT_CHUNK_SIZE,
            sample_encoding,
            channel_count,
            sample_rate,
            byte_rate,
            block_align,
            bit_depth,
            data_chunk_tag: FourCc::DATA,
            data_size,
        };
        header.container_size = header.expected_container_size();
        header
    }

    /// Заголовок для моно-записи качества CD (PCM, 44 100 Гц, 16 бит).
    pub fn for_mono_cd_audio(mono: &[i16]) -> Self {
        Self::new(
            SampleEncoding::Pcm.as_i16(),
            1,
            CD_SAMPLE_RATE,
            CD_BIT_DEPTH,
            mono.len() as u32,
        )
    }

    /// Заголовок для стерео-записи качества CD.
    ///
    /// Каналы разной длины нельзя перемежить в один корректный блок
    /// данных, поэтому это единственный случай, когда конструктор
    /// возвращает ошибку.
    pub fn for_stereo_cd_audio(
        left: &[i16],
        right: &[i16],
    ) -> WavResult<Self> {
        if left.len() != right.len() {
            return Err(WavError::StereoLengthMismatch {
                left: left.len(),
                right: right.len(),
            });
        }

        Ok(Self::new(
            SampleEncoding::Pcm.as_i16(),
            2,
            CD_SAMPLE_RATE,
            CD_BIT_DEPTH,
            left.len() as u32,
        ))
    }

    /// Возвращает копию заголовка с чанком `JUNK` из `size` байт.
    pub fn with_padding(
        mut self,
        size: u32,
    ) -> Self {
        self.padding = Some(PaddingChunk {
            tag: FourCc::JUNK,
            size,
        });
        self.container_size = self.expected_container_size();
        self
    }

    /// Возвращает копию заголовка без чанка `JUNK`.
    pub fn without_padding(mut self) -> Self {
        self.padding = None;
        self.container_size = self.expected_container_size();
        self
    }
}

////////////////////////////////////////////////////////////////////////////////
// Разбор и сериализация
////////////////////////////////////////////////////////////////////////////////

impl WavHeader {
    /// Разбирает заголовок из байт, прочитанных с начала файла.
    ///
    /// Буфер может содержать и данные после заголовка: они не трогаются.
    /// Если байт меньше, чем требует заголовок, возвращается
    /// [`WavError::Truncated`].
    pub fn parse(buf: &[u8]) -> WavResult<Self> {
        let mut off = 0;

        let container_tag = read_tag_local(buf, &mut off)?;
        let container_size = read_u32_local(buf, &mut off)?;
        let format_tag = read_tag_local(buf, &mut off)?;

        // Позиция фиксирована: JUNK допускается только между WAVE и fmt
        let padding = if peek_tag_local(buf, off) == Some(FourCc::JUNK) {
            let tag = read_tag_local(buf, &mut off)?;
            let size = read_u32_local(buf, &mut off)?;
            skip_local(buf, &mut off, size as usize)?;
            trace!("JUNK chunk detected: {size} bytes skipped");
            Some(PaddingChunk { tag, size })
        } else {
            None
        };

        let format_chunk_tag = read_tag_local(buf, &mut off)?;
        let format_chunk_size = read_u32_local(buf, &mut off)?;
        let sample_encoding = read_i16_local(buf, &mut off)?;
        let channel_count = read_i16_local(buf, &mut off)?;
        let sample_rate = read_u32_local(buf, &mut off)?;
        let byte_rate = read_u32_local(buf, &mut off)?;
        let block_align = read_i16_local(buf, &mut off)?;
        let bit_depth = read_i16_local(buf, &mut off)?;

        let data_chunk_tag = read_tag_local(buf, &mut off)?;
        let data_size = read_u32_local(buf, &mut off)?;

        Ok(WavHeader {
            container_tag,
            container_size,
            format_tag,
            padding,
            format_chunk_tag,
            format_chunk_size,
            sample_encoding,
            channel_count,
            sample_rate,
            byte_rate,
            block_align,
            bit_depth,
            data_chunk_tag,
            data_size,
        })
    }

    /// Сериализация заголовка в `byte_length()` байт.
    ///
    /// Содержимое чанка `JUNK` не хранится и записывается нулями.
    pub fn to_bytes(&self) -> Vec<u8> {
        let mut buf = vec![0u8; self.byte_length()];
        let mut off = 0;

        write_tag_local(&mut buf, &mut off, self.container_tag);
        write_u32_local(&mut buf, &mut off, self.container_size);
        write_tag_local(&mut buf, &mut off, self.format_tag);

        if let Some(padding) = self.padding {
            write_tag_local(&mut buf, &mut off, padding.tag);
            write_u32_local(&mut buf, &mut off, padding.size);
            write_zeros_local(&mut buf, &mut off, padding.size as usize);
        }

        write_tag_local(&mut buf, &mut off, self.format_chunk_tag);
        write_u32_local(&mut buf, &mut off, self.format_chunk_size);
        write_i16_local(&mut buf, &mut off, self.sample_encoding);
        write_i16_local(&mut buf, &mut off, self.channel_count);
        write_u32_local(&mut buf, &mut off, self.sample_rate);
        write_u32_local(&mut buf, &mut off, self.byte_rate);
        write_i16_local(&mut buf, &mut off, self.block_align);
        write_i16_local(&mut buf, &mut off, self.bit_depth);

        write_tag_local(&mut buf, &mut off, self.data_chunk_tag);
        write_u32_local(&mut buf, &mut off, self.data_size);

        debug_assert_eq!(off, buf.len());
        buf
    }

    /// Строгая проверка: фиксированные теги, размер `fmt `, известная
    /// кодировка и согласованность вычисляемых полей.
    pub fn validate(&self) -> WavResult<()> {
        check_tag("container", FourCc::RIFF, self.container_tag)?;
        check_tag("format", FourCc::WAVE, self.format_tag)?;
        if let Some(padding) = self.padding {
            check_tag("padding", FourCc::JUNK, padding.tag)?;
        }
        check_tag("format chunk", FourCc::FMT, self.format_chunk_tag)?;
        check_tag("data chunk", FourCc::DATA, self.data_chunk_tag)?;

        if self.format_chunk_size != FORMAT_CHUNK_SIZE {
            return Err(WavError::format_violation(format!(
                "format chunk size {} != {FORMAT_CHUNK_SIZE}",
                self.format_chunk_size
            )));
        }

        SampleEncoding::from_i16(self.sample_encoding)?;

        if self.channel_count < 1 {
            return Err(WavError::format_violation(format!(
                "channel count {} < 1",
                self.channel_count
            )));
        }

        if self.bit_depth <= 0 || self.bit_depth % 8 != 0 {
            return Err(WavError::format_violation(format!(
                "bit depth {} is not a positive multiple of 8",
                self.bit_depth
            )));
        }

        let block_align = self.channel_count.wrapping_mul(self.bit_depth / 8);
        if self.block_align != block_align {
            return Err(WavError::format_violation(format!(
                "block align {} != channels {} × bytes per sample {}",
                self.block_align,
                self.channel_count,
                self.bit_depth / 8,
            )));
        }

        let byte_rate = (block_align as u32).wrapping_mul(self.sample_rate);
        if self.byte_rate != byte_rate {
            return Err(WavError::format_violation(format!(
                "byte rate {} != block align {} × sample rate {}",
                self.byte_rate, block_align, self.sample_rate,
            )));
        }

        let container_size = self.expected_container_size();
        if self.container_size != container_size {
            return Err(WavError::format_violation(format!(
                "container size {} != header {} - 8 + data {}",
                self.container_size,
                self.byte_length(),
                self.data_size,
            )));
        }

        Ok(())
    }

    /// `container_size`, при котором заголовок самосогласован.
    fn expected_container_size(&self) -> u32 {
        (self.byte_length() as u32)
            .wrapping_sub(8)
            .wrapping_add(self.data_size)
    }
}

fn check_tag(
    field: &'static str,
    expected: FourCc,
    found: FourCc,
) -> WavResult<()> {
    if found != expected {
        return Err(WavError::InvalidTag {
            field,
            expected,
            found,
        });
    }
    Ok(())
}

////////////////////////////////////////////////////////////////////////////////
// Размеры и доступ к полям
////////////////////////////////////////////////////////////////////////////////

impl WavHeader {
    /// Размер заголовка в байтах при записи в файл.
    ///
    /// На 32-битных платформах насыщается до `usize::MAX`.
    pub fn byte_length(&self) -> usize {
        match self.padding {
            None => WAV_HEADER_SIZE,
            Some(padding) => WAV_PADDED_HEADER_BASE.saturating_add(padding.size as usize),
        }
    }

    /// Размер аудиоданных в байтах, следующих за заголовком.
    pub fn payload_byte_length(&self) -> usize {
        self.data_size as usize
    }

    /// Длительность записи в секундах (0, если `byte_rate` равен нулю).
    pub fn duration_secs(&self) -> f64 {
        if self.byte_rate == 0 {
            return 0.0;
        }
        self.data_size as f64 / self.byte_rate as f64
    }

    pub fn container_tag(&self) -> FourCc {
        self.container_tag
    }

    pub fn container_size(&self) -> u32 {
        self.container_size
    }

    pub fn format_tag(&self) -> FourCc {
        self.format_tag
    }

    pub fn has_padding_chunk(&self) -> bool {
        self.padding.is_some()
    }

    pub fn padding_tag(&self) -> Option<FourCc> {
        self.padding.map(|p| p.tag)
    }

    /// Длина заполнителя; 0 без чанка `JUNK`.
    pub fn padding_size(&self) -> u32 {
        self.padding.map_or(0, |p| p.size)
    }

    pub fn format_chunk_tag(&self) -> FourCc {
        self.format_chunk_tag
    }

    pub fn format_chunk_size(&self) -> u32 {
        self.format_chunk_size
    }

    pub fn sample_encoding(&self) -> i16 {
        self.sample_encoding
    }

    pub fn channel_count(&self) -> i16 {
        self.channel_count
    }

    pub fn sample_rate(&self) -> u32 {
        self.sample_rate
    }

    pub fn byte_rate(&self) -> u32 {
        self.byte_rate
    }

    pub fn block_align(&self) -> i16 {
        self.block_align
    }

    pub fn bit_depth(&self) -> i16 {
        self.bit_depth
    }

    pub fn data_chunk_tag(&self) -> FourCc {
        self.data_chunk_tag
    }

    pub fn data_size(&self) -> u32 {
        self.data_size
    }
}

////////////////////////////////////////////////////////////////////////////////
// Общие реализации трейтов для WavHeader
////////////////////////////////////////////////////////////////////////////////

impl fmt::Display for WavHeader {
    fn fmt(
        &self,
        f: &mut fmt::Formatter<'_>,
    ) -> fmt::Result {
        writeln!(f, "{:<20} {}", "container_tag", self.container_tag)?;
        writeln!(f, "{:<20} {}", "container_size", self.container_size)?;
        writeln!(f, "{:<20} {}", "format_tag", self.format_tag)?;

        if let Some(padding) = self.padding {
            writeln!(f, "{:<20} {}", "padding_tag", padding.tag)?;
            writeln!(f, "{:<20} {}", "padding_size", padding.size)?;
        }

        writeln!(f, "{:<20} {}", "format_chunk_tag", self.format_chunk_tag)?;
        writeln!(f, "{:<20} {}", "format_chunk_size", self.format_chunk_size)?;
        writeln!(f, "{:<20} {}", "sample_encoding", self.sample_encoding)?;
        writeln!(f, "{:<20} {}", "channel_count", self.channel_count)?;
        writeln!(f, "{:<20} {}", "sample_rate", self.sample_rate)?;
        writeln!(f, "{:<20} {}", "byte_rate", self.byte_rate)?;
        writeln!(f, "{:<20} {}", "block_align", self.block_align)?;
        writeln!(f, "{:<20} {}", "bit_depth", self.bit_depth)?;
        writeln!(f, "{:<20} {}", "data_chunk_tag", self.data_chunk_tag)?;
        writeln!(f, "{:<20} {}", "data_size", self.data_size)
    }
}
