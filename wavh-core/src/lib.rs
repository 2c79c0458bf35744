//! Кодек заголовков RIFF/WAVE
//!
//! Разбор заголовка из байт начала файла, сериализация обратно в байты и
//! вычисление размеров заголовка и аудиоданных. Сам кодек работает только с
//! буферами в памяти; потоковые чтение и запись вынесены в
//! [`serialization`].
//!
//! # Быстрый старт
//!
//! ```no_run
//! use wavh_core::{WavHeader, WavWriter};
//! use std::fs::File;
//!
//! let left = vec![0i16; 44_100];
//! let right = vec![0i16; 44_100];
//!
//! let header = WavHeader::for_stereo_cd_audio(&left, &right)?;
//! let mut writer = WavWriter::new(File::create("tone.wav")?, header)?;
//! writer.write_frames(&left, &right)?;
//! writer.finish()?;
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

pub mod binary;
pub mod format;
pub mod serialization;

pub use format::*;
pub use serialization::*;
pub use wavh_types::{error, FourCc, SampleEncoding, WavError, WavResult};

/// Версия библиотеки.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
