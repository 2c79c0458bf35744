use thiserror::Error;

use crate::FourCc;

/// Результат для операций wavh
pub type WavResult<T> = std::result::Result<T, WavError>;

/// Типы ошибок кодека заголовков WAV.
#[derive(Debug, Error)]
pub enum WavError {
    /// Левый и правый каналы разной длины
    #[error("left and right channels do not have the same number of samples: {left} != {right}")]
    StereoLengthMismatch { left: usize, right: usize },

    /// Буфер короче, чем требует заголовок
    #[error("Header truncated: need {needed} bytes at offset {offset}, buffer holds {available}")]
    Truncated {
        offset: usize,
        needed: usize,
        available: usize,
    },

    /// Неожиданный тег чанка (только при строгой проверке)
    #[error("Invalid {field} tag: expected {expected}, found {found}")]
    InvalidTag {
        field: &'static str,
        expected: FourCc,
        found: FourCc,
    },

    /// Размер аудиоданных не помещается в 32-битное поле data_size
    #[error("Payload of {bytes} bytes exceeds the 32-bit data size field")]
    PayloadTooLarge { bytes: u64 },

    /// Ошибки ввода/вывода (автоконвертируются из std::io::Error)
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Нарушение спецификации формата
    #[error("Format violation: {0}")]
    FormatViolation(String),
}

impl WavError {
    /// Удобные конструкторы
    pub fn format_violation<S: Into<String>>(s: S) -> Self {
        Self::FormatViolation(s.into())
    }

    /// Смещение, до которого должен дотягиваться буфер, чтобы разбор прошёл
    /// дальше. `None` для всех ошибок, кроме [`WavError::Truncated`].
    pub fn required_len(&self) -> Option<usize> {
        match self {
            Self::Truncated { offset, needed, .. } => Some(offset.saturating_add(*needed)),
            _ => None,
        }
    }
}
