use std::path::PathBuf;

use thiserror::Error;

pub type CliResult<T> = std::result::Result<T, CliError>;

#[derive(Debug, Error)]
pub enum CliError {
    /// Ошибка кодека WAV
    #[error("WAV error: {0}")]
    Wav(#[from] wavh_types::WavError),

    /// Ошибка чтения/записи файла
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Ошибка вывода JSON
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Некорректный аргумент командной строки
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    /// Заголовок копии не совпал с исходным
    #[error("Copy verification failed: header of {0:?} differs from source")]
    VerifyMismatch(PathBuf),
}
