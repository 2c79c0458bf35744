use std::path::PathBuf;

use wavh_core::CD_SAMPLE_RATE;

/// Раскладка каналов генерируемого файла.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChannelLayout {
    /// Один канал (левая частота).
    Mono,
    /// Два канала: левая и правая частоты.
    Stereo,
}

/// Полная конфигурация генерации тестового тона.
#[derive(Debug, Clone)]
pub struct ToneConfig {
    /// Раскладка каналов
    pub layout: ChannelLayout,
    /// Частота левого канала (Гц)
    pub left_freq_hz: u64,
    /// Частота правого канала (Гц), игнорируется для моно
    pub right_freq_hz: u64,
    /// Амплитуда синусоиды
    pub amplitude: i16,
    /// Длительность (секунды)
    pub duration_secs: u32,
    /// Путь к выходному .wav файлу
    pub output_path: PathBuf,
}

////////////////////////////////////////////////////////////////////////////////
// Собственные методы
////////////////////////////////////////////////////////////////////////////////

impl ToneConfig {
    /// Выборок на канал при частоте дискретизации CD.
    pub fn samples_per_channel(&self) -> usize {
        CD_SAMPLE_RATE as usize * self.duration_secs as usize
    }
}

////////////////////////////////////////////////////////////////////////////////
// Общие реализации трейтов для ChannelLayout, ToneConfig
////////////////////////////////////////////////////////////////////////////////

impl std::fmt::Display for ChannelLayout {
    fn fmt(
        &self,
        f: &mut std::fmt::Formatter<'_>,
    ) -> std::fmt::Result {
        match self {
            ChannelLayout::Mono => write!(f, "mono"),
            ChannelLayout::Stereo => write!(f, "stereo"),
        }
    }
}

impl std::str::FromStr for ChannelLayout {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "mono" | "m" | "1" => Ok(ChannelLayout::Mono),
            "stereo" | "s" | "2" => Ok(ChannelLayout::Stereo),
            _ => Err(format!("Unknown channel layout: '{s}'. Use: mono, stereo")),
        }
    }
}

impl Default for ToneConfig {
    fn default() -> Self {
        Self {
            layout: ChannelLayout::Stereo,
            left_freq_hz: 220,
            right_freq_hz: 440,
            amplitude: 24_576,
            duration_secs: 8,
            output_path: PathBuf::from("tone.wav"),
        }
    }
}

/// Парсит строку частоты в герцы.
///
/// Поддерживает суффиксы: `GHz`, `MHz`, `kHz`, `Hz` (регистронезависимо).
///
/// # Примеры
/// ```
/// use wavh_cli::config::parse_freq_hz;
/// assert_eq!(parse_freq_hz("440Hz").unwrap(), 440);
/// assert_eq!(parse_freq_hz("44.1kHz").unwrap(), 44_100);
/// assert_eq!(parse_freq_hz("220").unwrap(), 220);
/// ```
pub fn parse_freq_hz(s: &str) -> Result<u64, String> {
    let s = s.trim();
    let lower = s.to_lowercase();

    let (num_str, mult) = if let Some(v) = lower.strip_suffix("ghz") {
        (v.trim(), 1_000_000_000_f64)
    } else if let Some(v) = lower.strip_suffix("mhz") {
        (v.trim(), 1_000_000_f64)
    } else if let Some(v) = lower.strip_suffix("khz") {
        (v.trim(), 1_000_f64)
    } else if let Some(v) = lower.strip_suffix("hz") {
        (v.trim(), 1_f64)
    } else {
        // Без суффикса — число в герцах
        return s
            .parse::<u64>()
            .map_err(|e| format!("Invalid frequency '{s}': {e}"));
    };

    let n: f64 = num_str
        .parse()
        .map_err(|e| format!("Invalid frequency value '{num_str}': {e}"))?;

    if !n.is_finite() || n < 0.0 {
        return Err(format!("Invalid frequency value '{num_str}'"));
    }

    Ok((n * mult).round() as u64)
}

////////////////////////////////////////////////////////////////////////////////
// Тесты
////////////////////////////////////////////////////////////////////////////////
