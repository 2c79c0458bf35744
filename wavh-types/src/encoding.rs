use crate::{WavError, WavResult};

/// Кодировка аудиовыборок (поле `audio format` чанка `fmt `)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(i16)]
pub enum SampleEncoding {
    /// Целочисленный PCM
    Pcm = 1,
    /// IEEE 754 с плавающей точкой
    IeeeFloat = 3,
}

impl SampleEncoding {
    pub fn from_i16(v: i16) -> WavResult<Self> {
        match v {
            1 => Ok(SampleEncoding::Pcm),
            3 => Ok(SampleEncoding::IeeeFloat),
            _ => Err(WavError::FormatViolation(format!(
                "Unknown sample encoding: {v}"
            ))),
        }
    }

    pub fn as_i16(&self) -> i16 {
        *self as i16
    }

    /// Короткое имя для вывода
    pub fn name(&self) -> &'static str {
        match self {
            SampleEncoding::Pcm => "pcm",
            SampleEncoding::IeeeFloat => "float",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_i16() {
        assert_eq!(SampleEncoding::from_i16(1).unwrap(), SampleEncoding::Pcm);
        assert_eq!(
            SampleEncoding::from_i16(3).unwrap(),
            SampleEncoding::IeeeFloat
        );
        assert!(SampleEncoding::from_i16(2).is_err());
        assert!(SampleEncoding::from_i16(-1).is_err());
    }

    #[test]
    fn test_as_i16() {
        assert_eq!(SampleEncoding::Pcm.as_i16(), 1);
        assert_eq!(SampleEncoding::IeeeFloat.as_i16(), 3);
    }
}
