use std::fmt;

use serde::{Serialize, Serializer};

/// Четырёхсимвольный идентификатор чанка RIFF.
///
/// Сравнивается побайтно; содержимое не обязано быть ASCII, поэтому при
/// выводе непечатаемые байты заменяются на `.`.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct FourCc(pub [u8; 4]);

impl FourCc {
    /// Контейнерный чанк
    pub const RIFF: FourCc = FourCc(*b"RIFF");
    /// Подформат контейнера
    pub const WAVE: FourCc = FourCc(*b"WAVE");
    /// Чанк-заполнитель
    pub const JUNK: FourCc = FourCc(*b"JUNK");
    /// Чанк описания формата
    pub const FMT: FourCc = FourCc(*b"fmt ");
    /// Чанк аудиоданных
    pub const DATA: FourCc = FourCc(*b"data");

    pub const fn new(bytes: [u8; 4]) -> Self {
        FourCc(bytes)
    }

    pub const fn as_bytes(&self) -> &[u8; 4] {
        &self.0
    }
}

impl From<[u8; 4]> for FourCc {
    fn from(bytes: [u8; 4]) -> Self {
        FourCc(bytes)
    }
}

impl fmt::Display for FourCc {
    fn fmt(
        &self,
        f: &mut fmt::Formatter<'_>,
    ) -> fmt::Result {
        for &b in &self.0 {
            let c = if b.is_ascii_graphic() || b == b' ' {
                b as char
            } else {
                '.'
            };
            write!(f, "{c}")?;
        }
        Ok(())
    }
}

impl fmt::Debug for FourCc {
    fn fmt(
        &self,
        f: &mut fmt::Formatter<'_>,
    ) -> fmt::Result {
        write!(f, "FourCc(\"{self}\")")
    }
}

impl Serialize for FourCc {
    fn serialize<S: Serializer>(
        &self,
        serializer: S,
    ) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}
