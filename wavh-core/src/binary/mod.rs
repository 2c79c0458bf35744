//! Little-endian примитивы для полей заголовка.
//!
//! Каждая функция принимает буфер и текущее смещение, сдвигая смещение на
//! ширину поля.

mod read;
mod write;

pub use read::*;
pub use write::*;
