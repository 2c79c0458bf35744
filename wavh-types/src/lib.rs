pub mod encoding;
pub mod error;
pub mod tag;

pub use encoding::*;
pub use error::*;
pub use tag::*;
