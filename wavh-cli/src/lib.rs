pub mod commands;
pub mod config;
pub mod error;
pub mod tone;

pub use commands::*;
pub use config::*;
pub use error::*;
pub use tone::*;
