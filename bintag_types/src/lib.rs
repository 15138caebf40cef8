pub mod buffer;
mod error;
pub mod serde;

pub use error::*;
