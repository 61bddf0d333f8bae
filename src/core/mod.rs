pub mod config;
pub mod error;
pub mod notice;
pub mod sequence;

pub use self::config::*;
pub use self::error::*;
pub use self::notice::*;
pub use self::sequence::*;
