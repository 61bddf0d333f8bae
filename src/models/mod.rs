pub mod admin;
pub mod common;
pub mod invoice;
pub mod order;

pub use admin::*;
pub use common::*;
pub use invoice::*;
pub use order::*;
