pub mod token_store;

pub use token_store::{TokenStore, ADMIN_TOKEN_KEY};
