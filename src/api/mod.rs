pub mod backend;
pub mod client;
pub mod error;
#[cfg(test)]
pub(crate) mod fake;
pub mod urls;

pub use backend::InvoicingBackend;
pub use client::{HttpBackend, ADMIN_TOKEN_HEADER};
pub use urls::{file_name_from_url, resolve_document_url};
