pub mod admin;
pub mod api;
pub mod core;
pub mod models;
pub mod storage;
pub mod workflow;

// Re-export commonly used types
pub use crate::core::{Applied, Notice, NoticeLevel, PortalConfig, PortalError, PortalResult};
pub use models::{
    CreatedInvoice, CustomerInput, CustomerRow, FiscalDefaults, FiscalForm, InvoiceRequest,
    InvoiceReview, InvoiceRow, Order,
};

pub use admin::AdminPanel;
pub use api::{HttpBackend, InvoicingBackend};
pub use storage::TokenStore;
pub use workflow::{InvoiceWorkflow, SearchOutcome, WorkflowState};

/// Initialises `tracing` with `RUST_LOG`, defaulting to `info`.
pub fn init_logging() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();
}
