use async_trait::async_trait;
use bytes::Bytes;

use crate::core::PortalResult;
use crate::models::{
    CreatedInvoice, CustomerRow, InvoiceRequest, InvoiceRow, LookupQuery, Order, PageQuery,
};

/// The invoicing backend as seen by the client.
#[async_trait]
pub trait InvoicingBackend: Send + Sync {
    /// Base URL every relative document path is resolved against.
    fn base_url(&self) -> &str;

    async fn lookup_orders(&self, query: &LookupQuery) -> PortalResult<Vec<Order>>;

    async fn create_invoice(&self, request: &InvoiceRequest) -> PortalResult<CreatedInvoice>;

    async fn send_invoice_email(&self, invoice_id: i64) -> PortalResult<()>;

    async fn list_invoices(&self, token: &str, page: &PageQuery) -> PortalResult<Vec<InvoiceRow>>;

    async fn list_customers(&self, token: &str, page: &PageQuery) -> PortalResult<Vec<CustomerRow>>;

    /// Downloads a document by absolute URL.
    async fn fetch_document(&self, url: &str) -> PortalResult<Bytes>;
}
