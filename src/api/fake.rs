//! In-memory backend for unit tests.

use std::collections::{HashMap, VecDeque};
use std::sync::Mutex;

use async_trait::async_trait;
use bytes::Bytes;

use super::InvoicingBackend;
use crate::core::{PortalError, PortalResult};
use crate::models::{
    CreatedInvoice, CustomerRow, InvoiceRequest, InvoiceRow, LookupQuery, Order, PageQuery,
};

pub const FAKE_BASE: &str = "https://api.example.com";

#[derive(Debug, Clone, PartialEq)]
pub enum Call {
    Lookup(LookupQuery),
    CreateInvoice(InvoiceRequest),
    SendEmail(i64),
    ListInvoices { token: String, page: PageQuery },
    ListCustomers { token: String, page: PageQuery },
    FetchDocument(String),
}

#[derive(Default)]
pub struct FakeBackend {
    pub lookups: Mutex<VecDeque<PortalResult<Vec<Order>>>>,
    pub invoices: Mutex<VecDeque<PortalResult<CreatedInvoice>>>,
    pub emails: Mutex<VecDeque<PortalResult<()>>>,
    pub invoice_rows: Mutex<VecDeque<PortalResult<Vec<InvoiceRow>>>>,
    pub customer_rows: Mutex<VecDeque<PortalResult<Vec<CustomerRow>>>>,
    pub documents: Mutex<HashMap<String, Bytes>>,
    pub calls: Mutex<Vec<Call>>,
}

impl FakeBackend {
    pub fn calls(&self) -> Vec<Call> {
        self.calls.lock().unwrap().clone()
    }

    fn record(&self, call: Call) {
        self.calls.lock().unwrap().push(call);
    }
}

fn next<T>(queue: &Mutex<VecDeque<PortalResult<T>>>) -> PortalResult<T> {
    queue
        .lock()
        .unwrap()
        .pop_front()
        .unwrap_or_else(|| Err(PortalError::Transport("sin respuesta preparada".to_string())))
}

#[async_trait]
impl InvoicingBackend for FakeBackend {
    fn base_url(&self) -> &str {
        FAKE_BASE
    }

    async fn lookup_orders(&self, query: &LookupQuery) -> PortalResult<Vec<Order>> {
        self.record(Call::Lookup(query.clone()));
        next(&self.lookups)
    }

    async fn create_invoice(&self, request: &InvoiceRequest) -> PortalResult<CreatedInvoice> {
        self.record(Call::CreateInvoice(request.clone()));
        next(&self.invoices)
    }

    async fn send_invoice_email(&self, invoice_id: i64) -> PortalResult<()> {
        self.record(Call::SendEmail(invoice_id));
        next(&self.emails)
    }

    async fn list_invoices(&self, token: &str, page: &PageQuery) -> PortalResult<Vec<InvoiceRow>> {
        self.record(Call::ListInvoices {
            token: token.to_string(),
            page: page.clone(),
        });
        next(&self.invoice_rows)
    }

    async fn list_customers(&self, token: &str, page: &PageQuery) -> PortalResult<Vec<CustomerRow>> {
        self.record(Call::ListCustomers {
            token: token.to_string(),
            page: page.clone(),
        });
        next(&self.customer_rows)
    }

    async fn fetch_document(&self, url: &str) -> PortalResult<Bytes> {
        self.record(Call::FetchDocument(url.to_string()));
        self.documents
            .lock()
            .unwrap()
            .get(url)
            .cloned()
            .ok_or(PortalError::Remote { status: 404, message: None })
    }
}

pub fn order(id: i64, numcheque: &str) -> Order {
    Order {
        id,
        folio: format!("F-{}", id),
        numcheque: numcheque.to_string(),
        mesa: None,
        fecha: "2024-05-01T20:15:00.000Z".to_string(),
        cierre: None,
        total: None,
        subtotal: None,
        totalimpuesto1: None,
    }
}
