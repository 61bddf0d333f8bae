#![allow(dead_code)]

use std::collections::VecDeque;
use std::sync::Mutex;

use async_trait::async_trait;
use bytes::Bytes;

use factura_portal::models::{LookupQuery, PageQuery};
use factura_portal::{
    CreatedInvoice, CustomerRow, InvoiceRequest, InvoiceRow, InvoicingBackend, Order,
    PortalError, PortalResult,
};

pub const BASE: &str = "https://facturas.example.com";

/// Scripted backend: answers are queued per endpoint and every request is recorded.
#[derive(Default)]
pub struct ScriptedBackend {
    lookups: Mutex<VecDeque<PortalResult<Vec<Order>>>>,
    invoices: Mutex<VecDeque<PortalResult<CreatedInvoice>>>,
    emails: Mutex<VecDeque<PortalResult<()>>>,
    invoice_rows: Mutex<VecDeque<PortalResult<Vec<InvoiceRow>>>>,
    pub lookup_requests: Mutex<Vec<LookupQuery>>,
    pub invoice_requests: Mutex<Vec<InvoiceRequest>>,
    pub email_requests: Mutex<Vec<i64>>,
    pub admin_requests: Mutex<Vec<(String, PageQuery)>>,
}

impl ScriptedBackend {
    pub fn on_lookup(&self, result: PortalResult<Vec<Order>>) {
        self.lookups.lock().unwrap().push_back(result);
    }

    pub fn on_invoice(&self, result: PortalResult<CreatedInvoice>) {
        self.invoices.lock().unwrap().push_back(result);
    }

    pub fn on_email(&self, result: PortalResult<()>) {
        self.emails.lock().unwrap().push_back(result);
    }

    pub fn on_invoice_rows(&self, result: PortalResult<Vec<InvoiceRow>>) {
        self.invoice_rows.lock().unwrap().push_back(result);
    }

    pub fn network_calls(&self) -> usize {
        self.lookup_requests.lock().unwrap().len()
            + self.invoice_requests.lock().unwrap().len()
            + self.email_requests.lock().unwrap().len()
            + self.admin_requests.lock().unwrap().len()
    }
}

fn pop<T>(queue: &Mutex<VecDeque<PortalResult<T>>>) -> PortalResult<T> {
    queue
        .lock()
        .unwrap()
        .pop_front()
        .unwrap_or_else(|| Err(PortalError::Transport("no scripted answer".to_string())))
}

#[async_trait]
impl InvoicingBackend for ScriptedBackend {
    fn base_url(&self) -> &str {
        BASE
    }

    async fn lookup_orders(&self, query: &LookupQuery) -> PortalResult<Vec<Order>> {
        self.lookup_requests.lock().unwrap().push(query.clone());
        pop(&self.lookups)
    }

    async fn create_invoice(&self, request: &InvoiceRequest) -> PortalResult<CreatedInvoice> {
        self.invoice_requests.lock().unwrap().push(request.clone());
        pop(&self.invoices)
    }

    async fn send_invoice_email(&self, invoice_id: i64) -> PortalResult<()> {
        self.email_requests.lock().unwrap().push(invoice_id);
        pop(&self.emails)
    }

    async fn list_invoices(&self, token: &str, page: &PageQuery) -> PortalResult<Vec<InvoiceRow>> {
        self.admin_requests
            .lock()
            .unwrap()
            .push((token.to_string(), page.clone()));
        pop(&self.invoice_rows)
    }

    async fn list_customers(&self, token: &str, page: &PageQuery) -> PortalResult<Vec<CustomerRow>> {
        self.admin_requests
            .lock()
            .unwrap()
            .push((token.to_string(), page.clone()));
        Ok(Vec::new())
    }

    async fn fetch_document(&self, _url: &str) -> PortalResult<Bytes> {
        Err(PortalError::Remote { status: 404, message: None })
    }
}

pub fn order(id: i64) -> Order {
    serde_json::from_value(serde_json::json!({
        "id": id,
        "folio": format!("A-{}", id),
        "numcheque": "12345",
        "mesa": null,
        "fecha": "2024-05-01T20:15:00.000Z",
        "cierre": null,
        "total": "580.00",
        "subtotal": "500.00",
        "totalimpuesto1": "80.00"
    }))
    .unwrap()
}
