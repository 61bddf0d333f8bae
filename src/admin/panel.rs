use std::sync::Arc;

use crate::api::InvoicingBackend;
use crate::core::{Applied, Notice, Notices, PortalError, PortalResult, RequestSequencer};
use crate::models::{CustomerRow, InvoiceRow, PageQuery};
use crate::storage::TokenStore;

const INVOICES_FAILED: &str = "Error cargando facturas";
const CUSTOMERS_FAILED: &str = "Error cargando clientes";

/// An issued admin listing.
#[derive(Debug, Clone)]
pub struct ListTicket {
    seq: u64,
    token: String,
    page: PageQuery,
}

impl ListTicket {
    pub fn page(&self) -> &PageQuery {
        &self.page
    }

    pub fn token(&self) -> &str {
        &self.token
    }
}

/// Read-only admin view over generated invoices and registered customers.
///
/// The token is read from the store once, when the panel opens, and written back only by
/// [`AdminPanel::save_token`].
pub struct AdminPanel {
    backend: Arc<dyn InvoicingBackend>,
    store: TokenStore,
    token: String,
    filter: String,
    page_size: u32,
    invoices: Vec<InvoiceRow>,
    customers: Vec<CustomerRow>,
    sequencer: RequestSequencer,
    latest_invoices: Option<u64>,
    latest_customers: Option<u64>,
    notices: Notices,
}

impl AdminPanel {
    pub async fn open(backend: Arc<dyn InvoicingBackend>, store: TokenStore, page_size: u32) -> Self {
        let mut notices = Notices::default();
        let token = match store.load().await {
            Ok(token) => token.unwrap_or_default(),
            Err(e) => {
                notices.error(e.to_string());
                String::new()
            }
        };

        AdminPanel {
            backend,
            store,
            token,
            filter: String::new(),
            page_size,
            invoices: Vec::new(),
            customers: Vec::new(),
            sequencer: RequestSequencer::default(),
            latest_invoices: None,
            latest_customers: None,
            notices,
        }
    }

    /// Lists invoices if a token was stored; otherwise does nothing. Returns whether it queried.
    pub async fn initial_load(&mut self) -> PortalResult<bool> {
        if self.token.is_empty() {
            tracing::debug!("Sin token guardado; no se consulta al abrir");
            return Ok(false);
        }
        self.list_invoices(0).await?;
        Ok(true)
    }

    pub fn token(&self) -> &str {
        &self.token
    }

    /// Edits the in-memory token. Nothing is persisted until [`AdminPanel::save_token`].
    pub fn set_token(&mut self, token: impl Into<String>) {
        self.token = token.into();
    }

    pub async fn save_token(&mut self) -> PortalResult<()> {
        match self.store.save(&self.token).await {
            Ok(()) => {
                self.notices.success("Token guardado");
                Ok(())
            }
            Err(e) => {
                self.notices.error(e.user_message("No se pudo guardar el token"));
                Err(e)
            }
        }
    }

    pub fn filter(&self) -> &str {
        &self.filter
    }

    pub fn set_filter(&mut self, filter: impl Into<String>) {
        self.filter = filter.into();
    }

    pub fn invoices(&self) -> &[InvoiceRow] {
        &self.invoices
    }

    pub fn customers(&self) -> &[CustomerRow] {
        &self.customers
    }

    pub fn base_url(&self) -> &str {
        self.backend.base_url()
    }

    pub fn is_loading(&self) -> bool {
        self.latest_invoices.is_some() || self.latest_customers.is_some()
    }

    pub fn take_notices(&mut self) -> Vec<Notice> {
        self.notices.take()
    }

    pub async fn list_invoices(&mut self, offset: u32) -> PortalResult<Applied<usize>> {
        let ticket = self.begin_list_invoices(offset)?;
        let result = self.backend.list_invoices(&ticket.token, &ticket.page).await;
        self.finish_list_invoices(ticket, result)
    }

    pub fn begin_list_invoices(&mut self, offset: u32) -> PortalResult<ListTicket> {
        let ticket = self.ticket(offset)?;
        self.latest_invoices = Some(ticket.seq);
        Ok(ticket)
    }

    pub fn finish_list_invoices(
        &mut self,
        ticket: ListTicket,
        result: PortalResult<Vec<InvoiceRow>>,
    ) -> PortalResult<Applied<usize>> {
        if self.latest_invoices != Some(ticket.seq) {
            return Ok(Applied::Stale);
        }
        self.latest_invoices = None;

        match result {
            Ok(rows) => {
                tracing::info!("{} facturas (q={:?})", rows.len(), ticket.page.q);
                self.invoices = rows;
                Ok(Applied::Current(self.invoices.len()))
            }
            Err(e) => {
                self.notices.error(e.user_message(INVOICES_FAILED));
                Err(e)
            }
        }
    }

    pub async fn list_customers(&mut self, offset: u32) -> PortalResult<Applied<usize>> {
        let ticket = self.begin_list_customers(offset)?;
        let result = self.backend.list_customers(&ticket.token, &ticket.page).await;
        self.finish_list_customers(ticket, result)
    }

    pub fn begin_list_customers(&mut self, offset: u32) -> PortalResult<ListTicket> {
        let ticket = self.ticket(offset)?;
        self.latest_customers = Some(ticket.seq);
        Ok(ticket)
    }

    pub fn finish_list_customers(
        &mut self,
        ticket: ListTicket,
        result: PortalResult<Vec<CustomerRow>>,
    ) -> PortalResult<Applied<usize>> {
        if self.latest_customers != Some(ticket.seq) {
            return Ok(Applied::Stale);
        }
        self.latest_customers = None;

        match result {
            Ok(rows) => {
                tracing::info!("{} clientes (q={:?})", rows.len(), ticket.page.q);
                self.customers = rows;
                Ok(Applied::Current(self.customers.len()))
            }
            Err(e) => {
                self.notices.error(e.user_message(CUSTOMERS_FAILED));
                Err(e)
            }
        }
    }

    fn ticket(&mut self, offset: u32) -> PortalResult<ListTicket> {
        if self.token.is_empty() {
            let message = "Ingresa el token de administrador.";
            self.notices.warning(message);
            return Err(PortalError::validation(message));
        }

        Ok(ListTicket {
            seq: self.sequencer.next(),
            token: self.token.clone(),
            page: PageQuery {
                q: self.filter.clone(),
                limit: self.page_size,
                offset,
            },
        })
    }
}
