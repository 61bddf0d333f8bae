use std::path::{Path, PathBuf};
use std::sync::Arc;

use chrono::NaiveDate;

use super::state::{EmailTicket, InvoiceTicket, Phase, SearchOutcome, SearchTicket, WorkflowState};
use crate::api::{file_name_from_url, resolve_document_url, InvoicingBackend};
use crate::core::{Applied, Notice, Notices, PortalError, PortalResult, RequestSequencer};
use crate::models::{CreatedInvoice, FiscalDefaults, FiscalForm, InvoiceReview, LookupQuery, Order};

const LOOKUP_FAILED: &str = "Error buscando la orden.";
const INVOICE_FAILED: &str = "Error al generar la factura.";
const EMAIL_FAILED: &str = "Error enviando email.";
const SELECT_ORDER: &str = "Selecciona una orden.";

/// Customer-facing flow: look up a check, pick it, invoice it, deliver the invoice.
///
/// Every network step is split into `begin_*` (validate and mark in flight) and `finish_*`
/// (apply the backend's answer). The async methods chain both around the backend call.
/// A new search starts a new epoch; answers issued under an older epoch are dropped.
pub struct InvoiceWorkflow {
    backend: Arc<dyn InvoicingBackend>,
    defaults: FiscalDefaults,
    orders: Vec<Order>,
    selected: Option<i64>,
    review: Option<InvoiceReview>,
    phase: Phase,
    sequencer: RequestSequencer,
    epoch: u64,
    pending_invoice: Option<u64>,
    pending_email: Option<u64>,
    notices: Notices,
}

impl InvoiceWorkflow {
    pub fn new(backend: Arc<dyn InvoicingBackend>, defaults: FiscalDefaults) -> Self {
        InvoiceWorkflow {
            backend,
            defaults,
            orders: Vec::new(),
            selected: None,
            review: None,
            phase: Phase::Idle,
            sequencer: RequestSequencer::default(),
            epoch: 0,
            pending_invoice: None,
            pending_email: None,
            notices: Notices::default(),
        }
    }

    pub fn state(&self) -> WorkflowState {
        if self.phase == Phase::Searching {
            return WorkflowState::Searching;
        }
        if self.pending_email.is_some() {
            return WorkflowState::SendingEmail;
        }
        if self.pending_invoice.is_some() {
            return WorkflowState::GeneratingInvoice;
        }
        if self.review.is_some() {
            return WorkflowState::InvoiceReady;
        }
        if self.selected.is_some() {
            return WorkflowState::Selected;
        }
        match (self.phase, self.orders.len()) {
            (Phase::Settled, 0) => WorkflowState::NoResults,
            (Phase::Settled, n) if n > 1 => WorkflowState::MultipleResults,
            _ => WorkflowState::Idle,
        }
    }

    pub fn orders(&self) -> &[Order] {
        &self.orders
    }

    pub fn selected_order(&self) -> Option<&Order> {
        let id = self.selected?;
        self.orders.iter().find(|o| o.id == id)
    }

    pub fn review(&self) -> Option<&InvoiceReview> {
        self.review.as_ref()
    }

    pub fn can_generate(&self) -> bool {
        self.selected.is_some() && self.pending_invoice.is_none()
    }

    pub fn can_send_email(&self) -> bool {
        self.pending_email.is_none()
            && self.review.as_ref().map_or(false, InvoiceReview::can_send_email)
    }

    pub fn take_notices(&mut self) -> Vec<Notice> {
        self.notices.take()
    }

    // Lookup

    pub async fn search(
        &mut self,
        date: Option<NaiveDate>,
        numcheque: &str,
    ) -> PortalResult<Applied<SearchOutcome>> {
        let ticket = self.begin_search(date, numcheque)?;
        let result = self.backend.lookup_orders(&ticket.query).await;
        self.finish_search(ticket, result)
    }

    pub fn begin_search(
        &mut self,
        date: Option<NaiveDate>,
        numcheque: &str,
    ) -> PortalResult<SearchTicket> {
        let numcheque = numcheque.trim();
        let date = match date {
            Some(date) if !numcheque.is_empty() => date,
            _ => return Err(self.reject("Ingresa fecha y numcheque.")),
        };

        let seq = self.sequencer.next();
        self.epoch = seq;
        self.orders.clear();
        self.selected = None;
        self.review = None;
        self.pending_invoice = None;
        self.pending_email = None;
        self.phase = Phase::Searching;

        tracing::info!("Búsqueda #{}: numcheque {} del {}", seq, numcheque, date);

        Ok(SearchTicket {
            seq,
            query: LookupQuery {
                date,
                numcheque: numcheque.to_string(),
            },
        })
    }

    pub fn finish_search(
        &mut self,
        ticket: SearchTicket,
        result: PortalResult<Vec<Order>>,
    ) -> PortalResult<Applied<SearchOutcome>> {
        if ticket.seq != self.epoch {
            tracing::debug!("Descartando búsqueda #{} (vigente #{})", ticket.seq, self.epoch);
            return Ok(Applied::Stale);
        }

        let orders = match result {
            Ok(orders) => orders,
            Err(e) => {
                self.notices.error(e.user_message(LOOKUP_FAILED));
                self.phase = Phase::Idle;
                return Err(e);
            }
        };

        self.phase = Phase::Settled;
        self.orders = orders;

        let outcome = match self.orders.as_slice() {
            [] => {
                self.notices.info("No se encontró ninguna orden con esos datos.");
                SearchOutcome::NoResults
            }
            [only] => {
                self.selected = Some(only.id);
                SearchOutcome::Single(only.id)
            }
            many => {
                self.notices.info("Se encontraron varias. Selecciona la correcta.");
                SearchOutcome::Multiple(many.len())
            }
        };

        Ok(Applied::Current(outcome))
    }

    pub fn select_order(&mut self, id: i64) -> PortalResult<()> {
        if self.orders.iter().any(|o| o.id == id) {
            self.selected = Some(id);
            Ok(())
        } else {
            Err(self.reject(SELECT_ORDER))
        }
    }

    // Invoice generation

    pub async fn generate_invoice(
        &mut self,
        form: FiscalForm,
    ) -> PortalResult<Applied<InvoiceReview>> {
        let ticket = self.begin_invoice(form)?;
        let result = self.backend.create_invoice(&ticket.request).await;
        self.finish_invoice(ticket, result)
    }

    pub fn begin_invoice(&mut self, form: FiscalForm) -> PortalResult<InvoiceTicket> {
        if self.pending_invoice.is_some() {
            return Err(self.busy("generación de factura"));
        }
        let order_id = match self.selected {
            Some(id) => id,
            None => return Err(self.reject(SELECT_ORDER)),
        };

        let request = match form.into_request(order_id, &self.defaults) {
            Ok(request) => request,
            Err(e) => {
                self.notices.warning(e.user_message(SELECT_ORDER));
                return Err(e);
            }
        };

        let seq = self.sequencer.next();
        self.pending_invoice = Some(seq);

        Ok(InvoiceTicket {
            seq,
            epoch: self.epoch,
            request,
        })
    }

    pub fn finish_invoice(
        &mut self,
        ticket: InvoiceTicket,
        result: PortalResult<CreatedInvoice>,
    ) -> PortalResult<Applied<InvoiceReview>> {
        if ticket.epoch != self.epoch || self.pending_invoice != Some(ticket.seq) {
            tracing::debug!("Descartando factura de la petición #{}", ticket.seq);
            return Ok(Applied::Stale);
        }
        self.pending_invoice = None;

        let created = match result {
            Ok(created) => created,
            Err(e) => {
                self.notices.error(e.user_message(INVOICE_FAILED));
                return Err(e);
            }
        };

        let base = self.backend.base_url();
        let review = InvoiceReview {
            invoice_id: created.invoice_id,
            pdf_url: resolve_document_url(base, &created.pdf_url),
            zip_url: created
                .zip_url
                .as_deref()
                .filter(|url| !url.is_empty())
                .map(|url| resolve_document_url(base, url)),
            customer_email: ticket.request.customer.email,
            open: true,
        };

        tracing::info!(
            "Factura {:?} generada para la orden {}",
            review.invoice_id,
            ticket.request.order_id
        );
        self.notices.success("Factura generada.");
        self.review = Some(review.clone());

        Ok(Applied::Current(review))
    }

    pub fn close_review(&mut self) {
        if let Some(review) = self.review.as_mut() {
            review.open = false;
        }
    }

    // Delivery

    pub async fn send_invoice_email(&mut self) -> PortalResult<Applied<()>> {
        let ticket = self.begin_send_email()?;
        let result = self.backend.send_invoice_email(ticket.invoice_id).await;
        self.finish_send_email(ticket, result)
    }

    pub fn begin_send_email(&mut self) -> PortalResult<EmailTicket> {
        if self.pending_email.is_some() {
            return Err(self.busy("envío de email"));
        }
        let invoice_id = match self.review.as_ref().and_then(|r| r.invoice_id) {
            Some(id) => id,
            None => return Err(self.reject("No hay invoiceId para enviar.")),
        };
        let email = match self.review.as_ref().and_then(|r| r.customer_email.clone()) {
            Some(email) if !email.is_empty() => email,
            _ => return Err(self.reject("No capturaste email del cliente.")),
        };

        let seq = self.sequencer.next();
        self.pending_email = Some(seq);

        Ok(EmailTicket {
            seq,
            epoch: self.epoch,
            invoice_id,
            email,
        })
    }

    pub fn finish_send_email(
        &mut self,
        ticket: EmailTicket,
        result: PortalResult<()>,
    ) -> PortalResult<Applied<()>> {
        if ticket.epoch != self.epoch || self.pending_email != Some(ticket.seq) {
            return Ok(Applied::Stale);
        }
        self.pending_email = None;

        match result {
            Ok(()) => {
                self.notices.success(format!("Enviado a {}", ticket.email));
                Ok(Applied::Current(()))
            }
            Err(e) => {
                self.notices.error(e.user_message(EMAIL_FAILED));
                Err(e)
            }
        }
    }

    /// Saves the PDF, and the ZIP bundle when there is one, under `dir`.
    pub async fn download_documents(&mut self, dir: &Path) -> PortalResult<Vec<PathBuf>> {
        let (invoice_id, documents) = match self.review.as_ref() {
            Some(review) => {
                let mut documents = vec![(review.pdf_url.clone(), "pdf")];
                if let Some(zip) = &review.zip_url {
                    documents.push((zip.clone(), "zip"));
                }
                (review.invoice_id, documents)
            }
            None => return Err(self.reject("No hay factura para descargar.")),
        };

        if let Err(e) = tokio::fs::create_dir_all(dir).await {
            return Err(self.write_failed(dir, e));
        }

        let mut saved = Vec::with_capacity(documents.len());
        for (url, extension) in documents {
            let bytes = match self.backend.fetch_document(&url).await {
                Ok(bytes) => bytes,
                Err(e) => {
                    let fallback = format!("Error descargando el {}.", extension.to_uppercase());
                    self.notices.error(e.user_message(&fallback));
                    return Err(e);
                }
            };

            let name = file_name_from_url(&url)
                .filter(|name| name.ends_with(&format!(".{}", extension)))
                .unwrap_or_else(|| match invoice_id {
                    Some(id) => format!("factura-{}.{}", id, extension),
                    None => format!("factura.{}", extension),
                });
            let path = dir.join(name);
            if let Err(e) = tokio::fs::write(&path, &bytes).await {
                return Err(self.write_failed(&path, e));
            }

            self.notices.info(format!("Descargado {}", path.display()));
            saved.push(path);
        }

        Ok(saved)
    }

    fn reject(&mut self, message: &str) -> PortalError {
        self.notices.warning(message);
        PortalError::validation(message)
    }

    fn write_failed(&mut self, path: &Path, error: std::io::Error) -> PortalError {
        self.notices
            .error(format!("No se pudo guardar {}: {}", path.display(), error));
        PortalError::from(error)
    }

    fn busy(&mut self, operation: &'static str) -> PortalError {
        let error = PortalError::Busy(operation);
        self.notices.warning(error.to_string());
        error
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::fake::{order, Call, FakeBackend, FAKE_BASE};
    use crate::core::NoticeLevel;

    fn date() -> Option<NaiveDate> {
        NaiveDate::from_ymd_opt(2024, 5, 1)
    }

    fn workflow(backend: &Arc<FakeBackend>) -> InvoiceWorkflow {
        InvoiceWorkflow::new(backend.clone(), FiscalDefaults::default())
    }

    fn form(email: Option<&str>) -> FiscalForm {
        FiscalForm {
            legal_name: "Juan Pérez".to_string(),
            tax_id: "XAXX010101000".to_string(),
            tax_system: "601".to_string(),
            email: email.map(str::to_string),
            ..FiscalForm::default()
        }
    }

    fn created(id: i64) -> CreatedInvoice {
        CreatedInvoice {
            invoice_id: Some(id),
            pdf_url: format!("/files/{}.pdf", id),
            zip_url: Some(format!("/files/{}.zip", id)),
        }
    }

    #[tokio::test]
    async fn missing_inputs_are_rejected_without_io() {
        let backend = Arc::new(FakeBackend::default());
        let mut flow = workflow(&backend);

        assert!(flow.search(None, "12345").await.unwrap_err().is_validation());
        assert!(flow.search(date(), "   ").await.unwrap_err().is_validation());

        assert!(backend.calls().is_empty());
        assert_eq!(flow.state(), WorkflowState::Idle);
        let notices = flow.take_notices();
        assert_eq!(notices.len(), 2);
        assert!(notices.iter().all(|n| n.level == NoticeLevel::Warning));
    }

    #[tokio::test]
    async fn rejected_search_keeps_previous_results() {
        let backend = Arc::new(FakeBackend::default());
        backend
            .lookups
            .lock()
            .unwrap()
            .push_back(Ok(vec![order(1, "55"), order(2, "55")]));
        backend.invoices.lock().unwrap().push_back(Ok(created(99)));
        let mut flow = workflow(&backend);
        flow.search(date(), "55").await.unwrap();
        flow.select_order(2).unwrap();
        flow.generate_invoice(form(Some("juan@example.com"))).await.unwrap();
        let calls_before = backend.calls().len();

        assert!(flow.search(None, "55").await.unwrap_err().is_validation());
        assert!(flow.search(date(), "").await.unwrap_err().is_validation());

        assert_eq!(backend.calls().len(), calls_before);
        assert_eq!(flow.orders().len(), 2);
        assert_eq!(flow.selected_order().map(|o| o.id), Some(2));
        let review = flow.review().unwrap();
        assert_eq!(review.invoice_id, Some(99));
        assert!(review.open);
        assert_eq!(flow.state(), WorkflowState::InvoiceReady);
        assert!(flow.can_send_email());
    }

    #[tokio::test]
    async fn ticket_number_is_trimmed() {
        let backend = Arc::new(FakeBackend::default());
        backend.lookups.lock().unwrap().push_back(Ok(vec![]));
        let mut flow = workflow(&backend);

        flow.search(date(), " 12345 ").await.unwrap();

        match &backend.calls()[0] {
            Call::Lookup(query) => assert_eq!(query.numcheque, "12345"),
            other => panic!("unexpected {other:?}"),
        }
    }

    #[tokio::test]
    async fn lookup_failure_returns_to_idle_with_server_message() {
        let backend = Arc::new(FakeBackend::default());
        backend.lookups.lock().unwrap().push_back(Err(PortalError::Remote {
            status: 500,
            message: Some("Base de datos no disponible".to_string()),
        }));
        let mut flow = workflow(&backend);

        assert!(flow.search(date(), "1").await.unwrap_err().is_remote());
        assert_eq!(flow.state(), WorkflowState::Idle);
        assert!(flow.orders().is_empty());
        assert_eq!(flow.take_notices()[0].message, "Base de datos no disponible");
    }

    #[tokio::test]
    async fn selection_is_limited_to_current_results() {
        let backend = Arc::new(FakeBackend::default());
        backend
            .lookups
            .lock()
            .unwrap()
            .push_back(Ok(vec![order(1, "55"), order(2, "55")]));
        let mut flow = workflow(&backend);

        let outcome = flow.search(date(), "55").await.unwrap();
        assert_eq!(outcome, Applied::Current(SearchOutcome::Multiple(2)));
        assert_eq!(flow.state(), WorkflowState::MultipleResults);
        assert!(!flow.can_generate());

        assert!(flow.select_order(3).unwrap_err().is_validation());
        assert!(flow.selected_order().is_none());

        flow.select_order(2).unwrap();
        assert_eq!(flow.selected_order().map(|o| o.id), Some(2));
        assert_eq!(flow.state(), WorkflowState::Selected);
        assert!(flow.can_generate());
    }

    #[tokio::test]
    async fn stale_search_response_is_discarded() {
        let backend = Arc::new(FakeBackend::default());
        let mut flow = workflow(&backend);

        let first = flow.begin_search(date(), "111").unwrap();
        let second = flow.begin_search(date(), "222").unwrap();

        let newer = flow.finish_search(second, Ok(vec![order(2, "222")])).unwrap();
        assert_eq!(newer, Applied::Current(SearchOutcome::Single(2)));

        let older = flow.finish_search(first, Ok(vec![order(1, "111")])).unwrap();
        assert!(older.is_stale());
        assert_eq!(flow.selected_order().map(|o| o.id), Some(2));
        assert_eq!(flow.orders().len(), 1);
    }

    #[tokio::test]
    async fn invoice_answer_after_new_search_is_discarded() {
        let backend = Arc::new(FakeBackend::default());
        let mut flow = workflow(&backend);

        let search = flow.begin_search(date(), "1").unwrap();
        flow.finish_search(search, Ok(vec![order(7, "1")])).unwrap();

        let invoice = flow.begin_invoice(form(Some("a@b.mx"))).unwrap();
        assert_eq!(flow.state(), WorkflowState::GeneratingInvoice);

        let search = flow.begin_search(date(), "2").unwrap();
        flow.finish_search(search, Ok(vec![])).unwrap();

        assert!(flow.finish_invoice(invoice, Ok(created(99))).unwrap().is_stale());
        assert!(flow.review().is_none());
        assert_eq!(flow.state(), WorkflowState::NoResults);
    }

    #[tokio::test]
    async fn duplicate_generation_is_rejected_while_in_flight() {
        let backend = Arc::new(FakeBackend::default());
        let mut flow = workflow(&backend);
        let search = flow.begin_search(date(), "1").unwrap();
        flow.finish_search(search, Ok(vec![order(7, "1")])).unwrap();

        let _first = flow.begin_invoice(form(None)).unwrap();
        let err = flow.begin_invoice(form(None)).unwrap_err();
        assert!(matches!(err, PortalError::Busy(_)));
        assert!(!flow.can_generate());
    }

    #[tokio::test]
    async fn failed_generation_keeps_previous_invoice() {
        let backend = Arc::new(FakeBackend::default());
        backend.lookups.lock().unwrap().push_back(Ok(vec![order(7, "1")]));
        {
            let mut invoices = backend.invoices.lock().unwrap();
            invoices.push_back(Ok(created(99)));
            invoices.push_back(Err(PortalError::Remote { status: 422, message: None }));
        }
        let mut flow = workflow(&backend);
        flow.search(date(), "1").await.unwrap();
        flow.generate_invoice(form(Some("juan@example.com"))).await.unwrap();
        flow.take_notices();

        assert!(flow.generate_invoice(form(None)).await.is_err());

        let review = flow.review().unwrap();
        assert_eq!(review.invoice_id, Some(99));
        assert_eq!(review.customer_email.as_deref(), Some("juan@example.com"));
        assert_eq!(flow.state(), WorkflowState::InvoiceReady);
        assert_eq!(flow.take_notices()[0].message, "Error al generar la factura.");
    }

    #[tokio::test]
    async fn email_needs_captured_address() {
        let backend = Arc::new(FakeBackend::default());
        backend.lookups.lock().unwrap().push_back(Ok(vec![order(7, "1")]));
        backend.invoices.lock().unwrap().push_back(Ok(created(99)));
        let mut flow = workflow(&backend);
        flow.search(date(), "1").await.unwrap();
        flow.generate_invoice(form(Some("  "))).await.unwrap();

        assert!(!flow.can_send_email());
        assert!(flow.send_invoice_email().await.unwrap_err().is_validation());
        assert!(!backend.calls().iter().any(|c| matches!(c, Call::SendEmail(_))));
    }

    #[tokio::test]
    async fn email_success_and_failure_leave_invoice_untouched() {
        let backend = Arc::new(FakeBackend::default());
        backend.lookups.lock().unwrap().push_back(Ok(vec![order(7, "1")]));
        backend.invoices.lock().unwrap().push_back(Ok(created(99)));
        {
            let mut emails = backend.emails.lock().unwrap();
            emails.push_back(Ok(()));
            emails.push_back(Err(PortalError::Transport("connection reset".to_string())));
        }
        let mut flow = workflow(&backend);
        flow.search(date(), "1").await.unwrap();
        flow.generate_invoice(form(Some("juan@example.com"))).await.unwrap();
        flow.take_notices();

        flow.send_invoice_email().await.unwrap();
        assert_eq!(flow.take_notices()[0].message, "Enviado a juan@example.com");

        assert!(flow.send_invoice_email().await.is_err());
        assert_eq!(flow.take_notices()[0].message, "connection reset");
        assert_eq!(flow.state(), WorkflowState::InvoiceReady);
        assert!(flow.can_send_email());

        let sends = backend
            .calls()
            .into_iter()
            .filter(|c| *c == Call::SendEmail(99))
            .count();
        assert_eq!(sends, 2);
    }

    #[tokio::test]
    async fn review_closes_without_dropping_invoice() {
        let backend = Arc::new(FakeBackend::default());
        backend.lookups.lock().unwrap().push_back(Ok(vec![order(7, "1")]));
        backend.invoices.lock().unwrap().push_back(Ok(created(99)));
        let mut flow = workflow(&backend);
        flow.search(date(), "1").await.unwrap();
        flow.generate_invoice(form(None)).await.unwrap();

        assert!(flow.review().unwrap().open);
        flow.close_review();
        assert!(!flow.review().unwrap().open);
        assert_eq!(flow.state(), WorkflowState::InvoiceReady);
    }

    #[tokio::test]
    async fn documents_are_written_to_disk() {
        let backend = Arc::new(FakeBackend::default());
        backend.lookups.lock().unwrap().push_back(Ok(vec![order(7, "1")]));
        backend.invoices.lock().unwrap().push_back(Ok(CreatedInvoice {
            invoice_id: Some(99),
            pdf_url: "/files/99.pdf".to_string(),
            zip_url: Some("/api/invoices/99/zip".to_string()),
        }));
        {
            let mut documents = backend.documents.lock().unwrap();
            documents.insert(format!("{}/files/99.pdf", FAKE_BASE), "%PDF-1.7".into());
            documents.insert(format!("{}/api/invoices/99/zip", FAKE_BASE), "PK".into());
        }
        let mut flow = workflow(&backend);
        flow.search(date(), "1").await.unwrap();
        flow.generate_invoice(form(None)).await.unwrap();

        let dir = tempfile::tempdir().unwrap();
        let saved = flow.download_documents(dir.path()).await.unwrap();

        assert_eq!(saved, vec![dir.path().join("99.pdf"), dir.path().join("factura-99.zip")]);
        assert_eq!(std::fs::read(&saved[0]).unwrap(), b"%PDF-1.7");
        assert_eq!(std::fs::read(&saved[1]).unwrap(), b"PK");
    }

    #[tokio::test]
    async fn unwritable_download_target_posts_error() {
        let backend = Arc::new(FakeBackend::default());
        backend.lookups.lock().unwrap().push_back(Ok(vec![order(7, "1")]));
        backend.invoices.lock().unwrap().push_back(Ok(CreatedInvoice {
            invoice_id: Some(99),
            pdf_url: "/files/99.pdf".to_string(),
            zip_url: None,
        }));
        backend
            .documents
            .lock()
            .unwrap()
            .insert(format!("{}/files/99.pdf", FAKE_BASE), "%PDF-1.7".into());
        let mut flow = workflow(&backend);
        flow.search(date(), "1").await.unwrap();
        flow.generate_invoice(form(None)).await.unwrap();
        flow.take_notices();

        let dir = tempfile::tempdir().unwrap();
        let not_a_dir = dir.path().join("archivo");
        std::fs::write(&not_a_dir, b"x").unwrap();
        let err = flow.download_documents(&not_a_dir).await.unwrap_err();
        assert!(matches!(err, PortalError::Storage(_)));
        let notices = flow.take_notices();
        assert_eq!(notices.len(), 1);
        assert_eq!(notices[0].level, NoticeLevel::Error);

        std::fs::create_dir(dir.path().join("99.pdf")).unwrap();
        let err = flow.download_documents(dir.path()).await.unwrap_err();
        assert!(matches!(err, PortalError::Storage(_)));
        let notices = flow.take_notices();
        assert_eq!(notices.len(), 1);
        assert_eq!(notices[0].level, NoticeLevel::Error);
        assert!(notices[0].message.contains("99.pdf"));
    }

    #[tokio::test]
    async fn download_without_invoice_is_rejected() {
        let backend = Arc::new(FakeBackend::default());
        let mut flow = workflow(&backend);
        let dir = tempfile::tempdir().unwrap();
        assert!(flow.download_documents(dir.path()).await.unwrap_err().is_validation());
    }
}
