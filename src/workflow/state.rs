use std::fmt;

use crate::models::{InvoiceRequest, LookupQuery};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WorkflowState {
    Idle,
    Searching,
    NoResults,
    MultipleResults,
    /// An order is selected, either picked by the user or auto-selected as the only result.
    Selected,
    GeneratingInvoice,
    InvoiceReady,
    SendingEmail,
}

impl fmt::Display for WorkflowState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            WorkflowState::Idle => "idle",
            WorkflowState::Searching => "searching",
            WorkflowState::NoResults => "no_results",
            WorkflowState::MultipleResults => "multiple_results",
            WorkflowState::Selected => "selected",
            WorkflowState::GeneratingInvoice => "generating_invoice",
            WorkflowState::InvoiceReady => "invoice_ready",
            WorkflowState::SendingEmail => "sending_email",
        };
        write!(f, "{}", name)
    }
}

/// How a lookup resolved.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SearchOutcome {
    NoResults,
    /// Exactly one order; it was auto-selected.
    Single(i64),
    Multiple(usize),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Phase {
    Idle,
    Searching,
    Settled,
}

/// An issued lookup. Pass it back to `finish_search` with the backend's answer.
#[derive(Debug, Clone)]
pub struct SearchTicket {
    pub(crate) seq: u64,
    pub(crate) query: LookupQuery,
}

impl SearchTicket {
    pub fn query(&self) -> &LookupQuery {
        &self.query
    }
}

#[derive(Debug, Clone)]
pub struct InvoiceTicket {
    pub(crate) seq: u64,
    pub(crate) epoch: u64,
    pub(crate) request: InvoiceRequest,
}

impl InvoiceTicket {
    pub fn request(&self) -> &InvoiceRequest {
        &self.request
    }
}

#[derive(Debug, Clone)]
pub struct EmailTicket {
    pub(crate) seq: u64,
    pub(crate) epoch: u64,
    pub(crate) invoice_id: i64,
    pub(crate) email: String,
}

impl EmailTicket {
    pub fn invoice_id(&self) -> i64 {
        self.invoice_id
    }

    pub fn email(&self) -> &str {
        &self.email
    }
}
