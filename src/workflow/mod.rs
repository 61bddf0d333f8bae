pub mod machine;
pub mod state;

pub use machine::InvoiceWorkflow;
pub use state::{EmailTicket, InvoiceTicket, SearchOutcome, SearchTicket, WorkflowState};

use chrono::{NaiveDate, Utc};

/// Default search date: the current calendar day in UTC, which is how the backend buckets checks.
pub fn today_utc() -> NaiveDate {
    Utc::now().date_naive()
}
