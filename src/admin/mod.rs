pub mod panel;
pub mod table;

pub use panel::{AdminPanel, ListTicket};
pub use table::{customers_table, document_links, invoices_table, DocumentLinks, TableData};
