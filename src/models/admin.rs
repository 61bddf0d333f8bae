use serde::{Deserialize, Serialize};

use super::Amount;

/// One generated invoice, as listed by `GET /api/admin/invoices`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InvoiceRow {
    pub invoice_id: i64,
    pub order_id: i64,
    pub facturapi_invoice_id: String,
    pub created_at: String,
    #[serde(default)]
    pub emailed_at: Option<String>,
    #[serde(default)]
    pub uploaded_at: Option<String>,
    #[serde(default)]
    pub media_pdf_url: Option<String>,
    #[serde(default)]
    pub media_xml_url: Option<String>,
    #[serde(default)]
    pub media_zip_url: Option<String>,
    pub folio: String,
    pub numcheque: String,
    pub fecha: String,
    #[serde(default)]
    pub total: Option<Amount>,
    #[serde(default)]
    pub customer_id: Option<i64>,
    #[serde(default)]
    pub tax_id: Option<String>,
    #[serde(default)]
    pub legal_name: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
}

/// One registered customer, as listed by `GET /api/admin/customers`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CustomerRow {
    pub id: i64,
    pub tax_id: String,
    pub legal_name: String,
    pub tax_system: String,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub zip: Option<String>,
    #[serde(default)]
    pub facturapi_customer_id: Option<String>,
    pub created_at: String,
    pub updated_at: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RowsResponse<T> {
    #[serde(default = "Vec::new")]
    pub rows: Vec<T>,
}

/// Free-text filter plus paging for the admin list endpoints.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageQuery {
    pub q: String,
    pub limit: u32,
    pub offset: u32,
}

impl PageQuery {
    pub fn query_pairs(&self) -> [(&'static str, String); 3] {
        [
            ("q", self.q.clone()),
            ("limit", self.limit.to_string()),
            ("offset", self.offset.to_string()),
        ]
    }
}
