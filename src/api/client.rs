use async_trait::async_trait;
use bytes::Bytes;
use serde::de::DeserializeOwned;

use super::backend::InvoicingBackend;
use super::error::remote_error;
use crate::core::{PortalConfig, PortalResult};
use crate::models::{
    CreatedInvoice, CustomerRow, InvoiceRequest, InvoiceRow, LookupQuery, LookupResponse, Order,
    PageQuery, RowsResponse,
};

pub const ADMIN_TOKEN_HEADER: &str = "x-admin-token";

/// `reqwest` implementation of [`InvoicingBackend`]. No timeouts are set.
#[derive(Clone)]
pub struct HttpBackend {
    client: reqwest::Client,
    base_url: String,
}

impl HttpBackend {
    pub fn new(config: &PortalConfig) -> PortalResult<Self> {
        let client = reqwest::Client::builder()
            .user_agent(concat!("factura-portal/", env!("CARGO_PKG_VERSION")))
            .build()?;

        Ok(HttpBackend {
            client,
            base_url: config.api_base.clone(),
        })
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    async fn read_body(response: reqwest::Response) -> PortalResult<Bytes> {
        let status = response.status();
        let body = response.bytes().await?;

        if !status.is_success() {
            tracing::warn!("Backend respondió {}", status);
            return Err(remote_error(status.as_u16(), &body));
        }

        Ok(body)
    }

    async fn read_json<T: DeserializeOwned>(response: reqwest::Response) -> PortalResult<T> {
        let body = Self::read_body(response).await?;
        Ok(serde_json::from_slice(&body)?)
    }
}

#[async_trait]
impl InvoicingBackend for HttpBackend {
    fn base_url(&self) -> &str {
        &self.base_url
    }

    async fn lookup_orders(&self, query: &LookupQuery) -> PortalResult<Vec<Order>> {
        tracing::debug!("Buscando orden {} del {}", query.numcheque, query.date);

        let response = self
            .client
            .get(self.endpoint("/api/orders/lookup"))
            .query(&query.query_pairs())
            .send()
            .await?;

        let data: LookupResponse = Self::read_json(response).await?;
        Ok(data.orders)
    }

    async fn create_invoice(&self, request: &InvoiceRequest) -> PortalResult<CreatedInvoice> {
        tracing::debug!("Generando factura para la orden {}", request.order_id);

        let response = self
            .client
            .post(self.endpoint("/api/invoices"))
            .json(request)
            .send()
            .await?;

        Self::read_json(response).await
    }

    async fn send_invoice_email(&self, invoice_id: i64) -> PortalResult<()> {
        let response = self
            .client
            .post(self.endpoint(&format!("/api/invoices/{}/send-email", invoice_id)))
            .header(reqwest::header::CONTENT_TYPE, "application/json")
            .send()
            .await?;

        Self::read_body(response).await?;
        Ok(())
    }

    async fn list_invoices(&self, token: &str, page: &PageQuery) -> PortalResult<Vec<InvoiceRow>> {
        let response = self
            .client
            .get(self.endpoint("/api/admin/invoices"))
            .query(&page.query_pairs())
            .header(ADMIN_TOKEN_HEADER, token)
            .send()
            .await?;

        let data: RowsResponse<InvoiceRow> = Self::read_json(response).await?;
        Ok(data.rows)
    }

    async fn list_customers(&self, token: &str, page: &PageQuery) -> PortalResult<Vec<CustomerRow>> {
        let response = self
            .client
            .get(self.endpoint("/api/admin/customers"))
            .query(&page.query_pairs())
            .header(ADMIN_TOKEN_HEADER, token)
            .send()
            .await?;

        let data: RowsResponse<CustomerRow> = Self::read_json(response).await?;
        Ok(data.rows)
    }

    async fn fetch_document(&self, url: &str) -> PortalResult<Bytes> {
        let response = self.client.get(url).send().await?;
        Self::read_body(response).await
    }
}
