use serde::{Deserialize, Serialize};

use super::common::non_blank;
use crate::core::{
    PortalConfig, PortalError, PortalResult, DEFAULT_CFDI_USE, DEFAULT_PAYMENT_FORM,
    DEFAULT_TAX_SYSTEM,
};

pub const TAX_SYSTEM_LEN: usize = 3;

/// Fiscal data as typed by the customer, before validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FiscalForm {
    pub legal_name: String,
    pub tax_id: String,
    pub tax_system: String,
    pub email: Option<String>,
    pub zip: Option<String>,
    pub cfdi_use: Option<String>,
    pub payment_form: Option<String>,
}

impl Default for FiscalForm {
    fn default() -> Self {
        FiscalForm {
            legal_name: String::new(),
            tax_id: String::new(),
            tax_system: DEFAULT_TAX_SYSTEM.to_string(),
            email: None,
            zip: None,
            cfdi_use: None,
            payment_form: None,
        }
    }
}

/// Codes used when the form leaves them blank.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FiscalDefaults {
    pub cfdi_use: String,
    pub payment_form: String,
}

impl Default for FiscalDefaults {
    fn default() -> Self {
        FiscalDefaults {
            cfdi_use: DEFAULT_CFDI_USE.to_string(),
            payment_form: DEFAULT_PAYMENT_FORM.to_string(),
        }
    }
}

impl From<&PortalConfig> for FiscalDefaults {
    fn from(config: &PortalConfig) -> Self {
        FiscalDefaults {
            cfdi_use: config.cfdi_use.clone(),
            payment_form: config.payment_form.clone(),
        }
    }
}

impl FiscalForm {
    /// Checks required fields and lengths, then builds the request body.
    pub fn into_request(self, order_id: i64, defaults: &FiscalDefaults) -> PortalResult<InvoiceRequest> {
        let legal_name = non_blank(Some(self.legal_name.as_str()))
            .ok_or_else(|| PortalError::validation("La razón social es obligatoria."))?;
        let tax_id = non_blank(Some(self.tax_id.as_str()))
            .ok_or_else(|| PortalError::validation("El RFC es obligatorio."))?;
        let tax_system = non_blank(Some(self.tax_system.as_str()))
            .ok_or_else(|| PortalError::validation("El régimen fiscal es obligatorio."))?;
        // Length is checked on the raw input; padding does not count as a code.
        if tax_system != self.tax_system || tax_system.chars().count() != TAX_SYSTEM_LEN {
            return Err(PortalError::validation(
                "El régimen fiscal debe ser de 3 caracteres (ej: 601).",
            ));
        }

        Ok(InvoiceRequest {
            order_id,
            customer: CustomerInput {
                legal_name,
                tax_id,
                tax_system,
                email: non_blank(self.email.as_deref()),
                address: CustomerAddress {
                    zip: non_blank(self.zip.as_deref()),
                },
            },
            cfdi_use: non_blank(self.cfdi_use.as_deref())
                .unwrap_or_else(|| defaults.cfdi_use.clone()),
            payment_form: non_blank(self.payment_form.as_deref())
                .unwrap_or_else(|| defaults.payment_form.clone()),
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CustomerInput {
    pub legal_name: String,
    pub tax_id: String,
    pub tax_system: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    pub address: CustomerAddress,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CustomerAddress {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub zip: Option<String>,
}

/// Body of `POST /api/invoices`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InvoiceRequest {
    pub order_id: i64,
    pub customer: CustomerInput,
    pub cfdi_use: String,
    pub payment_form: String,
}

/// Response of `POST /api/invoices`. Document URLs are relative to the API base.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreatedInvoice {
    #[serde(default)]
    pub invoice_id: Option<i64>,
    pub pdf_url: String,
    #[serde(default)]
    pub zip_url: Option<String>,
}

/// What the review surface shows after a successful generation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InvoiceReview {
    pub invoice_id: Option<i64>,
    pub pdf_url: String,
    pub zip_url: Option<String>,
    pub customer_email: Option<String>,
    pub open: bool,
}

impl InvoiceReview {
    pub fn can_send_email(&self) -> bool {
        self.invoice_id.is_some()
            && self
                .customer_email
                .as_deref()
                .map_or(false, |email| !email.is_empty())
    }

    pub fn recipient_label(&self) -> String {
        match self.customer_email.as_deref() {
            Some(email) if !email.is_empty() => format!("Enviar a: {}", email),
            _ => "Sin email capturado".to_string(),
        }
    }
}
