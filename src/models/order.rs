use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;

use super::{display_amount, Amount};

/// A dining check as returned by the lookup endpoint. Never mutated by the client.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Order {
    pub id: i64,
    pub folio: String,
    pub numcheque: String,
    #[serde(default)]
    pub mesa: Option<String>,
    /// ISO-8601 timestamp, kept as sent.
    pub fecha: String,
    #[serde(default)]
    pub cierre: Option<String>,
    #[serde(default)]
    pub total: Option<Amount>,
    #[serde(default)]
    pub subtotal: Option<Amount>,
    #[serde(default)]
    pub totalimpuesto1: Option<Amount>,
}

impl Order {
    /// Second line of a result entry: date, table and total.
    pub fn detail_line(&self) -> String {
        let mut line = format!("Fecha: {}", self.fecha);
        if let Some(mesa) = self.mesa.as_deref().filter(|m| !m.is_empty()) {
            line.push_str(&format!(" · Mesa: {}", mesa));
        }
        line.push_str(&format!(" · Total: {}", display_amount(&self.total)));
        line
    }
}

impl fmt::Display for Order {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Folio: {} · Numcheque: {} · ID: {}",
            self.folio, self.numcheque, self.id
        )
    }
}

/// Parameters of `GET /api/orders/lookup`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LookupQuery {
    pub date: NaiveDate,
    pub numcheque: String,
}

impl LookupQuery {
    pub fn query_pairs(&self) -> [(&'static str, String); 2] {
        [
            ("date", self.date.format("%Y-%m-%d").to_string()),
            ("numcheque", self.numcheque.clone()),
        ]
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct LookupResponse {
    #[serde(default)]
    pub orders: Vec<Order>,
}
