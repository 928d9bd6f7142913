use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Product listed by a supplier on the marketplace
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    pub id: i64,
    pub name: String,
    #[serde(default)]
    pub price: Option<String>,
    #[serde(default)]
    pub image: Option<String>,
    #[serde(default)]
    pub supplier_name: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
}

impl Product {
    /// Supplier label used in inquiry confirmations.
    pub fn supplier_label(&self) -> &str {
        self.supplier_name.as_deref().unwrap_or("the supplier")
    }
}

/// Inquiry sent by a buyer about a product
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Inquiry {
    pub id: i64,
    pub product_id: i64,
    pub user_id: String,
    #[serde(default)]
    pub supplier_name: Option<String>,
    pub subject: String,
    pub message: String,
    pub created_at: DateTime<Utc>,
    #[serde(default)]
    pub updated_at: Option<DateTime<Utc>>,
}
