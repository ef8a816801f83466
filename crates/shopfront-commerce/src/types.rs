//! Commerce REST API response types for the product variations endpoint.
//!
//! `GET /wp-json/wc/v3/products/{id}/variations` returns a bare JSON array.
//!
//! ### `price`
//! Always a string. Empty (`""`) for variations that have not been priced yet;
//! passed through unchanged and left to display code to interpret.
//!
//! ### `stock_status`
//! `"instock"`, `"outofstock"` or `"onbackorder"`. Older stores omit it on
//! variations that do not manage stock; we default to `"instock"` in that case,
//! matching how the storefront renders those variations.
//!
//! ### `attributes`
//! Only the attributes that *vary* are listed. An attribute whose `option` is
//! an empty string means "any value" and is not a real choice for the shopper.

use serde::Deserialize;

/// A single variation as returned by the commerce API.
#[derive(Debug, Deserialize)]
pub struct CommerceVariation {
    pub id: u64,

    #[serde(default)]
    pub sku: Option<String>,

    #[serde(default)]
    pub price: String,

    #[serde(default)]
    pub regular_price: Option<String>,

    #[serde(default)]
    pub sale_price: Option<String>,

    #[serde(default = "default_stock_status")]
    pub stock_status: String,

    #[serde(default)]
    pub stock_quantity: Option<i64>,

    #[serde(default)]
    pub attributes: Vec<CommerceVariationAttribute>,

    /// Sort order within the product; lower sorts first.
    #[serde(default)]
    pub menu_order: Option<i64>,
}

#[derive(Debug, Deserialize)]
pub struct CommerceVariationAttribute {
    /// Global attribute ID, `0` for product-local attributes.
    #[serde(default)]
    pub id: u64,
    pub name: String,
    #[serde(default)]
    pub option: String,
}

fn default_stock_status() -> String {
    "instock".to_string()
}
