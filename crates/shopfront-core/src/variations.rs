//! Product variation records and the color-selection rules built on them.
//!
//! A variation is one purchasable configuration of a product, as returned by
//! the commerce API's variations endpoint:
//!
//! ```json
//! {
//!   "id": 1,
//!   "attributes": [{ "name": "Color", "option": "Red" }],
//!   "price": "10",
//!   "stock_status": "instock"
//! }
//! ```
//!
//! ### Color attribute
//! Matched case-insensitively on the attribute *name* (`"Color"`, `"color"`,
//! `"COLOR"`), exactly on the *option* value. A variation carries at most one
//! color attribute; when several variations share a color the first one by
//! position is the representative for that color.
//!
//! ### `stock_status`
//! Only `"instock"` counts as available. `"outofstock"`, `"onbackorder"` and
//! any value the commerce API may add later are treated as unavailable, and
//! unknown values are kept verbatim so they serialize back unchanged.

use std::collections::HashSet;
use std::fmt;
use std::str::FromStr;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Attribute name (compared case-insensitively) that carries a variation's color.
pub const COLOR_ATTRIBUTE: &str = "color";

/// One `{name, option}` pair on a variation, e.g. `{"Color", "Red"}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VariationAttribute {
    pub name: String,
    pub option: String,
}

impl VariationAttribute {
    #[must_use]
    pub fn is_color(&self) -> bool {
        self.name.eq_ignore_ascii_case(COLOR_ATTRIBUTE)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum StockStatus {
    InStock,
    OutOfStock,
    OnBackorder,
    /// Any status string the storefront does not recognise.
    Other(String),
}

impl StockStatus {
    #[must_use]
    pub fn as_str(&self) -> &str {
        match self {
            StockStatus::InStock => "instock",
            StockStatus::OutOfStock => "outofstock",
            StockStatus::OnBackorder => "onbackorder",
            StockStatus::Other(raw) => raw,
        }
    }

    #[must_use]
    pub fn is_available(&self) -> bool {
        matches!(self, StockStatus::InStock)
    }
}

impl From<String> for StockStatus {
    fn from(raw: String) -> Self {
        match raw.as_str() {
            "instock" => StockStatus::InStock,
            "outofstock" => StockStatus::OutOfStock,
            "onbackorder" => StockStatus::OnBackorder,
            _ => StockStatus::Other(raw),
        }
    }
}

impl From<StockStatus> for String {
    fn from(status: StockStatus) -> Self {
        match status {
            StockStatus::Other(raw) => raw,
            known => known.as_str().to_owned(),
        }
    }
}

impl FromStr for StockStatus {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self::from(s.to_owned()))
    }
}

impl fmt::Display for StockStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A single purchasable configuration of a product.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Variation {
    /// Commerce API variation ID, unique within its product.
    pub id: u64,

    /// Ordered attribute pairs. Absent in the payload means no attributes.
    #[serde(default)]
    pub attributes: Vec<VariationAttribute>,

    /// Price as a decimal string exactly as the commerce API returns it
    /// (e.g. `"12.00"`). Currency is configured store-wide, not per variation.
    pub price: String,

    pub stock_status: StockStatus,
}

impl Variation {
    /// Returns the option of this variation's color attribute, if any.
    #[must_use]
    pub fn color(&self) -> Option<&str> {
        self.attributes
            .iter()
            .find(|attr| attr.is_color())
            .map(|attr| attr.option.as_str())
    }

    /// Returns `true` if any color attribute on this variation equals `color` exactly.
    #[must_use]
    pub fn has_color(&self, color: &str) -> bool {
        self.attributes
            .iter()
            .any(|attr| attr.is_color() && attr.option == color)
    }

    #[must_use]
    pub fn is_in_stock(&self) -> bool {
        self.stock_status.is_available()
    }

    /// Parses [`Self::price`] for display. Empty or malformed prices yield `None`.
    #[must_use]
    pub fn price_decimal(&self) -> Option<Decimal> {
        self.price.trim().parse::<Decimal>().ok()
    }
}

/// A distinct color offered for a product, paired with the variation that
/// decides its availability.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ColorOption {
    pub color: String,
    pub representative: Variation,
}

impl ColorOption {
    /// A color is selectable only when its representative variation is in stock.
    #[must_use]
    pub fn is_available(&self) -> bool {
        self.representative.is_in_stock()
    }
}

/// Collects the distinct color options across `variations`, in first-seen order.
#[must_use]
pub fn distinct_colors(variations: &[Variation]) -> Vec<String> {
    let mut seen: HashSet<&str> = HashSet::new();
    let mut colors = Vec::new();

    for attr in variations.iter().flat_map(|v| v.attributes.iter()) {
        if attr.is_color() && seen.insert(attr.option.as_str()) {
            colors.push(attr.option.clone());
        }
    }

    colors
}

/// Returns the first variation (by position) whose color attribute equals `color`.
#[must_use]
pub fn find_variation_by_color<'a>(variations: &'a [Variation], color: &str) -> Option<&'a Variation> {
    variations.iter().find(|v| v.has_color(color))
}

/// Builds one [`ColorOption`] per distinct color, each backed by its
/// representative variation.
///
/// The representative is the same variation [`find_variation_by_color`]
/// returns, so availability and selection always agree.
#[must_use]
pub fn color_options(variations: &[Variation]) -> Vec<ColorOption> {
    distinct_colors(variations)
        .into_iter()
        .filter_map(|color| {
            let representative = find_variation_by_color(variations, &color)?.clone();
            Some(ColorOption {
                color,
                representative,
            })
        })
        .collect()
}

#[cfg(test)]
#[path = "variations_test.rs"]
mod tests;
