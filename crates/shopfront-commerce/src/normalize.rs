//! Conversion from raw commerce API shapes to [`shopfront_core::Variation`].

use shopfront_core::{StockStatus, Variation, VariationAttribute};

use crate::types::CommerceVariation;

/// Normalizes a raw [`CommerceVariation`] into a storefront [`Variation`].
///
/// Attributes with an empty option ("any value") are dropped, and names and
/// options are trimmed. Price and stock status pass through unchanged.
#[must_use]
pub fn normalize_variation(raw: CommerceVariation) -> Variation {
    let attributes = raw
        .attributes
        .into_iter()
        .filter_map(|attr| {
            let option = attr.option.trim();
            if option.is_empty() {
                return None;
            }
            Some(VariationAttribute {
                name: attr.name.trim().to_owned(),
                option: option.to_owned(),
            })
        })
        .collect();

    Variation {
        id: raw.id,
        attributes,
        price: raw.price,
        stock_status: StockStatus::from(raw.stock_status),
    }
}

/// Normalizes a page of variations, ordering them by `menu_order` while
/// keeping the API's order among equal (or absent) values.
#[must_use]
pub fn normalize_variations(mut raw: Vec<CommerceVariation>) -> Vec<Variation> {
    raw.sort_by_key(|v| v.menu_order.unwrap_or(0));
    raw.into_iter().map(normalize_variation).collect()
}
