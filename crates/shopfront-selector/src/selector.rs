//! Color-based variation selector for a single product.
//!
//! The selector owns the fetched variation list, the derived color options
//! and the shopper's current color. Every product change starts a new fetch
//! cycle identified by a [`FetchTicket`]; only the most recently issued ticket
//! may complete, so when cycles overlap the latest product always wins.
//!
//! ```text
//!            begin_load(id)                 complete_load(current ticket)
//!  Loading <──────────────── Ready/Loading ───────────────────────────────> Ready
//! ```
//!
//! A failed fetch completes into `Ready` with no colors, which looks the same
//! as a product that has no color variations.

use std::fmt::Display;

use shopfront_core::{color_options, find_variation_by_color, ColorOption, Variation};

use crate::source::VariationSource;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SelectorState {
    Loading,
    Ready,
}

/// Identifies one fetch cycle. Results carrying a stale ticket are discarded.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FetchTicket {
    product_id: u64,
    sequence: u64,
}

impl FetchTicket {
    #[must_use]
    pub fn product_id(&self) -> u64 {
        self.product_id
    }

    #[must_use]
    pub fn sequence(&self) -> u64 {
        self.sequence
    }
}

/// Result of [`VariationSelector::select`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SelectOutcome {
    /// The color was available; the callback received this variation.
    Selected(Variation),
    /// The color is listed but its representative variation is not in stock.
    Unavailable,
    /// No variation of the current product has this color.
    UnknownColor,
    /// Variations for the current product have not arrived yet.
    NotReady,
}

pub struct VariationSelector<S, F> {
    source: S,
    on_select: F,
    state: SelectorState,
    product_id: Option<u64>,
    sequence: u64,
    /// Sequence of the one fetch cycle still allowed to complete.
    pending: Option<u64>,
    variations: Vec<Variation>,
    colors: Vec<ColorOption>,
    selected_color: Option<String>,
}

impl<S, F> VariationSelector<S, F>
where
    S: VariationSource,
    F: FnMut(&Variation),
{
    /// Creates a selector in the `Loading` state with no product yet.
    pub fn new(source: S, on_select: F) -> Self {
        Self {
            source,
            on_select,
            state: SelectorState::Loading,
            product_id: None,
            sequence: 0,
            pending: None,
            variations: Vec::new(),
            colors: Vec::new(),
            selected_color: None,
        }
    }

    /// Runs a full fetch cycle for `product_id` and returns the resulting colors.
    pub async fn load(&mut self, product_id: u64) -> &[ColorOption] {
        let ticket = self.begin_load(product_id);
        let result = self.source.fetch_variations(product_id).await;
        self.complete_load(ticket, result);
        &self.colors
    }

    /// Loads `product_id` only if it differs from the current product.
    ///
    /// Returns `true` if a fetch cycle ran.
    pub async fn set_product(&mut self, product_id: u64) -> bool {
        if self.product_id == Some(product_id) && self.pending.is_none() {
            return false;
        }
        self.load(product_id).await;
        true
    }

    /// Starts a fetch cycle: enters `Loading`, clears the previous product's
    /// variations and selection, and invalidates every earlier ticket.
    pub fn begin_load(&mut self, product_id: u64) -> FetchTicket {
        self.sequence += 1;
        self.pending = Some(self.sequence);
        self.product_id = Some(product_id);
        self.state = SelectorState::Loading;
        self.variations.clear();
        self.colors.clear();
        self.selected_color = None;

        tracing::debug!(product_id, sequence = self.sequence, "variation fetch started");

        FetchTicket {
            product_id,
            sequence: self.sequence,
        }
    }

    /// Applies the outcome of the fetch identified by `ticket`.
    ///
    /// Returns `false` (and changes nothing) when the ticket is stale or was
    /// already completed. A fetch error is logged and treated as an empty
    /// variation list.
    pub fn complete_load<E: Display>(
        &mut self,
        ticket: FetchTicket,
        result: Result<Vec<Variation>, E>,
    ) -> bool {
        if self.pending != Some(ticket.sequence) {
            tracing::debug!(
                product_id = ticket.product_id,
                sequence = ticket.sequence,
                current = self.sequence,
                "discarding stale variation fetch"
            );
            return false;
        }
        self.pending = None;

        self.variations = match result {
            Ok(variations) => variations,
            Err(e) => {
                tracing::warn!(
                    product_id = ticket.product_id,
                    error = %e,
                    "variation fetch failed; showing no options"
                );
                Vec::new()
            }
        };
        self.colors = color_options(&self.variations);
        self.state = SelectorState::Ready;

        tracing::debug!(
            product_id = ticket.product_id,
            variations = self.variations.len(),
            colors = self.colors.len(),
            "variation fetch applied"
        );
        true
    }

    /// Selects `color` for the current product.
    ///
    /// Invokes the callback exactly once, with the first variation carrying
    /// that color, when the color is available. Unavailable or unknown colors
    /// and selections made while loading leave the selection untouched and do
    /// not invoke the callback.
    pub fn select(&mut self, color: &str) -> SelectOutcome {
        if self.state == SelectorState::Loading {
            return SelectOutcome::NotReady;
        }

        let Some(option) = self.colors.iter().find(|o| o.color == color) else {
            return SelectOutcome::UnknownColor;
        };
        if !option.is_available() {
            return SelectOutcome::Unavailable;
        }

        let Some(variation) = find_variation_by_color(&self.variations, color).cloned() else {
            return SelectOutcome::UnknownColor;
        };

        self.selected_color = Some(color.to_owned());
        (self.on_select)(&variation);
        SelectOutcome::Selected(variation)
    }

    #[must_use]
    pub fn state(&self) -> SelectorState {
        self.state
    }

    #[must_use]
    pub fn is_loading(&self) -> bool {
        self.state == SelectorState::Loading
    }

    #[must_use]
    pub fn product_id(&self) -> Option<u64> {
        self.product_id
    }

    #[must_use]
    pub fn colors(&self) -> &[ColorOption] {
        &self.colors
    }

    #[must_use]
    pub fn variations(&self) -> &[Variation] {
        &self.variations
    }

    #[must_use]
    pub fn selected_color(&self) -> Option<&str> {
        self.selected_color.as_deref()
    }
}

#[cfg(test)]
#[path = "selector_test.rs"]
mod tests;
