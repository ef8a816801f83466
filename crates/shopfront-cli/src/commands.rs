use shopfront_core::{ColorOption, Variation};
use shopfront_selector::{SelectOutcome, VariationSelector, VariationSource};

use crate::Commands;

pub(crate) async fn run<S: VariationSource>(source: S, command: Commands) -> anyhow::Result<()> {
    match command {
        Commands::Colors { product_id } => {
            let mut selector = VariationSelector::new(source, |_: &Variation| {});
            let colors = selector.load(product_id).await;
            print!("{}", render_colors(product_id, colors));
            Ok(())
        }
        Commands::Select { product_id, color } => {
            let mut selector = VariationSelector::new(source, |variation: &Variation| {
                tracing::info!(variation_id = variation.id, "variation selected");
            });
            selector.load(product_id).await;

            match selector.select(&color) {
                SelectOutcome::Selected(variation) => {
                    println!("{}", serde_json::to_string_pretty(&variation)?);
                    Ok(())
                }
                outcome => anyhow::bail!(describe_rejection(product_id, &color, &outcome)),
            }
        }
    }
}

/// One line per color, in the order the product page shows them.
pub(crate) fn render_colors(product_id: u64, colors: &[ColorOption]) -> String {
    if colors.is_empty() {
        return format!("product {product_id} has no color options\n");
    }

    let mut out = String::new();
    for option in colors {
        let price = option
            .representative
            .price_decimal()
            .map_or_else(|| "-".to_owned(), |p| p.to_string());
        let marker = if option.is_available() {
            "available".to_owned()
        } else {
            format!("unavailable ({})", option.representative.stock_status)
        };
        out.push_str(&format!(
            "{:<16} #{:<10} {:>10}  {marker}\n",
            option.color, option.representative.id, price
        ));
    }
    out
}

pub(crate) fn describe_rejection(product_id: u64, color: &str, outcome: &SelectOutcome) -> String {
    match outcome {
        SelectOutcome::Unavailable => {
            format!("color \"{color}\" is out of stock for product {product_id}")
        }
        SelectOutcome::UnknownColor => {
            format!("product {product_id} has no \"{color}\" variation")
        }
        SelectOutcome::NotReady => {
            format!("variations for product {product_id} are still loading")
        }
        SelectOutcome::Selected(variation) => {
            format!("selected variation {}", variation.id)
        }
    }
}
