use axum::{
    extract::{Path, State},
    Extension, Json,
};
use rust_decimal::Decimal;
use serde::Serialize;
use shopfront_core::{color_options, Variation};

use crate::middleware::RequestId;

use super::{map_commerce_error, ApiError, ApiResponse, AppState, ResponseMeta};

#[derive(Debug, Serialize)]
pub(super) struct ColorOptionItem {
    color: String,
    variation_id: u64,
    available: bool,
    stock_status: String,
    price: Option<Decimal>,
}

/// `GET /api/variations/{product_id}`: the product's variations as a bare
/// JSON array, the shape the product page's selector parses directly.
pub(super) async fn list_variations(
    State(state): State<AppState>,
    Extension(req_id): Extension<RequestId>,
    Path(product_id): Path<u64>,
) -> Result<Json<Vec<Variation>>, ApiError> {
    let variations = state
        .commerce
        .fetch_variations(product_id)
        .await
        .map_err(|e| map_commerce_error(req_id.0.clone(), product_id, &e))?;

    tracing::debug!(product_id, count = variations.len(), "served variations");
    Ok(Json(variations))
}

/// `GET /api/v1/products/{product_id}/colors`: one entry per distinct color
/// with the availability the selector would show for it.
pub(super) async fn list_color_options(
    State(state): State<AppState>,
    Extension(req_id): Extension<RequestId>,
    Path(product_id): Path<u64>,
) -> Result<Json<ApiResponse<Vec<ColorOptionItem>>>, ApiError> {
    let variations = state
        .commerce
        .fetch_variations(product_id)
        .await
        .map_err(|e| map_commerce_error(req_id.0.clone(), product_id, &e))?;

    let data = color_options(&variations)
        .into_iter()
        .map(|option| {
            let available = option.is_available();
            ColorOptionItem {
                variation_id: option.representative.id,
                available,
                stock_status: option.representative.stock_status.to_string(),
                price: option.representative.price_decimal(),
                color: option.color,
            }
        })
        .collect();

    Ok(Json(ApiResponse {
        data,
        meta: ResponseMeta::new(req_id.0),
    }))
}
