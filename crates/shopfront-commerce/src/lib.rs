pub mod client;
pub mod error;
pub mod normalize;
pub mod pagination;
pub(crate) mod rate_limit;
pub mod types;

pub use client::{CommerceClient, StorefrontClient};
pub use error::CommerceError;
pub use normalize::{normalize_variation, normalize_variations};
pub use types::{CommerceVariation, CommerceVariationAttribute};
