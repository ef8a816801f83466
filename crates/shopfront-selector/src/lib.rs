pub mod selector;
pub mod source;

pub use selector::{FetchTicket, SelectOutcome, SelectorState, VariationSelector};
pub use source::VariationSource;
