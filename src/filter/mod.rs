pub mod types;
pub mod filter;
pub mod filter_string;
pub mod filter_where;
pub mod filter_order;
pub mod whitelist;
pub mod error;

pub use types::*;
pub use error::FilterError;
pub use filter::{EntityFields, Filter, FilterData};
pub use whitelist::Whitelist;
