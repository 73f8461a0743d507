pub mod error;
pub mod handler;
pub mod types;
pub mod watchlist;

pub use error::FilterError;
pub use handler::ReceiptFilter;
pub use types::{FilterOutcome, ReducedBlock};
pub use watchlist::WatchedAddresses;
