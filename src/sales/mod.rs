//! The sales dataset: record types, the client for the remote endpoint and
//! the seller filter applied after fetching.

mod client;
mod filter;
mod record;
mod region;

pub use client::{DEFAULT_SALES_URL, SalesClient};
pub use filter::{distinct_sellers, filter_by_sellers};
pub use record::Sale;
pub use region::Region;
