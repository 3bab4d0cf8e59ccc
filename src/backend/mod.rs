//! Remote link-resolution service: doctype table, wire types and fetch client.

mod client;
mod doctype;
mod error;
mod types;

pub use client::FrappeClient;
pub use doctype::{Doctype, Resolver};
pub use error::FetchError;
pub use types::{BackendItem, Category, connection_value, parse_items};
