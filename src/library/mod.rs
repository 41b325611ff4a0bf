//! Read-only views of library content: enumeration, matching, resolution.
pub mod enumerate;
pub mod resolve;
pub mod wildcard;

pub use enumerate::{is_bundle, list_items, list_unlinked};
pub use resolve::resolve;
