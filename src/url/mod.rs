//! URL scope and link resolution helpers
//!
//! The crawl is confined to one network location (`host[:port]`). This module
//! provides the scope comparison used for that confinement and the href
//! resolution that turns raw anchor attributes into fetchable URLs.

mod resolve;
mod scope;

pub use resolve::resolve_href;
pub use scope::{network_location, same_scope};
