//! Reference remote client for lazypick.
//!
//! Fetches paginated people records from a dummyjson-style directory
//! endpoint and projects each record to a display label before handing the
//! page to the controller. The projection is pluggable; the default is
//! `"First Last"`.

use std::time::Duration;

mod client;
mod models;

pub use client::{DirectoryClient, RecordFormatter};
pub use models::{PersonPage, PersonRecord};

/// Default directory endpoint.
pub const DEFAULT_DIRECTORY_URL: &str = "https://dummyjson.com";

/// User-Agent string for directory requests.
pub const USER_AGENT: &str = concat!("lazypick/", env!("CARGO_PKG_VERSION"));

/// Timeout for a single page request.
pub const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// Connection establishment timeout.
pub const CONNECT_TIMEOUT: Duration = Duration::from_secs(5);
