//! Transport layer for the Sefaria SDK.

pub mod http;

pub use http::{Download, HttpTransport};
