// Core types and functionality for the Sefaria MCP server

pub mod calendar;
pub mod manuscript;
pub mod reshape;
pub mod search;
pub mod types;

pub use calendar::HebrewDate;
pub use types::*;
