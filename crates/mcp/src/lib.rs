// MCP (Model Context Protocol) server exposing the Sefaria library as tools

pub mod protocol;
pub mod server;
pub mod tools;

pub use server::McpServer;
pub use tools::{sefaria_registry, ToolSettings};
