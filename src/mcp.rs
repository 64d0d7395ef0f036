pub mod server;
pub mod tools;

pub use server::McpServer;
