pub mod client;

pub use client::{ApiClient, HttpApiClient};

#[cfg(test)]
pub use client::MockApiClient;
