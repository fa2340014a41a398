pub mod client;
pub mod config;

pub use client::OpenRouterClient;
pub use config::OpenRouterConfig;
