pub mod config;
pub mod error;
pub mod logging;
pub mod models;
pub mod pricing_client;
pub mod processor;

// Re-exports for convenience
pub use config::AppConfig;
pub use error::PricingError;
pub use models::{OptionKind, OptionRecord, PriceResponse};
pub use pricing_client::PricingClient;
