pub mod config;
pub mod logging;
pub mod server;
pub mod service;
pub mod wire;

pub use config::{ConfigError, ServerSettings, ValidationError};
pub use server::AdviceServer;
pub use service::{AdviceService, ServiceError, ServiceResponse};
