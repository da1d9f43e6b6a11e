pub mod config;
pub mod error;
pub mod types;

pub use config::Config;
pub use error::GuestlistError;
pub use types::*;
