pub mod config;
pub mod error;
pub mod favorites;
pub mod fetch;
pub mod lifecycle;
pub mod media;
pub mod scroll;
pub mod storage;
pub mod trailer;

pub use config::{AppConfig, EasingType, ScrollConfig};
pub use error::{Error, Result};
