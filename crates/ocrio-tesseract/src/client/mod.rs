//! Tesseract subprocess client and its configuration.

mod ts_client;
mod ts_config;

pub use ts_client::{TsClient, default_binary, set_default_binary};
pub use ts_config::{TESSERACT_PATH_ENV, TsConfig};
