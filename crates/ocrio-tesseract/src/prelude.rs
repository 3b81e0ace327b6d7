//! Convenient re-exports of the crate's public surface.

pub use crate::client::{TsClient, TsConfig, default_binary, set_default_binary};
pub use crate::command::ImageInput;
pub use crate::error::{Error, Result};
