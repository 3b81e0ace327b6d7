#![forbid(unsafe_code)]
#![cfg_attr(docsrs, feature(doc_cfg))]
#![doc = include_str!("../README.md")]

/// Tracing target for client-level operations.
///
/// Use this target for logging client configuration, validation, and the
/// outcome of recognition calls.
pub const TRACING_TARGET_CLIENT: &str = "ocrio_tesseract::client";

/// Tracing target for subprocess spawning and stream handling.
pub const TRACING_TARGET_COMMAND: &str = "ocrio_tesseract::command";

pub mod client;
pub mod command;
pub mod error;
#[doc(hidden)]
pub mod prelude;

pub use crate::client::{TsClient, TsConfig, default_binary, set_default_binary};
pub use crate::command::ImageInput;
pub use crate::error::{Error, Result};
