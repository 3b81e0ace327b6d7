//! Deterministic command-line construction and tool output parsing.

mod invocation;
mod output;

pub use invocation::{ImageInput, build_args, wants_stdin};
pub(crate) use output::{parse_languages, parse_version};
