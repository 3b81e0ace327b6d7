//! Argument-vector construction for tesseract invocations.
//!
//! The token order and quoting here are part of the compatibility contract
//! with the tesseract CLI grammar and must stay bit-exact: the input
//! selector first, then the output selector, then the fixed option tokens,
//! then the open-ended flags and `-c` variables in insertion order.

use std::path::{Path, PathBuf};

use crate::client::TsConfig;

/// Selector token requesting input on the tool's standard input.
const STDIN_SELECTOR: &str = "stdin";

/// Image input for a recognition call.
///
/// A path is handed to the tool as an argument, unopened; bytes are
/// delivered on the tool's standard input. A path can still travel over
/// standard input when [`TsConfig::with_stdin`] forces it, in which case
/// the path string's UTF-8 bytes are what gets written.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ImageInput {
    /// Filesystem path, passed through as a string token
    Path(String),
    /// Raw image bytes
    Bytes(Vec<u8>),
}

impl ImageInput {
    /// Whether this input is a filesystem path.
    pub fn is_path(&self) -> bool {
        matches!(self, Self::Path(_))
    }

    /// The bytes written when the input travels over standard input.
    pub fn payload(&self) -> &[u8] {
        match self {
            Self::Path(path) => path.as_bytes(),
            Self::Bytes(bytes) => bytes,
        }
    }
}

impl From<&str> for ImageInput {
    fn from(path: &str) -> Self {
        Self::Path(path.to_string())
    }
}

impl From<String> for ImageInput {
    fn from(path: String) -> Self {
        Self::Path(path)
    }
}

impl From<&Path> for ImageInput {
    fn from(path: &Path) -> Self {
        Self::Path(path.to_string_lossy().into_owned())
    }
}

impl From<PathBuf> for ImageInput {
    fn from(path: PathBuf) -> Self {
        Self::Path(path.to_string_lossy().into_owned())
    }
}

impl From<Vec<u8>> for ImageInput {
    fn from(bytes: Vec<u8>) -> Self {
        Self::Bytes(bytes)
    }
}

impl From<&[u8]> for ImageInput {
    fn from(bytes: &[u8]) -> Self {
        Self::Bytes(bytes.to_vec())
    }
}

/// Build the argument vector for a recognition invocation.
///
/// Deterministic: the same configuration and input always yield the same
/// token sequence.
pub fn build_args(config: &TsConfig, input: &ImageInput) -> Vec<String> {
    let mut args = Vec::new();

    match input {
        ImageInput::Path(path) if !config.stdin() => args.push(path.clone()),
        _ => args.push(STDIN_SELECTOR.to_string()),
    }

    args.push(config.output().unwrap_or("stdout").to_string());

    if let Some(lang) = config.lang() {
        args.push("-l".to_string());
        args.push(escape_quotes(lang));
    }

    if let Some(dir) = config.tessdata() {
        args.push(format!("--tessdata-dir=\"{}\"", escape_quotes(dir)));
    }

    if let Some(psm) = config.psm() {
        args.push("--psm".to_string());
        args.push(psm.to_string());
    }

    if let Some(oem) = config.oem() {
        args.push(format!("--oem {oem}"));
    }

    if let Some(dpi) = config.dpi() {
        args.push(format!("--dpi {dpi}"));
    }

    if let Some(path) = config.user_words() {
        args.push(format!("--user-words=\"{}\"", escape_quotes(path)));
    }

    if let Some(path) = config.user_patterns() {
        args.push(format!("--user-patterns=\"{}\"", escape_quotes(path)));
    }

    for (name, value) in config.flags() {
        let dashes = if name.chars().count() == 1 { "-" } else { "--" };
        args.push(format!("{dashes}{name}=\"{}\"", escape_quotes(value)));
    }

    for (key, value) in config.config_variables() {
        args.push("-c".to_string());
        args.push(format!("{key}={value}"));
    }

    args
}

/// Decide whether the input travels over the tool's standard input.
///
/// The full disjunction is observable behavior: bytes input, an explicit
/// `stdin` option, or an input selector token of `stdin` or `-` (a path
/// literally named `-`) all trigger stream delivery. In particular a path
/// combined with `stdin: true` writes the path string's bytes.
pub fn wants_stdin(config: &TsConfig, input: &ImageInput, args: &[String]) -> bool {
    let selector = args.first().map(String::as_str);
    !input.is_path() || config.stdin() || matches!(selector, Some(STDIN_SELECTOR) | Some("-"))
}

fn escape_quotes(value: &str) -> String {
    value.replace('"', "\\\"")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_minimal_invocation() {
        let config = TsConfig::new();
        let input = ImageInput::from("scan.png");
        assert_eq!(build_args(&config, &input), vec!["scan.png", "stdout"]);
    }

    #[test]
    fn test_full_argument_order() {
        let config = TsConfig::new()
            .with_lang("eng")
            .with_tessdata("/data")
            .with_psm(3)
            .with_oem(1)
            .with_dpi(300)
            .with_user_words("words.txt")
            .with_user_patterns("patterns.txt")
            .with_flag("v", "on")
            .with_flag("loglevel", "ALL")
            .with_config_variable("preserve_interword_spaces", "1");

        let input = ImageInput::from("scan.png");
        let expected = vec![
            "scan.png",
            "stdout",
            "-l",
            "eng",
            "--tessdata-dir=\"/data\"",
            "--psm",
            "3",
            "--oem 1",
            "--dpi 300",
            "--user-words=\"words.txt\"",
            "--user-patterns=\"patterns.txt\"",
            "-v=\"on\"",
            "--loglevel=\"ALL\"",
            "-c",
            "preserve_interword_spaces=1",
        ];
        assert_eq!(build_args(&config, &input), expected);
    }

    #[test]
    fn test_argument_building_is_deterministic() {
        let config = TsConfig::new()
            .with_lang("kor+eng")
            .with_flag("loglevel", "OFF")
            .with_config_variable("a", "1")
            .with_config_variable("b", "2");
        let input = ImageInput::from("page.tif");

        assert_eq!(build_args(&config, &input), build_args(&config, &input));
    }

    #[test]
    fn test_flag_dash_rule() {
        let config = TsConfig::new().with_flag("v", "1").with_flag("dpi", "70");
        let args = build_args(&config, &ImageInput::from("a.png"));
        assert!(args.contains(&"-v=\"1\"".to_string()));
        assert!(args.contains(&"--dpi=\"70\"".to_string()));
    }

    #[test]
    fn test_double_quotes_are_escaped() {
        let config = TsConfig::new()
            .with_lang("e\"ng")
            .with_tessdata("/da\"ta")
            .with_flag("loglevel", "A\"LL");
        let args = build_args(&config, &ImageInput::from("a.png"));

        assert!(args.contains(&"e\\\"ng".to_string()));
        assert!(args.contains(&"--tessdata-dir=\"/da\\\"ta\"".to_string()));
        assert!(args.contains(&"--loglevel=\"A\\\"LL\"".to_string()));
    }

    #[test]
    fn test_config_variables_are_not_escaped() {
        let config = TsConfig::new().with_config_variable("key", "va\"lue");
        let args = build_args(&config, &ImageInput::from("a.png"));
        assert_eq!(args[args.len() - 2], "-c");
        assert_eq!(args[args.len() - 1], "key=va\"lue");
    }

    #[test]
    fn test_bytes_input_selects_stdin() {
        let config = TsConfig::new();
        let input = ImageInput::from(vec![1u8, 2, 3]);
        let args = build_args(&config, &input);

        assert_eq!(args[0], "stdin");
        assert!(wants_stdin(&config, &input, &args));
        assert_eq!(input.payload(), &[1, 2, 3]);
    }

    #[test]
    fn test_stdin_option_overrides_path_argument() {
        let config = TsConfig::new().with_stdin(true);
        let input = ImageInput::from("scan.png");
        let args = build_args(&config, &input);

        assert_eq!(args[0], "stdin");
        assert!(wants_stdin(&config, &input, &args));
        // The path string itself is what would be written.
        assert_eq!(input.payload(), b"scan.png");
    }

    #[test]
    fn test_dash_path_selects_stdin_delivery() {
        let config = TsConfig::new();
        let input = ImageInput::from("-");
        let args = build_args(&config, &input);

        assert_eq!(args[0], "-");
        assert!(wants_stdin(&config, &input, &args));
    }

    #[test]
    fn test_dash_output_alone_does_not_select_stdin() {
        let config = TsConfig::new().with_output("-");
        let input = ImageInput::from("scan.png");
        let args = build_args(&config, &input);

        assert_eq!(args[0], "scan.png");
        assert_eq!(args[1], "-");
        assert!(!wants_stdin(&config, &input, &args));
    }

    #[test]
    fn test_custom_output_selector_token() {
        let config = TsConfig::new().with_output("result");
        let args = build_args(&config, &ImageInput::from("scan.png"));
        assert_eq!(args[1], "result");
    }
}
