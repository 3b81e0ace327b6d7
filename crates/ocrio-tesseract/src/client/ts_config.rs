//! Configuration for tesseract invocations.

use serde::{Deserialize, Serialize};

use crate::{Error, Result};

/// Environment variable that seeds the default tesseract binary path.
pub const TESSERACT_PATH_ENV: &str = "TESSERACT_PATH";

/// Highest valid page-segmentation-mode code.
const MAX_PSM: u8 = 13;

/// Highest valid engine-mode code.
const MAX_OEM: u8 = 3;

/// Configuration for a tesseract invocation.
///
/// Every field is optional; the default value produces the minimal
/// invocation `<input> stdout`. The `flags` and `config_variables` maps
/// keep insertion order, which is observable in the resulting argument
/// vector.
///
/// # Examples
///
/// ```ignore
/// use ocrio_tesseract::TsConfig;
///
/// let config = TsConfig::new()
///     .with_lang("eng")
///     .with_psm(3)
///     .with_config_variable("preserve_interword_spaces", "1");
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TsConfig {
    /// Language code(s) passed to `-l` (e.g. "eng", "kor+eng")
    lang: Option<String>,

    /// Explicit path to the tesseract binary
    binary: Option<String>,

    /// Directory passed to `--tessdata-dir`
    tessdata: Option<String>,

    /// Page-segmentation-mode code, 0 through 13
    psm: Option<u8>,

    /// Engine-mode code, 0 through 3
    oem: Option<u8>,

    /// Image DPI passed to `--dpi`
    dpi: Option<u32>,

    /// Path passed to `--user-words`
    user_words: Option<String>,

    /// Path passed to `--user-patterns`
    user_patterns: Option<String>,

    /// Open-ended flag name/value pairs, insertion order preserved
    flags: Vec<(String, String)>,

    /// `-c` config key/value pairs, insertion order preserved
    config_variables: Vec<(String, String)>,

    /// Output destination selector; `stdout` when unset
    output: Option<String>,

    /// Force delivery of the input on the tool's standard input
    stdin: bool,
}

impl TsConfig {
    /// Create an empty configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a configuration seeded from environment variables.
    ///
    /// Reads [`TESSERACT_PATH_ENV`] for the binary path; absence is not an
    /// error.
    pub fn from_env() -> Self {
        let mut config = Self::default();

        if let Ok(binary) = std::env::var(TESSERACT_PATH_ENV) {
            config.binary = Some(binary);
        }

        config
    }

    /// Get the language code(s).
    pub fn lang(&self) -> Option<&str> {
        self.lang.as_deref()
    }

    /// Get the explicit binary path (if configured).
    pub fn binary(&self) -> Option<&str> {
        self.binary.as_deref()
    }

    /// Get the tessdata directory.
    pub fn tessdata(&self) -> Option<&str> {
        self.tessdata.as_deref()
    }

    /// Get the page-segmentation-mode code.
    pub fn psm(&self) -> Option<u8> {
        self.psm
    }

    /// Get the engine-mode code.
    pub fn oem(&self) -> Option<u8> {
        self.oem
    }

    /// Get the image DPI.
    pub fn dpi(&self) -> Option<u32> {
        self.dpi
    }

    /// Get the user-words file path.
    pub fn user_words(&self) -> Option<&str> {
        self.user_words.as_deref()
    }

    /// Get the user-patterns file path.
    pub fn user_patterns(&self) -> Option<&str> {
        self.user_patterns.as_deref()
    }

    /// Get the open-ended flags, in insertion order.
    pub fn flags(&self) -> &[(String, String)] {
        &self.flags
    }

    /// Get the `-c` config variables, in insertion order.
    pub fn config_variables(&self) -> &[(String, String)] {
        &self.config_variables
    }

    /// Get the output destination selector (if configured).
    pub fn output(&self) -> Option<&str> {
        self.output.as_deref()
    }

    /// Get whether input delivery on standard input is forced.
    pub fn stdin(&self) -> bool {
        self.stdin
    }

    /// Set the language code(s).
    pub fn with_lang(mut self, lang: impl Into<String>) -> Self {
        self.lang = Some(lang.into());
        self
    }

    /// Set an explicit binary path, overriding the process-wide default.
    pub fn with_binary(mut self, binary: impl Into<String>) -> Self {
        self.binary = Some(binary.into());
        self
    }

    /// Set the tessdata directory.
    pub fn with_tessdata(mut self, dir: impl Into<String>) -> Self {
        self.tessdata = Some(dir.into());
        self
    }

    /// Set the page-segmentation-mode code. Validated on use.
    pub fn with_psm(mut self, psm: u8) -> Self {
        self.psm = Some(psm);
        self
    }

    /// Set the engine-mode code. Validated on use.
    pub fn with_oem(mut self, oem: u8) -> Self {
        self.oem = Some(oem);
        self
    }

    /// Set the image DPI.
    pub fn with_dpi(mut self, dpi: u32) -> Self {
        self.dpi = Some(dpi);
        self
    }

    /// Set the user-words file path.
    pub fn with_user_words(mut self, path: impl Into<String>) -> Self {
        self.user_words = Some(path.into());
        self
    }

    /// Set the user-patterns file path.
    pub fn with_user_patterns(mut self, path: impl Into<String>) -> Self {
        self.user_patterns = Some(path.into());
        self
    }

    /// Append an open-ended flag.
    ///
    /// One-character names render with a single dash, longer names with a
    /// double dash.
    pub fn with_flag(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.flags.push((name.into(), value.into()));
        self
    }

    /// Append a `-c` config variable.
    pub fn with_config_variable(
        mut self,
        key: impl Into<String>,
        value: impl Into<String>,
    ) -> Self {
        self.config_variables.push((key.into(), value.into()));
        self
    }

    /// Set the output destination selector.
    pub fn with_output(mut self, output: impl Into<String>) -> Self {
        self.output = Some(output.into());
        self
    }

    /// Force delivery of the input on the tool's standard input.
    pub fn with_stdin(mut self, stdin: bool) -> Self {
        self.stdin = stdin;
        self
    }

    /// Validate the numeric mode codes.
    ///
    /// Called before every recognition spawn; an out-of-range `psm` or
    /// `oem` fails here and no process is started.
    pub fn validate(&self) -> Result<()> {
        if let Some(psm) = self.psm
            && psm > MAX_PSM
        {
            return Err(Error::config(format!(
                "psm must be between 0 and {MAX_PSM}, got {psm}"
            )));
        }

        if let Some(oem) = self.oem
            && oem > MAX_OEM
        {
            return Err(Error::config(format!(
                "oem must be between 0 and {MAX_OEM}, got {oem}"
            )));
        }

        Ok(())
    }
}
