//! Tesseract subprocess client implementation.

use std::process::{Output, Stdio};
use std::sync::{LazyLock, RwLock};

use tokio::io::AsyncWriteExt;
use tokio::process::Command;
use tracing::{debug, warn};

use crate::command::{ImageInput, build_args, parse_languages, parse_version, wants_stdin};
use crate::{Error, Result, TRACING_TARGET_CLIENT, TRACING_TARGET_COMMAND};

use super::ts_config::{TESSERACT_PATH_ENV, TsConfig};

/// Command name used when neither the configuration nor the process-wide
/// default names a binary.
const FALLBACK_BINARY: &str = "tesseract";

/// Process-wide default binary path, seeded once from [`TESSERACT_PATH_ENV`].
static DEFAULT_BINARY: LazyLock<RwLock<String>> = LazyLock::new(|| {
    let binary =
        std::env::var(TESSERACT_PATH_ENV).unwrap_or_else(|_| FALLBACK_BINARY.to_string());
    RwLock::new(binary)
});

/// Get the process-wide default binary path.
///
/// Used by every client whose configuration does not carry an explicit
/// [`TsConfig::with_binary`] value.
pub fn default_binary() -> String {
    DEFAULT_BINARY
        .read()
        .unwrap_or_else(|err| err.into_inner())
        .clone()
}

/// Override the process-wide default binary path.
///
/// Expected to be called during initialization, before concurrent calls
/// begin; clients only read the value afterwards.
pub fn set_default_binary(path: impl Into<String>) {
    *DEFAULT_BINARY.write().unwrap_or_else(|err| err.into_inner()) = path.into();
}

/// Client for the externally installed tesseract binary.
///
/// Each call spawns one independent subprocess; the client itself holds no
/// state beyond its configuration, so it is cheap to clone and safe to use
/// concurrently. There are no retries and no timeout: any tool failure
/// surfaces immediately to the caller.
///
/// # Examples
///
/// ```ignore
/// use ocrio_tesseract::{TsClient, TsConfig};
///
/// #[tokio::main]
/// async fn main() -> Result<(), ocrio_tesseract::Error> {
///     let client = TsClient::new(TsConfig::from_env().with_lang("eng"));
///
///     let text = client.recognize_file("scan.png").await?;
///     let version = client.version().await?;
///     let languages = client.languages().await?;
///
///     Ok(())
/// }
/// ```
#[derive(Debug, Clone, Default)]
pub struct TsClient {
    /// Configuration
    config: TsConfig,
}

impl TsClient {
    /// Create a new client with the given configuration.
    pub fn new(config: TsConfig) -> Self {
        Self { config }
    }

    /// Get a reference to the client configuration.
    pub fn config(&self) -> &TsConfig {
        &self.config
    }

    /// Recognize text in the image at the given path.
    ///
    /// The path is handed to the tool unopened unless the configuration
    /// forces standard-input delivery.
    pub async fn recognize_file(&self, path: impl AsRef<std::path::Path>) -> Result<String> {
        self.recognize(ImageInput::from(path.as_ref())).await
    }

    /// Recognize text in raw image bytes, delivered on the tool's standard
    /// input.
    pub async fn recognize_bytes(&self, bytes: impl Into<Vec<u8>>) -> Result<String> {
        self.recognize(ImageInput::Bytes(bytes.into())).await
    }

    /// Recognize text in the given input.
    ///
    /// Validates the configuration, builds the argument vector, spawns the
    /// binary, and returns the decoded standard-output text when the output
    /// destination is `stdout` or `-`. For any other destination the tool
    /// writes the result to that path itself and an empty string is
    /// returned. The text is not trimmed; trimming is left to the caller.
    pub async fn recognize(&self, input: impl Into<ImageInput>) -> Result<String> {
        let input = input.into();
        self.config.validate()?;

        let args = build_args(&self.config, &input);
        let payload = wants_stdin(&self.config, &input, &args).then(|| input.payload());

        let output = self.run(&args, payload).await?;

        let destination = self.config.output().unwrap_or("stdout");
        if destination == "stdout" || destination == "-" {
            Ok(String::from_utf8_lossy(&output.stdout).into_owned())
        } else {
            Ok(String::new())
        }
    }

    /// List the installed language packs, in the tool's output order.
    pub async fn languages(&self) -> Result<Vec<String>> {
        let output = self.run(&["--list-langs".to_string()], None).await?;
        Ok(parse_languages(&String::from_utf8_lossy(&output.stdout)))
    }

    /// Query the installed tesseract version.
    ///
    /// Returns `"unknown"` when the first output line carries no token.
    pub async fn version(&self) -> Result<String> {
        let output = self.run(&["--version".to_string()], None).await?;
        Ok(parse_version(&String::from_utf8_lossy(&output.stdout)))
    }

    /// Resolve the binary for this client.
    fn binary(&self) -> String {
        self.config
            .binary()
            .map(str::to_string)
            .unwrap_or_else(default_binary)
    }

    /// Spawn the binary, feed it, and drain its streams.
    ///
    /// The input handle is closed on every path, including when nothing is
    /// written, so the tool never blocks waiting for input. Non-empty
    /// error-stream content fails the call with that text verbatim; the
    /// exit code is not inspected.
    async fn run(&self, args: &[String], payload: Option<&[u8]>) -> Result<Output> {
        let binary = self.binary();

        debug!(
            target: TRACING_TARGET_COMMAND,
            binary = %binary,
            args = ?args,
            stdin_bytes = payload.map_or(0, <[u8]>::len),
            "Spawning tesseract"
        );

        let mut child = Command::new(&binary)
            .args(args)
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .spawn()
            .map_err(|source| Error::spawn(&binary, source))?;

        let stdin = child.stdin.take();
        if let (Some(mut stdin), Some(bytes)) = (stdin, payload) {
            stdin.write_all(bytes).await?;
            stdin.shutdown().await?;
        }

        let output = child.wait_with_output().await?;

        if !output.stderr.is_empty() {
            let message = String::from_utf8_lossy(&output.stderr).into_owned();
            warn!(
                target: TRACING_TARGET_CLIENT,
                binary = %binary,
                "Tesseract wrote to its error stream"
            );
            return Err(Error::tool(message));
        }

        debug!(
            target: TRACING_TARGET_CLIENT,
            stdout_bytes = output.stdout.len(),
            "Tesseract exited cleanly"
        );

        Ok(output)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_explicit_binary_wins_over_default() {
        let client = TsClient::new(TsConfig::new().with_binary("/opt/tesseract"));
        assert_eq!(client.binary(), "/opt/tesseract");
    }

    #[test]
    fn test_default_binary_override() {
        // Single test for the shared default; restores it before returning.
        let seeded = default_binary();
        assert!(!seeded.is_empty());

        set_default_binary("/tmp/fake-tesseract");
        assert_eq!(default_binary(), "/tmp/fake-tesseract");
        let client = TsClient::default();
        assert_eq!(client.binary(), "/tmp/fake-tesseract");

        set_default_binary(seeded.clone());
        assert_eq!(default_binary(), seeded);
    }

    #[tokio::test]
    async fn test_missing_binary_is_a_spawn_error() {
        let client = TsClient::new(TsConfig::new().with_binary("/nonexistent/tesseract-bin"));
        let err = client.recognize_file("scan.png").await.unwrap_err();
        assert!(matches!(err, Error::Spawn { .. }));
        assert_eq!(err.category(), "spawn");
    }

    #[tokio::test]
    async fn test_invalid_psm_fails_before_spawn() {
        // The binary is also invalid; a config error proves validation ran
        // first and no process was spawned.
        let client = TsClient::new(
            TsConfig::new()
                .with_binary("/nonexistent/tesseract-bin")
                .with_psm(99),
        );
        let err = client.recognize_file("scan.png").await.unwrap_err();
        assert!(matches!(err, Error::Config { .. }));
    }

    #[tokio::test]
    async fn test_invalid_oem_fails_before_spawn() {
        let client = TsClient::new(
            TsConfig::new()
                .with_binary("/nonexistent/tesseract-bin")
                .with_oem(7),
        );
        let err = client.recognize_bytes(vec![0u8; 4]).await.unwrap_err();
        assert!(matches!(err, Error::Config { .. }));
    }
}
