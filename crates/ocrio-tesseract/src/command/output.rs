//! Parsing of tesseract's auxiliary plain-text output.

/// Header line preceding the language listing.
const LANGUAGES_HEADER: &str = "List of available languages";

/// Returned when the version line carries no token.
const UNKNOWN_VERSION: &str = "unknown";

/// Parse the output of `--list-langs` into an ordered list of language
/// codes.
///
/// Line endings are normalized, the header line is dropped, every
/// remaining line is trimmed, and blank lines are discarded. Output order
/// is preserved.
pub(crate) fn parse_languages(stdout: &str) -> Vec<String> {
    stdout
        .replace("\r\n", "\n")
        .lines()
        .filter(|line| !line.starts_with(LANGUAGES_HEADER))
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(str::to_string)
        .collect()
}

/// Parse the output of `--version` into a version string.
///
/// Takes the last whitespace-delimited token of the first line, or
/// `"unknown"` when there is none.
pub(crate) fn parse_version(stdout: &str) -> String {
    stdout
        .lines()
        .next()
        .and_then(|line| line.split_whitespace().next_back())
        .unwrap_or(UNKNOWN_VERSION)
        .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_languages_drops_header_and_blanks() {
        let stdout = "List of available languages in \"/usr/share/tessdata\" (3):\neng\n\nosd\ndeu\n";
        assert_eq!(parse_languages(stdout), vec!["eng", "osd", "deu"]);
    }

    #[test]
    fn test_parse_languages_normalizes_crlf_and_trims() {
        let stdout = "List of available languages (2):\r\n  eng  \r\nosd\r\n";
        assert_eq!(parse_languages(stdout), vec!["eng", "osd"]);
    }

    #[test]
    fn test_parse_languages_empty_output() {
        assert!(parse_languages("").is_empty());
        assert!(parse_languages("List of available languages (0):\n").is_empty());
    }

    #[test]
    fn test_parse_version_takes_last_token_of_first_line() {
        assert_eq!(parse_version("tesseract 5.3.4\n leptonica-1.84.1\n"), "5.3.4");
        assert_eq!(parse_version("tesseract v5.0.0-alpha.20201224"), "v5.0.0-alpha.20201224");
    }

    #[test]
    fn test_parse_version_unknown_when_no_token() {
        assert_eq!(parse_version(""), "unknown");
        assert_eq!(parse_version("\nleptonica-1.84.1"), "unknown");
        assert_eq!(parse_version("   \n"), "unknown");
    }
}
