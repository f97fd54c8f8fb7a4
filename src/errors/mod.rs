//! Record-level error types for scan-log ingestion.

use std::num::ParseIntError;

/// Failure extracting a finding from a single JSON log record.
///
/// These are inspected by the scanning loop and logged or suppressed
/// there; they never abort the pass.
#[derive(Debug, thiserror::Error)]
pub enum ExtractError {
    #[error("malformed finding record: {0}")]
    Json(#[from] serde_json::Error),

    #[error("finding has no request uri attached")]
    MissingRequest,

    #[error("request uri {uri:?} ends before the test number")]
    UriTooShort { uri: String },

    #[error("test number in {uri:?} is not an integer: {source}")]
    TestNumber {
        uri: String,
        #[source]
        source: ParseIntError,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn json_error_wraps_serde() {
        let err = serde_json::from_str::<serde_json::Value>("{oops").unwrap_err();
        let err: ExtractError = err.into();
        assert!(matches!(err, ExtractError::Json(_)));
        assert!(err.to_string().starts_with("malformed finding record"));
    }

    #[test]
    fn test_number_display_names_the_uri() {
        let source = "not-a-number".parse::<u32>().unwrap_err();
        let err = ExtractError::TestNumber {
            uri: "/benchmark/BenchmarkTestXYZ".to_string(),
            source,
        };
        let text = err.to_string();
        assert!(text.contains("/benchmark/BenchmarkTestXYZ"));
        assert!(text.contains("not an integer"));
    }

    #[test]
    fn missing_request_display() {
        assert_eq!(
            ExtractError::MissingRequest.to_string(),
            "finding has no request uri attached"
        );
    }
}
