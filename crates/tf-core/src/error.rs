use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("{code}: {message}")]
pub struct TimeforkError {
    pub code: String,
    pub message: String,
    pub line: Option<usize>,
}

impl TimeforkError {
    pub fn new(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
            line: None,
        }
    }

    pub fn at_line(code: impl Into<String>, message: impl Into<String>, line: usize) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
            line: Some(line),
        }
    }
}

#[cfg(test)]
mod error_tests {
    use super::*;

    #[test]
    fn display_joins_code_and_message() {
        let error = TimeforkError::new("ASSET_TRUNCATED", "chunk \"line\" ended early");
        assert_eq!(error.to_string(), "ASSET_TRUNCATED: chunk \"line\" ended early");
        assert_eq!(error.line, None);
    }

    #[test]
    fn at_line_keeps_source_line() {
        let error = TimeforkError::at_line("COMPILE_TRANSITION_SYNTAX", "bad", 4);
        assert_eq!(error.line, Some(4));
        assert_eq!(error.code, "COMPILE_TRANSITION_SYNTAX");
    }
}
