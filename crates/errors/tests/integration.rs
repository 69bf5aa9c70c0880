//! Integration tests for error types

#[cfg(test)]
mod tests {
    use bitcheck_errors::*;

    #[test]
    fn test_error_conversion() {
        let err: Error = ValidatorError::ToolUnavailable {
            tool: "mp3val".into(),
        }
        .into();
        assert!(matches!(err, Error::Validator(_)));
        assert_eq!(err.user_code(), Some("validator.tool_unavailable"));
    }

    #[test]
    fn test_error_display() {
        let err = CheckError::ChecksumMismatch {
            path: "/music/a.flac".into(),
            stored: "aa".into(),
            computed: "bb".into(),
        };
        assert_eq!(
            err.to_string(),
            "checksum mismatch for /music/a.flac: stored aa, computed bb"
        );
    }

    #[test]
    fn test_io_error_keeps_os_text() {
        let io_err = std::io::Error::from_raw_os_error(2);
        let err = Error::io_with_path(&io_err, "/doesnotexist");
        let message = err.os_message().unwrap();
        assert!(message.contains("No such file or directory"));
        assert_eq!(err.user_message(), message);
    }

    #[test]
    fn test_library_error_codes() {
        let err: Error = LibraryError::UnsupportedPath {
            path: "/music/caf\u{fffd}.mp3".into(),
        }
        .into();
        assert_eq!(err.user_code(), Some("library.unsupported_path"));
        assert!(err.user_hint().is_some());
        assert!(!err.is_retryable());
    }

    #[test]
    fn test_corrupted_stored_value() {
        let err: Error = StorageError::CorruptedData {
            message: "invalid hex".into(),
        }
        .into();
        assert_eq!(err.user_code(), Some("storage.corrupted_data"));
        assert_eq!(err.to_string(), "storage error: corrupted data: invalid hex");
    }

    #[test]
    fn test_validator_error_tool_name() {
        let err = ValidatorError::TimedOut {
            tool: "flac".into(),
            seconds: 5,
        };
        assert_eq!(err.tool(), Some("flac"));
        assert!(err.is_retryable());
    }
}
