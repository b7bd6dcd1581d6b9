use thiserror::Error;

/// Errors produced by the fetch/project/render pipeline.
#[derive(Debug, Error)]
pub enum FetchError {
    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    #[error("Transport error: {0}")]
    Transport(#[source] reqwest::Error),

    #[error("Request timed out: {0}")]
    Timeout(#[source] reqwest::Error),

    #[error("HTTP {status}: {message}")]
    Http { status: u16, message: String },

    #[error("Malformed response body: {0}")]
    MalformedResponse(#[from] serde_json::Error),

    #[error("No {resource_type} entries found for patient {patient_id}")]
    EmptyResult {
        resource_type: String,
        patient_id: String,
    },

    #[error("Entry {index} is missing field `{path}`")]
    FieldExtraction { index: usize, path: String },

    #[error("Unimplemented: {0}")]
    Unimplemented(&'static str),
}

impl FetchError {
    /// Create a new InvalidRequest error
    pub fn invalid_request(message: impl Into<String>) -> Self {
        Self::InvalidRequest(message.into())
    }

    /// Create a new Http error
    pub fn http(status: u16, message: impl Into<String>) -> Self {
        Self::Http {
            status,
            message: message.into(),
        }
    }

    /// Create a new EmptyResult error
    pub fn empty_result(resource_type: impl Into<String>, patient_id: impl Into<String>) -> Self {
        Self::EmptyResult {
            resource_type: resource_type.into(),
            patient_id: patient_id.into(),
        }
    }

    /// Create a new FieldExtraction error
    pub fn field_extraction(index: usize, path: impl Into<String>) -> Self {
        Self::FieldExtraction {
            index,
            path: path.into(),
        }
    }

    /// True for the valid-but-empty outcome, which callers must be able to
    /// distinguish from a transport failure.
    pub fn is_empty_result(&self) -> bool {
        matches!(self, Self::EmptyResult { .. })
    }
}

impl From<reqwest::Error> for FetchError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            Self::Timeout(err)
        } else {
            Self::Transport(err)
        }
    }
}

/// Convenience result type for fetch operations
pub type Result<T> = std::result::Result<T, FetchError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_request_display() {
        let err = FetchError::invalid_request("base URL must not be empty");
        assert_eq!(
            err.to_string(),
            "Invalid request: base URL must not be empty"
        );
    }

    #[test]
    fn test_http_error_display() {
        let err = FetchError::http(500, "internal failure");
        assert_eq!(err.to_string(), "HTTP 500: internal failure");
    }

    #[test]
    fn test_empty_result_display_and_discriminator() {
        let err = FetchError::empty_result("Goal", "X12984");
        assert_eq!(
            err.to_string(),
            "No Goal entries found for patient X12984"
        );
        assert!(err.is_empty_result());
        assert!(!FetchError::http(404, "gone").is_empty_result());
    }

    #[test]
    fn test_field_extraction_carries_index_and_path() {
        let err = FetchError::field_extraction(3, "valueQuantity.unit");
        assert_eq!(err.to_string(), "Entry 3 is missing field `valueQuantity.unit`");
        match err {
            FetchError::FieldExtraction { index, path } => {
                assert_eq!(index, 3);
                assert_eq!(path, "valueQuantity.unit");
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_unimplemented_carries_context() {
        let err = FetchError::Unimplemented("projection has no columns");
        assert_eq!(err.to_string(), "Unimplemented: projection has no columns");
    }

    #[test]
    fn test_json_error_conversion() {
        let json_err = serde_json::from_str::<serde_json::Value>("{ nope").unwrap_err();
        let err: FetchError = json_err.into();
        assert!(matches!(err, FetchError::MalformedResponse(_)));
    }
}
