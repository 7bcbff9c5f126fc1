use thiserror::Error;

/// Errors carried on the failure channel of a stream.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum StreamError {
    /// The source reported a domain-level failure.
    #[error("source failed: {0}")]
    Source(String),

    /// A fallible user function inside an operator returned an error.
    #[error("operator '{operator}' failed: {message}")]
    Operator {
        operator: &'static str,
        message: String,
    },

    /// A user function panicked and the operator captured the panic.
    #[error("operator '{operator}' panicked: {message}")]
    Panicked {
        operator: &'static str,
        message: String,
    },
}

impl StreamError {
    /// Create a source error from a message.
    pub fn new(message: impl Into<String>) -> Self {
        Self::Source(message.into())
    }

    /// Create an operator error with the operator's name and a message.
    pub fn operator(operator: &'static str, message: impl Into<String>) -> Self {
        Self::Operator {
            operator,
            message: message.into(),
        }
    }

    /// Returns `true` if this error was produced by a captured panic.
    pub fn is_panic(&self) -> bool {
        matches!(self, Self::Panicked { .. })
    }
}

impl From<&str> for StreamError {
    fn from(message: &str) -> Self {
        Self::new(message)
    }
}

impl From<String> for StreamError {
    fn from(message: String) -> Self {
        Self::Source(message)
    }
}

/// Convenience alias for results whose error is a [`StreamError`].
pub type StreamResult<T> = std::result::Result<T, StreamError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_formats() {
        assert_eq!(StreamError::new("boom").to_string(), "source failed: boom");
        assert_eq!(
            StreamError::operator("map", "bad input").to_string(),
            "operator 'map' failed: bad input"
        );
        let panicked = StreamError::Panicked {
            operator: "filter",
            message: "index out of bounds".into(),
        };
        assert_eq!(panicked.to_string(), "operator 'filter' panicked: index out of bounds");
        assert!(panicked.is_panic());
    }

    #[test]
    fn conversions_produce_source_errors() {
        assert_eq!(StreamError::from("e"), StreamError::Source("e".into()));
        assert_eq!(StreamError::from(String::from("e")), StreamError::new("e"));
    }
}
