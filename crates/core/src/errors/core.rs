use thiserror::Error;

/// Result alias used throughout the weave crates
pub type AopResult<T> = Result<T, AopError>;

/// Core error type for the weave framework
#[derive(Debug, Error)]
pub enum AopError {
    #[error("Proxy '{proxy_type}' was invoked before a target was bound")]
    NotBound { proxy_type: String },

    #[error("No such method '{method}' on type '{type_name}'")]
    NoSuchMethod { type_name: String, method: String },

    /// Raised by targets that need to surface a foreign error. Proxies pass it
    /// through as-is; they never produce this variant themselves.
    #[error("Invocation of '{method}' failed: {source}")]
    Delegation {
        method: String,
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    #[error("Unknown type: {type_name}")]
    UnknownType { type_name: String },

    #[error("Candidate not found: {name}")]
    CandidateNotFound { name: String },

    #[error("Candidate '{name}' is already registered")]
    DuplicateCandidate { name: String },

    #[error("Candidate '{name}' has not been prepared yet")]
    CandidateNotPrepared { name: String },

    #[error("Candidate '{name}' resolved to '{expected}' but was prepared as '{actual}'")]
    TypeMismatch {
        name: String,
        expected: String,
        actual: String,
    },

    #[error("Resource not found: {name}")]
    ResourceNotFound { name: String },

    #[error("Resource name escapes the resource directory: {name}")]
    InvalidResourceName { name: String },

    #[error("Invalid arguments for '{method}': {message}")]
    InvalidArguments { method: String, message: String },

    #[error("Value conversion error: {0}")]
    Conversion(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Configuration error: {message}")]
    Configuration { message: String },
}

impl AopError {
    /// Create a new not-bound error for a proxy type name
    pub fn not_bound(proxy_type: impl Into<String>) -> Self {
        Self::NotBound {
            proxy_type: proxy_type.into(),
        }
    }

    /// Create a new no-such-method error
    pub fn no_such_method(type_name: impl Into<String>, method: impl Into<String>) -> Self {
        Self::NoSuchMethod {
            type_name: type_name.into(),
            method: method.into(),
        }
    }

    /// Wrap a foreign error raised while executing a target method
    pub fn delegation(
        method: impl Into<String>,
        source: impl std::error::Error + Send + Sync + 'static,
    ) -> Self {
        Self::Delegation {
            method: method.into(),
            source: Box::new(source),
        }
    }

    /// Create a new unknown type error
    pub fn unknown_type(type_name: impl Into<String>) -> Self {
        Self::UnknownType {
            type_name: type_name.into(),
        }
    }

    /// Create a new candidate not found error
    pub fn candidate_not_found(name: impl Into<String>) -> Self {
        Self::CandidateNotFound { name: name.into() }
    }

    /// Create a new invalid arguments error
    pub fn invalid_arguments(method: impl Into<String>, message: impl Into<String>) -> Self {
        Self::InvalidArguments {
            method: method.into(),
            message: message.into(),
        }
    }

    /// Create a new configuration error
    pub fn configuration(message: impl Into<String>) -> Self {
        Self::Configuration {
            message: message.into(),
        }
    }

    /// Check if the error is a not-bound error
    pub fn is_not_bound(&self) -> bool {
        matches!(self, Self::NotBound { .. })
    }

    /// Check if the error is a no-such-method error
    pub fn is_no_such_method(&self) -> bool {
        matches!(self, Self::NoSuchMethod { .. })
    }
}
