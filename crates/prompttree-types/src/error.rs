use std::fmt;

/// Result type for prompttree-types operations
pub type Result<T> = std::result::Result<T, ImportError>;

/// Failure to turn user-supplied JSON into an importable [`crate::Tree`]
#[derive(Debug)]
pub enum ImportError {
    /// Text is not valid JSON
    Parse(serde_json::Error),

    /// JSON is valid but does not look like a tree
    Shape(String),
}

impl fmt::Display for ImportError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ImportError::Parse(err) => write!(f, "Invalid JSON: {}", err),
            ImportError::Shape(msg) => write!(f, "Invalid tree structure: {}", msg),
        }
    }
}

impl std::error::Error for ImportError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ImportError::Parse(err) => Some(err),
            ImportError::Shape(_) => None,
        }
    }
}

impl From<serde_json::Error> for ImportError {
    fn from(err: serde_json::Error) -> Self {
        ImportError::Parse(err)
    }
}
