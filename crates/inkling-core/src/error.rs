use thiserror::Error;

/// Core error type shared across Inkling crates.
#[derive(Debug, Error)]
pub enum Error {
    /// The category is the mandatory one and cannot be removed.
    #[error("category '{0}' is protected and cannot be deleted")]
    ProtectedCategory(String),
    /// Removing the profile would leave the collection empty.
    #[error("at least one profile must remain")]
    LastProfile,
    /// A profile needs a non-blank name.
    #[error("profile name cannot be empty")]
    EmptyName,
    /// Reference to a profile, category or item that does not exist.
    #[error("not found: {0}")]
    NotFound(String),
    /// The edit targets fields the item kind does not have.
    #[error("item is '{found}', expected '{expected}'")]
    KindMismatch {
        expected: &'static str,
        found: &'static str,
    },
}

/// Convenience alias for results returned by Inkling crates.
pub type Result<T> = std::result::Result<T, Error>;
