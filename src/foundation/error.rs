/// Convenience result type used across modalmotion.
pub type ModalResult<T> = Result<T, ModalError>;

/// Error taxonomy for presentation and transition operations.
#[derive(thiserror::Error, Debug)]
pub enum ModalError {
    /// Programming-contract violation: the caller asked for an operation the
    /// style or transition context cannot support. Raised before any surface
    /// is mutated.
    #[error("contract violation: {0}")]
    Contract(String),

    /// Invalid user-provided configuration.
    #[error("validation error: {0}")]
    Validation(String),

    /// Errors when serializing or deserializing style descriptors.
    #[error("serialization error: {0}")]
    Serde(String),

    /// Wrapped lower-level error from dependencies or IO.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl ModalError {
    /// Build a [`ModalError::Contract`] value.
    pub fn contract(msg: impl Into<String>) -> Self {
        Self::Contract(msg.into())
    }

    /// Build a [`ModalError::Validation`] value.
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// Build a [`ModalError::Serde`] value.
    pub fn serde(msg: impl Into<String>) -> Self {
        Self::Serde(msg.into())
    }

    /// `true` for [`ModalError::Contract`].
    pub fn is_contract(&self) -> bool {
        matches!(self, Self::Contract(_))
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/error.rs"]
mod tests;
