/// Convenience result type used across kanjistroke.
pub type KanjiStrokeResult<T> = Result<T, KanjiStrokeError>;

/// Top-level error taxonomy for the fallible edges of the crate.
///
/// The presentation core (loading, presenting, sequencing) never returns these: it reports
/// failure through `Option` or by leaving the container untouched.
#[derive(thiserror::Error, Debug)]
pub enum KanjiStrokeError {
    /// Invalid user-provided configuration or arguments.
    #[error("validation error: {0}")]
    Validation(String),

    /// Payload could not be decoded or parsed into a visual tree.
    #[error("markup error: {0}")]
    Markup(String),

    /// No stroke data exists for the requested character/variant.
    #[error("invalid character: {character:?} (variant {variant:?})")]
    InvalidCharacter {
        /// Requested character.
        character: char,
        /// Requested variant, empty when none.
        variant: String,
    },

    /// Errors while rasterizing a container snapshot.
    #[error("render error: {0}")]
    Render(String),

    /// Errors when serializing or deserializing data structures.
    #[error("serialization error: {0}")]
    Serde(String),

    /// Wrapped lower-level error from dependencies or IO.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl KanjiStrokeError {
    /// Build a [`KanjiStrokeError::Validation`] value.
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// Build a [`KanjiStrokeError::Markup`] value.
    pub fn markup(msg: impl Into<String>) -> Self {
        Self::Markup(msg.into())
    }

    /// Build a [`KanjiStrokeError::InvalidCharacter`] value.
    pub fn invalid_character(character: char, variant: impl Into<String>) -> Self {
        Self::InvalidCharacter {
            character,
            variant: variant.into(),
        }
    }

    /// Build a [`KanjiStrokeError::Render`] value.
    pub fn render(msg: impl Into<String>) -> Self {
        Self::Render(msg.into())
    }

    /// Build a [`KanjiStrokeError::Serde`] value.
    pub fn serde(msg: impl Into<String>) -> Self {
        Self::Serde(msg.into())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/error.rs"]
mod tests;
