use serde::{Deserialize, Serialize};

/// The defect found in a dice notation, with just enough payload to explain it.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize, thiserror::Error)]
pub enum NotationErrorKind {
    #[error("Not allowed char: {0}")]
    InvalidCharacter(char),

    #[error("No dice specified!")]
    NoDiceSpecified,

    #[error("Only one 'D' is allowed!")]
    MultipleDiceSeparators,

    #[error("Only one modifier is allowed!")]
    MultipleModifiers,

    #[error("Missing value after modifier sign '{0}'")]
    MissingModifierValue(char),

    #[error("Wrong dice code!")]
    InvalidCountSegment,

    #[error("Not allowed dice: D{0}")]
    DisallowedFaceCount(String),

    #[error("Number out of range: {0}")]
    NumberOutOfRange(String),
}

/// A rejected notation. Always carries the input exactly as it was given.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{kind} [{input}]")]
pub struct NotationError {
    pub kind: NotationErrorKind,
    pub input: String,
}

impl NotationError {
    pub fn new(kind: NotationErrorKind, input: impl Into<String>) -> Self {
        Self {
            kind,
            input: input.into(),
        }
    }

    pub fn kind(&self) -> &NotationErrorKind {
        &self.kind
    }

    pub fn input(&self) -> &str {
        &self.input
    }
}
