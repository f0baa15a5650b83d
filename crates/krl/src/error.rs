use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum KrlError {
    #[error("Invalid canvas dimensions {width}x{height}: width and height must be non-zero")]
    InvalidDimension { width: u32, height: u32 },

    #[error("Invalid identifier '{0}': expected a letter or '_' followed by up to 23 letters, digits or '_'")]
    InvalidIdentifier(String),

    #[error("Unknown {kind} '{value}'")]
    UnknownTag { kind: &'static str, value: String },
}

pub type Result<T> = std::result::Result<T, KrlError>;
