//! Unified error type for slidekit.
//!
//! Recoverable authoring problems (unknown layout names, unresolvable
//! placeholders, repeated slot bindings) are reported through `log` and never
//! surface here. Everything in this enum aborts the operation that raised it.
use thiserror::Error;

/// Main error type for slidekit operations.
#[derive(Error, Debug)]
pub enum Error {
    /// A layout definition is missing required data or contradicts itself.
    #[error("Malformed layout definition '{layout}': {reason}")]
    MalformedLayout { layout: String, reason: String },

    /// Layout registry data failed to parse or validate.
    #[error("Invalid layout registry: {0}")]
    InvalidRegistry(String),

    /// No presentation size preset with this name has been defined.
    #[error("Unknown presentation layout size: {0}")]
    UnknownLayoutSize(String),

    /// A custom presentation size has unusable dimensions.
    #[error("Invalid presentation layout size '{name}': {reason}")]
    InvalidLayoutSize { name: String, reason: String },

    /// The slide has already been serialized and accepts no more content.
    #[error("Slide {0} has been exported and can no longer be modified")]
    SlideSealed(usize),

    /// Image payload could not be decoded.
    #[error("Invalid image data: {0}")]
    InvalidImage(String),

    /// XML generation error
    #[error("XML error: {0}")]
    XmlError(String),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// ZIP archive error
    #[error("ZIP error: {0}")]
    ZipError(String),
}

impl Error {
    pub(crate) fn malformed(layout: impl Into<String>, reason: impl Into<String>) -> Self {
        Error::MalformedLayout {
            layout: layout.into(),
            reason: reason.into(),
        }
    }
}

/// Result type for slidekit operations.
pub type Result<T> = std::result::Result<T, Error>;
