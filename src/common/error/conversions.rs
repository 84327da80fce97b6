//! Error conversion implementations.
//!
//! This module contains From trait implementations to convert from the error
//! types of the serialization and packaging stack into the unified Error type.

use super::types::Error;

impl From<std::fmt::Error> for Error {
    fn from(err: std::fmt::Error) -> Self {
        Error::XmlError(err.to_string())
    }
}

impl From<zip::result::ZipError> for Error {
    fn from(err: zip::result::ZipError) -> Self {
        Error::ZipError(err.to_string())
    }
}

impl From<base64::DecodeError> for Error {
    fn from(err: base64::DecodeError) -> Self {
        Error::InvalidImage(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fmt_error_maps_to_xml_error() {
        let err: Error = std::fmt::Error.into();
        assert!(matches!(err, Error::XmlError(_)));
    }

    #[test]
    fn test_malformed_layout_message() {
        let err = Error::malformed("Custom", "missing title");
        assert_eq!(
            err.to_string(),
            "Malformed layout definition 'Custom': missing title"
        );
    }
}
