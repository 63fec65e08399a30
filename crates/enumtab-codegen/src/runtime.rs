//! Error types returned by generated accessors.
//!
//! Generated code refers to this module by path (see
//! [`CodeGenerator::set_runtime_path`](crate::CodeGenerator::set_runtime_path)),
//! so crates including generated code depend on `enumtab-codegen` as a
//! regular dependency, not only as a build-dependency.

use std::fmt;

/// A string that is not the name of any value of the target type.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{name:?} is not the name of a value of type {type_name}")]
pub struct UnknownNameError {
    name: String,
    type_name: String,
}

impl UnknownNameError {
    pub fn new(name: impl Into<String>, type_name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            type_name: type_name.into(),
        }
    }

    /// The rejected name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Display name of the type the lookup was made against.
    pub fn type_name(&self) -> &str {
        &self.type_name
    }
}

/// Failure of a structured (JSON) decode.
///
/// The decode target is left unmodified whenever this is returned.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DecodeError {
    /// The payload was well formed but named no known value.
    #[error(transparent)]
    UnknownName(#[from] UnknownNameError),

    /// The payload was not an object carrying a string name field.
    #[error("malformed {type_name} payload: {reason}")]
    MalformedPayload { type_name: String, reason: String },
}

impl DecodeError {
    pub fn malformed(type_name: impl Into<String>, reason: impl fmt::Display) -> Self {
        DecodeError::MalformedPayload {
            type_name: type_name.into(),
            reason: reason.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unknown_name_message() {
        let err = UnknownNameError::new("Bogus", "Error");
        assert_eq!(err.name(), "Bogus");
        assert_eq!(err.type_name(), "Error");
        assert_eq!(
            err.to_string(),
            "\"Bogus\" is not the name of a value of type Error"
        );
    }

    #[test]
    fn test_decode_error_wraps_unknown_name() {
        let err: DecodeError = UnknownNameError::new("Bogus", "Error").into();
        assert!(matches!(err, DecodeError::UnknownName(_)));
        assert!(err.to_string().contains("Bogus"));
        let err = DecodeError::malformed("Error", "expected an object");
        assert_eq!(err.to_string(), "malformed Error payload: expected an object");
    }
}
