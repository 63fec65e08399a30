//! Generation-time errors.
//!
//! Any of these aborts generation for the whole request; no partial output
//! is produced.

/// Result type used by this crate.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors produced while collecting values or generating accessors.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// A type was asked for with no declared values.
    #[error("no values defined for type {type_name}")]
    EmptyInput {
        /// The declared type name.
        type_name: String,
    },

    /// Values of one type disagree on signed/unsigned interpretation.
    #[error("values of type {type_name} mix signed and unsigned interpretations")]
    MixedSignedness {
        /// The declared type name.
        type_name: String,
    },

    /// A type carrying the marker derive is not a newtype over a primitive integer.
    #[error("type {type_name} must be a tuple struct wrapping one primitive integer")]
    NotANewtype {
        /// The declared type name.
        type_name: String,
    },

    /// The front end found a constant whose value is not an integer literal.
    #[error("value of constant {type_name}::{name} is not an integer literal (found {found})")]
    NotAnInteger {
        /// The declared type name.
        type_name: String,
        /// The constant name.
        name: String,
        /// What kind of expression was found instead.
        found: &'static str,
    },

    /// The front end found an integer literal that does not fit the newtype's repr.
    #[error("value {literal} of constant {type_name}::{name} does not fit in {repr}")]
    ValueOutOfRange {
        /// The declared type name.
        type_name: String,
        /// The constant name.
        name: String,
        /// The literal as written.
        literal: String,
        /// Rust name of the inner integer type.
        repr: &'static str,
    },

    /// The concatenated text of a table cannot be addressed by a 32-bit index.
    #[error("cannot store {bytes} bytes of table text: offsets are limited to u32")]
    TableTooLarge {
        /// Attempted byte length.
        bytes: usize,
    },

    /// Two type names map to the same prefix for generated items.
    #[error("types {first} and {second} both generate items prefixed {prefix}")]
    NameCollision {
        /// The type generated first.
        first: String,
        /// The type whose items would redeclare the first's.
        second: String,
        /// The shared identifier prefix.
        prefix: String,
    },

    /// `generate_type` was called for a type that was never registered.
    #[error("type {type_name} is not registered with the generator")]
    UnknownType {
        /// The requested type name.
        type_name: String,
    },

    /// Rust source handed to the front end did not parse.
    #[error("failed to parse Rust source: {0}")]
    Parse(#[from] syn::Error),

    /// Reading sources or writing output failed.
    #[error(transparent)]
    Io(#[from] std::io::Error),
}
