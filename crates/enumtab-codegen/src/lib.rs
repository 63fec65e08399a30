//! # enumtab-codegen
//!
//! Accessor generator for integer newtypes. For every type it writes the
//! value names and messages into packed string tables and emits `Display`,
//! `message()`, `from_name`/`FromStr` and JSON accessors that look values up
//! in those tables.
//!
//! ## Usage
//!
//! ### 1. Annotate your newtypes with `#[derive(Enumtab)]`
//!
//! ```rust,ignore
//! use enumtab_codegen::Enumtab;
//!
//! #[derive(Clone, Copy, PartialEq, Eq, Enumtab)]
//! pub struct Error(pub i32);
//!
//! #[allow(non_upper_case_globals)]
//! impl Error {
//!     /// User could not be found
//!     pub const NotFound: Self = Self(0);
//!     /// User already exists
//!     pub const AlreadyExists: Self = Self(1);
//! }
//!
//! include!(concat!(env!("OUT_DIR"), "/codes_enumtab.rs"));
//! ```
//!
//! ### 2. Generate accessors in build.rs
//!
//! ```rust,ignore
//! // build.rs
//! use enumtab_codegen::CodeGenerator;
//! use std::path::PathBuf;
//!
//! fn main() {
//!     let out_dir = PathBuf::from(std::env::var("OUT_DIR").unwrap());
//!     CodeGenerator::new()
//!         .add_source_file("src/codes.rs").unwrap()
//!         .write_to_file(out_dir.join("codes_enumtab.rs")).unwrap();
//!
//!     println!("cargo:rerun-if-changed=src/codes.rs");
//! }
//! ```
//!
//! With the default settings the including crate also needs `serde` (with
//! `derive`) and `serde_json`; call [`CodeGenerator::emit_json`] with
//! `false` to leave the JSON accessors out.
//!
//! ## Lookup strategies
//!
//! Values are sorted and split into runs of consecutive integers. One run is
//! a bounds check plus a slice; a few runs become a `match` over ranges; many
//! runs fall back to a hash map. See [`Strategy`].

mod emit;
mod error;
mod extractor;
mod generator;
mod normalize;
mod strategy;
mod table;
mod types;

pub mod runtime;

pub use error::{Error, Result};
pub use generator::{CodeGenerator, DEFAULT_RUNTIME_PATH};
pub use normalize::normalize;
pub use strategy::{
    DEFAULT_MAX_SWITCH_RUNS, FALLBACK_FORMAT, Strategy, TypePlan, fallback_text, select_strategy,
};
pub use table::{IndexWidth, PackedTable, build_table};
pub use types::{Repr, Run, RunSet, TextField, Value};

#[cfg(feature = "derive")]
pub use enumtab_derive::Enumtab;
