//! Proc-macro providing the `#[derive(Enumtab)]` attribute.
//!
//! This macro is a **no-op annotation**. It marks an integer newtype whose
//! associated constants should get packed-string accessors generated by
//! `enumtab-codegen` in your build.rs.
//!
//! # Example
//!
//! ```rust,ignore
//! use enumtab_codegen::Enumtab;
//!
//! #[derive(Clone, Copy, Enumtab)]
//! pub struct Error(pub i32);
//!
//! impl Error {
//!     /// User could not be found
//!     pub const NotFound: Self = Self(0);
//! }
//! ```
//!
//! Then in your build.rs:
//!
//! ```rust,ignore
//! use enumtab_codegen::CodeGenerator;
//!
//! fn main() {
//!     let mut codegen = CodeGenerator::new();
//!     codegen.add_source_file("src/codes.rs").unwrap();
//!     codegen.write_to_file(out_dir.join("codes_enumtab.rs")).unwrap();
//! }
//! ```

use proc_macro::TokenStream;

/// Marker derive macro for accessor generation.
///
/// Expands to nothing. The generator recognizes it when scanning sources.
#[proc_macro_derive(Enumtab)]
pub fn derive_enumtab(_input: TokenStream) -> TokenStream {
    TokenStream::new()
}
