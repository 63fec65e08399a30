//! Accessor code generator for integer newtypes.

use crate::emit::{EmitOptions, Output, emit_type, item_prefix};
use crate::error::{Error, Result};
use crate::strategy::{DEFAULT_MAX_SWITCH_RUNS, TypePlan};
use crate::types::{Repr, Value};
use std::collections::{BTreeMap, HashMap};
use std::fs;
use std::io::Write;
use std::path::Path;

/// Default path of the module providing the runtime error types.
pub const DEFAULT_RUNTIME_PATH: &str = "::enumtab_codegen::runtime";

/// A declared newtype and the constants found for it.
#[derive(Debug, Clone)]
pub(crate) struct TypeEntry {
    pub repr: Repr,
    /// Values in declaration order.
    pub values: Vec<Value>,
}

/// Code generator that collects declared types and outputs Rust accessors.
///
/// For each type it emits packed name and message tables, a `Display` impl,
/// a `message()` method, `from_name` plus `FromStr`, and (unless disabled)
/// `serde` impls with an in-place `decode_json`.
///
/// # Example
///
/// ```
/// use enumtab_codegen::{CodeGenerator, Repr, Value};
///
/// let mut codegen = CodeGenerator::new();
/// codegen.add_type("Error", Repr::I32, &[
///     Value::signed("NotFound", 0).with_message("User could not be found"),
///     Value::signed("AlreadyExists", 1).with_message("User already exists"),
/// ]);
/// let code = codegen.generate().unwrap();
/// assert!(code.contains("impl ::core::fmt::Display for Error"));
/// ```
#[derive(Debug)]
pub struct CodeGenerator {
    /// All declared types, keyed by type name.
    pub(crate) types: BTreeMap<String, TypeEntry>,

    /// Custom header comment
    header: Option<String>,

    /// Largest run count still rendered as a `match` over ranges.
    max_switch_runs: usize,

    /// Path that generated code uses to reach the runtime error types.
    runtime_path: String,

    /// Whether to emit `serde` impls and `decode_json`.
    emit_json: bool,
}

impl Default for CodeGenerator {
    fn default() -> Self {
        Self {
            types: BTreeMap::new(),
            header: None,
            max_switch_runs: DEFAULT_MAX_SWITCH_RUNS,
            runtime_path: DEFAULT_RUNTIME_PATH.to_string(),
            emit_json: true,
        }
    }
}

impl CodeGenerator {
    /// Create a new code generator with default settings.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set a custom header comment for the generated file.
    pub fn set_header(&mut self, header: impl Into<String>) -> &mut Self {
        self.header = Some(header.into());
        self
    }

    /// Set the largest number of runs rendered as a range `match`.
    ///
    /// Types whose values form more runs than this fall back to a hash map.
    /// Defaults to [`DEFAULT_MAX_SWITCH_RUNS`].
    pub fn set_max_switch_runs(&mut self, runs: usize) -> &mut Self {
        self.max_switch_runs = runs;
        self
    }

    /// Set the path generated code uses for `UnknownNameError` and
    /// `DecodeError`.
    ///
    /// Defaults to `::enumtab_codegen::runtime`. Change it when the crate is
    /// renamed or re-exported.
    pub fn set_runtime_path(&mut self, path: impl Into<String>) -> &mut Self {
        self.runtime_path = path.into();
        self
    }

    /// Enable or disable the JSON accessors.
    ///
    /// When `true` (the default), the output implements `serde::Serialize`
    /// and `serde::Deserialize` and adds `decode_json`, so the including
    /// crate must depend on `serde` (with `derive`) and `serde_json`.
    pub fn emit_json(&mut self, enabled: bool) -> &mut Self {
        self.emit_json = enabled;
        self
    }

    /// Add a type and its values, in declaration order.
    ///
    /// Replaces any type previously added under the same name.
    ///
    /// # Example
    ///
    /// ```
    /// use enumtab_codegen::{CodeGenerator, Repr, Value};
    ///
    /// let mut codegen = CodeGenerator::new();
    /// codegen.add_type("Color", Repr::U8, &[
    ///     Value::unsigned("Red", 1),
    ///     Value::unsigned("Green", 2),
    /// ]);
    /// ```
    pub fn add_type(
        &mut self,
        name: impl Into<String>,
        repr: Repr,
        values: &[Value],
    ) -> &mut Self {
        self.types.insert(
            name.into(),
            TypeEntry {
                repr,
                values: values.to_vec(),
            },
        );
        self
    }

    /// Names of all declared types, in generation order.
    pub fn type_names(&self) -> impl Iterator<Item = &str> {
        self.types.keys().map(String::as_str)
    }

    /// Normalize and plan one declared type without rendering it.
    pub fn plan(&self, type_name: &str) -> Result<TypePlan> {
        let entry = self.types.get(type_name).ok_or_else(|| Error::UnknownType {
            type_name: type_name.to_string(),
        })?;
        TypePlan::build(type_name, entry.repr, &entry.values, self.max_switch_runs)
    }

    /// Generate the declarations for one type.
    pub fn generate_type(&self, type_name: &str) -> Result<String> {
        let plan = self.plan(type_name)?;
        let mut output = Output::new();
        emit_type(&mut output, &plan, &self.emit_options());
        let code = output.into_string();
        check_syntax(type_name, &code);
        Ok(code)
    }

    /// Generate the Rust code for every declared type.
    ///
    /// Any failing type aborts the whole generation, as do two types whose
    /// generated item names would clash (`HttpStatus` and `HTTPStatus`).
    pub fn generate(&self) -> Result<String> {
        self.check_prefixes()?;
        let mut output = Output::new();

        // Header
        match &self.header {
            Some(header) => {
                for line in header.lines() {
                    output.line(format!("// {line}").trim_end());
                }
            }
            None => {
                output.line("// Auto-generated by enumtab-codegen");
                output.line("// DO NOT EDIT MANUALLY");
            }
        }
        output.blank();

        for type_name in self.types.keys() {
            output.push_str(&self.generate_type(type_name)?);
        }

        Ok(output.into_string().trim_end().to_string() + "\n")
    }

    /// Write the generated code to a file.
    pub fn write_to_file(&self, path: impl AsRef<Path>) -> Result<()> {
        let code = self.generate()?;
        fs::write(path, code)?;
        Ok(())
    }

    /// Write the generated code to a writer.
    pub fn write_to<W: Write>(&self, mut writer: W) -> Result<()> {
        let code = self.generate()?;
        writer.write_all(code.as_bytes())?;
        Ok(())
    }

    fn check_prefixes(&self) -> Result<()> {
        let mut seen: HashMap<String, &str> = HashMap::new();
        for type_name in self.types.keys() {
            let prefix = item_prefix(type_name);
            if let Some(first) = seen.get(&prefix) {
                return Err(Error::NameCollision {
                    first: first.to_string(),
                    second: type_name.clone(),
                    prefix,
                });
            }
            seen.insert(prefix, type_name);
        }
        Ok(())
    }

    fn emit_options(&self) -> EmitOptions<'_> {
        EmitOptions {
            runtime_path: &self.runtime_path,
            json: self.emit_json,
        }
    }
}

/// Report generated code that is not valid Rust.
///
/// Should never happen; the code is still returned so compiling it shows
/// the error in context.
fn check_syntax(type_name: &str, code: &str) {
    if let Err(err) = syn::parse_file(code) {
        tracing::warn!(
            type_name,
            error = %err,
            "internal error: generated code for type does not parse"
        );
    }
}
