//! Source file parser that extracts newtypes annotated with `#[derive(Enumtab)]`.
//!
//! A marked type must be a tuple struct wrapping one primitive integer:
//!
//! ```rust,ignore
//! #[derive(Clone, Copy, Enumtab)]
//! pub struct Error(pub i32);
//!
//! #[allow(non_upper_case_globals)]
//! impl Error {
//!     /// User could not be found
//!     pub const NotFound: Self = Self(0);
//!     /// User already exists
//!     pub const AlreadyExists: Self = Self(1);
//! }
//! ```
//!
//! Every associated `const` of type `Self` (or the type's own name) in an
//! inherent impl in the same source becomes a value, named after the const
//! and carrying its doc comment as the message. Values must be integer
//! literals, optionally negated; constant expressions are not evaluated.
//!
//! ## Use-item analysis
//!
//! The marker derive is recognized through `use` statements the same way
//! the compiler would resolve it:
//!
//! - `use enumtab_codegen::Enumtab` makes `#[derive(Enumtab)]` a marker
//! - `use enumtab_codegen::Enumtab as Strings` makes `#[derive(Strings)]` a marker
//! - qualified paths ending in `::Enumtab` are always markers

use crate::CodeGenerator;
use crate::error::{Error, Result};
use crate::types::{Repr, Value};
use std::collections::{BTreeMap, HashMap};
use std::fs;
use std::path::Path;
use syn::{Attribute, Expr, Fields, ImplItem, Lit, Type, TypePath, UnOp, UseTree};

/// Per-file context built from `use` items.
struct SourceContext {
    /// Maps local name -> fully-qualified path.
    ///
    /// Populated for both plain imports (`use foo::Bar` -> `"Bar" => "foo::Bar"`)
    /// and renames (`use foo::Bar as Baz` -> `"Baz" => "foo::Bar"`).
    /// Glob imports are not tracked since they can't be resolved statically.
    imports: HashMap<String, String>,
}

/// Recursively flatten a `UseTree` into import entries.
fn collect_imports(tree: &UseTree, prefix: &[String], imports: &mut HashMap<String, String>) {
    match tree {
        UseTree::Path(p) => {
            let mut new_prefix = prefix.to_vec();
            new_prefix.push(p.ident.to_string());
            collect_imports(&p.tree, &new_prefix, imports);
        }
        UseTree::Name(n) => {
            let name = n.ident.to_string();
            let full_path = make_full_path(prefix, &name);
            imports.insert(name, full_path);
        }
        UseTree::Rename(r) => {
            let full_path = make_full_path(prefix, &r.ident.to_string());
            imports.insert(r.rename.to_string(), full_path);
        }
        UseTree::Glob(_) => {}
        UseTree::Group(g) => {
            for item in &g.items {
                collect_imports(item, prefix, imports);
            }
        }
    }
}

fn make_full_path(prefix: &[String], name: &str) -> String {
    if prefix.is_empty() {
        name.to_string()
    } else {
        format!("{}::{}", prefix.join("::"), name)
    }
}

fn build_source_context(file: &syn::File) -> SourceContext {
    let mut imports = HashMap::new();
    for item in &file.items {
        if let syn::Item::Use(item_use) = item {
            collect_imports(&item_use.tree, &[], &mut imports);
        }
    }
    SourceContext { imports }
}

/// Fully-qualified paths of the marker derive.
const MARKERS: [&str; 2] = ["enumtab_codegen::Enumtab", "enumtab_derive::Enumtab"];

/// Check if an item has the `Enumtab` marker derive.
fn has_marker_derive(attrs: &[Attribute], ctx: &SourceContext) -> bool {
    for attr in attrs {
        if attr.path().is_ident("derive")
            && let Ok(nested) = attr.parse_args_with(
                syn::punctuated::Punctuated::<syn::Path, syn::Token![,]>::parse_terminated,
            )
        {
            for path in nested {
                if path.segments.len() == 1 {
                    // Unqualified: resolve via imports
                    let ident = path.segments[0].ident.to_string();
                    if ctx
                        .imports
                        .get(&ident)
                        .is_some_and(|p| MARKERS.contains(&p.as_str()))
                    {
                        return true;
                    }
                } else if path
                    .segments
                    .last()
                    .is_some_and(|segment| segment.ident == "Enumtab")
                {
                    return true;
                }
            }
        }
    }
    false
}

/// The last path segment of a type, if it is a plain path.
fn type_ident(ty: &Type) -> Option<String> {
    match ty {
        Type::Path(TypePath { qself: None, path }) => {
            path.segments.last().map(|s| s.ident.to_string())
        }
        Type::Group(group) => type_ident(&group.elem),
        Type::Paren(paren) => type_ident(&paren.elem),
        _ => None,
    }
}

/// The repr of `struct Name(iN)`, if the fields describe such a newtype.
fn newtype_repr(fields: &Fields) -> Option<Repr> {
    let Fields::Unnamed(unnamed) = fields else {
        return None;
    };
    if unnamed.unnamed.len() != 1 {
        return None;
    }
    let ty = &unnamed.unnamed[0].ty;
    if let Type::Path(TypePath { qself: None, path }) = ty
        && path.segments.len() == 1
    {
        return Repr::from_rust_name(&path.segments[0].ident.to_string());
    }
    None
}

/// Doc comment text, one line per `///` with the conventional leading space removed.
fn doc_text(attrs: &[Attribute]) -> String {
    let mut lines = Vec::new();
    for attr in attrs {
        if attr.path().is_ident("doc")
            && let syn::Meta::NameValue(nv) = &attr.meta
            && let Expr::Lit(expr_lit) = &nv.value
            && let Lit::Str(s) = &expr_lit.lit
        {
            let line = s.value();
            lines.push(line.strip_prefix(' ').unwrap_or(&line).to_string());
        }
    }
    lines.join("\n")
}

/// Short description of an expression that is not an integer literal.
fn expr_kind(expr: &Expr) -> &'static str {
    match expr {
        Expr::Binary(_) => "a binary expression",
        Expr::Call(_) => "a function call",
        Expr::Cast(_) => "a cast",
        Expr::Lit(_) => "a non-integer literal",
        Expr::Macro(_) => "a macro invocation",
        Expr::MethodCall(_) => "a method call",
        Expr::Path(_) => "a path",
        Expr::Unary(_) => "a unary expression",
        _ => "an expression",
    }
}

/// An integer literal, optionally negated or parenthesized.
///
/// Returns the value and the literal as written.
fn int_literal(expr: &Expr) -> std::result::Result<(i128, String), &'static str> {
    match expr {
        Expr::Lit(expr_lit) => match &expr_lit.lit {
            Lit::Int(lit) => lit
                .base10_parse::<i128>()
                .map(|v| (v, lit.to_string()))
                .map_err(|_| "an integer literal wider than 128 bits"),
            _ => Err(expr_kind(expr)),
        },
        Expr::Unary(unary) if matches!(unary.op, UnOp::Neg(_)) => {
            let (value, text) = int_literal(&unary.expr)?;
            Ok((-value, format!("-{text}")))
        }
        Expr::Paren(paren) => int_literal(&paren.expr),
        Expr::Group(group) => int_literal(&group.expr),
        _ => Err(expr_kind(expr)),
    }
}

/// The argument of `Self(arg)` or `Name(arg)`.
fn constructor_arg<'a>(expr: &'a Expr, type_name: &str) -> Option<&'a Expr> {
    let Expr::Call(call) = expr else {
        return None;
    };
    let Expr::Path(func) = &*call.func else {
        return None;
    };
    let callee = func.path.segments.last()?.ident.to_string();
    if (callee == "Self" || callee == type_name) && call.args.len() == 1 {
        call.args.first()
    } else {
        None
    }
}

fn extract_const(
    item: &syn::ImplItemConst,
    type_name: &str,
    repr: Repr,
) -> Result<Option<Value>> {
    let declared = type_ident(&item.ty);
    if declared.as_deref() != Some("Self") && declared.as_deref() != Some(type_name) {
        return Ok(None);
    }
    let name = item.ident.to_string();
    let arg = constructor_arg(&item.expr, type_name).ok_or_else(|| Error::NotAnInteger {
        type_name: type_name.to_string(),
        name: name.clone(),
        found: expr_kind(&item.expr),
    })?;
    let (value, literal) = int_literal(arg).map_err(|found| Error::NotAnInteger {
        type_name: type_name.to_string(),
        name: name.clone(),
        found,
    })?;
    let value = Value::of_repr(&name, repr, value).ok_or_else(|| Error::ValueOutOfRange {
        type_name: type_name.to_string(),
        name: name.clone(),
        literal,
        repr: repr.rust_name(),
    })?;
    Ok(Some(value.with_message(doc_text(&item.attrs))))
}

fn parse_source_file(codegen: &mut CodeGenerator, source: &str) -> Result<()> {
    let file = syn::parse_file(source)?;
    let ctx = build_source_context(&file);

    // Marked types first, so impls may precede their struct.
    let mut found: BTreeMap<String, (Repr, Vec<Value>)> = BTreeMap::new();
    for item in &file.items {
        if let syn::Item::Struct(s) = item
            && has_marker_derive(&s.attrs, &ctx)
        {
            let type_name = s.ident.to_string();
            let repr = newtype_repr(&s.fields).ok_or_else(|| Error::NotANewtype {
                type_name: type_name.clone(),
            })?;
            found.insert(type_name, (repr, Vec::new()));
        }
    }

    for item in &file.items {
        let syn::Item::Impl(item_impl) = item else {
            continue;
        };
        if item_impl.trait_.is_some() {
            continue;
        }
        let Some(type_name) = type_ident(&item_impl.self_ty) else {
            continue;
        };
        let Some((repr, values)) = found.get_mut(&type_name) else {
            continue;
        };
        for impl_item in &item_impl.items {
            if let ImplItem::Const(item_const) = impl_item
                && let Some(value) = extract_const(item_const, &type_name, *repr)?
            {
                values.push(value);
            }
        }
    }

    for (type_name, (repr, values)) in found {
        tracing::debug!(
            type_name = type_name.as_str(),
            %repr,
            values = values.len(),
            "extracted type"
        );
        codegen.add_type(type_name, repr, &values);
    }
    Ok(())
}

impl CodeGenerator {
    /// Parse a single Rust source file and add every marked newtype.
    ///
    /// # Example
    ///
    /// ```no_run
    /// # fn main() -> Result<(), enumtab_codegen::Error> {
    /// use enumtab_codegen::CodeGenerator;
    ///
    /// let mut generator = CodeGenerator::new();
    /// generator.add_source_file("src/codes.rs")?;
    /// generator.write_to_file("codes_enumtab.rs")?;
    /// # Ok(())
    /// # }
    /// ```
    pub fn add_source_file(&mut self, path: impl AsRef<Path>) -> Result<&mut Self> {
        let source = fs::read_to_string(path)?;
        parse_source_file(self, &source)?;
        Ok(self)
    }

    /// Parse Rust source from a string and add every marked newtype.
    pub fn add_source_str(&mut self, source: &str) -> Result<&mut Self> {
        parse_source_file(self, source)?;
        Ok(self)
    }
}
