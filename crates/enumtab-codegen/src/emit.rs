//! Rust source emitters.
//!
//! Each emitter appends declarations for one [`TypePlan`] to an [`Output`].
//! Declarations are written in dependency order: tables, `Display`,
//! `message()`, the reverse lookup, then the JSON impls, so every identifier
//! is declared before anything that refers to it.

use crate::strategy::{FALLBACK_FORMAT, Strategy, TypePlan};
use crate::table::PackedTable;
use crate::types::{Run, TextField};

/// Accumulates generated source for a single generation request.
#[derive(Debug, Default)]
pub(crate) struct Output {
    buf: String,
}

impl Output {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push_str(&mut self, text: &str) {
        self.buf.push_str(text);
    }

    pub fn line(&mut self, text: impl AsRef<str>) {
        self.buf.push_str(text.as_ref());
        self.buf.push('\n');
    }

    pub fn blank(&mut self) {
        self.buf.push('\n');
    }

    pub fn into_string(self) -> String {
        self.buf
    }
}

/// Knobs that change the emitted text but not its semantics.
#[derive(Debug, Clone)]
pub(crate) struct EmitOptions<'a> {
    /// Path of the module exporting `UnknownNameError` and `DecodeError`.
    pub runtime_path: &'a str,
    /// Whether to emit the serde impls and `decode_json`.
    pub json: bool,
}

/// `HttpStatus` -> `HTTP_STATUS`.
pub(crate) fn screaming_snake(name: &str) -> String {
    let chars: Vec<char> = name.chars().collect();
    let mut out = String::with_capacity(name.len() + 4);
    for (i, &c) in chars.iter().enumerate() {
        if c.is_uppercase() && i > 0 {
            let prev = chars[i - 1];
            let next_lower = chars.get(i + 1).is_some_and(|n| n.is_lowercase());
            if prev.is_lowercase() || prev.is_ascii_digit() || (prev.is_uppercase() && next_lower)
            {
                out.push('_');
            }
        }
        out.extend(c.to_uppercase());
    }
    out
}

/// Identifiers of the generated items for one type.
struct Names {
    type_name: String,
    prefix: String,
}

/// Prefix shared by every generated item of `type_name`.
pub(crate) fn item_prefix(type_name: &str) -> String {
    format!("_{}", screaming_snake(type_name))
}

impl Names {
    fn new(type_name: &str) -> Self {
        Self {
            type_name: type_name.to_string(),
            prefix: item_prefix(type_name),
        }
    }

    fn field(field: TextField) -> &'static str {
        match field {
            TextField::Name => "NAME",
            TextField::Message => "MSG",
        }
    }

    fn text(&self, field: TextField, suffix: &str) -> String {
        format!("{}_{}{}", self.prefix, Self::field(field), suffix)
    }

    fn index(&self, field: TextField, suffix: &str) -> String {
        format!("{}_{}_INDEX{}", self.prefix, Self::field(field), suffix)
    }

    fn map(&self, field: TextField) -> String {
        format!("{}_{}_MAP", self.prefix, Self::field(field))
    }

    fn name_to_value(&self) -> String {
        format!("{}_NAME_TO_VALUE", self.prefix)
    }

    fn payload(&self) -> String {
        format!("_{}JsonPayload", self.type_name)
    }

    /// Format string producing the fallback text from `self.0`.
    fn fallback_format(&self) -> String {
        FALLBACK_FORMAT
            .replace("{type}", &self.type_name)
            .replace("{value}", "{}")
    }
}

/// Table suffix for run `k`: empty when the plan has a single table.
fn suffix(plan: &TypePlan, k: usize) -> String {
    match plan.strategy() {
        Strategy::Multi => format!("_{k}"),
        Strategy::Single | Strategy::Map => String::new(),
    }
}

/// ` - 100`, ` + 3`, or nothing, so that `value OFFSET` is zero-based.
fn offset_expr(first: i128) -> String {
    match first {
        0 => String::new(),
        f if f > 0 => format!(" - {f}"),
        f => format!(" + {}", -f),
    }
}

fn slice_expr(text: &str, index: &str) -> String {
    format!("&{text}[{index}[i] as usize..{index}[i + 1] as usize]")
}

/// Emit every declaration for `plan`.
pub(crate) fn emit_type(out: &mut Output, plan: &TypePlan, options: &EmitOptions<'_>) {
    let names = Names::new(plan.type_name());

    emit_tables(out, plan, &names, TextField::Name);
    emit_tables(out, plan, &names, TextField::Message);
    emit_display(out, plan, &names);
    emit_message(out, plan, &names);
    emit_reverse_lookup(out, plan, &names, options);
    if options.json {
        emit_json(out, &names, options);
    }
}

fn emit_tables(out: &mut Output, plan: &TypePlan, names: &Names, field: TextField) {
    let tables = plan.tables(field);
    for (k, table) in tables.iter().enumerate() {
        let suffix = suffix(plan, k);
        out.line(format!(
            "const {}: &str = {:?};",
            names.text(field, &suffix),
            table.text()
        ));
        // A one-entry run in a match is returned whole; the map strategy
        // carries its offsets inline.
        let needs_index = match plan.strategy() {
            Strategy::Single => true,
            Strategy::Multi => table.len() > 1,
            Strategy::Map => false,
        };
        if needs_index {
            emit_index(out, &names.index(field, &suffix), table);
        }
    }
    if plan.strategy() == Strategy::Map {
        emit_value_map(out, plan, names, field, &tables[0]);
    }
    out.blank();
}

fn emit_index(out: &mut Output, ident: &str, table: &PackedTable) {
    let offsets: Vec<String> = table.index().iter().map(|o| o.to_string()).collect();
    out.line(format!(
        "static {ident}: [{}; {}] = [{}];",
        table.width().rust_name(),
        offsets.len(),
        offsets.join(", ")
    ));
}

fn emit_value_map(
    out: &mut Output,
    plan: &TypePlan,
    names: &Names,
    field: TextField,
    table: &PackedTable,
) {
    let text = names.text(field, "");
    out.line(format!(
        "static {}: ::std::sync::LazyLock<::std::collections::HashMap<{}, &'static str>> =",
        names.map(field),
        plan.repr().rust_name()
    ));
    out.line("    ::std::sync::LazyLock::new(|| {");
    out.line("        ::std::collections::HashMap::from([");
    for (entry, value) in plan.runs().values().enumerate() {
        if let Some(range) = table.range(entry) {
            out.line(format!(
                "            ({}, &{text}[{}..{}]),",
                value.literal, range.start, range.end
            ));
        }
    }
    out.line("        ])");
    out.line("    });");
}

/// Either side of a lookup: what to produce on a hit and on a miss.
struct Arms<'a> {
    hit: &'a dyn Fn(&str) -> String,
    miss: String,
}

/// Body of a value -> text accessor, indented for an `fn` inside an `impl`.
fn emit_lookup_body(
    out: &mut Output,
    plan: &TypePlan,
    names: &Names,
    field: TextField,
    arms: &Arms<'_>,
) {
    let tables = plan.tables(field);
    match plan.strategy() {
        Strategy::Single => {
            let run = &plan.runs().runs()[0];
            let first = run.first().key();
            out.line(format!("        let i = self.0 as i128{};", offset_expr(first)));
            let below = if plan.repr().is_signed() || first != 0 {
                "i < 0 || "
            } else {
                ""
            };
            out.line(format!("        if {below}i >= {} {{", run.len()));
            out.line(format!("            return {};", arms.miss));
            out.line("        }");
            out.line("        let i = i as usize;");
            let slice = slice_expr(&names.text(field, ""), &names.index(field, ""));
            out.line(format!("        {}", (arms.hit)(&slice)));
        }
        Strategy::Multi => {
            out.line("        match self.0 {");
            for (k, run) in plan.runs().runs().iter().enumerate() {
                emit_run_arm(out, plan, names, field, arms, k, run, &tables[k]);
            }
            out.line(format!("            _ => {},", arms.miss));
            out.line("        }");
        }
        Strategy::Map => {
            out.line(format!(
                "        match {}.get(&self.0).copied() {{",
                names.map(field)
            ));
            out.line(format!(
                "            ::core::option::Option::Some(s) => {},",
                (arms.hit)("s")
            ));
            out.line(format!(
                "            ::core::option::Option::None => {},",
                arms.miss
            ));
            out.line("        }");
        }
    }
}

#[allow(clippy::too_many_arguments)]
fn emit_run_arm(
    out: &mut Output,
    plan: &TypePlan,
    names: &Names,
    field: TextField,
    arms: &Arms<'_>,
    k: usize,
    run: &Run,
    table: &PackedTable,
) {
    let suffix = suffix(plan, k);
    let text = names.text(field, &suffix);
    if table.len() == 1 {
        out.line(format!(
            "            {} => {},",
            run.first().literal,
            (arms.hit)(&text)
        ));
        return;
    }
    out.line(format!(
        "            {}..={} => {{",
        run.first().literal,
        run.last().literal
    ));
    out.line(format!(
        "                let i = (self.0 as i128{}) as usize;",
        offset_expr(run.first().key())
    ));
    let slice = slice_expr(&text, &names.index(field, &suffix));
    out.line(format!("                {}", (arms.hit)(&slice)));
    out.line("            }");
}

fn emit_display(out: &mut Output, plan: &TypePlan, names: &Names) {
    let hit = |text: &str| format!("f.write_str({text})");
    let arms = Arms {
        hit: &hit,
        miss: format!("::core::write!(f, {:?}, self.0)", names.fallback_format()),
    };
    out.line(format!("impl ::core::fmt::Display for {} {{", names.type_name));
    out.line("    fn fmt(&self, f: &mut ::core::fmt::Formatter<'_>) -> ::core::fmt::Result {");
    emit_lookup_body(out, plan, names, TextField::Name, &arms);
    out.line("    }");
    out.line("}");
    out.blank();
}

fn emit_message(out: &mut Output, plan: &TypePlan, names: &Names) {
    let hit = |text: &str| format!("::std::borrow::Cow::Borrowed({text})");
    let arms = Arms {
        hit: &hit,
        miss: format!(
            "::std::borrow::Cow::Owned(::std::format!({:?}, self.0))",
            names.fallback_format()
        ),
    };
    out.line(format!("impl {} {{", names.type_name));
    out.line("    /// The message declared for this value, or its numeric form if undeclared.");
    out.line("    pub fn message(&self) -> ::std::borrow::Cow<'static, str> {");
    emit_lookup_body(out, plan, names, TextField::Message, &arms);
    out.line("    }");
    out.line("}");
    out.blank();
}

fn emit_reverse_lookup(
    out: &mut Output,
    plan: &TypePlan,
    names: &Names,
    options: &EmitOptions<'_>,
) {
    let rt = options.runtime_path;
    let type_name = &names.type_name;
    let map = names.name_to_value();

    out.line(format!(
        "static {map}: ::std::sync::LazyLock<::std::collections::HashMap<&'static str, {}>> =",
        plan.repr().rust_name()
    ));
    out.line("    ::std::sync::LazyLock::new(|| {");
    out.line("        ::std::collections::HashMap::from([");
    for slot in plan.slots() {
        let table = &plan.names()[slot.table];
        if let Some(range) = table.range(slot.entry) {
            out.line(format!(
                "            (&{}[{}..{}], {}),",
                names.text(TextField::Name, &suffix(plan, slot.table)),
                range.start,
                range.end,
                slot.value.literal
            ));
        }
    }
    out.line("        ])");
    out.line("    });");
    out.blank();

    out.line(format!("impl {type_name} {{"));
    out.line("    /// The value named `s`.");
    out.line(format!(
        "    pub fn from_name(s: &str) -> ::core::result::Result<Self, {rt}::UnknownNameError> {{"
    ));
    out.line(format!("        match {map}.get(s) {{"));
    out.line("            ::core::option::Option::Some(&v) => ::core::result::Result::Ok(Self(v)),");
    out.line(format!(
        "            ::core::option::Option::None => ::core::result::Result::Err({rt}::UnknownNameError::new(s, {type_name:?})),"
    ));
    out.line("        }");
    out.line("    }");
    out.line("}");
    out.blank();

    out.line(format!("impl ::core::str::FromStr for {type_name} {{"));
    out.line(format!("    type Err = {rt}::UnknownNameError;"));
    out.blank();
    out.line("    fn from_str(s: &str) -> ::core::result::Result<Self, Self::Err> {");
    out.line("        Self::from_name(s)");
    out.line("    }");
    out.line("}");
    out.blank();
}

fn emit_json(out: &mut Output, names: &Names, options: &EmitOptions<'_>) {
    let rt = options.runtime_path;
    let type_name = &names.type_name;
    let payload = names.payload();

    out.line(format!("impl ::serde::Serialize for {type_name} {{"));
    out.line("    fn serialize<S>(&self, serializer: S) -> ::core::result::Result<S::Ok, S::Error>");
    out.line("    where");
    out.line("        S: ::serde::Serializer,");
    out.line("    {");
    out.line("        use ::serde::ser::SerializeStruct;");
    out.line(format!(
        "        let mut state = serializer.serialize_struct({type_name:?}, 2)?;"
    ));
    out.line("        state.serialize_field(\"type\", &::std::string::ToString::to_string(self))?;");
    out.line("        state.serialize_field(\"message\", &self.message())?;");
    out.line("        state.end()");
    out.line("    }");
    out.line("}");
    out.blank();

    out.line("#[derive(::serde::Deserialize)]");
    out.line(format!("struct {payload} {{"));
    out.line("    #[serde(rename = \"type\", alias = \"name\")]");
    out.line("    name: ::std::string::String,");
    out.line("}");
    out.blank();

    out.line(format!("impl<'de> ::serde::Deserialize<'de> for {type_name} {{"));
    out.line("    fn deserialize<D>(deserializer: D) -> ::core::result::Result<Self, D::Error>");
    out.line("    where");
    out.line("        D: ::serde::Deserializer<'de>,");
    out.line("    {");
    out.line(format!(
        "        let payload = <{payload} as ::serde::Deserialize<'de>>::deserialize(deserializer)?;"
    ));
    out.line("        Self::from_name(&payload.name).map_err(<D::Error as ::serde::de::Error>::custom)");
    out.line("    }");
    out.line("}");
    out.blank();

    out.line(format!("impl {type_name} {{"));
    out.line("    /// Decode a `{\"type\": name}` payload into `self`, leaving it unchanged on error.");
    out.line(format!(
        "    pub fn decode_json(&mut self, data: &[u8]) -> ::core::result::Result<(), {rt}::DecodeError> {{"
    ));
    out.line(format!("        let payload: {payload} = ::serde_json::from_slice(data)"));
    out.line(format!(
        "            .map_err(|err| {rt}::DecodeError::malformed({type_name:?}, err))?;"
    ));
    out.line("        *self = Self::from_name(&payload.name)?;");
    out.line("        ::core::result::Result::Ok(())");
    out.line("    }");
    out.line("}");
    out.blank();
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::strategy::DEFAULT_MAX_SWITCH_RUNS;
    use crate::types::{Repr, Value};

    const OPTIONS: EmitOptions<'static> = EmitOptions {
        runtime_path: "::enumtab_codegen::runtime",
        json: true,
    };

    fn render(type_name: &str, repr: Repr, values: &[Value]) -> String {
        let plan = TypePlan::build(type_name, repr, values, DEFAULT_MAX_SWITCH_RUNS).unwrap();
        let mut out = Output::new();
        emit_type(&mut out, &plan, &OPTIONS);
        let code = out.into_string();
        if let Err(err) = syn::parse_file(&code) {
            panic!("generated code does not parse: {err}\n{code}");
        }
        code
    }

    fn fixture(keys: [i64; 5]) -> Vec<Value> {
        [
            ("NotFound", "User could not be found"),
            ("AlreadyExists", "User already exists"),
            ("NotSure", "Not sure what happened"),
            ("BadRequestData", "You didn't send a good request"),
            ("WorksOnMyMachine", "Works on my machine"),
        ]
        .into_iter()
        .zip(keys)
        .map(|((name, msg), key)| Value::signed(name, key).with_message(msg))
        .collect()
    }

    #[test]
    fn test_screaming_snake() {
        assert_eq!(screaming_snake("Error"), "ERROR");
        assert_eq!(screaming_snake("HttpStatus"), "HTTP_STATUS");
        assert_eq!(screaming_snake("HTTPStatus"), "HTTP_STATUS");
        assert_eq!(screaming_snake("Code2Name"), "CODE2_NAME");
    }

    #[test]
    fn test_single_run_tables() {
        let code = render("Error", Repr::I32, &fixture([0, 1, 2, 3, 4]));
        assert!(code.contains(
            "const _ERROR_NAME: &str = \"NotFoundAlreadyExistsNotSureBadRequestDataWorksOnMyMachine\";"
        ));
        assert!(code.contains("static _ERROR_NAME_INDEX: [u8; 6] = [0, 8, 21, 28, 42, 58];"));
        assert!(code.contains("static _ERROR_MSG_INDEX: [u8; 6] = [0, 23, 42, 64, 94, 113];"));
        assert!(code.contains("let i = self.0 as i128;"));
        assert!(code.contains("if i < 0 || i >= 5 {"));
        assert!(code.contains("return ::core::write!(f, \"Error({})\", self.0);"));
    }

    #[test]
    fn test_single_run_with_offset() {
        let code = render("Error", Repr::I32, &fixture([100, 101, 102, 103, 104]));
        assert!(code.contains("let i = self.0 as i128 - 100;"));
        assert!(code.contains("(&_ERROR_NAME[0..8], 100),"));
        assert!(code.contains("(&_ERROR_NAME[42..58], 104),"));
    }

    #[test]
    fn test_unsigned_zero_based_skips_negative_check() {
        let values: Vec<_> = (0..3).map(|i| Value::unsigned(format!("V{i}"), i)).collect();
        let code = render("Flag", Repr::U8, &values);
        assert!(code.contains("if i >= 3 {"));
        assert!(!code.contains("i < 0"));
    }

    #[test]
    fn test_negative_first_value() {
        let values: Vec<_> = (-2..=2).map(|i| Value::signed(format!("V{}", i + 2), i)).collect();
        let code = render("Level", Repr::I8, &values);
        assert!(code.contains("let i = self.0 as i128 + 2;"));
    }

    #[test]
    fn test_multiple_runs() {
        let code = render("Error", Repr::I32, &fixture([100, 101, 103, 104, 105]));
        assert!(code.contains("const _ERROR_NAME_0: &str = \"NotFoundAlreadyExists\";"));
        assert!(code.contains("static _ERROR_NAME_INDEX_1: [u8; 4] = [0, 7, 21, 37];"));
        assert!(code.contains("static _ERROR_MSG_INDEX_0: [u8; 3] = [0, 23, 42];"));
        assert!(code.contains("100..=101 => {"));
        assert!(code.contains("103..=105 => {"));
        assert!(code.contains("let i = (self.0 as i128 - 103) as usize;"));
        assert!(code.contains("(&_ERROR_NAME_1[7..21], 104),"));
    }

    #[test]
    fn test_trivial_run_returns_whole_table() {
        let code = render("Error", Repr::I32, &fixture([0, 1, 5, 7, 8]));
        assert!(code.contains("5 => f.write_str(_ERROR_NAME_1),"));
        assert!(code.contains("5 => ::std::borrow::Cow::Borrowed(_ERROR_MSG_1),"));
        assert!(!code.contains("_ERROR_NAME_INDEX_1"));
        assert!(code.contains("0..=1 => {"));
        assert!(code.contains("let i = (self.0 as i128) as usize;"));
    }

    #[test]
    fn test_sparse_values_use_map() {
        let values: Vec<_> = (0..11)
            .map(|i| Value::signed(format!("V{i}"), i * 10 - 50))
            .collect();
        let code = render("Sparse", Repr::I64, &values);
        assert!(code.contains("const _SPARSE_NAME: &str = \"V0V1V2V3V4V5V6V7V8V9V10\";"));
        assert!(!code.contains("_SPARSE_NAME_INDEX"));
        assert!(code.contains(
            "static _SPARSE_NAME_MAP: ::std::sync::LazyLock<::std::collections::HashMap<i64, &'static str>> ="
        ));
        assert!(code.contains("(-50, &_SPARSE_NAME[0..2]),"));
        assert!(code.contains("(50, &_SPARSE_NAME[20..23]),"));
        assert!(code.contains("match _SPARSE_MSG_MAP.get(&self.0).copied() {"));
    }

    #[test]
    fn test_reverse_lookup_and_json() {
        let code = render("Error", Repr::I32, &fixture([0, 1, 2, 3, 4]));
        assert!(code.contains(
            "pub fn from_name(s: &str) -> ::core::result::Result<Self, ::enumtab_codegen::runtime::UnknownNameError> {"
        ));
        assert!(code.contains("impl ::core::str::FromStr for Error {"));
        assert!(code.contains("impl ::serde::Serialize for Error {"));
        assert!(code.contains("#[serde(rename = \"type\", alias = \"name\")]"));
        assert!(code.contains("pub fn decode_json(&mut self, data: &[u8])"));
    }

    #[test]
    fn test_declaration_order() {
        let code = render("Error", Repr::I32, &fixture([0, 1, 2, 3, 4]));
        let positions: Vec<usize> = [
            "const _ERROR_NAME:",
            "const _ERROR_MSG:",
            "impl ::core::fmt::Display for Error",
            "pub fn message(&self)",
            "static _ERROR_NAME_TO_VALUE",
            "pub fn from_name",
            "impl ::serde::Serialize for Error",
            "pub fn decode_json",
        ]
        .iter()
        .map(|needle| code.find(needle).unwrap())
        .collect();
        assert!(positions.windows(2).all(|w| w[0] < w[1]));
    }

    #[test]
    fn test_json_can_be_disabled() {
        let plan = TypePlan::build("Error", Repr::I32, &fixture([0, 1, 2, 3, 4]), 10).unwrap();
        let mut out = Output::new();
        emit_type(
            &mut out,
            &plan,
            &EmitOptions {
                json: false,
                ..OPTIONS
            },
        );
        let code = out.into_string();
        assert!(!code.contains("serde"));
        assert!(code.contains("pub fn from_name"));
    }

    #[test]
    fn test_text_is_escaped() {
        let values = [Value::unsigned("Quote", 0).with_message("say \"hi\"\\\ttab")];
        let code = render("Escaped", Repr::U16, &values);
        assert!(code.contains(r#"const _ESCAPED_MSG: &str = "say \"hi\"\\\ttab";"#));
    }
}
