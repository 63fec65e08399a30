//! Value model for the code generator.

use std::fmt;

/// The primitive integer wrapped by a generated-for newtype.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Repr {
    I8,
    I16,
    I32,
    I64,
    Isize,
    U8,
    U16,
    U32,
    U64,
    Usize,
}

impl Repr {
    /// Look up a repr by its Rust type name (`"i32"`, `"u8"`, ...).
    pub fn from_rust_name(name: &str) -> Option<Self> {
        Some(match name {
            "i8" => Repr::I8,
            "i16" => Repr::I16,
            "i32" => Repr::I32,
            "i64" => Repr::I64,
            "isize" => Repr::Isize,
            "u8" => Repr::U8,
            "u16" => Repr::U16,
            "u32" => Repr::U32,
            "u64" => Repr::U64,
            "usize" => Repr::Usize,
            _ => return None,
        })
    }

    /// The Rust type name used in generated code.
    pub fn rust_name(self) -> &'static str {
        match self {
            Repr::I8 => "i8",
            Repr::I16 => "i16",
            Repr::I32 => "i32",
            Repr::I64 => "i64",
            Repr::Isize => "isize",
            Repr::U8 => "u8",
            Repr::U16 => "u16",
            Repr::U32 => "u32",
            Repr::U64 => "u64",
            Repr::Usize => "usize",
        }
    }

    pub fn is_signed(self) -> bool {
        matches!(
            self,
            Repr::I8 | Repr::I16 | Repr::I32 | Repr::I64 | Repr::Isize
        )
    }

    /// Smallest representable value. Pointer-sized reprs are treated as 64-bit.
    pub fn min(self) -> i128 {
        match self {
            Repr::I8 => i8::MIN as i128,
            Repr::I16 => i16::MIN as i128,
            Repr::I32 => i32::MIN as i128,
            Repr::I64 | Repr::Isize => i64::MIN as i128,
            Repr::U8 | Repr::U16 | Repr::U32 | Repr::U64 | Repr::Usize => 0,
        }
    }

    /// Largest representable value. Pointer-sized reprs are treated as 64-bit.
    pub fn max(self) -> i128 {
        match self {
            Repr::I8 => i8::MAX as i128,
            Repr::I16 => i16::MAX as i128,
            Repr::I32 => i32::MAX as i128,
            Repr::I64 | Repr::Isize => i64::MAX as i128,
            Repr::U8 => u8::MAX as i128,
            Repr::U16 => u16::MAX as i128,
            Repr::U32 => u32::MAX as i128,
            Repr::U64 | Repr::Usize => u64::MAX as i128,
        }
    }

    pub fn contains(self, value: i128) -> bool {
        (self.min()..=self.max()).contains(&value)
    }
}

impl fmt::Display for Repr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.rust_name())
    }
}

/// One declared constant.
///
/// The numeric value is stored as a bit pattern; `signed` says whether to
/// read it as `i64` or `u64`. That only matters for ordering, which is what
/// [`Value::key`] is for.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Value {
    pub name: String,
    pub bits: u64,
    pub signed: bool,
    /// Human-readable message, possibly empty.
    pub message: String,
    /// Exact textual form embedded in generated comparisons.
    pub literal: String,
}

impl Value {
    /// A constant of a signed type.
    pub fn signed(name: impl Into<String>, value: i64) -> Self {
        Self {
            name: name.into(),
            bits: value as u64,
            signed: true,
            message: String::new(),
            literal: value.to_string(),
        }
    }

    /// A constant of an unsigned type.
    pub fn unsigned(name: impl Into<String>, value: u64) -> Self {
        Self {
            name: name.into(),
            bits: value,
            signed: false,
            message: String::new(),
            literal: value.to_string(),
        }
    }

    /// A constant of the given repr, checked against its range.
    pub fn of_repr(name: impl Into<String>, repr: Repr, value: i128) -> Option<Self> {
        if !repr.contains(value) {
            return None;
        }
        Some(if repr.is_signed() {
            Self::signed(name, value as i64)
        } else {
            Self::unsigned(name, value as u64)
        })
    }

    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.message = message.into();
        self
    }

    pub fn with_literal(mut self, literal: impl Into<String>) -> Self {
        self.literal = literal.into();
        self
    }

    /// The numeric value under this value's signedness.
    pub fn key(&self) -> i128 {
        if self.signed {
            self.bits as i64 as i128
        } else {
            self.bits as i128
        }
    }
}

/// Which text of a [`Value`] a table is built from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextField {
    Name,
    Message,
}

/// A maximal sequence of values with strictly consecutive keys.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Run {
    values: Vec<Value>,
}

impl Run {
    pub(crate) fn new(values: Vec<Value>) -> Self {
        debug_assert!(!values.is_empty());
        debug_assert!(values.windows(2).all(|w| w[1].key() == w[0].key() + 1));
        Self { values }
    }

    pub fn values(&self) -> &[Value] {
        &self.values
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Always `false`; runs hold at least one value.
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn first(&self) -> &Value {
        &self.values[0]
    }

    pub fn last(&self) -> &Value {
        &self.values[self.values.len() - 1]
    }

    /// Whether `key` falls within `first..=last`.
    pub fn contains(&self, key: i128) -> bool {
        (self.first().key()..=self.last().key()).contains(&key)
    }
}

/// The ordered, disjoint runs of one declared type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunSet {
    runs: Vec<Run>,
}

impl RunSet {
    pub(crate) fn new(runs: Vec<Run>) -> Self {
        Self { runs }
    }

    pub fn runs(&self) -> &[Run] {
        &self.runs
    }

    pub fn len(&self) -> usize {
        self.runs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.runs.is_empty()
    }

    /// Every surviving value, in ascending order.
    pub fn values(&self) -> impl Iterator<Item = &Value> {
        self.runs.iter().flat_map(|run| run.values.iter())
    }

    pub fn signed(&self) -> bool {
        self.runs.first().is_some_and(|run| run.first().signed)
    }
}
