//! Packed string tables.
//!
//! A table stores the names (or messages) of a sequence of values as one
//! concatenated string plus an offset index, so entry `i` is
//! `text[index[i]..index[i + 1]]`. Generated code embeds both, with the index
//! stored in the narrowest unsigned integer that can address the text.

use std::ops::Range;

use crate::error::{Error, Result};
use crate::types::{TextField, Value};

/// Element type of a table's offset index.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum IndexWidth {
    U8,
    U16,
    U32,
}

impl IndexWidth {
    /// The narrowest width for text of `len` bytes.
    pub fn for_len(len: usize) -> Self {
        if len < 1 << 8 {
            IndexWidth::U8
        } else if len < 1 << 16 {
            IndexWidth::U16
        } else {
            IndexWidth::U32
        }
    }

    pub fn rust_name(self) -> &'static str {
        match self {
            IndexWidth::U8 => "u8",
            IndexWidth::U16 => "u16",
            IndexWidth::U32 => "u32",
        }
    }
}

/// Concatenated text plus cumulative offsets.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PackedTable {
    text: String,
    index: Vec<usize>,
    width: IndexWidth,
}

impl PackedTable {
    /// Build a table from already-extracted strings.
    pub fn from_strs<'a>(entries: impl IntoIterator<Item = &'a str>) -> Result<Self> {
        let mut text = String::new();
        let mut index = vec![0];
        for entry in entries {
            text.push_str(entry);
            index.push(text.len());
        }
        if u32::try_from(text.len()).is_err() {
            return Err(Error::TableTooLarge { bytes: text.len() });
        }
        let width = IndexWidth::for_len(text.len());
        Ok(Self { text, index, width })
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    /// Offsets, `len() + 1` entries starting at zero.
    pub fn index(&self) -> &[usize] {
        &self.index
    }

    pub fn width(&self) -> IndexWidth {
        self.width
    }

    /// Number of entries.
    pub fn len(&self) -> usize {
        self.index.len() - 1
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Byte range of entry `i` within [`Self::text`].
    pub fn range(&self, i: usize) -> Option<Range<usize>> {
        Some(*self.index.get(i)?..*self.index.get(i + 1)?)
    }

    pub fn get(&self, i: usize) -> Option<&str> {
        self.range(i).map(|r| &self.text[r])
    }

    /// Entries in order.
    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.index.windows(2).map(|w| &self.text[w[0]..w[1]])
    }
}

/// Build the name or message table for `values`, in order.
///
/// Messages lose one trailing line terminator first, so a comment that ends
/// in a newline does not inflate the offsets.
pub fn build_table<'a>(
    values: impl IntoIterator<Item = &'a Value>,
    field: TextField,
) -> Result<PackedTable> {
    PackedTable::from_strs(values.into_iter().map(|value| match field {
        TextField::Name => value.name.as_str(),
        TextField::Message => strip_line_terminator(&value.message),
    }))
}

fn strip_line_terminator(text: &str) -> &str {
    text.strip_suffix("\r\n")
        .or_else(|| text.strip_suffix('\n'))
        .unwrap_or(text)
}
