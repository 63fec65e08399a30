//! Strategy selection and the per-type generation plan.
//!
//! The shape of the generated lookup depends on how many runs the values
//! form. One run is a bounds check plus a table slice. A handful of runs is a
//! `match` over range patterns, one table per run. Beyond that, a linear
//! scan over ranges stops paying off and the values go into a hash map keyed
//! by the literal value. The crossover (see [`DEFAULT_MAX_SWITCH_RUNS`]) is a
//! size/complexity tradeoff and can be changed per generator.

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::normalize::normalize;
use crate::runtime::{DecodeError, UnknownNameError};
use crate::table::{PackedTable, build_table};
use crate::types::{Repr, RunSet, TextField, Value};

/// Largest run count that still uses [`Strategy::Multi`].
pub const DEFAULT_MAX_SWITCH_RUNS: usize = 10;

/// Fallback text for values outside every run: `TypeName(value)`.
///
/// Negative values of signed types print with a leading `-`.
pub const FALLBACK_FORMAT: &str = "{type}({value})";

/// Code shape used for one declared type.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Strategy {
    /// Exactly one run: bounds check and slice.
    Single,
    /// A few runs: range-pattern `match`, one table per run.
    Multi,
    /// Sparse values: hash map keyed by value over one flat table.
    Map,
}

/// Pick the strategy for `runs`.
pub fn select_strategy(runs: &RunSet, max_switch_runs: usize) -> Strategy {
    match runs.len() {
        0 | 1 => Strategy::Single,
        n if n <= max_switch_runs => Strategy::Multi,
        _ => Strategy::Map,
    }
}

/// Render the fallback text for `value`.
pub fn fallback_text(type_name: &str, value: i128) -> String {
    FALLBACK_FORMAT
        .replace("{type}", type_name)
        .replace("{value}", &value.to_string())
}

/// Location of one value's text in the plan's tables.
#[derive(Debug, Clone, Copy)]
pub(crate) struct Slot<'a> {
    pub table: usize,
    pub entry: usize,
    pub value: &'a Value,
}

#[derive(Serialize)]
struct EncodedValue<'a> {
    #[serde(rename = "type")]
    name: &'a str,
    message: &'a str,
}

#[derive(Deserialize)]
struct NamePayload {
    #[serde(rename = "type", alias = "name")]
    name: String,
}

/// Everything needed to emit the accessors of one declared type.
///
/// A plan can also evaluate the accessors it describes ([`Self::display`],
/// [`Self::message`], [`Self::parse`], [`Self::encode`], [`Self::decode`]),
/// following the same control flow the emitted code uses.
#[derive(Debug, Clone)]
pub struct TypePlan {
    type_name: String,
    repr: Repr,
    runs: RunSet,
    strategy: Strategy,
    names: Vec<PackedTable>,
    messages: Vec<PackedTable>,
}

impl TypePlan {
    /// Normalize `values`, choose a strategy, and build the tables.
    pub fn build(
        type_name: &str,
        repr: Repr,
        values: &[Value],
        max_switch_runs: usize,
    ) -> Result<Self> {
        let runs = normalize(type_name, values)?;
        if runs.signed() != repr.is_signed() {
            return Err(Error::MixedSignedness {
                type_name: type_name.to_string(),
            });
        }
        if let Some(value) = runs.values().find(|v| !repr.contains(v.key())) {
            return Err(Error::ValueOutOfRange {
                type_name: type_name.to_string(),
                name: value.name.clone(),
                literal: value.literal.clone(),
                repr: repr.rust_name(),
            });
        }

        let strategy = select_strategy(&runs, max_switch_runs);
        let (names, messages) = match strategy {
            Strategy::Single | Strategy::Multi => {
                let mut names = Vec::with_capacity(runs.len());
                let mut messages = Vec::with_capacity(runs.len());
                for run in runs.runs() {
                    names.push(build_table(run.values(), TextField::Name)?);
                    messages.push(build_table(run.values(), TextField::Message)?);
                }
                (names, messages)
            }
            Strategy::Map => (
                vec![build_table(runs.values(), TextField::Name)?],
                vec![build_table(runs.values(), TextField::Message)?],
            ),
        };

        tracing::debug!(
            type_name,
            runs = runs.len(),
            ?strategy,
            name_width = ?names.iter().map(PackedTable::width).max(),
            "selected strategy"
        );

        Ok(Self {
            type_name: type_name.to_string(),
            repr,
            runs,
            strategy,
            names,
            messages,
        })
    }

    pub fn type_name(&self) -> &str {
        &self.type_name
    }

    pub fn repr(&self) -> Repr {
        self.repr
    }

    pub fn runs(&self) -> &RunSet {
        &self.runs
    }

    pub fn strategy(&self) -> Strategy {
        self.strategy
    }

    /// Name tables: one per run, or a single flat table for [`Strategy::Map`].
    pub fn names(&self) -> &[PackedTable] {
        &self.names
    }

    /// Message tables, laid out like [`Self::names`].
    pub fn messages(&self) -> &[PackedTable] {
        &self.messages
    }

    pub fn tables(&self, field: TextField) -> &[PackedTable] {
        match field {
            TextField::Name => &self.names,
            TextField::Message => &self.messages,
        }
    }

    /// Every surviving value with the table entry holding its text.
    pub(crate) fn slots(&self) -> Vec<Slot<'_>> {
        match self.strategy {
            Strategy::Single | Strategy::Multi => self
                .runs
                .runs()
                .iter()
                .enumerate()
                .flat_map(|(table, run)| {
                    run.values()
                        .iter()
                        .enumerate()
                        .map(move |(entry, value)| Slot {
                            table,
                            entry,
                            value,
                        })
                })
                .collect(),
            Strategy::Map => self
                .runs
                .values()
                .enumerate()
                .map(|(entry, value)| Slot {
                    table: 0,
                    entry,
                    value,
                })
                .collect(),
        }
    }

    /// Table and entry for `key`, or `None` on a bounds miss.
    fn locate(&self, key: i128) -> Option<(usize, usize)> {
        match self.strategy {
            Strategy::Single => {
                let run = &self.runs.runs()[0];
                let i = key - run.first().key();
                (0..run.len() as i128)
                    .contains(&i)
                    .then_some((0, i as usize))
            }
            Strategy::Multi => self
                .runs
                .runs()
                .iter()
                .position(|run| run.contains(key))
                .map(|k| (k, (key - self.runs.runs()[k].first().key()) as usize)),
            Strategy::Map => self
                .runs
                .values()
                .position(|v| v.key() == key)
                .map(|entry| (0, entry)),
        }
    }

    fn text(&self, field: TextField, key: i128) -> String {
        self.locate(key)
            .and_then(|(table, entry)| self.tables(field)[table].get(entry))
            .map(str::to_string)
            .unwrap_or_else(|| fallback_text(&self.type_name, key))
    }

    /// What the generated `Display` impl writes for `key`.
    pub fn display(&self, key: i128) -> String {
        self.text(TextField::Name, key)
    }

    /// What the generated `message()` returns for `key`.
    pub fn message(&self, key: i128) -> String {
        self.text(TextField::Message, key)
    }

    /// What the generated `from_name` returns for `name`.
    pub fn parse(&self, name: &str) -> std::result::Result<i128, UnknownNameError> {
        self.slots()
            .into_iter()
            .find(|slot| self.names[slot.table].get(slot.entry) == Some(name))
            .map(|slot| slot.value.key())
            .ok_or_else(|| UnknownNameError::new(name, &self.type_name))
    }

    /// The JSON text the generated `Serialize` impl produces for `key`.
    pub fn encode(&self, key: i128) -> serde_json::Result<String> {
        let name = self.display(key);
        let message = self.message(key);
        let encoded = EncodedValue {
            name: &name,
            message: &message,
        };
        serde_json::to_string(&encoded)
    }

    /// What the generated `decode_json` does to `target`.
    pub fn decode(&self, target: &mut i128, data: &[u8]) -> std::result::Result<(), DecodeError> {
        let payload: NamePayload = serde_json::from_slice(data)
            .map_err(|err| DecodeError::malformed(&self.type_name, err))?;
        *target = self.parse(&payload.name)?;
        Ok(())
    }
}
