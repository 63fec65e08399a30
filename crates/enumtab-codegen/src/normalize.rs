//! Sorting, deduplication and run detection.

use crate::error::{Error, Result};
use crate::types::{Run, RunSet, Value};

/// Sort, deduplicate and split `values` into runs of consecutive keys.
///
/// For example, values `1, 2, 3, 5, 6, 7` become the runs `{1, 2, 3}` and
/// `{5, 6, 7}`. When several values share a key, the one declared first is
/// kept and the others are dropped.
pub fn normalize(type_name: &str, values: &[Value]) -> Result<RunSet> {
    let Some(first) = values.first() else {
        return Err(Error::EmptyInput {
            type_name: type_name.to_string(),
        });
    };
    if values.iter().any(|v| v.signed != first.signed) {
        return Err(Error::MixedSignedness {
            type_name: type_name.to_string(),
        });
    }

    let mut sorted = values.to_vec();
    // Stable: equal keys stay in declaration order.
    sorted.sort_by_key(Value::key);
    sorted.dedup_by(|later, kept| {
        let duplicate = later.key() == kept.key();
        if duplicate {
            tracing::trace!(
                type_name,
                kept = %kept.name,
                dropped = %later.name,
                value = %kept.literal,
                "dropping duplicate value"
            );
        }
        duplicate
    });

    let mut runs = Vec::new();
    let mut current: Vec<Value> = Vec::new();
    for value in sorted {
        if let Some(prev) = current.last()
            && value.key() != prev.key() + 1
        {
            runs.push(Run::new(std::mem::take(&mut current)));
        }
        current.push(value);
    }
    runs.push(Run::new(current));

    let run_set = RunSet::new(runs);
    tracing::debug!(
        type_name,
        declared = values.len(),
        kept = run_set.values().count(),
        runs = run_set.len(),
        "normalized values"
    );
    Ok(run_set)
}
