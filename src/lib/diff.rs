//! Key-wise comparison of two parsed configs.
//!
//! Every name found in either input lands in exactly one of four buckets.
//! When a name appears more than once in the same file, only its first
//! occurrence takes part in the comparison; later duplicates are ignored.

use std::collections::{HashMap, HashSet};

#[cfg(feature = "tracing")]
use tracing::{debug, trace};

use crate::parse::{ConfigEntry, ParsedConfig};

/// Partition of the names of a source and a destination config.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct DiffResult {
  /// Present in both with the same value.
  pub equal: Vec<ConfigEntry>,
  /// Present in both with different values. Holds the source entry.
  pub changed: Vec<ConfigEntry>,
  /// Present in the source only.
  pub source_only: Vec<ConfigEntry>,
  /// Present in the destination only.
  pub dest_only: Vec<ConfigEntry>,
}

impl DiffResult {
  /// True when nothing but `equal` is populated.
  pub fn is_empty(&self) -> bool {
    self.changed.is_empty() && self.source_only.is_empty() && self.dest_only.is_empty()
  }

  /// Number of differing names across `changed`, `source_only` and `dest_only`.
  pub fn difference_count(&self) -> usize {
    self.changed.len() + self.source_only.len() + self.dest_only.len()
  }
}

/// Compares `source` against `dest`.
///
/// Source entries are visited in order. Each is matched against the
/// remaining destination entries by name; a matched destination entry is
/// consumed. Whatever remains of the destination afterwards is `dest_only`,
/// in destination file order.
pub fn diff(source: &ParsedConfig, dest: &ParsedConfig) -> DiffResult {
  #[cfg(feature = "tracing")]
  debug!(
    "Diffing {} source entries against {} destination entries",
    source.len(),
    dest.len()
  );

  let mut remaining: HashMap<&str, usize> = HashMap::with_capacity(dest.len());
  for (index, entry) in dest.entries.iter().enumerate() {
    remaining.entry(entry.name.as_str()).or_insert(index);
  }
  let first_dest_indices: HashSet<usize> = remaining.values().copied().collect();

  let mut result = DiffResult::default();
  let mut seen: HashSet<&str> = HashSet::with_capacity(source.len());

  for entry in &source.entries {
    if !seen.insert(entry.name.as_str()) {
      #[cfg(feature = "tracing")]
      trace!("Ignoring duplicate source key {}", entry.name);
      continue;
    }

    match remaining.remove(entry.name.as_str()) {
      Some(index) if dest.entries[index].value == entry.value => {
        #[cfg(feature = "tracing")]
        trace!("{} is equal", entry.name);
        result.equal.push(entry.clone());
      }
      Some(_) => {
        #[cfg(feature = "tracing")]
        trace!("{} differs", entry.name);
        result.changed.push(entry.clone());
      }
      None => {
        #[cfg(feature = "tracing")]
        trace!("{} is missing from destination", entry.name);
        result.source_only.push(entry.clone());
      }
    }
  }

  result.dest_only = dest
    .entries
    .iter()
    .enumerate()
    .filter(|(index, entry)| {
      first_dest_indices.contains(index) && remaining.contains_key(entry.name.as_str())
    })
    .map(|(_, entry)| entry.clone())
    .collect();

  #[cfg(feature = "tracing")]
  debug!(
    equal = result.equal.len(),
    changed = result.changed.len(),
    source_only = result.source_only.len(),
    dest_only = result.dest_only.len(),
    "Diff complete"
  );

  result
}
