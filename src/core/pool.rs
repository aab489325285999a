//! In-memory histogram pool and the narrow query surface renderers use.

use std::{
    collections::{BTreeMap, btree_map::Entry},
    io::{self, Write},
};

use crate::core::histogram::{Histogram1D, HistogramKind};

/// A named histogram plus its (possibly empty) group tag.
#[derive(Clone, Debug, PartialEq)]
pub struct PoolEntry {
    pub group: String,
    pub kind: HistogramKind,
}

/// Read-only view of a pool, as consumed by the report renderer.
pub trait PoolQuery {
    /// All histogram names, in a stable order.
    fn names(&self) -> Vec<&str>;
    /// Group tag of `name`; empty when ungrouped or unknown.
    fn group(&self, name: &str) -> &str;
    fn is_1d(&self, name: &str) -> bool;
    fn is_2d(&self, name: &str) -> bool;
    /// Kind label (`1D`, `2D` or the unsupported class), `None` if unknown.
    fn kind_label(&self, name: &str) -> Option<&str>;
    fn histogram_1d(&self, name: &str) -> Option<&Histogram1D>;

    /// Names whose group tag equals `group`, in listing order.
    fn names_in_group(&self, group: &str) -> Vec<&str> {
        self.names()
            .into_iter()
            .filter(|n| self.group(n) == group)
            .collect()
    }

    /// Full-content text rendering.
    fn tree_dump(&self, out: &mut dyn Write) -> io::Result<()>;
}

/// Histograms keyed by unique name, listed lexicographically.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct HistogramPool {
    description: String,
    entries: BTreeMap<String, PoolEntry>,
}

impl HistogramPool {
    #[must_use]
    pub fn new(description: impl Into<String>) -> Self {
        Self {
            description: description.into(),
            entries: BTreeMap::new(),
        }
    }

    #[inline]
    #[must_use]
    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn set_description(&mut self, d: impl Into<String>) {
        self.description = d.into();
    }

    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    #[must_use]
    pub fn get(&self, name: &str) -> Option<&PoolEntry> {
        self.entries.get(name)
    }

    /// Insert a histogram; returns `false` and leaves the pool untouched
    /// when `name` is already taken.
    pub fn insert(
        &mut self,
        name: impl Into<String>,
        group: impl Into<String>,
        kind: HistogramKind,
    ) -> bool {
        match self.entries.entry(name.into()) {
            Entry::Occupied(_) => false,
            Entry::Vacant(v) => {
                v.insert(PoolEntry {
                    group: group.into(),
                    kind,
                });
                true
            }
        }
    }
}

impl PoolQuery for HistogramPool {
    fn names(&self) -> Vec<&str> {
        self.entries.keys().map(String::as_str).collect()
    }

    fn group(&self, name: &str) -> &str {
        self.entries.get(name).map_or("", |e| e.group.as_str())
    }

    fn is_1d(&self, name: &str) -> bool {
        matches!(
            self.entries.get(name),
            Some(PoolEntry {
                kind: HistogramKind::OneD(_),
                ..
            })
        )
    }

    fn is_2d(&self, name: &str) -> bool {
        matches!(
            self.entries.get(name),
            Some(PoolEntry {
                kind: HistogramKind::TwoD(_),
                ..
            })
        )
    }

    fn kind_label(&self, name: &str) -> Option<&str> {
        self.entries.get(name).map(|e| e.kind.label())
    }

    fn histogram_1d(&self, name: &str) -> Option<&Histogram1D> {
        match &self.entries.get(name)?.kind {
            HistogramKind::OneD(h) => Some(h),
            _ => None,
        }
    }

    fn tree_dump(&self, out: &mut dyn Write) -> io::Result<()> {
        writeln!(out, "Histogram pool:")?;
        writeln!(out, "|-- Description : '{}'", self.description)?;
        writeln!(out, "`-- Histograms : {}", self.entries.len())?;

        let last = self.entries.len().saturating_sub(1);
        for (i, (name, entry)) in self.entries.iter().enumerate() {
            let (tag, pad) = if i == last {
                ("`-- ", "    ")
            } else {
                ("|-- ", "|   ")
            };
            write!(
                out,
                "    {tag}'{name}' [{}] group='{}'",
                entry.kind.label(),
                entry.group
            )?;
            match &entry.kind {
                HistogramKind::OneD(h) => {
                    write!(out, " bins={}", h.bin_count())?;
                    match h.domain() {
                        Some((lo, hi)) => writeln!(out, " range=[{lo}, {hi})")?,
                        None => writeln!(out)?,
                    }
                    let n = h.bin_count();
                    for (j, b) in h.bins().iter().enumerate() {
                        let leaf = if j + 1 == n { "`-- " } else { "|-- " };
                        writeln!(out, "    {pad}{leaf}[{}, {}) : {}", b.low, b.high, b.value)?;
                    }
                }
                HistogramKind::TwoD(h) => {
                    writeln!(out, " bins={}", h.bin_count())?;
                    let n = h.bin_count();
                    for (j, b) in h.bins().iter().enumerate() {
                        let leaf = if j + 1 == n { "`-- " } else { "|-- " };
                        writeln!(
                            out,
                            "    {pad}{leaf}[{}, {}) x [{}, {}) : {}",
                            b.x.0, b.x.1, b.y.0, b.y.1, b.value
                        )?;
                    }
                }
                HistogramKind::Unsupported { body, .. } => {
                    writeln!(out, " lines={}", body.len())?;
                }
            }
        }
        Ok(())
    }
}
