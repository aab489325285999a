//! Bin-table encoding: one pipe-delimited row per bin.
//!
//! The first histogram of a table fixes the `|low|high|` columns; every
//! following histogram contributes exactly one value cell per row.

use std::fmt::Write;

use crate::core::{error::RenderError, histogram::Histogram1D, pool::PoolQuery};

/// Rows of an org table body, without header or separator.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct BinTable {
    rows: Vec<String>,
}

impl BinTable {
    /// Seed a table from `h`: row `i` is `|low_i|high_i|value_i|`.
    #[must_use]
    pub fn encode_first(h: &Histogram1D) -> Self {
        let rows = h
            .bins()
            .iter()
            .map(|b| format!("|{}|{}|{}|", b.low, b.high, b.value))
            .collect();
        Self { rows }
    }

    /// Append `value_i|` to row `i`.
    ///
    /// Rows are left untouched when the bin count of `h` differs from the
    /// row count.
    pub fn append_column(&mut self, name: &str, h: &Histogram1D) -> Result<(), RenderError> {
        if h.bin_count() != self.rows.len() {
            return Err(RenderError::BinCountMismatch {
                name: name.to_owned(),
                rows: self.rows.len(),
                bins: h.bin_count(),
            });
        }
        for (row, b) in self.rows.iter_mut().zip(h.bins()) {
            // writing into a String cannot fail
            let _ = write!(row, "{}|", b.value);
        }
        Ok(())
    }

    #[inline]
    #[must_use]
    pub fn rows(&self) -> &[String] {
        &self.rows
    }

    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

/// Fetch `name` as a 1D histogram, classifying what it is otherwise.
///
/// 2D entries yield [`RenderError::Unsupported2D`]; entries of any other
/// class yield [`RenderError::UnsupportedKind`].
pub fn resolve_1d<'p, P: PoolQuery + ?Sized>(
    pool: &'p P,
    name: &str,
) -> Result<&'p Histogram1D, RenderError> {
    if let Some(h) = pool.histogram_1d(name) {
        return Ok(h);
    }
    if pool.is_2d(name) {
        return Err(RenderError::Unsupported2D(name.to_owned()));
    }
    match pool.kind_label(name) {
        Some(class) => Err(RenderError::UnsupportedKind {
            name: name.to_owned(),
            class: class.to_owned(),
        }),
        None => Err(RenderError::UnknownHistogram(name.to_owned())),
    }
}
