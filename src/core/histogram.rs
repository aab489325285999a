//! Read-only histogram shapes held by a pool.

/// One interval of a 1D histogram domain and its accumulated value.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Bin {
    pub low: f64,
    pub high: f64,
    pub value: f64,
}

/// Contiguous, ordered 1D bins.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Histogram1D {
    bins: Vec<Bin>,
}

impl Histogram1D {
    /// Callers are expected to hand over contiguous bins; the archive
    /// loader enforces it.
    #[must_use]
    pub fn from_bins(bins: Vec<Bin>) -> Self {
        Self { bins }
    }

    #[inline]
    #[must_use]
    pub fn bin_count(&self) -> usize {
        self.bins.len()
    }

    #[inline]
    #[must_use]
    pub fn range(&self, index: usize) -> Option<(f64, f64)> {
        self.bins.get(index).map(|b| (b.low, b.high))
    }

    #[inline]
    #[must_use]
    pub fn value(&self, index: usize) -> Option<f64> {
        self.bins.get(index).map(|b| b.value)
    }

    #[inline]
    #[must_use]
    pub fn bins(&self) -> &[Bin] {
        &self.bins
    }

    /// Domain covered by all bins, `None` when there are no bins.
    #[must_use]
    pub fn domain(&self) -> Option<(f64, f64)> {
        Some((self.bins.first()?.low, self.bins.last()?.high))
    }
}

/// One cell of a 2D histogram.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Bin2D {
    pub x: (f64, f64),
    pub y: (f64, f64),
    pub value: f64,
}

/// 2D histograms are carried for the tree dump only.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Histogram2D {
    bins: Vec<Bin2D>,
}

impl Histogram2D {
    #[must_use]
    pub fn from_bins(bins: Vec<Bin2D>) -> Self {
        Self { bins }
    }

    #[inline]
    #[must_use]
    pub fn bin_count(&self) -> usize {
        self.bins.len()
    }

    #[inline]
    #[must_use]
    pub fn bins(&self) -> &[Bin2D] {
        &self.bins
    }
}

/// Every shape a pool entry can take.
///
/// `Unsupported` keeps entries whose class the loader does not understand,
/// so renderers can refuse them explicitly instead of never seeing them.
#[derive(Clone, Debug, PartialEq)]
pub enum HistogramKind {
    OneD(Histogram1D),
    TwoD(Histogram2D),
    Unsupported { class: String, body: Vec<String> },
}

impl HistogramKind {
    /// Short label used in dumps and diagnostics.
    #[must_use]
    pub fn label(&self) -> &str {
        match self {
            Self::OneD(_) => "1D",
            Self::TwoD(_) => "2D",
            Self::Unsupported { class, .. } => class,
        }
    }
}
