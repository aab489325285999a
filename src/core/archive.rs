//! Line-oriented histogram pool archive loader with zero-allocation float
//! parsing.
//!
//! ```text
//! pool detector calibration run
//! histogram 1d energy_calo calo
//! 0 1 12
//! 1 2 7.5
//! end
//! ```

use std::{
    fs::File,
    io::{BufRead, BufReader, Read},
    path::Path,
};

use tracing::debug;

use crate::core::{
    constants::{KIND_1D, KIND_2D, KW_END, KW_HISTOGRAM, KW_POOL},
    error::{ArchiveError, ArchiveErrorKind},
    histogram::{Bin, Bin2D, Histogram1D, Histogram2D, HistogramKind},
    pool::HistogramPool,
};

// --- Helpers ---
#[inline]
fn trim(mut b: &[u8]) -> &[u8] {
    while !b.is_empty() && b[0].is_ascii_whitespace() {
        b = &b[1..];
    }
    while !b.is_empty() && b[b.len() - 1].is_ascii_whitespace() {
        b = &b[..b.len() - 1];
    }
    b
}

/// Replace U+2212 MINUS SIGN by an ASCII hyphen, in place.
#[inline]
fn normalize_unicode_minus(buf: &mut Vec<u8>) {
    let (mut r, mut w) = (0, 0);
    while r < buf.len() {
        if r + 2 < buf.len() && buf[r] == 0xE2 && buf[r + 1] == 0x88 && buf[r + 2] == 0x92 {
            buf[w] = b'-';
            r += 3;
            w += 1;
        } else {
            if r != w {
                buf[w] = buf[r];
            }
            r += 1;
            w += 1;
        }
    }
    buf.truncate(w);
}

#[inline]
fn parse_error(line: usize, kind: ArchiveErrorKind) -> ArchiveError {
    ArchiveError::Parse { line, kind }
}

#[inline]
fn parse_f64(bytes: &[u8], line: usize, field: &'static str) -> Result<f64, ArchiveError> {
    let bad = || {
        parse_error(
            line,
            ArchiveErrorKind::BadFloat {
                field,
                text: String::from_utf8_lossy(bytes).into_owned(),
            },
        )
    };
    let val = lexical_core::parse::<f64>(bytes).map_err(|_| bad())?;
    if val.is_finite() { Ok(val) } else { Err(bad()) }
}

fn fields(buf: &[u8]) -> Vec<&[u8]> {
    buf.split(u8::is_ascii_whitespace)
        .filter(|f| !f.is_empty())
        .collect()
}

/// Histogram block being accumulated.
struct Block {
    name: String,
    group: String,
    opened_at: usize,
    body: Body,
}

enum Body {
    OneD(Vec<Bin>),
    TwoD(Vec<Bin2D>),
    Other { class: String, lines: Vec<String> },
}

impl Block {
    fn open(cols: &[&[u8]], line: usize) -> Result<Self, ArchiveError> {
        // histogram <kind> <name> [<group>]
        if !(3..=4).contains(&cols.len()) {
            return Err(parse_error(
                line,
                ArchiveErrorKind::BadHeader(format!(
                    "expected 'histogram <kind> <name> [<group>]', got {} fields",
                    cols.len()
                )),
            ));
        }
        let text = |b: &[u8]| String::from_utf8_lossy(b).into_owned();
        // names and groups end up as org table cells
        let group = cols.get(3).map(|g| ("group", *g));
        for (field, b) in std::iter::once(("name", cols[2])).chain(group) {
            if b.contains(&b'|') {
                return Err(parse_error(
                    line,
                    ArchiveErrorKind::ReservedChar {
                        field,
                        text: text(b),
                    },
                ));
            }
        }
        let class = text(cols[1]);
        let body = match class.as_str() {
            KIND_1D => Body::OneD(Vec::new()),
            KIND_2D => Body::TwoD(Vec::new()),
            _ => Body::Other {
                class,
                lines: Vec::new(),
            },
        };
        Ok(Self {
            name: text(cols[2]),
            group: cols.get(3).map(|g| text(*g)).unwrap_or_default(),
            opened_at: line,
            body,
        })
    }

    fn push(&mut self, raw: &[u8], cols: &[&[u8]], line: usize) -> Result<(), ArchiveError> {
        match &mut self.body {
            Body::OneD(bins) => {
                if cols.len() != 3 {
                    return Err(parse_error(
                        line,
                        ArchiveErrorKind::BadColumnCount {
                            expected: 3,
                            got: cols.len(),
                        },
                    ));
                }
                let low = parse_f64(cols[0], line, "low")?;
                let high = parse_f64(cols[1], line, "high")?;
                let value = parse_f64(cols[2], line, "value")?;
                if low >= high {
                    return Err(parse_error(line, ArchiveErrorKind::EmptyRange { low, high }));
                }
                if let Some(prev) = bins.last() {
                    if prev.high != low {
                        return Err(parse_error(
                            line,
                            ArchiveErrorKind::NotContiguous {
                                prev_high: prev.high,
                                low,
                            },
                        ));
                    }
                }
                bins.push(Bin { low, high, value });
            }
            Body::TwoD(bins) => {
                if cols.len() != 5 {
                    return Err(parse_error(
                        line,
                        ArchiveErrorKind::BadColumnCount {
                            expected: 5,
                            got: cols.len(),
                        },
                    ));
                }
                let x = (
                    parse_f64(cols[0], line, "xlow")?,
                    parse_f64(cols[1], line, "xhigh")?,
                );
                let y = (
                    parse_f64(cols[2], line, "ylow")?,
                    parse_f64(cols[3], line, "yhigh")?,
                );
                let value = parse_f64(cols[4], line, "value")?;
                for (low, high) in [x, y] {
                    if low >= high {
                        return Err(parse_error(line, ArchiveErrorKind::EmptyRange { low, high }));
                    }
                }
                bins.push(Bin2D { x, y, value });
            }
            Body::Other { lines, .. } => {
                lines.push(String::from_utf8_lossy(trim(raw)).into_owned());
            }
        }
        Ok(())
    }

    fn close(self, pool: &mut HistogramPool, line: usize) -> Result<(), ArchiveError> {
        let kind = match self.body {
            Body::OneD(bins) => HistogramKind::OneD(Histogram1D::from_bins(bins)),
            Body::TwoD(bins) => HistogramKind::TwoD(Histogram2D::from_bins(bins)),
            Body::Other { class, lines } => HistogramKind::Unsupported { class, body: lines },
        };
        if pool.insert(self.name.clone(), self.group, kind) {
            Ok(())
        } else {
            Err(parse_error(line, ArchiveErrorKind::DuplicateName(self.name)))
        }
    }
}

// --- Archive ingest ---
const BUF_CAP: usize = 1 << 16; // 64 KiB

/// Deserialize a pool from any byte source.
pub fn read_pool<R: Read>(src: R) -> Result<HistogramPool, ArchiveError> {
    let mut rdr = BufReader::with_capacity(BUF_CAP, src);
    let mut buf = Vec::<u8>::with_capacity(256);
    let mut pool = HistogramPool::default();
    let mut open: Option<Block> = None;
    let mut seen_pool = false;
    let mut seen_block = false;
    let mut line_no = 0usize;

    loop {
        buf.clear();
        let n = rdr
            .read_until(b'\n', &mut buf)
            .map_err(|e| parse_error(line_no, ArchiveErrorKind::Io(e)))?;
        if n == 0 {
            break;
        }
        line_no += 1;

        normalize_unicode_minus(&mut buf);
        let line = trim(&buf);
        if line.is_empty() || line[0] == b'#' {
            continue;
        }
        let cols = fields(line);

        let kw = cols[0];

        if kw == KW_END.as_bytes() {
            match open.take() {
                Some(block) => block.close(&mut pool, line_no)?,
                None => return Err(parse_error(line_no, ArchiveErrorKind::OutsideBlock)),
            }
        } else if let Some(block) = open.as_mut() {
            block.push(line, &cols, line_no)?;
        } else if kw == KW_HISTOGRAM.as_bytes() {
            open = Some(Block::open(&cols, line_no)?);
            seen_block = true;
        } else if kw == KW_POOL.as_bytes() {
            if seen_pool || seen_block {
                return Err(parse_error(
                    line_no,
                    ArchiveErrorKind::BadHeader(
                        "'pool' must appear at most once, before any histogram".into(),
                    ),
                ));
            }
            seen_pool = true;
            let rest = trim(&line[KW_POOL.len()..]);
            pool.set_description(String::from_utf8_lossy(rest));
        } else {
            return Err(parse_error(line_no, ArchiveErrorKind::OutsideBlock));
        }
    }

    if let Some(block) = open {
        return Err(parse_error(
            block.opened_at,
            ArchiveErrorKind::Unterminated(block.name),
        ));
    }
    Ok(pool)
}

/// Open and deserialize the archive at `path`.
pub fn load_pool(path: &Path) -> Result<HistogramPool, ArchiveError> {
    let file = File::open(path).map_err(|source| ArchiveError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let pool = read_pool(file)?;
    debug!(path = %path.display(), histograms = pool.len(), "loaded pool archive");
    Ok(pool)
}
