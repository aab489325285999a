//! Per-file report rendering, dispatched on the configured output format.

use std::{
    fs::File,
    io::{BufWriter, Write},
    path::{Path, PathBuf},
};

use tracing::info;

use crate::{
    core::{
        config::OutputFormat, constants::ORG_EXTENSION, error::RenderError, pool::PoolQuery,
    },
    render::org::write_org,
};

/// Org document name for `input`: base name, extension stripped, `.org`
/// appended. Independent of any output directory.
#[must_use]
pub fn document_name(input: &Path) -> String {
    let text = input.to_string_lossy();
    let base = text
        .rsplit(|c: char| c == '/' || std::path::is_separator(c))
        .next()
        .unwrap_or(&text);
    let stem = match base.rfind('.') {
        Some(dot) if dot > 0 => &base[..dot],
        _ => base,
    };
    format!("{stem}.{ORG_EXTENSION}")
}

/// Streams the plain modes write into.
pub struct Streams<'a> {
    pub out: &'a mut dyn Write,
    pub err: &'a mut dyn Write,
}

/// What rendering one file produced.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Rendered {
    /// Tree dump written to one of the plain streams.
    Plain(OutputFormat),
    /// Org document written at this path.
    Document(PathBuf),
}

/// Renders one pool per call; holds configuration only.
#[derive(Clone, Debug)]
pub struct ReportRenderer {
    format: OutputFormat,
    output_directory: PathBuf,
}

impl ReportRenderer {
    #[must_use]
    pub fn new(format: OutputFormat, output_directory: impl Into<PathBuf>) -> Self {
        Self {
            format,
            output_directory: output_directory.into(),
        }
    }

    #[inline]
    #[must_use]
    pub fn format(&self) -> OutputFormat {
        self.format
    }

    /// Render `pool`, loaded from `input`.
    pub fn render<P: PoolQuery + ?Sized>(
        &self,
        pool: &P,
        input: &Path,
        streams: &mut Streams<'_>,
    ) -> Result<Rendered, RenderError> {
        match self.format {
            OutputFormat::PlainOut => {
                pool.tree_dump(streams.out)?;
                streams.out.flush()?;
            }
            OutputFormat::PlainErr => {
                pool.tree_dump(streams.err)?;
                streams.err.flush()?;
            }
            OutputFormat::StructuredOutline => {
                let path = self.output_directory.join(document_name(input));
                write_document(pool, &path)?;
                info!(input = %input.display(), output = %path.display(), "org document written");
                return Ok(Rendered::Document(path));
            }
        }
        Ok(Rendered::Plain(self.format))
    }
}

fn write_document<P: PoolQuery + ?Sized>(pool: &P, path: &Path) -> Result<(), RenderError> {
    let output = |source| RenderError::Output {
        path: path.to_path_buf(),
        source,
    };
    let file = File::create(path).map_err(output)?;
    let mut w = BufWriter::new(file);
    write_org(pool, &mut w).map_err(|e| match e {
        RenderError::Io(source) => output(source),
        other => other,
    })?;
    w.flush().map_err(output)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{
        histogram::{Bin, Histogram1D, HistogramKind},
        pool::HistogramPool,
    };

    #[test]
    fn document_names_strip_directory_and_extension() {
        assert_eq!(document_name(Path::new("/data/run1.histo")), "run1.org");
        assert_eq!(document_name(Path::new("run1.tar.gz")), "run1.tar.org");
        assert_eq!(document_name(Path::new("relative/dir/pool")), "pool.org");
        assert_eq!(document_name(Path::new(".hidden")), ".hidden.org");
    }

    fn pool() -> HistogramPool {
        let mut p = HistogramPool::new("demo");
        p.insert(
            "h",
            "",
            HistogramKind::OneD(Histogram1D::from_bins(vec![Bin {
                low: 0.0,
                high: 1.0,
                value: 2.0,
            }])),
        );
        p
    }

    #[test]
    fn plain_modes_match_the_pool_tree_dump() {
        let p = pool();
        let mut direct = Vec::new();
        p.tree_dump(&mut direct).unwrap();

        for (format, use_out) in [(OutputFormat::PlainOut, true), (OutputFormat::PlainErr, false)] {
            let (mut out, mut err) = (Vec::new(), Vec::new());
            let renderer = ReportRenderer::new(format, "/nonexistent/never/opened");
            let rendered = renderer
                .render(
                    &p,
                    Path::new("in.histos"),
                    &mut Streams {
                        out: &mut out,
                        err: &mut err,
                    },
                )
                .unwrap();
            assert_eq!(rendered, Rendered::Plain(format));
            let (written, silent) = if use_out { (out, err) } else { (err, out) };
            assert_eq!(written, direct);
            assert!(silent.is_empty());
        }
    }

    #[test]
    fn missing_output_directory_is_an_output_error() {
        let renderer =
            ReportRenderer::new(OutputFormat::StructuredOutline, "/nonexistent/never/opened");
        let (mut out, mut err) = (Vec::new(), Vec::new());
        let result = renderer.render(
            &pool(),
            Path::new("in.histos"),
            &mut Streams {
                out: &mut out,
                err: &mut err,
            },
        );
        assert!(matches!(result, Err(RenderError::Output { .. })));
    }
}
