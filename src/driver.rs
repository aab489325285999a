//! Dump driver: setup → initialize → run* → reset.

use std::{
    io::{self, Write},
    path::PathBuf,
};

use tracing::{debug, info};

use crate::{
    core::{
        archive::load_pool,
        config::{DriverParams, LogPriority, OutputFormat, Settings},
        env::process_env,
        error::{DumpError, LifecycleError},
    },
    render::report::{Rendered, ReportRenderer, Streams},
};

/// Outcome of one input file.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FileReport {
    pub input: PathBuf,
    pub rendered: Rendered,
}

/// Everything one `run` produced, in input order.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct RunReport {
    pub files: Vec<FileReport>,
}

impl RunReport {
    /// Paths of org documents written during the run.
    pub fn documents(&self) -> impl Iterator<Item = &PathBuf> {
        self.files.iter().filter_map(|f| match &f.rendered {
            Rendered::Document(p) => Some(p),
            Rendered::Plain(_) => None,
        })
    }
}

/// Configuration a ready driver runs with.
#[derive(Clone, Debug)]
struct Session {
    settings: Settings,
    renderer: ReportRenderer,
}

#[derive(Clone, Debug, Default)]
enum DriverState {
    #[default]
    Uninitialized,
    Configured(DriverParams),
    Ready(Session),
}

impl DriverState {
    fn label(&self) -> &'static str {
        match self {
            Self::Uninitialized => "uninitialized",
            Self::Configured(_) => "configured",
            Self::Ready(_) => "ready",
        }
    }
}

/// Feeds every configured archive through the pool loader and the report
/// renderer.
#[derive(Debug, Default)]
pub struct Driver {
    state: DriverState,
}

impl Driver {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[inline]
    #[must_use]
    pub fn is_initialized(&self) -> bool {
        matches!(self.state, DriverState::Ready(_))
    }

    fn violation(&self, operation: &'static str) -> LifecycleError {
        LifecycleError {
            operation,
            state: self.state.label(),
        }
    }

    /// Store `params`; only legal on a fresh (or reset) driver.
    pub fn setup(&mut self, params: DriverParams) -> Result<(), LifecycleError> {
        if !matches!(self.state, DriverState::Uninitialized) {
            return Err(self.violation("setup"));
        }
        self.state = DriverState::Configured(params);
        Ok(())
    }

    /// Validate parameters, resolving the output directory against the
    /// process environment.
    pub fn initialize(&mut self) -> Result<(), DumpError> {
        self.initialize_with_env(process_env)
    }

    /// Same as [`Driver::initialize`] with a caller-supplied variable lookup.
    pub fn initialize_with_env<F>(&mut self, lookup: F) -> Result<(), DumpError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let DriverState::Configured(params) = &self.state else {
            return Err(self.violation("initialize").into());
        };
        let settings = Settings::resolve(params, lookup)?;
        debug!(
            format = %settings.format,
            inputs = settings.input_files.len(),
            output_directory = %settings.output_directory.display(),
            "driver initialized"
        );
        let renderer = ReportRenderer::new(settings.format, settings.output_directory.clone());
        self.state = DriverState::Ready(Session { settings, renderer });
        Ok(())
    }

    /// Validated logging priority, once initialized.
    #[must_use]
    pub fn logging(&self) -> Option<LogPriority> {
        match &self.state {
            DriverState::Ready(s) => Some(s.settings.logging),
            _ => None,
        }
    }

    /// Output format, once initialized.
    #[must_use]
    pub fn output_format(&self) -> Option<OutputFormat> {
        match &self.state {
            DriverState::Ready(s) => Some(s.settings.format),
            _ => None,
        }
    }

    /// Process every input file once, plain dumps going to stdout/stderr.
    pub fn run(&self) -> Result<RunReport, DumpError> {
        let (stdout, stderr) = (io::stdout(), io::stderr());
        let (mut out, mut err) = (stdout.lock(), stderr.lock());
        self.run_with(&mut out, &mut err)
    }

    /// Process every input file once, plain dumps going to `out` / `err`.
    ///
    /// Files are handled strictly in order; the first failure aborts the
    /// run and documents already written are left in place.
    pub fn run_with(&self, out: &mut dyn Write, err: &mut dyn Write) -> Result<RunReport, DumpError> {
        let DriverState::Ready(session) = &self.state else {
            return Err(self.violation("run").into());
        };
        debug!("Entering...");
        let mut streams = Streams { out, err };
        let mut report = RunReport::default();

        for input in &session.settings.input_files {
            info!(input = %input.display(), "processing archive");
            let pool = load_pool(input)?;
            let rendered = session.renderer.render(&pool, input, &mut streams)?;
            report.files.push(FileReport {
                input: input.clone(),
                rendered,
            });
        }
        debug!("Exiting.");
        Ok(report)
    }

    /// Drop the configuration and return to the uninitialized state.
    pub fn reset(&mut self) -> Result<(), LifecycleError> {
        if !self.is_initialized() {
            return Err(self.violation("reset"));
        }
        self.state = DriverState::Uninitialized;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn params() -> DriverParams {
        DriverParams::builder().input("a.histos").build()
    }

    #[test]
    fn lifecycle_happy_path() {
        let mut d = Driver::new();
        assert!(!d.is_initialized());
        d.setup(params()).unwrap();
        d.initialize().unwrap();
        assert!(d.is_initialized());
        assert_eq!(d.output_format(), Some(OutputFormat::PlainErr));
        assert_eq!(d.logging(), Some(LogPriority::Warning));
        d.reset().unwrap();
        assert!(!d.is_initialized());
        assert_eq!(d.output_format(), None);
        // a reset driver can be set up again
        d.setup(params()).unwrap();
    }

    #[test]
    fn out_of_order_calls_are_rejected() {
        let mut d = Driver::new();
        let e = d.reset().unwrap_err();
        assert_eq!((e.operation, e.state), ("reset", "uninitialized"));
        assert!(matches!(d.initialize(), Err(DumpError::Lifecycle(_))));
        assert!(matches!(
            d.run_with(&mut Vec::new(), &mut Vec::new()),
            Err(DumpError::Lifecycle(_))
        ));

        d.setup(params()).unwrap();
        let e = d.setup(params()).unwrap_err();
        assert_eq!(e.state, "configured");
        assert!(d.reset().is_err());
        assert!(matches!(
            d.run_with(&mut Vec::new(), &mut Vec::new()),
            Err(DumpError::Lifecycle(_))
        ));

        d.initialize().unwrap();
        assert!(matches!(d.initialize(), Err(DumpError::Lifecycle(_))));
        assert_eq!(d.setup(params()).unwrap_err().state, "ready");
    }

    #[test]
    fn failed_initialize_stays_configured() {
        let mut d = Driver::new();
        d.setup(DriverParams::default()).unwrap();
        assert!(matches!(d.initialize(), Err(DumpError::Config(_))));
        assert!(!d.is_initialized());
        assert_eq!(d.setup(params()).unwrap_err().state, "configured");
    }

    #[test]
    fn unresolved_output_directory_fails_initialize() {
        let mut d = Driver::new();
        d.setup(
            DriverParams::builder()
                .input("a")
                .output_format("org")
                .output_directory("$HPD_NOT_SET_ANYWHERE")
                .build(),
        )
        .unwrap();
        assert!(matches!(d.initialize_with_env(|_| None), Err(DumpError::Config(_))));
    }

    #[test]
    fn missing_archive_aborts_run() {
        let mut d = Driver::new();
        d.setup(DriverParams::builder().input("/nonexistent/a.histos").build())
            .unwrap();
        d.initialize().unwrap();
        let (mut out, mut err) = (Vec::new(), Vec::new());
        assert!(matches!(d.run_with(&mut out, &mut err), Err(DumpError::Archive(_))));
        assert!(out.is_empty() && err.is_empty());
    }
}
