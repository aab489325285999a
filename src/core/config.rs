//! Run-time configuration object + fluent builder.

use std::{
    fmt,
    io::{self, Write},
    path::PathBuf,
    str::FromStr,
};

use tracing_subscriber::filter::LevelFilter;

use crate::core::{
    constants::{DEFAULT_LOGGING_LABEL, DEFAULT_OUTPUT_DIRECTORY, DEFAULT_OUTPUT_FORMAT},
    error::ConfigError,
};

/// Logging thresholds understood on the command line.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum LogPriority {
    Mute,
    Fatal,
    Critical,
    Error,
    Warning,
    Notice,
    Information,
    Debug,
    Trace,
}

impl LogPriority {
    /// Maximum `tracing` level let through at this priority.
    #[must_use]
    pub fn level_filter(self) -> LevelFilter {
        match self {
            Self::Mute => LevelFilter::OFF,
            Self::Fatal | Self::Critical | Self::Error => LevelFilter::ERROR,
            Self::Warning => LevelFilter::WARN,
            Self::Notice | Self::Information => LevelFilter::INFO,
            Self::Debug => LevelFilter::DEBUG,
            Self::Trace => LevelFilter::TRACE,
        }
    }
}

impl FromStr for LogPriority {
    type Err = ConfigError;

    /// Accepts `warning`, `WARNING` or `PRIO_WARNING` alike.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let lower = s.trim().to_ascii_lowercase();
        let label = lower.strip_prefix("prio_").unwrap_or(&lower);
        Ok(match label {
            "mute" | "none" => Self::Mute,
            "fatal" => Self::Fatal,
            "critical" => Self::Critical,
            "error" => Self::Error,
            "warning" => Self::Warning,
            "notice" => Self::Notice,
            "information" => Self::Information,
            "debug" => Self::Debug,
            "trace" => Self::Trace,
            _ => return Err(ConfigError::UnknownLoggingPriority(s.to_owned())),
        })
    }
}

/// Where and how a pool gets rendered. Fixed once configured.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum OutputFormat {
    /// Tree dump on standard output.
    PlainOut,
    /// Tree dump on the diagnostic stream.
    PlainErr,
    /// One org document per input file.
    StructuredOutline,
}

impl OutputFormat {
    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Self::PlainOut => "cout",
            Self::PlainErr => "clog",
            Self::StructuredOutline => "org",
        }
    }
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for OutputFormat {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "cout" => Ok(Self::PlainOut),
            "clog" => Ok(Self::PlainErr),
            "org" => Ok(Self::StructuredOutline),
            _ => Err(ConfigError::UnknownOutputFormat(s.to_owned())),
        }
    }
}

/// Raw driver parameters, as collected from the command line.
///
/// Labels stay unparsed until the driver is initialized so library callers
/// and the CLI share a single validation path.
#[derive(Clone, Debug, PartialEq)]
pub struct DriverParams {
    pub logging_label: String,
    pub input_files: Vec<PathBuf>,
    pub output_format_label: String,
    pub output_directory: String,
}

impl Default for DriverParams {
    fn default() -> Self {
        Self {
            logging_label: DEFAULT_LOGGING_LABEL.to_owned(),
            input_files: Vec::new(),
            output_format_label: DEFAULT_OUTPUT_FORMAT.to_owned(),
            output_directory: DEFAULT_OUTPUT_DIRECTORY.to_owned(),
        }
    }
}

impl DriverParams {
    #[inline]
    #[must_use]
    pub fn builder() -> DriverParamsBuilder {
        DriverParamsBuilder::default()
    }

    pub fn reset(&mut self) {
        *self = Self::default();
    }

    /// Tree-style listing of every parameter.
    pub fn dump(&self, out: &mut dyn Write) -> io::Result<()> {
        writeln!(out, "DriverParams:")?;
        writeln!(out, "|-- logging_label = '{}'", self.logging_label)?;
        writeln!(out, "|-- input_files = {}", self.input_files.len())?;
        for f in &self.input_files {
            writeln!(out, "|   |-- '{}'", f.display())?;
        }
        writeln!(out, "|-- output_format_label = '{}'", self.output_format_label)?;
        writeln!(out, "`-- output_directory = '{}'", self.output_directory)
    }
}

/// Fluent builder over [`DriverParams`].
#[derive(Debug, Default)]
pub struct DriverParamsBuilder {
    params: DriverParams,
}

impl DriverParamsBuilder {
    #[inline]
    #[must_use]
    pub fn logging(mut self, label: impl Into<String>) -> Self {
        self.params.logging_label = label.into();
        self
    }
    #[inline]
    #[must_use]
    pub fn input(mut self, path: impl Into<PathBuf>) -> Self {
        self.params.input_files.push(path.into());
        self
    }
    #[inline]
    #[must_use]
    pub fn inputs<I, P>(mut self, paths: I) -> Self
    where
        I: IntoIterator<Item = P>,
        P: Into<PathBuf>,
    {
        self.params
            .input_files
            .extend(paths.into_iter().map(Into::into));
        self
    }
    #[inline]
    #[must_use]
    pub fn output_format(mut self, label: impl Into<String>) -> Self {
        self.params.output_format_label = label.into();
        self
    }
    #[inline]
    #[must_use]
    pub fn output_directory(mut self, dir: impl Into<String>) -> Self {
        self.params.output_directory = dir.into();
        self
    }

    #[must_use]
    pub fn build(self) -> DriverParams {
        self.params
    }
}

/// Validated settings a ready driver runs with.
#[derive(Clone, Debug, PartialEq)]
pub struct Settings {
    pub logging: LogPriority,
    pub format: OutputFormat,
    pub input_files: Vec<PathBuf>,
    pub output_directory: PathBuf,
}

impl Settings {
    /// Parse labels, check inputs and, in org mode, resolve the output
    /// directory through `lookup`. Plain modes never open it, so it is kept
    /// verbatim there.
    pub fn resolve<F>(params: &DriverParams, lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let logging = params.logging_label.parse()?;
        let format: OutputFormat = params.output_format_label.parse()?;
        if params.input_files.is_empty() {
            return Err(ConfigError::NoInputFiles);
        }
        let output_directory = match format {
            OutputFormat::StructuredOutline => {
                crate::core::env::expand_env(&params.output_directory, lookup)?
            }
            OutputFormat::PlainOut | OutputFormat::PlainErr => params.output_directory.clone(),
        };
        Ok(Self {
            logging,
            format,
            input_files: params.input_files.clone(),
            output_directory: PathBuf::from(output_directory),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn priority_labels() {
        assert_eq!("warning".parse::<LogPriority>().unwrap(), LogPriority::Warning);
        assert_eq!("PRIO_DEBUG".parse::<LogPriority>().unwrap(), LogPriority::Debug);
        assert_eq!("Notice".parse::<LogPriority>().unwrap(), LogPriority::Notice);
        assert_eq!(LogPriority::Critical.level_filter(), LevelFilter::ERROR);
        assert_eq!(LogPriority::Mute.level_filter(), LevelFilter::OFF);
        assert!(matches!(
            "loud".parse::<LogPriority>(),
            Err(ConfigError::UnknownLoggingPriority(l)) if l == "loud"
        ));
    }

    #[test]
    fn output_format_labels() {
        assert_eq!("org".parse::<OutputFormat>().unwrap(), OutputFormat::StructuredOutline);
        assert_eq!("cout".parse::<OutputFormat>().unwrap(), OutputFormat::PlainOut);
        assert_eq!("clog".parse::<OutputFormat>().unwrap(), OutputFormat::PlainErr);
        assert!("ORG".parse::<OutputFormat>().is_err());
        assert_eq!(OutputFormat::StructuredOutline.to_string(), "org");
    }

    #[test]
    fn builder_defaults_match_command_line() {
        let p = DriverParams::builder().input("a.histos").build();
        assert_eq!(p.logging_label, "warning");
        assert_eq!(p.output_format_label, "clog");
        assert_eq!(p.output_directory, ".");
        assert_eq!(p.input_files, vec![PathBuf::from("a.histos")]);
    }

    #[test]
    fn resolve_rejects_bad_params() {
        let none = |_: &str| None;
        let p = DriverParams::default();
        assert!(matches!(Settings::resolve(&p, none), Err(ConfigError::NoInputFiles)));

        let p = DriverParams::builder().input("a").output_format("html").build();
        assert!(matches!(
            Settings::resolve(&p, none),
            Err(ConfigError::UnknownOutputFormat(_))
        ));

        let p = DriverParams::builder().input("a").logging("shout").build();
        assert!(matches!(
            Settings::resolve(&p, none),
            Err(ConfigError::UnknownLoggingPriority(_))
        ));
    }

    #[test]
    fn resolve_expands_output_directory() {
        let p = DriverParams::builder()
            .input("a")
            .output_format("org")
            .output_directory("${OUT}/reports")
            .build();
        let s = Settings::resolve(&p, |n| (n == "OUT").then(|| "/tmp/x".to_owned())).unwrap();
        assert_eq!(s.output_directory, PathBuf::from("/tmp/x/reports"));
        assert_eq!(s.format, OutputFormat::StructuredOutline);
    }

    #[test]
    fn plain_modes_leave_output_directory_unexpanded() {
        let none = |_: &str| None;
        let params = |format| {
            DriverParams::builder()
                .input("a")
                .output_format(format)
                .output_directory("$UNSET_DIR")
                .build()
        };
        for format in ["cout", "clog"] {
            let s = Settings::resolve(&params(format), none).unwrap();
            assert_eq!(s.output_directory, PathBuf::from("$UNSET_DIR"));
        }
        assert!(matches!(
            Settings::resolve(&params("org"), none),
            Err(ConfigError::UnresolvedVariable { .. })
        ));
    }

    #[test]
    fn dump_and_reset() {
        let mut p = DriverParams::builder().input("a").output_format("org").build();
        let mut out = Vec::new();
        p.dump(&mut out).unwrap();
        let text = String::from_utf8(out).unwrap();
        assert!(text.contains("|-- output_format_label = 'org'"));
        assert!(text.contains("|   |-- 'a'"));
        assert!(text.starts_with("DriverParams:\n|-- logging_label = 'warning'\n"));
        p.reset();
        assert_eq!(p, DriverParams::default());
    }
}
