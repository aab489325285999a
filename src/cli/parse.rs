use std::path::PathBuf;

use clap::Parser;

use crate::core::{
    config::DriverParams,
    constants::{APP_NAME, DEFAULT_LOGGING_LABEL, DEFAULT_OUTPUT_DIRECTORY, DEFAULT_OUTPUT_FORMAT},
};

/// Top-level CLI structure.
#[derive(Parser, Debug)]
#[command(
    name = APP_NAME,
    version,
    about = "Dump histogram pool archives as tree listings or org-mode tables"
)]
pub struct Cli {
    /// Logging priority (fatal, critical, error, warning, notice, information, debug, trace, mute)
    #[arg(short = 'P', long, value_name = "LABEL", default_value = DEFAULT_LOGGING_LABEL)]
    pub logging_priority: String,

    /// Input archive (repeatable)
    #[arg(short = 'i', long = "input-file", value_name = "FILE")]
    pub input_files: Vec<PathBuf>,

    /// Input archives given without a flag
    #[arg(value_name = "FILE")]
    pub inputs: Vec<PathBuf>,

    /// Output format: clog, cout or org
    #[arg(short = 'f', long, value_name = "FORMAT", default_value = DEFAULT_OUTPUT_FORMAT)]
    pub output_format: String,

    /// Directory org documents are written to (`$VAR` / `${VAR}` expanded)
    #[arg(short = 'd', long, value_name = "DIR", default_value = DEFAULT_OUTPUT_DIRECTORY)]
    pub output_directory: String,
}

impl Cli {
    /// Flagged inputs first, then positional ones, in command-line order.
    #[must_use]
    pub fn into_params(self) -> DriverParams {
        DriverParams::builder()
            .logging(self.logging_priority)
            .inputs(self.input_files)
            .inputs(self.inputs)
            .output_format(self.output_format)
            .output_directory(self.output_directory)
            .build()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn command_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn defaults() {
        let p = Cli::try_parse_from([APP_NAME, "run.histos"]).unwrap().into_params();
        assert_eq!(p.logging_label, "warning");
        assert_eq!(p.output_format_label, "clog");
        assert_eq!(p.output_directory, ".");
        assert_eq!(p.input_files, vec![PathBuf::from("run.histos")]);
    }

    #[test]
    fn flagged_inputs_come_before_positional_ones() {
        let p = Cli::try_parse_from([
            APP_NAME, "pos1", "-i", "flag1", "--input-file", "flag2", "pos2", "-f", "org", "-d",
            "$HOME/out", "-P", "debug",
        ])
        .unwrap()
        .into_params();
        assert_eq!(
            p.input_files,
            ["flag1", "flag2", "pos1", "pos2"].map(PathBuf::from).to_vec()
        );
        assert_eq!(p.output_format_label, "org");
        assert_eq!(p.output_directory, "$HOME/out");
        assert_eq!(p.logging_label, "debug");
    }

    #[test]
    fn labels_are_validated_later() {
        // clap accepts any label; the driver rejects it at initialize time
        let p = Cli::try_parse_from([APP_NAME, "-f", "html", "x"]).unwrap().into_params();
        assert_eq!(p.output_format_label, "html");
    }
}
