//! CLI argument parsing for pdfvalidate.
//!
//! Both subcommands are declared here with `clap`. The `--output/-o`
//! argument is defined once in [`OutputArg`] and flattened into each
//! subcommand. Global flags locate the tool's collaborators and can also be
//! set through environment variables.

use clap::builder::FalseyValueParser;
use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

use pdfvalidate::config::{OutputFormat, UNBOUNDED, ValidateArgs};
use pdfvalidate::dispatch::Operation;
use pdfvalidate::settings::{
    ENV_CONFIG_FILE, ENV_ENGINE, ENV_ENGINE_JAR, ENV_NO_UPDATE_CHECK, ENV_REGISTRY_URL,
    ENV_STATE_FILE, EngineSettings, Settings,
};

/// Validate PDF documents against PDF/A and PDF/UA profiles.
///
/// pdfvalidate runs the validation engine on a document and writes the
/// engine's report to a file or to standard output. The exit code is 0 when
/// the document passed, 1 when the engine reported findings.
#[derive(Parser, Debug)]
#[command(name = "pdfvalidate")]
#[command(version)]
#[command(about = "Validate PDF documents with an external validation engine", long_about = None)]
#[command(author)]
#[command(arg_required_else_help = true)]
pub struct Cli {
    #[command(flatten)]
    pub global: GlobalArgs,

    #[command(subcommand)]
    pub command: Command,
}

/// Flags shared by every subcommand.
#[derive(Args, Debug, Clone, Default, PartialEq, Eq)]
pub struct GlobalArgs {
    /// Configuration descriptor to read
    ///
    /// Defaults to config.json next to the executable.
    #[arg(long, global = true, value_name = "FILE", env = ENV_CONFIG_FILE)]
    pub config_file: Option<PathBuf>,

    /// File recording when the update check last ran
    ///
    /// Defaults to .local_data.json in the working directory.
    #[arg(long, global = true, value_name = "FILE", env = ENV_STATE_FILE)]
    pub state_file: Option<PathBuf>,

    /// Program that runs the validation engine
    ///
    /// Without --engine-jar the program is run directly with the validation
    /// flags. With --engine-jar it is started as `<program> -jar <jar>`.
    #[arg(long, global = true, value_name = "PROGRAM", env = ENV_ENGINE)]
    pub engine: Option<PathBuf>,

    /// Validation engine jar
    #[arg(long, global = true, value_name = "JAR", env = ENV_ENGINE_JAR)]
    pub engine_jar: Option<PathBuf>,

    /// Base URL of the image registry used by the update check
    #[arg(long, global = true, value_name = "URL", env = ENV_REGISTRY_URL)]
    pub registry_url: Option<String>,

    /// Skip the daily check for a newer version
    #[arg(
        long,
        global = true,
        env = ENV_NO_UPDATE_CHECK,
        value_parser = FalseyValueParser::new()
    )]
    pub no_update_check: bool,
}

/// Output destination shared by both subcommands.
#[derive(Args, Debug, Clone, Default, PartialEq, Eq)]
pub struct OutputArg {
    /// Write output to this file instead of standard output
    ///
    /// Required for the xml (.xml) and html (.html) report formats.
    #[arg(short, long, value_name = "FILE")]
    pub output: Option<PathBuf>,
}

/// Operations.
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Export the configuration descriptor for integrations
    Config {
        #[command(flatten)]
        output: OutputArg,
    },

    /// Validate a PDF document
    Validate(ValidateCommand),
}

/// Arguments of the validate subcommand.
#[derive(Args, Debug, Clone)]
pub struct ValidateCommand {
    /// The input PDF file
    #[arg(short, long, value_name = "FILE")]
    pub input: PathBuf,

    #[command(flatten)]
    pub output: OutputArg,

    /// Report format
    #[arg(long, value_enum, value_name = "FORMAT", default_value_t = OutputFormat::Xml)]
    pub format: OutputFormat,

    /// Path to the validation profile
    #[arg(long, value_name = "FILE")]
    pub profile: Option<PathBuf>,

    /// Flavour name, e.g. 1b, 2u or ua1
    #[arg(long, value_name = "NAME")]
    pub flavour: Option<String>,

    /// Stop after this many failures (-1 for no limit)
    #[arg(
        long = "maxfailures",
        value_name = "N",
        default_value_t = UNBOUNDED,
        allow_negative_numbers = true
    )]
    pub max_failures: i64,

    /// Report at most this many failures per rule (-1 for no limit)
    #[arg(
        long = "maxfailuresdisplayed",
        value_name = "N",
        default_value_t = UNBOUNDED,
        allow_negative_numbers = true
    )]
    pub max_failures_displayed: i64,

    /// Include passed checks in the report
    #[arg(long = "pass")]
    pub show_passes: bool,
}

impl Cli {
    /// The operation selected on the command line.
    pub fn operation(&self) -> Operation {
        match &self.command {
            Command::Config { output } => Operation::Config {
                output: output.output.clone(),
            },
            Command::Validate(cmd) => Operation::Validate(ValidateArgs {
                input: cmd.input.clone(),
                output: cmd.output.output.clone(),
                format: Some(cmd.format),
                profile: cmd.profile.clone(),
                flavour: cmd.flavour.clone(),
                max_failures: Some(cmd.max_failures),
                max_failures_displayed: Some(cmd.max_failures_displayed),
                show_passes: cmd.show_passes,
            }),
        }
    }

    /// Settings for this invocation, starting from the defaults.
    pub fn settings(&self) -> Settings {
        self.global.apply(Settings::default())
    }
}

impl GlobalArgs {
    /// Apply the flags on top of `settings`.
    pub fn apply(&self, mut settings: Settings) -> Settings {
        if let Some(path) = &self.config_file {
            settings.descriptor_path = path.clone();
        }

        if let Some(path) = &self.state_file {
            settings.state_path = path.clone();
        }

        match (&self.engine, &self.engine_jar) {
            (Some(program), Some(jar)) => {
                settings.engine = EngineSettings {
                    program: program.clone(),
                    ..EngineSettings::java_jar(jar)
                };
            }
            (Some(program), None) => settings.engine = EngineSettings::program(program),
            (None, Some(jar)) => settings.engine = EngineSettings::java_jar(jar),
            (None, None) => {}
        }

        if let Some(url) = &self.registry_url {
            settings.registry.base_url = url.clone();
        }

        if self.no_update_check {
            settings.update_check = false;
        }

        settings
    }
}
