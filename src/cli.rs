// src/cli.rs
use anyhow::Result;
use clap::{Arg, ArgAction, Command, error::ErrorKind};
use std::{env, ffi::OsString, path::PathBuf, process::ExitCode};

use crate::{commands, infra::t, models::KNOWN_TARGETS, resolve_locale};

const PROGRAM_NAME: &str = "run_plan";

/// Arguments of a single `run_plan` invocation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CliArgs {
    pub test_plan: PathBuf,
    pub target: String,
    pub config: Option<PathBuf>,
    /// Set when `--lang` was given; it takes precedence over the config file.
    pub lang: Option<String>,
}

/// Pre-parses the command line arguments to find the language setting.
/// This allows i18n to be initialized before the full CLI is built.
/// It looks for a `--lang <VALUE>` or `--lang=<VALUE>` argument.
fn pre_parse_language(args: &[OsString]) -> Option<String> {
    let mut iter = args.iter();
    while let Some(arg) = iter.next() {
        let Some(arg) = arg.to_str() else { continue };
        if arg == "--lang" {
            return iter.next().and_then(|lang| lang.to_str()).map(str::to_string);
        }
        if let Some(lang) = arg.strip_prefix("--lang=") {
            return Some(lang.to_string());
        }
    }
    None
}

fn build_cli() -> Command {
    Command::new(PROGRAM_NAME)
        .version(env!("CARGO_PKG_VERSION"))
        .about(t!("cli.about").to_string())
        .arg(
            Arg::new("test_plan_file")
                .help(t!("cli.arg_test_plan").to_string())
                .value_name("TEST_PLAN_FILE")
                .required(true)
                .value_parser(clap::value_parser!(PathBuf))
                .action(ArgAction::Set),
        )
        .arg(
            Arg::new("target")
                .help(t!("cli.arg_target", targets = KNOWN_TARGETS.join(", ")).to_string())
                .value_name("TARGET")
                .required(true)
                .action(ArgAction::Set),
        )
        .arg(
            Arg::new("config")
                .short('c')
                .long("config")
                .help(t!("cli.arg_config").to_string())
                .value_name("CONFIG")
                .value_parser(clap::value_parser!(PathBuf))
                .action(ArgAction::Set),
        )
        .arg(
            Arg::new("lang")
                .long("lang")
                .help(t!("cli.arg_lang").to_string())
                .value_name("LANGUAGE")
                .action(ArgAction::Set),
        )
}

/// Prints the usage line together with the known targets.
pub fn print_usage() {
    println!("{}\n", t!("usage", program = PROGRAM_NAME));
    println!("{}\n", t!("usage_targets", targets = KNOWN_TARGETS.join(", ")));
}

/// Parses the process arguments. See [`parse_args_from`].
pub fn parse_args() -> Result<CliArgs, ExitCode> {
    parse_args_from(env::args_os())
}

/// Parses an argument list into [`CliArgs`].
///
/// On `--help`/`--version` the text is printed and `Err(ExitCode::SUCCESS)`
/// is returned. Any other parse failure (most often a wrong number of
/// positional arguments) prints the usage message and returns exit code 1.
pub fn parse_args_from<I, T>(args: I) -> Result<CliArgs, ExitCode>
where
    I: IntoIterator<Item = T>,
    T: Into<OsString>,
{
    let args: Vec<OsString> = args.into_iter().map(Into::into).collect();

    // Pre-parse language and initialize i18n first.
    let requested_lang = pre_parse_language(&args);
    rust_i18n::set_locale(&resolve_locale(requested_lang.as_deref()));

    let matches = match build_cli().try_get_matches_from(&args) {
        Ok(matches) => matches,
        Err(e) if matches!(e.kind(), ErrorKind::DisplayHelp | ErrorKind::DisplayVersion) => {
            let _ = e.print();
            return Err(ExitCode::SUCCESS);
        }
        Err(_) => {
            print_usage();
            return Err(ExitCode::from(1));
        }
    };

    Ok(CliArgs {
        test_plan: matches
            .get_one::<PathBuf>("test_plan_file")
            .cloned()
            .unwrap_or_default(),
        target: matches
            .get_one::<String>("target")
            .cloned()
            .unwrap_or_default(),
        config: matches.get_one::<PathBuf>("config").cloned(),
        lang: matches.get_one::<String>("lang").cloned(),
    })
}

/// Runs the plan described by the parsed arguments and returns the exit code.
pub async fn process_command(args: CliArgs) -> Result<ExitCode> {
    commands::run::execute(args).await
}
